//! # 牌组核心逻辑库
//!
//! 这个 `core` crate 包含了牌组服务的全部领域逻辑：
//! 牌码编解码、牌组的创建与抽牌、基于版本号的乐观并发控制，
//! 以及服务所依赖的存储抽象和客户端-服务器之间的消息定义。
//! 它与具体的网络层和存储技术解耦，可以被服务器和客户端共同复用。

mod card;
mod deck;
mod error;
mod message;
mod service;
mod store;

pub use card::*;

pub use deck::*;

pub use error::*;

pub use message::*;

pub use service::*;

pub use store::*;
