use clap::Parser;
use std::net::SocketAddr;

/// 服务器启动参数，命令行优先，其次读取环境变量
#[derive(Parser, Debug, Clone)]
#[command(name = "deck_api_server", version, about = "牌组 HTTP 服务")]
pub struct Config {
    /// 监听地址
    #[arg(long, env = "DECK_API_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// 固定洗牌种子，便于复现问题；不设置时使用系统熵
    #[arg(long, env = "DECK_API_SEED")]
    pub seed: Option<u64>,
}
