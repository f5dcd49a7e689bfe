use crate::deck::DeckId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

/// 牌组操作可能出现的错误
///
/// 都是逻辑或状态冲突，不是瞬时故障，调用方不应自动重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// 自定义牌组中出现了无法解析的牌码
    #[error("invalid card code '{0}'")]
    InvalidCardCode(String),

    #[error("deck {0} not found")]
    DeckNotFound(DeckId),

    /// 剩余牌数不足以完成本次抽牌，或打开一副已经抽空的牌组
    #[error("not enough cards in deck ({remaining} remaining)")]
    EmptyDeck { remaining: usize },

    /// 调用方提供的版本号与当前存储的版本号不一致
    #[error("invalid deck version (expected {expected}, current {actual})")]
    VersionConflict { expected: u64, actual: u64 },
}
