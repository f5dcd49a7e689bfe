use crate::deck::{Deck, DeckId};
use serde::{Deserialize, Serialize};

// --- 客户端 -> 服务器 ---

/// 抽牌请求体
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    /// 要抽的张数
    pub draw: usize,
    /// 调用方最后看到的牌组版本号
    pub version: u64,
}

// --- 服务器 -> 客户端 ---

/// 创建牌组后的应答，只包含摘要，不包含牌
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateDeckResponse {
    pub deck_id: DeckId,
    pub shuffled: bool,
    pub remaining: usize,
}

impl From<&Deck> for CreateDeckResponse {
    fn from(deck: &Deck) -> Self {
        CreateDeckResponse { deck_id: deck.id(), shuffled: deck.shuffled(), remaining: deck.size() }
    }
}
