use crate::card::Card;
use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type DeckId = Uuid;

/// 一副牌组 (Deck)
///
/// - `cards` 的第一张是下一张被抽出的牌。
/// - 剩余张数永远等于 `cards.len()`，因此不单独存储。
/// - `id` 和 `shuffled` 在创建后不可变；`version` 只增不减，每次成功抽牌加一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DeckJson", try_from = "DeckJson")]
pub struct Deck {
    id: DeckId,
    shuffled: bool,
    cards: Vec<Card>,
    version: u64,
}

impl Deck {
    /// 用给定的牌创建一副新牌组，分配新的 id，版本号从 0 开始
    pub fn new(cards: Vec<Card>, shuffled: bool) -> Self {
        Deck { id: Uuid::new_v4(), shuffled, cards, version: 0 }
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    pub fn shuffled(&self) -> bool {
        self.shuffled
    }

    /// 剩余张数
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_exhausted(&self) -> bool {
        self.cards.is_empty()
    }

    /// 从牌组前端抽出 `count` 张牌，并把版本号加一
    ///
    /// 全有或全无：剩余不足时返回 `EmptyDeck`，牌组保持不变。
    /// `count == 0` 也算一次成功的抽牌。
    pub(crate) fn draw(&mut self, count: usize) -> Result<Vec<Card>> {
        if count > self.cards.len() {
            return Err(DeckError::EmptyDeck { remaining: self.cards.len() });
        }
        let drawn = self.cards.drain(..count).collect();
        self.version += 1;
        Ok(drawn)
    }
}

/// 牌组的 JSON 形式，字段名是对外稳定的契约
#[derive(Serialize, Deserialize)]
struct DeckJson {
    deck_id: DeckId,
    shuffled: bool,
    remaining: usize,
    cards: Vec<Card>,
    version: u64,
}

impl From<Deck> for DeckJson {
    fn from(deck: Deck) -> Self {
        DeckJson {
            deck_id: deck.id,
            shuffled: deck.shuffled,
            remaining: deck.cards.len(),
            cards: deck.cards,
            version: deck.version,
        }
    }
}

impl TryFrom<DeckJson> for Deck {
    type Error = String;

    fn try_from(json: DeckJson) -> std::result::Result<Self, String> {
        if json.remaining != json.cards.len() {
            return Err(format!(
                "remaining is {} but deck holds {} cards",
                json.remaining,
                json.cards.len()
            ));
        }
        Ok(Deck { id: json.deck_id, shuffled: json.shuffled, cards: json.cards, version: json.version })
    }
}
