use crate::card::{full_deck, Card};
use crate::deck::{Deck, DeckId};
use crate::error::{DeckError, Result};
use crate::store::DeckStore;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info};

/// 牌组服务：负责创建、打开牌组以及抽牌，所有不变量都在这里维护
pub struct DeckService {
    store: Arc<dyn DeckStore>,
    // 只在洗牌时持有
    rng: Mutex<StdRng>,
}

impl DeckService {
    /// 随机数生成器用操作系统熵初始化，每次启动的洗牌结果都不同
    pub fn new(store: Arc<dyn DeckStore>) -> Self {
        Self { store, rng: Mutex::new(StdRng::from_os_rng()) }
    }

    /// 使用固定种子，洗牌结果可复现
    pub fn with_seed(store: Arc<dyn DeckStore>, seed: u64) -> Self {
        Self { store, rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    /// 创建一副新牌组并保存
    ///
    /// - `codes` 为空时创建标准顺序的 52 张完整牌组。
    /// - 否则按输入顺序逐个解码牌码，允许重复。任一牌码非法则整体失败，不会保存任何牌组。
    /// - `shuffle` 为 true 时在构造完成后做一次均匀洗牌。
    pub fn create_deck<S: AsRef<str>>(&self, codes: &[S], shuffle: bool) -> Result<Deck> {
        let mut cards = if codes.is_empty() {
            full_deck()
        } else {
            codes.iter().map(|code| code.as_ref().parse::<Card>()).collect::<Result<Vec<_>>>()?
        };

        if shuffle {
            cards.shuffle(&mut *self.rng.lock());
        }

        let deck = Deck::new(cards, shuffle);
        self.store.save(deck.clone());
        info!(deck_id = %deck.id(), size = deck.size(), shuffled = shuffle, "创建了新牌组");
        Ok(deck)
    }

    /// 读取牌组的完整状态
    ///
    /// 已经抽空的牌组视为错误 (`EmptyDeck`)，而不是返回一副空牌组。
    pub fn open_deck(&self, id: &DeckId) -> Result<Deck> {
        let deck = self.store.get(id)?;
        if deck.is_exhausted() {
            return Err(DeckError::EmptyDeck { remaining: 0 });
        }
        Ok(deck)
    }

    /// 从牌组前端抽出 `count` 张牌
    ///
    /// 调用方必须带上它最后看到的版本号。版本号不一致时返回 `VersionConflict`，
    /// 剩余牌数不足时返回 `EmptyDeck`，两种情况下牌组都保持不变。
    /// 成功后版本号加一（与 `count` 无关），返回按原顺序排列的牌。
    pub fn draw_cards(&self, id: &DeckId, count: usize, expected_version: u64) -> Result<Vec<Card>> {
        let mut deck = self.store.get(id)?;
        if deck.version() != expected_version {
            debug!(deck_id = %id, expected_version, actual = deck.version(), "版本号不一致");
            return Err(DeckError::VersionConflict { expected: expected_version, actual: deck.version() });
        }

        let drawn = deck.draw(count)?;
        // 读取之后可能有其他调用方抢先写入，这里由存储做最终的版本比较
        self.store.replace(deck, expected_version)?;

        debug!(deck_id = %id, count, version = expected_version + 1, "抽牌成功");
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::store::InMemoryDeckStore;
    use std::thread;
    use uuid::Uuid;

    fn service() -> DeckService {
        DeckService::new(Arc::new(InMemoryDeckStore::new()))
    }

    fn sorted(cards: &[Card]) -> Vec<Card> {
        let mut cards = cards.to_vec();
        cards.sort();
        cards
    }

    // --- 创建牌组 ---

    #[test]
    fn test_full_deck_no_shuffle() {
        let deck = service().create_deck::<&str>(&[], false).unwrap();
        assert_eq!(deck.size(), 52);
        assert!(!deck.shuffled());
        assert_eq!(deck.version(), 0);
        assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(deck.cards()[0].code(), "AS");
        assert_eq!(deck.cards()[51], Card::new(Rank::King, Suit::Hearts));
        assert_eq!(deck.cards()[51].code(), "KH");
    }

    #[test]
    fn test_full_deck_shuffle() {
        let deck = service().create_deck::<&str>(&[], true).unwrap();
        assert_eq!(deck.size(), 52);
        assert!(deck.shuffled());
        // 洗牌后与标准顺序相同的概率是 1/52!
        assert_ne!(deck.cards(), full_deck().as_slice());
        assert_eq!(sorted(deck.cards()), sorted(&full_deck()));
    }

    #[test]
    fn test_custom_deck_no_shuffle() {
        let deck = service().create_deck(&["AS", "KD", "AC"], false).unwrap();
        let expected = vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Clubs),
        ];
        assert_eq!(deck.size(), 3);
        assert!(!deck.shuffled());
        assert_eq!(deck.cards(), expected.as_slice());
    }

    #[test]
    fn test_custom_deck_allows_duplicates() {
        let deck = service().create_deck(&["AS", "AS", "AS"], false).unwrap();
        assert_eq!(deck.size(), 3);
        assert!(deck.cards().iter().all(|c| *c == Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn test_custom_deck_shuffle_keeps_cards() {
        let codes = ["AS", "KD", "AC", "2C", "KH"];
        let deck = service().create_deck(&codes, true).unwrap();
        let input: Vec<Card> = codes.iter().map(|c| c.parse().unwrap()).collect();
        assert_eq!(deck.size(), 5);
        assert!(deck.shuffled());
        assert_eq!(sorted(deck.cards()), sorted(&input));
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let a = DeckService::with_seed(Arc::new(InMemoryDeckStore::new()), 42);
        let b = DeckService::with_seed(Arc::new(InMemoryDeckStore::new()), 42);
        let deck_a = a.create_deck::<&str>(&[], true).unwrap();
        let deck_b = b.create_deck::<&str>(&[], true).unwrap();
        assert_eq!(deck_a.cards(), deck_b.cards());
        assert_ne!(deck_a.id(), deck_b.id());
    }

    #[test]
    fn test_invalid_card_code() {
        let store = Arc::new(InMemoryDeckStore::new());
        let service = DeckService::new(store.clone());

        let err = service.create_deck(&["11", "22", "33"], true).unwrap_err();
        assert_eq!(err, DeckError::InvalidCardCode("11".to_string()));

        let err = service.create_deck(&["AAAAA", "22", "33"], true).unwrap_err();
        assert_eq!(err, DeckError::InvalidCardCode("AAAAA".to_string()));

        // 合法牌码后面跟着非法牌码，也不能留下半成品
        assert!(service.create_deck(&["AS", "KD", "ZZ"], false).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_created_deck_is_persisted() {
        let store = Arc::new(InMemoryDeckStore::new());
        let service = DeckService::new(store.clone());
        let deck = service.create_deck(&["QH"], false).unwrap();
        assert_eq!(store.get(&deck.id()), Ok(deck));
    }

    // --- 打开牌组 ---

    #[test]
    fn test_open_full_deck() {
        let service = service();
        let created = service.create_deck::<&str>(&[], false).unwrap();
        let deck = service.open_deck(&created.id()).unwrap();
        assert_eq!(deck, created);
        assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn test_open_missing_deck() {
        let id = Uuid::new_v4();
        assert_eq!(service().open_deck(&id), Err(DeckError::DeckNotFound(id)));
    }

    #[test]
    fn test_open_exhausted_deck() {
        let service = service();
        let deck = service.create_deck::<&str>(&[], false).unwrap();
        service.draw_cards(&deck.id(), 52, deck.version()).unwrap();
        assert_eq!(service.open_deck(&deck.id()), Err(DeckError::EmptyDeck { remaining: 0 }));
    }

    // --- 抽牌 ---

    #[test]
    fn test_draw_one_card() {
        let service = service();
        let deck = service.create_deck::<&str>(&[], false).unwrap();

        let cards = service.draw_cards(&deck.id(), 1, 0).unwrap();
        assert_eq!(cards, vec![Card::new(Rank::Ace, Suit::Spades)]);

        let deck = service.open_deck(&deck.id()).unwrap();
        assert_eq!(deck.size(), 51);
        assert_eq!(deck.version(), 1);
        assert_eq!(deck.cards()[0], Card::new(Rank::Two, Suit::Spades));
    }

    #[test]
    fn test_draw_more_than_remaining() {
        let service = service();
        let deck = service.create_deck(&["AS"], false).unwrap();

        let err = service.draw_cards(&deck.id(), 2, deck.version()).unwrap_err();
        assert_eq!(err, DeckError::EmptyDeck { remaining: 1 });

        let after = service.open_deck(&deck.id()).unwrap();
        assert_eq!(after.size(), 1);
        assert_eq!(after.version(), 0);
    }

    #[test]
    fn test_draw_with_stale_version() {
        let service = service();
        let deck = service.create_deck(&["AS", "KD"], false).unwrap();
        service.draw_cards(&deck.id(), 1, 0).unwrap();

        let err = service.draw_cards(&deck.id(), 1, 0).unwrap_err();
        assert_eq!(err, DeckError::VersionConflict { expected: 0, actual: 1 });

        let after = service.open_deck(&deck.id()).unwrap();
        assert_eq!(after.size(), 1);
        assert_eq!(after.version(), 1);
    }

    #[test]
    fn test_draw_with_future_version() {
        let service = service();
        let deck = service.create_deck(&["AS"], false).unwrap();
        let err = service.draw_cards(&deck.id(), 1, 7).unwrap_err();
        assert_eq!(err, DeckError::VersionConflict { expected: 7, actual: 0 });
    }

    #[test]
    fn test_draw_from_missing_deck() {
        let id = Uuid::new_v4();
        assert_eq!(service().draw_cards(&id, 1, 0), Err(DeckError::DeckNotFound(id)));
    }

    #[test]
    fn test_draw_zero_from_exhausted_deck() {
        let service = service();
        let deck = service.create_deck(&["AS"], false).unwrap();
        service.draw_cards(&deck.id(), 1, 0).unwrap();

        // 抽空后 count=0 仍然算成功，版本号继续递增
        assert_eq!(service.draw_cards(&deck.id(), 0, 1), Ok(Vec::new()));
        assert_eq!(service.draw_cards(&deck.id(), 1, 2), Err(DeckError::EmptyDeck { remaining: 0 }));
    }

    #[test]
    fn test_size_and_version_after_several_draws() {
        let service = service();
        let codes = ["AS", "2S", "3S", "4S", "5S", "6S", "7S", "8S", "9S", "TS"];
        let deck = service.create_deck(&codes, false).unwrap();
        assert_eq!(deck.size(), codes.len());

        let counts = [3, 1, 4];
        let mut drawn = Vec::new();
        for (version, &count) in counts.iter().enumerate() {
            drawn.extend(service.draw_cards(&deck.id(), count, version as u64).unwrap());
        }

        let deck = service.open_deck(&deck.id()).unwrap();
        assert_eq!(deck.size(), codes.len() - counts.iter().sum::<usize>());
        assert_eq!(deck.version(), counts.len() as u64);
        let drawn_codes: Vec<String> = drawn.iter().map(Card::code).collect();
        assert_eq!(drawn_codes, &codes[..8]);
    }

    #[test]
    fn test_concurrent_draws_at_same_version() {
        let service = service();
        let deck = service.create_deck::<&str>(&[], false).unwrap();
        let id = deck.id();

        let results: Vec<Result<Vec<Card>>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| service.draw_cards(&id, 1, 0))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, DeckError::VersionConflict { expected: 0, .. })));

        let deck = service.open_deck(&id).unwrap();
        assert_eq!(deck.size(), 51);
        assert_eq!(deck.version(), 1);
    }
}
