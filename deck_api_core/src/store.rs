use crate::deck::{Deck, DeckId};
use crate::error::{DeckError, Result};
use dashmap::DashMap;

/// 牌组存储
///
/// 同一进程内必须保证读己之写：`save` 之后对同一 id 的 `get` 能看到刚保存的状态。
/// 实现必须是线程安全的，服务会在多个请求间共享同一个存储。
pub trait DeckStore: Send + Sync {
    /// 按 id 插入或覆盖整副牌组
    fn save(&self, deck: Deck);

    fn get(&self, id: &DeckId) -> Result<Deck>;

    /// 仅当已存储牌组的版本号等于 `expected_version` 时才覆盖它，检查与写入是原子的
    fn replace(&self, deck: Deck, expected_version: u64) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 基于分片并发哈希表的内存存储，每个分片各有一把读写锁
#[derive(Debug, Default)]
pub struct InMemoryDeckStore {
    decks: DashMap<DeckId, Deck>,
}

impl InMemoryDeckStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeckStore for InMemoryDeckStore {
    fn save(&self, deck: Deck) {
        self.decks.insert(deck.id(), deck);
    }

    fn get(&self, id: &DeckId) -> Result<Deck> {
        self.decks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(DeckError::DeckNotFound(*id))
    }

    fn replace(&self, deck: Deck, expected_version: u64) -> Result<()> {
        let id = deck.id();
        // get_mut 持有分片写锁直到 slot 被释放
        let mut slot = self.decks.get_mut(&id).ok_or(DeckError::DeckNotFound(id))?;
        if slot.version() != expected_version {
            return Err(DeckError::VersionConflict { expected: expected_version, actual: slot.version() });
        }
        *slot = deck;
        Ok(())
    }

    fn len(&self) -> usize {
        self.decks.len()
    }
}
