use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::game::GameFields;
use crate::store::{GAME_KEY_PREFIX, GameStore, StoreError, StoreResult, game_key, id_from_key};

type RawHash = HashMap<String, String>;

/// In-process store with the same key layout as the Redis backend: records
/// are raw field hashes under `game:<id>` and the counter is a separate
/// integer. Nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    counter: AtomicU64,
    hashes: RwLock<BTreeMap<String, RawHash>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a backend error, or clear
    /// that state.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current counter value without incrementing it.
    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Write a raw hash at `game:<id>`, bypassing the record model.
    pub async fn insert_raw(&self, id: &str, hash: RawHash) {
        self.hashes.write().await.insert(game_key(id), hash);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn next_id(&self) -> StoreResult<String> {
        self.check()?;
        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(id.to_string())
    }

    async fn create(&self, id: &str, fields: &GameFields) -> StoreResult<()> {
        self.check()?;
        let mut hashes = self.hashes.write().await;
        let hash = hashes.entry(game_key(id)).or_default();
        for (key, value) in fields.to_pairs() {
            hash.insert(key.to_string(), value.to_string());
        }
        tracing::debug!(id, "stored game record in memory");
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<GameFields>> {
        self.check()?;
        let hashes = self.hashes.read().await;
        Ok(hashes
            .get(&game_key(id))
            .cloned()
            .and_then(GameFields::from_hash))
    }

    async fn list_all(&self) -> StoreResult<Vec<(String, GameFields)>> {
        self.check()?;
        let keys: Vec<String> = {
            let hashes = self.hashes.read().await;
            hashes
                .keys()
                .filter(|k| k.starts_with(GAME_KEY_PREFIX))
                .cloned()
                .collect()
        };

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(id) = id_from_key(&key) else {
                continue;
            };
            if let Some(fields) = self.get(id).await? {
                records.push((id.to_string(), fields));
            }
        }
        Ok(records)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}
