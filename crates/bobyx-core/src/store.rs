use async_trait::async_trait;

use crate::game::GameFields;

/// Prefix of every game record key: `game:<id>`.
pub const GAME_KEY_PREFIX: &str = "game:";

/// Pattern matching every game record key and nothing else.
pub const GAME_KEY_PATTERN: &str = "game:*";

/// Well-known key of the id counter. It does not start with
/// [`GAME_KEY_PREFIX`], so the listing scan never sees it.
pub const GAME_ID_COUNTER_KEY: &str = "game_id_counter";

pub fn game_key(id: &str) -> String {
    format!("{GAME_KEY_PREFIX}{id}")
}

/// Inverse of [`game_key`].
pub fn id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(GAME_KEY_PREFIX)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("store returned an invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data-access contract between the HTTP layer and the key-value backend.
///
/// Implementations must be safe to share across concurrent requests; the
/// endpoint layer holds one instance behind an `Arc` and never locks it.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Atomically bump the id counter and return the new value. Ids are
    /// strictly increasing and never reused.
    async fn next_id(&self) -> StoreResult<String>;

    /// Write every field of a record at `game:<id>` in one batched call.
    async fn create(&self, id: &str, fields: &GameFields) -> StoreResult<()>;

    /// Read a record. `Ok(None)` when the record is absent, i.e. its
    /// `name` field is missing or empty.
    async fn get(&self, id: &str) -> StoreResult<Option<GameFields>>;

    /// Every stored record as `(id, fields)`, in no particular order.
    ///
    /// This is a full key scan followed by one read per key. There is no
    /// index; an index-backed store can replace this without touching
    /// callers.
    async fn list_all(&self) -> StoreResult<Vec<(String, GameFields)>>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
