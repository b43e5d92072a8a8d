use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use bobyx_core::game::GameFields;
use bobyx_core::store::{
    GAME_ID_COUNTER_KEY, GAME_KEY_PATTERN, GameStore, StoreError, StoreResult, game_key,
    id_from_key,
};

/// Redis-backed [`GameStore`].
///
/// Holds one multiplexed [`ConnectionManager`]; each call works on a cheap
/// clone of it, so concurrent requests share a single connection without
/// locking. The manager reconnects on its own after a dropped connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

fn backend(err: redis::RedisError) -> StoreError {
    StoreError::Backend(err.to_string())
}

impl RedisStore {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(backend)?;
        let conn = client.get_connection_manager().await.map_err(backend)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl GameStore for RedisStore {
    async fn next_id(&self) -> StoreResult<String> {
        let mut conn = self.conn.clone();
        let id: i64 = conn.incr(GAME_ID_COUNTER_KEY, 1).await.map_err(backend)?;
        Ok(id.to_string())
    }

    async fn create(&self, id: &str, fields: &GameFields) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let key = game_key(id);
        let () = conn
            .hset_multiple(&key, &fields.to_pairs())
            .await
            .map_err(backend)?;
        tracing::debug!(key = %key, "stored game record");
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<GameFields>> {
        let mut conn = self.conn.clone();
        let hash: HashMap<String, String> = conn.hgetall(game_key(id)).await.map_err(backend)?;
        Ok(GameFields::from_hash(hash))
    }

    async fn list_all(&self) -> StoreResult<Vec<(String, GameFields)>> {
        let mut conn = self.conn.clone();
        // KEYS walks the whole keyspace. Fine without an index at this scale.
        let keys: Vec<String> = conn.keys(GAME_KEY_PATTERN).await.map_err(backend)?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let id = id_from_key(&key).ok_or_else(|| StoreError::InvalidValue {
                key: key.clone(),
                reason: "key does not carry the game prefix".to_string(),
            })?;
            let hash: HashMap<String, String> = conn.hgetall(&key).await.map_err(backend)?;
            if let Some(fields) = GameFields::from_hash(hash) {
                records.push((id.to_string(), fields));
            }
        }
        Ok(records)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
