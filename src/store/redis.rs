use redis::AsyncCommands;
use redis::Client;

use super::{SlotKey, SlotStore};
use crate::error::AppResult;

/// Creates a Redis client for the persisted slots
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Slot store backed by Redis
///
/// Slots never expire. An optional prefix namespaces the keys so several
/// visitors can share one Redis instance.
#[derive(Clone)]
pub struct RedisSlotStore {
    redis_client: Client,
    prefix: String,
}

impl RedisSlotStore {
    pub fn new(redis_client: Client, prefix: impl Into<String>) -> Self {
        Self {
            redis_client,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: SlotKey) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }
}

#[async_trait::async_trait]
impl SlotStore for RedisSlotStore {
    async fn get(&self, key: SlotKey) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: SlotKey, value: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(self.key(key), value).await?;
        tracing::debug!(slot = %key, "Persisted slot");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
