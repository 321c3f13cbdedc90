use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{SlotKey, SlotStore};
use crate::error::AppResult;

/// In-process slot store backing the engine in tests
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<SlotKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SlotStore for MemoryStore {
    async fn get(&self, key: SlotKey) -> AppResult<Option<String>> {
        Ok(self.slots.read().await.get(&key).cloned())
    }

    async fn set(&self, key: SlotKey, value: String) -> AppResult<()> {
        self.slots.write().await.insert(key, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
