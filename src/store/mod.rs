use std::{fmt::Display, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    error::AppResult,
    models::{InterestSelection, InterestTag, TripId, ViewedHistory},
};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::{create_redis_client, RedisSlotStore};

/// Named slots the engine persists its state in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Interests,
    ViewedIds,
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKey::Interests => write!(f, "tp_interests"),
            SlotKey::ViewedIds => write!(f, "tp_viewed_ids"),
        }
    }
}

/// String-keyed persisted storage for the engine's two slots
#[async_trait::async_trait]
pub trait SlotStore: Send + Sync {
    /// Reads the raw value stored under `key`, if any
    async fn get(&self, key: SlotKey) -> AppResult<Option<String>>;

    /// Overwrites the value stored under `key`
    async fn set(&self, key: SlotKey, value: String) -> AppResult<()>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Typed access to the interest and history slots
///
/// Loads never fail: anything missing, unreadable, or malformed comes back
/// as the empty default. Saves log failures and carry on.
#[derive(Clone)]
pub struct PreferenceStore {
    slots: Arc<dyn SlotStore>,
}

impl PreferenceStore {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    pub async fn load_interests(&self) -> InterestSelection {
        let Some(raw) = self.read_slot::<Option<Vec<String>>>(SlotKey::Interests).await else {
            return InterestSelection::new();
        };

        raw.unwrap_or_default()
            .iter()
            .filter_map(|id| match id.parse::<InterestTag>() {
                Ok(tag) => Some(tag),
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping unknown persisted interest");
                    None
                }
            })
            .collect()
    }

    pub async fn save_interests(&self, interests: &InterestSelection) {
        let ids: Vec<&str> = interests.iter().map(|tag| tag.id()).collect();
        self.write_slot(SlotKey::Interests, &ids).await;
    }

    pub async fn load_viewed_history(&self) -> ViewedHistory {
        self.read_slot::<Option<Vec<TripId>>>(SlotKey::ViewedIds)
            .await
            .flatten()
            .map(ViewedHistory::from_ids)
            .unwrap_or_default()
    }

    pub async fn save_viewed_history(&self, history: &ViewedHistory) {
        self.write_slot(SlotKey::ViewedIds, history.ids()).await;
    }

    async fn read_slot<T: DeserializeOwned>(&self, key: SlotKey) -> Option<T> {
        let raw = match self.slots.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    slot = %key,
                    store = self.slots.name(),
                    "Slot read failed"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, slot = %key, "Ignoring malformed slot contents");
                None
            }
        }
    }

    async fn write_slot<T: serde::Serialize + ?Sized>(&self, key: SlotKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, slot = %key, "Slot serialization error");
                return;
            }
        };

        if let Err(e) = self.slots.set(key, json).await {
            tracing::warn!(error = %e, slot = %key, store = self.slots.name(), "Slot write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct BrokenStore;

    fn offline() -> ::redis::RedisError {
        ::redis::RedisError::from((::redis::ErrorKind::IoError, "store offline"))
    }

    #[async_trait::async_trait]
    impl SlotStore for BrokenStore {
        async fn get(&self, _key: SlotKey) -> AppResult<Option<String>> {
            Err(AppError::Cache(offline()))
        }

        async fn set(&self, _key: SlotKey, _value: String) -> AppResult<()> {
            Err(AppError::Cache(offline()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    async fn store_with(key: SlotKey, raw: &str) -> (Arc<MemoryStore>, PreferenceStore) {
        let memory = Arc::new(MemoryStore::new());
        memory.set(key, raw.to_string()).await.unwrap();
        let prefs = PreferenceStore::new(memory.clone());
        (memory, prefs)
    }

    #[test]
    fn test_slot_key_display() {
        assert_eq!(format!("{}", SlotKey::Interests), "tp_interests");
        assert_eq!(format!("{}", SlotKey::ViewedIds), "tp_viewed_ids");
    }

    #[tokio::test]
    async fn test_load_interests_missing_slot_is_empty() {
        let prefs = PreferenceStore::new(Arc::new(MemoryStore::new()));
        assert!(prefs.load_interests().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_interests_malformed_json_is_empty() {
        let (_, prefs) = store_with(SlotKey::Interests, "{not json").await;
        assert!(prefs.load_interests().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_interests_wrong_shape_is_empty() {
        let (_, prefs) = store_with(SlotKey::Interests, r#"{"beach": true}"#).await;
        assert!(prefs.load_interests().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_interests_null_is_empty() {
        let (_, prefs) = store_with(SlotKey::Interests, "null").await;
        assert!(prefs.load_interests().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_interests_drops_unknown_ids() {
        let (_, prefs) = store_with(SlotKey::Interests, r#"["city","shopping","beach"]"#).await;
        let interests = prefs.load_interests().await;
        assert_eq!(
            interests.into_iter().collect::<Vec<_>>(),
            vec![InterestTag::Beach, InterestTag::City]
        );
    }

    #[tokio::test]
    async fn test_save_interests_writes_json_id_list() {
        let memory = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::new(memory.clone());
        let interests: InterestSelection = [InterestTag::Spiritual, InterestTag::Beach].into();

        prefs.save_interests(&interests).await;

        let raw = memory.get(SlotKey::Interests).await.unwrap();
        assert_eq!(raw.as_deref(), Some(r#"["beach","spiritual"]"#));
        assert_eq!(prefs.load_interests().await, interests);
    }

    #[tokio::test]
    async fn test_load_viewed_history_malformed_is_empty() {
        let (_, prefs) = store_with(SlotKey::ViewedIds, r#"["a", "b"]"#).await;
        assert!(prefs.load_viewed_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_viewed_history_round_trip_keeps_order() {
        let memory = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::new(memory.clone());
        let history = ViewedHistory::from_ids([TripId(5), TripId(2), TripId(8)]);

        prefs.save_viewed_history(&history).await;

        let raw = memory.get(SlotKey::ViewedIds).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[5,2,8]"));
        assert_eq!(prefs.load_viewed_history().await, history);
    }

    #[tokio::test]
    async fn test_broken_store_degrades_to_defaults() {
        let prefs = PreferenceStore::new(Arc::new(BrokenStore));

        assert!(prefs.load_interests().await.is_empty());
        assert!(prefs.load_viewed_history().await.is_empty());
        // Write failures are swallowed
        prefs.save_viewed_history(&ViewedHistory::from_ids([TripId(1)])).await;
    }
}
