//! Persistence and in-process caching for bandit models.
//!
//! One JSON document per user in Redis. Reads degrade instead of failing:
//! a missing or unreadable record yields a fresh model at the prior, and a
//! failed write is logged and dropped so recommendations keep flowing.

use super::model::{BanditModel, ModelSnapshot};
use super::Result;
use dashmap::DashMap;
use redis::AsyncCommands;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Redis-backed store for per-user model documents.
pub struct ModelStore {
    redis: redis::Client,
}

impl ModelStore {
    pub fn new(redis: redis::Client) -> Self {
        Self { redis }
    }

    fn model_key(&self, user_id: Uuid) -> String {
        format!("pantry:cmab:{}", user_id)
    }

    /// Load a user's model. Absent or unreadable records fall back to a
    /// fresh model at the prior; this never surfaces an error.
    pub async fn load(&self, user_id: Uuid) -> BanditModel {
        match self.try_load(user_id).await {
            Ok(Some(model)) => model,
            Ok(None) => {
                debug!(user_id = %user_id, "no stored bandit model, starting at prior");
                BanditModel::new()
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "failed to load bandit model, starting at prior");
                BanditModel::new()
            }
        }
    }

    async fn try_load(&self, user_id: Uuid) -> Result<Option<BanditModel>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let json: Option<String> = conn.get(self.model_key(user_id)).await?;

        match json {
            Some(data) => {
                let snapshot: ModelSnapshot = serde_json::from_str(&data)?;
                Ok(Some(BanditModel::from_snapshot(snapshot)))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, user_id: Uuid, model: &BanditModel) -> Result<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(&model.to_snapshot())?;

        let _: () = conn.set(self.model_key(user_id), json).await?;
        debug!(user_id = %user_id, pulls = model.total_user_pulls(), "saved bandit model");
        Ok(())
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.del(self.model_key(user_id)).await?;
        Ok(())
    }
}

/// In-process cache of live models, one mutex-guarded entry per user.
///
/// Constructed once at startup and injected into the recommendation flow,
/// so tests can stand up isolated instances side by side.
pub struct ModelCache {
    store: ModelStore,
    models: DashMap<Uuid, Arc<Mutex<BanditModel>>>,
}

impl ModelCache {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            models: DashMap::new(),
        }
    }

    /// Fetch the cached model for a user, loading it on first access.
    pub async fn get_or_load(&self, user_id: Uuid) -> Arc<Mutex<BanditModel>> {
        if let Some(entry) = self.models.get(&user_id) {
            return entry.clone();
        }

        let loaded = self.store.load(user_id).await;
        // Concurrent loaders race here; the first insert wins and the
        // losing copy is dropped.
        self.models
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(loaded)))
            .clone()
    }

    /// Write a model back to the store. Failures are logged and dropped so
    /// callers keep serving from the cached copy.
    pub async fn persist(&self, user_id: Uuid, model: &BanditModel) {
        if let Err(e) = self.store.save(user_id, model).await {
            warn!(user_id = %user_id, error = %e, "failed to persist bandit model");
        }
    }

    /// Drop the cached entry so the next access reloads from the store.
    pub fn evict(&self, user_id: Uuid) {
        self.models.remove(&user_id);
    }

    /// Delete the stored document and evict the cached entry.
    pub async fn remove(&self, user_id: Uuid) -> Result<()> {
        self.store.delete(user_id).await?;
        self.evict(user_id);
        Ok(())
    }

    /// Drop every cached entry. Stored documents are untouched, so the
    /// next access per user reloads from the store.
    pub fn clear_all(&self) {
        self.models.clear();
    }

    pub fn cached_users(&self) -> usize {
        self.models.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_cache() -> ModelCache {
        // A client pointed at a closed port; connections fail on first use.
        let client = redis::Client::open("redis://127.0.0.1:1/").expect("client");
        ModelCache::new(ModelStore::new(client))
    }

    #[test]
    fn test_model_key_format() {
        let client = redis::Client::open("redis://127.0.0.1:1/").expect("client");
        let store = ModelStore::new(client);
        let user_id = Uuid::nil();
        assert_eq!(
            store.model_key(user_id),
            "pantry:cmab:00000000-0000-0000-0000-000000000000"
        );
    }

    #[tokio::test]
    async fn test_load_degrades_to_fresh_model() {
        let cache = unreachable_cache();
        let user_id = Uuid::new_v4();

        let handle = cache.get_or_load(user_id).await;
        let model = handle.lock().await;
        assert_eq!(model.total_user_pulls(), 0);
        assert!(model.is_cold_start());
    }

    #[tokio::test]
    async fn test_cache_returns_same_entry() {
        let cache = unreachable_cache();
        let user_id = Uuid::new_v4();

        let first = cache.get_or_load(user_id).await;
        let second = cache.get_or_load(user_id).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.cached_users(), 1);
    }

    #[tokio::test]
    async fn test_persist_swallows_store_errors() {
        let cache = unreachable_cache();
        let user_id = Uuid::new_v4();

        let handle = cache.get_or_load(user_id).await;
        let model = handle.lock().await;
        // Must not panic or propagate even though the store is down.
        cache.persist(user_id, &model).await;
    }

    #[tokio::test]
    async fn test_evict_forces_reload() {
        let cache = unreachable_cache();
        let user_id = Uuid::new_v4();

        let first = cache.get_or_load(user_id).await;
        cache.evict(user_id);
        assert_eq!(cache.cached_users(), 0);

        let second = cache.get_or_load(user_id).await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_clear_all_empties_the_cache() {
        let cache = unreachable_cache();

        cache.get_or_load(Uuid::new_v4()).await;
        cache.get_or_load(Uuid::new_v4()).await;
        assert_eq!(cache.cached_users(), 2);

        cache.clear_all();
        assert_eq!(cache.cached_users(), 0);
    }
}
