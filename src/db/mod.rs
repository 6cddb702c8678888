//! Redis document store for users, inventory, allergies and feedback.
//!
//! Every entity is a JSON document. Users are plain keys with a lowercased
//! email index for login; inventory, allergies and feedback live in one hash
//! per user. Records that no longer parse are skipped on list reads rather
//! than failing the whole call.

use crate::models::{
    Allergy, FeedbackRecord, FeedbackType, InventoryItem, InventoryItemUpdate, User,
};
use chrono::Utc;
use redis::AsyncCommands;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Redis(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub struct Database {
    redis: redis::Client,
}

impl Database {
    pub fn new(redis: redis::Client) -> Self {
        Self { redis }
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.redis.get_multiplexed_async_connection().await?)
    }

    fn user_key(user_id: Uuid) -> String {
        format!("pantry:user:{}", user_id)
    }

    fn email_key(email: &str) -> String {
        format!("pantry:user:email:{}", email.trim().to_lowercase())
    }

    fn inventory_key(user_id: Uuid) -> String {
        format!("pantry:inventory:{}", user_id)
    }

    fn allergies_key(user_id: Uuid) -> String {
        format!("pantry:allergies:{}", user_id)
    }

    fn feedback_key(user_id: Uuid) -> String {
        format!("pantry:feedback:{}", user_id)
    }

    fn feedback_scores_key(user_id: Uuid) -> String {
        format!("pantry:feedback:scores:{}", user_id)
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    // ---- users ----

    /// Create a user, claiming the email index first so duplicate
    /// registrations conflict instead of overwriting.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User> {
        let mut conn = self.conn().await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            username: username.trim().to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };

        let claimed: bool = conn
            .set_nx(Self::email_key(&user.email), user.id.to_string())
            .await?;
        if !claimed {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        let json = serde_json::to_string(&user)?;
        let _: () = conn.set(Self::user_key(user.id), json).await?;
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        let mut conn = self.conn().await?;
        let json: Option<String> = conn.get(Self::user_key(user_id)).await?;
        match json {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Err(StoreError::NotFound(format!("user {} not found", user_id))),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let mut conn = self.conn().await?;
        let id: Option<String> = conn.get(Self::email_key(email)).await?;
        match id.and_then(|raw| Uuid::parse_str(&raw).ok()) {
            Some(user_id) => self.get_user(user_id).await,
            None => Err(StoreError::NotFound(format!(
                "no user registered for {}",
                email.trim().to_lowercase()
            ))),
        }
    }

    // ---- inventory ----

    /// Insert or overwrite an item in the user's inventory hash.
    pub async fn put_inventory_item(&self, item: &InventoryItem) -> Result<()> {
        let mut conn = self.conn().await?;
        let json = serde_json::to_string(item)?;
        let _: () = conn
            .hset(Self::inventory_key(item.user_id), item.id.to_string(), json)
            .await?;
        Ok(())
    }

    /// All items, soonest expiry first.
    pub async fn list_inventory(&self, user_id: Uuid) -> Result<Vec<InventoryItem>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, String> = conn.hgetall(Self::inventory_key(user_id)).await?;
        let mut items: Vec<InventoryItem> = raw
            .values()
            .filter_map(|json| serde_json::from_str(json).ok())
            .collect();
        items.sort_by_key(|item| item.expiry_date);
        Ok(items)
    }

    pub async fn get_inventory_item(&self, user_id: Uuid, item_id: Uuid) -> Result<InventoryItem> {
        let mut conn = self.conn().await?;
        let json: Option<String> = conn
            .hget(Self::inventory_key(user_id), item_id.to_string())
            .await?;
        match json {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Err(StoreError::NotFound(format!(
                "inventory item {} not found",
                item_id
            ))),
        }
    }

    pub async fn update_inventory_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        update: &InventoryItemUpdate,
    ) -> Result<InventoryItem> {
        let mut item = self.get_inventory_item(user_id, item_id).await?;
        if let Some(name) = &update.item_name {
            item.item_name = name.clone();
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = &update.unit {
            item.unit = unit.clone();
        }
        if let Some(expiry) = update.expiry_date {
            item.expiry_date = expiry;
        }
        item.updated_at = Utc::now();
        self.put_inventory_item(&item).await?;
        Ok(item)
    }

    pub async fn delete_inventory_item(&self, user_id: Uuid, item_id: Uuid) -> Result<()> {
        let mut conn = self.conn().await?;
        let removed: i64 = conn
            .hdel(Self::inventory_key(user_id), item_id.to_string())
            .await?;
        if removed == 0 {
            return Err(StoreError::NotFound(format!(
                "inventory item {} not found",
                item_id
            )));
        }
        Ok(())
    }

    // ---- allergies ----

    /// Add an allergy. Allergens are normalized to lowercase and keyed by
    /// name, so re-adding one refreshes its severity instead of duplicating.
    pub async fn add_allergy(
        &self,
        user_id: Uuid,
        allergen: &str,
        severity: Option<String>,
    ) -> Result<Allergy> {
        let normalized = allergen.trim().to_lowercase();
        let existing = self.list_allergies(user_id).await?;
        let allergy = match existing.into_iter().find(|a| a.allergen == normalized) {
            Some(mut found) => {
                found.severity = severity;
                found
            }
            None => Allergy {
                id: Uuid::new_v4(),
                user_id,
                allergen: normalized,
                severity,
                created_at: Utc::now(),
            },
        };

        let mut conn = self.conn().await?;
        let json = serde_json::to_string(&allergy)?;
        let _: () = conn
            .hset(Self::allergies_key(user_id), &allergy.allergen, json)
            .await?;
        Ok(allergy)
    }

    pub async fn list_allergies(&self, user_id: Uuid) -> Result<Vec<Allergy>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, String> = conn.hgetall(Self::allergies_key(user_id)).await?;
        let mut allergies: Vec<Allergy> = raw
            .values()
            .filter_map(|json| serde_json::from_str(json).ok())
            .collect();
        allergies.sort_by(|a, b| a.allergen.cmp(&b.allergen));
        Ok(allergies)
    }

    pub async fn remove_allergy(&self, user_id: Uuid, allergy_id: Uuid) -> Result<()> {
        let allergies = self.list_allergies(user_id).await?;
        let target = allergies
            .into_iter()
            .find(|a| a.id == allergy_id)
            .ok_or_else(|| StoreError::NotFound(format!("allergy {} not found", allergy_id)))?;

        let mut conn = self.conn().await?;
        let _: () = conn
            .hdel(Self::allergies_key(user_id), &target.allergen)
            .await?;
        Ok(())
    }

    // ---- feedback ----

    /// Upsert the latest feedback for a recipe. The first record keeps its
    /// id and created_at; repeat actions only move feedback_type and
    /// updated_at.
    pub async fn record_feedback(
        &self,
        user_id: Uuid,
        recipe_id: &str,
        feedback_type: FeedbackType,
    ) -> Result<FeedbackRecord> {
        let mut conn = self.conn().await?;
        let key = Self::feedback_key(user_id);
        let now = Utc::now();

        let existing: Option<String> = conn.hget(&key, recipe_id).await?;
        let record = match existing.and_then(|json| serde_json::from_str::<FeedbackRecord>(&json).ok())
        {
            Some(mut found) => {
                found.feedback_type = feedback_type;
                found.updated_at = now;
                found
            }
            None => FeedbackRecord {
                id: Uuid::new_v4(),
                user_id,
                recipe_id: recipe_id.to_string(),
                feedback_type,
                created_at: now,
                updated_at: now,
            },
        };

        let json = serde_json::to_string(&record)?;
        let _: () = conn.hset(&key, recipe_id, json).await?;
        Ok(record)
    }

    /// Feedback history, most recently acted on first.
    pub async fn list_feedback(&self, user_id: Uuid) -> Result<Vec<FeedbackRecord>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, String> = conn.hgetall(Self::feedback_key(user_id)).await?;
        let mut records: Vec<FeedbackRecord> = raw
            .values()
            .filter_map(|json| serde_json::from_str(json).ok())
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    /// Fold a delta into the per-recipe score accumulator the scorer reads.
    pub async fn adjust_feedback_score(
        &self,
        user_id: Uuid,
        recipe_id: &str,
        delta: f64,
    ) -> Result<f64> {
        let mut conn = self.conn().await?;
        let score: f64 = conn
            .hincr(Self::feedback_scores_key(user_id), recipe_id, delta)
            .await?;
        Ok(score)
    }

    pub async fn get_feedback_scores(&self, user_id: Uuid) -> Result<HashMap<String, f64>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, String> =
            conn.hgetall(Self::feedback_scores_key(user_id)).await?;
        Ok(raw
            .into_iter()
            .filter_map(|(recipe_id, value)| {
                value.parse::<f64>().ok().map(|score| (recipe_id, score))
            })
            .collect())
    }
}
