//! Read-through cache for provider responses.
//!
//! Every successful response is written twice: a fresh copy under the
//! configured TTL and a long-lived stale copy. Reads prefer fresh; when the
//! live call fails the stale copy is served instead of the error. Cache
//! trouble never fails a request, it only loses the shortcut.

use super::{ComplexSearchQuery, ProviderError, RecipeProvider, Result};
use crate::models::{RecipeDetails, RecipeSummary};
use async_trait::async_trait;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct RecipeCache {
    redis: redis::Client,
    fresh_ttl: Duration,
    stale_ttl: Duration,
}

impl RecipeCache {
    pub fn new(redis: redis::Client, fresh_ttl: Duration, stale_ttl: Duration) -> Self {
        Self {
            redis,
            fresh_ttl,
            stale_ttl,
        }
    }

    fn fresh_key(signature: &str) -> String {
        format!("pantry:recipes:cache:{}", signature)
    }

    fn stale_key(signature: &str) -> String {
        format!("pantry:recipes:cache:stale:{}", signature)
    }

    pub async fn get_fresh<T: DeserializeOwned>(&self, signature: &str) -> Option<T> {
        self.read(&Self::fresh_key(signature)).await
    }

    pub async fn get_stale<T: DeserializeOwned>(&self, signature: &str) -> Option<T> {
        self.read(&Self::stale_key(signature)).await
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = match self.redis.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(error = %e, "recipe cache unavailable on read");
                return None;
            }
        };
        let raw: Option<String> = match conn.get(key).await {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "recipe cache read failed");
                return None;
            }
        };
        raw.and_then(|json| serde_json::from_str(&json).ok())
    }

    pub async fn put<T: Serialize>(&self, signature: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize cache entry");
                return;
            }
        };
        let mut conn = match self.redis.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(error = %e, "recipe cache unavailable on write");
                return;
            }
        };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::fresh_key(signature), &json, self.fresh_ttl.as_secs())
            .await
        {
            warn!(error = %e, "failed to write fresh cache entry");
        }
        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::stale_key(signature), json, self.stale_ttl.as_secs())
            .await
        {
            warn!(error = %e, "failed to write stale cache entry");
        }
    }
}

fn ingredients_signature(ingredients: &[String], number: u32) -> String {
    let mut names: Vec<String> = ingredients
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();
    names.sort();
    format!("ingredients:n={}:{}", number, names.join(","))
}

/// Provider wrapper adding the fresh/stale cache around every operation.
pub struct CachedRecipeProvider<P> {
    inner: P,
    cache: RecipeCache,
}

impl<P> CachedRecipeProvider<P> {
    pub fn new(inner: P, cache: RecipeCache) -> Self {
        Self { inner, cache }
    }

    async fn serve_stale<T: DeserializeOwned>(
        &self,
        signature: &str,
        err: ProviderError,
    ) -> Result<T> {
        match self.cache.get_stale(signature).await {
            Some(stale) => {
                warn!(signature = %signature, error = %err, "provider failed, serving stale cache");
                Ok(stale)
            }
            None => Err(err),
        }
    }
}

#[async_trait]
impl<P: RecipeProvider> RecipeProvider for CachedRecipeProvider<P> {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>> {
        let signature = ingredients_signature(ingredients, number);
        if let Some(cached) = self.cache.get_fresh(&signature).await {
            debug!(signature = %signature, "recipe cache hit");
            return Ok(cached);
        }

        match self.inner.search_by_ingredients(ingredients, number).await {
            Ok(results) => {
                self.cache.put(&signature, &results).await;
                Ok(results)
            }
            Err(e) => self.serve_stale(&signature, e).await,
        }
    }

    async fn get_recipe_information(&self, recipe_id: i64) -> Result<RecipeDetails> {
        let signature = format!("information:{}", recipe_id);
        if let Some(cached) = self.cache.get_fresh(&signature).await {
            return Ok(cached);
        }

        match self.inner.get_recipe_information(recipe_id).await {
            Ok(details) => {
                self.cache.put(&signature, &details).await;
                Ok(details)
            }
            Err(e) => self.serve_stale(&signature, e).await,
        }
    }

    async fn search_complex(&self, query: &ComplexSearchQuery) -> Result<Vec<RecipeDetails>> {
        let signature = query.signature();
        if let Some(cached) = self.cache.get_fresh(&signature).await {
            return Ok(cached);
        }

        match self.inner.search_complex(query).await {
            Ok(results) => {
                self.cache.put(&signature, &results).await;
                Ok(results)
            }
            Err(e) => self.serve_stale(&signature, e).await,
        }
    }
}
