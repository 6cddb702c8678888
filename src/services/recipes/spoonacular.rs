//! Spoonacular API client.

use super::{ComplexSearchQuery, ProviderError, RecipeProvider, Result};
use crate::config::RecipeApiConfig;
use crate::models::{ComplexSearchResponse, RecipeDetails, RecipeSummary};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;

pub struct SpoonacularClient {
    client: HttpClient,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(config: &RecipeApiConfig) -> Self {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn require_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            Err(ProviderError::MissingApiKey)
        } else {
            Ok(self.api_key.as_str())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }
        Ok(response)
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>> {
        let api_key = self.require_key()?;
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let ingredients_csv = ingredients.join(",");
        let number_param = number.to_string();

        debug!(count = ingredients.len(), number, "searching recipes by ingredients");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", api_key),
                ("ingredients", ingredients_csv.as_str()),
                ("number", number_param.as_str()),
                // ranking=2 minimizes missing ingredients
                ("ranking", "2"),
                ("ignorePantry", "true"),
            ])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_recipe_information(&self, recipe_id: i64) -> Result<RecipeDetails> {
        let api_key = self.require_key()?;
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key), ("includeNutrition", "false")])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn search_complex(&self, query: &ComplexSearchQuery) -> Result<Vec<RecipeDetails>> {
        let api_key = self.require_key()?;
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let number_param = query.number.to_string();

        let mut params: Vec<(&str, String)> = vec![
            ("apiKey", api_key.to_string()),
            ("number", number_param),
            ("addRecipeInformation", "true".to_string()),
        ];
        if let Some(q) = &query.query {
            params.push(("query", q.clone()));
        }
        if let Some(cuisine) = &query.cuisine {
            params.push(("cuisine", cuisine.clone()));
        }
        if let Some(diet) = &query.diet {
            params.push(("diet", diet.clone()));
        }
        if !query.intolerances.is_empty() {
            params.push(("intolerances", query.intolerances.join(",")));
        }
        if !query.exclude_ingredients.is_empty() {
            params.push(("excludeIngredients", query.exclude_ingredients.join(",")));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        let response = Self::check_status(response).await?;
        let parsed: ComplexSearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}
