//! External recipe provider behind a trait, with a Redis read-through cache.

pub mod cache;
pub mod spoonacular;

pub use cache::{CachedRecipeProvider, RecipeCache};
pub use spoonacular::SpoonacularClient;

use crate::models::{RecipeDetails, RecipeSummary};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("recipe API key is not configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Http(e.to_string())
        }
    }
}

/// Filters for a complex provider search. Empty fields are omitted from the
/// outgoing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexSearchQuery {
    pub query: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub intolerances: Vec<String>,
    pub exclude_ingredients: Vec<String>,
    pub number: u32,
}

impl ComplexSearchQuery {
    /// Deterministic cache signature: lowercased, with list filters sorted
    /// so equivalent queries share an entry.
    pub fn signature(&self) -> String {
        let mut intolerances: Vec<String> =
            self.intolerances.iter().map(|s| s.to_lowercase()).collect();
        intolerances.sort();
        let mut excluded: Vec<String> = self
            .exclude_ingredients
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        excluded.sort();

        format!(
            "complex:q={}:cuisine={}:diet={}:intolerances={}:exclude={}:n={}",
            self.query.as_deref().unwrap_or("").to_lowercase(),
            self.cuisine.as_deref().unwrap_or("").to_lowercase(),
            self.diet.as_deref().unwrap_or("").to_lowercase(),
            intolerances.join(","),
            excluded.join(","),
            self.number
        )
    }
}

/// The three provider operations the service depends on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Recipes using the given ingredients, minimizing missing ones.
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>>;

    /// Full detail for one recipe.
    async fn get_recipe_information(&self, recipe_id: i64) -> Result<RecipeDetails>;

    /// Filtered search returning detail-shaped results.
    async fn search_complex(&self, query: &ComplexSearchQuery) -> Result<Vec<RecipeDetails>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_signature_normalizes_filters() {
        let a = ComplexSearchQuery {
            query: Some("Pasta".to_string()),
            cuisine: Some("Italian".to_string()),
            diet: None,
            intolerances: vec!["Dairy".to_string(), "gluten".to_string()],
            exclude_ingredients: vec!["Peanut".to_string(), "shrimp".to_string()],
            number: 10,
        };
        let b = ComplexSearchQuery {
            query: Some("pasta".to_string()),
            cuisine: Some("italian".to_string()),
            diet: None,
            intolerances: vec!["gluten".to_string(), "dairy".to_string()],
            exclude_ingredients: vec!["shrimp".to_string(), "peanut".to_string()],
            number: 10,
        };
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_complex_signature_separates_distinct_queries() {
        let base = ComplexSearchQuery {
            number: 10,
            ..Default::default()
        };
        let with_diet = ComplexSearchQuery {
            diet: Some("vegetarian".to_string()),
            number: 10,
            ..Default::default()
        };
        assert_ne!(base.signature(), with_diet.signature());
    }
}
