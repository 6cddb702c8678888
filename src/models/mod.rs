use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: DateTime<Utc>,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryItemUpdate {
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allergy {
    pub id: Uuid,
    pub user_id: Uuid,
    pub allergen: String,
    pub severity: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Upvote,
    Downvote,
    Skip,
    Cooked,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Upvote => "upvote",
            FeedbackType::Downvote => "downvote",
            FeedbackType::Skip => "skip",
            FeedbackType::Cooked => "cooked",
        }
    }
}

/// One feedback record per (user, recipe); upserts keep the latest action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recipe_id: String,
    pub feedback_type: FeedbackType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact search hit from the recipe provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "usedIngredientCount", default)]
    pub used_ingredient_count: Option<u32>,
    #[serde(rename = "missedIngredientCount", default)]
    pub missed_ingredient_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

/// Full recipe detail from the provider, camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "readyInMinutes", default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(rename = "dishTypes", default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(rename = "sourceUrl", default)]
    pub source_url: Option<String>,
    #[serde(rename = "extendedIngredients", default)]
    pub extended_ingredients: Vec<RecipeIngredient>,
}

impl RecipeDetails {
    /// Ingredient names, lowercased, for matching against inventory.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.extended_ingredients
            .iter()
            .filter(|ing| !ing.name.is_empty())
            .map(|ing| ing.name.to_lowercase())
            .collect()
    }

    /// Tags the classifier sees: cuisines, dish types and diets.
    pub fn classification_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        tags.extend(self.cuisines.iter().cloned());
        tags.extend(self.dish_types.iter().cloned());
        tags.extend(self.diets.iter().cloned());
        if self.vegetarian {
            tags.push("vegetarian".to_string());
        }
        if let Some(minutes) = self.ready_in_minutes {
            if minutes <= 30 {
                tags.push("quick".to_string());
            }
        }
        tags
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<RecipeDetails>,
}
