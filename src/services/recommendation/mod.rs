//! Recommendation orchestration
//!
//! Ties the pantry context, the per-user bandit, the recipe provider and the
//! scorer together for the recommendation, feedback and cooked flows.

use crate::db::Database;
use crate::error::Result;
use crate::models::{
    Allergy, FeedbackRecord, FeedbackType, InventoryItem, InventoryItemUpdate, RecipeDetails,
    RecipeSummary,
};
use crate::services::bandit::{ArmStatistics, Category, ModelCache, PantryContext};
use crate::services::inventory::{plan_subtraction, IngredientUse, ItemAdjustment};
use crate::services::recipes::{ComplexSearchQuery, RecipeProvider};
use crate::services::scoring::{RecipeScore, RecipeScorer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Categories the bandit steers per recommendation request.
const SELECTED_CATEGORY_COUNT: usize = 3;

/// Items expiring within this window drive the primary ingredient search.
const EXPIRING_SEARCH_WINDOW_DAYS: i64 = 3;

/// Top entries in the preference summary.
const TOP_CATEGORY_COUNT: usize = 5;

const FEEDBACK_DELTA_UPVOTE: f64 = 2.0;
const FEEDBACK_DELTA_DOWNVOTE: f64 = -3.0;
const FEEDBACK_DELTA_SKIP: f64 = -1.0;

/// Per-action delta for the accumulated per-recipe feedback score. Cooking
/// rewards the bandit instead of this accumulator.
fn feedback_score_delta(feedback_type: FeedbackType) -> f64 {
    match feedback_type {
        FeedbackType::Upvote => FEEDBACK_DELTA_UPVOTE,
        FeedbackType::Downvote => FEEDBACK_DELTA_DOWNVOTE,
        FeedbackType::Skip => FEEDBACK_DELTA_SKIP,
        FeedbackType::Cooked => 0.0,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySelection {
    pub category: Category,
    pub score: f64,
}

/// One recommended recipe with its classification and score breakdown.
#[derive(Debug, Serialize)]
pub struct ScoredRecipe {
    pub recipe: RecipeDetails,
    pub categories: Vec<Category>,
    pub scoring: RecipeScore,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: Uuid,
    pub count: usize,
    pub recommendations: Vec<ScoredRecipe>,
    pub selected_categories: Vec<CategorySelection>,
    pub context: PantryContext,
    pub is_cold_start: bool,
}

#[derive(Debug, Serialize)]
pub struct CookedResponse {
    pub recipe_id: i64,
    pub servings_made: u32,
    pub inventory_updates: HashMap<String, String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryPreference {
    pub category: Category,
    pub preference_score: f64,
    pub total_interactions: u64,
}

#[derive(Debug, Serialize)]
pub struct PreferenceSummary {
    pub top_categories: Vec<CategoryPreference>,
    pub total_categories: usize,
    pub explored_categories: usize,
    pub total_interactions: u64,
    pub is_cold_start: bool,
}

#[derive(Debug, Serialize)]
pub struct PreferenceStatistics {
    pub user_id: Uuid,
    pub statistics: BTreeMap<Category, ArmStatistics>,
    pub total_interactions: u64,
    pub is_cold_start: bool,
}

/// Orchestrates recommendations and learning on top of the collaborators.
pub struct Recommender {
    db: Arc<Database>,
    models: Arc<ModelCache>,
    provider: Arc<dyn RecipeProvider>,
    scorer: RecipeScorer,
}

impl Recommender {
    pub fn new(
        db: Arc<Database>,
        models: Arc<ModelCache>,
        provider: Arc<dyn RecipeProvider>,
    ) -> Self {
        Recommender {
            db,
            models,
            provider,
            scorer: RecipeScorer::default(),
        }
    }

    /// Personalized recommendations driven by the pantry and the bandit.
    ///
    /// Expiring items seed the primary search so urgent stock surfaces
    /// first; a broader search over the whole inventory tops the pool up.
    pub async fn recommend(&self, user_id: Uuid, limit: usize) -> Result<RecommendationResponse> {
        self.db.get_user(user_id).await?;
        let inventory = self.db.list_inventory(user_id).await?;
        let allergies = self.db.list_allergies(user_id).await?;
        let now = Utc::now();
        let context = PantryContext::extract(&inventory, now);

        let (selected, is_cold_start) = self.select_for(user_id, &context).await;
        let selected_categories: Vec<Category> = selected.iter().map(|s| s.category).collect();

        if inventory.is_empty() {
            debug!(user_id = %user_id, "empty inventory, nothing to search with");
            return Ok(RecommendationResponse {
                user_id,
                count: 0,
                recommendations: Vec::new(),
                selected_categories: selected,
                context,
                is_cold_start,
            });
        }

        let expiring_names: Vec<String> = inventory
            .iter()
            .filter(|item| (item.expiry_date - now).num_days() <= EXPIRING_SEARCH_WINDOW_DAYS)
            .map(|item| item.item_name.clone())
            .collect();
        let all_names: Vec<String> = inventory
            .iter()
            .map(|item| item.item_name.clone())
            .collect();

        let mut candidates: Vec<RecipeSummary> = Vec::new();
        if !expiring_names.is_empty() {
            candidates.extend(
                self.provider
                    .search_by_ingredients(&expiring_names, limit as u32)
                    .await?,
            );
        }
        if candidates.len() < limit {
            let broader = self
                .provider
                .search_by_ingredients(&all_names, (limit * 2) as u32)
                .await?;
            let seen: HashSet<i64> = candidates.iter().map(|r| r.id).collect();
            candidates.extend(broader.into_iter().filter(|r| !seen.contains(&r.id)));
        }

        // Over-fetch details so filtering unsafe recipes still fills the page.
        let detailed = self.fetch_details(&candidates, limit * 2).await;
        let feedback_scores = self.db.get_feedback_scores(user_id).await?;

        let mut scored = self.score_candidates(
            detailed,
            &inventory,
            &allergies,
            &feedback_scores,
            &selected_categories,
            now,
        );
        scored.retain(|entry| entry.scoring.is_allergen_safe);
        scored.truncate(limit);

        info!(
            user_id = %user_id,
            count = scored.len(),
            cold_start = is_cold_start,
            "recommendations ready"
        );

        Ok(RecommendationResponse {
            user_id,
            count: scored.len(),
            recommendations: scored,
            selected_categories: selected,
            context,
            is_cold_start,
        })
    }

    /// Filtered recommendations via the provider's complex search. Allergens
    /// are excluded at the search level and the usual scoring still runs.
    pub async fn recommend_filtered(
        &self,
        user_id: Uuid,
        cuisine: Option<String>,
        diet: Option<String>,
        limit: usize,
    ) -> Result<RecommendationResponse> {
        self.db.get_user(user_id).await?;
        let inventory = self.db.list_inventory(user_id).await?;
        let allergies = self.db.list_allergies(user_id).await?;
        let now = Utc::now();
        let context = PantryContext::extract(&inventory, now);

        let (selected, is_cold_start) = self.select_for(user_id, &context).await;
        let selected_categories: Vec<Category> = selected.iter().map(|s| s.category).collect();

        if inventory.is_empty() {
            return Ok(RecommendationResponse {
                user_id,
                count: 0,
                recommendations: Vec::new(),
                selected_categories: selected,
                context,
                is_cold_start,
            });
        }

        let allergen_names: Vec<String> =
            allergies.iter().map(|a| a.allergen.clone()).collect();
        let query = ComplexSearchQuery {
            query: None,
            cuisine,
            diet,
            intolerances: allergen_names.clone(),
            exclude_ingredients: allergen_names,
            number: (limit * 2) as u32,
        };

        let detailed = self.provider.search_complex(&query).await?;
        let feedback_scores = self.db.get_feedback_scores(user_id).await?;

        let mut scored = self.score_candidates(
            detailed,
            &inventory,
            &allergies,
            &feedback_scores,
            &selected_categories,
            now,
        );
        scored.truncate(limit);

        Ok(RecommendationResponse {
            user_id,
            count: scored.len(),
            recommendations: scored,
            selected_categories: selected,
            context,
            is_cold_start,
        })
    }

    /// Persist one feedback record per user and recipe, then teach the
    /// bandit every category the recipe classifies into.
    pub async fn record_feedback(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        feedback_type: FeedbackType,
    ) -> Result<FeedbackRecord> {
        self.db.get_user(user_id).await?;
        let recipe_key = recipe_id.to_string();
        let record = self
            .db
            .record_feedback(user_id, &recipe_key, feedback_type)
            .await?;

        let delta = feedback_score_delta(feedback_type);
        if delta != 0.0 {
            self.db
                .adjust_feedback_score(user_id, &recipe_key, delta)
                .await?;
        }

        let inventory = self.db.list_inventory(user_id).await?;
        let context = PantryContext::extract(&inventory, Utc::now());
        let categories = self.classify_recipe(recipe_id).await;
        self.apply_reward(user_id, &categories, feedback_type, false, &context)
            .await;

        info!(
            user_id = %user_id,
            recipe_id,
            feedback = feedback_type.as_str(),
            "feedback recorded"
        );
        Ok(record)
    }

    /// Cooked confirmation: the strongest reward plus pantry subtraction.
    pub async fn record_cooked(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        servings_made: u32,
    ) -> Result<CookedResponse> {
        self.db.get_user(user_id).await?;
        let details = self.provider.get_recipe_information(recipe_id).await?;

        let recipe_key = recipe_id.to_string();
        self.db
            .record_feedback(user_id, &recipe_key, FeedbackType::Cooked)
            .await?;

        let inventory = self.db.list_inventory(user_id).await?;
        let context = PantryContext::extract(&inventory, Utc::now());
        let categories = Category::classify(&details.title, &details.classification_tags());
        self.apply_reward(user_id, &categories, FeedbackType::Cooked, true, &context)
            .await;

        let uses: Vec<IngredientUse> = details
            .extended_ingredients
            .iter()
            .filter(|ing| !ing.name.trim().is_empty() && ing.amount > 0.0)
            .map(|ing| IngredientUse {
                name: ing.name.clone(),
                quantity: ing.amount * servings_made as f64,
                unit: ing.unit.clone(),
            })
            .collect();

        let plan = plan_subtraction(&inventory, &uses);
        for adjustment in &plan.adjustments {
            match adjustment {
                ItemAdjustment::Update {
                    item_id,
                    new_quantity,
                } => {
                    let update = InventoryItemUpdate {
                        quantity: Some(*new_quantity),
                        ..Default::default()
                    };
                    self.db
                        .update_inventory_item(user_id, *item_id, &update)
                        .await?;
                }
                ItemAdjustment::Delete { item_id } => {
                    self.db.delete_inventory_item(user_id, *item_id).await?;
                }
            }
        }

        info!(
            user_id = %user_id,
            recipe_id,
            servings_made,
            adjustments = plan.adjustments.len(),
            "cooked recipe applied to inventory"
        );

        Ok(CookedResponse {
            recipe_id,
            servings_made,
            inventory_updates: plan.statuses,
            message: "Inventory updated successfully".to_string(),
        })
    }

    /// Top-category digest for the preferences screen.
    pub async fn preference_summary(&self, user_id: Uuid) -> Result<PreferenceSummary> {
        self.db.get_user(user_id).await?;
        let model = self.models.get_or_load(user_id).await;
        let guard = model.lock().await;

        let statistics = guard.get_statistics();
        let explored = statistics.values().filter(|s| s.pulls > 0).count();
        let top_categories = guard
            .get_rankings()
            .into_iter()
            .take(TOP_CATEGORY_COUNT)
            .map(|(category, mean, pulls)| CategoryPreference {
                category,
                preference_score: (mean * 1000.0).round() / 1000.0,
                total_interactions: pulls,
            })
            .collect();

        Ok(PreferenceSummary {
            top_categories,
            total_categories: Category::ALL.len(),
            explored_categories: explored,
            total_interactions: guard.total_user_pulls(),
            is_cold_start: guard.is_cold_start(),
        })
    }

    /// Full per-arm statistics map.
    pub async fn preference_statistics(&self, user_id: Uuid) -> Result<PreferenceStatistics> {
        self.db.get_user(user_id).await?;
        let model = self.models.get_or_load(user_id).await;
        let guard = model.lock().await;

        Ok(PreferenceStatistics {
            user_id,
            statistics: guard.get_statistics(),
            total_interactions: guard.total_user_pulls(),
            is_cold_start: guard.is_cold_start(),
        })
    }

    /// Forget everything learned for a user.
    pub async fn reset_preferences(&self, user_id: Uuid) -> Result<()> {
        self.db.get_user(user_id).await?;
        self.models.remove(user_id).await?;
        info!(user_id = %user_id, "preference model reset");
        Ok(())
    }

    /// One bandit selection under the current context.
    async fn select_for(
        &self,
        user_id: Uuid,
        context: &PantryContext,
    ) -> (Vec<CategorySelection>, bool) {
        let model = self.models.get_or_load(user_id).await;
        let guard = model.lock().await;
        let mut rng = rand::thread_rng();
        let picks = guard.select_categories(
            context,
            SELECTED_CATEGORY_COUNT,
            &Category::ALL,
            &mut rng,
        );
        let selected = picks
            .into_iter()
            .map(|(category, score)| CategorySelection { category, score })
            .collect();
        (selected, guard.is_cold_start())
    }

    /// Detail lookups for the first `cap` candidates, skipping individual
    /// failures.
    async fn fetch_details(
        &self,
        candidates: &[RecipeSummary],
        cap: usize,
    ) -> Vec<RecipeDetails> {
        let mut detailed = Vec::new();
        for summary in candidates.iter().take(cap) {
            match self.provider.get_recipe_information(summary.id).await {
                Ok(details) => detailed.push(details),
                Err(e) => {
                    warn!(recipe_id = summary.id, error = %e, "skipping recipe detail");
                }
            }
        }
        detailed
    }

    /// Classify, score and sort candidates best-first.
    fn score_candidates(
        &self,
        detailed: Vec<RecipeDetails>,
        inventory: &[InventoryItem],
        allergies: &[Allergy],
        feedback_scores: &HashMap<String, f64>,
        selected: &[Category],
        now: DateTime<Utc>,
    ) -> Vec<ScoredRecipe> {
        let mut scored: Vec<ScoredRecipe> = detailed
            .into_iter()
            .map(|details| {
                let categories =
                    Category::classify(&details.title, &details.classification_tags());
                let feedback_score = feedback_scores
                    .get(&details.id.to_string())
                    .copied()
                    .unwrap_or(0.0);
                let scoring = self.scorer.score_recipe(
                    &details,
                    inventory,
                    allergies,
                    feedback_score,
                    &categories,
                    selected,
                    now,
                );
                ScoredRecipe {
                    recipe: details,
                    categories,
                    scoring,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.scoring
                .final_score
                .partial_cmp(&a.scoring.final_score)
                .unwrap_or(Ordering::Equal)
        });
        scored
    }

    /// Run one bandit update per category, then persist a copy outside the
    /// model lock.
    async fn apply_reward(
        &self,
        user_id: Uuid,
        categories: &[Category],
        feedback_type: FeedbackType,
        is_cooked: bool,
        context: &PantryContext,
    ) {
        let model = self.models.get_or_load(user_id).await;
        let updated = {
            let mut guard = model.lock().await;
            for category in categories {
                guard.update_from_feedback(*category, feedback_type, is_cooked, context);
            }
            guard.clone()
        };
        self.models.persist(user_id, &updated).await;
    }

    /// Categories for a recipe via the provider detail. Provider trouble
    /// downgrades to the general arm so the feedback signal is not lost.
    async fn classify_recipe(&self, recipe_id: i64) -> Vec<Category> {
        match self.provider.get_recipe_information(recipe_id).await {
            Ok(details) => Category::classify(&details.title, &details.classification_tags()),
            Err(e) => {
                warn!(recipe_id, error = %e, "classification fell back to general");
                vec![Category::General]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::RecipeIngredient;
    use crate::services::bandit::ModelStore;
    use crate::services::recipes::{MockRecipeProvider, ProviderError};
    use chrono::Duration;

    fn recommender_with(provider: MockRecipeProvider) -> Recommender {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let db = Arc::new(Database::new(client.clone()));
        let models = Arc::new(ModelCache::new(ModelStore::new(client)));
        Recommender::new(db, models, Arc::new(provider))
    }

    fn details(id: i64, title: &str, ingredients: &[(&str, f64, &str)]) -> RecipeDetails {
        RecipeDetails {
            id,
            title: title.to_string(),
            image: None,
            ready_in_minutes: Some(30),
            servings: Some(2),
            cuisines: Vec::new(),
            dish_types: Vec::new(),
            diets: Vec::new(),
            vegetarian: false,
            source_url: None,
            extended_ingredients: ingredients
                .iter()
                .map(|(name, amount, unit)| RecipeIngredient {
                    name: name.to_string(),
                    amount: *amount,
                    unit: unit.to_string(),
                })
                .collect(),
        }
    }

    fn item(name: &str, quantity: f64, days_to_expiry: i64) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            item_name: name.to_string(),
            quantity,
            unit: "g".to_string(),
            expiry_date: now + Duration::days(days_to_expiry),
            added_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_feedback_score_delta_mapping() {
        assert_eq!(feedback_score_delta(FeedbackType::Upvote), 2.0);
        assert_eq!(feedback_score_delta(FeedbackType::Downvote), -3.0);
        assert_eq!(feedback_score_delta(FeedbackType::Skip), -1.0);
        assert_eq!(feedback_score_delta(FeedbackType::Cooked), 0.0);
    }

    #[test]
    fn test_revote_deltas_accumulate() {
        // A reversed vote keeps both deltas; the score is never re-derived
        // from the latest record alone.
        let reversed = feedback_score_delta(FeedbackType::Upvote)
            + feedback_score_delta(FeedbackType::Downvote);
        assert_eq!(reversed, -1.0);

        let repeated = 2.0 * feedback_score_delta(FeedbackType::Upvote);
        assert_eq!(repeated, 4.0);
    }

    #[test]
    fn test_score_candidates_ranks_matching_recipes_first() {
        let recommender = recommender_with(MockRecipeProvider::new());
        let inventory = vec![item("pasta", 500.0, 30), item("tomato", 3.0, 5)];
        let candidates = vec![
            details(1, "Mystery Stew", &[("saffron", 1.0, "g")]),
            details(2, "Tomato Pasta", &[("pasta", 200.0, "g"), ("tomato", 2.0, "")]),
        ];

        let scored = recommender.score_candidates(
            candidates,
            &inventory,
            &[],
            &HashMap::new(),
            &[Category::Italian],
            Utc::now(),
        );

        assert_eq!(scored[0].recipe.id, 2);
        assert!(scored[0].categories.contains(&Category::Italian));
        assert!(scored[0].scoring.final_score > scored[1].scoring.final_score);
    }

    #[test]
    fn test_score_candidates_flags_allergen_hits() {
        let recommender = recommender_with(MockRecipeProvider::new());
        let inventory = vec![item("flour", 1000.0, 100)];
        let allergies = vec![Allergy {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            allergen: "peanut".to_string(),
            severity: Some("severe".to_string()),
            created_at: Utc::now(),
        }];
        let candidates = vec![details(
            7,
            "Peanut Cookies",
            &[("peanut butter", 100.0, "g"), ("flour", 200.0, "g")],
        )];

        let scored = recommender.score_candidates(
            candidates,
            &inventory,
            &allergies,
            &HashMap::new(),
            &[],
            Utc::now(),
        );

        assert!(!scored[0].scoring.is_allergen_safe);
        assert_eq!(scored[0].scoring.allergens_found, vec!["peanut"]);
    }

    #[test]
    fn test_score_candidates_applies_feedback_history() {
        let recommender = recommender_with(MockRecipeProvider::new());
        let inventory = vec![item("rice", 1000.0, 100)];
        let mut feedback_scores = HashMap::new();
        feedback_scores.insert("1".to_string(), 4.0);

        let candidates = vec![
            details(1, "Fried Rice", &[("rice", 200.0, "g")]),
            details(2, "Rice Bowl", &[("rice", 200.0, "g")]),
        ];

        let scored = recommender.score_candidates(
            candidates,
            &inventory,
            &[],
            &HashMap::new(),
            &[],
            Utc::now(),
        );
        let boosted = recommender.score_candidates(
            vec![
                details(1, "Fried Rice", &[("rice", 200.0, "g")]),
                details(2, "Rice Bowl", &[("rice", 200.0, "g")]),
            ],
            &inventory,
            &[],
            &feedback_scores,
            &[],
            Utc::now(),
        );

        let plain_1 = scored.iter().find(|s| s.recipe.id == 1).map(|s| s.scoring.overall_score);
        let boosted_1 = boosted.iter().find(|s| s.recipe.id == 1).map(|s| s.scoring.overall_score);
        assert!(boosted_1 > plain_1);
        assert_eq!(boosted[0].recipe.id, 1);
    }

    #[tokio::test]
    async fn test_classify_recipe_uses_provider_detail() {
        let mut provider = MockRecipeProvider::new();
        provider
            .expect_get_recipe_information()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| {
                let mut d = RecipeDetails {
                    id: 42,
                    title: "Spaghetti Carbonara".to_string(),
                    image: None,
                    ready_in_minutes: None,
                    servings: None,
                    cuisines: vec!["Italian".to_string()],
                    dish_types: Vec::new(),
                    diets: Vec::new(),
                    vegetarian: false,
                    source_url: None,
                    extended_ingredients: Vec::new(),
                };
                d.dish_types.push("main course".to_string());
                Ok(d)
            });

        let recommender = recommender_with(provider);
        let categories = recommender.classify_recipe(42).await;
        assert!(categories.contains(&Category::Italian));
    }

    #[tokio::test]
    async fn test_classify_recipe_falls_back_to_general_on_provider_error() {
        let mut provider = MockRecipeProvider::new();
        provider
            .expect_get_recipe_information()
            .times(1)
            .returning(|_| {
                Err(ProviderError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
            });

        let recommender = recommender_with(provider);
        let categories = recommender.classify_recipe(9).await;
        assert_eq!(categories, vec![Category::General]);
    }

    #[tokio::test]
    async fn test_fetch_details_skips_failed_lookups() {
        let mut provider = MockRecipeProvider::new();
        provider
            .expect_get_recipe_information()
            .withf(|id| *id == 1)
            .returning(|_| Ok(details_for_mock(1)));
        provider
            .expect_get_recipe_information()
            .withf(|id| *id == 2)
            .returning(|_| Err(ProviderError::Http("timeout".to_string())));

        let recommender = recommender_with(provider);
        let candidates = vec![summary(1), summary(2)];

        let detailed = recommender.fetch_details(&candidates, 10).await;
        assert_eq!(detailed.len(), 1);
        assert_eq!(detailed[0].id, 1);
    }

    #[tokio::test]
    async fn test_fetch_details_honors_cap() {
        let mut provider = MockRecipeProvider::new();
        provider
            .expect_get_recipe_information()
            .times(2)
            .returning(|id| Ok(details_for_mock(id)));

        let recommender = recommender_with(provider);
        let candidates = vec![summary(1), summary(2), summary(3), summary(4)];

        let detailed = recommender.fetch_details(&candidates, 2).await;
        assert_eq!(detailed.len(), 2);
    }

    fn details_for_mock(id: i64) -> RecipeDetails {
        RecipeDetails {
            id,
            title: format!("Recipe {}", id),
            image: None,
            ready_in_minutes: None,
            servings: None,
            cuisines: Vec::new(),
            dish_types: Vec::new(),
            diets: Vec::new(),
            vegetarian: false,
            source_url: None,
            extended_ingredients: Vec::new(),
        }
    }

    fn summary(id: i64) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Recipe {}", id),
            image: None,
            used_ingredient_count: Some(1),
            missed_ingredient_count: Some(0),
        }
    }
}
