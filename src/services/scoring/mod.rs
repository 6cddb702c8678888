//! Recipe scoring against pantry state, allergies and feedback history.
//!
//! Each recipe gets an overall score in [0, 100] built from inventory match
//! percentage, expiry urgency, partial-quantity usage and accumulated
//! feedback, with a heavy penalty for allergen hits. Bandit-selected
//! categories add a ranking boost on top.

use crate::models::{Allergy, InventoryItem, RecipeDetails, RecipeIngredient};
use crate::services::bandit::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Ingredients matched against inventory in both directions: "chicken"
/// matches "chicken breast" and vice versa.
fn names_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub match_weight: f64,
    pub urgency_multiplier: f64,
    pub urgency_cap: f64,
    pub partial_multiplier: f64,
    pub feedback_multiplier: f64,
    /// Multiplier applied to the whole score when allergens are present.
    pub unsafe_factor: f64,
    pub category_hit_boost: f64,
    pub category_boost_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            match_weight: 0.4,
            urgency_multiplier: 1.5,
            urgency_cap: 30.0,
            partial_multiplier: 1.5,
            feedback_multiplier: 1.5,
            unsafe_factor: 0.1,
            category_hit_boost: 10.0,
            category_boost_cap: 20.0,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let multipliers = [
            self.match_weight,
            self.urgency_multiplier,
            self.urgency_cap,
            self.partial_multiplier,
            self.feedback_multiplier,
            self.category_hit_boost,
            self.category_boost_cap,
        ];
        if multipliers.iter().any(|w| *w < 0.0) {
            return Err(ScoringError::InvalidWeights(
                "weights must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.unsafe_factor) {
            return Err(ScoringError::InvalidWeights(
                "unsafe_factor must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-recipe scoring breakdown attached to recommendation responses.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeScore {
    pub overall_score: f64,
    /// Overall plus the category boost; what ranking sorts on.
    pub final_score: f64,
    pub match_percentage: f64,
    pub matched_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
    pub urgency_score: f64,
    pub expiring_ingredients: Vec<String>,
    pub is_allergen_safe: bool,
    pub allergens_found: Vec<String>,
    pub partial_usage_score: f64,
    pub feedback_score: f64,
    pub category_boost: f64,
}

pub struct RecipeScorer {
    weights: ScoringWeights,
}

impl Default for RecipeScorer {
    fn default() -> Self {
        RecipeScorer::new(ScoringWeights::default())
    }
}

impl RecipeScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Percentage of recipe ingredients present in inventory, with the
    /// matched and missing ingredient lists.
    pub fn match_percentage(
        &self,
        ingredients: &[String],
        inventory: &[InventoryItem],
    ) -> (f64, Vec<String>, Vec<String>) {
        if ingredients.is_empty() {
            return (0.0, Vec::new(), Vec::new());
        }

        let inventory_names: Vec<String> = inventory
            .iter()
            .map(|item| item.item_name.to_lowercase())
            .collect();
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for ingredient in ingredients {
            let ingredient_lower = ingredient.to_lowercase();
            if inventory_names
                .iter()
                .any(|name| names_match(&ingredient_lower, name))
            {
                matched.push(ingredient.clone());
            } else {
                missing.push(ingredient.clone());
            }
        }

        let percentage = matched.len() as f64 / ingredients.len() as f64 * 100.0;
        (percentage, matched, missing)
    }

    /// Urgency from matched ingredients close to expiry: expired 10, one day
    /// 8, two days 5, three days 3. Later expiry contributes nothing.
    pub fn urgency_score(
        &self,
        ingredients: &[String],
        inventory: &[InventoryItem],
        now: DateTime<Utc>,
    ) -> (f64, Vec<String>) {
        let today = now.date_naive();
        let mut score = 0.0;
        let mut expiring = Vec::new();

        for ingredient in ingredients {
            let ingredient_lower = ingredient.to_lowercase();
            let matched = inventory
                .iter()
                .find(|item| names_match(&ingredient_lower, &item.item_name.to_lowercase()));

            if let Some(item) = matched {
                let days_until_expiry = (item.expiry_date.date_naive() - today).num_days();
                if days_until_expiry <= 3 {
                    expiring.push(item.item_name.clone());
                    score += match days_until_expiry {
                        d if d <= 0 => 10.0,
                        1 => 8.0,
                        2 => 5.0,
                        _ => 3.0,
                    };
                }
            }
        }

        (score, expiring)
    }

    /// A recipe is unsafe when any allergen appears inside an ingredient
    /// name. Returns every hit.
    pub fn allergen_check(
        &self,
        ingredients: &[String],
        allergies: &[Allergy],
    ) -> (bool, Vec<String>) {
        let allergens: Vec<String> = allergies
            .iter()
            .map(|allergy| allergy.allergen.to_lowercase())
            .collect();
        let mut found = Vec::new();

        for ingredient in ingredients {
            let ingredient_lower = ingredient.to_lowercase();
            for allergen in &allergens {
                if ingredient_lower.contains(allergen.as_str()) {
                    found.push(allergen.clone());
                }
            }
        }

        (found.is_empty(), found)
    }

    /// Reward recipes that consume a good share of what is on hand. Falls
    /// back to the mid-range 5.0 when the provider gives no quantities.
    pub fn partial_usage_score(
        &self,
        ingredients: &[RecipeIngredient],
        inventory: &[InventoryItem],
    ) -> f64 {
        let with_amounts: Vec<&RecipeIngredient> = ingredients
            .iter()
            .filter(|ing| !ing.name.is_empty() && ing.amount > 0.0)
            .collect();
        if with_amounts.is_empty() {
            return 5.0;
        }

        let mut score = 0.0;
        let mut matches = 0u32;

        for ingredient in with_amounts {
            let name_lower = ingredient.name.to_lowercase();
            let matched = inventory
                .iter()
                .find(|item| names_match(&name_lower, &item.item_name.to_lowercase()));

            if let Some(item) = matched {
                matches += 1;
                let usage_ratio = if item.quantity > 0.0 {
                    ingredient.amount / item.quantity
                } else {
                    0.0
                };

                if (0.5..=1.0).contains(&usage_ratio) {
                    score += 3.0;
                } else if (0.3..0.5).contains(&usage_ratio) {
                    score += 2.0;
                } else if usage_ratio < 0.3 {
                    score += 1.0;
                }
            }
        }

        if matches > 0 {
            (score / matches as f64 * 3.0).min(10.0)
        } else {
            5.0
        }
    }

    /// Ranking boost for recipes landing in bandit-selected categories.
    pub fn category_boost(&self, recipe_categories: &[Category], selected: &[Category]) -> f64 {
        let hits = recipe_categories
            .iter()
            .filter(|category| selected.contains(category))
            .count() as f64;
        (hits * self.weights.category_hit_boost).min(self.weights.category_boost_cap)
    }

    /// Combine the components into the overall [0, 100] score.
    pub fn overall_score(
        &self,
        match_percentage: f64,
        urgency_score: f64,
        is_safe: bool,
        partial_usage_score: f64,
        feedback_score: f64,
    ) -> f64 {
        let mut score = match_percentage * self.weights.match_weight;
        score += (urgency_score * self.weights.urgency_multiplier).min(self.weights.urgency_cap);
        score += partial_usage_score * self.weights.partial_multiplier;
        score += feedback_score * self.weights.feedback_multiplier;

        if !is_safe {
            score *= self.weights.unsafe_factor;
        }

        score.clamp(0.0, 100.0)
    }

    /// Full breakdown for one recipe.
    pub fn score_recipe(
        &self,
        details: &RecipeDetails,
        inventory: &[InventoryItem],
        allergies: &[Allergy],
        feedback_score: f64,
        recipe_categories: &[Category],
        selected: &[Category],
        now: DateTime<Utc>,
    ) -> RecipeScore {
        let ingredient_names = details.ingredient_names();

        let (match_percentage, matched, missing) =
            self.match_percentage(&ingredient_names, inventory);
        let (urgency_score, expiring) = self.urgency_score(&ingredient_names, inventory, now);
        let (is_safe, allergens_found) = self.allergen_check(&ingredient_names, allergies);
        let partial_usage_score =
            self.partial_usage_score(&details.extended_ingredients, inventory);

        let overall = self.overall_score(
            match_percentage,
            urgency_score,
            is_safe,
            partial_usage_score,
            feedback_score,
        );
        let category_boost = self.category_boost(recipe_categories, selected);

        RecipeScore {
            overall_score: overall,
            final_score: (overall + category_boost).min(100.0),
            match_percentage,
            matched_ingredients: matched,
            missing_ingredients: missing,
            urgency_score,
            expiring_ingredients: expiring,
            is_allergen_safe: is_safe,
            allergens_found,
            partial_usage_score,
            feedback_score,
            category_boost,
        }
    }
}
