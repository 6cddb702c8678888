//! End-to-end learning flow over the library: context extraction, category
//! selection, feedback updates and snapshot persistence round trips.

use chrono::{Duration, Utc};
use pantry_service::models::{Allergy, FeedbackType, InventoryItem, RecipeDetails, RecipeIngredient};
use pantry_service::services::bandit::{BanditModel, Category, ModelSnapshot, PantryContext};
use pantry_service::services::scoring::RecipeScorer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

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

fn recipe(id: i64, title: &str, cuisines: &[&str], ingredients: &[&str]) -> RecipeDetails {
    RecipeDetails {
        id,
        title: title.to_string(),
        image: None,
        ready_in_minutes: Some(25),
        servings: Some(2),
        cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        dish_types: Vec::new(),
        diets: Vec::new(),
        vegetarian: false,
        source_url: None,
        extended_ingredients: ingredients
            .iter()
            .map(|name| RecipeIngredient {
                name: name.to_string(),
                amount: 100.0,
                unit: "g".to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_feedback_teaches_the_model_a_cuisine() {
    let inventory = vec![
        item("pasta", 500.0, 60),
        item("tomato", 4.0, 2),
        item("chicken breast", 300.0, 1),
    ];
    let context = PantryContext::extract(&inventory, Utc::now());
    let mut model = BanditModel::new();

    // A user who cooks italian, likes asian and rejects desserts.
    for _ in 0..8 {
        model.update_from_feedback(Category::Italian, FeedbackType::Cooked, true, &context);
    }
    for _ in 0..4 {
        model.update_from_feedback(Category::Asian, FeedbackType::Upvote, false, &context);
    }
    for _ in 0..4 {
        model.update_from_feedback(Category::Desserts, FeedbackType::Downvote, false, &context);
    }

    let rankings = model.get_rankings();
    assert_eq!(rankings[0].0, Category::Italian);
    assert_eq!(rankings.last().map(|r| r.0), Some(Category::Desserts));

    let statistics = model.get_statistics();
    let italian = &statistics[&Category::Italian];
    assert_eq!(italian.pulls, 8);
    assert_eq!(italian.total_reward, 16.0);
    // Eight full-reward updates on the uniform prior: 9 / (9 + 1).
    assert!((italian.expected_value - 0.9).abs() < 1e-9);

    let total: u64 = statistics.values().map(|s| s.pulls).sum();
    assert_eq!(total, model.total_user_pulls());
    assert!(!model.is_cold_start());
}

#[test]
fn test_selection_steers_toward_learned_preferences() {
    let inventory = vec![item("rice", 1000.0, 120), item("salmon", 200.0, 1)];
    let context = PantryContext::extract(&inventory, Utc::now());
    let mut model = BanditModel::new();

    // Push well past the exploration-heavy phase.
    for _ in 0..60 {
        model.update_from_feedback(Category::Asian, FeedbackType::Cooked, true, &context);
    }
    for _ in 0..10 {
        model.update_from_feedback(Category::ComfortFood, FeedbackType::Downvote, false, &context);
    }
    assert_eq!(model.exploration_rate(), 0.1);

    let mut rng = StdRng::seed_from_u64(17);
    let mut asian_picks = 0;
    for _ in 0..100 {
        let selected = model.select_categories(&context, 3, &Category::ALL, &mut rng);
        assert_eq!(selected.len(), 3);
        if selected.iter().any(|(category, _)| *category == Category::Asian) {
            asian_picks += 1;
        }
    }

    // A strongly rewarded arm should dominate selection by now.
    assert!(
        asian_picks > 70,
        "asian selected only {} times out of 100",
        asian_picks
    );
}

#[test]
fn test_snapshot_round_trip_preserves_learning() {
    let inventory = vec![item("lentils", 500.0, 200)];
    let context = PantryContext::extract(&inventory, Utc::now());
    let mut model = BanditModel::new();

    for _ in 0..12 {
        model.update_from_feedback(Category::Vegetarian, FeedbackType::Upvote, false, &context);
    }
    model.update_from_feedback(Category::American, FeedbackType::Skip, false, &context);

    let json = serde_json::to_string(&model.to_snapshot()).expect("snapshot serializes");
    let snapshot: ModelSnapshot = serde_json::from_str(&json).expect("snapshot parses");
    let restored = BanditModel::from_snapshot(snapshot);

    assert_eq!(restored.total_user_pulls(), model.total_user_pulls());
    assert_eq!(restored.get_rankings()[0].0, Category::Vegetarian);
    assert_eq!(
        restored.get_statistics()[&Category::Vegetarian].pulls,
        model.get_statistics()[&Category::Vegetarian].pulls
    );
    assert!(
        (restored.get_mean(Category::Vegetarian) - model.get_mean(Category::Vegetarian)).abs()
            < 1e-9
    );
}

#[test]
fn test_scoring_rewards_selected_categories_and_flags_allergens() {
    let now = Utc::now();
    let inventory = vec![
        item("pasta", 500.0, 60),
        item("tomato", 4.0, 1),
        item("peanut butter", 300.0, 90),
    ];
    let allergies = vec![Allergy {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        allergen: "peanut".to_string(),
        severity: Some("severe".to_string()),
        created_at: now,
    }];
    let scorer = RecipeScorer::default();

    let pasta = recipe(1, "Tomato Pasta", &["italian"], &["pasta", "tomato"]);
    let pasta_categories = Category::classify(&pasta.title, &pasta.classification_tags());
    assert!(pasta_categories.contains(&Category::Italian));

    let boosted = scorer.score_recipe(
        &pasta,
        &inventory,
        &allergies,
        0.0,
        &pasta_categories,
        &[Category::Italian],
        now,
    );
    let unboosted = scorer.score_recipe(
        &pasta,
        &inventory,
        &allergies,
        0.0,
        &pasta_categories,
        &[],
        now,
    );

    assert!(boosted.is_allergen_safe);
    assert_eq!(boosted.match_percentage, 100.0);
    assert!(boosted.urgency_score > 0.0);
    assert_eq!(boosted.category_boost, 10.0);
    assert!(boosted.final_score > unboosted.final_score);

    let satay = recipe(2, "Peanut Satay", &["asian"], &["peanut sauce", "chicken"]);
    let satay_categories = Category::classify(&satay.title, &satay.classification_tags());
    let unsafe_score = scorer.score_recipe(
        &satay,
        &inventory,
        &allergies,
        0.0,
        &satay_categories,
        &[],
        now,
    );

    assert!(!unsafe_score.is_allergen_safe);
    assert!(unsafe_score.overall_score < boosted.overall_score);
}
