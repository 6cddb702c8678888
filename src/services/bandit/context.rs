//! Pantry context extraction
//!
//! Derives the feature snapshot the bandit conditions on from the user's
//! current inventory. Recomputed fresh on every request, never persisted.

use crate::models::InventoryItem;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Items expiring within this many days count as "expiring".
const EXPIRING_WINDOW_DAYS: i64 = 3;

/// Item count at which inventory diversity saturates at 1.0.
const DIVERSITY_CEILING: f64 = 20.0;

const PRODUCE_KEYWORDS: [&str; 18] = [
    "lettuce", "spinach", "tomato", "cucumber", "carrot", "onion", "pepper", "broccoli",
    "apple", "banana", "berry", "kale", "potato", "garlic", "mushroom", "avocado", "orange",
    "lemon",
];

const PROTEIN_KEYWORDS: [&str; 13] = [
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "egg", "tofu", "turkey", "shrimp",
    "beans", "lentil", "meat",
];

const GRAIN_KEYWORDS: [&str; 10] = [
    "rice", "pasta", "bread", "oat", "quinoa", "flour", "noodle", "tortilla", "barley",
    "cereal",
];

/// Names of the context features, in vector order. Persisted weight maps are
/// keyed by these names.
pub const FEATURE_NAMES: [&str; 6] = [
    "expiring_count",
    "total_items",
    "has_produce",
    "has_protein",
    "has_grains",
    "inventory_diversity",
];

/// Snapshot of the pantry state at recommendation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PantryContext {
    pub expiring_count: usize,
    pub total_items: usize,
    pub has_produce: f64,
    pub has_protein: f64,
    pub has_grains: f64,
    pub inventory_diversity: f64,
}

impl PantryContext {
    /// All-zero context, what an empty inventory extracts to.
    pub fn empty() -> Self {
        PantryContext {
            expiring_count: 0,
            total_items: 0,
            has_produce: 0.0,
            has_protein: 0.0,
            has_grains: 0.0,
            inventory_diversity: 0.0,
        }
    }

    /// Extract context features from an inventory. Expiry comparison uses
    /// whole days relative to `now`; already-expired items count as expiring.
    pub fn extract(inventory: &[InventoryItem], now: DateTime<Utc>) -> Self {
        if inventory.is_empty() {
            return PantryContext::empty();
        }

        let expiring_count = inventory
            .iter()
            .filter(|item| (item.expiry_date - now).num_days() <= EXPIRING_WINDOW_DAYS)
            .count();

        let names_lower: Vec<String> = inventory
            .iter()
            .map(|item| item.item_name.to_lowercase())
            .collect();

        let has_any = |keywords: &[&str]| -> f64 {
            let hit = names_lower
                .iter()
                .any(|name| keywords.iter().any(|kw| name.contains(kw)));
            if hit {
                1.0
            } else {
                0.0
            }
        };

        let total_items = inventory.len();

        PantryContext {
            expiring_count,
            total_items,
            has_produce: has_any(&PRODUCE_KEYWORDS),
            has_protein: has_any(&PROTEIN_KEYWORDS),
            has_grains: has_any(&GRAIN_KEYWORDS),
            inventory_diversity: (total_items as f64 / DIVERSITY_CEILING).min(1.0),
        }
    }

    /// Feature vector for the contextual bonus and the weight update, aligned
    /// with [`FEATURE_NAMES`]. Count features are normalized so no single
    /// feature can swamp a sampled theta in [0, 1].
    pub fn to_feature_vector(&self) -> [f64; 6] {
        [
            (self.expiring_count as f64 / 10.0).min(1.0),
            (self.total_items as f64 / DIVERSITY_CEILING).min(1.0),
            self.has_produce,
            self.has_protein,
            self.has_grains,
            self.inventory_diversity,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn item(name: &str, expires_in_days: i64, now: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            item_name: name.to_string(),
            quantity: 1.0,
            unit: "piece".to_string(),
            expiry_date: now + Duration::days(expires_in_days),
            added_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_inventory_yields_zero_context() {
        let ctx = PantryContext::extract(&[], Utc::now());
        assert_eq!(ctx, PantryContext::empty());
        assert_eq!(ctx.expiring_count, 0);
        assert_eq!(ctx.total_items, 0);
        assert_eq!(ctx.inventory_diversity, 0.0);
    }

    #[test]
    fn test_extract_counts_expiring_and_food_groups() {
        let now = Utc::now();
        let inventory = vec![item("Chicken", 1, now), item("Lettuce", 10, now)];

        let ctx = PantryContext::extract(&inventory, now);

        assert_eq!(ctx.expiring_count, 1);
        assert_eq!(ctx.total_items, 2);
        assert_eq!(ctx.has_protein, 1.0);
        assert_eq!(ctx.has_produce, 1.0);
        assert_eq!(ctx.has_grains, 0.0);
    }

    #[test]
    fn test_expiring_window_boundary() {
        let now = Utc::now();
        let inventory = vec![
            item("Milk", 3, now),
            item("Yogurt", 4, now),
            item("Old Cheese", -2, now),
        ];

        let ctx = PantryContext::extract(&inventory, now);

        // Three days out and already expired both count; four days does not.
        assert_eq!(ctx.expiring_count, 2);
    }

    #[test]
    fn test_diversity_saturates() {
        let now = Utc::now();
        let inventory: Vec<InventoryItem> = (0..25)
            .map(|i| item(&format!("Item {}", i), 10, now))
            .collect();

        let ctx = PantryContext::extract(&inventory, now);

        assert_eq!(ctx.inventory_diversity, 1.0);
        assert_eq!(ctx.total_items, 25);
    }

    #[test]
    fn test_feature_vector_layout_and_bounds() {
        let now = Utc::now();
        let inventory = vec![
            item("Chicken Breast", 1, now),
            item("Lettuce", 2, now),
            item("Rice", 30, now),
        ];

        let ctx = PantryContext::extract(&inventory, now);
        let features = ctx.to_feature_vector();

        assert_eq!(features.len(), FEATURE_NAMES.len());
        assert!((features[0] - 0.2).abs() < 1e-9); // 2 expiring / 10
        assert!((features[1] - 0.15).abs() < 1e-9); // 3 items / 20
        assert_eq!(features[2], 1.0);
        assert_eq!(features[3], 1.0);
        assert_eq!(features[4], 1.0);
        for value in features {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
