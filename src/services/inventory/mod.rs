//! Shelf-life estimation and unit-aware inventory subtraction.
//!
//! Subtraction is computed as a plan of per-item adjustments so the math
//! stays pure; callers apply the plan against the store.

use crate::models::InventoryItem;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Keyword shelf life in days, matched bidirectionally against item names.
/// First hit wins, so more specific entries come before generic ones.
const SHELF_LIFE_DAYS: &[(&str, i64)] = &[
    // Dairy
    ("milk", 7),
    ("cheese", 14),
    ("yogurt", 10),
    ("butter", 30),
    ("cream", 7),
    // Produce
    ("lettuce", 5),
    ("tomatoes", 7),
    ("tomato", 7),
    ("carrots", 14),
    ("carrot", 14),
    ("potatoes", 30),
    ("potato", 30),
    ("onions", 30),
    ("onion", 30),
    ("garlic", 30),
    ("bananas", 5),
    ("banana", 5),
    ("apples", 14),
    ("apple", 14),
    ("berries", 3),
    ("strawberries", 3),
    ("blueberries", 5),
    ("spinach", 5),
    ("broccoli", 7),
    ("bell pepper", 10),
    ("peppers", 10),
    // Proteins
    ("chicken", 2),
    ("beef", 3),
    ("pork", 3),
    ("fish", 1),
    ("salmon", 2),
    ("eggs", 21),
    ("egg", 21),
    // Herbs
    ("basil", 5),
    ("cilantro", 7),
    ("parsley", 7),
    ("mint", 7),
    // Pantry
    ("flour", 180),
    ("sugar", 730),
    ("rice", 365),
    ("pasta", 730),
    ("beans", 365),
    ("lentils", 365),
    ("canned", 730),
];

const DEFAULT_SHELF_LIFE_DAYS: i64 = 7;

/// Shelf life below which an item counts as perishable for the bulk rule.
const PERISHABLE_THRESHOLD_DAYS: i64 = 14;

/// Ceiling on client-supplied day counts, ten years either way.
const MAX_HORIZON_DAYS: i64 = 3650;

const QUANTITY_EPSILON: f64 = 1e-9;

/// Clamp a client-supplied day count into a span chrono can add safely.
fn bounded_days(days: i64) -> Duration {
    Duration::days(days.clamp(-MAX_HORIZON_DAYS, MAX_HORIZON_DAYS))
}

/// Estimated shelf life for an item. Bulk quantities of perishables get a
/// shortened estimate since they rarely keep as long.
pub fn shelf_life_days(item_name: &str, quantity: f64) -> i64 {
    let normalized = item_name.trim().to_lowercase();

    let mut base = DEFAULT_SHELF_LIFE_DAYS;
    for (keyword, days) in SHELF_LIFE_DAYS {
        if normalized.contains(keyword) || keyword.contains(normalized.as_str()) {
            base = *days;
            break;
        }
    }

    if base <= PERISHABLE_THRESHOLD_DAYS && quantity > 5.0 {
        base = (base as f64 * 0.8) as i64;
    }
    base
}

/// Expiry timestamp for a new item: purchase date (default now) plus shelf
/// life, pinned to end of day UTC. An explicit shelf life wins over the
/// keyword estimate; day counts beyond ten years clamp to the ceiling.
pub fn expiry_for(
    item_name: &str,
    quantity: f64,
    purchase_date: Option<DateTime<Utc>>,
    shelf_life_override: Option<i64>,
) -> DateTime<Utc> {
    let days = shelf_life_override.unwrap_or_else(|| shelf_life_days(item_name, quantity));
    let start = purchase_date.unwrap_or_else(Utc::now);
    let expiry = start.checked_add_signed(bounded_days(days)).unwrap_or(start);

    match expiry.date_naive().and_hms_opt(23, 59, 59) {
        Some(end_of_day) => end_of_day.and_utc(),
        None => expiry,
    }
}

/// Items expiring on or before now + days.
pub fn expiring_within(
    inventory: &[InventoryItem],
    days: i64,
    now: DateTime<Utc>,
) -> Vec<InventoryItem> {
    let cutoff = now.checked_add_signed(bounded_days(days)).unwrap_or(now);
    let mut expiring: Vec<InventoryItem> = inventory
        .iter()
        .filter(|item| item.expiry_date <= cutoff)
        .cloned()
        .collect();
    expiring.sort_by_key(|item| item.expiry_date);
    expiring
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitFamily {
    Mass,
    Volume,
}

/// Factor to the family base unit (grams or milliliters).
fn unit_factor(unit: &str) -> Option<(UnitFamily, f64)> {
    match unit.trim().to_lowercase().as_str() {
        "g" | "gram" | "grams" => Some((UnitFamily::Mass, 1.0)),
        "kg" | "kilogram" | "kilograms" => Some((UnitFamily::Mass, 1000.0)),
        "oz" | "ounce" | "ounces" => Some((UnitFamily::Mass, 28.3495)),
        "lb" | "lbs" | "pound" | "pounds" => Some((UnitFamily::Mass, 453.592)),
        "ml" | "milliliter" | "milliliters" => Some((UnitFamily::Volume, 1.0)),
        "l" | "liter" | "liters" => Some((UnitFamily::Volume, 1000.0)),
        "cup" | "cups" => Some((UnitFamily::Volume, 240.0)),
        "tbsp" | "tablespoon" | "tablespoons" => Some((UnitFamily::Volume, 15.0)),
        "tsp" | "teaspoon" | "teaspoons" => Some((UnitFamily::Volume, 5.0)),
        _ => None,
    }
}

/// Convert a quantity between units of the same family. Unknown units or a
/// family mismatch return None and callers fall back to raw quantities.
pub fn convert_quantity(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let (from_family, from_factor) = unit_factor(from_unit)?;
    let (to_family, to_factor) = unit_factor(to_unit)?;
    if from_family != to_family {
        return None;
    }
    Some(quantity * from_factor / to_factor)
}

/// One recipe ingredient to subtract, in the recipe's units.
#[derive(Debug, Clone)]
pub struct IngredientUse {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemAdjustment {
    Update { item_id: Uuid, new_quantity: f64 },
    Delete { item_id: Uuid },
}

/// The adjustments to apply plus a status line per ingredient.
#[derive(Debug, Clone, Default)]
pub struct SubtractionPlan {
    pub adjustments: Vec<ItemAdjustment>,
    pub statuses: HashMap<String, String>,
}

/// Work out how cooking consumes the pantry.
///
/// For each ingredient, matching items (bidirectional name containment) are
/// consumed soonest-expiry first, converting units within a family. Items
/// drained to zero are deleted; the item holding the remainder is updated in
/// its own unit.
pub fn plan_subtraction(inventory: &[InventoryItem], uses: &[IngredientUse]) -> SubtractionPlan {
    let mut plan = SubtractionPlan::default();
    let mut consumed: Vec<Uuid> = Vec::new();

    for ingredient in uses {
        let name_lower = ingredient.name.trim().to_lowercase();
        let mut matching: Vec<&InventoryItem> = inventory
            .iter()
            .filter(|item| !consumed.contains(&item.id))
            .filter(|item| {
                let item_lower = item.item_name.to_lowercase();
                name_lower.contains(item_lower.as_str()) || item_lower.contains(name_lower.as_str())
            })
            .collect();
        matching.sort_by_key(|item| item.expiry_date);

        if matching.is_empty() {
            plan.statuses
                .insert(ingredient.name.clone(), "not found in inventory".to_string());
            continue;
        }

        let mut remaining = ingredient.quantity;
        let mut last_status = String::new();

        for item in matching {
            if remaining <= QUANTITY_EPSILON {
                break;
            }

            let needed_in_item_units =
                convert_quantity(remaining, &ingredient.unit, &item.unit).unwrap_or(remaining);

            if item.quantity <= needed_in_item_units + QUANTITY_EPSILON {
                plan.adjustments.push(ItemAdjustment::Delete { item_id: item.id });
                consumed.push(item.id);
                let drained = convert_quantity(item.quantity, &item.unit, &ingredient.unit)
                    .unwrap_or(item.quantity);
                remaining -= drained;
                last_status = "deleted (quantity depleted)".to_string();
            } else {
                let new_quantity = item.quantity - needed_in_item_units;
                plan.adjustments.push(ItemAdjustment::Update {
                    item_id: item.id,
                    new_quantity,
                });
                remaining = 0.0;
                last_status = format!("updated (new quantity: {})", new_quantity);
            }
        }

        plan.statuses.insert(ingredient.name.clone(), last_status);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id_byte: u8, name: &str, quantity: f64, unit: &str, days: i64) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: Uuid::from_bytes([id_byte; 16]),
            user_id: Uuid::nil(),
            item_name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            expiry_date: now + Duration::days(days),
            added_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_shelf_life_lookup() {
        assert_eq!(shelf_life_days("milk", 1.0), 7);
        assert_eq!(shelf_life_days("Whole Milk", 1.0), 7);
        assert_eq!(shelf_life_days("chicken", 1.0), 2);
        assert_eq!(shelf_life_days("fish", 1.0), 1);
        assert_eq!(shelf_life_days("rice", 1.0), 365);
        assert_eq!(shelf_life_days("dragonfruit jam", 1.0), 7);
    }

    #[test]
    fn test_bulk_perishables_expire_sooner() {
        // 7 days * 0.8 truncates to 5.
        assert_eq!(shelf_life_days("milk", 10.0), 5);
        // Non-perishables are unaffected by quantity.
        assert_eq!(shelf_life_days("rice", 100.0), 365);
    }

    #[test]
    fn test_expiry_is_end_of_day() {
        use chrono::Timelike;

        let expiry = expiry_for("milk", 1.0, None, None);
        assert_eq!(expiry.hour(), 23);
        assert_eq!(expiry.minute(), 59);
        assert_eq!(expiry.second(), 59);

        let explicit = expiry_for("milk", 1.0, None, Some(30));
        assert!(explicit > expiry);
    }

    #[test]
    fn test_expiry_clamps_extreme_day_counts() {
        use chrono::TimeZone;

        let purchase = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let capped = expiry_for("milk", 1.0, Some(purchase), Some(i64::MAX));
        assert_eq!(
            capped,
            expiry_for("milk", 1.0, Some(purchase), Some(MAX_HORIZON_DAYS))
        );

        // Calendar-edge purchase dates degrade instead of overflowing.
        let edge = DateTime::<Utc>::MAX_UTC;
        let pinned = expiry_for("milk", 1.0, Some(edge), Some(30));
        assert_eq!(pinned.date_naive(), edge.date_naive());
    }

    #[test]
    fn test_expiring_within_window() {
        let now = Utc::now();
        let inventory = vec![
            item(1, "milk", 1.0, "l", 2),
            item(2, "rice", 1.0, "kg", 100),
            item(3, "fish", 1.0, "kg", -1),
        ];

        let expiring = expiring_within(&inventory, 3, now);
        assert_eq!(expiring.len(), 2);
        // Already expired sorts first.
        assert_eq!(expiring[0].item_name, "fish");
        assert_eq!(expiring[1].item_name, "milk");
    }

    #[test]
    fn test_expiring_window_clamps_extreme_day_counts() {
        let now = Utc::now();
        let inventory = vec![item(1, "milk", 1.0, "l", 2)];

        let everything = expiring_within(&inventory, i64::MAX, now);
        assert_eq!(everything.len(), 1);

        assert!(expiring_within(&inventory, i64::MIN, now).is_empty());
        assert!(expiring_within(&[], i64::MAX, now).is_empty());
    }

    #[test]
    fn test_unit_conversion_within_family() {
        assert_eq!(convert_quantity(1.0, "kg", "g"), Some(1000.0));
        assert_eq!(convert_quantity(300.0, "g", "kg"), Some(0.3));
        assert_eq!(convert_quantity(2.0, "cups", "ml"), Some(480.0));
        assert_eq!(convert_quantity(3.0, "tsp", "tbsp"), Some(1.0));
    }

    #[test]
    fn test_unit_conversion_rejects_cross_family_and_unknown() {
        assert_eq!(convert_quantity(1.0, "kg", "ml"), None);
        assert_eq!(convert_quantity(1.0, "piece", "g"), None);
    }

    #[test]
    fn test_subtraction_consumes_in_expiry_order_across_units() {
        // 200 g today, 1 kg tomorrow, 2 kg the day after.
        let inventory = vec![
            item(1, "Chicken", 200.0, "g", 0),
            item(2, "Chicken", 1.0, "kg", 1),
            item(3, "Chicken", 2.0, "kg", 2),
        ];
        let uses = vec![IngredientUse {
            name: "chicken".to_string(),
            quantity: 300.0,
            unit: "g".to_string(),
        }];

        let plan = plan_subtraction(&inventory, &uses);

        // The 200 g item is drained, the 1 kg item drops to 0.9 kg and the
        // 2 kg item is untouched.
        assert_eq!(plan.adjustments.len(), 2);
        assert_eq!(
            plan.adjustments[0],
            ItemAdjustment::Delete {
                item_id: inventory[0].id
            }
        );
        match plan.adjustments[1] {
            ItemAdjustment::Update {
                item_id,
                new_quantity,
            } => {
                assert_eq!(item_id, inventory[1].id);
                assert!((new_quantity - 0.9).abs() < 1e-6);
            }
            _ => panic!("expected an update"),
        }
        assert!(plan.statuses["chicken"].starts_with("updated"));
    }

    #[test]
    fn test_subtraction_reports_missing_ingredients() {
        let inventory = vec![item(1, "rice", 1.0, "kg", 100)];
        let uses = vec![IngredientUse {
            name: "saffron".to_string(),
            quantity: 1.0,
            unit: "g".to_string(),
        }];

        let plan = plan_subtraction(&inventory, &uses);
        assert!(plan.adjustments.is_empty());
        assert_eq!(plan.statuses["saffron"], "not found in inventory");
    }

    #[test]
    fn test_subtraction_depletes_everything_when_short() {
        let inventory = vec![item(1, "milk", 500.0, "ml", 1)];
        let uses = vec![IngredientUse {
            name: "milk".to_string(),
            quantity: 1.0,
            unit: "l".to_string(),
        }];

        let plan = plan_subtraction(&inventory, &uses);
        assert_eq!(
            plan.adjustments,
            vec![ItemAdjustment::Delete {
                item_id: inventory[0].id
            }]
        );
        assert_eq!(plan.statuses["milk"], "deleted (quantity depleted)");
    }

    #[test]
    fn test_subtraction_falls_back_to_raw_quantities() {
        // "piece" is unknown, so quantities compare raw.
        let inventory = vec![item(1, "eggs", 12.0, "piece", 10)];
        let uses = vec![IngredientUse {
            name: "egg".to_string(),
            quantity: 3.0,
            unit: "piece".to_string(),
        }];

        let plan = plan_subtraction(&inventory, &uses);
        match plan.adjustments[0] {
            ItemAdjustment::Update { new_quantity, .. } => {
                assert!((new_quantity - 9.0).abs() < 1e-9)
            }
            _ => panic!("expected an update"),
        }
    }

    #[test]
    fn test_subtraction_does_not_touch_other_ingredients_stock() {
        let inventory = vec![
            item(1, "chicken", 500.0, "g", 1),
            item(2, "rice", 1.0, "kg", 100),
        ];
        let uses = vec![
            IngredientUse {
                name: "chicken".to_string(),
                quantity: 200.0,
                unit: "g".to_string(),
            },
            IngredientUse {
                name: "rice".to_string(),
                quantity: 0.2,
                unit: "kg".to_string(),
            },
        ];

        let plan = plan_subtraction(&inventory, &uses);
        assert_eq!(plan.adjustments.len(), 2);
        assert!(plan.statuses["chicken"].starts_with("updated"));
        assert!(plan.statuses["rice"].starts_with("updated"));
    }
}
