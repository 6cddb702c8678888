//! Recipe category taxonomy
//!
//! The fixed set of arms the bandit learns over. Each category owns a static
//! keyword list used to classify recipes into zero or more categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of recipe categories. Variants are declared in alphabetical
/// order so the derived `Ord` matches name order, which selection relies on
/// for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    American,
    Asian,
    Breakfast,
    ComfortFood,
    Desserts,
    General,
    Healthy,
    Indian,
    Italian,
    Mediterranean,
    Mexican,
    QuickMeals,
    Salads,
    Vegetarian,
}

impl Category {
    /// Every category, in name order.
    pub const ALL: [Category; 14] = [
        Category::American,
        Category::Asian,
        Category::Breakfast,
        Category::ComfortFood,
        Category::Desserts,
        Category::General,
        Category::Healthy,
        Category::Indian,
        Category::Italian,
        Category::Mediterranean,
        Category::Mexican,
        Category::QuickMeals,
        Category::Salads,
        Category::Vegetarian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::American => "american",
            Category::Asian => "asian",
            Category::Breakfast => "breakfast",
            Category::ComfortFood => "comfort_food",
            Category::Desserts => "desserts",
            Category::General => "general",
            Category::Healthy => "healthy",
            Category::Indian => "indian",
            Category::Italian => "italian",
            Category::Mediterranean => "mediterranean",
            Category::Mexican => "mexican",
            Category::QuickMeals => "quick_meals",
            Category::Salads => "salads",
            Category::Vegetarian => "vegetarian",
        }
    }

    pub fn from_str(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == name)
    }

    /// Keywords that place a recipe in this category. Matched as
    /// case-insensitive substrings of the title and tags.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::American => &["american", "burger", "bbq", "barbecue", "grilled"],
            Category::Asian => &[
                "asian", "chinese", "japanese", "thai", "korean", "vietnamese", "stir fry",
                "stir-fry", "ramen", "sushi", "noodle",
            ],
            Category::Breakfast => &[
                "breakfast", "pancake", "waffle", "omelette", "brunch", "oatmeal", "granola",
            ],
            Category::ComfortFood => &[
                "comfort", "casserole", "stew", "mac and cheese", "pot pie", "hearty",
            ],
            Category::Desserts => &[
                "dessert", "cake", "cookie", "chocolate", "sweet", "brownie", "pudding",
            ],
            // Fallback arm, never matched by keyword.
            Category::General => &[],
            Category::Healthy => &[
                "healthy", "light", "fitness", "low calorie", "low-carb", "nutritious",
            ],
            Category::Indian => &["indian", "curry", "masala", "tandoori", "dal", "biryani"],
            Category::Italian => &[
                "italian", "pasta", "pizza", "risotto", "lasagna", "carbonara", "gnocchi",
            ],
            Category::Mediterranean => &["mediterranean", "greek", "hummus", "falafel", "tzatziki"],
            Category::Mexican => &[
                "mexican", "taco", "burrito", "quesadilla", "salsa", "enchilada", "fajita",
            ],
            Category::QuickMeals => &["quick", "easy", "minute", "simple", "weeknight"],
            Category::Salads => &["salad", "bowl", "slaw"],
            Category::Vegetarian => &[
                "vegetarian", "vegan", "plant-based", "meatless", "tofu", "lentil",
            ],
        }
    }

    /// Classify a recipe by title and tags. Multi-label: every category with
    /// a keyword hit is returned. Falls back to `general` when nothing
    /// matches so the result is never empty.
    pub fn classify(title: &str, tags: &[String]) -> Vec<Category> {
        let title_lower = title.to_lowercase();
        let tags_lower: Vec<String> = tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut matched: Vec<Category> = Vec::new();
        for category in Category::ALL {
            let hit = category.keywords().iter().any(|keyword| {
                title_lower.contains(keyword)
                    || tags_lower
                        .iter()
                        .any(|tag| tag.contains(keyword) || keyword.contains(tag.as_str()))
            });
            if hit {
                matched.push(category);
            }
        }

        if matched.is_empty() {
            matched.push(Category::General);
        }
        matched
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_classify_italian_by_title_and_tag() {
        let categories = Category::classify("Spaghetti Carbonara", &tags(&["italian", "pasta"]));
        assert!(categories.contains(&Category::Italian));
    }

    #[test]
    fn test_classify_multi_label() {
        let categories = Category::classify("Thai Green Curry", &tags(&["thai", "curry"]));
        assert!(categories.contains(&Category::Asian));
        assert!(categories.contains(&Category::Indian));
    }

    #[test]
    fn test_classify_compound_tag() {
        // Keyword inside a compound tag still matches.
        let categories = Category::classify("Stir Fry", &tags(&["quick-30-minute"]));
        assert!(categories.contains(&Category::QuickMeals));
    }

    #[test]
    fn test_classify_case_insensitive() {
        let categories = Category::classify("CHOCOLATE Chip Cookies", &[]);
        assert!(categories.contains(&Category::Desserts));
    }

    #[test]
    fn test_classify_falls_back_to_general() {
        let categories = Category::classify("Mystery Dish", &tags(&["unclassifiable"]));
        assert_eq!(categories, vec![Category::General]);
    }

    #[test]
    fn test_classify_never_duplicates() {
        let categories = Category::classify("Pasta pasta pasta", &tags(&["pasta", "italian"]));
        let italian_count = categories
            .iter()
            .filter(|c| **c == Category::Italian)
            .count();
        assert_eq!(italian_count, 1);
    }

    #[test]
    fn test_ord_matches_name_order() {
        for pair in Category::ALL.windows(2) {
            assert!(pair[0].as_str() < pair[1].as_str());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_str("nonexistent_category"), None);
    }
}
