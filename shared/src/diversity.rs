//! Dietary variety scoring
//!
//! Derives a 0-10 rating from food-category coverage and unique ingredient
//! count, using case-insensitive keyword matching over ingredient strings.

use crate::types::IntakeRecord;
use std::collections::HashSet;

/// The ten food categories counted towards variety
pub const CATEGORY_COUNT: usize = 10;

/// Per-category keyword lists, matched as substrings of ingredient strings
const CATEGORY_KEYWORDS: [(&str, &[&str]); CATEGORY_COUNT] = [
    (
        "meat",
        &["beef", "pork", "chicken", "turkey", "lamb", "bacon", "ham", "sausage", "meat"],
    ),
    (
        "fish",
        &["fish", "salmon", "tuna", "cod", "shrimp", "sardine", "mackerel", "trout", "seafood"],
    ),
    (
        "dairy",
        &["milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "kefir"],
    ),
    ("eggs", &["egg"]),
    (
        "legumes",
        &["bean", "lentil", "chickpea", "pea", "soy", "tofu", "edamame"],
    ),
    (
        "grains",
        &["rice", "bread", "pasta", "oat", "wheat", "barley", "quinoa", "cereal", "corn"],
    ),
    (
        "vegetables",
        &[
            "broccoli", "spinach", "carrot", "tomato", "pepper", "onion", "cabbage", "lettuce",
            "kale", "zucchini", "cucumber", "potato", "vegetable",
        ],
    ),
    (
        "fruits",
        &[
            "apple", "banana", "orange", "berry", "grape", "mango", "pear", "peach", "melon",
            "kiwi", "pineapple", "fruit",
        ],
    ),
    (
        "nuts_seeds",
        &["almond", "walnut", "peanut", "cashew", "pistachio", "hazelnut", "nut", "seed"],
    ),
    ("oils", &["oil", "olive"]),
];

/// Breakdown behind a diversity score
#[derive(Debug, Clone)]
pub struct DiversityBreakdown {
    /// Categories with at least one matching ingredient, insertion order
    pub categories: Vec<&'static str>,
    pub unique_ingredients: usize,
    /// Rounded 0-10 score
    pub score: u32,
}

/// Score dietary variety over the period's records.
///
/// score = min(10, categories/10 * 5 + min(5, unique_ingredients/20)),
/// rounded to the nearest integer. No records scores 0.
pub fn score_diversity(records: &[IntakeRecord]) -> DiversityBreakdown {
    let mut unique: HashSet<String> = HashSet::new();
    for record in records {
        for ingredient in &record.ingredients {
            let normalized = ingredient.trim().to_lowercase();
            if !normalized.is_empty() {
                unique.insert(normalized);
            }
        }
    }

    let categories: Vec<&'static str> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            unique
                .iter()
                .any(|ing| keywords.iter().any(|kw| ing.contains(kw)))
        })
        .map(|(name, _)| *name)
        .collect();

    let category_points = categories.len() as f64 / CATEGORY_COUNT as f64 * 5.0;
    let ingredient_points = (unique.len() as f64 / 20.0).min(5.0);
    let score = (category_points + ingredient_points).min(10.0).round() as u32;

    DiversityBreakdown {
        categories,
        unique_ingredients: unique.len(),
        score,
    }
}
