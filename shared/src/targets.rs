//! Personalized daily target derivation
//!
//! Turns a user profile into a per-nutrient recommended daily intake:
//! Mifflin-St Jeor BMR, activity-scaled energy, goal-adjusted calories, a
//! macro split chosen by goal/preference precedence, and catalog defaults for
//! micronutrients with a small set of profile-specific overrides.

use crate::catalog::{
    NutrientCatalog, NutrientCategory, CALCIUM, CALORIES, CARBS, FAT, FIBER, FOLATE, IRON, PROTEIN,
    WATER,
};
use crate::types::{Sex, UserProfile};
use std::collections::HashMap;

/// Calorie density used to convert macro calorie shares to grams
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Target daily calories: TDEE adjusted for weight goals
/// (-20% for weight loss, +15% for weight gain)
pub fn target_calories(profile: &UserProfile) -> f64 {
    let tdee = basal_metabolic_rate(profile) * profile.activity_level.multiplier();
    if profile.has_goal("weight_loss") {
        tdee * 0.8
    } else if profile.has_goal("weight_gain") {
        tdee * 1.15
    } else {
        tdee
    }
}

/// Macro calorie split (protein, carbs, fat) as fractions summing to 1.
///
/// Precedence: muscle_gain, then endurance, then a low_carb preference, then
/// the default split.
pub fn macro_split(profile: &UserProfile) -> (f64, f64, f64) {
    if profile.has_goal("muscle_gain") {
        (0.30, 0.45, 0.25)
    } else if profile.has_goal("endurance") {
        (0.20, 0.60, 0.20)
    } else if profile.has_preference("low_carb") {
        (0.35, 0.30, 0.35)
    } else {
        (0.25, 0.50, 0.25)
    }
}

/// Derive the personalized recommended daily intake per nutrient.
///
/// Every vitamin and mineral in the catalog gets its default daily value,
/// with overrides: iron 18 mg for women aged 19-50, and a 1.5x boost on
/// folate, iron and calcium for any pregnancy health condition.
pub fn calculate_targets(profile: &UserProfile, catalog: &NutrientCatalog) -> HashMap<String, f64> {
    let mut targets = HashMap::new();

    let calories = target_calories(profile);
    let (protein_share, carb_share, fat_share) = macro_split(profile);

    targets.insert(CALORIES.to_string(), calories);
    targets.insert(
        PROTEIN.to_string(),
        calories * protein_share / KCAL_PER_G_PROTEIN,
    );
    targets.insert(CARBS.to_string(), calories * carb_share / KCAL_PER_G_CARBS);
    targets.insert(FAT.to_string(), calories * fat_share / KCAL_PER_G_FAT);

    // 14 g fiber per 1000 kcal, 30 ml water per kg body weight
    targets.insert(FIBER.to_string(), 14.0 * calories / 1000.0);
    targets.insert(WATER.to_string(), 30.0 * profile.weight_kg);

    for nutrient in catalog.iter() {
        if matches!(
            nutrient.category,
            NutrientCategory::Vitamin | NutrientCategory::Mineral
        ) {
            targets.insert(nutrient.id.clone(), nutrient.daily_value.default);
        }
    }

    // Menstruating-age women need more iron than the shared default.
    if profile.sex == Sex::Female && (19..=50).contains(&profile.age) {
        targets.insert(IRON.to_string(), 18.0);
    }

    if profile.has_condition_containing("pregnan") {
        for id in [FOLATE, IRON, CALCIUM] {
            if let Some(value) = targets.get_mut(id) {
                *value *= 1.5;
            }
        }
    }

    targets
}
