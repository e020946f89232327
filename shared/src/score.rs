//! Diet-quality scoring
//!
//! Combines per-nutrient statuses into one 0-100 score: a non-linear penalty
//! curve per nutrient, group means weighted 50/25/25 across
//! macronutrients/vitamins/minerals, and multiplicative penalties for macro
//! imbalance and thin nutrient coverage.

use crate::balance::MacroBalance;
use crate::catalog::{NutrientCatalog, NutrientCategory};
use crate::types::NutrientStatus;

/// Default minimum distinct nutrients before the coverage penalty applies
pub const DEFAULT_MIN_COVERAGE: usize = 10;

const MACRO_WEIGHT: f64 = 0.50;
const VITAMIN_WEIGHT: f64 = 0.25;
const MINERAL_WEIGHT: f64 = 0.25;

/// Per-nutrient sub-score from percentage-of-target.
///
/// Deviation from 100% is penalized on a piecewise curve that steepens with
/// distance and floors at 0.
pub fn nutrient_sub_score(percentage: f64) -> f64 {
    let deviation = (percentage - 100.0).abs();
    if deviation <= 10.0 {
        100.0 - deviation / 2.0
    } else if deviation <= 30.0 {
        95.0 - (deviation - 10.0) * 1.5
    } else if deviation <= 50.0 {
        75.0 - (deviation - 30.0) * 2.0
    } else {
        (35.0 - (deviation - 50.0) * 0.7).max(0.0)
    }
}

fn group_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Combine statuses into the normalized 0-100 diet-quality score.
///
/// `balance` is the macro balance result for the same window; anything other
/// than `Some(Balanced)` (including the unresolved middle band) costs 10%.
/// Tracking fewer than `min_coverage` distinct nutrients costs a further 15%.
pub fn calculate_score(
    statuses: &[NutrientStatus],
    balance: Option<MacroBalance>,
    catalog: &NutrientCatalog,
    min_coverage: usize,
) -> u32 {
    let mut macros = Vec::new();
    let mut vitamins = Vec::new();
    let mut minerals = Vec::new();

    for status in statuses {
        let Some(nutrient) = catalog.get(&status.nutrient_id) else {
            continue;
        };
        let sub = nutrient_sub_score(status.percentage);
        match nutrient.category {
            NutrientCategory::Macronutrient => macros.push(sub),
            NutrientCategory::Vitamin => vitamins.push(sub),
            NutrientCategory::Mineral => minerals.push(sub),
            NutrientCategory::Other => {}
        }
    }

    let mut total = MACRO_WEIGHT * group_mean(&macros)
        + VITAMIN_WEIGHT * group_mean(&vitamins)
        + MINERAL_WEIGHT * group_mean(&minerals);

    if balance != Some(MacroBalance::Balanced) {
        total *= 0.9;
    }
    if statuses.len() < min_coverage {
        total *= 0.85;
    }

    total.round().clamp(0.0, 100.0) as u32
}
