//! Macronutrient caloric-share balance check

use crate::catalog::{CARBS, FAT, PROTEIN};
use crate::status::ClassifiedIntake;
use serde::{Deserialize, Serialize};

/// Classification of the protein/carb/fat caloric mixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroBalance {
    Balanced,
    ProteinHeavy,
    CarbHeavy,
    FatHeavy,
}

/// Caloric share of each macronutrient, in percent of their summed calories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroShares {
    pub protein_pct: f64,
    pub carb_pct: f64,
    pub fat_pct: f64,
}

/// Compute caloric shares from the classified current averages.
///
/// Returns `None` unless protein, carbs and fat are all present.
pub fn macro_shares(classified: &ClassifiedIntake) -> Option<MacroShares> {
    let protein = classified.status_of(PROTEIN)?.current;
    let carbs = classified.status_of(CARBS)?.current;
    let fat = classified.status_of(FAT)?.current;

    let protein_kcal = protein * 4.0;
    let carb_kcal = carbs * 4.0;
    let fat_kcal = fat * 9.0;
    let total = protein_kcal + carb_kcal + fat_kcal;
    if total <= 0.0 {
        return None;
    }

    Some(MacroShares {
        protein_pct: 100.0 * protein_kcal / total,
        carb_pct: 100.0 * carb_kcal / total,
        fat_pct: 100.0 * fat_kcal / total,
    })
}

/// Classify the macro mixture.
///
/// Checked in order: carb-heavy, fat-heavy, protein-heavy, then the balanced
/// band. Percentage combinations between "protein-heavy" and "balanced" fall
/// through to `None` deliberately; that middle band has no clear label.
pub fn check_balance(classified: &ClassifiedIntake) -> Option<MacroBalance> {
    let shares = macro_shares(classified)?;

    if shares.carb_pct > 60.0 {
        Some(MacroBalance::CarbHeavy)
    } else if shares.fat_pct > 40.0 {
        Some(MacroBalance::FatHeavy)
    } else if shares.protein_pct > 35.0 {
        Some(MacroBalance::ProteinHeavy)
    } else if (15.0..=35.0).contains(&shares.protein_pct)
        && (45.0..=60.0).contains(&shares.carb_pct)
        && (20.0..=35.0).contains(&shares.fat_pct)
    {
        Some(MacroBalance::Balanced)
    } else {
        None
    }
}
