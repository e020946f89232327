//! Allergen cross-referencing
//!
//! Matches the user's declared allergies against recorded ingredients and
//! allergen tags. A hit is any case-insensitive substring match in either
//! direction ("peanut" vs "peanut butter" matches both ways).

use crate::types::IntakeRecord;

/// Scan records for the user's declared allergies.
///
/// Returns the matched record terms, deduplicated, in insertion order.
/// No declared allergies means no scan and an empty result.
pub fn scan_allergens(records: &[IntakeRecord], allergies: &[String]) -> Vec<String> {
    if allergies.is_empty() {
        return Vec::new();
    }

    let declared: Vec<String> = allergies.iter().map(|a| a.to_lowercase()).collect();
    let mut hits: Vec<String> = Vec::new();

    for record in records {
        for term in record.ingredients.iter().chain(record.allergens.iter()) {
            let lowered = term.to_lowercase();
            let matched = declared
                .iter()
                .any(|a| lowered.contains(a.as_str()) || a.contains(lowered.as_str()));
            if matched && !hits.iter().any(|h| h.eq_ignore_ascii_case(term)) {
                hits.push(term.clone());
            }
        }
    }

    hits
}
