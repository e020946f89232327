//! Status classification against personalized targets

use crate::aggregate::AggregatedIntake;
use crate::catalog::NutrientCatalog;
use crate::types::{HistoryPoint, IntakeStatus, NutrientStatus, Trend};
use std::collections::HashMap;

/// Trend detection tuning
#[derive(Debug, Clone, Copy)]
pub struct TrendConfig {
    /// Relative change between window halves that counts as a move
    pub threshold: f64,
    /// Minimum history points before a trend is called
    pub min_points: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            threshold: 0.10,
            min_points: 4,
        }
    }
}

/// Classify a percentage-of-target into a status label.
///
/// Thresholds checked in order, first match wins.
pub fn classify(percentage: f64) -> IntakeStatus {
    if percentage < 30.0 {
        IntakeStatus::Deficient
    } else if percentage < 70.0 {
        IntakeStatus::Low
    } else if percentage < 90.0 {
        IntakeStatus::Adequate
    } else if percentage <= 150.0 {
        IntakeStatus::Optimal
    } else {
        IntakeStatus::Excessive
    }
}

/// Windowed-comparison trend: mean of the recent half of the history against
/// the mean of the prior half. Short series are always `Stable`.
pub fn trend_of(history: &[HistoryPoint], config: &TrendConfig) -> Trend {
    if history.len() < config.min_points {
        return Trend::Stable;
    }
    let mid = history.len() / 2;
    let prior: f64 = history[..mid].iter().map(|p| p.value).sum::<f64>() / mid as f64;
    let recent: f64 =
        history[mid..].iter().map(|p| p.value).sum::<f64>() / (history.len() - mid) as f64;

    if prior == 0.0 {
        return if recent > 0.0 {
            Trend::Increasing
        } else {
            Trend::Stable
        };
    }
    let change = (recent - prior) / prior;
    if change > config.threshold {
        Trend::Increasing
    } else if change < -config.threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Full classification result: per-nutrient statuses plus the three buckets
/// the recommendation synthesizer consumes.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedIntake {
    /// Sorted by nutrient id for deterministic output
    pub statuses: Vec<NutrientStatus>,
    /// Nutrients classified deficient or low
    pub deficit: Vec<String>,
    /// Nutrients classified excessive
    pub excess: Vec<String>,
    /// Nutrients classified adequate or optimal
    pub balanced: Vec<String>,
}

impl ClassifiedIntake {
    pub fn status_of(&self, nutrient_id: &str) -> Option<&NutrientStatus> {
        self.statuses.iter().find(|s| s.nutrient_id == nutrient_id)
    }
}

/// Compare aggregated intake to targets.
///
/// Nutrients without a catalog entry or without a positive target are skipped
/// silently; the catalog is expected to be a superset over time.
pub fn classify_intake(
    intake: &AggregatedIntake,
    targets: &HashMap<String, f64>,
    catalog: &NutrientCatalog,
    trend_config: &TrendConfig,
) -> ClassifiedIntake {
    let mut result = ClassifiedIntake::default();

    let mut ids: Vec<&String> = intake.daily_averages.keys().collect();
    ids.sort();

    for id in ids {
        let Some(nutrient) = catalog.get(id) else {
            continue;
        };
        let Some(&target) = targets.get(id) else {
            continue;
        };
        if target <= 0.0 {
            continue;
        }

        let current = intake.daily_averages[id];
        let percentage = 100.0 * current / target;
        let status = classify(percentage);
        let history = intake.history.get(id).cloned().unwrap_or_default();

        match status {
            IntakeStatus::Deficient | IntakeStatus::Low => result.deficit.push(id.clone()),
            IntakeStatus::Excessive => result.excess.push(id.clone()),
            IntakeStatus::Adequate | IntakeStatus::Optimal => result.balanced.push(id.clone()),
        }

        result.statuses.push(NutrientStatus {
            nutrient_id: id.clone(),
            current,
            unit: nutrient.unit.clone(),
            target,
            percentage,
            status,
            trend: trend_of(&history, trend_config),
            history,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::types::IntakeRecord;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[rstest]
    #[case(0.0, IntakeStatus::Deficient)]
    #[case(29.0, IntakeStatus::Deficient)]
    #[case(30.0, IntakeStatus::Low)]
    #[case(69.0, IntakeStatus::Low)]
    #[case(70.0, IntakeStatus::Adequate)]
    #[case(89.0, IntakeStatus::Adequate)]
    #[case(90.0, IntakeStatus::Optimal)]
    #[case(150.0, IntakeStatus::Optimal)]
    #[case(151.0, IntakeStatus::Excessive)]
    #[case(400.0, IntakeStatus::Excessive)]
    fn test_status_thresholds(#[case] percentage: f64, #[case] expected: IntakeStatus) {
        assert_eq!(classify(percentage), expected);
    }

    fn series(values: &[f64]) -> Vec<HistoryPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| HistoryPoint {
                date: day(i as u32 + 1),
                value,
            })
            .collect()
    }

    #[test]
    fn test_trend_short_series_is_stable() {
        let config = TrendConfig::default();
        assert_eq!(trend_of(&series(&[10.0, 100.0]), &config), Trend::Stable);
        assert_eq!(trend_of(&[], &config), Trend::Stable);
    }

    #[test]
    fn test_trend_directions() {
        let config = TrendConfig::default();
        assert_eq!(
            trend_of(&series(&[10.0, 10.0, 20.0, 20.0]), &config),
            Trend::Increasing
        );
        assert_eq!(
            trend_of(&series(&[20.0, 20.0, 10.0, 10.0]), &config),
            Trend::Decreasing
        );
        assert_eq!(
            trend_of(&series(&[20.0, 20.0, 21.0, 20.5]), &config),
            Trend::Stable
        );
    }

    #[test]
    fn test_unknown_nutrients_skipped() {
        let records = vec![
            IntakeRecord::new(day(1))
                .with_nutrient("protein", 100.0)
                .with_nutrient("mystery_compound", 42.0),
        ];
        let intake = aggregate(&records, day(1), day(7));
        let mut targets = HashMap::new();
        targets.insert("protein".to_string(), 100.0);
        targets.insert("mystery_compound".to_string(), 10.0);

        let result = classify_intake(
            &intake,
            &targets,
            &NutrientCatalog::builtin(),
            &TrendConfig::default(),
        );
        assert_eq!(result.statuses.len(), 1);
        assert_eq!(result.statuses[0].nutrient_id, "protein");
        assert_eq!(result.statuses[0].percentage, 100.0);
    }

    #[test]
    fn test_bucket_membership() {
        let records = vec![
            IntakeRecord::new(day(1))
                .with_nutrient("protein", 20.0) // 20%
                .with_nutrient("carbs", 130.0) // 65%
                .with_nutrient("fat", 60.0) // 100%
                .with_nutrient("iron", 30.0), // 375%
        ];
        let intake = aggregate(&records, day(1), day(7));
        let targets = HashMap::from([
            ("protein".to_string(), 100.0),
            ("carbs".to_string(), 200.0),
            ("fat".to_string(), 60.0),
            ("iron".to_string(), 8.0),
        ]);
        let result = classify_intake(
            &intake,
            &targets,
            &NutrientCatalog::builtin(),
            &TrendConfig::default(),
        );
        assert_eq!(result.deficit, vec!["carbs", "protein"]);
        assert_eq!(result.excess, vec!["iron"]);
        assert_eq!(result.balanced, vec!["fat"]);
    }
}
