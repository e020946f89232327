//! Intake aggregation over a date window
//!
//! Records sharing a calendar day are summed into a per-day total first;
//! the daily average divides by the number of days a nutrient was actually
//! logged, not by the full window length.

use crate::types::{HistoryPoint, IntakeRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Per-nutrient aggregation result for an analysis window
#[derive(Debug, Clone, Default)]
pub struct AggregatedIntake {
    /// Nutrient id -> mean of per-day summed intake across logged days
    pub daily_averages: HashMap<String, f64>,
    /// Nutrient id -> per-day totals, ascending by date
    pub history: HashMap<String, Vec<HistoryPoint>>,
}

impl AggregatedIntake {
    /// Number of distinct nutrients seen in the window
    pub fn coverage(&self) -> usize {
        self.daily_averages.len()
    }
}

/// Aggregate records falling inside `[start, end]` (inclusive).
///
/// Non-finite amounts are skipped; records outside the window are ignored.
pub fn aggregate(records: &[IntakeRecord], start: NaiveDate, end: NaiveDate) -> AggregatedIntake {
    // nutrient id -> date -> summed amount for that day
    let mut per_day: HashMap<String, BTreeMap<NaiveDate, f64>> = HashMap::new();

    for record in records {
        if record.date < start || record.date > end {
            continue;
        }
        for (id, amount) in &record.nutrients {
            if !amount.is_finite() {
                continue;
            }
            *per_day
                .entry(id.clone())
                .or_default()
                .entry(record.date)
                .or_insert(0.0) += amount;
        }
    }

    let mut daily_averages = HashMap::new();
    let mut history = HashMap::new();

    for (id, days) in per_day {
        let total: f64 = days.values().sum();
        daily_averages.insert(id.clone(), total / days.len() as f64);
        history.insert(
            id,
            days.into_iter()
                .map(|(date, value)| HistoryPoint { date, value })
                .collect(),
        );
    }

    AggregatedIntake {
        daily_averages,
        history,
    }
}
