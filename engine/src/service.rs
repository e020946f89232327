//! Analysis service - orchestrates the pure pipeline
//!
//! Awaits the two external collaborators, then runs the synchronous analysis
//! over in-memory values. Missing profile or empty history is an expected
//! steady state for new users and yields a well-formed empty report.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::providers::{HistoryProvider, ProfileProvider};
use chrono::{NaiveDate, Utc};
use nutrition_insights_shared::{
    aggregate, calculate_score, calculate_targets, check_balance, classify_intake, scan_allergens,
    score_diversity, synthesize, MacroBalance, NutrientCatalog, NutrientStatus, Recommendation,
    RecommendationContext, TrendConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Result of one analysis run for a (user, date range)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub statuses: Vec<NutrientStatus>,
    pub recommendations: Vec<Recommendation>,
    /// Normalized 0-100 diet-quality score
    pub score: u32,
    /// Nutrient ids classified deficient or low
    pub deficit: Vec<String>,
    /// Nutrient ids classified excessive
    pub excess: Vec<String>,
    /// Nutrient ids classified adequate or optimal
    pub balanced: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_balance: Option<MacroBalance>,
    /// 0-10 dietary variety rating
    pub diversity_score: u32,
}

impl AnalysisReport {
    /// The well-formed zero result for users with no profile or no data yet
    pub fn empty() -> Self {
        Self {
            statuses: Vec::new(),
            recommendations: Vec::new(),
            score: 0,
            deficit: Vec::new(),
            excess: Vec::new(),
            balanced: Vec::new(),
            macro_balance: None,
            diversity_score: 0,
        }
    }
}

/// Analysis service wiring providers, catalog and tuning together
pub struct AnalysisService {
    profiles: Arc<dyn ProfileProvider>,
    history: Arc<dyn HistoryProvider>,
    catalog: NutrientCatalog,
    trend: TrendConfig,
    min_coverage: usize,
}

impl AnalysisService {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        history: Arc<dyn HistoryProvider>,
        catalog: NutrientCatalog,
        config: &EngineConfig,
    ) -> Self {
        Self {
            profiles,
            history,
            catalog,
            trend: config.trend_config(),
            min_coverage: config.analysis.min_coverage,
        }
    }

    /// Convenience constructor with the built-in catalog and default tuning
    pub fn with_defaults(
        profiles: Arc<dyn ProfileProvider>,
        history: Arc<dyn HistoryProvider>,
    ) -> Self {
        Self::new(
            profiles,
            history,
            NutrientCatalog::builtin(),
            &EngineConfig::default(),
        )
    }

    /// Run the full analysis for a user over `[start, end]` (inclusive).
    #[instrument(skip_all, fields(%user_id, %start, %end))]
    pub async fn analyze(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<AnalysisReport> {
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }

        let Some(profile) = self.profiles.profile(user_id).await? else {
            debug!("no profile on record, returning empty report");
            return Ok(AnalysisReport::empty());
        };

        let records = self.history.records(user_id, start, end).await?;
        if records.is_empty() {
            debug!("no intake records in window, returning empty report");
            return Ok(AnalysisReport::empty());
        }
        debug!(record_count = records.len(), "running analysis");

        let targets = calculate_targets(&profile, &self.catalog);
        let intake = aggregate(&records, start, end);
        let classified = classify_intake(&intake, &targets, &self.catalog, &self.trend);
        let balance = check_balance(&classified);
        let diversity = score_diversity(&records);
        let allergen_hits = scan_allergens(&records, &profile.allergies);
        let score = calculate_score(
            &classified.statuses,
            balance,
            &self.catalog,
            self.min_coverage,
        );
        let recommendations = synthesize(&RecommendationContext {
            classified: &classified,
            balance,
            diversity: &diversity,
            allergen_hits: &allergen_hits,
            profile: &profile,
            catalog: &self.catalog,
            now: Utc::now(),
        });

        Ok(AnalysisReport {
            statuses: classified.statuses,
            recommendations,
            score,
            deficit: classified.deficit,
            excess: classified.excess,
            balanced: classified.balanced,
            macro_balance: balance,
            diversity_score: diversity.score,
        })
    }
}
