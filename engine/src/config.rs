//! Configuration management for the analysis engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NI__)

use crate::error::EngineResult;
use nutrition_insights_shared::{NutrientCatalog, TrendConfig, DEFAULT_MIN_COVERAGE};
use serde::{Deserialize, Serialize};
use std::env;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Nutrient catalog source
///
/// The catalog is a versionable data table; pointing `path` at a JSON file
/// overrides the built-in reference data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

/// Analysis tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Relative change between history halves that counts as a trend move
    pub trend_threshold: f64,
    /// Minimum history points before a trend is called
    pub trend_min_points: usize,
    /// Distinct nutrients needed to avoid the score coverage penalty
    pub min_coverage: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.10,
            trend_min_points: 4,
            min_coverage: DEFAULT_MIN_COVERAGE,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NI__ prefix
    ///    e.g., NI__ANALYSIS__MIN_COVERAGE=8 sets analysis.min_coverage
    pub fn load() -> EngineResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&EngineConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix("NI").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Resolve the nutrient catalog: the configured JSON file if set,
    /// otherwise the built-in reference table.
    pub fn load_catalog(&self) -> EngineResult<NutrientCatalog> {
        match &self.catalog.path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("reading catalog file {path}: {e}"))?;
                Ok(NutrientCatalog::from_json(&json)?)
            }
            None => Ok(NutrientCatalog::builtin()),
        }
    }

    pub fn trend_config(&self) -> TrendConfig {
        TrendConfig {
            threshold: self.analysis.trend_threshold,
            min_points: self.analysis.trend_min_points,
        }
    }
}
