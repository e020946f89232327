//! Engine error handling
//!
//! Data problems never surface here; per the analysis contract they degrade
//! to smaller outputs inside the pure core. Errors are reserved for the
//! collaborator boundary: providers, configuration and catalog loading.

use nutrition_insights_shared::CatalogError;
use thiserror::Error;

/// Engine-level error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("profile provider error: {0}")]
    ProfileProvider(String),

    #[error("history provider error: {0}")]
    HistoryProvider(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("catalog error")]
    Catalog(#[from] CatalogError),

    #[error("configuration error")]
    Config(#[from] config::ConfigError),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
