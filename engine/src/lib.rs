//! Nutrition Insights analysis engine
//!
//! Async orchestration around the pure core in `nutrition-insights-shared`:
//! provider traits for the external profile and history collaborators, the
//! `analyze` operation, configuration loading and a caller-owned result
//! cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod providers;
pub mod service;

pub use cache::AnalysisCache;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use providers::{
    HistoryProvider, InMemoryHistoryProvider, InMemoryProfileProvider, ProfileProvider,
};
pub use service::{AnalysisReport, AnalysisService};
