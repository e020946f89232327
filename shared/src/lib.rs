//! Nutrition Insights shared library
//!
//! Pure analysis core: personalized target derivation, intake aggregation,
//! status classification, balance/diversity/allergen checks, diet-quality
//! scoring and recommendation synthesis. Every function here is a pure,
//! synchronous computation over in-memory values; all I/O lives in the
//! engine crate.

pub mod aggregate;
pub mod allergens;
pub mod balance;
pub mod catalog;
pub mod diversity;
pub mod recommend;
pub mod score;
pub mod status;
pub mod targets;
pub mod types;

pub use aggregate::{aggregate, AggregatedIntake};
pub use allergens::scan_allergens;
pub use balance::{check_balance, MacroBalance, MacroShares};
pub use catalog::{CatalogError, DailyValue, Nutrient, NutrientCatalog, NutrientCategory};
pub use diversity::{score_diversity, DiversityBreakdown};
pub use recommend::{synthesize, RecommendationContext};
pub use score::{calculate_score, DEFAULT_MIN_COVERAGE};
pub use status::{classify, classify_intake, ClassifiedIntake, TrendConfig};
pub use targets::calculate_targets;
pub use types::{
    ActivityLevel, EvidenceLevel, HistoryPoint, IntakeRecord, IntakeStatus, NutrientStatus,
    Recommendation, RecommendationKind, Severity, Sex, Trend, UserProfile,
};
