//! Core data model for intake analysis
//!
//! All derived entities here are pure values: an analysis run is a function of
//! (UserProfile, IntakeRecord[], NutrientCatalog) and nothing owns mutable
//! state across calls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use validator::Validate;

// ============================================================================
// User Profile Types
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level for daily energy expenditure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    High,
    /// Very hard exercise or physical job
    Extreme,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }
}

/// User profile data needed for target derivation
///
/// Read-only input produced by the profile collaborator. Goals, health
/// conditions and preferences are free-form lowercase tags (`weight_loss`,
/// `muscle_gain`, `pregnancy`, `low_carb`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    pub sex: Sex,
    /// Current weight in kilograms (stored in SI)
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
    /// Height in centimeters (stored in SI)
    #[validate(range(min = 50.0, max = 280.0))]
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl UserProfile {
    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g.eq_ignore_ascii_case(goal))
    }

    pub fn has_preference(&self, pref: &str) -> bool {
        self.dietary_preferences
            .iter()
            .any(|p| p.eq_ignore_ascii_case(pref))
    }

    /// True if any health condition contains the given fragment
    /// (case-insensitive), e.g. `pregnan` matches "pregnancy" and "pregnant".
    pub fn has_condition_containing(&self, fragment: &str) -> bool {
        let needle = fragment.to_lowercase();
        self.health_conditions
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
    }
}

// ============================================================================
// Intake Records
// ============================================================================

/// A single logged intake entry (one meal or food item)
///
/// Multiple records may exist for the same calendar day; aggregation sums
/// same-day values before averaging across days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Calendar day the intake belongs to
    pub date: NaiveDate,
    /// Nutrient id -> amount in the nutrient's catalog unit.
    /// Non-numeric values in the source payload are dropped on deserialize.
    #[serde(default, deserialize_with = "numeric_map")]
    pub nutrients: HashMap<String, f64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Optional meal context tag (breakfast, lunch, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,
}

impl IntakeRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            nutrients: HashMap::new(),
            ingredients: Vec::new(),
            allergens: Vec::new(),
            meal: None,
        }
    }

    pub fn with_nutrient(mut self, id: &str, amount: f64) -> Self {
        self.nutrients.insert(id.to_string(), amount);
        self
    }

    pub fn with_ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = ingredients.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Deserialize a nutrient map, silently skipping non-numeric values.
///
/// Food-logging payloads mix metadata into the nutrient object; a malformed
/// field is dropped rather than failing the whole record.
fn numeric_map<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, serde_json::Value> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| v.as_f64().filter(|n| n.is_finite()).map(|n| (k, n)))
        .collect())
}

// ============================================================================
// Derived Analysis Types
// ============================================================================

/// Categorical intake status derived from percentage-of-target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    Deficient,
    Low,
    Adequate,
    Optimal,
    Excessive,
}

/// Direction of recent intake relative to the earlier part of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Decreasing,
    Stable,
    Increasing,
}

/// One point in a per-day intake series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Per-nutrient assessment against the personalized target
///
/// Recomputed on every analysis call, never persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientStatus {
    pub nutrient_id: String,
    /// Daily average over the days the nutrient was logged
    pub current: f64,
    pub unit: String,
    pub target: f64,
    /// current / target * 100
    pub percentage: f64,
    pub status: IntakeStatus,
    pub trend: Trend,
    /// Per-day summed intake, ascending by date
    pub history: Vec<HistoryPoint>,
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    General,
    Deficiency,
    Excess,
    Balance,
    HealthCondition,
    GoalSpecific,
    Allergy,
}

impl RecommendationKind {
    /// Stable tag used in generated recommendation ids
    pub fn tag(&self) -> &'static str {
        match self {
            RecommendationKind::General => "general",
            RecommendationKind::Deficiency => "deficiency",
            RecommendationKind::Excess => "excess",
            RecommendationKind::Balance => "balance",
            RecommendationKind::HealthCondition => "health_condition",
            RecommendationKind::GoalSpecific => "goal_specific",
            RecommendationKind::Allergy => "allergy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

/// Qualitative confidence in the rule behind a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    Low,
    Medium,
    High,
}

/// An actionable, explainable recommendation produced by an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_nutrients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meal_suggestions: Vec<String>,
    pub evidence_level: EvidenceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
