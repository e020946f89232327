//! Nutrient reference catalog
//!
//! Static reference data: for each nutrient its unit, category, recommended
//! daily-value range, physiological functions, deficiency/excess signs and
//! food sources. The catalog is pure data, never mutated at runtime, and can
//! be shipped as a versioned JSON file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Well-known nutrient ids used throughout the analysis pipeline.
pub const CALORIES: &str = "calories";
pub const PROTEIN: &str = "protein";
pub const CARBS: &str = "carbs";
pub const FAT: &str = "fat";
pub const FIBER: &str = "fiber";
pub const WATER: &str = "water";
pub const FOLATE: &str = "folate";
pub const IRON: &str = "iron";
pub const CALCIUM: &str = "calcium";

/// Broad nutrient grouping, used for score weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientCategory {
    Macronutrient,
    Vitamin,
    Mineral,
    Other,
}

/// Recommended daily-value range for a nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    pub default: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl DailyValue {
    pub fn new(min: Option<f64>, default: f64, max: Option<f64>) -> Self {
        Self { min, default, max }
    }
}

/// Catalog validation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("nutrient '{0}': default daily value must be positive")]
    NonPositiveDefault(String),

    #[error("nutrient '{0}': daily value range must satisfy min < default < max")]
    InvalidRange(String),

    #[error("duplicate nutrient id '{0}'")]
    DuplicateId(String),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single catalog entry, immutable reference data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    pub id: String,
    pub name: String,
    pub category: NutrientCategory,
    pub unit: String,
    pub daily_value: DailyValue,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub deficiency_signs: Vec<String>,
    #[serde(default)]
    pub excess_signs: Vec<String>,
    #[serde(default)]
    pub food_sources: Vec<String>,
}

impl Nutrient {
    /// Check the daily-value invariants: `default > 0`, and when both bounds
    /// are present, `min < default < max`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let dv = &self.daily_value;
        if dv.default <= 0.0 {
            return Err(CatalogError::NonPositiveDefault(self.id.clone()));
        }
        if let (Some(min), Some(max)) = (dv.min, dv.max) {
            if !(min < dv.default && dv.default < max) {
                return Err(CatalogError::InvalidRange(self.id.clone()));
            }
        }
        Ok(())
    }
}

/// The nutrient reference table
///
/// Lookup is a linear scan; the catalog holds a few dozen entries, so a map
/// keyed by id is not worth the indirection yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientCatalog {
    nutrients: Vec<Nutrient>,
}

impl NutrientCatalog {
    /// Build a catalog from entries, validating every daily-value range and
    /// rejecting duplicate ids.
    pub fn new(nutrients: Vec<Nutrient>) -> Result<Self, CatalogError> {
        for (i, n) in nutrients.iter().enumerate() {
            n.validate()?;
            if nutrients[..i].iter().any(|other| other.id == n.id) {
                return Err(CatalogError::DuplicateId(n.id.clone()));
            }
        }
        Ok(Self { nutrients })
    }

    /// Load a catalog from its JSON representation (an array of entries)
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let nutrients: Vec<Nutrient> = serde_json::from_str(json)?;
        Self::new(nutrients)
    }

    pub fn get(&self, id: &str) -> Option<&Nutrient> {
        self.nutrients.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nutrient> {
        self.nutrients.iter()
    }

    pub fn len(&self) -> usize {
        self.nutrients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }

    /// The built-in reference table
    pub fn builtin() -> Self {
        let nutrients = vec![
            entry(
                CALORIES,
                "Calories",
                NutrientCategory::Other,
                "kcal",
                DailyValue::new(Some(1200.0), 2000.0, Some(4000.0)),
                &["Energy supply"],
                &["Fatigue", "Muscle loss"],
                &["Weight gain"],
                &[],
            ),
            entry(
                PROTEIN,
                "Protein",
                NutrientCategory::Macronutrient,
                "g",
                DailyValue::new(Some(25.0), 50.0, Some(250.0)),
                &["Muscle repair", "Enzyme and hormone synthesis"],
                &["Muscle loss", "Slow wound healing", "Brittle hair"],
                &["Kidney strain", "Dehydration"],
                &["chicken breast", "eggs", "greek yogurt", "lentils", "salmon", "tofu"],
            ),
            entry(
                CARBS,
                "Carbohydrates",
                NutrientCategory::Macronutrient,
                "g",
                DailyValue::new(Some(100.0), 275.0, Some(500.0)),
                &["Primary energy source", "Glycogen replenishment"],
                &["Low energy", "Poor concentration"],
                &["Blood sugar spikes", "Weight gain"],
                &["oats", "brown rice", "whole grain bread", "sweet potato", "quinoa"],
            ),
            entry(
                FAT,
                "Fat",
                NutrientCategory::Macronutrient,
                "g",
                DailyValue::new(Some(30.0), 78.0, Some(160.0)),
                &["Hormone production", "Fat-soluble vitamin absorption"],
                &["Dry skin", "Hormonal imbalance"],
                &["Weight gain", "Elevated cholesterol"],
                &["olive oil", "avocado", "nuts", "fatty fish"],
            ),
            entry(
                FIBER,
                "Dietary fiber",
                NutrientCategory::Other,
                "g",
                DailyValue::new(Some(15.0), 28.0, Some(70.0)),
                &["Digestive health", "Blood sugar regulation"],
                &["Constipation", "Blood sugar swings"],
                &["Bloating"],
                &["beans", "oats", "berries", "broccoli", "chia seeds"],
            ),
            entry(
                WATER,
                "Water",
                NutrientCategory::Other,
                "ml",
                DailyValue::new(Some(1200.0), 2000.0, Some(6000.0)),
                &["Hydration", "Temperature regulation"],
                &["Headache", "Fatigue", "Dark urine"],
                &["Electrolyte dilution"],
                &["water", "herbal tea", "watermelon", "cucumber"],
            ),
            entry(
                "vitamin_a",
                "Vitamin A",
                NutrientCategory::Vitamin,
                "µg",
                DailyValue::new(Some(300.0), 900.0, Some(3000.0)),
                &["Vision", "Immune function"],
                &["Night blindness", "Dry eyes"],
                &["Liver damage", "Headaches"],
                &["carrots", "sweet potato", "spinach", "liver"],
            ),
            entry(
                "vitamin_c",
                "Vitamin C",
                NutrientCategory::Vitamin,
                "mg",
                DailyValue::new(Some(30.0), 90.0, Some(2000.0)),
                &["Collagen synthesis", "Antioxidant defence", "Iron absorption"],
                &["Slow wound healing", "Bleeding gums", "Frequent infections"],
                &["Digestive upset", "Kidney stones"],
                &["oranges", "bell peppers", "kiwi", "strawberries", "broccoli"],
            ),
            entry(
                "vitamin_d",
                "Vitamin D",
                NutrientCategory::Vitamin,
                "µg",
                DailyValue::new(Some(10.0), 20.0, Some(100.0)),
                &["Calcium absorption", "Bone health", "Immune modulation"],
                &["Bone pain", "Low mood", "Muscle weakness"],
                &["Hypercalcemia", "Nausea"],
                &["fatty fish", "egg yolks", "fortified milk", "mushrooms"],
            ),
            entry(
                "vitamin_e",
                "Vitamin E",
                NutrientCategory::Vitamin,
                "mg",
                DailyValue::new(Some(6.0), 15.0, Some(1000.0)),
                &["Antioxidant defence", "Cell membrane protection"],
                &["Muscle weakness", "Vision problems"],
                &["Impaired clotting"],
                &["almonds", "sunflower seeds", "spinach", "olive oil"],
            ),
            entry(
                "vitamin_k",
                "Vitamin K",
                NutrientCategory::Vitamin,
                "µg",
                DailyValue::new(Some(40.0), 120.0, Some(1000.0)),
                &["Blood clotting", "Bone metabolism"],
                &["Easy bruising", "Bleeding"],
                &[],
                &["kale", "spinach", "broccoli", "brussels sprouts"],
            ),
            entry(
                "vitamin_b6",
                "Vitamin B6",
                NutrientCategory::Vitamin,
                "mg",
                DailyValue::new(Some(0.5), 1.7, Some(100.0)),
                &["Protein metabolism", "Neurotransmitter synthesis"],
                &["Irritability", "Anemia"],
                &["Nerve damage at very high doses"],
                &["chickpeas", "salmon", "potatoes", "bananas"],
            ),
            entry(
                FOLATE,
                "Folate (B9)",
                NutrientCategory::Vitamin,
                "µg",
                DailyValue::new(Some(150.0), 400.0, Some(1000.0)),
                &["DNA synthesis", "Red blood cell formation", "Fetal development"],
                &["Fatigue", "Anemia", "Mouth sores"],
                &["Can mask B12 deficiency"],
                &["lentils", "spinach", "asparagus", "avocado", "fortified grains"],
            ),
            entry(
                "vitamin_b12",
                "Vitamin B12",
                NutrientCategory::Vitamin,
                "µg",
                DailyValue::new(Some(1.0), 2.4, Some(100.0)),
                &["Nerve function", "Red blood cell formation"],
                &["Fatigue", "Numbness", "Memory problems"],
                &[],
                &["beef", "clams", "eggs", "fortified nutritional yeast"],
            ),
            entry(
                CALCIUM,
                "Calcium",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(500.0), 1000.0, Some(2500.0)),
                &["Bone and teeth structure", "Muscle contraction"],
                &["Muscle cramps", "Brittle nails", "Bone loss"],
                &["Kidney stones", "Impaired iron absorption"],
                &["dairy", "sardines", "kale", "fortified plant milk", "tofu"],
            ),
            entry(
                IRON,
                "Iron",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(5.0), 8.0, Some(45.0)),
                &["Oxygen transport", "Energy metabolism"],
                &["Fatigue", "Pale skin", "Shortness of breath"],
                &["Constipation", "Organ damage at high doses"],
                &["red meat", "lentils", "spinach", "pumpkin seeds", "fortified cereal"],
            ),
            entry(
                "magnesium",
                "Magnesium",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(200.0), 420.0, Some(750.0)),
                &["Muscle and nerve function", "Energy production"],
                &["Muscle cramps", "Poor sleep", "Irritability"],
                &["Diarrhea"],
                &["pumpkin seeds", "almonds", "spinach", "dark chocolate"],
            ),
            entry(
                "zinc",
                "Zinc",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(5.0), 11.0, Some(40.0)),
                &["Immune function", "Wound healing", "Taste perception"],
                &["Frequent infections", "Hair loss", "Loss of taste"],
                &["Nausea", "Copper deficiency"],
                &["oysters", "beef", "pumpkin seeds", "chickpeas"],
            ),
            entry(
                "potassium",
                "Potassium",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(2000.0), 3400.0, Some(6000.0)),
                &["Fluid balance", "Blood pressure regulation"],
                &["Muscle weakness", "Irregular heartbeat"],
                &["Hyperkalemia in kidney disease"],
                &["bananas", "potatoes", "beans", "spinach", "coconut water"],
            ),
            entry(
                "sodium",
                "Sodium",
                NutrientCategory::Mineral,
                "mg",
                DailyValue::new(Some(500.0), 1500.0, Some(2300.0)),
                &["Fluid balance", "Nerve transmission"],
                &["Muscle cramps", "Confusion"],
                &["High blood pressure", "Fluid retention"],
                &["table salt", "processed foods", "pickles"],
            ),
        ];

        // Built-in data is validated in tests; construction cannot fail here.
        Self { nutrients }
    }
}

impl Default for NutrientCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry(
    id: &str,
    name: &str,
    category: NutrientCategory,
    unit: &str,
    daily_value: DailyValue,
    functions: &[&str],
    deficiency_signs: &[&str],
    excess_signs: &[&str],
    food_sources: &[&str],
) -> Nutrient {
    let own = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
    Nutrient {
        id: id.to_string(),
        name: name.to_string(),
        category,
        unit: unit.to_string(),
        daily_value,
        functions: own(functions),
        deficiency_signs: own(deficiency_signs),
        excess_signs: own(excess_signs),
        food_sources: own(food_sources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = NutrientCatalog::builtin();
        assert!(catalog.len() >= 18);
        for nutrient in catalog.iter() {
            nutrient.validate().unwrap();
        }
        // No duplicate ids
        NutrientCatalog::new(catalog.iter().cloned().collect()).unwrap();
    }

    #[test]
    fn test_lookup() {
        let catalog = NutrientCatalog::builtin();
        let iron = catalog.get(IRON).unwrap();
        assert_eq!(iron.unit, "mg");
        assert_eq!(iron.category, NutrientCategory::Mineral);
        assert!(catalog.get("unobtainium").is_none());
    }

    #[test]
    fn test_rejects_non_positive_default() {
        let mut nutrient = NutrientCatalog::builtin().get(PROTEIN).unwrap().clone();
        nutrient.daily_value.default = 0.0;
        assert!(matches!(
            nutrient.validate(),
            Err(CatalogError::NonPositiveDefault(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut nutrient = NutrientCatalog::builtin().get(PROTEIN).unwrap().clone();
        nutrient.daily_value.min = Some(300.0);
        assert!(matches!(
            nutrient.validate(),
            Err(CatalogError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = NutrientCatalog::builtin();
        let json = serde_json::to_string(catalog.iter().collect::<Vec<_>>().as_slice()).unwrap();
        let loaded = NutrientCatalog::from_json(&json).unwrap();
        assert_eq!(loaded.len(), catalog.len());
        assert_eq!(loaded.get(CALCIUM).unwrap().name, "Calcium");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let nutrient = NutrientCatalog::builtin().get(IRON).unwrap().clone();
        let result = NutrientCatalog::new(vec![nutrient.clone(), nutrient]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }
}
