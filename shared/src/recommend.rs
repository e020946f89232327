//! Recommendation synthesis
//!
//! Terminal consumer of the analysis pipeline: turns statuses, balance,
//! diversity and allergen results into a ranked, deduplicated list of
//! actionable recommendations. Priority order is deficiencies, excesses,
//! macro balance, diversity, allergies, then goal/condition-specific rules.

use crate::balance::MacroBalance;
use crate::catalog::{NutrientCatalog, CARBS, FAT, FOLATE, IRON, PROTEIN};
use crate::diversity::{DiversityBreakdown, CATEGORY_COUNT};
use crate::status::ClassifiedIntake;
use crate::types::{
    EvidenceLevel, NutrientStatus, Recommendation, RecommendationKind, Severity, UserProfile,
};
use chrono::{DateTime, Utc};

/// Diversity scores below this trigger a variety recommendation
const DIVERSITY_THRESHOLD: u32 = 7;
const MAX_FOOD_SUGGESTIONS: usize = 5;
const MAX_MEAL_SUGGESTIONS: usize = 3;

/// Everything the synthesizer consumes, borrowed from the analysis run
pub struct RecommendationContext<'a> {
    pub classified: &'a ClassifiedIntake,
    pub balance: Option<MacroBalance>,
    pub diversity: &'a DiversityBreakdown,
    pub allergen_hits: &'a [String],
    pub profile: &'a UserProfile,
    pub catalog: &'a NutrientCatalog,
    pub now: DateTime<Utc>,
}

fn make_id(kind: RecommendationKind, nutrient: Option<&str>, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        kind.tag(),
        nutrient.unwrap_or("general"),
        now.timestamp_millis()
    )
}

/// Generate the full, ordered recommendation batch.
///
/// Each nutrient appears in at most one status bucket, so no nutrient+kind
/// pair repeats within a batch.
pub fn synthesize(ctx: &RecommendationContext) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for id in &ctx.classified.deficit {
        if let Some(status) = ctx.classified.status_of(id) {
            out.push(deficiency_recommendation(ctx, status));
        }
    }

    for id in &ctx.classified.excess {
        if let Some(status) = ctx.classified.status_of(id) {
            out.push(excess_recommendation(ctx, status));
        }
    }

    if let Some(balance) = ctx.balance {
        if balance != MacroBalance::Balanced {
            out.push(balance_recommendation(ctx, balance));
        }
    }

    if ctx.diversity.score < DIVERSITY_THRESHOLD {
        out.push(diversity_recommendation(ctx));
    }

    if !ctx.allergen_hits.is_empty() {
        out.push(allergy_recommendation(ctx));
    }

    out.extend(goal_recommendations(ctx));
    out.extend(condition_recommendations(ctx));

    out
}

fn deficiency_recommendation(ctx: &RecommendationContext, status: &NutrientStatus) -> Recommendation {
    let nutrient = ctx.catalog.get(&status.nutrient_id);
    let name = nutrient.map_or(status.nutrient_id.as_str(), |n| n.name.as_str());
    let shortfall = (status.target - status.current).max(0.0);

    let severity = if status.percentage < 50.0 {
        Severity::Alert
    } else {
        Severity::Warning
    };

    let food_suggestions: Vec<String> = nutrient
        .map(|n| n.food_sources.iter().take(MAX_FOOD_SUGGESTIONS).cloned().collect())
        .unwrap_or_default();
    let meal_suggestions: Vec<String> = food_suggestions
        .iter()
        .take(MAX_MEAL_SUGGESTIONS)
        .map(|food| format!("Add {} to one of today's meals", food))
        .collect();
    let reason = nutrient
        .filter(|n| !n.deficiency_signs.is_empty())
        .map(|n| format!("Low {} can show up as: {}", n.name, n.deficiency_signs.join(", ")));

    Recommendation {
        id: make_id(RecommendationKind::Deficiency, Some(&status.nutrient_id), ctx.now),
        kind: RecommendationKind::Deficiency,
        title: format!("Increase your {} intake", name),
        description: format!(
            "Your {} intake averages {:.1} {} per day, {:.0}% of your {:.1} {} target. \
             You are short about {:.1} {} per day.",
            name,
            status.current,
            status.unit,
            status.percentage,
            status.target,
            status.unit,
            shortfall,
            status.unit,
        ),
        severity,
        nutrient_id: Some(status.nutrient_id.clone()),
        related_nutrients: Vec::new(),
        food_suggestions,
        meal_suggestions,
        evidence_level: EvidenceLevel::High,
        reason,
        created_at: ctx.now,
    }
}

fn excess_recommendation(ctx: &RecommendationContext, status: &NutrientStatus) -> Recommendation {
    let nutrient = ctx.catalog.get(&status.nutrient_id);
    let name = nutrient.map_or(status.nutrient_id.as_str(), |n| n.name.as_str());

    let severity = if status.percentage > 200.0 {
        Severity::Alert
    } else {
        Severity::Warning
    };

    // Typical sources double as the foods to cut back on.
    let food_suggestions: Vec<String> = nutrient
        .map(|n| {
            n.food_sources
                .iter()
                .take(MAX_FOOD_SUGGESTIONS)
                .map(|food| format!("Limit {}", food))
                .collect()
        })
        .unwrap_or_default();
    let reason = nutrient
        .filter(|n| !n.excess_signs.is_empty())
        .map(|n| format!("Too much {} can show up as: {}", n.name, n.excess_signs.join(", ")));

    Recommendation {
        id: make_id(RecommendationKind::Excess, Some(&status.nutrient_id), ctx.now),
        kind: RecommendationKind::Excess,
        title: format!("Reduce your {} intake", name),
        description: format!(
            "Your {} intake averages {:.1} {} per day, {:.0}% of your {:.1} {} target. \
             Cut back towards the target.",
            name, status.current, status.unit, status.percentage, status.target, status.unit,
        ),
        severity,
        nutrient_id: Some(status.nutrient_id.clone()),
        related_nutrients: Vec::new(),
        food_suggestions,
        meal_suggestions: Vec::new(),
        evidence_level: EvidenceLevel::High,
        reason,
        created_at: ctx.now,
    }
}

fn balance_recommendation(ctx: &RecommendationContext, balance: MacroBalance) -> Recommendation {
    let (title, description) = match balance {
        MacroBalance::CarbHeavy => (
            "Rebalance towards protein and fat",
            "Carbohydrates supply more than 60% of your calories. Swap some refined \
             carbs for protein and healthy fats to even out your energy sources.",
        ),
        MacroBalance::FatHeavy => (
            "Rebalance away from fat",
            "Fat supplies more than 40% of your calories. Favor lean protein and \
             complex carbohydrates in your next meals.",
        ),
        MacroBalance::ProteinHeavy => (
            "Rebalance away from protein",
            "Protein supplies more than 35% of your calories. Add whole grains, \
             fruit and vegetables to round out your meals.",
        ),
        // Balanced never reaches here; synthesize() filters it.
        MacroBalance::Balanced => ("", ""),
    };

    Recommendation {
        id: make_id(RecommendationKind::Balance, None, ctx.now),
        kind: RecommendationKind::Balance,
        title: title.to_string(),
        description: description.to_string(),
        severity: Severity::Warning,
        nutrient_id: None,
        related_nutrients: vec![PROTEIN.to_string(), CARBS.to_string(), FAT.to_string()],
        food_suggestions: Vec::new(),
        meal_suggestions: Vec::new(),
        evidence_level: EvidenceLevel::Medium,
        reason: None,
        created_at: ctx.now,
    }
}

fn diversity_recommendation(ctx: &RecommendationContext) -> Recommendation {
    let missing = CATEGORY_COUNT.saturating_sub(ctx.diversity.categories.len());
    Recommendation {
        id: make_id(RecommendationKind::General, None, ctx.now),
        kind: RecommendationKind::General,
        title: "Add more variety to your diet".to_string(),
        description: format!(
            "Your diversity score is {}/10: {} of {} food categories and {} distinct \
             ingredients logged. Try foods from {} more categor{} this week.",
            ctx.diversity.score,
            ctx.diversity.categories.len(),
            CATEGORY_COUNT,
            ctx.diversity.unique_ingredients,
            missing,
            if missing == 1 { "y" } else { "ies" },
        ),
        severity: Severity::Info,
        nutrient_id: None,
        related_nutrients: Vec::new(),
        food_suggestions: Vec::new(),
        meal_suggestions: Vec::new(),
        evidence_level: EvidenceLevel::Medium,
        reason: None,
        created_at: ctx.now,
    }
}

fn allergy_recommendation(ctx: &RecommendationContext) -> Recommendation {
    Recommendation {
        id: make_id(RecommendationKind::Allergy, None, ctx.now),
        kind: RecommendationKind::Allergy,
        title: "Logged foods match your declared allergies".to_string(),
        description: format!(
            "These logged items match your allergy list: {}. Double-check them and \
             consider alternatives.",
            ctx.allergen_hits.join(", "),
        ),
        severity: Severity::Alert,
        nutrient_id: None,
        related_nutrients: Vec::new(),
        food_suggestions: Vec::new(),
        meal_suggestions: Vec::new(),
        evidence_level: EvidenceLevel::High,
        reason: Some(format!("Declared allergies: {}", ctx.profile.allergies.join(", "))),
        created_at: ctx.now,
    }
}

fn goal_recommendations(ctx: &RecommendationContext) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let deficit = &ctx.classified.deficit;

    if ctx.profile.has_goal("muscle_gain") && deficit.iter().any(|id| id == PROTEIN) {
        out.push(goal_recommendation(
            ctx,
            PROTEIN,
            "Protein is holding back your muscle gain goal",
            "Your protein intake is below target while you are training for muscle \
             gain. Plan a protein source into every meal.",
        ));
    }

    if ctx.profile.has_goal("endurance") && deficit.iter().any(|id| id == CARBS) {
        out.push(goal_recommendation(
            ctx,
            CARBS,
            "Carbohydrates are low for your endurance goal",
            "Endurance training relies on carbohydrate stores; your intake is below \
             target. Add complex carbs around your sessions.",
        ));
    }

    out
}

fn goal_recommendation(
    ctx: &RecommendationContext,
    nutrient_id: &str,
    title: &str,
    description: &str,
) -> Recommendation {
    let food_suggestions = ctx
        .catalog
        .get(nutrient_id)
        .map(|n| n.food_sources.iter().take(MAX_FOOD_SUGGESTIONS).cloned().collect())
        .unwrap_or_default();

    Recommendation {
        id: make_id(RecommendationKind::GoalSpecific, Some(nutrient_id), ctx.now),
        kind: RecommendationKind::GoalSpecific,
        title: title.to_string(),
        description: description.to_string(),
        severity: Severity::Warning,
        nutrient_id: Some(nutrient_id.to_string()),
        related_nutrients: Vec::new(),
        food_suggestions,
        meal_suggestions: Vec::new(),
        evidence_level: EvidenceLevel::Medium,
        reason: Some("Based on your declared goals".to_string()),
        created_at: ctx.now,
    }
}

fn condition_recommendations(ctx: &RecommendationContext) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if ctx.profile.has_condition_containing("pregnan") {
        let critical: Vec<&str> = [FOLATE, IRON]
            .into_iter()
            .filter(|id| ctx.classified.deficit.iter().any(|d| d == id))
            .collect();
        if !critical.is_empty() {
            out.push(Recommendation {
                id: make_id(RecommendationKind::HealthCondition, Some(critical[0]), ctx.now),
                kind: RecommendationKind::HealthCondition,
                title: "Key pregnancy nutrients are below target".to_string(),
                description: format!(
                    "With your raised pregnancy targets, {} {} still below the \
                     recommended intake. Discuss supplementation with your care provider.",
                    critical.join(" and "),
                    if critical.len() == 1 { "is" } else { "are" },
                ),
                severity: Severity::Warning,
                nutrient_id: Some(critical[0].to_string()),
                related_nutrients: critical.iter().map(|s| s.to_string()).collect(),
                food_suggestions: Vec::new(),
                meal_suggestions: Vec::new(),
                evidence_level: EvidenceLevel::High,
                reason: Some("Pregnancy raises folate, iron and calcium needs".to_string()),
                created_at: ctx.now,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::allergens::scan_allergens;
    use crate::balance::check_balance;
    use crate::diversity::score_diversity;
    use crate::status::{classify_intake, TrendConfig};
    use crate::types::{ActivityLevel, IntakeRecord, Sex};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            age: 30,
            sex: Sex::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Moderate,
            goals: vec![],
            health_conditions: vec![],
            dietary_preferences: vec![],
            allergies: vec![],
        }
    }

    struct Fixture {
        classified: ClassifiedIntake,
        balance: Option<MacroBalance>,
        diversity: DiversityBreakdown,
        allergen_hits: Vec<String>,
        profile: UserProfile,
        catalog: NutrientCatalog,
    }

    impl Fixture {
        fn build(records: &[IntakeRecord], targets: HashMap<String, f64>, profile: UserProfile) -> Self {
            let catalog = NutrientCatalog::builtin();
            let intake = aggregate(records, day(1), day(28));
            let classified =
                classify_intake(&intake, &targets, &catalog, &TrendConfig::default());
            let balance = check_balance(&classified);
            let diversity = score_diversity(records);
            let allergen_hits = scan_allergens(records, &profile.allergies);
            Self {
                classified,
                balance,
                diversity,
                allergen_hits,
                profile,
                catalog,
            }
        }

        fn ctx(&self) -> RecommendationContext<'_> {
            RecommendationContext {
                classified: &self.classified,
                balance: self.balance,
                diversity: &self.diversity,
                allergen_hits: &self.allergen_hits,
                profile: &self.profile,
                catalog: &self.catalog,
                now: Utc::now(),
            }
        }
    }

    #[test]
    fn test_deficiency_below_half_is_alert() {
        let records = vec![IntakeRecord::new(day(1)).with_nutrient(PROTEIN, 40.0)];
        let fixture = Fixture::build(
            &records,
            HashMap::from([(PROTEIN.to_string(), 100.0)]),
            profile(),
        );
        let recs = synthesize(&fixture.ctx());

        let deficiency: Vec<_> = recs
            .iter()
            .filter(|r| r.kind == RecommendationKind::Deficiency)
            .collect();
        assert_eq!(deficiency.len(), 1);
        assert_eq!(deficiency[0].severity, Severity::Alert);
        assert_eq!(deficiency[0].nutrient_id.as_deref(), Some(PROTEIN));
        assert!(!deficiency[0].food_suggestions.is_empty());
        assert!(deficiency[0].food_suggestions.len() <= 5);
        assert!(!deficiency[0].meal_suggestions.is_empty());
        assert!(recs.iter().all(|r| r.kind != RecommendationKind::Excess));
    }

    #[test]
    fn test_deficiency_above_half_is_warning() {
        let records = vec![IntakeRecord::new(day(1)).with_nutrient(PROTEIN, 60.0)];
        let fixture = Fixture::build(
            &records,
            HashMap::from([(PROTEIN.to_string(), 100.0)]),
            profile(),
        );
        let recs = synthesize(&fixture.ctx());
        let rec = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::Deficiency)
            .unwrap();
        assert_eq!(rec.severity, Severity::Warning);
        assert!(rec.description.contains("60%"));
    }

    #[test]
    fn test_excess_severity_boundary() {
        let targets = HashMap::from([(IRON.to_string(), 10.0)]);

        let mild = Fixture::build(
            &[IntakeRecord::new(day(1)).with_nutrient(IRON, 18.0)],
            targets.clone(),
            profile(),
        );
        let recs = synthesize(&mild.ctx());
        let rec = recs.iter().find(|r| r.kind == RecommendationKind::Excess).unwrap();
        assert_eq!(rec.severity, Severity::Warning);
        assert!(rec.meal_suggestions.is_empty());

        let severe = Fixture::build(
            &[IntakeRecord::new(day(1)).with_nutrient(IRON, 25.0)],
            targets,
            profile(),
        );
        let recs = synthesize(&severe.ctx());
        let rec = recs.iter().find(|r| r.kind == RecommendationKind::Excess).unwrap();
        assert_eq!(rec.severity, Severity::Alert);
    }

    #[test]
    fn test_no_duplicate_nutrient_kind_pairs() {
        let records = vec![IntakeRecord::new(day(1))
            .with_nutrient(PROTEIN, 10.0)
            .with_nutrient(CARBS, 40.0)
            .with_nutrient(IRON, 50.0)];
        let targets = HashMap::from([
            (PROTEIN.to_string(), 100.0),
            (CARBS.to_string(), 250.0),
            (IRON.to_string(), 10.0),
        ]);
        let fixture = Fixture::build(&records, targets, profile());
        let recs = synthesize(&fixture.ctx());

        let mut seen = std::collections::HashSet::new();
        for rec in &recs {
            assert!(seen.insert((rec.kind, rec.nutrient_id.clone())));
        }
    }

    #[test]
    fn test_balance_recommendation_text_matches_category() {
        let records = vec![IntakeRecord::new(day(1))
            .with_nutrient(PROTEIN, 50.0)
            .with_nutrient(CARBS, 400.0)
            .with_nutrient(FAT, 30.0)];
        let targets = HashMap::from([
            (PROTEIN.to_string(), 100.0),
            (CARBS.to_string(), 250.0),
            (FAT.to_string(), 70.0),
        ]);
        let fixture = Fixture::build(&records, targets, profile());
        assert_eq!(fixture.balance, Some(MacroBalance::CarbHeavy));
        let recs = synthesize(&fixture.ctx());
        let rec = recs.iter().find(|r| r.kind == RecommendationKind::Balance).unwrap();
        assert!(rec.description.contains("Carbohydrates supply more than 60%"));
    }

    #[test]
    fn test_allergy_recommendation_is_alert() {
        let mut p = profile();
        p.allergies = vec!["peanut".to_string()];
        let records = vec![IntakeRecord::new(day(1)).with_ingredients(&["peanut butter"])];
        let fixture = Fixture::build(&records, HashMap::new(), p);
        let recs = synthesize(&fixture.ctx());
        let rec = recs.iter().find(|r| r.kind == RecommendationKind::Allergy).unwrap();
        assert_eq!(rec.severity, Severity::Alert);
        assert!(rec.description.contains("peanut butter"));
    }

    #[test]
    fn test_goal_specific_protein_rule() {
        let mut p = profile();
        p.goals = vec!["muscle_gain".to_string()];
        let records = vec![IntakeRecord::new(day(1)).with_nutrient(PROTEIN, 40.0)];
        let fixture = Fixture::build(
            &records,
            HashMap::from([(PROTEIN.to_string(), 100.0)]),
            p,
        );
        let recs = synthesize(&fixture.ctx());
        let rec = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::GoalSpecific)
            .unwrap();
        assert_eq!(rec.nutrient_id.as_deref(), Some(PROTEIN));
        assert_eq!(rec.evidence_level, EvidenceLevel::Medium);
    }

    #[test]
    fn test_pregnancy_condition_rule() {
        let mut p = profile();
        p.sex = Sex::Female;
        p.age = 28;
        p.health_conditions = vec!["pregnancy".to_string()];
        let records = vec![IntakeRecord::new(day(1)).with_nutrient(FOLATE, 100.0)];
        let fixture = Fixture::build(
            &records,
            HashMap::from([(FOLATE.to_string(), 600.0)]),
            p,
        );
        let recs = synthesize(&fixture.ctx());
        assert!(recs
            .iter()
            .any(|r| r.kind == RecommendationKind::HealthCondition));
    }

    #[test]
    fn test_ordering_deficiency_first() {
        let mut p = profile();
        p.allergies = vec!["peanut".to_string()];
        let records = vec![IntakeRecord::new(day(1))
            .with_nutrient(PROTEIN, 10.0)
            .with_nutrient(IRON, 100.0)
            .with_ingredients(&["peanut butter"])];
        let targets = HashMap::from([
            (PROTEIN.to_string(), 100.0),
            (IRON.to_string(), 10.0),
        ]);
        let fixture = Fixture::build(&records, targets, p);
        let recs = synthesize(&fixture.ctx());
        let kinds: Vec<_> = recs.iter().map(|r| r.kind).collect();
        let deficiency = kinds.iter().position(|k| *k == RecommendationKind::Deficiency);
        let excess = kinds.iter().position(|k| *k == RecommendationKind::Excess);
        let allergy = kinds.iter().position(|k| *k == RecommendationKind::Allergy);
        assert!(deficiency < excess);
        assert!(excess < allergy);
    }
}
