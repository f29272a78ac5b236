//! The risk engine.
//!
//! [`evaluate`] is a pure function of its input: it reads only the answers and the constant
//! tables in [`crate::tables`], so it can be called from any number of threads at once.
//!
//! Pipeline:
//! 1. start from [`BASELINE_SUCCESS`]
//! 2. subtract one deduction per dimension
//! 3. subtract the extra penalty of every synergy rule that fires
//! 4. clamp to `[FLOOR_SUCCESS, CEILING_SUCCESS]` and classify
//! 5. rank risk factors and derive recommendations

use crate::answers::PatientAnswers;
use crate::assessment::{
    AssessmentResult, Classification, ProtectiveFactor, Recommendation, RiskFactor, Severity,
    Synergy,
};
use crate::constants::{
    BASELINE_SUCCESS, CEILING_SUCCESS, FLOOR_SUCCESS, MIN_RECOMMENDATION_IMPACT,
};
use crate::tables::{recommendation_template, Dimension, SYNERGY_RULES};
use implantx_types::Percentage;

/// Evaluate a patient's answers.
///
/// Total over every `PatientAnswers` value and free of side effects.
pub fn evaluate(answers: &PatientAnswers) -> AssessmentResult {
    let contributions: Vec<(Dimension, i32)> = Dimension::ALL
        .iter()
        .map(|dimension| (*dimension, dimension.deduction(answers)))
        .collect();

    let synergies: Vec<Synergy> = SYNERGY_RULES
        .iter()
        .filter(|rule| rule.applies(answers))
        .map(|rule| Synergy {
            id: rule.id.to_string(),
            dimensions: rule.dimensions.to_vec(),
            penalty: rule.penalty,
            description: rule.description.to_string(),
        })
        .collect();

    let deducted: i32 = contributions.iter().map(|(_, penalty)| penalty).sum();
    let synergy_penalty: i32 = synergies.iter().map(|s| s.penalty).sum();
    let score = (BASELINE_SUCCESS - deducted - synergy_penalty).clamp(FLOOR_SUCCESS, CEILING_SUCCESS);
    let success_probability = Percentage::saturating(score);

    let risk_factors = rank_risk_factors(answers, &contributions);
    let protective_factors = contributions
        .iter()
        .filter(|(_, penalty)| *penalty < 0)
        .map(|(dimension, penalty)| ProtectiveFactor {
            dimension: *dimension,
            name: dimension.display_name().to_string(),
            situation: dimension.situation(answers),
            benefit: -penalty,
        })
        .collect();
    let recommendations = recommend(&risk_factors);
    let optimal_profile = recommendations.is_empty();

    AssessmentResult {
        classification: Classification::from_probability(success_probability),
        success_probability,
        risk_factors,
        protective_factors,
        recommendations,
        synergies,
        optimal_profile,
    }
}

fn rank_risk_factors(answers: &PatientAnswers, contributions: &[(Dimension, i32)]) -> Vec<RiskFactor> {
    let mut factors: Vec<RiskFactor> = contributions
        .iter()
        .filter(|(_, penalty)| *penalty > 0)
        .map(|(dimension, penalty)| RiskFactor {
            dimension: *dimension,
            name: dimension.display_name().to_string(),
            situation: dimension.situation(answers),
            impact: *penalty,
            severity: Severity::from_impact(*penalty),
        })
        .collect();

    factors.sort_by(|a, b| {
        b.impact
            .cmp(&a.impact)
            .then_with(|| a.dimension.priority().cmp(&b.dimension.priority()))
    });
    factors
}

fn recommend(risk_factors: &[RiskFactor]) -> Vec<Recommendation> {
    risk_factors
        .iter()
        .filter(|factor| factor.impact >= MIN_RECOMMENDATION_IMPACT)
        .filter_map(|factor| {
            recommendation_template(factor.dimension).map(|template| Recommendation {
                dimension: factor.dimension,
                advice: template.advice.to_string(),
                evidence: template.evidence.to_string(),
                priority: factor.severity,
            })
        })
        .collect()
}
