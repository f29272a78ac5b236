//! Assessment result types.
//!
//! These are derived values: the engine builds them fresh for each evaluation and nothing
//! mutates them afterwards.

use crate::tables::{Dimension, CLASSIFICATION_BANDS, SEVERITY_BANDS};
use implantx_types::Percentage;
use serde::{Deserialize, Serialize};

/// Overall outcome tier, best first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Favorable,
    FavorableWithConditions,
    Doubtful,
    Unfavorable,
}

impl Classification {
    /// Map a success probability onto its classification band.
    pub fn from_probability(probability: Percentage) -> Self {
        CLASSIFICATION_BANDS
            .iter()
            .find(|(min, _)| probability.value() >= *min)
            .map(|(_, classification)| *classification)
            .unwrap_or(Classification::Unfavorable)
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Favorable => "Favorable",
            Classification::FavorableWithConditions => "Favorable with conditions",
            Classification::Doubtful => "Doubtful",
            Classification::Unfavorable => "Unfavorable",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative severity of a factor, also used as recommendation priority.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Severity for an impact in percentage points. Only the magnitude counts.
    pub fn from_impact(impact: i32) -> Self {
        let magnitude = impact.unsigned_abs();
        SEVERITY_BANDS
            .iter()
            .find(|(min, _)| magnitude >= *min)
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::Low)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => f.write_str("low"),
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// A single answer that lowers the success probability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RiskFactor {
    pub dimension: Dimension,
    pub name: String,
    /// The patient's answer, in words.
    pub situation: String,
    /// Percentage points deducted from the success probability.
    pub impact: i32,
    pub severity: Severity,
}

/// A single answer that raises the success probability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProtectiveFactor {
    pub dimension: Dimension,
    pub name: String,
    pub situation: String,
    /// Percentage points added to the success probability.
    pub benefit: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recommendation {
    pub dimension: Dimension,
    pub advice: String,
    pub evidence: String,
    pub priority: Severity,
}

/// A synergy rule that fired for this patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Synergy {
    pub id: String,
    pub dimensions: Vec<Dimension>,
    /// Extra percentage points deducted beyond the individual factors.
    pub penalty: i32,
    pub description: String,
}

/// The complete output of one evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AssessmentResult {
    pub classification: Classification,
    #[schema(value_type = u8)]
    pub success_probability: Percentage,
    /// Sorted by descending impact, ties in dimension priority order.
    pub risk_factors: Vec<RiskFactor>,
    pub protective_factors: Vec<ProtectiveFactor>,
    /// One per risk factor above the minimal-impact threshold, in factor order.
    pub recommendations: Vec<Recommendation>,
    pub synergies: Vec<Synergy>,
    /// True when no recommendation was generated.
    pub optimal_profile: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: i64) -> Percentage {
        Percentage::new(value).expect("valid percentage")
    }

    #[test]
    fn classification_band_edges() {
        assert_eq!(Classification::from_probability(pct(100)), Classification::Favorable);
        assert_eq!(Classification::from_probability(pct(90)), Classification::Favorable);
        assert_eq!(
            Classification::from_probability(pct(89)),
            Classification::FavorableWithConditions
        );
        assert_eq!(
            Classification::from_probability(pct(75)),
            Classification::FavorableWithConditions
        );
        assert_eq!(Classification::from_probability(pct(74)), Classification::Doubtful);
        assert_eq!(Classification::from_probability(pct(55)), Classification::Doubtful);
        assert_eq!(Classification::from_probability(pct(54)), Classification::Unfavorable);
        assert_eq!(Classification::from_probability(pct(0)), Classification::Unfavorable);
    }

    #[test]
    fn classification_is_ordered_best_first() {
        assert!(Classification::Favorable < Classification::FavorableWithConditions);
        assert!(Classification::Doubtful < Classification::Unfavorable);
    }

    #[test]
    fn severity_band_edges() {
        assert_eq!(Severity::from_impact(0), Severity::Low);
        assert_eq!(Severity::from_impact(5), Severity::Low);
        assert_eq!(Severity::from_impact(6), Severity::Medium);
        assert_eq!(Severity::from_impact(12), Severity::Medium);
        assert_eq!(Severity::from_impact(13), Severity::High);
        assert_eq!(Severity::from_impact(-18), Severity::High);
    }

    #[test]
    fn classification_serialises_as_snake_case() {
        let json = serde_json::to_string(&Classification::FavorableWithConditions)
            .expect("serialise classification");
        assert_eq!(json, "\"favorable_with_conditions\"");
    }

    #[test]
    fn result_round_trips_through_yaml() {
        let answers = crate::PatientAnswers {
            smoking: crate::Smoking::Heavy,
            diabetes: crate::Diabetes::Uncontrolled,
            prior_implant: crate::PriorImplant::Success,
            ..crate::test_support::low_risk_answers()
        };
        let result = crate::evaluate(&answers);

        let yaml = serde_yaml::to_string(&result).expect("serialise result");
        let back: AssessmentResult = serde_yaml::from_str(&yaml).expect("deserialise result");
        assert_eq!(back, result);
    }
}
