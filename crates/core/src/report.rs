//! Tiered report views over an [`AssessmentResult`].
//!
//! A free summary and a paid report are different types, so a free-tier consumer cannot reach
//! paid-tier fields by accident. The engine itself knows nothing about tiers.

use crate::answers::{Diabetes, GumBleeding, PatientAnswers, Smoking, TeethToReplace, ToothLossCause, ToothLossTime};
use crate::assessment::{AssessmentResult, Classification, RiskFactor};
use crate::constants::{COMPROMISED_HEALING_EXTRA_WEEKS, FREE_TIER_TOP_FACTORS};
use implantx_types::Percentage;
use serde::{Deserialize, Serialize};

/// Which report view to produce.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportTier {
    #[default]
    Free,
    Paid,
}

/// Free-tier summary: classification and the top risk factors only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FreeSummary {
    pub classification: Classification,
    #[schema(value_type = u8)]
    pub success_probability: Percentage,
    pub top_risk_factors: Vec<RiskFactor>,
    /// Number of risk factors withheld from this summary.
    pub hidden_risk_factors: usize,
    pub optimal_profile: bool,
}

/// Paid-tier report: the full assessment plus a treatment timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FullReport {
    pub assessment: AssessmentResult,
    pub timeline: TreatmentTimeline,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Free(FreeSummary),
    Paid(FullReport),
}

impl Report {
    /// Build the view for `tier`.
    pub fn build(tier: ReportTier, answers: &PatientAnswers, result: AssessmentResult) -> Self {
        match tier {
            ReportTier::Free => Report::Free(FreeSummary::from_result(result)),
            ReportTier::Paid => Report::Paid(FullReport {
                timeline: TreatmentTimeline::estimate(answers),
                assessment: result,
            }),
        }
    }

    pub fn tier(&self) -> ReportTier {
        match self {
            Report::Free(_) => ReportTier::Free,
            Report::Paid(_) => ReportTier::Paid,
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            Report::Free(summary) => summary.classification,
            Report::Paid(report) => report.assessment.classification,
        }
    }
}

impl FreeSummary {
    pub fn from_result(result: AssessmentResult) -> Self {
        let total = result.risk_factors.len();
        let top_risk_factors: Vec<RiskFactor> = result
            .risk_factors
            .into_iter()
            .take(FREE_TIER_TOP_FACTORS)
            .collect();

        Self {
            classification: result.classification,
            success_probability: result.success_probability,
            hidden_risk_factors: total - top_risk_factors.len(),
            top_risk_factors,
            optimal_profile: result.optimal_profile,
        }
    }
}

// ============================================================================
// Treatment timeline
// ============================================================================

/// A stage of implant treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentPhase {
    Consultation,
    PeriodontalTherapy,
    BoneGrafting,
    ImplantPlacement,
    Osseointegration,
    FinalProsthesis,
}

impl TreatmentPhase {
    pub fn label(self) -> &'static str {
        match self {
            TreatmentPhase::Consultation => "Consultation and 3D imaging",
            TreatmentPhase::PeriodontalTherapy => "Periodontal therapy",
            TreatmentPhase::BoneGrafting => "Bone grafting and healing",
            TreatmentPhase::ImplantPlacement => "Implant placement",
            TreatmentPhase::Osseointegration => "Osseointegration",
            TreatmentPhase::FinalProsthesis => "Final crown or bridge",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TimelinePhase {
    pub phase: TreatmentPhase,
    pub min_weeks: u16,
    pub max_weeks: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TreatmentTimeline {
    pub phases: Vec<TimelinePhase>,
    pub total_min_weeks: u16,
    pub total_max_weeks: u16,
}

/// Week ranges per phase, in treatment order.
const PHASE_WEEKS: &[(TreatmentPhase, u16, u16)] = &[
    (TreatmentPhase::Consultation, 1, 2),
    (TreatmentPhase::PeriodontalTherapy, 4, 8),
    (TreatmentPhase::BoneGrafting, 12, 24),
    (TreatmentPhase::ImplantPlacement, 1, 1),
    (TreatmentPhase::Osseointegration, 12, 24),
    (TreatmentPhase::FinalProsthesis, 2, 4),
];

impl TreatmentTimeline {
    /// Estimate the treatment phases a patient is likely to go through.
    pub fn estimate(answers: &PatientAnswers) -> Self {
        let needs_periodontal_therapy = answers.gum_bleeding == GumBleeding::Frequently
            || answers.tooth_loss_cause == ToothLossCause::Periodontitis;
        let needs_bone_grafting = answers.tooth_loss_time == ToothLossTime::MoreThanThreeYears
            || answers.teeth_to_replace == TeethToReplace::All;
        let compromised_healing =
            answers.smoking == Smoking::Heavy || answers.diabetes == Diabetes::Uncontrolled;

        let phases: Vec<TimelinePhase> = PHASE_WEEKS
            .iter()
            .filter(|(phase, _, _)| match phase {
                TreatmentPhase::PeriodontalTherapy => needs_periodontal_therapy,
                TreatmentPhase::BoneGrafting => needs_bone_grafting,
                _ => true,
            })
            .map(|(phase, min_weeks, max_weeks)| {
                let extra = if *phase == TreatmentPhase::Osseointegration && compromised_healing {
                    COMPROMISED_HEALING_EXTRA_WEEKS
                } else {
                    0
                };
                TimelinePhase {
                    phase: *phase,
                    min_weeks: min_weeks + extra,
                    max_weeks: max_weeks + extra,
                }
            })
            .collect();

        Self {
            total_min_weeks: phases.iter().map(|p| p.min_weeks).sum(),
            total_max_weeks: phases.iter().map(|p| p.max_weeks).sum(),
            phases,
        }
    }
}
