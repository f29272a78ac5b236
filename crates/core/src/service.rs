//! Assessment service facade.
//!
//! Wraps the pure engine for callers that want a tiered report and an audit trail in the logs.
//! API crates go through this rather than calling [`crate::engine::evaluate`] directly.

use crate::answers::PatientAnswers;
use crate::assessment::AssessmentResult;
use crate::engine;
use crate::report::{Report, ReportTier};

/// Stateless assessment operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssessmentService;

impl AssessmentService {
    /// Creates a new instance of AssessmentService.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate answers and return the full result.
    pub fn evaluate(&self, answers: &PatientAnswers) -> AssessmentResult {
        let result = engine::evaluate(answers);
        tracing::debug!(
            classification = %result.classification,
            success_probability = result.success_probability.value(),
            risk_factors = result.risk_factors.len(),
            synergies = result.synergies.len(),
            "evaluated patient answers"
        );
        result
    }

    /// Evaluate answers and build the report view for `tier`.
    pub fn assess(&self, answers: &PatientAnswers, tier: ReportTier) -> Report {
        let result = self.evaluate(answers);
        tracing::info!(
            ?tier,
            classification = %result.classification,
            success_probability = result.success_probability.value(),
            optimal_profile = result.optimal_profile,
            "assessment completed"
        );
        Report::build(tier, answers, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Classification;
    use crate::test_support::low_risk_answers;

    #[test]
    fn assess_builds_requested_tier() {
        let service = AssessmentService::new();
        let answers = low_risk_answers();

        let free = service.assess(&answers, ReportTier::Free);
        let paid = service.assess(&answers, ReportTier::Paid);

        assert_eq!(free.tier(), ReportTier::Free);
        assert_eq!(paid.tier(), ReportTier::Paid);
        assert_eq!(free.classification(), Classification::Favorable);
        assert_eq!(paid.classification(), Classification::Favorable);
    }
}
