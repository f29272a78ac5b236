//! Request and response bodies shared by the API crates.
//!
//! The request body for `POST /assessments` is [`questionnaire::QuestionnaireAnswers`]; it is
//! re-exported here so API crates need a single import.

use implantx_core::constants::{BASELINE_SUCCESS, CEILING_SUCCESS, FLOOR_SUCCESS};
use implantx_core::tables::{classification_bands, deduction_rows, synergy_rows};
use implantx_core::{ClassificationBand, DeductionRow, Report, SynergyRow};
use questionnaire::QuestionnaireError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use questionnaire::QuestionnaireAnswers;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A completed assessment.
///
/// Nothing is persisted; the id only lets callers correlate a report with server logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRes {
    pub assessment_id: String,
    /// RFC 3339 timestamp.
    pub generated_at: String,
    pub report: Report,
}

impl AssessmentRes {
    /// Wrap a report with a fresh id and the current time.
    pub fn new(report: Report) -> Self {
        Self {
            assessment_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            report,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    /// Questionnaire field at fault, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorRes {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }
}

impl From<&QuestionnaireError> for ErrorRes {
    fn from(err: &QuestionnaireError) -> Self {
        Self {
            error: err.to_string(),
            field: err.field().map(str::to_string),
        }
    }
}

/// The scoring policy in force.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TablesRes {
    pub baseline: i32,
    pub floor: i32,
    pub ceiling: i32,
    pub deductions: Vec<DeductionRow>,
    pub synergies: Vec<SynergyRow>,
    pub classification_bands: Vec<ClassificationBand>,
}

impl TablesRes {
    pub fn current() -> Self {
        Self {
            baseline: BASELINE_SUCCESS,
            floor: FLOOR_SUCCESS,
            ceiling: CEILING_SUCCESS,
            deductions: deduction_rows(),
            synergies: synergy_rows(),
            classification_bands: classification_bands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use implantx_core::{AssessmentService, ReportTier};
    use questionnaire::Questionnaire;

    const COMPLETE: &str = r#"{
        "age": 52, "gender": "female", "smoking": "none", "alcohol": "none",
        "diabetes": "none", "bruxism": "none", "bruxism_guard": "not-applicable",
        "gum_bleeding": "never", "oral_hygiene": "twice-plus-daily",
        "prior_fractures": "none", "height_loss": "none", "family_osteoporosis": "none",
        "corticosteroids": "none", "prior_implant": "none", "tooth_loss_cause": "cavity",
        "tooth_loss_time": "less-than-1y", "teeth_to_replace": "1-2"
    }"#;

    #[test]
    fn assessment_res_has_uuid_and_timestamp() {
        let answers = Questionnaire::load_json(COMPLETE).expect("valid answers");
        let report = AssessmentService::new().assess(&answers, ReportTier::Free);
        let res = AssessmentRes::new(report);

        assert!(uuid::Uuid::parse_str(&res.assessment_id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&res.generated_at).is_ok());
    }

    #[test]
    fn error_res_names_the_field() {
        let wire = Questionnaire::parse_json(r#"{"age": 40}"#).expect("parses");
        let err = Questionnaire::validate(&wire).expect_err("incomplete answers");
        let res = ErrorRes::from(&err);

        assert!(res.field.is_some());
        assert!(res.error.contains(res.field.as_deref().unwrap_or_default()));
    }

    #[test]
    fn schema_mismatch_keeps_its_path_as_the_field() {
        let err = Questionnaire::load_json(r#"{"age": "forty"}"#).expect_err("wrong type");
        let res = ErrorRes::from(&err);

        assert_eq!(res.field.as_deref(), Some("age"));
        assert!(res.error.contains("forty"));
    }

    #[test]
    fn error_res_omits_absent_field() {
        let json = serde_json::to_value(ErrorRes::message("boom")).expect("serialise");
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn tables_res_publishes_policy() {
        let tables = TablesRes::current();
        assert_eq!(tables.baseline, 95);
        assert_eq!(tables.floor, 35);
        assert_eq!(tables.ceiling, 98);
        assert_eq!(tables.synergies.len(), 8);
        assert_eq!(tables.classification_bands.len(), 4);
        assert!(!tables.deductions.is_empty());
    }
}
