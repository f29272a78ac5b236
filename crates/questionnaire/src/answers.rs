//! Submitted questionnaire answers and their validation.
//!
//! Responsibilities:
//! - Define the wire model the front end submits ([`QuestionnaireAnswers`])
//! - Parse YAML or JSON strictly, reporting the path of any schema mismatch
//! - Validate every answer into a [`PatientAnswers`], naming the first offending field
//! - Render validated answers back into the canonical wire form
//!
//! Notes:
//! - Every field is optional on the wire so that a missing answer is reported by name rather
//!   than as a generic deserialisation failure
//! - Tokens are matched case-insensitively; `_` and spaces are read as `-`

use crate::{QuestionnaireError, QuestionnaireResult, ROOT_PATH};
use implantx_core::answers::AnswerValue;
use implantx_core::{
    Alcohol, Bruxism, BruxismGuard, Corticosteroids, Diabetes, FamilyOsteoporosis, Gender,
    GumBleeding, HeightLoss, OralHygiene, PatientAnswers, PriorFractures, PriorImplant, Smoking,
    TeethToReplace, ToothLossCause, ToothLossTime,
};
use implantx_types::Age;
use serde::{Deserialize, Serialize};

// ============================================================================
// Wire types
// ============================================================================

/// Answers as submitted by the questionnaire front end.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diabetes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bruxism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bruxism_guard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gum_bleeding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oral_hygiene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_fractures: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_loss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_osteoporosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corticosteroids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_implant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooth_loss_cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooth_loss_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teeth_to_replace: Option<String>,
}

/// Tokens the front end has sent for some answers, mapped to the canonical token.
const ALIASES: &[(&str, &str, &str)] = &[
    ("tooth_loss_time", "<1y", "less-than-1y"),
    ("tooth_loss_time", ">3y", "more-than-3y"),
    ("oral_hygiene", "twice-plus", "twice-plus-daily"),
    ("oral_hygiene", "once", "once-daily"),
    ("oral_hygiene", "less-than-once", "less-than-once-daily"),
    ("bruxism_guard", "n/a", "not-applicable"),
    ("bruxism_guard", "na", "not-applicable"),
];

// ============================================================================
// Public Questionnaire operations
// ============================================================================

/// Questionnaire operations.
///
/// This is a zero-sized type used for namespacing questionnaire-related operations.
/// All methods are associated functions.
pub struct Questionnaire;

impl Questionnaire {
    /// Parse submitted answers from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Translation`] naming the failing path if the YAML does not
    /// match the wire schema (wrong types, unknown keys).
    pub fn parse_yaml(yaml_text: &str) -> QuestionnaireResult<QuestionnaireAnswers> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            schema_mismatch(&path, err.into_inner())
        })
    }

    /// Parse submitted answers from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Translation`] naming the failing path if the JSON does not
    /// match the wire schema.
    pub fn parse_json(json_text: &str) -> QuestionnaireResult<QuestionnaireAnswers> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            schema_mismatch(&path, err.into_inner())
        })
    }

    /// Validate submitted answers into the engine's input type.
    ///
    /// Fields are checked in questionnaire order and the first problem is reported.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::InvalidAnswer`] if a field is missing, holds an unknown
    /// token, or (for `age`) is outside 18..=120.
    pub fn validate(wire: &QuestionnaireAnswers) -> QuestionnaireResult<PatientAnswers> {
        let age = wire.age.ok_or_else(|| missing("age"))?;
        let age = Age::new(age).map_err(|e| QuestionnaireError::InvalidAnswer {
            field: "age",
            reason: e.to_string(),
        })?;

        Ok(PatientAnswers {
            age,
            gender: parse_answer::<Gender>("gender", &wire.gender)?,
            smoking: parse_answer::<Smoking>("smoking", &wire.smoking)?,
            alcohol: parse_answer::<Alcohol>("alcohol", &wire.alcohol)?,
            diabetes: parse_answer::<Diabetes>("diabetes", &wire.diabetes)?,
            bruxism: parse_answer::<Bruxism>("bruxism", &wire.bruxism)?,
            bruxism_guard: parse_answer::<BruxismGuard>("bruxism_guard", &wire.bruxism_guard)?,
            gum_bleeding: parse_answer::<GumBleeding>("gum_bleeding", &wire.gum_bleeding)?,
            oral_hygiene: parse_answer::<OralHygiene>("oral_hygiene", &wire.oral_hygiene)?,
            prior_fractures: parse_answer::<PriorFractures>(
                "prior_fractures",
                &wire.prior_fractures,
            )?,
            height_loss: parse_answer::<HeightLoss>("height_loss", &wire.height_loss)?,
            family_osteoporosis: parse_answer::<FamilyOsteoporosis>(
                "family_osteoporosis",
                &wire.family_osteoporosis,
            )?,
            corticosteroids: parse_answer::<Corticosteroids>(
                "corticosteroids",
                &wire.corticosteroids,
            )?,
            prior_implant: parse_answer::<PriorImplant>("prior_implant", &wire.prior_implant)?,
            tooth_loss_cause: parse_answer::<ToothLossCause>(
                "tooth_loss_cause",
                &wire.tooth_loss_cause,
            )?,
            tooth_loss_time: parse_answer::<ToothLossTime>(
                "tooth_loss_time",
                &wire.tooth_loss_time,
            )?,
            teeth_to_replace: parse_answer::<TeethToReplace>(
                "teeth_to_replace",
                &wire.teeth_to_replace,
            )?,
        })
    }

    /// Parse and validate YAML text in one step.
    pub fn load_yaml(yaml_text: &str) -> QuestionnaireResult<PatientAnswers> {
        Self::validate(&Self::parse_yaml(yaml_text)?)
    }

    /// Parse and validate JSON text in one step.
    pub fn load_json(json_text: &str) -> QuestionnaireResult<PatientAnswers> {
        Self::validate(&Self::parse_json(json_text)?)
    }

    /// Canonical wire form of validated answers.
    pub fn from_answers(answers: &PatientAnswers) -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            age: Some(i64::from(answers.age.years())),
            gender: Some(answers.gender.as_wire().into()),
            smoking: Some(answers.smoking.as_wire().into()),
            alcohol: Some(answers.alcohol.as_wire().into()),
            diabetes: Some(answers.diabetes.as_wire().into()),
            bruxism: Some(answers.bruxism.as_wire().into()),
            bruxism_guard: Some(answers.bruxism_guard.as_wire().into()),
            gum_bleeding: Some(answers.gum_bleeding.as_wire().into()),
            oral_hygiene: Some(answers.oral_hygiene.as_wire().into()),
            prior_fractures: Some(answers.prior_fractures.as_wire().into()),
            height_loss: Some(answers.height_loss.as_wire().into()),
            family_osteoporosis: Some(answers.family_osteoporosis.as_wire().into()),
            corticosteroids: Some(answers.corticosteroids.as_wire().into()),
            prior_implant: Some(answers.prior_implant.as_wire().into()),
            tooth_loss_cause: Some(answers.tooth_loss_cause.as_wire().into()),
            tooth_loss_time: Some(answers.tooth_loss_time.as_wire().into()),
            teeth_to_replace: Some(answers.teeth_to_replace.as_wire().into()),
        }
    }

    /// Render validated answers as canonical YAML.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::InvalidYaml`] if serialisation fails.
    pub fn render_yaml(answers: &PatientAnswers) -> QuestionnaireResult<String> {
        Ok(serde_yaml::to_string(&Self::from_answers(answers))?)
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn schema_mismatch(path: &str, source: impl std::fmt::Display) -> QuestionnaireError {
    let path = if path.is_empty() || path == "." {
        ROOT_PATH
    } else {
        path
    };
    QuestionnaireError::Translation {
        path: path.to_string(),
        message: source.to_string(),
    }
}

fn missing(field: &'static str) -> QuestionnaireError {
    QuestionnaireError::InvalidAnswer {
        field,
        reason: "answer is required".into(),
    }
}

fn normalise_token(field: &str, raw: &str) -> String {
    let token: String = raw
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect();

    ALIASES
        .iter()
        .find(|(alias_field, alias, _)| *alias_field == field && *alias == token)
        .map(|(_, _, canonical)| canonical.to_string())
        .unwrap_or(token)
}

fn parse_answer<T: AnswerValue>(
    field: &'static str,
    value: &Option<String>,
) -> QuestionnaireResult<T> {
    let raw = value.as_deref().ok_or_else(|| missing(field))?;
    let token = normalise_token(field, raw);

    T::parse_wire(&token).ok_or_else(|| {
        let allowed: Vec<&str> = T::values().iter().map(|v| v.wire()).collect();
        QuestionnaireError::InvalidAnswer {
            field,
            reason: format!("'{raw}' is not one of: {}", allowed.join(", ")),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use implantx_core::{evaluate, Classification};

    const LOW_RISK_YAML: &str = r#"age: 45
gender: male
smoking: none
alcohol: none
diabetes: none
bruxism: none
bruxism_guard: not-applicable
gum_bleeding: never
oral_hygiene: twice-plus-daily
prior_fractures: none
height_loss: none
family_osteoporosis: none
corticosteroids: none
prior_implant: none
tooth_loss_cause: cavity
tooth_loss_time: less-than-1y
teeth_to_replace: 1-2
"#;

    #[test]
    fn loads_low_risk_yaml() {
        let answers = Questionnaire::load_yaml(LOW_RISK_YAML).expect("valid answers");

        assert_eq!(answers.age.years(), 45);
        assert_eq!(answers.teeth_to_replace, TeethToReplace::OneToTwo);
        assert_eq!(evaluate(&answers).classification, Classification::Favorable);
    }

    #[test]
    fn canonical_form_round_trips() {
        let answers = Questionnaire::load_yaml(LOW_RISK_YAML).expect("valid answers");
        let rendered = Questionnaire::render_yaml(&answers).expect("render yaml");
        let reparsed = Questionnaire::load_yaml(&rendered).expect("reparse yaml");
        assert_eq!(answers, reparsed);
    }

    #[test]
    fn accepts_aliases_and_loose_casing() {
        let input = LOW_RISK_YAML
            .replace("tooth_loss_time: less-than-1y", "tooth_loss_time: \">3y\"")
            .replace("oral_hygiene: twice-plus-daily", "oral_hygiene: Once")
            .replace("bruxism_guard: not-applicable", "bruxism_guard: NOT_APPLICABLE");

        let answers = Questionnaire::load_yaml(&input).expect("aliases should be accepted");
        assert_eq!(answers.tooth_loss_time, ToothLossTime::MoreThanThreeYears);
        assert_eq!(answers.oral_hygiene, OralHygiene::OnceDaily);
        assert_eq!(answers.bruxism_guard, BruxismGuard::NotApplicable);
    }

    #[test]
    fn missing_answer_names_the_field() {
        let input = LOW_RISK_YAML.replace("diabetes: none\n", "");

        let err = Questionnaire::load_yaml(&input).expect_err("should reject missing answer");
        assert_eq!(err.field(), Some("diabetes"));
        assert!(err.to_string().contains("answer is required"));
    }

    #[test]
    fn unknown_token_lists_allowed_values() {
        let input = LOW_RISK_YAML.replace("smoking: none", "smoking: sometimes");

        let err = Questionnaire::load_yaml(&input).expect_err("should reject unknown token");
        match err {
            QuestionnaireError::InvalidAnswer { field, reason } => {
                assert_eq!(field, "smoking");
                assert!(reason.contains("none, light, heavy"));
            }
            other => panic!("expected InvalidAnswer error, got {other:?}"),
        }
    }

    #[test]
    fn alias_is_scoped_to_its_field() {
        let input = LOW_RISK_YAML.replace("prior_fractures: none", "prior_fractures: twice-plus");

        let err = Questionnaire::load_yaml(&input).expect_err("alias must not leak");
        assert_eq!(err.field(), Some("prior_fractures"));
    }

    #[test]
    fn rejects_out_of_range_age() {
        let input = LOW_RISK_YAML.replace("age: 45", "age: 16");

        let err = Questionnaire::load_yaml(&input).expect_err("should reject minor");
        assert_eq!(err.field(), Some("age"));
        assert!(err.to_string().contains("outside the accepted range"));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = format!("{LOW_RISK_YAML}favourite_colour: blue\n");

        let err = Questionnaire::parse_yaml(&input).expect_err("should reject unknown key");
        match err {
            QuestionnaireError::Translation { ref message, .. } => {
                assert!(message.contains("favourite_colour"))
            }
            ref other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_wrong_types() {
        let input = LOW_RISK_YAML.replace("age: 45", "age: forty-five");

        let err = Questionnaire::parse_yaml(&input).expect_err("should reject wrong type");
        assert!(matches!(err, QuestionnaireError::Translation { .. }));
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn wrong_json_type_names_the_field() {
        let err = Questionnaire::load_json(r#"{"age": "forty"}"#).expect_err("age must be a number");

        assert_eq!(err.field(), Some("age"));
        assert!(err.to_string().contains("schema mismatch at age"));
    }

    #[test]
    fn malformed_document_has_no_field() {
        let err = Questionnaire::parse_json(r#""not an object""#).expect_err("not an object");

        assert!(matches!(
            err,
            QuestionnaireError::Translation { ref path, .. } if path == ROOT_PATH
        ));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn loads_json() {
        let json = r#"{
            "age": 67, "gender": "female", "smoking": "heavy", "alcohol": "none",
            "diabetes": "uncontrolled", "bruxism": "yes", "bruxism_guard": "yes",
            "gum_bleeding": "sometimes", "oral_hygiene": "once-daily",
            "prior_fractures": "none", "height_loss": "unsure",
            "family_osteoporosis": "unknown", "corticosteroids": "none",
            "prior_implant": "failed", "tooth_loss_cause": "periodontitis",
            "tooth_loss_time": "1-3y", "teeth_to_replace": "3-8"
        }"#;

        let answers = Questionnaire::load_json(json).expect("valid json answers");
        assert_eq!(answers.gender, Gender::Female);
        assert_eq!(answers.prior_implant, PriorImplant::Failed);
        assert_eq!(evaluate(&answers).classification, Classification::Unfavorable);
    }
}
