//! Questionnaire wire/boundary support.
//!
//! This crate turns answers submitted by the questionnaire front end (YAML or JSON) into
//! validated [`implantx_core::PatientAnswers`], and renders validated answers back into the
//! canonical wire form.
//!
//! This crate focuses on:
//! - strict parsing with a best-effort path to the failing field
//! - token normalisation and the few aliases the front end has historically sent
//! - reporting the offending field instead of substituting defaults
//!
//! Scoring lives in `implantx-core`.

pub mod answers;

pub use answers::{Questionnaire, QuestionnaireAnswers};

/// Path reported when a schema mismatch concerns the whole document.
pub const ROOT_PATH: &str = "<root>";

/// Errors returned by the `questionnaire` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("schema mismatch at {path}: {message}")]
    Translation { path: String, message: String },

    #[error("invalid answer for {field}: {reason}")]
    InvalidAnswer { field: &'static str, reason: String },

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl QuestionnaireError {
    /// The questionnaire field at fault, when the error concerns a single answer.
    ///
    /// Schema mismatches report their path unless the whole document was at fault.
    pub fn field(&self) -> Option<&str> {
        match self {
            QuestionnaireError::InvalidAnswer { field, .. } => Some(*field),
            QuestionnaireError::Translation { path, .. } if path != ROOT_PATH => Some(path.as_str()),
            _ => None,
        }
    }
}

/// Type alias for Results that can fail with a [`QuestionnaireError`].
pub type QuestionnaireResult<T> = Result<T, QuestionnaireError>;
