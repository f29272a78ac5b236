//! # ImplantX Core
//!
//! Deterministic dental-implant risk assessment.
//!
//! This crate turns validated questionnaire answers into a success probability, a
//! classification, ranked risk factors, synergy findings and recommendations:
//! - [`answers`]: the validated input model
//! - [`tables`]: every scoring weight, as constant data
//! - [`engine`]: the pure scoring pipeline
//! - [`report`]: free and paid report views, treatment timeline
//!
//! **No API concerns**: parsing raw submissions belongs in `questionnaire`; HTTP belongs in
//! `api-rest`.

pub mod answers;
pub mod assessment;
pub mod constants;
pub mod engine;
pub mod report;
pub mod service;
pub mod tables;

pub use answers::{
    AgeBand, Alcohol, AnswerValue, Bruxism, BruxismGuard, BruxismProfile, Corticosteroids, Diabetes,
    FamilyOsteoporosis, Gender, GumBleeding, HeightLoss, OralHygiene, PatientAnswers,
    PriorFractures, PriorImplant, Smoking, TeethToReplace, ToothLossCause, ToothLossTime,
};
pub use assessment::{
    AssessmentResult, Classification, ProtectiveFactor, Recommendation, RiskFactor, Severity,
    Synergy,
};
pub use engine::evaluate;
pub use implantx_types::{Age, Percentage};
pub use report::{FreeSummary, FullReport, Report, ReportTier, TreatmentPhase, TreatmentTimeline};
pub use service::AssessmentService;
pub use tables::{ClassificationBand, DeductionRow, Dimension, SynergyRow};
