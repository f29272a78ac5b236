//! Scoring policy tables.
//!
//! Every weight the engine uses lives here as constant data: per-dimension deductions,
//! synergy rules, classification bands, severity bands and recommendation templates. The
//! engine itself only walks these tables.
//!
//! Deductions are in percentage points subtracted from the baseline success probability. A
//! negative deduction is a bonus. The weights are illustrative defaults, not verified clinical
//! constants.

use crate::answers::{
    AgeBand, Alcohol, BruxismProfile, Corticosteroids, Diabetes, FamilyOsteoporosis, Gender,
    GumBleeding, HeightLoss, OralHygiene, PatientAnswers, PriorFractures, PriorImplant, Smoking,
    TeethToReplace, ToothLossCause, ToothLossTime,
};
use crate::assessment::{Classification, Severity};
use serde::{Deserialize, Serialize};

// ============================================================================
// Dimensions
// ============================================================================

/// A scored questionnaire dimension.
///
/// Declaration order is the tie-break priority used when two risk factors have the same
/// impact: earlier dimensions are listed first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Smoking,
    Diabetes,
    PriorImplant,
    GumBleeding,
    OralHygiene,
    Bruxism,
    Corticosteroids,
    ToothLossCause,
    PriorFractures,
    ToothLossTime,
    HeightLoss,
    Alcohol,
    Age,
    TeethToReplace,
    FamilyOsteoporosis,
    Gender,
}

impl Dimension {
    /// Every dimension in tie-break priority order.
    pub const ALL: [Dimension; 16] = [
        Dimension::Smoking,
        Dimension::Diabetes,
        Dimension::PriorImplant,
        Dimension::GumBleeding,
        Dimension::OralHygiene,
        Dimension::Bruxism,
        Dimension::Corticosteroids,
        Dimension::ToothLossCause,
        Dimension::PriorFractures,
        Dimension::ToothLossTime,
        Dimension::HeightLoss,
        Dimension::Alcohol,
        Dimension::Age,
        Dimension::TeethToReplace,
        Dimension::FamilyOsteoporosis,
        Dimension::Gender,
    ];

    /// Position in the tie-break order (0 is highest priority).
    pub fn priority(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Smoking => "Smoking",
            Dimension::Diabetes => "Diabetes",
            Dimension::PriorImplant => "Implant history",
            Dimension::GumBleeding => "Gum bleeding",
            Dimension::OralHygiene => "Oral hygiene",
            Dimension::Bruxism => "Bruxism",
            Dimension::Corticosteroids => "Corticosteroids",
            Dimension::ToothLossCause => "Cause of tooth loss",
            Dimension::PriorFractures => "Prior fractures",
            Dimension::ToothLossTime => "Time since tooth loss",
            Dimension::HeightLoss => "Height loss",
            Dimension::Alcohol => "Alcohol",
            Dimension::Age => "Age",
            Dimension::TeethToReplace => "Teeth to replace",
            Dimension::FamilyOsteoporosis => "Family osteoporosis history",
            Dimension::Gender => "Gender",
        }
    }

    /// The deduction this dimension contributes for `answers`.
    pub fn deduction(self, answers: &PatientAnswers) -> i32 {
        match self {
            Dimension::Smoking => lookup(SMOKING, answers.smoking),
            Dimension::Diabetes => lookup(DIABETES, answers.diabetes),
            Dimension::PriorImplant => lookup(PRIOR_IMPLANT, answers.prior_implant),
            Dimension::GumBleeding => lookup(GUM_BLEEDING, answers.gum_bleeding),
            Dimension::OralHygiene => lookup(ORAL_HYGIENE, answers.oral_hygiene),
            Dimension::Bruxism => lookup(BRUXISM, answers.bruxism_profile()),
            Dimension::Corticosteroids => lookup(CORTICOSTEROIDS, answers.corticosteroids),
            Dimension::ToothLossCause => lookup(TOOTH_LOSS_CAUSE, answers.tooth_loss_cause),
            Dimension::PriorFractures => lookup(PRIOR_FRACTURES, answers.prior_fractures),
            Dimension::ToothLossTime => lookup(TOOTH_LOSS_TIME, answers.tooth_loss_time),
            Dimension::HeightLoss => lookup(HEIGHT_LOSS, answers.height_loss),
            Dimension::Alcohol => lookup(ALCOHOL, answers.alcohol),
            Dimension::Age => lookup(AGE, answers.age_band()),
            Dimension::TeethToReplace => lookup(TEETH_TO_REPLACE, answers.teeth_to_replace),
            Dimension::FamilyOsteoporosis => {
                lookup(FAMILY_OSTEOPOROSIS, answers.family_osteoporosis)
            }
            Dimension::Gender => lookup(GENDER, answers.gender),
        }
    }

    /// The patient's situation on this dimension, as shown in reports.
    pub fn situation(self, answers: &PatientAnswers) -> String {
        match self {
            Dimension::Smoking => answers.smoking.label().into(),
            Dimension::Diabetes => answers.diabetes.label().into(),
            Dimension::PriorImplant => answers.prior_implant.label().into(),
            Dimension::GumBleeding => answers.gum_bleeding.label().into(),
            Dimension::OralHygiene => answers.oral_hygiene.label().into(),
            Dimension::Bruxism => answers.bruxism_profile().label().into(),
            Dimension::Corticosteroids => answers.corticosteroids.label().into(),
            Dimension::ToothLossCause => answers.tooth_loss_cause.label().into(),
            Dimension::PriorFractures => answers.prior_fractures.label().into(),
            Dimension::ToothLossTime => answers.tooth_loss_time.label().into(),
            Dimension::HeightLoss => answers.height_loss.label().into(),
            Dimension::Alcohol => answers.alcohol.label().into(),
            Dimension::Age => format!("{} ({} years)", answers.age_band().label(), answers.age),
            Dimension::TeethToReplace => answers.teeth_to_replace.label().into(),
            Dimension::FamilyOsteoporosis => answers.family_osteoporosis.label().into(),
            Dimension::Gender => answers.gender.label().into(),
        }
    }
}

fn lookup<T: Copy + PartialEq>(table: &[(T, i32)], value: T) -> i32 {
    table
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

// ============================================================================
// Deduction tables
// ============================================================================

pub const SMOKING: &[(Smoking, i32)] = &[
    (Smoking::None, 0),
    (Smoking::Light, 8),
    (Smoking::Heavy, 18),
];

pub const DIABETES: &[(Diabetes, i32)] = &[
    (Diabetes::None, 0),
    (Diabetes::Controlled, 5),
    (Diabetes::Uncontrolled, 15),
];

/// A previous successful implant is the only bonus in the model.
pub const PRIOR_IMPLANT: &[(PriorImplant, i32)] = &[
    (PriorImplant::Success, -2),
    (PriorImplant::None, 0),
    (PriorImplant::Failed, 15),
];

pub const GUM_BLEEDING: &[(GumBleeding, i32)] = &[
    (GumBleeding::Never, 0),
    (GumBleeding::Sometimes, 5),
    (GumBleeding::Frequently, 12),
];

pub const ORAL_HYGIENE: &[(OralHygiene, i32)] = &[
    (OralHygiene::TwicePlusDaily, 0),
    (OralHygiene::OnceDaily, 4),
    (OralHygiene::LessThanOnceDaily, 10),
];

pub const BRUXISM: &[(BruxismProfile, i32)] = &[
    (BruxismProfile::None, 0),
    (BruxismProfile::Unsure, 3),
    (BruxismProfile::Guarded, 3),
    (BruxismProfile::Unguarded, 10),
];

pub const CORTICOSTEROIDS: &[(Corticosteroids, i32)] = &[
    (Corticosteroids::None, 0),
    (Corticosteroids::Unsure, 2),
    (Corticosteroids::Yes, 6),
];

pub const TOOTH_LOSS_CAUSE: &[(ToothLossCause, i32)] = &[
    (ToothLossCause::Cavity, 0),
    (ToothLossCause::Trauma, 0),
    (ToothLossCause::Other, 2),
    (ToothLossCause::Periodontitis, 6),
];

pub const PRIOR_FRACTURES: &[(PriorFractures, i32)] = &[
    (PriorFractures::None, 0),
    (PriorFractures::Once, 3),
    (PriorFractures::Multiple, 7),
];

pub const TOOTH_LOSS_TIME: &[(ToothLossTime, i32)] = &[
    (ToothLossTime::LessThanOneYear, 0),
    (ToothLossTime::OneToThreeYears, 3),
    (ToothLossTime::MoreThanThreeYears, 6),
];

pub const HEIGHT_LOSS: &[(HeightLoss, i32)] = &[
    (HeightLoss::None, 0),
    (HeightLoss::Unsure, 2),
    (HeightLoss::Yes, 5),
];

pub const ALCOHOL: &[(Alcohol, i32)] = &[(Alcohol::None, 0), (Alcohol::Regular, 4)];

pub const AGE: &[(AgeBand, i32)] = &[
    (AgeBand::Under50, 0),
    (AgeBand::From50To64, 2),
    (AgeBand::From65To74, 4),
    (AgeBand::From75, 7),
];

pub const TEETH_TO_REPLACE: &[(TeethToReplace, i32)] = &[
    (TeethToReplace::OneToTwo, 0),
    (TeethToReplace::ThreeToEight, 2),
    (TeethToReplace::All, 4),
];

pub const FAMILY_OSTEOPOROSIS: &[(FamilyOsteoporosis, i32)] = &[
    (FamilyOsteoporosis::None, 0),
    (FamilyOsteoporosis::Unknown, 1),
    (FamilyOsteoporosis::Yes, 3),
];

/// Gender carries no deduction of its own; it only takes part in synergy rules.
pub const GENDER: &[(Gender, i32)] = &[(Gender::Male, 0), (Gender::Female, 0), (Gender::Other, 0)];

// ============================================================================
// Synergy rules
// ============================================================================

/// A condition on the answers. Synergy rules are conjunctions of these.
///
/// Every ordered condition accepts a value together with all worse values, so adding risk on
/// any dimension can only make more rules fire.
#[derive(Clone, Copy, Debug)]
pub enum Condition {
    Smoking(&'static [Smoking]),
    Diabetes(&'static [Diabetes]),
    GumBleeding(&'static [GumBleeding]),
    PriorImplant(&'static [PriorImplant]),
    ToothLossCause(&'static [ToothLossCause]),
    Corticosteroids(&'static [Corticosteroids]),
    PriorFractures(&'static [PriorFractures]),
    HeightLoss(&'static [HeightLoss]),
    Bruxism(&'static [BruxismProfile]),
    TeethToReplace(&'static [TeethToReplace]),
    FamilyOsteoporosis(&'static [FamilyOsteoporosis]),
    Gender(&'static [Gender]),
    AgeAtLeast(u8),
    AnyOf(&'static [Condition]),
}

impl Condition {
    pub fn matches(&self, answers: &PatientAnswers) -> bool {
        match self {
            Condition::Smoking(values) => values.contains(&answers.smoking),
            Condition::Diabetes(values) => values.contains(&answers.diabetes),
            Condition::GumBleeding(values) => values.contains(&answers.gum_bleeding),
            Condition::PriorImplant(values) => values.contains(&answers.prior_implant),
            Condition::ToothLossCause(values) => values.contains(&answers.tooth_loss_cause),
            Condition::Corticosteroids(values) => values.contains(&answers.corticosteroids),
            Condition::PriorFractures(values) => values.contains(&answers.prior_fractures),
            Condition::HeightLoss(values) => values.contains(&answers.height_loss),
            Condition::Bruxism(values) => values.contains(&answers.bruxism_profile()),
            Condition::TeethToReplace(values) => values.contains(&answers.teeth_to_replace),
            Condition::FamilyOsteoporosis(values) => values.contains(&answers.family_osteoporosis),
            Condition::Gender(values) => values.contains(&answers.gender),
            Condition::AgeAtLeast(years) => answers.age.years() >= *years,
            Condition::AnyOf(conditions) => conditions.iter().any(|c| c.matches(answers)),
        }
    }
}

/// A compounding interaction between co-occurring risk factors.
#[derive(Clone, Copy, Debug)]
pub struct SynergyRule {
    pub id: &'static str,
    pub dimensions: &'static [Dimension],
    pub conditions: &'static [Condition],
    /// Extra percentage points deducted on top of the individual deductions.
    pub penalty: i32,
    pub description: &'static str,
}

impl SynergyRule {
    pub fn applies(&self, answers: &PatientAnswers) -> bool {
        self.conditions.iter().all(|c| c.matches(answers))
    }
}

const SMOKER: &[Smoking] = &[Smoking::Light, Smoking::Heavy];

pub const SYNERGY_RULES: &[SynergyRule] = &[
    SynergyRule {
        id: "smoking-diabetes",
        dimensions: &[Dimension::Smoking, Dimension::Diabetes],
        conditions: &[
            Condition::Smoking(&[Smoking::Heavy]),
            Condition::Diabetes(&[Diabetes::Uncontrolled]),
        ],
        penalty: 8,
        description: "Heavy smoking combined with uncontrolled diabetes severely impairs blood \
                      supply and healing, compounding the risk of failed osseointegration",
    },
    SynergyRule {
        id: "smoking-periodontal",
        dimensions: &[Dimension::Smoking, Dimension::GumBleeding],
        conditions: &[
            Condition::Smoking(SMOKER),
            Condition::GumBleeding(&[GumBleeding::Frequently]),
        ],
        penalty: 4,
        description: "Smoking aggravates active gum inflammation and masks its warning signs",
    },
    SynergyRule {
        id: "smoking-failed-implant",
        dimensions: &[Dimension::PriorImplant, Dimension::Smoking],
        conditions: &[
            Condition::PriorImplant(&[PriorImplant::Failed]),
            Condition::Smoking(SMOKER),
        ],
        penalty: 5,
        description: "A previous implant failed and the patient still smokes",
    },
    SynergyRule {
        id: "diabetes-periodontal",
        dimensions: &[Dimension::Diabetes, Dimension::GumBleeding],
        conditions: &[
            Condition::Diabetes(&[Diabetes::Uncontrolled]),
            Condition::GumBleeding(&[GumBleeding::Frequently]),
        ],
        penalty: 4,
        description: "Uncontrolled diabetes and active gum disease reinforce each other",
    },
    SynergyRule {
        id: "periodontitis-active-inflammation",
        dimensions: &[Dimension::ToothLossCause, Dimension::GumBleeding],
        conditions: &[
            Condition::ToothLossCause(&[ToothLossCause::Periodontitis]),
            Condition::GumBleeding(&[GumBleeding::Sometimes, GumBleeding::Frequently]),
        ],
        penalty: 3,
        description: "Teeth were lost to periodontitis and the gums are still inflamed, raising \
                      the risk of peri-implantitis",
    },
    SynergyRule {
        id: "steroid-bone-density",
        dimensions: &[
            Dimension::Corticosteroids,
            Dimension::PriorFractures,
            Dimension::HeightLoss,
        ],
        conditions: &[
            Condition::Corticosteroids(&[Corticosteroids::Yes]),
            Condition::AnyOf(&[
                Condition::PriorFractures(&[PriorFractures::Once, PriorFractures::Multiple]),
                Condition::HeightLoss(&[HeightLoss::Yes]),
            ]),
        ],
        penalty: 4,
        description: "Long-term corticosteroid use alongside signs of reduced bone density",
    },
    SynergyRule {
        id: "bruxism-full-arch",
        dimensions: &[Dimension::Bruxism, Dimension::TeethToReplace],
        conditions: &[
            Condition::Bruxism(&[BruxismProfile::Unguarded]),
            Condition::TeethToReplace(&[TeethToReplace::All]),
        ],
        penalty: 3,
        description: "Unmanaged grinding forces on a full-arch reconstruction",
    },
    SynergyRule {
        id: "postmenopausal-bone",
        dimensions: &[Dimension::Gender, Dimension::Age, Dimension::FamilyOsteoporosis],
        conditions: &[
            Condition::Gender(&[Gender::Female]),
            Condition::AgeAtLeast(50),
            Condition::FamilyOsteoporosis(&[FamilyOsteoporosis::Yes]),
        ],
        penalty: 3,
        description: "Post-menopausal age with a family history of osteoporosis",
    },
];

// ============================================================================
// Classification and severity bands
// ============================================================================

/// Lower bounds (inclusive) of each classification band, best tier first. The last band
/// starts at 0 so every probability falls into exactly one band.
pub const CLASSIFICATION_BANDS: &[(u8, Classification)] = &[
    (90, Classification::Favorable),
    (75, Classification::FavorableWithConditions),
    (55, Classification::Doubtful),
    (0, Classification::Unfavorable),
];

/// Lower bounds (inclusive) of absolute impact per severity tier, highest first.
pub const SEVERITY_BANDS: &[(u32, Severity)] = &[
    (13, Severity::High),
    (6, Severity::Medium),
    (0, Severity::Low),
];

// ============================================================================
// Recommendation templates
// ============================================================================

#[derive(Clone, Copy, Debug)]
pub struct RecommendationTemplate {
    pub dimension: Dimension,
    pub advice: &'static str,
    pub evidence: &'static str,
}

pub const RECOMMENDATIONS: &[RecommendationTemplate] = &[
    RecommendationTemplate {
        dimension: Dimension::Smoking,
        advice: "Stop smoking at least two weeks before surgery and for eight weeks afterwards",
        evidence: "Smokers show roughly double the implant failure rate of non-smokers in \
                   long-term cohort studies",
    },
    RecommendationTemplate {
        dimension: Dimension::Diabetes,
        advice: "Bring HbA1c under 7% with your physician before implant placement",
        evidence: "Poor glycaemic control delays bone healing and raises infection risk",
    },
    RecommendationTemplate {
        dimension: Dimension::PriorImplant,
        advice: "Share the records of the failed implant so the cause can be addressed",
        evidence: "A previous failure is the strongest single predictor of a further failure",
    },
    RecommendationTemplate {
        dimension: Dimension::GumBleeding,
        advice: "Have a periodontal examination and treat gum inflammation before surgery",
        evidence: "Active periodontal disease is associated with peri-implantitis and bone loss",
    },
    RecommendationTemplate {
        dimension: Dimension::OralHygiene,
        advice: "Brush twice a day and clean between teeth daily, with professional cleaning \
                 every six months",
        evidence: "Plaque control is the main modifiable factor in long-term implant survival",
    },
    RecommendationTemplate {
        dimension: Dimension::Bruxism,
        advice: "Get a custom night guard and have your bite assessed",
        evidence: "Grinding overloads implants and is linked to screw loosening and fractures",
    },
    RecommendationTemplate {
        dimension: Dimension::Corticosteroids,
        advice: "Discuss your corticosteroid medication with the surgeon and your physician",
        evidence: "Long-term corticosteroids reduce bone density and slow healing",
    },
    RecommendationTemplate {
        dimension: Dimension::ToothLossCause,
        advice: "Keep up periodontal maintenance visits after the implant is placed",
        evidence: "Patients with a history of periodontitis have a higher rate of \
                   peri-implantitis",
    },
    RecommendationTemplate {
        dimension: Dimension::PriorFractures,
        advice: "Consider a bone density scan before treatment planning",
        evidence: "Fragility fractures can indicate osteoporosis affecting jaw bone quality",
    },
    RecommendationTemplate {
        dimension: Dimension::ToothLossTime,
        advice: "Ask for a 3D scan to assess remaining bone volume; grafting may be needed",
        evidence: "The jaw bone resorbs progressively after tooth loss, most in the first years",
    },
    RecommendationTemplate {
        dimension: Dimension::HeightLoss,
        advice: "Ask your physician whether a bone density assessment is appropriate",
        evidence: "Loss of height is a common sign of vertebral osteoporosis",
    },
    RecommendationTemplate {
        dimension: Dimension::Alcohol,
        advice: "Avoid alcohol in the weeks around surgery and reduce regular consumption",
        evidence: "Regular alcohol intake impairs bone metabolism and wound healing",
    },
    RecommendationTemplate {
        dimension: Dimension::Age,
        advice: "Plan a general health check with your physician before surgery",
        evidence: "Healing capacity declines with age, though age alone rarely rules out implants",
    },
    RecommendationTemplate {
        dimension: Dimension::TeethToReplace,
        advice: "Discuss staged treatment and implant-supported bridge options",
        evidence: "Larger reconstructions involve more implants and more complex loading",
    },
    RecommendationTemplate {
        dimension: Dimension::FamilyOsteoporosis,
        advice: "Mention your family history of osteoporosis during consultation",
        evidence: "Osteoporosis has a strong hereditary component",
    },
];

pub fn recommendation_template(dimension: Dimension) -> Option<&'static RecommendationTemplate> {
    RECOMMENDATIONS.iter().find(|t| t.dimension == dimension)
}

// ============================================================================
// Published view
// ============================================================================

/// One row of the deduction table, for publishing the scoring policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeductionRow {
    pub dimension: Dimension,
    pub answer: String,
    pub penalty: i32,
}

/// One synergy rule, for publishing the scoring policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SynergyRow {
    pub id: String,
    pub dimensions: Vec<Dimension>,
    pub penalty: i32,
    pub description: String,
}

/// One classification band, for publishing the scoring policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClassificationBand {
    pub min_probability: u8,
    pub classification: Classification,
}

fn rows<T: Copy>(
    dimension: Dimension,
    table: &[(T, i32)],
    answer: fn(T) -> &'static str,
) -> impl Iterator<Item = DeductionRow> + '_ {
    table.iter().map(move |(value, penalty)| DeductionRow {
        dimension,
        answer: answer(*value).to_string(),
        penalty: *penalty,
    })
}

/// Every deduction, in dimension priority order.
pub fn deduction_rows() -> Vec<DeductionRow> {
    let mut out = Vec::new();
    out.extend(rows(Dimension::Smoking, SMOKING, Smoking::as_wire));
    out.extend(rows(Dimension::Diabetes, DIABETES, Diabetes::as_wire));
    out.extend(rows(Dimension::PriorImplant, PRIOR_IMPLANT, PriorImplant::as_wire));
    out.extend(rows(Dimension::GumBleeding, GUM_BLEEDING, GumBleeding::as_wire));
    out.extend(rows(Dimension::OralHygiene, ORAL_HYGIENE, OralHygiene::as_wire));
    out.extend(rows(Dimension::Bruxism, BRUXISM, BruxismProfile::label));
    out.extend(rows(Dimension::Corticosteroids, CORTICOSTEROIDS, Corticosteroids::as_wire));
    out.extend(rows(Dimension::ToothLossCause, TOOTH_LOSS_CAUSE, ToothLossCause::as_wire));
    out.extend(rows(Dimension::PriorFractures, PRIOR_FRACTURES, PriorFractures::as_wire));
    out.extend(rows(Dimension::ToothLossTime, TOOTH_LOSS_TIME, ToothLossTime::as_wire));
    out.extend(rows(Dimension::HeightLoss, HEIGHT_LOSS, HeightLoss::as_wire));
    out.extend(rows(Dimension::Alcohol, ALCOHOL, Alcohol::as_wire));
    out.extend(rows(Dimension::Age, AGE, AgeBand::label));
    out.extend(rows(Dimension::TeethToReplace, TEETH_TO_REPLACE, TeethToReplace::as_wire));
    out.extend(rows(
        Dimension::FamilyOsteoporosis,
        FAMILY_OSTEOPOROSIS,
        FamilyOsteoporosis::as_wire,
    ));
    out.extend(rows(Dimension::Gender, GENDER, Gender::as_wire));
    out
}

pub fn synergy_rows() -> Vec<SynergyRow> {
    SYNERGY_RULES
        .iter()
        .map(|rule| SynergyRow {
            id: rule.id.to_string(),
            dimensions: rule.dimensions.to_vec(),
            penalty: rule.penalty,
            description: rule.description.to_string(),
        })
        .collect()
}

pub fn classification_bands() -> Vec<ClassificationBand> {
    CLASSIFICATION_BANDS
        .iter()
        .map(|(min_probability, classification)| ClassificationBand {
            min_probability: *min_probability,
            classification: *classification,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_total<T: Copy + PartialEq>(table: &[(T, i32)], all: &[T]) -> bool {
        all.iter().all(|value| table.iter().filter(|(k, _)| k == value).count() == 1)
    }

    fn is_non_decreasing<T: Copy + PartialEq>(table: &[(T, i32)], risk_order: &[T]) -> bool {
        let penalties: Vec<i32> = risk_order.iter().map(|v| lookup(table, *v)).collect();
        penalties.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn deduction_tables_are_total() {
        assert!(is_total(SMOKING, Smoking::ALL));
        assert!(is_total(DIABETES, Diabetes::ALL));
        assert!(is_total(PRIOR_IMPLANT, PriorImplant::ALL));
        assert!(is_total(GUM_BLEEDING, GumBleeding::ALL));
        assert!(is_total(ORAL_HYGIENE, OralHygiene::ALL));
        assert!(is_total(CORTICOSTEROIDS, Corticosteroids::ALL));
        assert!(is_total(TOOTH_LOSS_CAUSE, ToothLossCause::ALL));
        assert!(is_total(PRIOR_FRACTURES, PriorFractures::ALL));
        assert!(is_total(TOOTH_LOSS_TIME, ToothLossTime::ALL));
        assert!(is_total(HEIGHT_LOSS, HeightLoss::ALL));
        assert!(is_total(ALCOHOL, Alcohol::ALL));
        assert!(is_total(TEETH_TO_REPLACE, TeethToReplace::ALL));
        assert!(is_total(FAMILY_OSTEOPOROSIS, FamilyOsteoporosis::ALL));
        assert!(is_total(GENDER, Gender::ALL));
        assert!(is_total(
            BRUXISM,
            &[
                BruxismProfile::None,
                BruxismProfile::Unsure,
                BruxismProfile::Guarded,
                BruxismProfile::Unguarded,
            ]
        ));
        assert!(is_total(
            AGE,
            &[
                AgeBand::Under50,
                AgeBand::From50To64,
                AgeBand::From65To74,
                AgeBand::From75,
            ]
        ));
    }

    #[test]
    fn deductions_follow_risk_order() {
        assert!(is_non_decreasing(SMOKING, Smoking::ALL));
        assert!(is_non_decreasing(DIABETES, Diabetes::ALL));
        assert!(is_non_decreasing(PRIOR_IMPLANT, PriorImplant::ALL));
        assert!(is_non_decreasing(GUM_BLEEDING, GumBleeding::ALL));
        assert!(is_non_decreasing(ORAL_HYGIENE, OralHygiene::ALL));
        assert!(is_non_decreasing(CORTICOSTEROIDS, Corticosteroids::ALL));
        assert!(is_non_decreasing(TOOTH_LOSS_CAUSE, ToothLossCause::ALL));
        assert!(is_non_decreasing(PRIOR_FRACTURES, PriorFractures::ALL));
        assert!(is_non_decreasing(TOOTH_LOSS_TIME, ToothLossTime::ALL));
        assert!(is_non_decreasing(HEIGHT_LOSS, HeightLoss::ALL));
        assert!(is_non_decreasing(ALCOHOL, Alcohol::ALL));
        assert!(is_non_decreasing(TEETH_TO_REPLACE, TeethToReplace::ALL));
        assert!(is_non_decreasing(FAMILY_OSTEOPOROSIS, FamilyOsteoporosis::ALL));
    }

    #[test]
    fn dimension_priority_matches_declaration_order() {
        for (index, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dimension.priority(), index);
        }
    }

    #[test]
    fn templates_exist_exactly_for_dimensions_that_can_deduct() {
        let rows = deduction_rows();
        for dimension in Dimension::ALL {
            let can_deduct = rows
                .iter()
                .any(|row| row.dimension == dimension && row.penalty > 0);
            assert_eq!(
                recommendation_template(dimension).is_some(),
                can_deduct,
                "template mismatch for {dimension:?}"
            );
        }
        assert!(recommendation_template(Dimension::Gender).is_none());
    }

    #[test]
    fn synergy_rule_ids_are_unique_and_penalties_positive() {
        for (i, rule) in SYNERGY_RULES.iter().enumerate() {
            assert!(rule.penalty > 0, "{} must penalise", rule.id);
            assert!(rule.dimensions.len() >= 2, "{} must combine factors", rule.id);
            assert!(SYNERGY_RULES[i + 1..].iter().all(|other| other.id != rule.id));
        }
    }

    #[test]
    fn published_rows_cover_every_dimension() {
        let rows = deduction_rows();
        for dimension in Dimension::ALL {
            assert!(rows.iter().any(|r| r.dimension == dimension));
        }
        assert!(rows
            .iter()
            .any(|r| r.dimension == Dimension::Smoking && r.answer == "heavy" && r.penalty == 18));
        assert_eq!(synergy_rows().len(), SYNERGY_RULES.len());
        assert_eq!(classification_bands().len(), 4);
    }

    #[test]
    fn bands_end_at_zero() {
        assert_eq!(CLASSIFICATION_BANDS.last().map(|(min, _)| *min), Some(0));
        assert_eq!(SEVERITY_BANDS.last().map(|(min, _)| *min), Some(0));
        assert!(CLASSIFICATION_BANDS.windows(2).all(|w| w[0].0 > w[1].0));
        assert!(SEVERITY_BANDS.windows(2).all(|w| w[0].0 > w[1].0));
    }
}
