//! Patient questionnaire answers.
//!
//! [`PatientAnswers`] is the validated input of the risk engine. Every enumerated answer is a
//! Rust enum, and each enum lists its values in *risk order* (lowest risk first) via `ALL`,
//! which is what the monotonicity guarantees of the engine are stated against.
//!
//! Wire tokens (`as_wire`/`from_wire`) are the canonical kebab-case strings used by the
//! questionnaire boundary and by serde.

use implantx_types::Age;
use serde::{Deserialize, Serialize};

/// Common behaviour of every enumerated answer, for code that handles answers generically.
pub trait AnswerValue: Copy + Sized + 'static {
    /// Every value, lowest risk first.
    fn values() -> &'static [Self];
    /// Canonical wire token.
    fn wire(self) -> &'static str;
    /// Parse a canonical wire token.
    fn parse_wire(s: &str) -> Option<Self>;
}

macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, lowest risk first.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical wire token.
            pub fn as_wire(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Parse a canonical wire token.
            pub fn from_wire(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable description of the answer.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl AnswerValue for $name {
            fn values() -> &'static [Self] {
                Self::ALL
            }

            fn wire(self) -> &'static str {
                self.as_wire()
            }

            fn parse_wire(s: &str) -> Option<Self> {
                Self::from_wire(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire())
            }
        }
    };
}

answer_enum! {
    /// Patient gender. Not risk-ordered.
    Gender {
        Male => "male", "Male",
        Female => "female", "Female",
        Other => "other", "Other",
    }
}

answer_enum! {
    /// Tobacco use.
    Smoking {
        None => "none", "Non-smoker",
        /// Fewer than 10 per day.
        Light => "light", "Light smoker (fewer than 10 per day)",
        /// 10 or more per day.
        Heavy => "heavy", "Heavy smoker (10 or more per day)",
    }
}

answer_enum! {
    /// Alcohol consumption.
    Alcohol {
        None => "none", "No regular alcohol consumption",
        Regular => "regular", "Regular alcohol consumption",
    }
}

answer_enum! {
    /// Diabetes status.
    Diabetes {
        None => "none", "No diabetes",
        Controlled => "controlled", "Controlled diabetes",
        Uncontrolled => "uncontrolled", "Uncontrolled diabetes",
    }
}

answer_enum! {
    /// Teeth grinding or clenching.
    Bruxism {
        None => "none", "No grinding or clenching",
        Unsure => "unsure", "Possible grinding or clenching",
        Yes => "yes", "Grinds or clenches teeth",
    }
}

answer_enum! {
    /// Night guard use. Only meaningful when bruxism is `yes`.
    BruxismGuard {
        Yes => "yes", "Wears a night guard",
        NotApplicable => "not-applicable", "Night guard not applicable",
        No => "no", "Does not wear a night guard",
    }
}

answer_enum! {
    /// How often the gums bleed when brushing.
    GumBleeding {
        Never => "never", "Gums never bleed",
        Sometimes => "sometimes", "Gums sometimes bleed",
        Frequently => "frequently", "Gums frequently bleed",
    }
}

answer_enum! {
    /// Tooth brushing frequency.
    OralHygiene {
        TwicePlusDaily => "twice-plus-daily", "Brushes twice or more per day",
        OnceDaily => "once-daily", "Brushes once per day",
        LessThanOnceDaily => "less-than-once-daily", "Brushes less than once per day",
    }
}

answer_enum! {
    /// Prior bone fractures in adulthood.
    PriorFractures {
        None => "none", "No prior fractures",
        Once => "once", "One prior fracture",
        Multiple => "multiple", "Multiple prior fractures",
    }
}

answer_enum! {
    /// Loss of body height over the years.
    HeightLoss {
        None => "none", "No height loss",
        Unsure => "unsure", "Unsure about height loss",
        Yes => "yes", "Noticeable height loss",
    }
}

answer_enum! {
    /// Osteoporosis in the close family.
    FamilyOsteoporosis {
        None => "none", "No family history of osteoporosis",
        Unknown => "unknown", "Family history of osteoporosis unknown",
        Yes => "yes", "Family history of osteoporosis",
    }
}

answer_enum! {
    /// Long-term corticosteroid medication.
    Corticosteroids {
        None => "none", "No corticosteroid use",
        Unsure => "unsure", "Unsure about corticosteroid use",
        Yes => "yes", "Long-term corticosteroid use",
    }
}

answer_enum! {
    /// Outcome of any earlier implant treatment.
    PriorImplant {
        Success => "success", "Previous implant was successful",
        None => "none", "No previous implants",
        Failed => "failed", "Previous implant failed",
    }
}

answer_enum! {
    /// Why the teeth were lost.
    ToothLossCause {
        Cavity => "cavity", "Tooth lost to decay",
        Trauma => "trauma", "Tooth lost to trauma",
        Other => "other", "Tooth lost for another reason",
        Periodontitis => "periodontitis", "Tooth lost to gum disease (periodontitis)",
    }
}

answer_enum! {
    /// How long ago the teeth were lost. A proxy for remaining bone volume.
    ToothLossTime {
        LessThanOneYear => "less-than-1y", "Tooth lost less than a year ago",
        OneToThreeYears => "1-3y", "Tooth lost one to three years ago",
        MoreThanThreeYears => "more-than-3y", "Tooth lost more than three years ago",
    }
}

answer_enum! {
    /// How many teeth need replacing.
    TeethToReplace {
        OneToTwo => "1-2", "One or two teeth to replace",
        ThreeToEight => "3-8", "Three to eight teeth to replace",
        All => "all", "Full-arch replacement",
    }
}

/// Bruxism answer combined with night-guard use.
///
/// A guard only changes anything when the patient does grind; `not-applicable` alongside
/// `bruxism: yes` counts as unguarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BruxismProfile {
    None,
    Unsure,
    Guarded,
    Unguarded,
}

impl BruxismProfile {
    pub fn label(self) -> &'static str {
        match self {
            BruxismProfile::None => "No grinding or clenching",
            BruxismProfile::Unsure => "Possible grinding or clenching",
            BruxismProfile::Guarded => "Grinds teeth, wears a night guard",
            BruxismProfile::Unguarded => "Grinds teeth without a night guard",
        }
    }
}

/// Age bracket used for scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgeBand {
    Under50,
    From50To64,
    From65To74,
    From75,
}

impl AgeBand {
    pub fn from_age(age: Age) -> Self {
        match age.years() {
            0..=49 => AgeBand::Under50,
            50..=64 => AgeBand::From50To64,
            65..=74 => AgeBand::From65To74,
            _ => AgeBand::From75,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Under50 => "Under 50",
            AgeBand::From50To64 => "Aged 50 to 64",
            AgeBand::From65To74 => "Aged 65 to 74",
            AgeBand::From75 => "Aged 75 or over",
        }
    }
}

/// All questionnaire responses relevant to risk scoring.
///
/// Construction through serde enforces enum membership and the age range, so a value of this
/// type is always in the engine's domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatientAnswers {
    #[schema(value_type = u8)]
    pub age: Age,
    pub gender: Gender,
    pub smoking: Smoking,
    pub alcohol: Alcohol,
    pub diabetes: Diabetes,
    pub bruxism: Bruxism,
    pub bruxism_guard: BruxismGuard,
    pub gum_bleeding: GumBleeding,
    pub oral_hygiene: OralHygiene,
    pub prior_fractures: PriorFractures,
    pub height_loss: HeightLoss,
    pub family_osteoporosis: FamilyOsteoporosis,
    pub corticosteroids: Corticosteroids,
    pub prior_implant: PriorImplant,
    pub tooth_loss_cause: ToothLossCause,
    pub tooth_loss_time: ToothLossTime,
    pub teeth_to_replace: TeethToReplace,
}

impl PatientAnswers {
    pub fn bruxism_profile(&self) -> BruxismProfile {
        match (self.bruxism, self.bruxism_guard) {
            (Bruxism::None, _) => BruxismProfile::None,
            (Bruxism::Unsure, _) => BruxismProfile::Unsure,
            (Bruxism::Yes, BruxismGuard::Yes) => BruxismProfile::Guarded,
            (Bruxism::Yes, BruxismGuard::No | BruxismGuard::NotApplicable) => {
                BruxismProfile::Unguarded
            }
        }
    }

    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_age(self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tokens_round_trip() {
        for value in ToothLossTime::ALL {
            assert_eq!(ToothLossTime::from_wire(value.as_wire()), Some(*value));
        }
        for value in TeethToReplace::ALL {
            assert_eq!(TeethToReplace::from_wire(value.as_wire()), Some(*value));
        }
        assert_eq!(OralHygiene::from_wire("twice"), None);
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&BruxismGuard::NotApplicable).expect("serialise");
        assert_eq!(json, "\"not-applicable\"");
        let parsed: ToothLossTime = serde_json::from_str("\"1-3y\"").expect("deserialise");
        assert_eq!(parsed, ToothLossTime::OneToThreeYears);
    }

    #[test]
    fn guard_only_matters_for_confirmed_bruxism() {
        let cases = [
            (Bruxism::None, BruxismGuard::No, BruxismProfile::None),
            (Bruxism::Unsure, BruxismGuard::No, BruxismProfile::Unsure),
            (Bruxism::Yes, BruxismGuard::Yes, BruxismProfile::Guarded),
            (Bruxism::Yes, BruxismGuard::No, BruxismProfile::Unguarded),
            (Bruxism::Yes, BruxismGuard::NotApplicable, BruxismProfile::Unguarded),
        ];
        for (bruxism, guard, expected) in cases {
            let answers = PatientAnswers {
                bruxism,
                bruxism_guard: guard,
                ..crate::test_support::low_risk_answers()
            };
            assert_eq!(answers.bruxism_profile(), expected);
        }
    }

    #[test]
    fn age_bands_cover_accepted_range() {
        let band = |years| AgeBand::from_age(Age::new(years).expect("valid age"));
        assert_eq!(band(18), AgeBand::Under50);
        assert_eq!(band(49), AgeBand::Under50);
        assert_eq!(band(50), AgeBand::From50To64);
        assert_eq!(band(64), AgeBand::From50To64);
        assert_eq!(band(65), AgeBand::From65To74);
        assert_eq!(band(75), AgeBand::From75);
        assert_eq!(band(120), AgeBand::From75);
    }
}
