//! Validated primitive types shared across the ImplantX workspace.
//!
//! Each type guarantees its invariant once constructed, including when it is deserialised, so
//! downstream code never has to re-check ranges.

/// Errors that can occur when constructing validated primitive types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The age is outside the accepted questionnaire range.
    #[error("age {0} is outside the accepted range {min}..={max}", min = Age::MIN, max = Age::MAX)]
    AgeOutOfRange(i64),

    /// The percentage is outside `0..=100`.
    #[error("percentage {0} is outside the range 0..=100")]
    PercentageOutOfRange(i64),
}

/// Patient age in whole years, guaranteed to be within `18..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, utoipa::ToSchema)]
pub struct Age(u8);

impl Age {
    /// Youngest accepted age.
    pub const MIN: u8 = 18;
    /// Oldest accepted age.
    pub const MAX: u8 = 120;

    /// Creates a new `Age` from a whole number of years.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::AgeOutOfRange`] if `years` is below 18 or above 120.
    pub fn new(years: i64) -> Result<Self, TypesError> {
        if years < i64::from(Self::MIN) || years > i64::from(Self::MAX) {
            return Err(TypesError::AgeOutOfRange(years));
        }
        Ok(Self(years as u8))
    }

    /// Returns the age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let years = i64::deserialize(deserializer)?;
        Age::new(years).map_err(serde::de::Error::custom)
    }
}

/// A whole-number percentage, guaranteed to be within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, utoipa::ToSchema)]
pub struct Percentage(u8);

impl Percentage {
    /// Lowest representable percentage.
    pub const ZERO: Percentage = Percentage(0);
    /// Highest representable percentage.
    pub const HUNDRED: Percentage = Percentage(100);

    /// Creates a new `Percentage`.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::PercentageOutOfRange`] if `value` is negative or above 100.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if !(0..=100).contains(&value) {
            return Err(TypesError::PercentageOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    /// Creates a `Percentage`, clamping `value` into `0..=100`.
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Returns the percentage as an integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl serde::Serialize for Percentage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Percentage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Percentage::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_accepts_bounds() {
        assert_eq!(Age::new(18).expect("min age").years(), 18);
        assert_eq!(Age::new(120).expect("max age").years(), 120);
    }

    #[test]
    fn age_rejects_out_of_range() {
        assert_eq!(Age::new(17), Err(TypesError::AgeOutOfRange(17)));
        assert_eq!(Age::new(121), Err(TypesError::AgeOutOfRange(121)));
        assert_eq!(Age::new(-4), Err(TypesError::AgeOutOfRange(-4)));
    }

    #[test]
    fn age_deserialisation_enforces_range() {
        let age: Age = serde_json::from_str("45").expect("valid age");
        assert_eq!(age.years(), 45);

        let err = serde_json::from_str::<Age>("12").expect_err("should reject minor");
        assert!(err.to_string().contains("outside the accepted range"));
    }

    #[test]
    fn percentage_saturates() {
        assert_eq!(Percentage::saturating(-10), Percentage::ZERO);
        assert_eq!(Percentage::saturating(250), Percentage::HUNDRED);
        assert_eq!(Percentage::saturating(73).value(), 73);
    }

    #[test]
    fn percentage_rejects_out_of_range() {
        assert!(Percentage::new(101).is_err());
        assert!(Percentage::new(-1).is_err());
        assert_eq!(Percentage::new(0).expect("zero").to_string(), "0%");
    }
}
