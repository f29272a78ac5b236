//! Constants used throughout the ImplantX core crate.
//!
//! Scoring bounds live here; the per-answer weights live in [`crate::tables`].

/// Success probability (percent) of an idealised patient before any deduction.
pub const BASELINE_SUCCESS: i32 = 95;

/// Lowest success probability (percent) the engine reports.
pub const FLOOR_SUCCESS: i32 = 35;

/// Highest success probability (percent) the engine reports, bonuses included.
pub const CEILING_SUCCESS: i32 = 98;

/// Smallest risk-factor impact (percentage points) that produces a recommendation.
pub const MIN_RECOMMENDATION_IMPACT: i32 = 1;

/// Number of risk factors shown in a free-tier summary.
pub const FREE_TIER_TOP_FACTORS: usize = 3;

/// Extra osseointegration weeks when healing is compromised.
pub const COMPROMISED_HEALING_EXTRA_WEEKS: u16 = 8;
