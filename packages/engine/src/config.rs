//! Configuration for the property division engine
//!
//! Two layers live here:
//! - Compile-time constants: score bounds, factor thresholds and deltas,
//!   confidence weights and request limits.
//! - [`DivisionConfig`]: the handful of runtime choices a caller may override,
//!   most notably who owns a separate-property item whose owner is unspecified.

use chrono::NaiveDate;

use crate::error::{EngineError, Result};
use crate::types::Spouse;

// ---------------------------------------------------------------------------
// Equity scorer
// ---------------------------------------------------------------------------

/// Baseline score: a perfectly equal split.
pub const BASELINE_SCORE: f64 = 0.5;

/// Lowest share of the marital estate the scorer may award spouse 1.
pub const MIN_SCORE: f64 = 0.3;

/// Highest share of the marital estate the scorer may award spouse 1.
pub const MAX_SCORE: f64 = 0.7;

/// Decimal places kept on the final score.
pub const SCORE_PRECISION: i32 = 4;

/// Marriages shorter than this (years) shift the score toward spouse 2.
pub const SHORT_MARRIAGE_YEARS: f64 = 5.0;

/// Marriages longer than this (years) shift the score toward spouse 1.
pub const LONG_MARRIAGE_YEARS: f64 = 20.0;

/// Used when neither the factors nor the personal info give a duration.
pub const NEUTRAL_MARRIAGE_YEARS: f64 = 10.0;

/// Age gap (years) above which the age rule fires.
pub const AGE_GAP_YEARS: u32 = 10;

/// Income ratio bounds (spouse 1 share of combined income).
pub const INCOME_RATIO_LOW: f64 = 0.3;
pub const INCOME_RATIO_HIGH: f64 = 0.7;

/// Earning-capacity ratio bounds.
pub const EARNING_RATIO_LOW: f64 = 0.4;
pub const EARNING_RATIO_HIGH: f64 = 0.6;

pub const DELTA_DURATION: f64 = 0.05;
pub const DELTA_AGE_GAP: f64 = 0.03;
pub const DELTA_INCOME: f64 = 0.10;
pub const DELTA_EARNING_CAPACITY: f64 = 0.05;
pub const DELTA_HEALTH: f64 = 0.05;
pub const DELTA_CUSTODY: f64 = 0.08;
pub const DELTA_DOMESTIC_VIOLENCE: f64 = 0.10;
pub const DELTA_WASTING: f64 = 0.05;

/// Pennsylvania secondary adjustments.
pub const DELTA_MINOR: f64 = 0.01;
pub const DELTA_SECONDARY: f64 = 0.02;

/// One spouse's separate estate must exceed this multiple of the other's.
pub const SEPARATE_ESTATE_DISPARITY: f64 = 2.0;

/// Sale expenses at or above this amount trigger the centering nudge.
pub const NONTRIVIAL_SALE_EXPENSE: f64 = 1.0;

/// Size of the centering nudge toward the baseline.
pub const CENTERING_NUDGE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Confidence estimator
// ---------------------------------------------------------------------------

pub const CONFIDENCE_START: f64 = 0.95;
pub const CONFIDENCE_FLOOR: f64 = 0.10;
pub const PENALTY_NO_ASSETS: f64 = 0.15;
pub const PENALTY_NO_DEBTS: f64 = 0.10;
pub const PENALTY_NO_ACCOUNTS: f64 = 0.15;
pub const PENALTY_NO_RECORDS: f64 = 0.10;
pub const PENALTY_NO_INCOME: f64 = 0.50;
pub const PENALTY_ONE_INCOME: f64 = 0.15;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of assets plus debts in a single request.
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Payments smaller than this (dollars) are not reported.
pub const MIN_EQUALIZATION_PAYMENT: f64 = 0.01;

/// Environment variable overriding [`DivisionConfig::default_separate_owner`].
pub const ENV_DEFAULT_SEPARATE_OWNER: &str = "PROPDIV_DEFAULT_SEPARATE_OWNER";

/// Runtime configuration for a division.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionConfig {
    /// Owner assigned to a separate-property item with no usable `ownedBy`.
    ///
    /// Defaults to spouse 1. This favors one party arbitrarily, which is why
    /// it is a setting rather than a hidden rule.
    pub default_separate_owner: Spouse,
    /// Reference date for deriving marriage duration when no separation
    /// date is given. `None` means today.
    pub as_of: Option<NaiveDate>,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            default_separate_owner: Spouse::One,
            as_of: None,
        }
    }
}

impl DivisionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(ENV_DEFAULT_SEPARATE_OWNER) {
            config.default_separate_owner = raw.parse().map_err(|_| {
                EngineError::Config(format!(
                    "{ENV_DEFAULT_SEPARATE_OWNER} must be 'spouse1' or 'spouse2', got '{raw}'"
                ))
            })?;
        }
        Ok(config)
    }

    pub fn with_default_separate_owner(mut self, owner: Spouse) -> Self {
        self.default_separate_owner = owner;
        self
    }

    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// The reference date, falling back to the local date.
    pub fn as_of_or_today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_reasonable() {
        assert!(MIN_SCORE < BASELINE_SCORE && BASELINE_SCORE < MAX_SCORE);
        assert!((MIN_SCORE + MAX_SCORE - 1.0).abs() < 1e-12, "Bounds should be symmetric");

        assert!(SHORT_MARRIAGE_YEARS < NEUTRAL_MARRIAGE_YEARS);
        assert!(NEUTRAL_MARRIAGE_YEARS < LONG_MARRIAGE_YEARS);

        assert!(INCOME_RATIO_LOW < 0.5 && INCOME_RATIO_HIGH > 0.5);
        assert!(EARNING_RATIO_LOW < 0.5 && EARNING_RATIO_HIGH > 0.5);

        assert!(DELTA_MINOR < DELTA_SECONDARY);
        assert!(DELTA_SECONDARY < DELTA_DURATION);

        assert!(CONFIDENCE_FLOOR > 0.0 && CONFIDENCE_START <= 1.0);

        assert!(MAX_LINE_ITEMS >= 1_000, "Should allow large estates");
        assert!(MAX_LINE_ITEMS <= 100_000, "Should limit abusive requests");
    }

    #[test]
    fn test_default_owner_is_spouse1() {
        assert_eq!(DivisionConfig::default().default_separate_owner, Spouse::One);
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let config = DivisionConfig::new()
            .with_default_separate_owner(Spouse::Two)
            .with_as_of(date);
        assert_eq!(config.default_separate_owner, Spouse::Two);
        assert_eq!(config.as_of_or_today(), date);
    }
}
