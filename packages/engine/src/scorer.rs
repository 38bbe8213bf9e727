//! Equity factor scorer
//!
//! Turns an [`EquitableDistributionFactors`] bundle into spouse 1's share of
//! the net marital estate for equitable-distribution jurisdictions.
//!
//! Scoring starts at the 0.5 baseline and adds the delta of every rule whose
//! predicate holds. Rules are independent and their deltas are summed, so the
//! order of the rule tables does not affect the result. The sum is clamped to
//! `[MIN_SCORE, MAX_SCORE]` exactly once, after every rule (and the centering
//! nudge) has been applied.
//!
//! # Example
//!
//! ```
//! use propdiv_engine::{score_equity_factors, EquitableDistributionFactors};
//!
//! let factors = EquitableDistributionFactors {
//!     marriage_duration: Some(3.0),
//!     ..Default::default()
//! };
//! assert!((score_equity_factors(&factors) - 0.45).abs() < 1e-9);
//! ```

use serde::Serialize;

use crate::config::{
    AGE_GAP_YEARS, BASELINE_SCORE, CENTERING_NUDGE, DELTA_AGE_GAP, DELTA_CUSTODY,
    DELTA_DOMESTIC_VIOLENCE, DELTA_DURATION, DELTA_EARNING_CAPACITY, DELTA_HEALTH, DELTA_INCOME,
    DELTA_MINOR, DELTA_SECONDARY, DELTA_WASTING, EARNING_RATIO_HIGH, EARNING_RATIO_LOW,
    INCOME_RATIO_HIGH, INCOME_RATIO_LOW, LONG_MARRIAGE_YEARS, MAX_SCORE, MIN_SCORE,
    NONTRIVIAL_SALE_EXPENSE, SCORE_PRECISION, SEPARATE_ESTATE_DISPARITY, SHORT_MARRIAGE_YEARS,
};
use crate::model::{is_documented, one_sided, EquitableDistributionFactors, PennsylvaniaFactors};
use crate::types::{round_to, CustodyArrangement, Spouse};

/// Factor a scoring rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityFactor {
    MarriageDuration,
    AgeGap,
    IncomeRatio,
    EarningCapacity,
    Health,
    Custody,
    DomesticViolence,
    WastingOfAssets,
    PriorMarriage,
    EducationContribution,
    FutureOpportunities,
    Needs,
    EconomicCircumstances,
    SeparateEstate,
    SaleExpense,
}

/// A `(predicate, delta)` pair over some factor record.
struct Rule<F> {
    factor: EquityFactor,
    description: &'static str,
    applies: fn(&F) -> bool,
    delta: f64,
}

const BASE_RULES: &[Rule<EquitableDistributionFactors>] = &[
    Rule {
        factor: EquityFactor::MarriageDuration,
        description: "Short marriage",
        applies: |f| f.marriage_years() < SHORT_MARRIAGE_YEARS,
        delta: -DELTA_DURATION,
    },
    Rule {
        factor: EquityFactor::MarriageDuration,
        description: "Long marriage",
        applies: |f| f.marriage_years() > LONG_MARRIAGE_YEARS,
        delta: DELTA_DURATION,
    },
    Rule {
        factor: EquityFactor::AgeGap,
        description: "Spouse 1 significantly older",
        applies: |f| f.significantly_older() == Some(Spouse::One),
        delta: -DELTA_AGE_GAP,
    },
    Rule {
        factor: EquityFactor::AgeGap,
        description: "Spouse 2 significantly older",
        applies: |f| f.significantly_older() == Some(Spouse::Two),
        delta: DELTA_AGE_GAP,
    },
    Rule {
        factor: EquityFactor::IncomeRatio,
        description: "Spouse 1 earns far less",
        applies: |f| f.income_ratio() < INCOME_RATIO_LOW,
        delta: DELTA_INCOME,
    },
    Rule {
        factor: EquityFactor::IncomeRatio,
        description: "Spouse 1 earns far more",
        applies: |f| f.income_ratio() > INCOME_RATIO_HIGH,
        delta: -DELTA_INCOME,
    },
    Rule {
        factor: EquityFactor::EarningCapacity,
        description: "Spouse 1 has lower earning capacity",
        applies: |f| f.earning_capacity_ratio() < EARNING_RATIO_LOW,
        delta: DELTA_EARNING_CAPACITY,
    },
    Rule {
        factor: EquityFactor::EarningCapacity,
        description: "Spouse 1 has higher earning capacity",
        applies: |f| f.earning_capacity_ratio() > EARNING_RATIO_HIGH,
        delta: -DELTA_EARNING_CAPACITY,
    },
    Rule {
        factor: EquityFactor::Health,
        description: "Spouse 1 in poor health",
        applies: |f| f.spouse1_health.is_poor() && !f.spouse2_health.is_poor(),
        delta: DELTA_HEALTH,
    },
    Rule {
        factor: EquityFactor::Health,
        description: "Spouse 2 in poor health",
        applies: |f| f.spouse2_health.is_poor() && !f.spouse1_health.is_poor(),
        delta: -DELTA_HEALTH,
    },
    Rule {
        factor: EquityFactor::Custody,
        description: "Sole custody to spouse 1",
        applies: |f| f.custody == CustodyArrangement::SoleSpouse1,
        delta: DELTA_CUSTODY,
    },
    Rule {
        factor: EquityFactor::Custody,
        description: "Sole custody to spouse 2",
        applies: |f| f.custody == CustodyArrangement::SoleSpouse2,
        delta: -DELTA_CUSTODY,
    },
    Rule {
        factor: EquityFactor::DomesticViolence,
        description: "Domestic violence",
        applies: |f| f.domestic_violence,
        delta: DELTA_DOMESTIC_VIOLENCE,
    },
    Rule {
        factor: EquityFactor::WastingOfAssets,
        description: "Wasting of marital assets",
        applies: |f| f.wasting_of_assets,
        delta: DELTA_WASTING,
    },
];

/// Non-negative finite estate value.
fn estate(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn estate_disparity(pa: &PennsylvaniaFactors) -> Option<Spouse> {
    let (e1, e2) = (estate(pa.spouse1_separate_estate), estate(pa.spouse2_separate_estate));
    if e1 > 0.0 && e2 > 0.0 {
        if e1 > SEPARATE_ESTATE_DISPARITY * e2 {
            return Some(Spouse::One);
        }
        if e2 > SEPARATE_ESTATE_DISPARITY * e1 {
            return Some(Spouse::Two);
        }
    }
    None
}

fn sole_estate(pa: &PennsylvaniaFactors) -> Option<Spouse> {
    one_sided(
        estate(pa.spouse1_separate_estate) > 0.0,
        estate(pa.spouse2_separate_estate) > 0.0,
    )
}

// Station and other-income-source text is informational and carries no rule.
const PENNSYLVANIA_RULES: &[Rule<PennsylvaniaFactors>] = &[
    Rule {
        factor: EquityFactor::PriorMarriage,
        description: "Only spouse 1 was previously married",
        applies: |p| one_sided(p.spouse1_prior_marriage, p.spouse2_prior_marriage) == Some(Spouse::One),
        delta: DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::PriorMarriage,
        description: "Only spouse 2 was previously married",
        applies: |p| one_sided(p.spouse1_prior_marriage, p.spouse2_prior_marriage) == Some(Spouse::Two),
        delta: -DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::EducationContribution,
        description: "Spouse 1 contributed to spouse 2's education or training",
        applies: |p| {
            one_sided(p.spouse1_contributed_to_education, p.spouse2_contributed_to_education)
                == Some(Spouse::One)
        },
        delta: DELTA_SECONDARY,
    },
    Rule {
        factor: EquityFactor::EducationContribution,
        description: "Spouse 2 contributed to spouse 1's education or training",
        applies: |p| {
            one_sided(p.spouse1_contributed_to_education, p.spouse2_contributed_to_education)
                == Some(Spouse::Two)
        },
        delta: -DELTA_SECONDARY,
    },
    Rule {
        factor: EquityFactor::FutureOpportunities,
        description: "Future acquisition opportunities documented for spouse 1 only",
        applies: |p| {
            one_sided(
                is_documented(&p.spouse1_future_opportunities),
                is_documented(&p.spouse2_future_opportunities),
            ) == Some(Spouse::One)
        },
        delta: -DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::FutureOpportunities,
        description: "Future acquisition opportunities documented for spouse 2 only",
        applies: |p| {
            one_sided(
                is_documented(&p.spouse1_future_opportunities),
                is_documented(&p.spouse2_future_opportunities),
            ) == Some(Spouse::Two)
        },
        delta: DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::Needs,
        description: "Needs documented for spouse 1 only",
        applies: |p| {
            one_sided(is_documented(&p.spouse1_needs), is_documented(&p.spouse2_needs))
                == Some(Spouse::One)
        },
        delta: DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::Needs,
        description: "Needs documented for spouse 2 only",
        applies: |p| {
            one_sided(is_documented(&p.spouse1_needs), is_documented(&p.spouse2_needs))
                == Some(Spouse::Two)
        },
        delta: -DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::EconomicCircumstances,
        description: "Economic circumstances documented for spouse 1 only",
        applies: |p| {
            one_sided(
                is_documented(&p.spouse1_economic_circumstances),
                is_documented(&p.spouse2_economic_circumstances),
            ) == Some(Spouse::One)
        },
        delta: DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::EconomicCircumstances,
        description: "Economic circumstances documented for spouse 2 only",
        applies: |p| {
            one_sided(
                is_documented(&p.spouse1_economic_circumstances),
                is_documented(&p.spouse2_economic_circumstances),
            ) == Some(Spouse::Two)
        },
        delta: -DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::SeparateEstate,
        description: "Spouse 1's separate estate exceeds twice spouse 2's",
        applies: |p| estate_disparity(p) == Some(Spouse::One),
        delta: -DELTA_SECONDARY,
    },
    Rule {
        factor: EquityFactor::SeparateEstate,
        description: "Spouse 2's separate estate exceeds twice spouse 1's",
        applies: |p| estate_disparity(p) == Some(Spouse::Two),
        delta: DELTA_SECONDARY,
    },
    Rule {
        factor: EquityFactor::SeparateEstate,
        description: "Only spouse 1 has a separate estate",
        applies: |p| sole_estate(p) == Some(Spouse::One),
        delta: -DELTA_MINOR,
    },
    Rule {
        factor: EquityFactor::SeparateEstate,
        description: "Only spouse 2 has a separate estate",
        applies: |p| sole_estate(p) == Some(Spouse::Two),
        delta: DELTA_MINOR,
    },
];

/// A rule that fired, with its contribution to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub factor: EquityFactor,
    pub description: &'static str,
    pub delta: f64,
}

/// Scorer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityScore {
    /// Spouse 1's share of the net marital estate, in `[MIN_SCORE, MAX_SCORE]`
    pub spouse1_share: f64,
    /// `1 - spouse1_share`
    pub spouse2_share: f64,
    /// Baseline plus all deltas, before clamping
    pub raw_score: f64,
    /// Rules that fired, base rules first
    pub adjustments: Vec<Adjustment>,
}

impl EquityScore {
    /// Whether clamping changed the score.
    pub fn was_clamped(&self) -> bool {
        !(MIN_SCORE..=MAX_SCORE).contains(&self.raw_score)
    }
}

fn fire<F>(rules: &[Rule<F>], record: &F, out: &mut Vec<Adjustment>) {
    out.extend(
        rules
            .iter()
            .filter(|rule| (rule.applies)(record))
            .map(|rule| Adjustment {
                factor: rule.factor,
                description: rule.description,
                delta: rule.delta,
            }),
    );
}

/// Move `score` toward the baseline by at most [`CENTERING_NUDGE`].
///
/// Never crosses the baseline and does nothing at the baseline.
fn centering_delta(score: f64) -> f64 {
    let deviation = score - BASELINE_SCORE;
    if deviation.abs() < f64::EPSILON {
        return 0.0;
    }
    -deviation.signum() * deviation.abs().min(CENTERING_NUDGE)
}

/// Score a factor bundle, keeping the list of applied adjustments.
pub fn score(factors: &EquitableDistributionFactors) -> EquityScore {
    let mut adjustments = Vec::new();
    fire(BASE_RULES, factors, &mut adjustments);

    let pennsylvania = factors.pennsylvania();
    if let Some(pa) = pennsylvania {
        fire(PENNSYLVANIA_RULES, pa, &mut adjustments);
    }

    let mut raw_score = BASELINE_SCORE + adjustments.iter().map(|a| a.delta).sum::<f64>();

    if let Some(pa) = pennsylvania {
        if estate(pa.expense_of_sale_assets) >= NONTRIVIAL_SALE_EXPENSE {
            let nudge = centering_delta(raw_score);
            if nudge != 0.0 {
                adjustments.push(Adjustment {
                    factor: EquityFactor::SaleExpense,
                    description: "Expense of sale moderates the deviation",
                    delta: nudge,
                });
                raw_score += nudge;
            }
        }
    }

    let spouse1_share = round_to(raw_score.clamp(MIN_SCORE, MAX_SCORE), SCORE_PRECISION);

    for adjustment in &adjustments {
        tracing::debug!(
            factor = ?adjustment.factor,
            delta = adjustment.delta,
            "Equity adjustment applied"
        );
    }
    tracing::debug!(raw_score, spouse1_share, "Equity score computed");

    EquityScore {
        spouse1_share,
        spouse2_share: 1.0 - spouse1_share,
        raw_score,
        adjustments,
    }
}

/// Spouse 1's share of the net marital estate for a factor bundle.
pub fn score_equity_factors(factors: &EquitableDistributionFactors) -> f64 {
    score(factors).spouse1_share
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JurisdictionFactors;
    use crate::types::HealthStatus;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn pennsylvania(pa: PennsylvaniaFactors) -> EquitableDistributionFactors {
        EquitableDistributionFactors {
            extension: JurisdictionFactors::Pennsylvania(pa),
            ..Default::default()
        }
    }

    #[test]
    fn test_neutral_is_exactly_half() {
        let result = score(&EquitableDistributionFactors::neutral());
        assert_eq!(result.spouse1_share, 0.5);
        assert_eq!(result.spouse2_share, 0.5);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_neutral_pennsylvania_is_exactly_half() {
        let factors = pennsylvania(PennsylvaniaFactors::default());
        assert_eq!(score_equity_factors(&factors), 0.5);
    }

    #[test]
    fn test_marriage_duration() {
        let short = EquitableDistributionFactors {
            marriage_duration: Some(3.0),
            ..Default::default()
        };
        approx(score_equity_factors(&short), 0.45);

        let long = EquitableDistributionFactors {
            marriage_duration: Some(22.0),
            ..Default::default()
        };
        approx(score_equity_factors(&long), 0.55);

        let boundary = EquitableDistributionFactors {
            marriage_duration: Some(20.0),
            ..Default::default()
        };
        approx(score_equity_factors(&boundary), 0.5);
    }

    #[test]
    fn test_income_disparity() {
        let factors = EquitableDistributionFactors {
            spouse1_income: 20_000.0,
            spouse2_income: 80_000.0,
            ..Default::default()
        };
        approx(score_equity_factors(&factors), 0.6);

        let reversed = EquitableDistributionFactors {
            spouse1_income: 80_000.0,
            spouse2_income: 20_000.0,
            ..Default::default()
        };
        approx(score_equity_factors(&reversed), 0.4);
    }

    #[test]
    fn test_age_health_custody() {
        let factors = EquitableDistributionFactors {
            spouse1_age: Some(40),
            spouse2_age: Some(55),
            spouse2_health: HealthStatus::Poor,
            custody: CustodyArrangement::SoleSpouse1,
            ..Default::default()
        };
        // +0.03 - 0.05 + 0.08
        approx(score_equity_factors(&factors), 0.56);
    }

    #[test]
    fn test_both_in_poor_health_is_neutral() {
        let factors = EquitableDistributionFactors {
            spouse1_health: HealthStatus::Poor,
            spouse2_health: HealthStatus::Poor,
            ..Default::default()
        };
        assert_eq!(score_equity_factors(&factors), 0.5);
    }

    #[test]
    fn test_clamped_once_at_the_end() {
        let factors = EquitableDistributionFactors {
            marriage_duration: Some(30.0),
            spouse2_age: Some(70),
            spouse1_age: Some(45),
            spouse1_income: 0.0,
            spouse2_income: 100_000.0,
            spouse1_earning_capacity: 10_000.0,
            spouse2_earning_capacity: 90_000.0,
            spouse1_health: HealthStatus::Poor,
            custody: CustodyArrangement::SoleSpouse1,
            domestic_violence: true,
            wasting_of_assets: true,
            ..Default::default()
        };
        let result = score(&factors);
        approx(result.raw_score, 1.01);
        assert!(result.was_clamped());
        assert_eq!(result.spouse1_share, 0.7);
        approx(result.spouse2_share, 0.3);
    }

    #[test]
    fn test_lower_clamp() {
        let factors = EquitableDistributionFactors {
            marriage_duration: Some(1.0),
            spouse1_age: Some(70),
            spouse2_age: Some(30),
            spouse1_income: 100_000.0,
            spouse1_earning_capacity: 100_000.0,
            spouse2_health: HealthStatus::Poor,
            custody: CustodyArrangement::SoleSpouse2,
            ..Default::default()
        };
        assert_eq!(score_equity_factors(&factors), 0.3);
    }

    #[test]
    fn test_pennsylvania_secondary_factors() {
        let factors = pennsylvania(PennsylvaniaFactors {
            spouse1_prior_marriage: true,
            spouse1_contributed_to_education: true,
            spouse2_future_opportunities: Some("Medical residency".to_string()),
            spouse1_needs: Some("Ongoing therapy".to_string()),
            ..Default::default()
        });
        // +0.01 +0.02 +0.01 +0.01
        approx(score_equity_factors(&factors), 0.55);
    }

    #[test]
    fn test_separate_estate_disparity() {
        let disparity = pennsylvania(PennsylvaniaFactors {
            spouse1_separate_estate: 300_000.0,
            spouse2_separate_estate: 100_000.0,
            ..Default::default()
        });
        approx(score_equity_factors(&disparity), 0.48);

        let close = pennsylvania(PennsylvaniaFactors {
            spouse1_separate_estate: 150_000.0,
            spouse2_separate_estate: 100_000.0,
            ..Default::default()
        });
        assert_eq!(score_equity_factors(&close), 0.5);

        let sole = pennsylvania(PennsylvaniaFactors {
            spouse2_separate_estate: 50_000.0,
            ..Default::default()
        });
        let result = score(&sole);
        approx(result.spouse1_share, 0.51);
        assert_eq!(result.adjustments.len(), 1);
    }

    #[test]
    fn test_centering_nudge_moves_toward_baseline() {
        let factors = EquitableDistributionFactors {
            marriage_duration: Some(25.0),
            extension: JurisdictionFactors::Pennsylvania(PennsylvaniaFactors {
                expense_of_sale_assets: 12_000.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = score(&factors);
        approx(result.spouse1_share, 0.54);
        assert_eq!(
            result.adjustments.last().map(|a| a.factor),
            Some(EquityFactor::SaleExpense)
        );

        let below = EquitableDistributionFactors {
            marriage_duration: Some(2.0),
            ..factors.clone()
        };
        approx(score_equity_factors(&below), 0.46);
    }

    #[test]
    fn test_centering_nudge_skipped_at_baseline() {
        let factors = pennsylvania(PennsylvaniaFactors {
            expense_of_sale_assets: 12_000.0,
            ..Default::default()
        });
        let result = score(&factors);
        assert_eq!(result.spouse1_share, 0.5);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_centering_nudge_never_crosses_baseline() {
        assert_eq!(centering_delta(0.5), 0.0);
        approx(0.505 + centering_delta(0.505), 0.5);
        approx(0.495 + centering_delta(0.495), 0.5);
        approx(0.6 + centering_delta(0.6), 0.59);
    }

    #[test]
    fn test_trivial_sale_expense_ignored() {
        let factors = EquitableDistributionFactors {
            marriage_duration: Some(25.0),
            extension: JurisdictionFactors::Pennsylvania(PennsylvaniaFactors {
                expense_of_sale_assets: 0.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        approx(score_equity_factors(&factors), 0.55);
    }

    #[test]
    fn test_rules_are_order_independent() {
        let factors = EquitableDistributionFactors {
            marriage_duration: Some(2.0),
            spouse1_income: 10_000.0,
            spouse2_income: 90_000.0,
            custody: CustodyArrangement::SoleSpouse2,
            wasting_of_assets: true,
            ..Default::default()
        };
        let mut forward = Vec::new();
        fire(BASE_RULES, &factors, &mut forward);
        let forward_sum: f64 = forward.iter().map(|a| a.delta).sum();
        let reverse_sum: f64 = forward.iter().rev().map(|a| a.delta).sum();
        approx(forward_sum, reverse_sum);
        approx(score_equity_factors(&factors), 0.52);
    }

    #[test]
    fn test_output_always_in_bounds() {
        let custodies = [
            CustodyArrangement::SoleSpouse1,
            CustodyArrangement::SoleSpouse2,
            CustodyArrangement::Shared,
            CustodyArrangement::None,
        ];
        for duration in [0.0, 4.0, 10.0, 21.0, 50.0] {
            for income1 in [0.0, 10_000.0, 50_000.0, 200_000.0] {
                for custody in custodies {
                    for flag in [false, true] {
                        let factors = EquitableDistributionFactors {
                            marriage_duration: Some(duration),
                            spouse1_income: income1,
                            spouse2_income: 50_000.0,
                            custody,
                            domestic_violence: flag,
                            wasting_of_assets: flag,
                            ..Default::default()
                        };
                        let s = score_equity_factors(&factors);
                        assert!((MIN_SCORE..=MAX_SCORE).contains(&s), "out of bounds: {s}");
                    }
                }
            }
        }
    }
}
