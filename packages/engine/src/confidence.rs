//! Confidence estimator
//!
//! A completeness heuristic, not a statistical interval: the more
//! verifiable financial detail a request carries, the closer the value is
//! to [`CONFIDENCE_START`]. Missing records and zero incomes pull it down.
//! Incomes that were never reported carry no penalty.

use serde::{Deserialize, Serialize};

use crate::config::{
    CONFIDENCE_FLOOR, CONFIDENCE_START, PENALTY_NO_ACCOUNTS, PENALTY_NO_ASSETS, PENALTY_NO_DEBTS,
    PENALTY_NO_INCOME, PENALTY_NO_RECORDS, PENALTY_ONE_INCOME,
};
use crate::types::round_to;

/// What the estimator looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceInputs {
    pub asset_count: usize,
    pub debt_count: usize,
    pub account_count: usize,
    /// `None` when the request carried no income figures
    pub spouse1_income: Option<f64>,
    pub spouse2_income: Option<f64>,
}

fn has_income(amount: Option<f64>) -> bool {
    amount.is_some_and(|a| a.is_finite() && a > 0.0)
}

/// Estimate confidence in `[CONFIDENCE_FLOOR, CONFIDENCE_START]`.
pub fn estimate_confidence(inputs: &ConfidenceInputs) -> f64 {
    let mut confidence = CONFIDENCE_START;

    let no_assets = inputs.asset_count == 0;
    let no_debts = inputs.debt_count == 0;
    let no_accounts = inputs.account_count == 0;

    if no_assets {
        confidence -= PENALTY_NO_ASSETS;
    }
    if no_debts {
        confidence -= PENALTY_NO_DEBTS;
    }
    if no_accounts {
        confidence -= PENALTY_NO_ACCOUNTS;
    }
    if no_assets && no_debts && no_accounts {
        confidence -= PENALTY_NO_RECORDS;
    }

    let reported = inputs.spouse1_income.is_some() || inputs.spouse2_income.is_some();
    if reported {
        match (has_income(inputs.spouse1_income), has_income(inputs.spouse2_income)) {
            (false, false) => confidence -= PENALTY_NO_INCOME,
            (true, false) | (false, true) => confidence -= PENALTY_ONE_INCOME,
            (true, true) => {}
        }
    }

    round_to(confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_START), 2)
}
