//! Output records of a division

use serde::Serialize;

use crate::classifier::{serialize_rendered, Classification, Reasoning};
use crate::jurisdiction::Jurisdiction;
use crate::scorer::Adjustment;
use crate::types::{Regime, Spouse};

/// How one asset was divided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDivision {
    pub asset_id: String,
    pub description: String,
    pub total_value: f64,
    /// Dollars notionally allocated to spouse 1
    pub spouse1_share: f64,
    /// Dollars notionally allocated to spouse 2
    pub spouse2_share: f64,
    #[serde(serialize_with = "serialize_rendered")]
    pub reasoning: Reasoning,
    pub classification: Classification,
    /// Spouse keeping an indivisible marital item in kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awarded_to: Option<Spouse>,
}

/// How one debt was divided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtDivision {
    pub debt_id: String,
    pub description: String,
    pub total_balance: f64,
    pub spouse1_share: f64,
    pub spouse2_share: f64,
    #[serde(serialize_with = "serialize_rendered")]
    pub reasoning: Reasoning,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awarded_to: Option<Spouse>,
}

/// Complete result of a division.
///
/// An item split between the spouses appears in both spouses' lists. An
/// item awarded in kind appears only in the recipient's list, while its
/// division record still carries the notional fractional split.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDivision {
    pub jurisdiction: Jurisdiction,
    pub distribution_type: Regime,
    pub spouse1_assets: Vec<AssetDivision>,
    pub spouse2_assets: Vec<AssetDivision>,
    pub spouse1_debts: Vec<DebtDivision>,
    pub spouse2_debts: Vec<DebtDivision>,
    /// Net dollars spouse 1 actually receives, before any equalization payment
    pub total_spouse1_value: f64,
    /// Net dollars spouse 2 actually receives, before any equalization payment
    pub total_spouse2_value: f64,
    /// Target ratio of the net marital estate for spouse 1
    pub spouse1_share: f64,
    pub spouse2_share: f64,
    pub total_marital_assets: f64,
    pub total_marital_debts: f64,
    pub total_separate_assets: f64,
    pub total_separate_debts: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equalization_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_from: Option<Spouse>,
    pub confidence_level: f64,
    /// Equity adjustments behind the ratio (equitable jurisdictions only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equity_adjustments: Vec<Adjustment>,
}

impl PropertyDivision {
    /// Net marital estate: marital assets minus marital debts.
    pub fn net_marital_estate(&self) -> f64 {
        self.total_marital_assets - self.total_marital_debts
    }

    /// Every asset division exactly once.
    pub fn asset_divisions(&self) -> Vec<&AssetDivision> {
        let mut seen = std::collections::HashSet::new();
        self.spouse1_assets
            .iter()
            .chain(self.spouse2_assets.iter())
            .filter(|d| seen.insert(d.asset_id.as_str()))
            .collect()
    }

    /// Every debt division exactly once.
    pub fn debt_divisions(&self) -> Vec<&DebtDivision> {
        let mut seen = std::collections::HashSet::new();
        self.spouse1_debts
            .iter()
            .chain(self.spouse2_debts.iter())
            .filter(|d| seen.insert(d.debt_id.as_str()))
            .collect()
    }

    /// Net dollars for a spouse after the equalization payment changes hands.
    pub fn net_after_equalization(&self, spouse: Spouse) -> f64 {
        let base = match spouse {
            Spouse::One => self.total_spouse1_value,
            Spouse::Two => self.total_spouse2_value,
        };
        match (self.equalization_payment, self.payment_from) {
            (Some(amount), Some(payer)) if payer == spouse => base - amount,
            (Some(amount), Some(_)) => base + amount,
            _ => base,
        }
    }
}
