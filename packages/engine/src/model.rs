//! Input records for a division
//!
//! Everything the caller supplies: personal info, line items (assets and
//! debts), financial accounts, and the equity-factor bundle used in
//! equitable-distribution jurisdictions. The engine reads these records and
//! never mutates them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config;
use crate::jurisdiction::Jurisdiction;
use crate::types::{CustodyArrangement, HealthStatus, Owner, Spouse};

/// Deserialize a flag leniently: anything that is not a recognizable `true`
/// reads as `false`, so a malformed flag falls back to marital treatment.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    })
}

/// Parties, place and dates of the marriage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub jurisdiction: Jurisdiction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separation_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse2_name: Option<String>,
}

impl PersonalInfo {
    pub fn new(jurisdiction: Jurisdiction) -> Self {
        Self {
            jurisdiction,
            marriage_date: None,
            separation_date: None,
            spouse1_name: None,
            spouse2_name: None,
        }
    }

    pub fn with_dates(mut self, married: NaiveDate, separated: Option<NaiveDate>) -> Self {
        self.marriage_date = Some(married);
        self.separation_date = separated;
        self
    }

    /// Whole years of marriage, measured to the separation date or `as_of`.
    ///
    /// Returns `None` without a marriage date or when the end precedes it.
    pub fn marriage_duration_years(&self, as_of: NaiveDate) -> Option<f64> {
        let start = self.marriage_date?;
        let end = self.separation_date.unwrap_or(as_of);
        if end < start {
            return None;
        }
        let mut years = end.year() - start.year();
        if (end.month(), end.day()) < (start.month(), start.day()) {
            years -= 1;
        }
        Some(f64::from(years))
    }
}

/// A caller-supplied asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub asset_type: String,
    /// Current value in dollars
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_separate_property: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Owner>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_quasi_community_property: bool,
    /// Spouse who keeps an indivisible marital item in kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarded_to: Option<Spouse>,
}

impl Asset {
    /// A marital asset with no ownership annotations.
    pub fn new(id: impl Into<String>, description: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            asset_type: String::new(),
            value,
            acquisition_date: None,
            is_separate_property: false,
            owned_by: None,
            is_quasi_community_property: false,
            awarded_to: None,
        }
    }

    pub fn with_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = asset_type.into();
        self
    }

    pub fn separate(mut self, owner: Option<Owner>) -> Self {
        self.is_separate_property = true;
        self.owned_by = owner;
        self
    }

    pub fn quasi_community(mut self) -> Self {
        self.is_separate_property = true;
        self.is_quasi_community_property = true;
        self
    }

    pub fn awarded_to(mut self, spouse: Spouse) -> Self {
        self.awarded_to = Some(spouse);
        self
    }
}

/// A caller-supplied debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub debt_type: String,
    /// Current balance owed in dollars
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_separate_property: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Owner>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_quasi_community_property: bool,
    /// Spouse who assumes a marital debt in full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarded_to: Option<Spouse>,
}

impl Debt {
    /// A marital debt with no ownership annotations.
    pub fn new(id: impl Into<String>, description: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            debt_type: String::new(),
            balance,
            acquisition_date: None,
            is_separate_property: false,
            owned_by: None,
            is_quasi_community_property: false,
            awarded_to: None,
        }
    }

    pub fn with_type(mut self, debt_type: impl Into<String>) -> Self {
        self.debt_type = debt_type.into();
        self
    }

    pub fn separate(mut self, owner: Option<Owner>) -> Self {
        self.is_separate_property = true;
        self.owned_by = owner;
        self
    }

    pub fn quasi_community(mut self) -> Self {
        self.is_separate_property = true;
        self.is_quasi_community_property = true;
        self
    }

    pub fn awarded_to(mut self, spouse: Spouse) -> Self {
        self.awarded_to = Some(spouse);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Retirement,
    Brokerage,
    #[default]
    Other,
}

/// A bank, retirement or brokerage account reported by the caller.
///
/// Accounts only feed the confidence estimate. Balances that should be
/// divided must also appear as assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAccount {
    pub id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: f64,
}

/// Relationship and economic factors for equitable distribution.
///
/// Every field has a neutral default, so a partially filled bundle scores
/// exactly like one where the missing factors are equal between spouses.
/// Positive scorer adjustments favor spouse 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquitableDistributionFactors {
    /// Years of marriage; derived from the personal info dates when absent
    pub marriage_duration: Option<f64>,
    pub spouse1_age: Option<u32>,
    pub spouse2_age: Option<u32>,
    pub spouse1_health: HealthStatus,
    pub spouse2_health: HealthStatus,
    pub spouse1_income: f64,
    pub spouse2_income: f64,
    pub spouse1_earning_capacity: f64,
    pub spouse2_earning_capacity: f64,
    pub custody: CustodyArrangement,
    /// Domestic violence suffered by spouse 1
    pub domestic_violence: bool,
    /// Dissipation of marital assets by spouse 2
    pub wasting_of_assets: bool,
    pub extension: JurisdictionFactors,
}

impl Default for EquitableDistributionFactors {
    fn default() -> Self {
        Self {
            marriage_duration: None,
            spouse1_age: None,
            spouse2_age: None,
            spouse1_health: HealthStatus::Good,
            spouse2_health: HealthStatus::Good,
            spouse1_income: 0.0,
            spouse2_income: 0.0,
            spouse1_earning_capacity: 0.0,
            spouse2_earning_capacity: 0.0,
            custody: CustodyArrangement::None,
            domestic_violence: false,
            wasting_of_assets: false,
            extension: JurisdictionFactors::General,
        }
    }
}

impl EquitableDistributionFactors {
    /// A bundle in which no factor favors either spouse.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Marriage duration, or the neutral midpoint when unknown.
    pub fn marriage_years(&self) -> f64 {
        self.marriage_duration
            .filter(|years| years.is_finite())
            .unwrap_or(config::NEUTRAL_MARRIAGE_YEARS)
    }

    /// Spouse 1's share of combined income, 0.5 when combined income is zero.
    pub fn income_ratio(&self) -> f64 {
        share_of(self.spouse1_income, self.spouse2_income)
    }

    /// Spouse 1's share of combined earning capacity, 0.5 when both are zero.
    pub fn earning_capacity_ratio(&self) -> f64 {
        share_of(self.spouse1_earning_capacity, self.spouse2_earning_capacity)
    }

    /// Which spouse is older by more than the age-gap threshold, if any.
    pub fn significantly_older(&self) -> Option<Spouse> {
        let (a1, a2) = (self.spouse1_age?, self.spouse2_age?);
        if a1.abs_diff(a2) <= config::AGE_GAP_YEARS {
            None
        } else if a1 > a2 {
            Some(Spouse::One)
        } else {
            Some(Spouse::Two)
        }
    }

    /// The Pennsylvania extension, if present.
    pub fn pennsylvania(&self) -> Option<&PennsylvaniaFactors> {
        match &self.extension {
            JurisdictionFactors::Pennsylvania(pa) => Some(pa),
            JurisdictionFactors::General => None,
        }
    }
}

/// `a / (a + b)` over non-negative finite parts, neutral 0.5 otherwise.
fn share_of(a: f64, b: f64) -> f64 {
    let a = if a.is_finite() { a.max(0.0) } else { 0.0 };
    let b = if b.is_finite() { b.max(0.0) } else { 0.0 };
    let total = a + b;
    if total > 0.0 {
        a / total
    } else {
        0.5
    }
}

/// Jurisdiction-specific additions to the factor bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "jurisdiction", rename_all = "lowercase")]
pub enum JurisdictionFactors {
    #[default]
    General,
    Pennsylvania(PennsylvaniaFactors),
}

/// Secondary factors from 23 Pa.C.S. § 3502(a).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PennsylvaniaFactors {
    pub spouse1_prior_marriage: bool,
    pub spouse2_prior_marriage: bool,
    /// Spouse 1 contributed to spouse 2's education or training
    pub spouse1_contributed_to_education: bool,
    /// Spouse 2 contributed to spouse 1's education or training
    pub spouse2_contributed_to_education: bool,
    pub spouse1_future_opportunities: Option<String>,
    pub spouse2_future_opportunities: Option<String>,
    pub spouse1_needs: Option<String>,
    pub spouse2_needs: Option<String>,
    pub spouse1_economic_circumstances: Option<String>,
    pub spouse2_economic_circumstances: Option<String>,
    pub spouse1_station: Option<String>,
    pub spouse2_station: Option<String>,
    pub spouse1_other_income_sources: Option<String>,
    pub spouse2_other_income_sources: Option<String>,
    pub spouse1_separate_estate: f64,
    pub spouse2_separate_estate: f64,
    pub expense_of_sale_assets: f64,
}

/// True when the free-text field carries something other than whitespace.
pub(crate) fn is_documented(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// Which side a pair of documentation flags leans to, if exactly one is set.
pub(crate) fn one_sided(spouse1: bool, spouse2: bool) -> Option<Spouse> {
    match (spouse1, spouse2) {
        (true, false) => Some(Spouse::One),
        (false, true) => Some(Spouse::Two),
        _ => None,
    }
}
