//! Division service
//!
//! Ties the components together: validates a wire-level [`DivisionRequest`],
//! classifies every line item, scores the equity factors (equitable
//! jurisdictions only), allocates, and attaches a confidence value.
//!
//! # Example
//!
//! ```
//! use propdiv_engine::{DivisionRequest, DivisionService};
//!
//! let request: DivisionRequest = serde_json::from_str(r#"{
//!     "personalInfo": { "jurisdiction": "CA" },
//!     "assets": [
//!         { "id": "house", "description": "Family home", "value": 500000 },
//!         { "id": "car", "description": "Car", "value": 30000 }
//!     ]
//! }"#).unwrap();
//!
//! let outcome = DivisionService::new().divide(&request).unwrap();
//! assert_eq!(outcome.division.spouse1_share, 0.5);
//! assert_eq!(outcome.division.total_marital_assets, 530000.0);
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::allocator::Allocator;
use crate::classifier::Classifier;
use crate::config::{DivisionConfig, MAX_LINE_ITEMS};
use crate::confidence::{estimate_confidence, ConfidenceInputs};
use crate::division::PropertyDivision;
use crate::error::{EngineError, Result};
use crate::jurisdiction::Jurisdiction;
use crate::model::{
    Asset, Debt, EquitableDistributionFactors, FinancialAccount, JurisdictionFactors,
    PersonalInfo,
};
use crate::scorer;
use crate::trace::{TraceNode, TraceNodeType};
use crate::types::{round_cents, Regime, Spouse};

// =============================================================================
// Wire request
// =============================================================================

/// Personal info as it arrives on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoInput {
    pub jurisdiction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse2_name: Option<String>,
}

/// Everything needed for one division.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionRequest {
    pub personal_info: PersonalInfoInput,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub financial_accounts: Vec<FinancialAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_factors: Option<EquitableDistributionFactors>,
}

/// Everything a division depends on, in hashing order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintInput<'a> {
    request: &'a DivisionRequest,
    default_separate_owner: Spouse,
    as_of: NaiveDate,
}

impl DivisionRequest {
    /// SHA-256 over the canonical JSON form of the request and the resolved
    /// configuration, hex encoded.
    ///
    /// Equal fingerprints mean equal divisions, so callers can cache
    /// divisions keyed on this value. Without a fixed `as_of` the key
    /// changes daily.
    pub fn fingerprint(&self, config: &DivisionConfig) -> Result<String> {
        let input = FingerprintInput {
            request: self,
            default_separate_owner: config.default_separate_owner,
            as_of: config.as_of_or_today(),
        };
        let canonical = serde_json::to_vec(&input)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Total number of assets and debts.
    pub fn line_item_count(&self) -> usize {
        self.assets.len() + self.debts.len()
    }
}

// =============================================================================
// Validation
// =============================================================================

fn parse_date(field: &str, raw: &Option<String>) -> Result<Option<NaiveDate>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| EngineError::InvalidDate(format!("{field} '{text}': {e}"))),
    }
}

fn check_factor(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::InvalidFactor {
            field: field.to_string(),
            reason: format!("must be a finite number, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(EngineError::InvalidFactor {
            field: field.to_string(),
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

fn validate_factors(
    jurisdiction: Jurisdiction,
    factors: &EquitableDistributionFactors,
) -> Result<()> {
    if let Some(years) = factors.marriage_duration {
        check_factor("marriageDuration", years)?;
    }
    check_factor("spouse1Income", factors.spouse1_income)?;
    check_factor("spouse2Income", factors.spouse2_income)?;
    check_factor("spouse1EarningCapacity", factors.spouse1_earning_capacity)?;
    check_factor("spouse2EarningCapacity", factors.spouse2_earning_capacity)?;

    if let JurisdictionFactors::Pennsylvania(pa) = &factors.extension {
        if jurisdiction != Jurisdiction::PA {
            return Err(EngineError::InvalidFactor {
                field: "extension".to_string(),
                reason: format!("Pennsylvania factors do not apply in {jurisdiction}"),
            });
        }
        check_factor("spouse1SeparateEstate", pa.spouse1_separate_estate)?;
        check_factor("spouse2SeparateEstate", pa.spouse2_separate_estate)?;
        check_factor("expenseOfSaleAssets", pa.expense_of_sale_assets)?;
    }
    Ok(())
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(EngineError::DuplicateItem(format!("{kind} '{id}'")));
        }
    }
    Ok(())
}

/// Validate a request and resolve its personal info.
///
/// The division itself never fails; everything that can be wrong with a
/// request is caught here.
///
/// # Errors
/// * [`EngineError::UnknownJurisdiction`] for a code that is not a state or DC
/// * [`EngineError::InvalidDate`] for unparseable dates or a separation
///   before the marriage
/// * [`EngineError::LimitExceeded`] for more than [`MAX_LINE_ITEMS`] items
/// * [`EngineError::InvalidAmount`] for non-finite or negative asset values
///   and non-finite debt balances
/// * [`EngineError::DuplicateItem`] for repeated asset or debt ids
/// * [`EngineError::InvalidFactor`] for non-finite or negative factor numbers,
///   or a Pennsylvania extension outside Pennsylvania
pub fn validate_request(request: &DivisionRequest) -> Result<PersonalInfo> {
    let input = &request.personal_info;
    let jurisdiction: Jurisdiction = input.jurisdiction.parse()?;

    let marriage_date = parse_date("marriageDate", &input.marriage_date)?;
    let separation_date = parse_date("separationDate", &input.separation_date)?;
    if let (Some(married), Some(separated)) = (marriage_date, separation_date) {
        if separated < married {
            return Err(EngineError::InvalidDate(format!(
                "separationDate {separated} is before marriageDate {married}"
            )));
        }
    }

    let count = request.line_item_count();
    if count > MAX_LINE_ITEMS {
        return Err(EngineError::LimitExceeded(format!(
            "{count} line items, at most {MAX_LINE_ITEMS} allowed"
        )));
    }

    for asset in &request.assets {
        if !asset.value.is_finite() || asset.value < 0.0 {
            return Err(EngineError::InvalidAmount {
                item: asset.id.clone(),
                reason: format!("asset value must be a non-negative number, got {}", asset.value),
            });
        }
    }
    for debt in &request.debts {
        if !debt.balance.is_finite() {
            return Err(EngineError::InvalidAmount {
                item: debt.id.clone(),
                reason: format!("debt balance must be a finite number, got {}", debt.balance),
            });
        }
    }

    check_unique("asset", request.assets.iter().map(|a| a.id.as_str()))?;
    check_unique("debt", request.debts.iter().map(|d| d.id.as_str()))?;

    if let Some(factors) = &request.equity_factors {
        validate_factors(jurisdiction, factors)?;
    }

    Ok(PersonalInfo {
        jurisdiction,
        marriage_date,
        separation_date,
        spouse1_name: input.spouse1_name.clone(),
        spouse2_name: input.spouse2_name.clone(),
    })
}

// =============================================================================
// Division
// =============================================================================

/// Spouse 1's target ratio and the adjustments behind it.
fn target_ratio(
    config: &DivisionConfig,
    personal: &PersonalInfo,
    factors: Option<&EquitableDistributionFactors>,
) -> scorer::EquityScore {
    let mut bundle = factors.cloned().unwrap_or_default();
    if personal.jurisdiction != Jurisdiction::PA && bundle.pennsylvania().is_some() {
        tracing::debug!(
            jurisdiction = %personal.jurisdiction,
            "Ignoring Pennsylvania factors outside Pennsylvania"
        );
        bundle.extension = JurisdictionFactors::General;
    }
    if bundle.marriage_duration.is_none() {
        bundle.marriage_duration = personal.marriage_duration_years(config.as_of_or_today());
    }
    scorer::score(&bundle)
}

/// Classify, score, allocate and estimate confidence.
///
/// Pure: the same inputs and configuration always give the same output.
/// Invalid amounts are coerced (see the allocator) rather than rejected;
/// use [`validate_request`] to reject them instead.
///
/// # Arguments
/// * `config` - Default separate-property owner and reference date
/// * `personal` - Jurisdiction and marriage dates
/// * `assets`, `debts` - Line items to divide
/// * `accounts` - Reported accounts, used for confidence only
/// * `factors` - Equity factors; ignored in community jurisdictions, and
///   their Pennsylvania extension is ignored outside Pennsylvania
pub fn classify_and_divide_with_config(
    config: &DivisionConfig,
    personal: &PersonalInfo,
    assets: &[Asset],
    debts: &[Debt],
    accounts: &[FinancialAccount],
    factors: Option<&EquitableDistributionFactors>,
) -> PropertyDivision {
    let jurisdiction = personal.jurisdiction;
    let regime = jurisdiction.regime();

    let (spouse1_share, spouse2_share, equity_adjustments) = match regime {
        Regime::Community => (0.5, 0.5, Vec::new()),
        Regime::Equitable => {
            let score = target_ratio(config, personal, factors);
            (score.spouse1_share, score.spouse2_share, score.adjustments)
        }
    };

    let classifier = Classifier::new(jurisdiction, config.default_separate_owner);
    let allocation = Allocator::new(&classifier, spouse1_share).allocate(assets, debts);

    let mut spouse1_assets = Vec::new();
    let mut spouse2_assets = Vec::new();
    for (division, placement) in &allocation.assets {
        if placement.includes(Spouse::One) {
            spouse1_assets.push(division.clone());
        }
        if placement.includes(Spouse::Two) {
            spouse2_assets.push(division.clone());
        }
    }
    let mut spouse1_debts = Vec::new();
    let mut spouse2_debts = Vec::new();
    for (division, placement) in &allocation.debts {
        if placement.includes(Spouse::One) {
            spouse1_debts.push(division.clone());
        }
        if placement.includes(Spouse::Two) {
            spouse2_debts.push(division.clone());
        }
    }

    let confidence_level = estimate_confidence(&ConfidenceInputs {
        asset_count: assets.len(),
        debt_count: debts.len(),
        account_count: accounts.len(),
        spouse1_income: factors.map(|f| f.spouse1_income),
        spouse2_income: factors.map(|f| f.spouse2_income),
    });

    let equalization = allocation.equalization();
    let totals = &allocation.totals;

    let division = PropertyDivision {
        jurisdiction,
        distribution_type: regime,
        spouse1_assets,
        spouse2_assets,
        spouse1_debts,
        spouse2_debts,
        total_spouse1_value: allocation.net_award(Spouse::One),
        total_spouse2_value: allocation.net_award(Spouse::Two),
        spouse1_share,
        spouse2_share,
        total_marital_assets: round_cents(totals.marital_assets),
        total_marital_debts: round_cents(totals.marital_debts),
        total_separate_assets: round_cents(totals.separate_assets),
        total_separate_debts: round_cents(totals.separate_debts),
        equalization_payment: equalization.map(|e| e.amount),
        payment_from: equalization.map(|e| e.from),
        confidence_level,
        equity_adjustments,
    };

    tracing::info!(
        jurisdiction = %jurisdiction,
        regime = %regime,
        spouse1_share,
        assets = assets.len(),
        debts = debts.len(),
        equalization = ?division.equalization_payment,
        confidence = confidence_level,
        "Division complete"
    );

    division
}

/// Divide with the default configuration.
///
/// Separate items without a usable owner go to spouse 1, and marriage
/// duration is measured to today when no separation date is given.
pub fn classify_and_divide(
    personal: &PersonalInfo,
    assets: &[Asset],
    debts: &[Debt],
    factors: Option<&EquitableDistributionFactors>,
) -> PropertyDivision {
    classify_and_divide_with_config(
        &DivisionConfig::default(),
        personal,
        assets,
        debts,
        &[],
        factors,
    )
}

/// Build the explanation tree for a finished division.
pub fn explain(division: &PropertyDivision) -> TraceNode {
    let ratio = TraceNode::new(TraceNodeType::Ratio, "spouse1_share")
        .with_amount(division.spouse1_share)
        .with_children(division.equity_adjustments.iter().map(|a| {
            TraceNode::new(TraceNodeType::Rule, format!("{:?}", a.factor))
                .with_detail(a.description)
                .with_amount(a.delta)
        }));

    let assets = division.asset_divisions().into_iter().map(|d| {
        let mut detail = d.reasoning.render();
        if let Some(recipient) = d.awarded_to {
            detail.push_str(&format!("; awarded to {recipient}"));
        }
        TraceNode::new(TraceNodeType::Item, &d.asset_id)
            .with_detail(detail)
            .with_amount(d.total_value)
    });
    let debts = division.debt_divisions().into_iter().map(|d| {
        let mut detail = d.reasoning.render();
        if let Some(recipient) = d.awarded_to {
            detail.push_str(&format!("; assumed by {recipient}"));
        }
        TraceNode::new(TraceNodeType::Item, &d.debt_id)
            .with_detail(detail)
            .with_amount(-d.total_balance)
    });

    let totals = TraceNode::new(TraceNodeType::Totals, "net_marital_estate")
        .with_amount(division.net_marital_estate())
        .with_child(
            TraceNode::new(TraceNodeType::Totals, "spouse1").with_amount(division.total_spouse1_value),
        )
        .with_child(
            TraceNode::new(TraceNodeType::Totals, "spouse2").with_amount(division.total_spouse2_value),
        );

    let mut root = TraceNode::new(TraceNodeType::Division, division.jurisdiction.code())
        .with_detail(division.distribution_type.to_string())
        .with_child(ratio)
        .with_children(assets)
        .with_children(debts)
        .with_child(totals);

    if let (Some(amount), Some(from)) = (division.equalization_payment, division.payment_from) {
        root = root.with_child(
            TraceNode::new(TraceNodeType::Equalization, from.to_string())
                .with_detail(format!("paid to {}", from.other()))
                .with_amount(amount),
        );
    }

    root.with_child(
        TraceNode::new(TraceNodeType::Confidence, "confidence_level")
            .with_amount(division.confidence_level),
    )
}

// =============================================================================
// Service
// =============================================================================

/// Result of [`DivisionService::divide`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionOutcome {
    pub division: PropertyDivision,
    /// Fingerprint of the request and configuration that produced this division
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceNode>,
}

/// Validates requests and divides them under one configuration.
#[derive(Debug, Clone, Default)]
pub struct DivisionService {
    config: DivisionConfig,
    trace: bool,
}

impl DivisionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DivisionConfig) -> Self {
        Self {
            config,
            trace: false,
        }
    }

    /// Attach an explanation trace to every outcome.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn config(&self) -> &DivisionConfig {
        &self.config
    }

    /// Cache key for `request` under this service's configuration.
    ///
    /// # Errors
    /// A JSON error while serializing the request.
    pub fn fingerprint(&self, request: &DivisionRequest) -> Result<String> {
        request.fingerprint(&self.config)
    }

    /// Validate and divide a request.
    ///
    /// # Errors
    /// Any error from [`validate_request`], or a JSON error while
    /// fingerprinting.
    pub fn divide(&self, request: &DivisionRequest) -> Result<DivisionOutcome> {
        let personal = validate_request(request)?;
        let fingerprint = self.fingerprint(request)?;

        tracing::debug!(
            jurisdiction = %personal.jurisdiction,
            items = request.line_item_count(),
            fingerprint = %fingerprint,
            "Dividing request"
        );

        let division = classify_and_divide_with_config(
            &self.config,
            &personal,
            &request.assets,
            &request.debts,
            &request.financial_accounts,
            request.equity_factors.as_ref(),
        );
        let trace = self.trace.then(|| explain(&division));

        Ok(DivisionOutcome {
            division,
            fingerprint,
            trace,
        })
    }
}
