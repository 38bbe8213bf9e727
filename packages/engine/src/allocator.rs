//! Division allocator
//!
//! Splits classified line items between the spouses at a target ratio and
//! works out the equalization payment.
//!
//! Divisible items (marital, community and quasi-community property) are
//! split notionally at the target ratio: spouse 1 gets `round_cents(total *
//! ratio)` and spouse 2 the remainder, so the two shares always add up to
//! the item total. Separate items go wholly to their owner.
//!
//! A divisible item can be awarded in kind to one spouse (a house cannot be
//! handed over in fractions). Its division record still shows the notional
//! split, but the whole value goes to the recipient. The allocator keeps a
//! running total of how far spouse 1's actual award has moved from the
//! notional one; that excess is the equalization payment.

use crate::classifier::{Classification, Classifier, Reasoning};
use crate::config::MIN_EQUALIZATION_PAYMENT;
use crate::division::{AssetDivision, DebtDivision};
use crate::model::{Asset, Debt};
use crate::types::{round_cents, Spouse};

/// Dollar amounts tracked per spouse.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerSpouse {
    pub spouse1: f64,
    pub spouse2: f64,
}

impl PerSpouse {
    pub fn get(&self, spouse: Spouse) -> f64 {
        match spouse {
            Spouse::One => self.spouse1,
            Spouse::Two => self.spouse2,
        }
    }

    fn add(&mut self, spouse: Spouse, amount: f64) {
        match spouse {
            Spouse::One => self.spouse1 += amount,
            Spouse::Two => self.spouse2 += amount,
        }
    }
}

/// Running totals carried through an allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningTotals {
    pub marital_assets: f64,
    pub marital_debts: f64,
    pub separate_assets: f64,
    pub separate_debts: f64,
    /// Separate assets minus separate debts, per owner
    pub separate_net: PerSpouse,
    /// Marital assets minus marital debts actually received, per spouse
    pub marital_received: PerSpouse,
    /// Spouse 1's actual marital award minus the notional one
    pub spouse1_excess: f64,
}

/// Who pays whom, and how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equalization {
    pub amount: f64,
    pub from: Spouse,
}

/// An item placed in the per-spouse lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Both,
    Only(Spouse),
}

impl Placement {
    pub fn includes(self, spouse: Spouse) -> bool {
        match self {
            Placement::Both => true,
            Placement::Only(s) => s == spouse,
        }
    }
}

/// Result of allocating every line item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    pub assets: Vec<(AssetDivision, Placement)>,
    pub debts: Vec<(DebtDivision, Placement)>,
    pub totals: RunningTotals,
}

impl Allocation {
    /// Net dollars a spouse actually receives, separate property included.
    pub fn net_award(&self, spouse: Spouse) -> f64 {
        round_cents(self.totals.marital_received.get(spouse) + self.totals.separate_net.get(spouse))
    }

    /// Payment that brings the marital award back to the target ratio.
    pub fn equalization(&self) -> Option<Equalization> {
        let excess = round_cents(self.totals.spouse1_excess);
        if excess.abs() < MIN_EQUALIZATION_PAYMENT {
            return None;
        }
        Some(Equalization {
            amount: excess.abs(),
            from: if excess > 0.0 { Spouse::One } else { Spouse::Two },
        })
    }
}

/// Coerce an asset value: non-finite and negative values become zero.
fn asset_amount(asset: &Asset) -> f64 {
    if !asset.value.is_finite() || asset.value < 0.0 {
        tracing::warn!(asset_id = %asset.id, value = asset.value, "Coercing invalid asset value to 0");
        return 0.0;
    }
    round_cents(asset.value)
}

/// Coerce a debt balance: negative balances count as their magnitude.
fn debt_amount(debt: &Debt) -> f64 {
    if !debt.balance.is_finite() {
        tracing::warn!(debt_id = %debt.id, "Coercing non-finite debt balance to 0");
        return 0.0;
    }
    if debt.balance < 0.0 {
        tracing::warn!(debt_id = %debt.id, balance = debt.balance, "Using magnitude of negative debt balance");
    }
    round_cents(debt.balance.abs())
}

/// A split of one item.
struct Split {
    spouse1: f64,
    spouse2: f64,
    placement: Placement,
}

/// Allocates items at a fixed target ratio.
pub struct Allocator<'a> {
    classifier: &'a Classifier,
    spouse1_ratio: f64,
}

impl<'a> Allocator<'a> {
    /// Create an allocator.
    ///
    /// # Arguments
    /// * `classifier` - Classifier for the governing jurisdiction
    /// * `spouse1_ratio` - Spouse 1's target share of divisible items
    pub fn new(classifier: &'a Classifier, spouse1_ratio: f64) -> Self {
        Self {
            classifier,
            spouse1_ratio,
        }
    }

    /// Allocate every asset and debt.
    pub fn allocate(&self, assets: &[Asset], debts: &[Debt]) -> Allocation {
        let mut allocation = Allocation::default();

        for asset in assets {
            let division = self.allocate_asset(asset, &mut allocation.totals);
            allocation.assets.push(division);
        }
        for debt in debts {
            let division = self.allocate_debt(debt, &mut allocation.totals);
            allocation.debts.push(division);
        }

        tracing::debug!(
            marital_assets = allocation.totals.marital_assets,
            marital_debts = allocation.totals.marital_debts,
            separate_assets = allocation.totals.separate_assets,
            spouse1_excess = allocation.totals.spouse1_excess,
            "Allocation complete"
        );
        allocation
    }

    fn allocate_asset(&self, asset: &Asset, totals: &mut RunningTotals) -> (AssetDivision, Placement) {
        let total = asset_amount(asset);
        let classification = self.classifier.classify_asset(asset);
        let split = self.split(total, classification, asset.awarded_to, 1.0, totals);

        if classification.is_divisible() {
            totals.marital_assets += total;
        } else {
            totals.separate_assets += total;
        }

        let division = AssetDivision {
            asset_id: asset.id.clone(),
            description: asset.description.clone(),
            total_value: total,
            spouse1_share: split.spouse1,
            spouse2_share: split.spouse2,
            reasoning: Reasoning::for_classification(classification),
            classification,
            awarded_to: award(classification, asset.awarded_to),
        };
        (division, split.placement)
    }

    fn allocate_debt(&self, debt: &Debt, totals: &mut RunningTotals) -> (DebtDivision, Placement) {
        let total = debt_amount(debt);
        let classification = self.classifier.classify_debt(debt);
        let split = self.split(total, classification, debt.awarded_to, -1.0, totals);

        if classification.is_divisible() {
            totals.marital_debts += total;
        } else {
            totals.separate_debts += total;
        }

        let division = DebtDivision {
            debt_id: debt.id.clone(),
            description: debt.description.clone(),
            total_balance: total,
            spouse1_share: split.spouse1,
            spouse2_share: split.spouse2,
            reasoning: Reasoning::for_classification(classification),
            classification,
            awarded_to: award(classification, debt.awarded_to),
        };
        (division, split.placement)
    }

    /// Split `total` and book it. `sign` is +1 for assets and -1 for debts.
    fn split(
        &self,
        total: f64,
        classification: Classification,
        awarded_to: Option<Spouse>,
        sign: f64,
        totals: &mut RunningTotals,
    ) -> Split {
        match classification {
            Classification::Separate { owner } => {
                totals.separate_net.add(owner, sign * total);
                let (spouse1, spouse2) = match owner {
                    Spouse::One => (total, 0.0),
                    Spouse::Two => (0.0, total),
                };
                Split {
                    spouse1,
                    spouse2,
                    placement: Placement::Only(owner),
                }
            }
            Classification::Marital | Classification::QuasiCommunity => {
                let spouse1 = round_cents(total * self.spouse1_ratio);
                let spouse2 = round_cents(total - spouse1);

                let placement = match awarded_to {
                    Some(recipient) => {
                        totals.marital_received.add(recipient, sign * total);
                        let actual1 = if recipient == Spouse::One { total } else { 0.0 };
                        totals.spouse1_excess += sign * (actual1 - spouse1);
                        Placement::Only(recipient)
                    }
                    None => {
                        totals.marital_received.add(Spouse::One, sign * spouse1);
                        totals.marital_received.add(Spouse::Two, sign * spouse2);
                        Placement::Both
                    }
                };

                Split {
                    spouse1,
                    spouse2,
                    placement,
                }
            }
        }
    }
}

/// In-kind awards only apply to divisible items.
fn award(classification: Classification, awarded_to: Option<Spouse>) -> Option<Spouse> {
    if classification.is_divisible() {
        awarded_to
    } else {
        None
    }
}
