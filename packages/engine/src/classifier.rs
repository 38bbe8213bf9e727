//! Asset and debt classification
//!
//! Decides, per line item, whether it is divided (community, marital or
//! quasi-community property) or kept whole by one spouse (separate
//! property). Classification cannot fail: anything ambiguous resolves to
//! the marital side, which is easier to correct downstream than a wrongful
//! 100% award.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::jurisdiction::Jurisdiction;
use crate::model::{Asset, Debt};
use crate::types::{Owner, Regime, Spouse};

/// Outcome of classifying a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Community (or, in equitable states, marital) property
    Marital,
    /// Quasi-community property, divided like community property
    QuasiCommunity,
    /// Kept whole by one spouse
    Separate { owner: Spouse },
}

impl Classification {
    /// Whether the item is divided by the target ratio.
    pub fn is_divisible(self) -> bool {
        !matches!(self, Classification::Separate { .. })
    }
}

/// Why an item was allocated the way it was.
///
/// The rendered text is matched by downstream summaries, so the wording of
/// [`Reasoning::render`] must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Reasoning {
    /// Community and marital property alike; the regime is reported by
    /// `distributionType` on the division
    CommunityRuleApplied,
    QcpApplied,
    SeparateProperty { owner: Spouse },
}

impl Reasoning {
    /// Reasoning for a classification.
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Marital => Reasoning::CommunityRuleApplied,
            Classification::QuasiCommunity => Reasoning::QcpApplied,
            Classification::Separate { owner } => Reasoning::SeparateProperty { owner },
        }
    }

    pub fn render(self) -> String {
        match self {
            Reasoning::CommunityRuleApplied => {
                "Community property — divided per state rule".to_string()
            }
            Reasoning::QcpApplied => "Quasi-community property — QCP rules applied".to_string(),
            Reasoning::SeparateProperty { owner } => {
                format!("Separate property of Spouse {}", owner.number())
            }
        }
    }
}

impl fmt::Display for Reasoning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Serialize a [`Reasoning`] as its rendered text, for output records.
pub(crate) fn serialize_rendered<S>(reasoning: &Reasoning, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&reasoning.render())
}

/// Classifies line items for one jurisdiction.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    jurisdiction: Jurisdiction,
    default_owner: Spouse,
}

impl Classifier {
    /// Create a classifier.
    ///
    /// # Arguments
    /// * `jurisdiction` - Governing jurisdiction
    /// * `default_owner` - Owner of separate items without a usable `ownedBy`
    pub fn new(jurisdiction: Jurisdiction, default_owner: Spouse) -> Self {
        Self {
            jurisdiction,
            default_owner,
        }
    }

    pub fn classify_asset(&self, asset: &Asset) -> Classification {
        self.classify(
            asset.is_separate_property,
            asset.is_quasi_community_property,
            asset.owned_by,
        )
    }

    pub fn classify_debt(&self, debt: &Debt) -> Classification {
        self.classify(
            debt.is_separate_property,
            debt.is_quasi_community_property,
            debt.owned_by,
        )
    }

    fn classify(&self, is_separate: bool, is_qcp: bool, owned_by: Option<Owner>) -> Classification {
        if !is_separate {
            return Classification::Marital;
        }

        let qcp_applies = self.jurisdiction.regime() == Regime::Community
            && self.jurisdiction.supports_qcp()
            && is_qcp;
        if qcp_applies {
            return Classification::QuasiCommunity;
        }

        let owner = match owned_by.and_then(Owner::spouse) {
            Some(owner) => owner,
            None => {
                tracing::debug!(
                    default_owner = %self.default_owner,
                    "Separate item has no individual owner, using default"
                );
                self.default_owner
            }
        };
        Classification::Separate { owner }
    }
}
