//! Core types for the property division engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two parties to the divorce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spouse {
    #[serde(rename = "spouse1")]
    One,
    #[serde(rename = "spouse2")]
    Two,
}

impl Spouse {
    /// The other party.
    pub fn other(self) -> Spouse {
        match self {
            Spouse::One => Spouse::Two,
            Spouse::Two => Spouse::One,
        }
    }

    /// 1 or 2, as used in human-readable reasoning.
    pub fn number(self) -> u8 {
        match self {
            Spouse::One => 1,
            Spouse::Two => 2,
        }
    }
}

impl fmt::Display for Spouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spouse{}", self.number())
    }
}

impl FromStr for Spouse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spouse1" | "1" => Ok(Spouse::One),
            "spouse2" | "2" => Ok(Spouse::Two),
            other => Err(format!("unknown spouse '{other}'")),
        }
    }
}

/// Stated ownership of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Joint,
    Spouse1,
    Spouse2,
}

impl Owner {
    /// The individual owner, if the item is not jointly held.
    pub fn spouse(self) -> Option<Spouse> {
        match self {
            Owner::Joint => None,
            Owner::Spouse1 => Some(Spouse::One),
            Owner::Spouse2 => Some(Spouse::Two),
        }
    }
}

/// Marital property regime of a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Property acquired during marriage is owned equally and split 50/50
    Community,
    /// Marital property is split by multi-factor judicial discretion
    Equitable,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Community => write!(f, "community"),
            Regime::Equitable => write!(f, "equitable"),
        }
    }
}

/// Ordinal health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn is_poor(self) -> bool {
        matches!(self, HealthStatus::Poor)
    }
}

/// Custody arrangement for minor children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CustodyArrangement {
    #[serde(rename = "sole_1")]
    SoleSpouse1,
    #[serde(rename = "sole_2")]
    SoleSpouse2,
    #[serde(rename = "shared")]
    Shared,
    #[default]
    #[serde(rename = "none")]
    None,
}

/// Round a dollar amount to whole cents.
///
/// Negative zero is normalized so serialized output never shows `-0.0`.
pub fn round_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a ratio to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
