//! Propdiv Engine
//!
//! Divides marital property between two spouses under U.S. state law.
//! This library provides functionality for:
//! - Classifying assets and debts as marital, quasi-community or separate
//! - Scoring equitable-distribution factors into a split ratio
//! - Allocating every line item and computing equalization payments
//! - Estimating confidence from the completeness of the input
//!
//! # Example
//!
//! ```
//! use propdiv_engine::{classify_and_divide, Asset, Jurisdiction, PersonalInfo};
//!
//! let personal = PersonalInfo::new(Jurisdiction::CA);
//! let assets = vec![
//!     Asset::new("house", "Family home", 500_000.0),
//!     Asset::new("car", "Car", 30_000.0),
//! ];
//!
//! let division = classify_and_divide(&personal, &assets, &[], None);
//! assert_eq!(division.spouse1_share, 0.5);
//! assert_eq!(division.total_marital_assets, 530_000.0);
//! ```

pub mod allocator;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod division;
pub mod error;
pub mod jurisdiction;
pub mod model;
pub mod scorer;
pub mod service;
pub mod trace;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
pub use classifier::{Classification, Classifier, Reasoning};
pub use confidence::{estimate_confidence, ConfidenceInputs};
pub use config::DivisionConfig;
pub use division::{AssetDivision, DebtDivision, PropertyDivision};
pub use error::{EngineError, Result};
pub use jurisdiction::{regime_of, supports_qcp, Jurisdiction, JurisdictionInfo};
pub use model::{
    AccountType, Asset, Debt, EquitableDistributionFactors, FinancialAccount,
    JurisdictionFactors, PennsylvaniaFactors, PersonalInfo,
};
pub use scorer::{score, score_equity_factors, Adjustment, EquityFactor, EquityScore};
pub use service::{
    classify_and_divide, classify_and_divide_with_config, explain, validate_request,
    DivisionOutcome, DivisionRequest, DivisionService, PersonalInfoInput,
};
pub use trace::{TraceNode, TraceNodeType};
pub use types::{CustodyArrangement, HealthStatus, Owner, Regime, Spouse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
