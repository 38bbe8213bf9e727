//! Error types for the property division engine
//!
//! The division itself never fails on schema-valid input. Every variant here
//! is raised by the request validation layer or by the I/O surfaces (CLI,
//! WASM) before a calculation starts.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Jurisdiction code is not one of the 50 states or DC
    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    /// Monetary amount that cannot be coerced (NaN, infinite, negative asset value)
    #[error("Invalid amount for '{item}': {reason}")]
    InvalidAmount { item: String, reason: String },

    /// Invalid or inconsistent date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Two line items share the same identifier
    #[error("Duplicate item identifier: {0}")]
    DuplicateItem(String),

    /// Equity factor value outside its domain
    #[error("Invalid factor '{field}': {reason}")]
    InvalidFactor { field: String, reason: String },

    /// Request exceeds a configured limit
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
