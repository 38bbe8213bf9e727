//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario.

use chrono::NaiveDate;
use cucumber::World;
use propdiv_engine::{
    AssetDivision, DivisionConfig, DivisionOutcome, DivisionRequest, DivisionService, EngineError,
    PropertyDivision,
};
use std::fmt;

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(World)]
#[world(init = Self::new)]
pub struct PropdivWorld {
    /// Request under construction
    pub request: DivisionRequest,
    /// Configuration the division runs under
    pub config: DivisionConfig,
    /// Last division outcome (if successful)
    pub outcome: Option<DivisionOutcome>,
    /// Last error (if the division failed)
    pub error: Option<EngineError>,
    /// Last direct scorer result
    pub score: Option<f64>,
}

impl fmt::Debug for PropdivWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropdivWorld")
            .field("request", &self.request)
            .field("config", &self.config)
            .field("outcome", &self.outcome)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("score", &self.score)
            .finish()
    }
}

impl Default for PropdivWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PropdivWorld {
    /// Create a world with a fixed reference date so durations are stable.
    pub fn new() -> Self {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        Self {
            request: DivisionRequest::default(),
            config: DivisionConfig::default().with_as_of(as_of),
            outcome: None,
            error: None,
            score: None,
        }
    }

    /// Divide the current request and store the result or error
    pub fn divide(&mut self) {
        match DivisionService::with_config(self.config.clone()).divide(&self.request) {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.error = None;
            }
            Err(e) => {
                self.outcome = None;
                self.error = Some(e);
            }
        }
    }

    /// The last division, panicking with the error if there is none
    pub fn division(&self) -> &PropertyDivision {
        match &self.outcome {
            Some(outcome) => &outcome.division,
            None => panic!(
                "Expected a successful division, got error: {:?}",
                self.error_message()
            ),
        }
    }

    /// Look up an asset division by id
    pub fn asset(&self, id: &str) -> &AssetDivision {
        self.division()
            .asset_divisions()
            .into_iter()
            .find(|d| d.asset_id == id)
            .unwrap_or_else(|| panic!("No division for asset '{id}'"))
    }

    /// Get error message if the division failed
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
