//! WASM bindings for the property division engine
//!
//! Feature-gated behind the `wasm` feature flag. Lets a browser UI preview
//! a division without a round trip to a server.
//!
//! # Key Constraints
//!
//! - **Same validation as the CLI**: requests go through
//!   [`DivisionService::divide`], so malformed input is rejected with the
//!   same messages
//! - **Efficient serialization**: Uses `serde-wasm-bindgen` for Rust <-> JavaScript conversion
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { WasmEngine } from 'propdiv-engine';
//!
//! await init();
//! const engine = new WasmEngine();
//!
//! const division = engine.classifyAndDivide({
//!     personalInfo: { jurisdiction: 'PA', marriageDate: '2001-06-01' },
//!     assets: [{ id: 'house', description: 'Home', value: 350000 }],
//!     equityFactors: { spouse1Income: 20000, spouse2Income: 80000 },
//! });
//! console.log(division.spouse1Share);
//! ```

use wasm_bindgen::prelude::*;

use crate::confidence::{estimate_confidence, ConfidenceInputs};
use crate::config::DivisionConfig;
use crate::jurisdiction::{Jurisdiction, JurisdictionInfo};
use crate::model::EquitableDistributionFactors;
use crate::scorer::score_equity_factors;
use crate::service::{DivisionRequest, DivisionService};
use crate::types::Spouse;

/// Helper to create consistent error JsValues
fn wasm_error(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

/// WASM-compatible division engine.
#[wasm_bindgen]
pub struct WasmEngine {
    service: DivisionService,
}

#[wasm_bindgen]
impl WasmEngine {
    /// Create an engine with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            service: DivisionService::new(),
        }
    }

    /// Set the owner of separate items without a usable `ownedBy`.
    ///
    /// # Arguments
    /// * `owner` - `"spouse1"` or `"spouse2"`
    #[wasm_bindgen(js_name = setDefaultSeparateOwner)]
    pub fn set_default_separate_owner(&mut self, owner: &str) -> Result<(), JsValue> {
        let owner: Spouse = owner.parse().map_err(|e: String| wasm_error(&e))?;
        let config = self.service.config().clone().with_default_separate_owner(owner);
        self.service = DivisionService::with_config(config);
        Ok(())
    }

    /// Divide a `DivisionRequest` object.
    ///
    /// # Returns
    /// * `Ok(JsValue)` - The `PropertyDivision`
    /// * `Err(JsValue)` - Validation or parse error message
    #[wasm_bindgen(js_name = classifyAndDivide)]
    pub fn classify_and_divide(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: DivisionRequest = serde_wasm_bindgen::from_value(request)
            .map_err(|e| wasm_error(&format!("Failed to parse request: {}", e)))?;

        let outcome = self
            .service
            .divide(&request)
            .map_err(|e| wasm_error(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&outcome.division)
            .map_err(|e| wasm_error(&format!("Failed to serialize result: {}", e)))
    }

    /// Spouse 1's share for an equity factor bundle.
    #[wasm_bindgen(js_name = scoreEquityFactors)]
    pub fn score_equity_factors(&self, factors: JsValue) -> Result<f64, JsValue> {
        let factors: EquitableDistributionFactors = serde_wasm_bindgen::from_value(factors)
            .map_err(|e| wasm_error(&format!("Failed to parse factors: {}", e)))?;
        Ok(score_equity_factors(&factors))
    }

    /// Confidence for the given record counts and incomes.
    #[wasm_bindgen(js_name = estimateConfidence)]
    pub fn estimate_confidence(&self, inputs: JsValue) -> Result<f64, JsValue> {
        let inputs: ConfidenceInputs = serde_wasm_bindgen::from_value(inputs)
            .map_err(|e| wasm_error(&format!("Failed to parse inputs: {}", e)))?;
        Ok(estimate_confidence(&inputs))
    }

    /// Regime and QCP support for a state code or name.
    #[wasm_bindgen(js_name = jurisdictionInfo)]
    pub fn jurisdiction_info(&self, code: &str) -> Result<JsValue, JsValue> {
        let jurisdiction: Jurisdiction =
            code.parse().map_err(|e: crate::error::EngineError| wasm_error(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&JurisdictionInfo::from(jurisdiction))
            .map_err(|e| wasm_error(&format!("Failed to serialize result: {}", e)))
    }

    /// Owner currently assigned to unowned separate items.
    #[wasm_bindgen(js_name = defaultSeparateOwner)]
    pub fn default_separate_owner(&self) -> String {
        self.service.config().default_separate_owner.to_string()
    }

    /// Get the engine version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl From<DivisionConfig> for WasmEngine {
    fn from(config: DivisionConfig) -> Self {
        Self {
            service: DivisionService::with_config(config),
        }
    }
}

// JsValue conversion only works inside a WASM runtime; these tests cover
// the parts of the API that do not cross that boundary.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_engine_default() {
        let engine = WasmEngine::default();
        assert_eq!(engine.default_separate_owner(), "spouse1");
    }

    #[test]
    fn test_wasm_engine_from_config() {
        let engine =
            WasmEngine::from(DivisionConfig::default().with_default_separate_owner(Spouse::Two));
        assert_eq!(engine.default_separate_owner(), "spouse2");
    }

    #[test]
    fn test_version() {
        assert_eq!(WasmEngine::new().version(), "0.1.0");
    }
}
