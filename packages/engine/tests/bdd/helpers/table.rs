//! Gherkin data table helpers
//!
//! Converts table cells from feature files to JSON values, so rows can be
//! deserialized straight into engine records using their wire field names.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Convert a Gherkin table cell to a JSON value.
///
/// Supports:
/// - `true` / `false` -> Bool
/// - empty or `null` -> Null
/// - Integer and float literals -> Number
/// - Everything else -> String
pub fn convert_gherkin_value(val: &str) -> Value {
    let trimmed = val.trim();

    if trimmed == "true" {
        return Value::Bool(true);
    }
    if trimmed == "false" {
        return Value::Bool(false);
    }
    if trimmed == "null" || trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::from(f);
    }
    Value::String(trimmed.to_string())
}

/// Parse a two-column key/value table into a JSON object.
///
/// ```text
/// | spouse1Income | 20000 |
/// | spouse2Income | 80000 |
/// ```
pub fn parse_key_value_table(table: &cucumber::gherkin::Table) -> Map<String, Value> {
    let mut object = Map::new();
    for row in &table.rows {
        if row.len() >= 2 {
            let value = convert_gherkin_value(&row[1]);
            if !value.is_null() {
                object.insert(row[0].trim().to_string(), value);
            }
        }
    }
    object
}

/// Parse a table with a header row into one record per data row.
///
/// Header cells are wire field names; empty cells are left out so the
/// record's serde defaults apply.
pub fn parse_records<T: DeserializeOwned>(table: &cucumber::gherkin::Table) -> Vec<T> {
    let Some((header, rows)) = table.rows.split_first() else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            let mut object = Map::new();
            for (key, cell) in header.iter().zip(row) {
                let value = convert_gherkin_value(cell);
                if !value.is_null() {
                    object.insert(key.trim().to_string(), value);
                }
            }
            serde_json::from_value(Value::Object(object))
                .unwrap_or_else(|e| panic!("Invalid table row {row:?}: {e}"))
        })
        .collect()
}

/// Compare two amounts with a cent-level tolerance.
pub fn amounts_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
