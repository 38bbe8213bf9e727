//! Explanation trace for a division
//!
//! A tree of the steps behind a [`PropertyDivision`](crate::PropertyDivision):
//! how the ratio was set, how each item was classified and split, and
//! whether an equalization payment was needed. Useful for:
//!
//! - **Audit trails**: documenting exactly how an allocation was reached
//! - **Explainability**: showing a party why they received what they did
//!
//! # Example
//!
//! ```
//! use propdiv_engine::trace::{TraceNode, TraceNodeType};
//!
//! let root = TraceNode::new(TraceNodeType::Division, "CA")
//!     .with_detail("community")
//!     .with_child(TraceNode::new(TraceNodeType::Item, "house").with_amount(500_000.0));
//!
//! let rendered = root.render();
//! assert!(rendered.contains("`-- house (item) = 500000.00"));
//! ```

use serde::Serialize;

/// Kind of step in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceNodeType {
    Division,
    Ratio,
    Rule,
    Item,
    Totals,
    Equalization,
    Confidence,
}

impl TraceNodeType {
    fn label(self) -> &'static str {
        match self {
            TraceNodeType::Division => "division",
            TraceNodeType::Ratio => "ratio",
            TraceNodeType::Rule => "rule",
            TraceNodeType::Item => "item",
            TraceNodeType::Totals => "totals",
            TraceNodeType::Equalization => "equalization",
            TraceNodeType::Confidence => "confidence",
        }
    }
}

/// A node in the explanation tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceNode {
    pub node_type: TraceNodeType,

    /// Identifier for this step (item id, factor name, ...)
    pub name: String,

    /// Free-form qualifier, rendered in brackets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Numeric outcome of this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    pub fn new(node_type: TraceNodeType, name: impl Into<String>) -> Self {
        Self {
            node_type,
            name: name.into(),
            detail: None,
            amount: None,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_child(mut self, child: TraceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TraceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Render the trace as a human-readable tree string.
    ///
    /// Produces output like:
    /// ```text
    /// PA (division) [equitable]
    /// +-- spouse1_share (ratio) = 0.45
    /// |   `-- marriage_duration (rule) [Short marriage] = -0.05
    /// `-- house (item) [Marital property ...] = 400000.00
    /// ```
    pub fn render(&self) -> String {
        let mut lines = vec![self.line()];
        self.render_children("", &mut lines);
        lines.join("\n")
    }

    fn render_children(&self, indent: &str, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let is_last = i + 1 == count;
            let (branch, continuation) = if is_last {
                ("`-- ", "    ")
            } else {
                ("+-- ", "|   ")
            };
            lines.push(format!("{indent}{branch}{}", child.line()));
            child.render_children(&format!("{indent}{continuation}"), lines);
        }
    }

    fn line(&self) -> String {
        let mut line = format!("{} ({})", self.name, self.node_type.label());
        if let Some(detail) = &self.detail {
            line.push_str(&format!(" [{detail}]"));
        }
        if let Some(amount) = self.amount {
            line.push_str(&format!(" = {}", format_amount(self.node_type, amount)));
        }
        line
    }

    /// Render this node alone on a single line.
    pub fn render_compact(&self) -> String {
        let amount = self
            .amount
            .map(|a| format!("={}", format_amount(self.node_type, a)))
            .unwrap_or_default();
        format!("{}:{}{}", self.node_type.label(), self.name, amount)
    }
}

/// Ratios and deltas print as plain numbers, money with cents.
fn format_amount(node_type: TraceNodeType, amount: f64) -> String {
    match node_type {
        TraceNodeType::Ratio | TraceNodeType::Rule | TraceNodeType::Confidence => {
            format!("{amount}")
        }
        _ => format!("{amount:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = TraceNode::new(TraceNodeType::Item, "car")
            .with_detail("Community property — divided per state rule")
            .with_amount(30_000.0)
            .with_child(TraceNode::new(TraceNodeType::Rule, "a"))
            .with_children(vec![TraceNode::new(TraceNodeType::Rule, "b")]);

        assert_eq!(node.name, "car");
        assert_eq!(node.amount, Some(30_000.0));
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_render_nested_tree() {
        let ratio = TraceNode::new(TraceNodeType::Ratio, "spouse1_share")
            .with_amount(0.45)
            .with_child(
                TraceNode::new(TraceNodeType::Rule, "marriage_duration")
                    .with_detail("Short marriage")
                    .with_amount(-0.05),
            );
        let root = TraceNode::new(TraceNodeType::Division, "PA")
            .with_detail("equitable")
            .with_child(ratio)
            .with_child(TraceNode::new(TraceNodeType::Item, "house").with_amount(400_000.0));

        let rendered = root.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "PA (division) [equitable]");
        assert_eq!(lines[1], "+-- spouse1_share (ratio) = 0.45");
        assert_eq!(
            lines[2],
            "|   `-- marriage_duration (rule) [Short marriage] = -0.05"
        );
        assert_eq!(lines[3], "`-- house (item) = 400000.00");
    }

    #[test]
    fn test_render_compact() {
        let node = TraceNode::new(TraceNodeType::Equalization, "spouse1").with_amount(1_250.5);
        assert_eq!(node.render_compact(), "equalization:spouse1=1250.50");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let node = TraceNode::new(TraceNodeType::Totals, "marital_assets");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"node_type":"totals","name":"marital_assets"}"#);
    }
}
