use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-friendly representation of a single cell value.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable IPC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Empty / unset cell value.
    Empty,
    /// IEEE-754 double precision number.
    Number(f64),
    /// Plain string.
    Text(String),
    /// Boolean (including checkbox cells).
    Bool(bool),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    /// Returns true if the value is [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Stable text rendering used for digest computation and raw-mode
    /// comparison.
    ///
    /// Integral numbers render without a fractional part so that a host that
    /// round-trips `42` through a float column still hashes to the same
    /// fingerprint as the text `"42"`.
    pub fn canonical_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_text_drops_integral_fraction() {
        assert_eq!(CellValue::Number(42.0).canonical_text(), "42");
        assert_eq!(CellValue::Number(42.5).canonical_text(), "42.5");
        assert_eq!(CellValue::Number(-3.0).canonical_text(), "-3");
    }

    #[test]
    fn canonical_text_for_scalars() {
        assert_eq!(CellValue::Empty.canonical_text(), "");
        assert_eq!(CellValue::Bool(true).canonical_text(), "TRUE");
        assert_eq!(CellValue::Bool(false).canonical_text(), "FALSE");
        assert_eq!(CellValue::from("alice").canonical_text(), "alice");
    }

    #[test]
    fn serde_tagged_layout() {
        let json = serde_json::to_value(CellValue::Number(1.5)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "number", "value": 1.5}));
        let json = serde_json::to_value(CellValue::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"type": "empty"}));
    }
}
