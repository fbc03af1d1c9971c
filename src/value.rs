//! Computed values module.
//!
//! A compute function produces either a number or a piece of text
//! (base-conversion output, day names, date strings). `Value` carries
//! both shapes through the evaluator to the formatter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The output of a formula's compute function.
///
/// # Examples
///
/// ```rust
/// use calckit::Value;
///
/// let number: Value = 2.5.into();
/// let text: Value = "1010".into();
///
/// assert_eq!(number.as_number(), Some(2.5));
/// assert_eq!(text.as_text(), Some("1010"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric result, formatted by the shared number policy.
    Number(f64),
    /// A textual result, passed through unchanged.
    Text(String),
}

impl Value {
    /// Returns the number if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Returns the text if this is a textual value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }

    /// Whether the value can be displayed as a result.
    ///
    /// Text is always displayable; numbers must be finite.
    pub fn is_displayable(&self) -> bool {
        match self {
            Value::Number(n) => n.is_finite(),
            Value::Text(_) => true,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayable() {
        assert!(Value::from(1.0).is_displayable());
        assert!(!Value::from(f64::INFINITY).is_displayable());
        assert!(!Value::from(f64::NAN).is_displayable());
        assert!(Value::from("Monday").is_displayable());
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_string(&Value::from(42.0)).unwrap();
        assert_eq!(json, "42.0");
        let json = serde_json::to_string(&Value::from("FF")).unwrap();
        assert_eq!(json, "\"FF\"");
    }
}
