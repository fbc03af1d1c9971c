//! Error types for formula lookup, evaluation and conversion.
//!
//! All errors the engine can surface are represented by the `CalcError`
//! enum. None of them is fatal: every failure is local to one operation
//! and leaves calculator memory, history and selection untouched.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// What kind of key a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    Domain,
    Category,
    Formula,
    ConversionCategory,
    Unit,
    HistoryEntry,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Domain => "domain",
            LookupKind::Category => "category",
            LookupKind::Formula => "formula",
            LookupKind::ConversionCategory => "conversion category",
            LookupKind::Unit => "unit",
            LookupKind::HistoryEntry => "history entry",
        };
        f.write_str(name)
    }
}

/// Format a list of field ids as a readable string.
fn format_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        return String::from("(no field)");
    }
    fields.join(", ")
}

/// Errors that can occur while looking up, evaluating or converting.
///
/// # Examples
///
/// ```rust
/// use calckit::{CalcError, LookupKind};
///
/// let err = CalcError::not_found(LookupKind::Formula, "molarity");
/// assert_eq!(err.to_string(), "Unknown formula: molarity");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// An unknown domain, category, formula, unit or history key was requested.
    ///
    /// Callers are expected to use keys obtained from a prior listing call,
    /// so this is a caller-contract violation surfaced as a value.
    #[error("Unknown {kind}: {key}")]
    NotFound { kind: LookupKind, key: String },

    /// One or more fields failed to parse as their declared kind.
    ///
    /// Reported once for the whole evaluation; `fields` lists every
    /// offending input id.
    #[error("Invalid input ({}): {reason}", format_fields(.fields))]
    InvalidInput { fields: Vec<String>, reason: String },

    /// A compute function hit an expected domain failure.
    ///
    /// The evaluator renders this as the `"Error"` sentinel instead of
    /// propagating it.
    #[error("Computation error: {0}")]
    Compute(String),

    /// Configuration text could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    pub fn not_found(kind: LookupKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn invalid_input(fields: Vec<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            fields,
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::invalid_input(vec![field.into()], reason)
    }

    pub fn compute(msg: impl Into<String>) -> Self {
        Self::Compute(msg.into())
    }

    /// Returns true for `NotFound` errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for `InvalidInput` errors.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CalcError::not_found(LookupKind::Unit, "furlong");
        assert!(err.to_string().contains("unit"));
        assert!(err.to_string().contains("furlong"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_input_display() {
        let err = CalcError::invalid_input(
            vec!["moles".to_string(), "volume".to_string()],
            "not a number",
        );
        let display = err.to_string();
        assert!(display.contains("moles, volume"));
        assert!(display.contains("not a number"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_without_fields() {
        let err = CalcError::invalid_input(Vec::new(), "empty");
        assert!(err.to_string().contains("(no field)"));
    }
}
