//! Formula inputs module.
//!
//! Declares the shape of a formula input (`InputSpec`), the kinds of value
//! an input can hold, and `Inputs`, the parsed bindings a compute function
//! reads from. Reading an id that was never declared is reported as
//! `InvalidInput` instead of panicking.

use crate::context::EvalContext;
use crate::error::{CalcError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashMap;

/// Raw user-supplied field values, keyed by input id.
pub type RawInputs = HashMap<String, String>;

/// Build a [`RawInputs`] map from `(id, text)` pairs.
///
/// # Examples
///
/// ```rust
/// use calckit::input::raw_inputs;
///
/// let raw = raw_inputs([("moles", "2"), ("volume", "0.5")]);
/// assert_eq!(raw.get("moles").map(String::as_str), Some("2"));
/// ```
pub fn raw_inputs<I, K, V>(pairs: I) -> RawInputs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// How a raw field is parsed before the compute function sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Floating-point number (integers, decimals, sign, exponent).
    Numeric,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    /// Time of day in `HH:MM` or `HH:MM:SS` form.
    Time,
    /// Untouched text, parsed later by the formula itself.
    Text,
}

impl InputKind {
    /// Parse a raw field according to this kind.
    ///
    /// Returns `None` when the text is not a valid value of the kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use calckit::input::{InputKind, InputValue};
    ///
    /// assert_eq!(InputKind::Numeric.parse("-1.5e3"), Some(InputValue::Number(-1500.0)));
    /// assert_eq!(InputKind::Numeric.parse("abc"), None);
    /// assert_eq!(InputKind::Text.parse("1010"), Some(InputValue::Text("1010".into())));
    /// ```
    pub fn parse(self, raw: &str) -> Option<InputValue> {
        match self {
            InputKind::Numeric => parse_number(raw).map(InputValue::Number),
            InputKind::Date => parse_date(raw).map(InputValue::Date),
            InputKind::Time => parse_time(raw).map(InputValue::Time),
            InputKind::Text => Some(InputValue::Text(raw.to_string())),
        }
    }
}

/// Declaration of one formula input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    /// Identifier the compute function reads; unique within the formula.
    pub id: &'static str,
    /// Field label.
    pub label: &'static str,
    /// Symbol used in the formula text.
    pub symbol: &'static str,
    /// Unit shown next to the field, possibly empty.
    pub unit: &'static str,
    /// How the raw text is parsed.
    pub kind: InputKind,
}

impl InputSpec {
    pub const fn numeric(
        id: &'static str,
        label: &'static str,
        symbol: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            symbol,
            unit,
            kind: InputKind::Numeric,
        }
    }

    pub const fn date(id: &'static str, label: &'static str, symbol: &'static str) -> Self {
        Self {
            id,
            label,
            symbol,
            unit: "",
            kind: InputKind::Date,
        }
    }

    pub const fn time(id: &'static str, label: &'static str, symbol: &'static str) -> Self {
        Self {
            id,
            label,
            symbol,
            unit: "",
            kind: InputKind::Time,
        }
    }

    pub const fn text(
        id: &'static str,
        label: &'static str,
        symbol: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            symbol,
            unit,
            kind: InputKind::Text,
        }
    }
}

/// A parsed input value.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Number(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Text(String),
}

/// Parsed bindings handed to a compute function.
///
/// Accessors return `InvalidInput` when the id is unbound or holds a value
/// of another kind, so a compute function that reads an undeclared id
/// fails the evaluation instead of crashing.
#[derive(Debug, Clone)]
pub struct Inputs {
    values: HashMap<&'static str, InputValue>,
    context: EvalContext,
}

impl Inputs {
    /// Create an empty binding set evaluated against `context`.
    pub fn new(context: EvalContext) -> Self {
        Self {
            values: HashMap::new(),
            context,
        }
    }

    /// Bind a value to an input id.
    pub fn insert(&mut self, id: &'static str, value: InputValue) {
        self.values.insert(id, value);
    }

    /// The reference clock of this evaluation.
    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    fn get(&self, id: &str) -> Result<&InputValue> {
        self.values
            .get(id)
            .ok_or_else(|| CalcError::invalid_field(id, "input is not declared by the formula"))
    }

    /// Read a numeric input.
    pub fn number(&self, id: &str) -> Result<f64> {
        match self.get(id)? {
            InputValue::Number(n) => Ok(*n),
            _ => Err(CalcError::invalid_field(id, "expected a number")),
        }
    }

    /// Read a numeric input truncated toward zero.
    pub fn integer(&self, id: &str) -> Result<i64> {
        let n = self.number(id)?;
        if !n.is_finite() || n.abs() >= i64::MAX as f64 {
            return Err(CalcError::compute(format!("{} is out of integer range", id)));
        }
        Ok(n.trunc() as i64)
    }

    /// Read a date input.
    pub fn date(&self, id: &str) -> Result<NaiveDate> {
        match self.get(id)? {
            InputValue::Date(d) => Ok(*d),
            _ => Err(CalcError::invalid_field(id, "expected a date")),
        }
    }

    /// Read a time input.
    pub fn time(&self, id: &str) -> Result<NaiveTime> {
        match self.get(id)? {
            InputValue::Time(t) => Ok(*t),
            _ => Err(CalcError::invalid_field(id, "expected a time")),
        }
    }

    /// Read a text input.
    pub fn text(&self, id: &str) -> Result<&str> {
        match self.get(id)? {
            InputValue::Text(s) => Ok(s),
            _ => Err(CalcError::invalid_field(id, "expected text")),
        }
    }
}

/// Parse a floating-point number.
///
/// Accepts integers, decimals, a leading sign and `e`/`E` exponents.
/// Surrounding whitespace is ignored. Infinity and NaN spellings, and
/// values that overflow to infinity, are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !valid_chars {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2.5E-2"), Some(0.025));
        assert_eq!(parse_number("  7 "), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_number_rejects() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time("23:59:59"), NaiveTime::from_hms_opt(23, 59, 59));
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn test_unbound_input_is_invalid() {
        let inputs = Inputs::new(EvalContext::current());
        let err = inputs.number("missing").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_wrong_kind_is_invalid() {
        let mut inputs = Inputs::new(EvalContext::current());
        inputs.insert("bits", InputValue::Text("1010".into()));
        assert!(inputs.number("bits").unwrap_err().is_invalid_input());
        assert_eq!(inputs.text("bits").unwrap(), "1010");
    }

    #[test]
    fn test_integer_truncates() {
        let mut inputs = Inputs::new(EvalContext::current());
        inputs.insert("days", InputValue::Number(-2.7));
        assert_eq!(inputs.integer("days").unwrap(), -2);
    }
}
