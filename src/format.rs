//! Result formatting module.
//!
//! One numeric policy is shared by every formula domain and the unit
//! converter. Very small and very large magnitudes switch to exponential
//! notation; everything else is rounded to a fixed number of decimals with
//! trailing zeros removed. The converter uses more exponent digits than the
//! formula domains because unit ratios need the extra precision.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Display text for any computation that produced no usable value.
pub const ERROR_SENTINEL: &str = "Error";

/// Numeric formatting policy.
///
/// # Examples
///
/// ```rust
/// use calckit::format::{format_number, FormatOptions};
///
/// let opts = FormatOptions::formula();
/// assert_eq!(format_number(2.5, &opts), "2.5");
/// assert_eq!(format_number(12345678.0, &opts), "1.2346e+7");
/// assert_eq!(format_number(0.00001234, &opts), "1.2340e-5");
///
/// let opts = FormatOptions::converter();
/// assert_eq!(format_number(12345678.0, &opts), "1.234568e+7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Fractional digits of the mantissa in exponential notation.
    pub exponent_digits: usize,
    /// Decimal places kept before trailing zeros are stripped.
    pub fixed_decimals: usize,
    /// Non-zero magnitudes below this use exponential notation.
    pub small_threshold: f64,
    /// Magnitudes above this use exponential notation.
    pub large_threshold: f64,
}

impl FormatOptions {
    /// Policy for formula results (4 exponent digits).
    pub fn formula() -> Self {
        Self {
            exponent_digits: 4,
            fixed_decimals: 6,
            small_threshold: 1e-4,
            large_threshold: 1e6,
        }
    }

    /// Policy for unit conversion results (6 exponent digits).
    pub fn converter() -> Self {
        Self {
            exponent_digits: 6,
            ..Self::formula()
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::formula()
    }
}

/// Format a number using the given policy.
///
/// Non-finite numbers render as [`ERROR_SENTINEL`].
pub fn format_number(value: f64, opts: &FormatOptions) -> String {
    if !value.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < opts.small_threshold || magnitude > opts.large_threshold {
        return to_exponential(value, opts.exponent_digits);
    }

    let fixed = format!("{:.*}", opts.fixed_decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a computed value; text passes through unchanged.
///
/// # Examples
///
/// ```rust
/// use calckit::format::{format_value, FormatOptions};
/// use calckit::Value;
///
/// let opts = FormatOptions::formula();
/// assert_eq!(format_value(&Value::from("1010"), &opts), "1010");
/// assert_eq!(format_value(&Value::from(1.0 / 3.0), &opts), "0.333333");
/// ```
pub fn format_value(value: &Value, opts: &FormatOptions) -> String {
    match value {
        Value::Number(n) => format_number(*n, opts),
        Value::Text(s) => s.clone(),
    }
}

/// Render `value` in exponential notation with a signed exponent.
///
/// The mantissa has exactly `digits` fractional digits; the exponent always
/// carries its sign, as in `1.2346e+7` and `1.2340e-5`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    let raw = format!("{:.*e}", digits, value);
    signed_exponent(&raw)
}

/// Render a calculator operand the way the display shows it.
///
/// Uses the shortest representation that round-trips, switching to
/// exponential notation for magnitudes of at least `1e21` or below `1e-6`.
/// Non-finite values render as [`ERROR_SENTINEL`].
///
/// # Examples
///
/// ```rust
/// use calckit::format::display_number;
///
/// assert_eq!(display_number(20.0), "20");
/// assert_eq!(display_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(display_number(1e-7), "1e-7");
/// assert_eq!(display_number(f64::NAN), "Error");
/// ```
pub fn display_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        signed_exponent(&format!("{:e}", value))
    } else {
        format!("{}", value)
    }
}

fn signed_exponent(raw: &str) -> String {
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_strips_trailing_zeros() {
        let opts = FormatOptions::formula();
        assert_eq!(format_number(1.5, &opts), "1.5");
        assert_eq!(format_number(100.0, &opts), "100");
        assert_eq!(format_number(2.0 / 3.0, &opts), "0.666667");
        assert_eq!(format_number(-42.25, &opts), "-42.25");
    }

    #[test]
    fn test_thresholds() {
        let opts = FormatOptions::formula();
        assert_eq!(format_number(0.0001, &opts), "0.0001");
        assert_eq!(format_number(1_000_000.0, &opts), "1000000");
        assert_eq!(format_number(1_000_001.0, &opts), "1.0000e+6");
        assert_eq!(format_number(-0.00005, &opts), "-5.0000e-5");
    }

    #[test]
    fn test_zero() {
        let opts = FormatOptions::formula();
        assert_eq!(format_number(0.0, &opts), "0");
        assert_eq!(format_number(-0.0, &opts), "0");
    }

    #[test]
    fn test_non_finite_is_sentinel() {
        let opts = FormatOptions::formula();
        assert_eq!(format_number(f64::INFINITY, &opts), ERROR_SENTINEL);
        assert_eq!(format_number(f64::NEG_INFINITY, &opts), ERROR_SENTINEL);
        assert_eq!(format_number(f64::NAN, &opts), ERROR_SENTINEL);
    }

    #[test]
    fn test_converter_precision() {
        let opts = FormatOptions::converter();
        assert_eq!(format_number(3.861e-7, &opts), "3.861000e-7");
        assert_eq!(format_number(3.28084, &opts), "3.28084");
    }

    #[test]
    fn test_display_number_large() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(120.0), "120");
        assert_eq!(display_number(-0.0), "0");
    }
}
