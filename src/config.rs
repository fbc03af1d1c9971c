//! Engine configuration module.
//!
//! Every section is optional. Missing keys take the documented defaults,
//! so an empty document yields the same engine as `EngineConfig::default()`.

use crate::calculator::{AngleMode, Calculator, Mode};
use crate::converter::UnitConverter;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::format::FormatOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level configuration.
///
/// # Examples
///
/// ```rust
/// use calckit::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(
///     r#"
///     [calculator]
///     history_limit = 5
///     angle_mode = "rad"
///
///     [converter]
///     exponent_digits = 8
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.calculator.history_limit, 5);
/// assert_eq!(config.format.exponent_digits, 4);
/// assert_eq!(config.converter_format().exponent_digits, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number format for formula results.
    pub format: FormatOptions,
    pub calculator: CalculatorConfig,
    pub converter: ConverterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Completed calculations kept, most recent first.
    pub history_limit: usize,
    pub angle_mode: AngleMode,
    pub mode: Mode,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_limit: 20,
            angle_mode: AngleMode::Deg,
            mode: Mode::Basic,
        }
    }
}

/// Converter overrides on top of the shared number format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub exponent_digits: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            exponent_digits: FormatOptions::converter().exponent_digits,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        debug!(
            history_limit = config.calculator.history_limit,
            exponent_digits = config.format.exponent_digits,
            "loaded engine config"
        );
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| crate::CalcError::Config(err.to_string()))
    }

    /// Number format for the unit converter.
    pub fn converter_format(&self) -> FormatOptions {
        FormatOptions {
            exponent_digits: self.converter.exponent_digits,
            ..self.format
        }
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::with_options(self.format)
    }

    pub fn unit_converter(&self) -> UnitConverter {
        UnitConverter::with_options(self.converter_format())
    }

    pub fn calculator(&self) -> Calculator {
        Calculator::with_config(&self.calculator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.calculator.history_limit, 20);
        assert_eq!(config.converter_format(), FormatOptions::converter());
        assert_eq!(config.format, FormatOptions::formula());
    }

    #[test]
    fn test_partial_format_section() {
        let config = EngineConfig::from_toml_str("[format]\nfixed_decimals = 2\n").unwrap();
        assert_eq!(config.format.fixed_decimals, 2);
        assert_eq!(config.format.exponent_digits, 4);
        assert_eq!(config.converter_format().fixed_decimals, 2);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("[calculator]\nhistory_limit = \"many\"").unwrap_err();
        assert!(matches!(err, crate::CalcError::Config(_)));
    }

    #[test]
    fn test_round_trip_toml() {
        let mut config = EngineConfig::default();
        config.calculator.mode = Mode::Advanced;
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_calculator_uses_history_limit() {
        let config = EngineConfig::from_toml_str("[calculator]\nhistory_limit = 1").unwrap();
        let mut calc = config.calculator();
        for _ in 0..3 {
            calc.input_digit('1').unwrap();
            calc.input_operator(crate::calculator::BinaryOperator::Add);
            calc.input_digit('1').unwrap();
            calc.calculate();
        }
        assert_eq!(calc.history().len(), 1);
    }
}
