//! Unit conversion module.
//!
//! Linear categories give every unit a multiplier meaning "units of this
//! type per one base unit", so `value / from * to` converts between any
//! pair. Temperature is affine and pivots through Celsius.
//!
//! `ConversionPanel` keeps the from/to selection and field text of one
//! converter widget.

use crate::error::{CalcError, LookupKind, Result};
use crate::format::{format_number, FormatOptions};
use crate::input::parse_number;
use serde::Serialize;
use tracing::{debug, warn};

/// How values move between units of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionModel {
    /// Proportional multipliers against a common base unit.
    Linear,
    /// Affine scales routed through Celsius.
    Temperature,
}

/// One unit of a conversion category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitDef {
    pub key: &'static str,
    pub name: &'static str,
    /// Units of this type per one base unit. `None` for affine units.
    pub multiplier: Option<f64>,
}

const fn unit(key: &'static str, name: &'static str, multiplier: f64) -> UnitDef {
    UnitDef {
        key,
        name,
        multiplier: Some(multiplier),
    }
}

const fn affine(key: &'static str, name: &'static str) -> UnitDef {
    UnitDef {
        key,
        name,
        multiplier: None,
    }
}

/// The units of one conversion category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionTable {
    pub key: &'static str,
    pub title: &'static str,
    pub model: ConversionModel,
    pub units: Vec<UnitDef>,
}

impl ConversionTable {
    fn linear(key: &'static str, title: &'static str, units: Vec<UnitDef>) -> Self {
        Self {
            key,
            title,
            model: ConversionModel::Linear,
            units,
        }
    }

    /// Look up a unit by key.
    pub fn unit(&self, key: &str) -> Result<&UnitDef> {
        self.units
            .iter()
            .find(|u| u.key == key)
            .ok_or_else(|| CalcError::not_found(LookupKind::Unit, key))
    }

    /// Convert `value` between two units of this table.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let from_unit = self.unit(from)?;
        let to_unit = self.unit(to)?;
        if from_unit.key == to_unit.key {
            return Ok(value);
        }
        match self.model {
            ConversionModel::Linear => {
                let (Some(from_factor), Some(to_factor)) =
                    (from_unit.multiplier, to_unit.multiplier)
                else {
                    return Err(CalcError::Config(format!(
                        "linear category '{}' has a unit without multiplier",
                        self.key
                    )));
                };
                Ok(value / from_factor * to_factor)
            }
            ConversionModel::Temperature => {
                let celsius = to_celsius(value, from_unit.key)?;
                from_celsius(celsius, to_unit.key)
            }
        }
    }
}

fn to_celsius(value: f64, unit: &str) -> Result<f64> {
    match unit {
        "celsius" => Ok(value),
        "fahrenheit" => Ok((value - 32.0) * 5.0 / 9.0),
        "kelvin" => Ok(value - 273.15),
        other => Err(CalcError::not_found(LookupKind::Unit, other)),
    }
}

fn from_celsius(celsius: f64, unit: &str) -> Result<f64> {
    match unit {
        "celsius" => Ok(celsius),
        "fahrenheit" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(celsius + 273.15),
        other => Err(CalcError::not_found(LookupKind::Unit, other)),
    }
}

/// The ten built-in conversion categories.
pub fn builtin_tables() -> Vec<ConversionTable> {
    vec![
        ConversionTable::linear(
            "length",
            "Length",
            vec![
                unit("meter", "Meter", 1.0),
                unit("kilometer", "Kilometer", 0.001),
                unit("centimeter", "Centimeter", 100.0),
                unit("millimeter", "Millimeter", 1000.0),
                unit("mile", "Mile", 0.000621371),
                unit("yard", "Yard", 1.09361),
                unit("foot", "Foot", 3.28084),
                unit("inch", "Inch", 39.3701),
                unit("nautical-mile", "Nautical Mile", 0.000539957),
            ],
        ),
        ConversionTable::linear(
            "weight",
            "Weight",
            vec![
                unit("kilogram", "Kilogram", 1.0),
                unit("gram", "Gram", 1000.0),
                unit("milligram", "Milligram", 1_000_000.0),
                unit("pound", "Pound", 2.20462),
                unit("ounce", "Ounce", 35.274),
                unit("metric-ton", "Metric Ton", 0.001),
                unit("stone", "Stone", 0.157473),
                unit("carat", "Carat", 5000.0),
            ],
        ),
        ConversionTable {
            key: "temperature",
            title: "Temperature",
            model: ConversionModel::Temperature,
            units: vec![
                affine("celsius", "Celsius"),
                affine("fahrenheit", "Fahrenheit"),
                affine("kelvin", "Kelvin"),
            ],
        },
        ConversionTable::linear(
            "area",
            "Area",
            vec![
                unit("square-meter", "Square Meter", 1.0),
                unit("square-kilometer", "Square Kilometer", 0.000001),
                unit("square-centimeter", "Square Centimeter", 10000.0),
                unit("square-mile", "Square Mile", 3.861e-7),
                unit("square-yard", "Square Yard", 1.19599),
                unit("square-foot", "Square Foot", 10.7639),
                unit("square-inch", "Square Inch", 1550.0),
                unit("acre", "Acre", 0.000247105),
                unit("hectare", "Hectare", 0.0001),
            ],
        ),
        ConversionTable::linear(
            "volume",
            "Volume",
            vec![
                unit("liter", "Liter", 1.0),
                unit("milliliter", "Milliliter", 1000.0),
                unit("cubic-meter", "Cubic Meter", 0.001),
                unit("cubic-centimeter", "Cubic Centimeter", 1000.0),
                unit("gallon", "Gallon", 0.264172),
                unit("quart", "Quart", 1.05669),
                unit("pint", "Pint", 2.11338),
                unit("cup", "Cup", 4.22675),
                unit("fluid-ounce", "Fluid Ounce", 33.814),
            ],
        ),
        ConversionTable::linear(
            "speed",
            "Speed",
            vec![
                unit("meters-per-second", "Meters per Second", 1.0),
                unit("kilometers-per-hour", "Kilometers per Hour", 3.6),
                unit("miles-per-hour", "Miles per Hour", 2.23694),
                unit("feet-per-second", "Feet per Second", 3.28084),
                unit("knot", "Knot", 1.94384),
            ],
        ),
        ConversionTable::linear(
            "time",
            "Time",
            vec![
                unit("second", "Second", 1.0),
                unit("minute", "Minute", 0.0166667),
                unit("hour", "Hour", 0.000277778),
                unit("day", "Day", 0.0000115741),
                unit("week", "Week", 0.00000165344),
                unit("month", "Month", 3.80517e-7),
                unit("year", "Year", 3.17098e-8),
            ],
        ),
        ConversionTable::linear(
            "data",
            "Data",
            vec![
                unit("byte", "Byte", 1.0),
                unit("kilobyte", "Kilobyte", 0.001),
                unit("megabyte", "Megabyte", 0.000001),
                unit("gigabyte", "Gigabyte", 1e-9),
                unit("terabyte", "Terabyte", 1e-12),
                unit("bit", "Bit", 8.0),
                unit("kilobit", "Kilobit", 0.008),
                unit("megabit", "Megabit", 0.000008),
            ],
        ),
        ConversionTable::linear(
            "energy",
            "Energy",
            vec![
                unit("joule", "Joule", 1.0),
                unit("kilojoule", "Kilojoule", 0.001),
                unit("calorie", "Calorie", 0.239006),
                unit("kilocalorie", "Kilocalorie", 0.000239006),
                unit("watt-hour", "Watt-hour", 0.000277778),
                unit("kilowatt-hour", "Kilowatt-hour", 2.77778e-7),
                unit("btu", "BTU", 0.000947817),
            ],
        ),
        ConversionTable::linear(
            "pressure",
            "Pressure",
            vec![
                unit("pascal", "Pascal", 1.0),
                unit("kilopascal", "Kilopascal", 0.001),
                unit("bar", "Bar", 0.00001),
                unit("atmosphere", "Atmosphere", 0.00000986923),
                unit("psi", "PSI", 0.000145038),
                unit("torr", "Torr", 0.00750062),
                unit("mmhg", "mmHg", 0.00750062),
            ],
        ),
    ]
}

/// Converts values between units of the built-in categories.
///
/// # Examples
///
/// ```rust
/// use calckit::UnitConverter;
///
/// let converter = UnitConverter::builtin();
/// assert_eq!(converter.convert("temperature", 100.0, "celsius", "fahrenheit").unwrap(), 212.0);
/// assert_eq!(converter.convert("length", 2.5, "mile", "mile").unwrap(), 2.5);
///
/// let km = converter.convert("length", 1500.0, "meter", "kilometer").unwrap();
/// assert_eq!(converter.format(km), "1.5");
/// ```
#[derive(Debug, Clone)]
pub struct UnitConverter {
    tables: Vec<ConversionTable>,
    format: FormatOptions,
}

impl UnitConverter {
    /// Converter over the built-in tables with the converter number format.
    pub fn builtin() -> Self {
        Self::with_options(FormatOptions::converter())
    }

    pub fn with_options(format: FormatOptions) -> Self {
        Self {
            tables: builtin_tables(),
            format,
        }
    }

    /// Category keys and titles in display order.
    pub fn list_categories(&self) -> Vec<(&'static str, &'static str)> {
        self.tables.iter().map(|t| (t.key, t.title)).collect()
    }

    /// Look up a category table.
    pub fn table(&self, category: &str) -> Result<&ConversionTable> {
        self.tables.iter().find(|t| t.key == category).ok_or_else(|| {
            warn!(category, "unknown conversion category");
            CalcError::not_found(LookupKind::ConversionCategory, category)
        })
    }

    /// Unit keys and names of a category in display order.
    pub fn list_units(&self, category: &str) -> Result<Vec<(&'static str, &'static str)>> {
        let table = self.table(category)?;
        Ok(table.units.iter().map(|u| (u.key, u.name)).collect())
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// Converting a unit to itself returns `value` unchanged.
    pub fn convert(&self, category: &str, value: f64, from: &str, to: &str) -> Result<f64> {
        let result = self
            .table(category)?
            .convert(value, from, to)
            .inspect_err(|err| warn!(category, from, to, error = %err, "conversion rejected"))?;
        debug!(category, value, from, to, result, "converted");
        Ok(result)
    }

    /// Format a converted value with the converter number policy.
    pub fn format(&self, value: f64) -> String {
        format_number(value, &self.format)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::builtin()
    }
}

/// From/to state of one converter widget.
///
/// Values are kept as field text. Editing the source field re-runs the
/// conversion; empty or unparsable text clears the target field.
///
/// # Examples
///
/// ```rust
/// use calckit::{ConversionPanel, UnitConverter};
///
/// let converter = UnitConverter::builtin();
/// let mut panel = ConversionPanel::new(&converter, "length").unwrap();
/// assert_eq!(panel.from_unit(), "meter");
/// assert_eq!(panel.to_unit(), "kilometer");
///
/// panel.set_from_value("2500");
/// assert_eq!(panel.to_value(), "2.5");
///
/// panel.swap();
/// assert_eq!(panel.from_unit(), "kilometer");
/// assert_eq!(panel.from_value(), "2.5");
/// assert_eq!(panel.to_value(), "2500");
/// ```
#[derive(Debug, Clone)]
pub struct ConversionPanel<'c> {
    converter: &'c UnitConverter,
    category: &'static str,
    from_unit: &'static str,
    to_unit: &'static str,
    from_value: String,
    to_value: String,
    /// Full-precision value behind `from_value`.
    source: Option<f64>,
    /// Full-precision value behind `to_value`.
    result: Option<f64>,
    /// Fields before the last swap, restored by an immediate second swap.
    before_swap: Option<PanelFields>,
}

#[derive(Debug, Clone)]
struct PanelFields {
    from_value: String,
    to_value: String,
    source: Option<f64>,
    result: Option<f64>,
}

impl<'c> ConversionPanel<'c> {
    /// Open a panel on `category` with its first two units selected.
    pub fn new(converter: &'c UnitConverter, category: &str) -> Result<Self> {
        let mut panel = Self {
            converter,
            category: "",
            from_unit: "",
            to_unit: "",
            from_value: String::new(),
            to_value: String::new(),
            source: None,
            result: None,
            before_swap: None,
        };
        panel.set_category(category)?;
        Ok(panel)
    }

    /// Switch category, select its first two units and clear both fields.
    pub fn set_category(&mut self, category: &str) -> Result<()> {
        let table = self.converter.table(category)?;
        let first = table
            .units
            .first()
            .ok_or_else(|| CalcError::Config(format!("category '{}' has no units", table.key)))?;
        let second = table.units.get(1).unwrap_or(first);
        self.category = table.key;
        self.from_unit = first.key;
        self.to_unit = second.key;
        self.from_value.clear();
        self.to_value.clear();
        self.source = None;
        self.result = None;
        self.before_swap = None;
        Ok(())
    }

    /// Select both units and re-run the conversion.
    pub fn set_units(&mut self, from: &str, to: &str) -> Result<()> {
        let table = self.converter.table(self.category)?;
        let from_unit = table.unit(from)?.key;
        let to_unit = table.unit(to)?.key;
        self.from_unit = from_unit;
        self.to_unit = to_unit;
        self.before_swap = None;
        self.refresh();
        Ok(())
    }

    /// Replace the source field text and re-run the conversion.
    pub fn set_from_value(&mut self, text: &str) {
        self.from_value = text.to_string();
        self.source = parse_number(text);
        self.before_swap = None;
        self.refresh();
    }

    /// Exchange units and field text, then re-run the conversion.
    ///
    /// The converted value moves across at full precision, so the new target
    /// field is not skewed by the rounding of the old one. Swapping again
    /// without editing in between restores both fields exactly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use calckit::{ConversionPanel, UnitConverter};
    ///
    /// let converter = UnitConverter::builtin();
    /// let mut panel = ConversionPanel::new(&converter, "length").unwrap();
    /// panel.set_units("meter", "mile").unwrap();
    /// panel.set_from_value("1");
    ///
    /// panel.swap();
    /// assert_eq!(panel.from_value(), "0.000621");
    /// assert_eq!(panel.to_value(), "1");
    ///
    /// panel.swap();
    /// assert_eq!(panel.from_value(), "1");
    /// assert_eq!(panel.to_value(), "0.000621");
    /// ```
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        let shown = self.fields();
        match self.before_swap.take() {
            Some(previous) => {
                self.from_value = previous.from_value;
                self.to_value = previous.to_value;
                self.source = previous.source;
                self.result = previous.result;
            }
            None => {
                std::mem::swap(&mut self.from_value, &mut self.to_value);
                self.source = self.result;
                self.refresh();
            }
        }
        self.before_swap = Some(shown);
        debug!(from = self.from_unit, to = self.to_unit, "swapped units");
    }

    fn fields(&self) -> PanelFields {
        PanelFields {
            from_value: self.from_value.clone(),
            to_value: self.to_value.clone(),
            source: self.source,
            result: self.result,
        }
    }

    fn convert_source(&self) -> Option<f64> {
        let value = self.source?;
        self.converter
            .convert(self.category, value, self.from_unit, self.to_unit)
            .ok()
    }

    fn refresh(&mut self) {
        self.result = self.convert_source();
        self.to_value = self
            .result
            .map(|result| self.converter.format(result))
            .unwrap_or_default();
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn from_unit(&self) -> &'static str {
        self.from_unit
    }

    pub fn to_unit(&self) -> &'static str {
        self.to_unit
    }

    pub fn from_value(&self) -> &str {
        &self.from_value
    }

    pub fn to_value(&self) -> &str {
        &self.to_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_fixed_points() {
        let c = UnitConverter::builtin();
        assert_eq!(c.convert("temperature", 0.0, "celsius", "fahrenheit").unwrap(), 32.0);
        assert_eq!(c.convert("temperature", 100.0, "celsius", "fahrenheit").unwrap(), 212.0);
        assert_eq!(c.convert("temperature", 0.0, "kelvin", "celsius").unwrap(), -273.15);
        let k = c.convert("temperature", 32.0, "fahrenheit", "kelvin").unwrap();
        assert!((k - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_linear_conversion() {
        let c = UnitConverter::builtin();
        let feet = c.convert("length", 1.0, "meter", "foot").unwrap();
        assert_eq!(feet, 3.28084);
        let bits = c.convert("data", 2.0, "byte", "bit").unwrap();
        assert_eq!(bits, 16.0);
    }

    #[test]
    fn test_unknown_keys() {
        let c = UnitConverter::builtin();
        assert_eq!(
            c.convert("mass", 1.0, "gram", "gram").unwrap_err(),
            CalcError::not_found(LookupKind::ConversionCategory, "mass")
        );
        assert_eq!(
            c.convert("length", 1.0, "meter", "furlong").unwrap_err(),
            CalcError::not_found(LookupKind::Unit, "furlong")
        );
        assert!(c.list_units("nope").is_err());
    }

    #[test]
    fn test_categories_listed_in_order() {
        let keys: Vec<_> = UnitConverter::builtin()
            .list_categories()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec![
                "length",
                "weight",
                "temperature",
                "area",
                "volume",
                "speed",
                "time",
                "data",
                "energy",
                "pressure"
            ]
        );
    }

    #[test]
    fn test_panel_clears_on_bad_input() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "weight").unwrap();
        panel.set_from_value("1");
        assert_eq!(panel.to_value(), "1000");
        panel.set_from_value("abc");
        assert_eq!(panel.to_value(), "");
        panel.set_from_value("");
        assert_eq!(panel.to_value(), "");
    }

    #[test]
    fn test_panel_set_category_resets() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "length").unwrap();
        panel.set_from_value("3");
        panel.set_category("temperature").unwrap();
        assert_eq!(panel.from_unit(), "celsius");
        assert_eq!(panel.to_unit(), "fahrenheit");
        assert_eq!(panel.from_value(), "");
        assert_eq!(panel.to_value(), "");
        assert!(panel.set_category("nope").is_err());
        assert_eq!(panel.category(), "temperature");
    }

    #[test]
    fn test_panel_swap_twice_is_identity() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "temperature").unwrap();
        panel.set_from_value("37");
        let before = (
            panel.from_unit(),
            panel.to_unit(),
            panel.from_value().to_string(),
            panel.to_value().to_string(),
        );
        panel.swap();
        panel.swap();
        let after = (
            panel.from_unit(),
            panel.to_unit(),
            panel.from_value().to_string(),
            panel.to_value().to_string(),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_panel_swap_twice_keeps_rounded_values() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "length").unwrap();
        panel.set_units("meter", "mile").unwrap();
        panel.set_from_value("1");
        let before = (panel.from_value().to_string(), panel.to_value().to_string());
        assert_eq!(before, ("1".to_string(), "0.000621".to_string()));

        panel.swap();
        assert_eq!(panel.from_unit(), "mile");
        assert_eq!(panel.to_value(), "1");

        panel.swap();
        let after = (panel.from_value().to_string(), panel.to_value().to_string());
        assert_eq!(before, after);
        assert_eq!(panel.from_unit(), "meter");

        panel.swap();
        panel.swap();
        panel.swap();
        assert_eq!(panel.from_value(), "0.000621");
        assert_eq!(panel.to_value(), "1");
    }

    #[test]
    fn test_panel_edit_after_swap_converts_typed_text() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "length").unwrap();
        panel.set_units("meter", "mile").unwrap();
        panel.set_from_value("1");
        panel.swap();
        panel.set_from_value("2");
        panel.swap();
        assert_eq!(panel.from_unit(), "meter");
        assert_eq!(panel.to_value(), "2");
        assert_eq!(panel.from_value(), "3218.688996");
    }

    #[test]
    fn test_panel_set_units_validates() {
        let c = UnitConverter::builtin();
        let mut panel = ConversionPanel::new(&c, "length").unwrap();
        panel.set_from_value("1");
        assert!(panel.set_units("meter", "parsec").is_err());
        assert_eq!(panel.to_unit(), "kilometer");
        panel.set_units("kilometer", "meter").unwrap();
        assert_eq!(panel.to_value(), "1000");
    }
}
