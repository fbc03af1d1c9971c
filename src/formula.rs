//! Formula definitions module.
//!
//! A formula is plain data: identifiers, display text, an ordered list of
//! input declarations and a `fn` pointer that computes the result. Formulas
//! are grouped into categories, and categories into domains.

use crate::error::{CalcError, LookupKind, Result};
use crate::input::{InputSpec, Inputs};
use crate::value::Value;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Signature of a formula's compute function.
///
/// The function reads its parsed inputs (and, for date formulas, the
/// evaluation context) and returns a number or a string. Expected domain
/// failures are reported as [`CalcError::Compute`] or as a non-finite
/// number; both render as the error sentinel.
pub type ComputeFn = fn(&Inputs) -> Result<Value>;

/// One named calculation.
///
/// # Examples
///
/// ```rust
/// use calckit::formula::FormulaSpec;
/// use calckit::input::InputSpec;
///
/// let spec = FormulaSpec {
///     id: "double",
///     name: "Double",
///     formula: "y = 2x",
///     inputs: vec![InputSpec::numeric("x", "Value", "x", "")],
///     compute: |i| Ok((2.0 * i.number("x")?).into()),
///     result_unit: "",
///     explanation: "Twice the input.",
/// };
/// assert_eq!(spec.input_ids(), vec!["x"]);
/// ```
#[derive(Clone, Serialize)]
pub struct FormulaSpec {
    /// Identifier, unique within its category.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Human-readable equation, for documentation only.
    pub formula: &'static str,
    /// Inputs in display order.
    pub inputs: Vec<InputSpec>,
    /// Pure compute function.
    #[serde(skip)]
    pub compute: ComputeFn,
    /// Unit of the result, possibly empty.
    pub result_unit: &'static str,
    /// Free-text explanation.
    pub explanation: &'static str,
}

impl FormulaSpec {
    /// Input ids in declaration order.
    pub fn input_ids(&self) -> Vec<&'static str> {
        self.inputs.iter().map(|input| input.id).collect()
    }

    /// Check that input ids are unique within the formula.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for input in &self.inputs {
            if !seen.insert(input.id) {
                return Err(CalcError::Config(format!(
                    "formula '{}' declares input '{}' twice",
                    self.id, input.id
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FormulaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaSpec")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("formula", &self.formula)
            .field("inputs", &self.inputs)
            .field("result_unit", &self.result_unit)
            .finish_non_exhaustive()
    }
}

/// An ordered group of formulas within a domain.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub title: &'static str,
    pub formulas: Vec<FormulaSpec>,
}

impl Category {
    pub fn new(key: &'static str, title: &'static str, formulas: Vec<FormulaSpec>) -> Self {
        Self {
            key,
            title,
            formulas,
        }
    }

    /// Look up a formula by id.
    pub fn formula(&self, id: &str) -> Result<&FormulaSpec> {
        self.formulas
            .iter()
            .find(|spec| spec.id == id)
            .ok_or_else(|| CalcError::not_found(LookupKind::Formula, id))
    }

    /// Check formula ids are unique and every formula is well formed.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.formulas {
            if !seen.insert(spec.id) {
                return Err(CalcError::Config(format!(
                    "category '{}' declares formula '{}' twice",
                    self.key, spec.id
                )));
            }
            spec.validate()?;
        }
        Ok(())
    }
}

/// A top-level subject area, such as chemistry or finance.
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    pub key: &'static str,
    pub title: &'static str,
    pub categories: Vec<Category>,
}

impl Domain {
    pub fn new(key: &'static str, title: &'static str, categories: Vec<Category>) -> Self {
        Self {
            key,
            title,
            categories,
        }
    }

    /// Look up a category by key.
    pub fn category(&self, key: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|category| category.key == key)
            .ok_or_else(|| CalcError::not_found(LookupKind::Category, key))
    }

    /// Validate category keys and every category below.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.key) {
                return Err(CalcError::Config(format!(
                    "domain '{}' declares category '{}' twice",
                    self.key, category.key
                )));
            }
            category.validate()?;
        }
        Ok(())
    }

    /// Number of formulas across all categories.
    pub fn formula_count(&self) -> usize {
        self.categories.iter().map(|c| c.formulas.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &'static str) -> FormulaSpec {
        FormulaSpec {
            id,
            name: "Sample",
            formula: "y = x",
            inputs: vec![InputSpec::numeric("x", "X", "x", "")],
            compute: |i| Ok(i.number("x")?.into()),
            result_unit: "",
            explanation: "",
        }
    }

    #[test]
    fn test_category_lookup() {
        let category = Category::new("basic", "Basic", vec![sample("a"), sample("b")]);
        assert_eq!(category.formula("b").unwrap().id, "b");
        let err = category.formula("c").unwrap_err();
        assert_eq!(err, CalcError::not_found(LookupKind::Formula, "c"));
    }

    #[test]
    fn test_duplicate_formula_rejected() {
        let category = Category::new("basic", "Basic", vec![sample("a"), sample("a")]);
        assert!(matches!(category.validate(), Err(CalcError::Config(_))));
    }

    #[test]
    fn test_duplicate_input_rejected() {
        let mut spec = sample("a");
        spec.inputs.push(InputSpec::numeric("x", "Again", "x", ""));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_serialize_skips_compute() {
        let json = serde_json::to_value(sample("a")).unwrap();
        assert!(json.get("compute").is_none());
        assert_eq!(json["inputs"][0]["kind"], "numeric");
    }
}
