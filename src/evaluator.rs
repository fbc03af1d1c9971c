//! Formula evaluator module.
//!
//! Provides the `Evaluator` type, which turns a `FormulaSpec` plus raw user
//! text into an `EvaluationResult`, and `FormulaSession`, the selection
//! cursor a hosting UI drives (active formula plus its last result).

use crate::context::EvalContext;
use crate::error::{CalcError, LookupKind, Result};
use crate::format::{format_value, FormatOptions, ERROR_SENTINEL};
use crate::formula::FormulaSpec;
use crate::input::{InputSpec, Inputs, RawInputs};
use crate::registry::FormulaRegistry;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a successful evaluation.
///
/// Domain failures inside the formula (division by zero, log of a negative
/// number, a digit outside the radix) are not errors at this level; they
/// become [`EvaluationResult::Error`] carrying the `"Error"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum EvaluationResult {
    /// The formula produced a displayable value.
    Ok { value: Value, unit: String },
    /// The formula produced no usable value.
    Error(String),
}

impl EvaluationResult {
    fn domain_error() -> Self {
        EvaluationResult::Error(ERROR_SENTINEL.to_string())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, EvaluationResult::Ok { .. })
    }

    /// The computed value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            EvaluationResult::Ok { value, .. } => Some(value),
            EvaluationResult::Error(_) => None,
        }
    }

    /// Text to show in the result field, without the unit.
    pub fn display(&self, opts: &FormatOptions) -> String {
        match self {
            EvaluationResult::Ok { value, .. } => format_value(value, opts),
            EvaluationResult::Error(sentinel) => sentinel.clone(),
        }
    }
}

/// Validates raw inputs and runs compute functions.
///
/// # Examples
///
/// ```rust
/// use calckit::input::raw_inputs;
/// use calckit::{EvalContext, EvaluationResult, Evaluator, FormulaRegistry, Value};
///
/// let registry = FormulaRegistry::builtin();
/// let spec = registry.select_formula("chemistry", "solutions", "molarity").unwrap();
/// let evaluator = Evaluator::new();
///
/// let raw = raw_inputs([("moles", "2"), ("volume", "0.5")]);
/// let result = evaluator.evaluate(spec, &raw, &EvalContext::current()).unwrap();
/// assert_eq!(
///     result,
///     EvaluationResult::Ok { value: Value::from(4.0), unit: "M (mol/L)".to_string() }
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    format: FormatOptions,
}

impl Evaluator {
    /// Create an evaluator using the formula number format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a custom number format.
    pub fn with_options(format: FormatOptions) -> Self {
        Self { format }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.format
    }

    /// Inputs of a formula in declaration order.
    pub fn list_inputs<'a>(&self, spec: &'a FormulaSpec) -> &'a [InputSpec] {
        &spec.inputs
    }

    /// Parse every declared input of `spec` from `raw`.
    ///
    /// All-or-nothing: if any field is missing, blank or fails to parse as
    /// its kind, the error lists every such field and nothing is bound.
    pub fn parse_inputs(
        &self,
        spec: &FormulaSpec,
        raw: &RawInputs,
        context: &EvalContext,
    ) -> Result<Inputs> {
        let mut inputs = Inputs::new(*context);
        let mut bad_fields = Vec::new();

        for input in &spec.inputs {
            let parsed = raw
                .get(input.id)
                .filter(|text| !text.trim().is_empty())
                .and_then(|text| input.kind.parse(text));
            match parsed {
                Some(value) => inputs.insert(input.id, value),
                None => bad_fields.push(input.id.to_string()),
            }
        }

        if bad_fields.is_empty() {
            Ok(inputs)
        } else {
            debug!(formula = spec.id, fields = ?bad_fields, "rejected inputs");
            Err(CalcError::invalid_input(
                bad_fields,
                "missing or malformed value",
            ))
        }
    }

    /// Evaluate a formula against raw field text.
    ///
    /// # Arguments
    ///
    /// * `spec` - The formula to run
    /// * `raw` - Field text keyed by input id
    /// * `context` - Reference clock for formulas relative to the present
    ///
    /// # Returns
    ///
    /// * `Ok(EvaluationResult::Ok { .. })` - The formula produced a finite number or text
    /// * `Ok(EvaluationResult::Error(_))` - The formula hit a domain failure
    /// * `Err(CalcError::InvalidInput)` - Fields failed to parse, or the compute
    ///   function read an input it does not declare
    pub fn evaluate(
        &self,
        spec: &FormulaSpec,
        raw: &RawInputs,
        context: &EvalContext,
    ) -> Result<EvaluationResult> {
        let inputs = self.parse_inputs(spec, raw, context)?;

        let result = match (spec.compute)(&inputs) {
            Ok(value) if value.is_displayable() => EvaluationResult::Ok {
                value,
                unit: spec.result_unit.to_string(),
            },
            Ok(_) => EvaluationResult::domain_error(),
            Err(CalcError::Compute(reason)) => {
                debug!(formula = spec.id, %reason, "domain failure");
                EvaluationResult::domain_error()
            }
            Err(err) => return Err(err),
        };

        debug!(formula = spec.id, ok = result.is_ok(), "evaluated formula");
        Ok(result)
    }

    /// Format a computed value with this evaluator's number policy.
    pub fn format(&self, value: &Value) -> String {
        format_value(value, &self.format)
    }
}

/// The active-formula cursor of one formula widget.
///
/// Holds a borrowed registry, the selected formula and the result of its
/// last evaluation. Failed operations leave the selection and the previous
/// result in place.
///
/// # Examples
///
/// ```rust
/// use calckit::input::raw_inputs;
/// use calckit::{EvalContext, FormulaRegistry, FormulaSession};
///
/// let registry = FormulaRegistry::builtin();
/// let mut session = FormulaSession::new(&registry);
/// session.select_formula("physics", "kinematics", "velocity").unwrap();
///
/// let raw = raw_inputs([("distance", "100"), ("time", "20")]);
/// session.evaluate(&raw, &EvalContext::current()).unwrap();
/// assert_eq!(session.display().as_deref(), Some("5"));
/// ```
#[derive(Debug, Clone)]
pub struct FormulaSession<'r> {
    registry: &'r FormulaRegistry,
    evaluator: Evaluator,
    active: Option<&'r FormulaSpec>,
    last_result: Option<EvaluationResult>,
}

impl<'r> FormulaSession<'r> {
    pub fn new(registry: &'r FormulaRegistry) -> Self {
        Self::with_evaluator(registry, Evaluator::new())
    }

    pub fn with_evaluator(registry: &'r FormulaRegistry, evaluator: Evaluator) -> Self {
        Self {
            registry,
            evaluator,
            active: None,
            last_result: None,
        }
    }

    /// Make a formula active and clear the previous result.
    pub fn select_formula(
        &mut self,
        domain: &str,
        category: &str,
        formula_id: &str,
    ) -> Result<&'r FormulaSpec> {
        let spec = self.registry.select_formula(domain, category, formula_id)?;
        debug!(domain, category, formula = spec.id, "selected formula");
        self.active = Some(spec);
        self.last_result = None;
        Ok(spec)
    }

    /// The active formula, if one is selected.
    pub fn active(&self) -> Option<&'r FormulaSpec> {
        self.active
    }

    /// Inputs of the active formula, empty when none is selected.
    pub fn inputs(&self) -> &'r [InputSpec] {
        match self.active {
            Some(spec) => self.evaluator.list_inputs(spec),
            None => &[],
        }
    }

    /// Evaluate the active formula and remember the result.
    ///
    /// Fails with `NotFound` when no formula is selected.
    pub fn evaluate(
        &mut self,
        raw: &RawInputs,
        context: &EvalContext,
    ) -> Result<&EvaluationResult> {
        let spec = self
            .active
            .ok_or_else(|| CalcError::not_found(LookupKind::Formula, "(none selected)"))?;
        let result = self.evaluator.evaluate(spec, raw, context)?;
        let stored = self.last_result.insert(result);
        Ok(&*stored)
    }

    pub fn last_result(&self) -> Option<&EvaluationResult> {
        self.last_result.as_ref()
    }

    /// Formatted text of the last result.
    pub fn display(&self) -> Option<String> {
        self.last_result
            .as_ref()
            .map(|result| result.display(self.evaluator.options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{Category, Domain};
    use crate::input::{raw_inputs, InputSpec};

    fn test_registry() -> FormulaRegistry {
        let mut registry = FormulaRegistry::new();
        registry
            .register_domain(Domain::new(
                "math",
                "Math",
                vec![Category::new(
                    "basic",
                    "Basic",
                    vec![
                        FormulaSpec {
                            id: "divide",
                            name: "Divide",
                            formula: "q = a / b",
                            inputs: vec![
                                InputSpec::numeric("a", "A", "a", ""),
                                InputSpec::numeric("b", "B", "b", ""),
                            ],
                            compute: |i| Ok((i.number("a")? / i.number("b")?).into()),
                            result_unit: "units",
                            explanation: "",
                        },
                        FormulaSpec {
                            id: "leaky",
                            name: "Leaky",
                            formula: "y = x + z",
                            inputs: vec![InputSpec::numeric("x", "X", "x", "")],
                            compute: |i| Ok((i.number("x")? + i.number("z")?).into()),
                            result_unit: "",
                            explanation: "",
                        },
                        FormulaSpec {
                            id: "fails",
                            name: "Fails",
                            formula: "-",
                            inputs: vec![InputSpec::text("t", "T", "t", "")],
                            compute: |_| Err(CalcError::compute("bad digit")),
                            result_unit: "",
                            explanation: "",
                        },
                    ],
                )],
            ))
            .unwrap();
        registry
    }

    fn ctx() -> EvalContext {
        EvalContext::current()
    }

    #[test]
    fn test_evaluate_ok() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "divide").unwrap();
        let result = Evaluator::new()
            .evaluate(spec, &raw_inputs([("a", "9"), ("b", "3")]), &ctx())
            .unwrap();
        assert_eq!(
            result,
            EvaluationResult::Ok {
                value: Value::from(3.0),
                unit: "units".to_string()
            }
        );
    }

    #[test]
    fn test_all_bad_fields_listed() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "divide").unwrap();
        let err = Evaluator::new()
            .evaluate(spec, &raw_inputs([("a", "x1")]), &ctx())
            .unwrap_err();
        match err {
            CalcError::InvalidInput { fields, .. } => assert_eq!(fields, vec!["a", "b"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_field_is_invalid() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "fails").unwrap();
        let err = Evaluator::new()
            .evaluate(spec, &raw_inputs([("t", "   ")]), &ctx())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_division_by_zero_is_sentinel() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "divide").unwrap();
        let result = Evaluator::new()
            .evaluate(spec, &raw_inputs([("a", "1"), ("b", "0")]), &ctx())
            .unwrap();
        assert_eq!(result, EvaluationResult::Error("Error".to_string()));
    }

    #[test]
    fn test_compute_error_is_sentinel() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "fails").unwrap();
        let result = Evaluator::new()
            .evaluate(spec, &raw_inputs([("t", "z")]), &ctx())
            .unwrap();
        assert!(!result.is_ok());
    }

    #[test]
    fn test_undeclared_read_is_invalid_input() {
        let registry = test_registry();
        let spec = registry.select_formula("math", "basic", "leaky").unwrap();
        let err = Evaluator::new()
            .evaluate(spec, &raw_inputs([("x", "1"), ("z", "2")]), &ctx())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_session_select_resets_result() {
        let registry = test_registry();
        let mut session = FormulaSession::new(&registry);
        session.select_formula("math", "basic", "divide").unwrap();
        session
            .evaluate(&raw_inputs([("a", "1"), ("b", "4")]), &ctx())
            .unwrap();
        assert_eq!(session.display().as_deref(), Some("0.25"));

        session.select_formula("math", "basic", "divide").unwrap();
        assert!(session.last_result().is_none());
    }

    #[test]
    fn test_session_failures_keep_state() {
        let registry = test_registry();
        let mut session = FormulaSession::new(&registry);
        assert!(session.evaluate(&RawInputs::new(), &ctx()).unwrap_err().is_not_found());

        session.select_formula("math", "basic", "divide").unwrap();
        session
            .evaluate(&raw_inputs([("a", "1"), ("b", "2")]), &ctx())
            .unwrap();
        assert!(session.select_formula("math", "basic", "nope").is_err());
        assert_eq!(session.active().map(|s| s.id), Some("divide"));

        assert!(session.evaluate(&raw_inputs([("a", "q")]), &ctx()).is_err());
        assert_eq!(session.display().as_deref(), Some("0.5"));
        assert_eq!(session.inputs().len(), 2);
    }

    #[test]
    fn test_result_serializes_with_status() {
        let json = serde_json::to_value(EvaluationResult::Ok {
            value: Value::from(2.0),
            unit: "M".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["result"]["unit"], "M");
    }
}
