//! Calculator state machine module.
//!
//! Models an accumulator-register calculator: a displayed operand, an
//! optional pending binary operator with its left operand, a memory
//! register and a bounded history. Binary operators apply strictly left to
//! right, so `2 + 3 * 4 =` shows `20`.
//!
//! Expected failures (division by zero, `factorial` of a fraction, `ln` of
//! a negative number) show the `"Error"` sentinel on the display and never
//! touch memory or history.

use crate::config::CalculatorConfig;
use crate::error::{CalcError, LookupKind, Result};
use crate::expression;
use crate::format::{display_number, ERROR_SENTINEL};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Largest integer whose factorial is finite in `f64`.
const MAX_FACTORIAL: u32 = 170;

/// How trigonometric functions read and write angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Deg => angle.to_radians(),
            AngleMode::Rad => angle,
        }
    }

    fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleMode::Deg => radians.to_degrees(),
            AngleMode::Rad => radians,
        }
    }
}

/// Button layout the calculator is in. Switching clears the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
    Advanced,
}

/// A two-operand operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Gcd,
    Lcm,
}

impl BinaryOperator {
    /// Symbol shown in the expression line.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "−",
            BinaryOperator::Multiply => "×",
            BinaryOperator::Divide => "÷",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "^",
            BinaryOperator::Gcd => "gcd",
            BinaryOperator::Lcm => "lcm",
        }
    }

    /// Apply the operator. Domain failures come back as non-finite values.
    ///
    /// `gcd` and `lcm` floor their operands and use magnitudes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use calckit::calculator::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Power.apply(2.0, 10.0), 1024.0);
    /// assert_eq!(BinaryOperator::Gcd.apply(12.0, 18.0), 6.0);
    /// assert_eq!(BinaryOperator::Lcm.apply(4.0, 6.0), 12.0);
    /// assert!(BinaryOperator::Divide.apply(1.0, 0.0).is_infinite());
    /// ```
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Subtract => lhs - rhs,
            BinaryOperator::Multiply => lhs * rhs,
            BinaryOperator::Divide => lhs / rhs,
            BinaryOperator::Modulo => lhs % rhs,
            BinaryOperator::Power => lhs.powf(rhs),
            BinaryOperator::Gcd => gcd(lhs, rhs),
            BinaryOperator::Lcm => (lhs * rhs).abs() / gcd(lhs, rhs),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(BinaryOperator::Add),
            "-" | "−" => Ok(BinaryOperator::Subtract),
            "*" | "×" => Ok(BinaryOperator::Multiply),
            "/" | "÷" => Ok(BinaryOperator::Divide),
            "%" | "mod" => Ok(BinaryOperator::Modulo),
            "^" | "pow" => Ok(BinaryOperator::Power),
            "gcd" => Ok(BinaryOperator::Gcd),
            "lcm" => Ok(BinaryOperator::Lcm),
            other => Err(CalcError::invalid_field(
                "operator",
                format!("unknown operator '{}'", other),
            )),
        }
    }
}

fn gcd(a: f64, b: f64) -> f64 {
    let mut a = a.floor().abs();
    let mut b = b.floor().abs();
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    while b != 0.0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Factorial of a non-negative integer; NaN for anything else.
///
/// # Examples
///
/// ```rust
/// use calckit::calculator::factorial;
///
/// assert_eq!(factorial(5.0), 120.0);
/// assert_eq!(factorial(0.0), 1.0);
/// assert!(factorial(-1.0).is_nan());
/// assert!(factorial(2.5).is_nan());
/// ```
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return f64::NAN;
    }
    if n > f64::from(MAX_FACTORIAL) {
        return f64::INFINITY;
    }
    (2..=n as u32).fold(1.0, |acc, k| acc * f64::from(k))
}

/// A function of the displayed operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Exp,
    Abs,
    Reciprocal,
    Factorial,
    Random,
    Ceil,
    Floor,
    Round,
    Negate,
}

impl UnaryFunction {
    /// Every function, in button order.
    pub const ALL: [UnaryFunction; 24] = [
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Asin,
        UnaryFunction::Acos,
        UnaryFunction::Atan,
        UnaryFunction::Sinh,
        UnaryFunction::Cosh,
        UnaryFunction::Tanh,
        UnaryFunction::Log,
        UnaryFunction::Ln,
        UnaryFunction::Sqrt,
        UnaryFunction::Cbrt,
        UnaryFunction::Square,
        UnaryFunction::Cube,
        UnaryFunction::Exp,
        UnaryFunction::Abs,
        UnaryFunction::Reciprocal,
        UnaryFunction::Factorial,
        UnaryFunction::Random,
        UnaryFunction::Ceil,
        UnaryFunction::Floor,
        UnaryFunction::Round,
        UnaryFunction::Negate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Asin => "asin",
            UnaryFunction::Acos => "acos",
            UnaryFunction::Atan => "atan",
            UnaryFunction::Sinh => "sinh",
            UnaryFunction::Cosh => "cosh",
            UnaryFunction::Tanh => "tanh",
            UnaryFunction::Log => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Cbrt => "cbrt",
            UnaryFunction::Square => "square",
            UnaryFunction::Cube => "cube",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Abs => "abs",
            UnaryFunction::Reciprocal => "reciprocal",
            UnaryFunction::Factorial => "factorial",
            UnaryFunction::Random => "random",
            UnaryFunction::Ceil => "ceil",
            UnaryFunction::Floor => "floor",
            UnaryFunction::Round => "round",
            UnaryFunction::Negate => "negate",
        }
    }

    /// Apply the function to `x`.
    ///
    /// Trigonometric inputs and inverse-trigonometric outputs follow
    /// `angle`. `Random` ignores `x` and draws from `rng` in `[0, 1)`.
    /// `Round` rounds halves up, so `-2.5` becomes `-2`.
    pub fn apply<R: Rng>(self, x: f64, angle: AngleMode, rng: &mut R) -> f64 {
        match self {
            UnaryFunction::Sin => angle.to_radians(x).sin(),
            UnaryFunction::Cos => angle.to_radians(x).cos(),
            UnaryFunction::Tan => angle.to_radians(x).tan(),
            UnaryFunction::Asin => angle.from_radians(x.asin()),
            UnaryFunction::Acos => angle.from_radians(x.acos()),
            UnaryFunction::Atan => angle.from_radians(x.atan()),
            UnaryFunction::Sinh => x.sinh(),
            UnaryFunction::Cosh => x.cosh(),
            UnaryFunction::Tanh => x.tanh(),
            UnaryFunction::Log => x.log10(),
            UnaryFunction::Ln => x.ln(),
            UnaryFunction::Sqrt => x.sqrt(),
            UnaryFunction::Cbrt => x.cbrt(),
            UnaryFunction::Square => x * x,
            UnaryFunction::Cube => x * x * x,
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Abs => x.abs(),
            UnaryFunction::Reciprocal => 1.0 / x,
            UnaryFunction::Factorial => factorial(x),
            UnaryFunction::Random => rng.gen::<f64>(),
            UnaryFunction::Ceil => x.ceil(),
            UnaryFunction::Floor => x.floor(),
            UnaryFunction::Round => (x + 0.5).floor(),
            UnaryFunction::Negate => -x,
        }
    }
}

impl FromStr for UnaryFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let canonical = match s {
            "pow2" | "x²" => "square",
            "pow3" | "x³" => "cube",
            "inv" | "1/x" => "reciprocal",
            "rand" => "random",
            "√" => "sqrt",
            "∛" => "cbrt",
            other => other,
        };
        UnaryFunction::ALL
            .into_iter()
            .find(|f| f.name() == canonical)
            .ok_or_else(|| {
                CalcError::invalid_field("function", format!("unknown function '{}'", s))
            })
    }
}

/// A constant that can be loaded into the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Memory register keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryOp {
    /// MC: reset memory to zero.
    Clear,
    /// MR: load memory into the display.
    Recall,
    /// M+: add the displayed operand to memory.
    Add,
    /// M-: subtract the displayed operand from memory.
    Subtract,
    /// MS: store the displayed operand.
    Store,
}

/// One completed calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: f64,
}

/// Observable calculator state.
///
/// `previous_value` and `operator` are set together while an operator is
/// pending. `operand_entered` records whether a second operand was supplied
/// since the operator was pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub display_value: String,
    pub previous_value: Option<f64>,
    pub operator: Option<BinaryOperator>,
    pub waiting_for_operand: bool,
    pub operand_entered: bool,
    pub memory: f64,
    pub angle_mode: AngleMode,
    /// Most recent first.
    pub history: VecDeque<HistoryEntry>,
    pub mode: Mode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display_value: "0".to_string(),
            previous_value: None,
            operator: None,
            waiting_for_operand: false,
            operand_entered: false,
            memory: 0.0,
            angle_mode: AngleMode::default(),
            history: VecDeque::new(),
            mode: Mode::default(),
        }
    }
}

/// The calculator widget engine.
///
/// # Examples
///
/// ```rust
/// use calckit::calculator::BinaryOperator;
/// use calckit::Calculator;
///
/// let mut calc = Calculator::new();
/// calc.input_digit('2').unwrap();
/// calc.input_operator(BinaryOperator::Add);
/// calc.input_digit('3').unwrap();
/// calc.input_operator(BinaryOperator::Multiply);
/// assert_eq!(calc.expression(), "5 ×");
/// calc.input_digit('4').unwrap();
/// calc.calculate();
///
/// assert_eq!(calc.display_value(), "20");
/// assert_eq!(calc.history().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    history_limit: usize,
    rng: StdRng,
}

impl Calculator {
    /// A calculator with default settings.
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// A calculator using the given limits and starting modes.
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            state: CalculatorState {
                angle_mode: config.angle_mode,
                mode: config.mode,
                ..CalculatorState::default()
            },
            history_limit: config.history_limit,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn display_value(&self) -> &str {
        &self.state.display_value
    }

    /// The pending expression line, such as `"5 ×"`, or empty.
    pub fn expression(&self) -> String {
        match (self.state.previous_value, self.state.operator) {
            (Some(prev), Some(op)) => format!("{} {}", display_number(prev), op.symbol()),
            _ => String::new(),
        }
    }

    pub fn memory(&self) -> f64 {
        self.state.memory
    }

    /// Completed calculations, most recent first.
    pub fn history(&self) -> &VecDeque<HistoryEntry> {
        &self.state.history
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    fn shows_error(&self) -> bool {
        self.state.display_value == ERROR_SENTINEL
    }

    fn current_operand(&self) -> Option<f64> {
        self.state
            .display_value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    fn clear_pending(&mut self) {
        self.state.previous_value = None;
        self.state.operator = None;
        self.state.operand_entered = false;
    }

    fn show_error(&mut self) {
        self.state.display_value = ERROR_SENTINEL.to_string();
        self.clear_pending();
        self.state.waiting_for_operand = true;
    }

    /// Show a computed operand, or the sentinel if it is not finite.
    fn show_operand(&mut self, value: f64) {
        if value.is_finite() {
            self.state.display_value = display_number(value);
            self.state.operand_entered = true;
        } else {
            self.show_error();
        }
    }

    fn push_history(&mut self, expression: String, result: f64) {
        if self.history_limit == 0 {
            return;
        }
        self.state.history.push_front(HistoryEntry { expression, result });
        self.state.history.truncate(self.history_limit);
    }

    /// Enter a digit or the decimal point.
    ///
    /// Fails with `InvalidInput` for any other character.
    pub fn input_digit(&mut self, digit: char) -> Result<()> {
        if !digit.is_ascii_digit() && digit != '.' {
            return Err(CalcError::invalid_field(
                "digit",
                format!("'{}' is not a digit or decimal point", digit),
            ));
        }

        let display = &mut self.state.display_value;
        if self.state.waiting_for_operand || display.as_str() == ERROR_SENTINEL {
            *display = if digit == '.' {
                "0.".to_string()
            } else {
                digit.to_string()
            };
            self.state.waiting_for_operand = false;
        } else if digit == '.' {
            if !display.contains('.') {
                display.push('.');
            }
        } else if display.as_str() == "0" {
            *display = digit.to_string();
        } else {
            display.push(digit);
        }

        if self.state.operator.is_some() {
            self.state.operand_entered = true;
        }
        Ok(())
    }

    /// Press a binary operator.
    ///
    /// A pending operator with a second operand is resolved first and the
    /// new operator chains from its result. A pending operator without a
    /// second operand is replaced. The sentinel display is ignored.
    pub fn input_operator(&mut self, op: BinaryOperator) {
        let Some(value) = self.current_operand() else {
            debug!(operator = %op, "operator ignored on error display");
            return;
        };

        match (self.state.previous_value, self.state.operator) {
            (Some(_), Some(_)) if self.state.operand_entered => {
                if !self.resolve_pending() {
                    return;
                }
            }
            (Some(_), Some(pending)) => {
                debug!(from = %pending, to = %op, "replacing pending operator");
            }
            _ => self.state.previous_value = Some(value),
        }

        self.state.operator = Some(op);
        self.state.operand_entered = false;
        self.state.waiting_for_operand = true;
    }

    /// Apply the pending operator, as `=` does.
    pub fn calculate(&mut self) {
        if self.state.operator.is_none() || !self.state.operand_entered {
            return;
        }
        if self.resolve_pending() {
            self.clear_pending();
        }
    }

    /// Resolve `previous op display`, record it and leave the result as the
    /// left operand. Returns false when the sentinel was shown instead.
    fn resolve_pending(&mut self) -> bool {
        let (Some(lhs), Some(op), Some(rhs)) = (
            self.state.previous_value,
            self.state.operator,
            self.current_operand(),
        ) else {
            return false;
        };

        let result = if op == BinaryOperator::Divide && rhs == 0.0 {
            f64::NAN
        } else {
            op.apply(lhs, rhs)
        };
        if !result.is_finite() {
            debug!(lhs, rhs, operator = %op, "calculation failed");
            self.show_error();
            return false;
        }

        let expression = format!("{} {} {}", display_number(lhs), op.symbol(), display_number(rhs));
        debug!(%expression, result, "calculated");
        self.push_history(expression, result);
        self.state.display_value = display_number(result);
        self.state.previous_value = Some(result);
        self.state.operand_entered = false;
        self.state.waiting_for_operand = true;
        true
    }

    /// Replace the displayed operand with `function` of it.
    pub fn apply_unary_function(&mut self, function: UnaryFunction) {
        let Some(value) = self.current_operand() else {
            return;
        };
        let result = function.apply(value, self.state.angle_mode, &mut self.rng);
        debug!(function = function.name(), value, result, "applied function");
        self.show_operand(result);
        self.state.waiting_for_operand = true;
    }

    /// Load π or e into the display.
    pub fn input_constant(&mut self, constant: Constant) {
        self.show_operand(constant.value());
        self.state.waiting_for_operand = true;
    }

    /// Divide the displayed operand by 100.
    pub fn percentage(&mut self) {
        if let Some(value) = self.current_operand() {
            self.show_operand(value / 100.0);
        }
    }

    /// Flip the sign of the displayed operand, keeping any typed digits.
    pub fn toggle_sign(&mut self) {
        if self.shows_error() {
            return;
        }
        let display = &mut self.state.display_value;
        if let Some(rest) = display.strip_prefix('-') {
            *display = rest.to_string();
        } else if display.parse::<f64>().is_ok_and(|n| n != 0.0) {
            display.insert(0, '-');
        }
        if self.state.operator.is_some() {
            self.state.operand_entered = true;
        }
    }

    /// Operate on the memory register. Only recall touches the display.
    pub fn memory_op(&mut self, op: MemoryOp) {
        let operand = self.current_operand();
        match (op, operand) {
            (MemoryOp::Clear, _) => self.state.memory = 0.0,
            (MemoryOp::Recall, _) => {
                let memory = self.state.memory;
                self.show_operand(memory);
                self.state.waiting_for_operand = true;
            }
            (MemoryOp::Add, Some(value)) => self.state.memory += value,
            (MemoryOp::Subtract, Some(value)) => self.state.memory -= value,
            (MemoryOp::Store, Some(value)) => self.state.memory = value,
            (_, None) => {}
        }
        debug!(?op, memory = self.state.memory, "memory operation");
    }

    /// Reset the entry. Memory and history are kept.
    pub fn clear(&mut self) {
        self.state.display_value = "0".to_string();
        self.state.waiting_for_operand = false;
        self.clear_pending();
    }

    /// Drop the last typed character.
    pub fn backspace(&mut self) {
        let display = &mut self.state.display_value;
        if display.as_str() == ERROR_SENTINEL {
            *display = "0".to_string();
            return;
        }
        display.pop();
        if display.is_empty() || display.as_str() == "-" {
            *display = "0".to_string();
        }
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.state.angle_mode = mode;
    }

    /// Switch button layout; clears the entry like [`Calculator::clear`].
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.clear();
    }

    pub fn clear_history(&mut self) {
        self.state.history.clear();
    }

    /// Load the result of history entry `index` (0 is the most recent).
    pub fn recall_history(&mut self, index: usize) -> Result<()> {
        let result = self
            .state
            .history
            .get(index)
            .map(|entry| entry.result)
            .ok_or_else(|| CalcError::not_found(LookupKind::HistoryEntry, index.to_string()))?;
        self.show_operand(result);
        self.state.waiting_for_operand = true;
        Ok(())
    }

    /// Evaluate free-form text such as `2 * (3 + sin(30))`.
    ///
    /// On success the result is displayed and recorded, and any pending
    /// operator is dropped. A syntax error returns `InvalidInput` and leaves
    /// the state untouched. A non-finite result shows the sentinel.
    pub fn evaluate_expression(&mut self, text: &str) -> Result<f64> {
        let result = expression::evaluate_with(text, self.state.angle_mode, &mut self.rng)?;
        if !result.is_finite() {
            self.show_error();
            return Ok(result);
        }
        self.push_history(text.trim().to_string(), result);
        self.state.display_value = display_number(result);
        self.clear_pending();
        self.state.waiting_for_operand = true;
        Ok(result)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(calc: &mut Calculator, digits: &str) {
        for d in digits.chars() {
            calc.input_digit(d).unwrap();
        }
    }

    #[test]
    fn test_left_to_right_chaining() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.input_operator(BinaryOperator::Add);
        enter(&mut calc, "3");
        calc.input_operator(BinaryOperator::Multiply);
        enter(&mut calc, "4");
        calc.calculate();
        assert_eq!(calc.display_value(), "20");
    }

    #[test]
    fn test_operator_replacement() {
        let mut calc = Calculator::new();
        enter(&mut calc, "9");
        calc.input_operator(BinaryOperator::Add);
        calc.input_operator(BinaryOperator::Subtract);
        assert_eq!(calc.expression(), "9 −");
        enter(&mut calc, "4");
        calc.calculate();
        assert_eq!(calc.display_value(), "5");
        assert_eq!(calc.history()[0].expression, "9 − 4");
    }

    #[test]
    fn test_division_by_zero() {
        let mut calc = Calculator::new();
        enter(&mut calc, "7");
        calc.memory_op(MemoryOp::Store);
        calc.clear();
        enter(&mut calc, "5");
        calc.input_operator(BinaryOperator::Divide);
        enter(&mut calc, "0");
        calc.calculate();
        assert_eq!(calc.display_value(), "Error");
        assert_eq!(calc.memory(), 7.0);
        assert!(calc.history().is_empty());
        assert!(calc.state().operator.is_none());

        enter(&mut calc, "3");
        assert_eq!(calc.display_value(), "3");
    }

    #[test]
    fn test_calculate_without_operand_is_noop() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.calculate();
        assert_eq!(calc.display_value(), "5");
        calc.input_operator(BinaryOperator::Add);
        calc.calculate();
        assert_eq!(calc.expression(), "5 +");
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_digit_entry_rules() {
        let mut calc = Calculator::new();
        enter(&mut calc, "0");
        assert_eq!(calc.display_value(), "0");
        enter(&mut calc, "1.5.2");
        assert_eq!(calc.display_value(), "1.52");
        assert!(calc.input_digit('x').is_err());

        calc.input_operator(BinaryOperator::Add);
        enter(&mut calc, ".");
        assert_eq!(calc.display_value(), "0.");
    }

    #[test]
    fn test_factorial_function() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.apply_unary_function(UnaryFunction::Factorial);
        assert_eq!(calc.display_value(), "120");

        calc.clear();
        enter(&mut calc, "2.5");
        calc.apply_unary_function(UnaryFunction::Factorial);
        assert_eq!(calc.display_value(), "Error");
    }

    #[test]
    fn test_trig_honors_angle_mode() {
        let mut calc = Calculator::new();
        enter(&mut calc, "90");
        calc.apply_unary_function(UnaryFunction::Sin);
        assert_eq!(calc.display_value(), "1");

        calc.clear();
        enter(&mut calc, "1");
        calc.apply_unary_function(UnaryFunction::Asin);
        let degrees: f64 = calc.display_value().parse().unwrap();
        assert!((degrees - 90.0).abs() < 1e-9);

        calc.set_angle_mode(AngleMode::Rad);
        calc.clear();
        enter(&mut calc, "0");
        calc.apply_unary_function(UnaryFunction::Cos);
        assert_eq!(calc.display_value(), "1");
    }

    #[test]
    fn test_unary_result_is_second_operand() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.input_operator(BinaryOperator::Add);
        enter(&mut calc, "9");
        calc.apply_unary_function(UnaryFunction::Sqrt);
        calc.calculate();
        assert_eq!(calc.display_value(), "5");
    }

    #[test]
    fn test_memory_recall_sets_waiting() {
        let mut calc = Calculator::new();
        enter(&mut calc, "12");
        calc.memory_op(MemoryOp::Add);
        calc.memory_op(MemoryOp::Add);
        assert_eq!(calc.display_value(), "12");
        calc.clear();
        calc.memory_op(MemoryOp::Recall);
        assert_eq!(calc.display_value(), "24");
        enter(&mut calc, "3");
        assert_eq!(calc.display_value(), "3");
        calc.memory_op(MemoryOp::Clear);
        assert_eq!(calc.memory(), 0.0);
    }

    #[test]
    fn test_clear_keeps_memory_and_history() {
        let mut calc = Calculator::new();
        enter(&mut calc, "4");
        calc.memory_op(MemoryOp::Store);
        calc.input_operator(BinaryOperator::Power);
        enter(&mut calc, "2");
        calc.calculate();
        calc.clear();
        assert_eq!(calc.display_value(), "0");
        assert_eq!(calc.memory(), 4.0);
        assert_eq!(calc.history().len(), 1);
        assert_eq!(calc.history()[0].result, 16.0);
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        enter(&mut calc, "42");
        calc.backspace();
        assert_eq!(calc.display_value(), "4");
        calc.backspace();
        assert_eq!(calc.display_value(), "0");
        calc.toggle_sign();
        enter(&mut calc, "7");
        calc.toggle_sign();
        calc.backspace();
        assert_eq!(calc.display_value(), "0");
    }

    #[test]
    fn test_history_bound() {
        let mut calc = Calculator::new();
        for n in 1..=25 {
            enter(&mut calc, &n.to_string());
            calc.input_operator(BinaryOperator::Add);
            enter(&mut calc, "0");
            calc.calculate();
        }
        assert_eq!(calc.history().len(), 20);
        assert_eq!(calc.history()[0].result, 25.0);
        assert_eq!(calc.history()[19].result, 6.0);
    }

    #[test]
    fn test_recall_history() {
        let mut calc = Calculator::new();
        enter(&mut calc, "6");
        calc.input_operator(BinaryOperator::Lcm);
        enter(&mut calc, "4");
        calc.calculate();
        calc.clear();
        calc.recall_history(0).unwrap();
        assert_eq!(calc.display_value(), "12");
        assert!(calc.recall_history(5).unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_mode_clears_entry() {
        let mut calc = Calculator::new();
        enter(&mut calc, "8");
        calc.input_operator(BinaryOperator::Modulo);
        calc.set_mode(Mode::Scientific);
        assert_eq!(calc.mode(), Mode::Scientific);
        assert_eq!(calc.display_value(), "0");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_evaluate_expression() {
        let mut calc = Calculator::new();
        let before = calc.state().clone();
        assert!(calc.evaluate_expression("2 + * 3").unwrap_err().is_invalid_input());
        assert_eq!(calc.state(), &before);

        assert_eq!(calc.evaluate_expression("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(calc.display_value(), "14");
        assert_eq!(calc.history()[0].expression, "2 + 3 * 4");
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = Calculator::new().with_seed(7);
        let mut b = Calculator::new().with_seed(7);
        a.apply_unary_function(UnaryFunction::Random);
        b.apply_unary_function(UnaryFunction::Random);
        assert_eq!(a.display_value(), b.display_value());
        let value: f64 = a.display_value().parse().unwrap();
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("×".parse::<BinaryOperator>().unwrap(), BinaryOperator::Multiply);
        assert_eq!("pow2".parse::<UnaryFunction>().unwrap(), UnaryFunction::Square);
        assert_eq!("tanh".parse::<UnaryFunction>().unwrap(), UnaryFunction::Tanh);
        assert!("frobnicate".parse::<UnaryFunction>().is_err());
    }

    #[test]
    fn test_state_serializes() {
        let calc = Calculator::new();
        let json = serde_json::to_value(calc.state()).unwrap();
        assert_eq!(json["display_value"], "0");
        assert_eq!(json["angle_mode"], "deg");
        assert_eq!(json["mode"], "basic");
    }
}
