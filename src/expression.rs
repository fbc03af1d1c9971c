//! Arithmetic expression parser.
//!
//! Free-form entry in scientific and advanced modes goes through a small
//! recursive-descent parser instead of evaluating text as code. Grammar,
//! lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := number | constant | ident '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than a leading sign, so
//! `-2^2` is `-4`. `×`, `÷` and `−` are accepted as operator aliases, and
//! `pi`, `π` and `e` name constants. Function names are those of
//! [`UnaryFunction`]; `random()` may omit its argument.
//!
//! Input longer than [`MAX_TOKENS`] tokens or nested deeper than
//! [`MAX_DEPTH`] is rejected with a [`SyntaxError`].

use crate::calculator::{AngleMode, BinaryOperator, UnaryFunction};
use crate::error::CalcError;
use rand::Rng;
use std::f64::consts::{E, PI};
use thiserror::Error;

/// A syntax error with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    pub position: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl From<SyntaxError> for CalcError {
    fn from(err: SyntaxError) -> Self {
        CalcError::invalid_field("expression", err.to_string())
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: UnaryFunction,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree. Domain failures come back as non-finite values.
    pub fn eval<R: Rng>(&self, angle: AngleMode, rng: &mut R) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Negate(inner) => -inner.eval(angle, rng),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(angle, rng);
                let rhs = rhs.eval(angle, rng);
                op.apply(lhs, rhs)
            }
            Expr::Call { function, arg } => {
                let x = arg.eval(angle, rng);
                function.apply(x, angle, rng)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            c if c.is_ascii_digit() || c == '.' => {
                let end = number_end(text, pos);
                let literal = &text[pos..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| SyntaxError::new(pos, format!("malformed number '{}'", literal)))?;
                tokens.push((pos, Token::Number(value)));
                while chars.peek().is_some_and(|&(p, _)| p < end) {
                    chars.next();
                }
            }
            'π' => {
                tokens.push((pos, Token::Ident("π".to_string())));
                chars.next();
            }
            c if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !c.is_ascii_alphanumeric() {
                        break;
                    }
                    ident.push(c);
                    chars.next();
                }
                tokens.push((pos, Token::Ident(ident)));
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push((pos, Token::Op(ch)));
                chars.next();
            }
            '−' => {
                tokens.push((pos, Token::Op('-')));
                chars.next();
            }
            '×' => {
                tokens.push((pos, Token::Op('*')));
                chars.next();
            }
            '÷' => {
                tokens.push((pos, Token::Op('/')));
                chars.next();
            }
            '(' => {
                tokens.push((pos, Token::LParen));
                chars.next();
            }
            ')' => {
                tokens.push((pos, Token::RParen));
                chars.next();
            }
            other => {
                return Err(SyntaxError::new(pos, format!("unexpected character '{}'", other)));
            }
        }
    }
    Ok(tokens)
}

/// Byte offset just past the number literal starting at `start`.
///
/// Digits with at most one point, then an optional exponent whose `e` is
/// only consumed when digits follow it.
fn number_end(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = start;
    let mut seen_point = false;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.' && !seen_point) {
        seen_point |= bytes[end] == b'.';
        end += 1;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }
    end
}

/// Deepest nesting of parentheses, calls, signs and exponents accepted.
pub const MAX_DEPTH: usize = 256;
/// Longest token sequence accepted.
pub const MAX_TOKENS: usize = 4096;

struct Parser {
    tokens: Vec<(usize, Token)>,
    index: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.index).map_or(self.end, |(p, _)| *p)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).map(|(_, t)| t.clone());
        self.index += 1;
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token::Op(c)) if ops.contains(c) => {
                let c = *c;
                self.index += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn expect_rparen(&mut self) -> Result<(), SyntaxError> {
        let pos = self.position();
        match self.next() {
            Some(Token::RParen) => Ok(()),
            _ => Err(SyntaxError::new(pos, "expected ')'")),
        }
    }

    fn expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.term()?;
        while let Some(c) = self.eat_op(&['+', '-']) {
            let op = if c == '+' {
                BinaryOperator::Add
            } else {
                BinaryOperator::Subtract
            };
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.unary()?;
        while let Some(c) = self.eat_op(&['*', '/', '%']) {
            let op = match c {
                '*' => BinaryOperator::Multiply,
                '/' => BinaryOperator::Divide,
                _ => BinaryOperator::Modulo,
            };
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::new(self.position(), "expression nested too deeply"));
        }
        self.depth += 1;
        let parsed = match self.eat_op(&['+', '-']) {
            Some('-') => self.unary().map(|inner| Expr::Negate(Box::new(inner))),
            Some(_) => self.unary(),
            None => self.power(),
        };
        self.depth -= 1;
        parsed
    }

    fn power(&mut self) -> Result<Expr, SyntaxError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            return Ok(binary(BinaryOperator::Power, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let pos = self.position();
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "pi" | "π" => Ok(Expr::Number(PI)),
                "e" => Ok(Expr::Number(E)),
                _ => {
                    let function = name
                        .parse::<UnaryFunction>()
                        .map_err(|_| SyntaxError::new(pos, format!("unknown name '{}'", name)))?;
                    let open = self.position();
                    if self.next() != Some(Token::LParen) {
                        return Err(SyntaxError::new(open, format!("expected '(' after {}", name)));
                    }
                    let arg = if function == UnaryFunction::Random
                        && self.peek() == Some(&Token::RParen)
                    {
                        self.index += 1;
                        Expr::Number(0.0)
                    } else {
                        let arg = self.expr()?;
                        self.expect_rparen()?;
                        arg
                    };
                    Ok(Expr::Call {
                        function,
                        arg: Box::new(arg),
                    })
                }
            },
            Some(Token::RParen) => Err(SyntaxError::new(pos, "unexpected ')'")),
            Some(Token::Op(c)) => Err(SyntaxError::new(pos, format!("unexpected '{}'", c))),
            None => Err(SyntaxError::new(pos, "unexpected end of expression")),
        }
    }
}

fn binary(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Parse text into an expression tree.
///
/// # Examples
///
/// ```rust
/// use calckit::expression::parse;
///
/// assert!(parse("2 * (3 + 4)").is_ok());
/// let err = parse("2 +").unwrap_err();
/// assert_eq!(err.position, 3);
/// ```
pub fn parse(text: &str) -> Result<Expr, SyntaxError> {
    let tokens = tokenize(text)?;
    if let Some((position, _)) = tokens.get(MAX_TOKENS) {
        return Err(SyntaxError::new(*position, "expression too long"));
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        end: text.len(),
        depth: 0,
    };
    if parser.peek().is_none() {
        return Err(SyntaxError::new(0, "empty expression"));
    }
    let expr = parser.expr()?;
    if parser.peek().is_some() {
        return Err(SyntaxError::new(parser.position(), "unexpected trailing input"));
    }
    Ok(expr)
}

/// Parse and evaluate text, drawing `random()` values from the thread RNG.
///
/// # Examples
///
/// ```rust
/// use calckit::calculator::AngleMode;
/// use calckit::expression::evaluate;
///
/// assert_eq!(evaluate("2 + 3 * 4", AngleMode::Deg).unwrap(), 14.0);
/// assert_eq!(evaluate("2 ^ 3 ^ 2", AngleMode::Deg).unwrap(), 512.0);
/// assert_eq!(evaluate("-2^2", AngleMode::Deg).unwrap(), -4.0);
/// assert_eq!(evaluate("sqrt(16) × 2", AngleMode::Deg).unwrap(), 8.0);
/// assert!(evaluate("2 +* 3", AngleMode::Deg).unwrap_err().is_invalid_input());
/// ```
pub fn evaluate(text: &str, angle: AngleMode) -> crate::Result<f64> {
    evaluate_with(text, angle, &mut rand::thread_rng())
}

/// Parse and evaluate text with an explicit random source.
pub fn evaluate_with<R: Rng>(text: &str, angle: AngleMode, rng: &mut R) -> crate::Result<f64> {
    Ok(parse(text)?.eval(angle, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> f64 {
        evaluate(text, AngleMode::Rad).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3"), 7.0);
        assert_eq!(eval("(1 + 2) * 3"), 9.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("2 * 3 ^ 2"), 18.0);
        assert_eq!(eval("7 % 4"), 3.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-3 + 5"), 2.0);
        assert_eq!(eval("--3"), 3.0);
        assert_eq!(eval("+4"), 4.0);
        assert_eq!(eval("2 ^ -1"), 0.5);
        assert_eq!(eval("(-2) ^ 2"), 4.0);
    }

    #[test]
    fn test_constants_and_aliases() {
        assert_eq!(eval("pi"), PI);
        assert_eq!(eval("π"), PI);
        assert_eq!(eval("e"), E);
        assert_eq!(eval("8 ÷ 2 − 1"), 3.0);
        assert!(parse("2π").is_err());
    }

    #[test]
    fn test_numbers_with_exponent() {
        assert_eq!(eval("1e3 + 1"), 1001.0);
        assert_eq!(eval("2.5E-1"), 0.25);
        assert_eq!(eval(".5 * 4"), 2.0);
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("abs(-3)"), 3.0);
        assert_eq!(eval("factorial(5)"), 120.0);
        assert_eq!(evaluate("sin(90)", AngleMode::Deg).unwrap(), 1.0);
        assert!(eval("ln(-1)").is_nan());
        assert!(eval("1 / 0").is_infinite());
    }

    #[test]
    fn test_syntax_errors_carry_position() {
        let err = parse("2 + )").unwrap_err();
        assert_eq!(err.position, 4);
        assert_eq!(parse("foo(1)").unwrap_err().position, 0);
        assert_eq!(parse("(1 + 2").unwrap_err().position, 6);
        assert_eq!(parse("1 2").unwrap_err().position, 2);
        assert_eq!(parse("2 $ 3").unwrap_err().position, 2);
        assert!(parse("").is_err());
        assert!(parse("sqrt 4").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(1_000), ")".repeat(1_000));
        let err = parse(&nested).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");

        let signs = format!("{}1", "-".repeat(1_000));
        assert!(parse(&signs).is_err());
        let powers = format!("2{}", "^2".repeat(1_000));
        assert_eq!(parse(&powers).unwrap_err().message, "expression nested too deeply");

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&shallow), 1.0);
    }

    #[test]
    fn test_long_expression_is_rejected() {
        let long = format!("1{}", "+1".repeat(MAX_TOKENS));
        assert_eq!(parse(&long).unwrap_err().message, "expression too long");
        let fits = format!("1{}", "+1".repeat(100));
        assert_eq!(eval(&fits), 101.0);
    }

    #[test]
    fn test_random_takes_no_argument() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        let r = evaluate_with("random()", AngleMode::Deg, &mut rng).unwrap();
        assert!((0.0..1.0).contains(&r));
        let r = evaluate_with("random(5) * 10", AngleMode::Deg, &mut rng).unwrap();
        assert!((0.0..10.0).contains(&r));
        assert!(parse("sqrt()").is_err());
    }

    #[test]
    fn test_syntax_error_maps_to_invalid_input() {
        let err: CalcError = parse("*").unwrap_err().into();
        assert!(err.is_invalid_input());
    }
}
