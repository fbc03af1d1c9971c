//! # calckit - Deterministic Calculator Widget Engine
//!
//! The engine behind a set of calculator widgets:
//! - **Formula registry** of chemistry, physics, finance, electricity,
//!   computer science and date/time formulas, declared as data
//! - **Evaluator** that validates raw field text and formats results
//! - **Unit converter** with linear and affine (temperature) models
//! - **Calculator state machine** with memory, history and scientific functions
//! - **Expression parser** for free-form arithmetic entry
//!
//! ## Core Concepts
//!
//! ### Formula Pipeline
//!
//! ```text
//! [FormulaRegistry] → [FormulaSpec] → [Evaluator] → [EvaluationResult]
//! ```
//!
//! 1. The **registry** maps domain → category → formula id to a `FormulaSpec`
//! 2. A **spec** declares typed inputs and a pure compute function
//! 3. The **evaluator** parses every input, all or nothing, and runs it
//! 4. Domain failures (division by zero, invalid radix digits) come back as
//!    the `"Error"` sentinel, never as a panic
//!
//! ## Example
//!
//! ```rust
//! use calckit::input::raw_inputs;
//! use calckit::*;
//!
//! let registry = FormulaRegistry::builtin();
//! let spec = registry
//!     .select_formula("electricity", "ohms-law", "ohms-law-voltage")
//!     .unwrap();
//!
//! let evaluator = Evaluator::new();
//! let raw = raw_inputs([("current", "2"), ("resistance", "10")]);
//! let result = evaluator.evaluate(spec, &raw, &EvalContext::current()).unwrap();
//!
//! assert_eq!(result.display(evaluator.options()), "20");
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - Formula lookup and catalog export
//! - [`formula`] - Formula, category and domain definitions
//! - [`domains`] - The built-in formula tables
//! - [`input`] - Input declarations and parsed bindings
//! - [`evaluator`] - Evaluation and the active-formula session
//! - [`format`] - Shared number formatting policy
//! - [`context`] - Reference clock for date formulas
//! - [`converter`] - Unit conversion tables and panel state
//! - [`calculator`] - Calculator state machine
//! - [`expression`] - Arithmetic expression parser
//! - [`config`] - TOML-loadable engine configuration
//! - [`error`] - Error types

pub mod calculator;
pub mod config;
pub mod context;
pub mod converter;
pub mod domains;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod format;
pub mod formula;
pub mod input;
pub mod registry;
pub mod value;

// Re-export main types for convenience
pub use calculator::Calculator;
pub use config::EngineConfig;
pub use context::EvalContext;
pub use converter::{ConversionPanel, UnitConverter};
pub use error::{CalcError, LookupKind, Result};
pub use evaluator::{EvaluationResult, Evaluator, FormulaSession};
pub use formula::{Category, Domain, FormulaSpec};
pub use registry::FormulaRegistry;
pub use value::Value;
