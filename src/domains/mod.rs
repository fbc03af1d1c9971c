//! Built-in formula domains.
//!
//! Each submodule exposes a `domain()` constructor returning its
//! categories and formulas. Nothing here holds state; a
//! [`FormulaRegistry`](crate::FormulaRegistry) owns the built values.

pub mod chemistry;
pub mod computer_science;
pub mod date_time;
pub mod electricity;
pub mod finance;
pub mod physics;

use crate::formula::Domain;

/// The six built-in domains, in display order.
pub fn builtin() -> Vec<Domain> {
    vec![
        chemistry::domain(),
        physics::domain(),
        finance::domain(),
        electricity::domain(),
        computer_science::domain(),
        date_time::domain(),
    ]
}
