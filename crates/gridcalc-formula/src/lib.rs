//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Canonical printing (AST → text with minimal parentheses)
//! - Formula evaluation against a [`CellLookup`]
//! - Reference extraction for dependency tracking
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Position, Value};
//! use gridcalc_formula::Formula;
//!
//! let formula = Formula::parse("(A1 + 2) * 3").unwrap();
//! assert_eq!(formula.expression(), "(A1+2)*3");
//! assert_eq!(formula.referenced_cells(), &[Position::new(0, 0)]);
//!
//! let lookup = |_: Position| Value::Number(4.0);
//! assert_eq!(formula.evaluate(&lookup), Ok(18.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup};
pub use formula::Formula;
pub use parser::{parse_formula, MAX_NESTING_DEPTH};
