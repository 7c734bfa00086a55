//! # gridcalc
//!
//! An in-memory spreadsheet engine with incremental recomputation.
//!
//! Cells hold literal text or formulas that reference other cells. The
//! [`Sheet`] keeps the reference graph between cells, rejects writes that
//! would create circular references, and invalidates memoized values of
//! every cell downstream of a change. Values are computed lazily on read.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! let a1: Position = "A1".parse().unwrap();
//! let b1: Position = "B1".parse().unwrap();
//!
//! sheet.set_cell(a1, "=B1+1").unwrap();
//! sheet.set_cell(b1, "5").unwrap();
//! assert_eq!(sheet.value_at(a1).unwrap(), Some(Value::Number(6.0)));
//!
//! sheet.set_cell(b1, "7").unwrap();
//! assert_eq!(sheet.value_at(a1).unwrap(), Some(Value::Number(8.0)));
//!
//! // Circular references are rejected and change nothing
//! assert!(sheet.set_cell(b1, "=A1").is_err());
//!
//! let mut out = Vec::new();
//! sheet.print_values(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "8\t7\n");
//! ```

pub mod cell;
pub mod error;
pub mod prelude;
pub mod sheet;

pub use cell::{Cell, CellContent, ESCAPE_SIGN, FORMULA_SIGN};
pub use error::{Error, Result};
pub use sheet::{CellMut, Sheet};

// Re-export core types
pub use gridcalc_core::{format_number, CellError, Position, Size, Value, MAX_COLS, MAX_ROWS};

// Re-export formula types
pub use gridcalc_formula::{CellLookup, Formula, FormulaError};
