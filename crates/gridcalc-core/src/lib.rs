//! # gridcalc-core
//!
//! Core value types for the gridcalc spreadsheet engine.
//!
//! This crate provides the leaf types every other gridcalc crate builds on:
//! - [`Position`] and [`Size`] - Cell coordinates and sheet bounds
//! - [`Value`] - What a cell evaluates to (text, number, or error)
//! - [`CellError`] - Evaluation error categories with their display tokens
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Position, Value};
//!
//! let pos: Position = "B3".parse().unwrap();
//! assert_eq!(pos, Position::new(2, 1));
//! assert_eq!(pos.to_string(), "B3");
//!
//! assert_eq!(Value::Number(0.5).to_string(), "0.5");
//! ```

pub mod cell;
pub mod error;

pub use cell::{format_number, CellError, Position, Size, Value};
pub use error::{Error, Result};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;
