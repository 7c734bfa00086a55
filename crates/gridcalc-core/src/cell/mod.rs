//! Cell-related value types
//!
//! This module contains:
//! - [`Position`] - A cell's location (e.g., "A1")
//! - [`Size`] - The printable bounds of a sheet
//! - [`Value`] - The value a cell evaluates to
//! - [`CellError`] - Formula evaluation error categories

mod position;
mod value;

pub use position::{Position, Size};
pub use value::{format_number, CellError, Value};
