//! Prelude module for convenient imports
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    Cell, CellContent, CellError, CellLookup, CellMut, Error, Position, Result, Sheet, Size,
    Value,
};
