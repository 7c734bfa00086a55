//! Error types for sheet operations

use gridcalc_core::Position;
use gridcalc_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that reject a sheet operation
///
/// A rejected operation leaves the sheet unchanged. Formula evaluation
/// problems are not errors here; they are [`CellError`](gridcalc_core::CellError)
/// values stored in the cell.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Position outside the sheet limits
    #[error("Invalid position (row {}, col {})", .0.row, .0.col)]
    InvalidPosition(Position),

    /// The formula would make the cell depend on itself
    #[error("Circular dependency through cell {0}")]
    CircularDependency(Position),

    /// The formula body cannot be parsed
    #[error("Formula syntax error: {0}")]
    FormulaSyntax(#[from] FormulaError),
}
