//! Formula evaluator
//!
//! Evaluates formula ASTs to numbers, looking cell values up through a
//! [`CellLookup`]. Problems with operands or arithmetic are reported as
//! [`CellError`] values, never as panics.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use gridcalc_core::{CellError, Position, Value};

/// Read-only access to cell values during evaluation
///
/// Implementations return the blank value for positions that hold nothing.
pub trait CellLookup {
    fn cell_value(&self, pos: Position) -> Value;
}

impl<F> CellLookup for F
where
    F: Fn(Position) -> Value,
{
    fn cell_value(&self, pos: Position) -> Value {
        self(pos)
    }
}

/// Evaluate a formula expression
///
/// Errors from referenced cells propagate unchanged; the left operand of a
/// binary operator is checked before the right one.
pub fn evaluate<L>(expr: &FormulaExpr, ctx: &L) -> Result<f64, CellError>
where
    L: CellLookup + ?Sized,
{
    match expr {
        FormulaExpr::Number(n) => Ok(*n),
        FormulaExpr::CellRef(pos) => to_number(ctx.cell_value(*pos)),
        FormulaExpr::InvalidRef(_) => Err(CellError::Ref),
        FormulaExpr::UnaryOp { op, operand } => {
            let n = evaluate(operand, ctx)?;
            Ok(match op {
                UnaryOperator::Plus => n,
                UnaryOperator::Negate => -n,
            })
        }
        FormulaExpr::BinaryOp { op, left, right } => {
            let l = evaluate(left, ctx)?;
            let r = evaluate(right, ctx)?;
            let result = match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
            };
            if result.is_finite() {
                Ok(result)
            } else {
                Err(CellError::Div0)
            }
        }
    }
}

/// Coerce a referenced cell's value to a number
fn to_number(value: Value) -> Result<f64, CellError> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Error(e) => Err(e),
        Value::Text(s) if s.is_empty() => Ok(0.0),
        Value::Text(s) => parse_numeric_text(&s).ok_or(CellError::Value),
    }
}

/// Parse text that consists entirely of a finite decimal number
fn parse_numeric_text(s: &str) -> Option<f64> {
    // f64::from_str also accepts "inf" and "NaN", which are not numbers here
    if s.chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
