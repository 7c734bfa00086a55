//! Parsed formula handle

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::evaluator::{evaluate, CellLookup};
use crate::parser::parse_formula;
use gridcalc_core::{CellError, Position};
use std::collections::BTreeSet;

/// A parsed formula together with the positions it reads
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    ast: FormulaExpr,
    references: Vec<Position>,
}

impl Formula {
    /// Parse a formula body (the text after `=`)
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        let ast = parse_formula(expression)?;

        let mut references = BTreeSet::new();
        ast.collect_references(&mut references);

        Ok(Self {
            ast,
            references: references.into_iter().collect(),
        })
    }

    /// Evaluate against the given cell values
    pub fn evaluate<L>(&self, lookup: &L) -> Result<f64, CellError>
    where
        L: CellLookup + ?Sized,
    {
        evaluate(&self.ast, lookup)
    }

    /// Canonical formula body, without the leading `=`
    pub fn expression(&self) -> String {
        self.ast.to_string()
    }

    /// In-sheet positions the formula reads, ascending and without duplicates
    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Value;
    use pretty_assertions::assert_eq;

    fn canonical(expression: &str) -> String {
        Formula::parse(expression).unwrap().expression()
    }

    #[test]
    fn test_canonical_drops_redundant_parentheses() {
        assert_eq!(canonical(" 1 + 2 "), "1+2");
        assert_eq!(canonical("(1+2)+3"), "1+2+3");
        assert_eq!(canonical("((A1))*(B2)"), "A1*B2");
        assert_eq!(canonical("1+(2*3)"), "1+2*3");
        assert_eq!(canonical("(-A1)"), "-A1");
    }

    #[test]
    fn test_canonical_keeps_required_parentheses() {
        assert_eq!(canonical("(1+2)*3"), "(1+2)*3");
        assert_eq!(canonical("1-(2-3)"), "1-(2-3)");
        assert_eq!(canonical("1-(2+3)"), "1-(2+3)");
        assert_eq!(canonical("8/(4/2)"), "8/(4/2)");
        assert_eq!(canonical("8/(4*2)"), "8/(4*2)");
        assert_eq!(canonical("-(A1+B1)"), "-(A1+B1)");
        assert_eq!(canonical("2*(-3)"), "2*-3");
    }

    #[test]
    fn test_canonical_numbers() {
        assert_eq!(canonical("1.50"), "1.5");
        assert_eq!(canonical(".25"), "0.25");
        assert_eq!(canonical("1e3"), "1000");
        assert_eq!(canonical("1.2345678"), "1.2345678");
    }

    #[test]
    fn test_canonical_invalid_reference_is_verbatim() {
        assert_eq!(canonical("ZZZZZ1+A1"), "ZZZZZ1+A1");
    }

    #[test]
    fn test_canonical_round_trip_preserves_value() {
        let lookup = |pos: Position| Value::Number((pos.row * 10 + pos.col + 1) as f64);
        for text in ["A1-(B2-C3)/(4*D4)", "-(A1+2)*--B1", "1/(2/(3/A2))", "+A1"] {
            let formula = Formula::parse(text).unwrap();
            let reparsed = Formula::parse(&formula.expression()).unwrap();
            assert_eq!(reparsed.expression(), formula.expression());
            assert_eq!(reparsed.evaluate(&lookup), formula.evaluate(&lookup));
        }
    }

    #[test]
    fn test_referenced_cells_sorted_and_deduplicated() {
        let formula = Formula::parse("C1+A2+A1+C1+ZZZZZ9").unwrap();
        assert_eq!(
            formula.referenced_cells(),
            &[Position::new(0, 0), Position::new(0, 2), Position::new(1, 0)]
        );
        assert!(Formula::parse("1+2").unwrap().referenced_cells().is_empty());
    }
}
