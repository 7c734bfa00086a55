//! Cell type
//!
//! A [`Cell`] owns its content and a memoized value. Links to other cells are
//! kept as position sets that the owning [`Sheet`] resolves, so cells never
//! hold references to each other.

use std::cell::OnceCell;
use std::collections::BTreeSet;

use gridcalc_core::{Position, Value};
use gridcalc_formula::{CellLookup, Formula};

use crate::error::Result;
use crate::sheet::Sheet;

/// Leading character that marks a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that forces the rest of the text to be a literal
pub const ESCAPE_SIGN: char = '\'';

/// What a cell holds
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Nothing written; the cell exists only to record its dependents
    Empty,
    /// Literal text, stored exactly as written (escape sign included)
    Text(String),
    /// Parsed formula
    Formula(Formula),
}

impl CellContent {
    /// Classify and parse user input
    ///
    /// `=` followed by at least one character is a formula; anything else,
    /// including a lone `=`, is literal text.
    ///
    /// # Examples
    /// ```
    /// use gridcalc::CellContent;
    ///
    /// assert!(matches!(CellContent::parse("=1+2").unwrap(), CellContent::Formula(_)));
    /// assert!(matches!(CellContent::parse("=").unwrap(), CellContent::Text(_)));
    /// assert!(matches!(CellContent::parse("'=1+2").unwrap(), CellContent::Text(_)));
    /// assert!(CellContent::parse("=1+").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        match text.strip_prefix(FORMULA_SIGN) {
            Some(body) if !body.is_empty() => Ok(CellContent::Formula(Formula::parse(body)?)),
            _ => Ok(CellContent::Text(text.to_string())),
        }
    }

    /// Positions read by the content
    pub fn references(&self) -> &[Position] {
        match self {
            CellContent::Formula(formula) => formula.referenced_cells(),
            CellContent::Empty | CellContent::Text(_) => &[],
        }
    }

    /// Text as the user would re-enter it
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    fn evaluate<L>(&self, lookup: &L) -> Value
    where
        L: CellLookup + ?Sized,
    {
        match self {
            CellContent::Empty => Value::blank(),
            CellContent::Text(text) => {
                Value::Text(text.strip_prefix(ESCAPE_SIGN).unwrap_or(text).to_string())
            }
            CellContent::Formula(formula) => match formula.evaluate(lookup) {
                Ok(n) => Value::Number(n),
                Err(e) => Value::Error(e),
            },
        }
    }
}

/// A single cell in a sheet
#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    content: CellContent,
    /// Memoized value; empty means dirty
    cache: OnceCell<Value>,
    /// Positions this cell's formula reads (forward edges)
    depends_on: BTreeSet<Position>,
    /// Positions whose formulas read this cell (back edges)
    depended_on_by: BTreeSet<Position>,
}

impl Cell {
    pub(crate) fn new(
        position: Position,
        content: CellContent,
        depended_on_by: BTreeSet<Position>,
    ) -> Self {
        let depends_on = content.references().iter().copied().collect();
        Self {
            position,
            content,
            cache: OnceCell::new(),
            depends_on,
            depended_on_by,
        }
    }

    /// A cell created because a formula references an unwritten position
    pub(crate) fn placeholder(position: Position, depended_on_by: BTreeSet<Position>) -> Self {
        Self::new(position, CellContent::Empty, depended_on_by)
    }

    /// Where the cell lives in its sheet
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the cell was never written and only records dependents
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// The cell's value as read from `sheet`
    ///
    /// For the sheet that owns the cell this is the memoized value, computed
    /// on first read. A cell from another sheet is evaluated against `sheet`
    /// without touching any memo.
    pub fn value(&self, sheet: &Sheet) -> Value {
        sheet.value_of(self)
    }

    /// Whether a memoized value is present
    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    /// The text the cell was written with; formulas come back in canonical form
    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Positions this cell reads, ascending
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.depends_on.iter().copied().collect()
    }

    /// Positions whose formulas read this cell, ascending
    pub fn dependents(&self) -> Vec<Position> {
        self.depended_on_by.iter().copied().collect()
    }

    pub(crate) fn cached_value(&self) -> Option<&Value> {
        self.cache.get()
    }

    /// Evaluate the content against `lookup`, leaving the memo alone
    pub(crate) fn evaluate<L>(&self, lookup: &L) -> Value
    where
        L: CellLookup + ?Sized,
    {
        self.content.evaluate(lookup)
    }

    /// The memoized value, evaluating against `lookup` if there is none
    pub(crate) fn memoize<L>(&self, lookup: &L) -> Value
    where
        L: CellLookup + ?Sized,
    {
        self.cache
            .get_or_init(|| self.content.evaluate(lookup))
            .clone()
    }

    pub(crate) fn forward_edges(&self) -> &BTreeSet<Position> {
        &self.depends_on
    }

    pub(crate) fn back_edges(&self) -> &BTreeSet<Position> {
        &self.depended_on_by
    }

    pub(crate) fn back_edges_mut(&mut self) -> &mut BTreeSet<Position> {
        &mut self.depended_on_by
    }

    pub(crate) fn into_edges(self) -> (BTreeSet<Position>, BTreeSet<Position>) {
        (self.depends_on, self.depended_on_by)
    }

    /// Drop the memoized value; returns whether one was present
    pub(crate) fn invalidate_cache(&mut self) -> bool {
        self.cache.take().is_some()
    }
}
