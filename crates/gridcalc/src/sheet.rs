//! Sheet type: the cell registry and its dependency graph
//!
//! # Edges
//!
//! ```text
//! A depends_on B   <=>   B depended_on_by A     ("A's formula reads B")
//! ```
//!
//! Both directions are stored on the cells themselves and resolved through
//! the registry by position. The committed graph is always acyclic: a write
//! that would close a cycle is validated and rejected before anything is
//! mutated, so every write either fully applies or leaves the sheet as it was.
//!
//! # Evaluation
//!
//! Values are computed on read and memoized per cell. A read walks the
//! uncached cells it depends on with an explicit stack and evaluates them
//! precedents first, so chain length is bounded by memory, not call depth.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::ops::Deref;
use std::ptr;

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use gridcalc_core::{Position, Size, Value};
use gridcalc_formula::CellLookup;

use crate::cell::{Cell, CellContent};
use crate::error::{Error, Result};

/// A single sheet of cells
#[derive(Debug, Default)]
pub struct Sheet {
    /// Every cell by position, placeholders included
    cells: AHashMap<Position, Cell>,
    /// Back edges of cleared positions, re-attached when a cell reappears there
    parked_dependents: AHashMap<Position, BTreeSet<Position>>,
    /// Printable bounds
    size: Size,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    // === Cell Modification ===

    /// Write `text` to the cell at `pos`
    ///
    /// Text starting with `=` (and longer than that) is parsed as a formula;
    /// anything else is stored as a literal. Writing a formula creates blank
    /// placeholder cells for referenced positions that hold nothing yet, and
    /// invalidates the memoized values of every cell that (transitively)
    /// reads `pos`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPosition`] if `pos` is outside the sheet
    /// - [`Error::FormulaSyntax`] if the formula body does not parse
    /// - [`Error::CircularDependency`] if the formula would read `pos`,
    ///   directly or through other cells
    ///
    /// The sheet is unchanged when an error is returned.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        Self::validate_position(pos)?;

        let content = CellContent::parse(text)?;
        self.check_acyclic(pos, content.references())?;

        debug!("set {} to {:?}", pos, text);

        // Dependents belong to the position, not to the content being replaced
        let (old_forward, dependents) = match self.cells.remove(&pos) {
            Some(old) => old.into_edges(),
            None => (
                BTreeSet::new(),
                self.parked_dependents.remove(&pos).unwrap_or_default(),
            ),
        };

        for target in old_forward {
            self.unlink(pos, target);
        }

        for &target in content.references() {
            self.ensure_cell(target).back_edges_mut().insert(pos);
        }

        self.invalidate_from(dependents.iter().copied());
        self.cells.insert(pos, Cell::new(pos, content, dependents));
        self.size = self.size.covering(pos);

        Ok(())
    }

    /// Remove the cell at `pos` entirely
    ///
    /// Cells that read `pos` are invalidated and read it as blank from now on.
    /// Clearing a position that holds nothing is not an error. The printable
    /// bounds are recomputed from every remaining cell, placeholders included.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        Self::validate_position(pos)?;

        if let Some(cell) = self.cells.remove(&pos) {
            debug!("clear {}", pos);

            let (forward, dependents) = cell.into_edges();
            for target in forward {
                self.unlink(pos, target);
            }

            if !dependents.is_empty() {
                self.invalidate_from(dependents.iter().copied());
                self.parked_dependents.insert(pos, dependents);
            }
        }

        self.size = self.registry_bounds();
        Ok(())
    }

    // === Cell Access ===

    /// Get the cell at `pos`, if one exists
    ///
    /// Placeholder cells created for formula references are returned too.
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>> {
        Self::validate_position(pos)?;
        Ok(self.cells.get(&pos))
    }

    /// Get a writable handle to the cell at `pos`, if one exists
    ///
    /// Writes through the handle go through [`set_cell`](Self::set_cell) and
    /// [`clear_cell`](Self::clear_cell), so the graph stays consistent.
    pub fn get_cell_mut(&mut self, pos: Position) -> Result<Option<CellMut<'_>>> {
        Self::validate_position(pos)?;
        if !self.cells.contains_key(&pos) {
            return Ok(None);
        }
        Ok(Some(CellMut { sheet: self, pos }))
    }

    /// Value of the cell at `pos` (convenience method)
    pub fn value_at(&self, pos: Position) -> Result<Option<Value>> {
        Ok(self.get_cell(pos)?.map(|cell| self.value_of(cell)))
    }

    /// Text of the cell at `pos` (convenience method)
    pub fn text_at(&self, pos: Position) -> Result<Option<String>> {
        Ok(self.get_cell(pos)?.map(Cell::text))
    }

    /// Number of cells in the registry, placeholders included
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Printing ===

    /// Printable bounds; `(0, 0)` when nothing is written
    ///
    /// Writes extend the bounds to the written position. A clear recomputes
    /// them from every cell in the registry, so placeholders that are still
    /// referenced can keep the bounds wider than the written cells.
    pub fn printable_size(&self) -> Size {
        self.size
    }

    /// Write every value in the printable area as tab-separated rows
    pub fn print_values<W: Write>(&self, output: &mut W) -> io::Result<()> {
        self.print_cells(output, |cell| self.value_of(cell).to_string())
    }

    /// Write every cell's text in the printable area as tab-separated rows
    pub fn print_texts<W: Write>(&self, output: &mut W) -> io::Result<()> {
        self.print_cells(output, Cell::text)
    }

    fn print_cells<W, F>(&self, output: &mut W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&Cell) -> String,
    {
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                if col > 0 {
                    output.write_all(b"\t")?;
                }
                if let Some(cell) = self.cells.get(&Position::new(row, col)) {
                    output.write_all(render(cell).as_bytes())?;
                }
            }
            output.write_all(b"\n")?;
        }
        Ok(())
    }

    // === Evaluation ===

    /// Value of `cell` as read from this sheet
    pub(crate) fn value_of(&self, cell: &Cell) -> Value {
        let pos = cell.position();
        let owned = self
            .cells
            .get(&pos)
            .map_or(false, |own| ptr::eq(own, cell));
        if owned {
            return self.compute(pos);
        }

        // Foreign cell: read this sheet's values without memoizing it
        for &target in cell.forward_edges() {
            self.compute(target);
        }
        cell.evaluate(&Memoized(self))
    }

    /// Memoize the value at `pos` along with every uncached cell it reads
    fn compute(&self, pos: Position) -> Value {
        let mut stack = vec![(pos, false)];

        while let Some((current, precedents_done)) = stack.pop() {
            let Some(cell) = self.cells.get(&current) else {
                continue;
            };
            if cell.is_cached() {
                continue;
            }

            if precedents_done {
                cell.memoize(&Memoized(self));
                trace!("computed {}", current);
            } else {
                stack.push((current, true));
                stack.extend(
                    cell.forward_edges()
                        .iter()
                        .filter(|target| {
                            self.cells
                                .get(*target)
                                .map_or(false, |cell| !cell.is_cached())
                        })
                        .map(|&target| (target, false)),
                );
            }
        }

        Memoized(self).cell_value(pos)
    }

    // === Graph maintenance ===

    fn validate_position(pos: Position) -> Result<()> {
        if pos.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidPosition(pos))
        }
    }

    /// Reject `references` as the new forward edges of `pos` if one of them
    /// already reads `pos`, directly or through other cells
    ///
    /// Walks back edges outward from `pos`, so the cost is bounded by the
    /// cells downstream of `pos` rather than everything upstream of the
    /// references.
    fn check_acyclic(&self, pos: Position, references: &[Position]) -> Result<()> {
        if references.is_empty() {
            return Ok(());
        }

        let targets: AHashSet<Position> = references.iter().copied().collect();
        let mut stack = vec![pos];
        let mut visited = AHashSet::new();

        while let Some(current) = stack.pop() {
            if targets.contains(&current) {
                debug!("rejecting write to {}: circular dependency", pos);
                return Err(Error::CircularDependency(pos));
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(dependents) = self.dependents_of(current) {
                stack.extend(dependents.iter().copied());
            }
        }

        Ok(())
    }

    fn dependents_of(&self, pos: Position) -> Option<&BTreeSet<Position>> {
        match self.cells.get(&pos) {
            Some(cell) => Some(cell.back_edges()),
            None => self.parked_dependents.get(&pos),
        }
    }

    /// Get the cell at `pos`, creating a placeholder if there is none
    fn ensure_cell(&mut self, pos: Position) -> &mut Cell {
        let parked = &mut self.parked_dependents;
        self.cells.entry(pos).or_insert_with(|| {
            trace!("placeholder at {}", pos);
            Cell::placeholder(pos, parked.remove(&pos).unwrap_or_default())
        })
    }

    /// Remove the back edge `target -> dependent`
    ///
    /// A placeholder left without dependents is dropped from the registry.
    fn unlink(&mut self, dependent: Position, target: Position) {
        if let Some(cell) = self.cells.get_mut(&target) {
            cell.back_edges_mut().remove(&dependent);
            if cell.is_placeholder() && cell.back_edges().is_empty() {
                trace!("dropping placeholder at {}", target);
                self.cells.remove(&target);
            }
        } else if let Some(parked) = self.parked_dependents.get_mut(&target) {
            parked.remove(&dependent);
            if parked.is_empty() {
                self.parked_dependents.remove(&target);
            }
        }
    }

    /// Drop memoized values of `roots` and everything that reads them
    fn invalidate_from(&mut self, roots: impl IntoIterator<Item = Position>) {
        let mut stack: Vec<Position> = roots.into_iter().collect();
        let mut visited = AHashSet::new();

        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }
            if let Some(cell) = self.cells.get_mut(&pos) {
                if cell.invalidate_cache() {
                    trace!("invalidated {}", pos);
                }
                stack.extend(cell.back_edges().iter().copied());
            }
        }
    }

    fn registry_bounds(&self) -> Size {
        self.cells
            .keys()
            .fold(Size::default(), |size, &pos| size.covering(pos))
    }
}

impl CellLookup for Sheet {
    fn cell_value(&self, pos: Position) -> Value {
        self.compute(pos)
    }
}

/// Lookup over memoized values only
///
/// Used once every cell a formula reads has been computed; anything without
/// a memo reads as blank.
struct Memoized<'a>(&'a Sheet);

impl CellLookup for Memoized<'_> {
    fn cell_value(&self, pos: Position) -> Value {
        self.0
            .cells
            .get(&pos)
            .and_then(Cell::cached_value)
            .cloned()
            .unwrap_or_else(Value::blank)
    }
}

/// Writable handle to one cell of a [`Sheet`]
///
/// Dereferences to the [`Cell`] for reading.
pub struct CellMut<'a> {
    sheet: &'a mut Sheet,
    pos: Position,
}

impl CellMut<'_> {
    /// Replace the cell's text; see [`Sheet::set_cell`]
    pub fn set(&mut self, text: &str) -> Result<()> {
        self.sheet.set_cell(self.pos, text)
    }

    /// Remove the cell; see [`Sheet::clear_cell`]
    pub fn clear(self) -> Result<()> {
        self.sheet.clear_cell(self.pos)
    }

    /// The cell's value in its sheet
    pub fn value(&self) -> Value {
        self.sheet.compute(self.pos)
    }
}

impl Deref for CellMut<'_> {
    type Target = Cell;

    // The cell exists for as long as the handle does: set_cell never removes
    // its own position and clear consumes the handle.
    fn deref(&self) -> &Cell {
        &self.sheet.cells[&self.pos]
    }
}
