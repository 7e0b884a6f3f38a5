use rand::Rng;
use std::collections::HashMap;

use super::geometry::Cell;

/// Set of free cells with O(1) insert, remove and uniform sampling.
///
/// Cells live in a dense vector; the map holds each cell's slot. Iteration
/// order depends only on the sequence of operations, so sampling with a
/// seeded generator is reproducible.
#[derive(Debug, Clone, Default)]
pub struct CellSet {
    cells: Vec<Cell>,
    slots: HashMap<Cell, usize>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the cell was already present
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.slots.contains_key(&cell) {
            return false;
        }
        self.slots.insert(cell, self.cells.len());
        self.cells.push(cell);
        true
    }

    /// Returns false if the cell was not present
    pub fn remove(&mut self, cell: Cell) -> bool {
        let Some(slot) = self.slots.remove(&cell) else {
            return false;
        };
        self.cells.swap_remove(slot);
        if let Some(moved) = self.cells.get(slot) {
            self.slots.insert(*moved, slot);
        }
        true
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.slots.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Uniformly pick a cell, or `None` when the set is empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rng.gen_range(0..self.cells.len())])
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}
