use std::collections::VecDeque;

use super::geometry::Cell;

/// The snake body: head at the front, tail at the back
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Ticks left during which the tail is kept in place
    pending_growth: usize,
}

impl Snake {
    /// A one-cell snake that grows to `length` over its first moves
    pub fn new(head: Cell, length: usize) -> Self {
        Self {
            body: VecDeque::from([head]),
            pending_growth: length.saturating_sub(1),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// Spend one tick of pending growth. Returns false if none was left.
    pub fn consume_growth(&mut self) -> bool {
        if self.pending_growth == 0 {
            return false;
        }
        self.pending_growth -= 1;
        true
    }

    /// Move the head to `new_head`, keeping the tail if `should_grow`.
    /// Returns the cell the tail vacated, if any.
    pub fn move_snake(&mut self, new_head: Cell, should_grow: bool) -> Option<Cell> {
        let vacated = if should_grow {
            None
        } else {
            self.body.pop_back()
        };
        self.body.push_front(new_head);
        vacated
    }

    /// True if `cell` hits the body. The tail is skipped when `tail_vacates`.
    pub fn collides(&self, cell: Cell, tail_vacates: bool) -> bool {
        let checked = if tail_vacates {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body.iter().take(checked).any(|&c| c == cell)
    }

    /// Cells from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
