use std::collections::VecDeque;

use super::Controller;
use crate::game::{ArenaError, ArenaView, Decision, Direction};

/// Human input: one buffered key press is consumed per tick
#[derive(Debug, Default)]
pub struct ManualController {
    buffer: VecDeque<Direction>,
}

impl ManualController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key press for a later tick
    pub fn push(&mut self, direction: Direction) {
        self.buffer.push_back(direction);
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Controller for ManualController {
    fn kind(&self) -> &'static str {
        "manual"
    }

    fn decide(&mut self, view: &ArenaView<'_>) -> Result<Decision, ArenaError> {
        let current = view.direction();
        let decision = match (self.buffer.pop_front(), current) {
            (Some(key), Some(heading)) if key.is_opposite(heading) => Decision::keep(current),
            (Some(key), _) => Decision::new(key, true),
            (None, _) => Decision::keep(current),
        };
        Ok(decision)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}
