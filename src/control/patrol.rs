use super::Controller;
use crate::game::{ArenaError, ArenaView, Decision, Direction};

/// Baseline agent sweeping the board column by column.
///
/// Odd columns are climbed, even columns descended; the bottom row is kept
/// free as the way back to the first column. With an even number of
/// interior columns this visits every cell in a cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatrolController;

impl PatrolController {
    pub fn new() -> Self {
        Self
    }

    /// The sweep direction for a head cell, ignoring the current heading
    pub fn sweep(view: &ArenaView<'_>) -> Direction {
        let head = view.head();
        let sq = view.square_size();
        let b = view.bounds();
        let (x, y) = (head.x, head.y);

        if (x, y) == (b.x_right - sq, b.y_bottom - 2 * sq) {
            Direction::Down
        } else if (x, y) == (b.x_left + sq, b.y_bottom - sq) {
            Direction::Up
        } else if y == b.y_bottom - sq {
            Direction::Left
        } else if x.rem_euclid(2 * sq) == sq {
            if y != b.y_top + sq {
                Direction::Up
            } else {
                Direction::Right
            }
        } else if y != b.y_bottom - 2 * sq {
            Direction::Down
        } else {
            Direction::Right
        }
    }
}

impl Controller for PatrolController {
    fn kind(&self) -> &'static str {
        "patrol"
    }

    fn decide(&mut self, view: &ArenaView<'_>) -> Result<Decision, ArenaError> {
        let current = view.direction();
        let wanted = Self::sweep(view);
        // Joining the sweep mid-column can point backwards; hold course instead
        if current.is_some_and(|heading| wanted.is_opposite(heading)) {
            return Ok(Decision::keep(current));
        }
        Ok(Decision::new(wanted, current != Some(wanted)))
    }
}
