use std::f32::consts::PI;

use crate::game::action::wrap_angle;
use crate::game::{ArenaError, ArenaView, Cell, Direction};

/// Number of features handed to a decision function
pub const FEATURE_COUNT: usize = 4;

/// `[forward, right, left, bearing]`
///
/// The first three are 1.0 when the probed neighbour is not free (wall,
/// obstacle or body). The bearing is the signed angle from the heading to
/// the food, scaled into [-1, 1].
pub type Features = [f32; FEATURE_COUNT];

/// Encode the arena as seen from the snake's head
pub fn encode(view: &ArenaView<'_>) -> Result<Features, ArenaError> {
    let heading = view
        .direction()
        .ok_or_else(|| ArenaError::InvalidState("cannot sense before the first move".into()))?;
    let food = view
        .food()
        .ok_or_else(|| ArenaError::InvalidState("no food on the board to sense".into()))?;
    let head = view.head();
    let sq = view.square_size();

    let probe = |direction: Direction| {
        let (dx, dy) = direction.delta();
        let cell = head.moved_by(dx * sq, dy * sq);
        if view.is_empty_cell(cell) {
            0.0
        } else {
            1.0
        }
    };

    Ok([
        probe(heading),
        probe(heading.turned_right()),
        probe(heading.turned_left()),
        bearing(head, heading, food),
    ])
}

/// Angle from `heading` to `food`, wrapped into (-pi, pi] and divided by pi.
/// Positive values mean the food is clockwise (to the right).
pub fn bearing(head: Cell, heading: Direction, food: Cell) -> f32 {
    let theta_food = ((food.x - head.x) as f32).atan2((head.y - food.y) as f32);
    wrap_angle(theta_food - heading.angle()) / PI
}
