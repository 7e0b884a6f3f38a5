use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the unit delta (dx, dy) for moving in this direction.
    /// Screen coordinates: y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Clockwise quarter turn
    pub fn turned_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Counter-clockwise quarter turn
    pub fn turned_left(&self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn turned(&self, turn: Turn) -> Self {
        match turn {
            Turn::Straight => *self,
            Turn::Right => self.turned_right(),
            Turn::Left => self.turned_left(),
        }
    }

    /// Heading angle measured clockwise from "up": `atan2(dx, -dy)`
    pub fn angle(&self) -> f32 {
        let (dx, dy) = self.delta();
        (dx as f32).atan2(-dy as f32)
    }
}

/// Move relative to the current heading, as chosen by a decision function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Straight,
    Right,
    Left,
}

impl Turn {
    /// Map an output index to a turn. Index 0 keeps straight, 1 turns right,
    /// anything above turns left.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Turn::Straight,
            1 => Turn::Right,
            _ => Turn::Left,
        }
    }
}

/// A controller's answer for one tick.
///
/// `direction` is `None` only before the episode starts. `changed` is the
/// edge trigger used for the move counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Option<Direction>,
    pub changed: bool,
}

impl Decision {
    pub fn new(direction: Direction, changed: bool) -> Self {
        Self {
            direction: Some(direction),
            changed,
        }
    }

    /// Keep whatever heading the snake already has
    pub fn keep(direction: Option<Direction>) -> Self {
        Self {
            direction,
            changed: false,
        }
    }
}

/// Wrap an angle into (-pi, pi]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_turns_cycle() {
        for dir in Direction::ALL {
            assert_eq!(dir.turned_right().turned_left(), dir);
            assert_eq!(
                dir.turned_right().turned_right().turned_right().turned_right(),
                dir
            );
            assert!(dir.turned_right().turned_right().is_opposite(dir));
        }
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Down.turned(Turn::Straight), Direction::Down);
    }

    #[test]
    fn test_heading_angles() {
        assert!(Direction::Up.angle().abs() < 1e-6);
        assert!((Direction::Right.angle() - PI / 2.0).abs() < 1e-6);
        assert!((Direction::Left.angle() + PI / 2.0).abs() < 1e-6);
        assert!((Direction::Down.angle().abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_turn_from_index() {
        assert_eq!(Turn::from_index(0), Turn::Straight);
        assert_eq!(Turn::from_index(1), Turn::Right);
        assert_eq!(Turn::from_index(2), Turn::Left);
        assert_eq!(Turn::from_index(7), Turn::Left);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0)).abs() < 1e-6);
        assert!((wrap_angle(PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
    }
}
