use thiserror::Error;

use super::action::Direction;

/// Errors raised by the simulation core.
///
/// Deaths, stalls and a full board are not errors; they end the episode
/// through [`crate::game::Phase::Over`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// Geometry or configuration rejected at startup
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A controller asked for a move that reverses or leaves the axis grid
    #[error("invalid move: requested {requested:?} while heading {previous:?}")]
    InvalidMove {
        requested: Option<Direction>,
        previous: Option<Direction>,
    },

    /// A decision was requested in a state no controller should see
    #[error("invalid state: {0}")]
    InvalidState(String),
}
