//! Controllers: everything that turns an [`ArenaView`] into a move
//!
//! Three strategies share one capability:
//! - [`ManualController`]: replays buffered key presses
//! - [`PatrolController`]: deterministic back-and-forth sweep
//! - [`LearnedController`]: sensor features fed to a [`DecisionFunction`]

pub mod learned;
pub mod manual;
pub mod patrol;
pub mod sensor;

pub use learned::{argmax_lowest, DecisionFunction, LearnedController};
pub use manual::ManualController;
pub use patrol::PatrolController;
pub use sensor::{bearing, encode, Features, FEATURE_COUNT};

use crate::game::{ArenaError, ArenaView, Decision};

/// Shared interface implemented by all controllers
pub trait Controller {
    /// Short name used in logs and reports
    fn kind(&self) -> &'static str;

    /// Pick the direction for the next tick.
    ///
    /// Conforming controllers never ask for a reversal.
    fn decide(&mut self, view: &ArenaView<'_>) -> Result<Decision, ArenaError>;

    /// Drop any buffered input (on pause and restart)
    fn reset(&mut self) {}
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn decide(&mut self, view: &ArenaView<'_>) -> Result<Decision, ArenaError> {
        (**self).decide(view)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
