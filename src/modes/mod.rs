pub mod evaluate;
pub mod human;
pub mod pacing;
pub mod terminal;
pub mod watch;

pub use evaluate::{evaluate, play_episode, EvaluateConfig, EvaluationReport};
pub use human::HumanMode;
pub use pacing::{Pacer, SpeedMultiplier};
pub use watch::WatchMode;
