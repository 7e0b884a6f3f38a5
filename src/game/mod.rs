//! Core simulation for the snake arena
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The same [`Arena`] is driven by human, patrol and learned controllers.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod occupancy;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Decision, Direction, Turn};
pub use config::GameConfig;
pub use engine::{tick_rate_for, EpisodeSummary, StepInfo, StepResult};
pub use error::ArenaError;
pub use geometry::{Bounds, Cell, Geometry};
pub use occupancy::CellSet;
pub use snake::Snake;
pub use state::{Arena, ArenaView, DeathCause, Phase};
