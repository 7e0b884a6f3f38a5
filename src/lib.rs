//! Snake Arena - a grid snake simulation driven by pluggable controllers
//!
//! This library provides:
//! - Core simulation: geometry, occupancy, tick engine (game module)
//! - Controllers: manual, patrol and learned-sensor strategies (control module)
//! - Burn policy networks usable as decision functions (brain module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes: human, watch and headless evaluate (modes module)

pub mod brain;
pub mod control;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
