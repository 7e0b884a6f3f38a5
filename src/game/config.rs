use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an arena
///
/// Geometry is expressed in pixel units: every cell coordinate is a multiple
/// of `square_size`. `height` is the playable height including walls; the
/// status strip is added on top of it by [`crate::game::Geometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board, walls included
    pub width: i32,
    /// Height of the board, walls included
    pub height: i32,
    /// Side of one cell
    pub square_size: i32,
    /// Ticks per second at score zero
    pub start_rate: f64,
    /// Obstacles requested per episode (clamped to the free interior)
    pub num_obstacles: usize,
    /// Snake length the episode grows into before tail removal starts
    pub start_len: usize,
    /// Direction changes allowed without scoring before the episode stalls
    pub stall_limit: u32,
    /// Seed for obstacle and food placement; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            square_size: 20,
            start_rate: 10.0,
            num_obstacles: 0,
            start_len: 1,
            stall_limit: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size in cells
    pub fn new(columns: i32, rows: i32) -> Self {
        let defaults = Self::default();
        Self {
            width: columns * defaults.square_size,
            height: rows * defaults.square_size,
            ..defaults
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large board
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    pub fn with_obstacles(mut self, num_obstacles: usize) -> Self {
        self.num_obstacles = num_obstacles;
        self
    }

    pub fn with_start_len(mut self, start_len: usize) -> Self {
        self.start_len = start_len;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read a configuration from a JSON file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config from {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse game config {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 400);
        assert_eq!(config.square_size, 20);
        assert_eq!(config.start_len, 1);
        assert_eq!(config.stall_limit, 500);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 240);
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{"width": 200, "num_obstacles": 7}"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.width, 200);
        assert_eq!(config.num_obstacles, 7);
        assert_eq!(config.height, 400);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
