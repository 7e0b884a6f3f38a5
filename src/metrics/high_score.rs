use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    highscore: u32,
}

/// Best human score, kept as `{"highscore": n}` in a JSON file
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored score, or 0 when the file does not exist yet
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no high score file, starting from 0");
            return Ok(0);
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let file: HighScoreFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))?;
        Ok(file.highscore)
    }

    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string(&HighScoreFile { highscore: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        info!(score, path = ?self.path, "saved new high score");
        Ok(())
    }
}
