use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::game::EpisodeSummary;

/// Session statistics shown next to the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Episodes ended per death cause name
    pub causes: BTreeMap<&'static str, u32>,
}

impl GameMetrics {
    pub fn new(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
            causes: BTreeMap::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, summary: &EpisodeSummary) {
        self.games_played += 1;
        self.high_score = self.high_score.max(summary.score);
        *self.causes.entry(summary.cause.as_str()).or_insert(0) += 1;
    }

    /// Death causes so far, e.g. `wall 2, self 1`
    pub fn format_causes(&self) -> String {
        self.causes
            .iter()
            .map(|(cause, count)| format!("{cause} {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new(0)
    }
}
