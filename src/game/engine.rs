use serde::Serialize;
use tracing::{debug, info};

use super::{
    action::Decision,
    error::ArenaError,
    geometry::Cell,
    state::{Arena, DeathCause, Phase},
};

/// Information about a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
}

/// Final numbers of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    pub score: u32,
    pub moves: u32,
    pub length: usize,
    pub cause: DeathCause,
    /// The score beat the high score the episode started with
    pub new_high_score: bool,
}

/// Result of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Nothing happened: not started yet, paused, or already over
    Idle,
    /// The snake moved and the episode goes on
    Moved(StepInfo),
    /// The episode ended on this tick
    Ended(EpisodeSummary),
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        matches!(self, StepResult::Ended(_))
    }
}

/// Ticks per second after `score` points: a concave, non-decreasing curve
pub fn tick_rate_for(start_rate: f64, score: u32) -> f64 {
    let s = f64::from(score);
    start_rate + 0.25 * (0.3 * s.powf(0.7) + (0.3 * s + 1.0).ln())
}

impl Arena {
    /// Advance the world by one tick.
    ///
    /// Invalid requests (a reversal, or no direction once running) are
    /// controller bugs and come back as [`ArenaError::InvalidMove`]; the
    /// state is left untouched in that case.
    pub fn advance(&mut self, decision: Decision) -> Result<StepResult, ArenaError> {
        match self.phase {
            Phase::Over | Phase::Paused => return Ok(StepResult::Idle),
            Phase::NotStarted => {
                if decision.direction.is_none() {
                    return Ok(StepResult::Idle);
                }
            }
            Phase::Running => {}
        }

        if self.moves_since_last_score > self.config.stall_limit {
            self.moves_since_last_score = 0;
            return Ok(StepResult::Ended(self.finish(DeathCause::Stalled)));
        }

        let direction = match (decision.direction, self.direction) {
            (Some(requested), Some(current)) if requested.is_opposite(current) => {
                return Err(ArenaError::InvalidMove {
                    requested: Some(requested),
                    previous: Some(current),
                })
            }
            (Some(requested), _) => requested,
            (None, previous) => {
                return Err(ArenaError::InvalidMove {
                    requested: None,
                    previous,
                })
            }
        };

        if self.phase == Phase::NotStarted {
            debug!(?direction, "episode started");
            self.phase = Phase::Running;
        }
        self.direction = Some(direction);

        let new_head = self.geometry.step(self.snake.head(), direction);

        if let Some(cause) = self.check_death(new_head) {
            self.fatal_cell = Some(new_head);
            return Ok(StepResult::Ended(self.finish(cause)));
        }

        let ate_food = self.food == Some(new_head);
        let should_grow = if ate_food {
            self.score += 1;
            self.moves_since_last_score = 0;
            self.tick_rate = tick_rate_for(self.config.start_rate, self.score);
            true
        } else {
            self.snake.consume_growth()
        };

        // Release the tail before claiming the head: they may be the same cell
        if let Some(tail) = self.snake.move_snake(new_head, should_grow) {
            self.empty.insert(tail);
        }
        self.empty.remove(new_head);

        let changed = u32::from(decision.changed);
        self.moves += changed;
        self.moves_since_last_score += changed;

        if ate_food {
            self.food = self.empty.choose(&mut self.rng);
            if self.food.is_none() {
                return Ok(StepResult::Ended(self.finish(DeathCause::BoardFull)));
            }
        }

        Ok(StepResult::Moved(StepInfo { ate_food }))
    }

    /// Would moving the head onto `new_head` end the episode?
    ///
    /// Checks run in order: wall, obstacle, body. The current tail is not
    /// counted as body when it leaves the cell this tick, which is the case
    /// unless the snake eats or still has growth pending.
    pub fn check_death(&self, new_head: Cell) -> Option<DeathCause> {
        if self.geometry.is_border(new_head) {
            return Some(DeathCause::Wall);
        }
        if self.obstacles.contains(&new_head) {
            return Some(DeathCause::Obstacle);
        }
        let tail_vacates = self.food != Some(new_head) && self.snake.pending_growth() == 0;
        if self.snake.collides(new_head, tail_vacates) {
            return Some(DeathCause::SelfCollision);
        }
        None
    }

    fn finish(&mut self, cause: DeathCause) -> EpisodeSummary {
        self.phase = Phase::Over;
        self.death_cause = Some(cause);
        let summary = EpisodeSummary {
            score: self.score,
            moves: self.moves,
            length: self.snake.len(),
            cause,
            new_high_score: self.is_new_high_score(),
        };
        info!(
            cause = %cause,
            score = summary.score,
            moves = summary.moves,
            "episode over"
        );
        summary
    }
}
