//! Headless batch evaluation of a controller
//!
//! Runs independently seeded episodes on blocking worker tasks and reports
//! score, fitness and cause of death per episode plus a cause histogram.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::control::Controller;
use crate::game::{Arena, ArenaError, DeathCause, EpisodeSummary, GameConfig, StepResult};

/// Settings for a batch of headless episodes
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    pub game: GameConfig,
    pub episodes: usize,
    pub workers: usize,
    /// Episode `i` is seeded with `base_seed + i`
    pub base_seed: u64,
}

impl EvaluateConfig {
    /// Uses the game seed as base seed, or a random one when unset
    pub fn new(game: GameConfig, episodes: usize, workers: usize) -> Self {
        let base_seed = game.seed.unwrap_or_else(rand::random);
        Self {
            game,
            episodes,
            workers: workers.max(1),
            base_seed,
        }
    }
}

/// Outcome of one headless episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeReport {
    pub episode: usize,
    pub seed: u64,
    pub score: u32,
    pub moves: u32,
    pub length: usize,
    pub cause: DeathCause,
    pub fitness: f64,
}

/// Aggregate over a batch of episodes
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub controller: String,
    pub episodes: Vec<EpisodeReport>,
    pub causes: BTreeMap<String, usize>,
    pub best_score: u32,
    pub mean_score: f64,
    pub mean_fitness: f64,
}

impl EvaluationReport {
    pub fn from_episodes(controller: &str, mut episodes: Vec<EpisodeReport>) -> Self {
        episodes.sort_by_key(|report| report.episode);

        let mut causes = BTreeMap::new();
        for report in &episodes {
            *causes.entry(report.cause.as_str().to_string()).or_insert(0) += 1;
        }

        let count = episodes.len().max(1) as f64;
        let best_score = episodes.iter().map(|r| r.score).max().unwrap_or(0);
        let mean_score = episodes.iter().map(|r| f64::from(r.score)).sum::<f64>() / count;
        let mean_fitness = episodes.iter().map(|r| r.fitness).sum::<f64>() / count;

        Self {
            controller: controller.to_string(),
            episodes,
            causes,
            best_score,
            mean_score,
            mean_fitness,
        }
    }

    pub fn format_summary(&self) -> String {
        let causes = self
            .causes
            .iter()
            .map(|(cause, count)| format!("{cause}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Controller: {}\nEpisodes: {}\nBest score: {}\nMean score: {:.2}\nMean fitness: {:.3}\nCauses: {}",
            self.controller,
            self.episodes.len(),
            self.best_score,
            self.mean_score,
            self.mean_fitness,
            causes
        )
    }
}

/// Score plus a small bonus for ending horizontally close to the food.
///
/// After a collision the distance is taken from the cell the snake tried
/// to enter.
pub fn fitness(arena: &Arena) -> f64 {
    let proximity = arena.food().map_or(0.0, |food| {
        let dx = f64::from((arena.final_position().x - food.x).abs());
        0.25 / dx.max(1.0)
    });
    f64::from(arena.score()) + proximity
}

/// Drive `arena` with `controller` until the episode ends.
///
/// A controller that never starts the episode (returns no direction while
/// the arena has not started) is reported as `InvalidState`.
pub fn play_episode<C: Controller + ?Sized>(
    arena: &mut Arena,
    controller: &mut C,
) -> Result<EpisodeSummary, ArenaError> {
    loop {
        let decision = controller.decide(&arena.view())?;
        match arena.advance(decision)? {
            StepResult::Ended(summary) => return Ok(summary),
            StepResult::Moved(_) => {}
            StepResult::Idle => {
                return Err(ArenaError::InvalidState(format!(
                    "{} controller left the arena idle",
                    controller.kind()
                )))
            }
        }
    }
}

/// Play the given `(episode, seed)` pairs one after another on one controller
pub fn run_episodes<C: Controller + ?Sized>(
    game: &GameConfig,
    controller: &mut C,
    episodes: &[(usize, u64)],
) -> Result<Vec<EpisodeReport>, ArenaError> {
    let mut reports = Vec::with_capacity(episodes.len());
    for &(episode, seed) in episodes {
        let mut arena = Arena::new(game.clone().with_seed(seed), 0)?;
        controller.reset();
        let summary = play_episode(&mut arena, controller)?;
        let report = EpisodeReport {
            episode,
            seed,
            score: summary.score,
            moves: summary.moves,
            length: summary.length,
            cause: summary.cause,
            fitness: fitness(&arena),
        };
        debug!(
            episode,
            seed,
            score = report.score,
            cause = %report.cause,
            fitness = report.fitness,
            "episode finished"
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Evaluate a controller over `config.episodes` episodes.
///
/// `make_controller` is called once per worker; each worker plays its share
/// of episodes on a blocking task.
pub async fn evaluate<F>(config: &EvaluateConfig, mut make_controller: F) -> Result<EvaluationReport>
where
    F: FnMut() -> Result<Box<dyn Controller + Send>>,
{
    let workers = config.workers.min(config.episodes).max(1);
    info!(
        episodes = config.episodes,
        workers,
        base_seed = config.base_seed,
        "starting evaluation"
    );

    let mut shares: Vec<Vec<(usize, u64)>> = vec![Vec::new(); workers];
    for episode in 0..config.episodes {
        let seed = config.base_seed.wrapping_add(episode as u64);
        shares[episode % workers].push((episode, seed));
    }

    let mut kind = String::new();
    let mut handles = Vec::with_capacity(workers);
    for share in shares {
        let mut controller = make_controller()?;
        kind = controller.kind().to_string();
        let game = config.game.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            run_episodes(&game, &mut *controller, &share)
        }));
    }

    let mut episodes = Vec::with_capacity(config.episodes);
    for handle in handles {
        let reports = handle.await.context("Evaluation worker panicked")??;
        episodes.extend(reports);
    }

    let report = EvaluationReport::from_episodes(&kind, episodes);
    info!(
        best_score = report.best_score,
        mean_score = report.mean_score,
        "evaluation complete"
    );
    Ok(report)
}
