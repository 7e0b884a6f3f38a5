use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use super::action::Direction;
use super::config::GameConfig;
use super::error::ArenaError;
use super::geometry::{Bounds, Cell, Geometry};
use super::occupancy::CellSet;
use super::snake::Snake;

/// Lifecycle of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first direction
    NotStarted,
    Running,
    Paused,
    Over,
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Snake hit a wall
    Wall,
    /// Snake hit an obstacle
    Obstacle,
    /// Snake hit itself
    SelfCollision,
    /// Too many moves without scoring
    Stalled,
    /// No free cell left for food
    BoardFull,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Wall => "wall",
            DeathCause::Obstacle => "obstacle",
            DeathCause::SelfCollision => "self",
            DeathCause::Stalled => "stalled",
            DeathCause::BoardFull => "board-full",
        }
    }

    /// Sentence for the game over screen
    pub fn describe(&self) -> &'static str {
        match self {
            DeathCause::Wall => "hit a wall",
            DeathCause::Obstacle => "hit an obstacle",
            DeathCause::SelfCollision => "hit the body",
            DeathCause::Stalled => "too many moves without scoring",
            DeathCause::BoardFull => "all possible squares occupied",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete state of one arena.
///
/// Interior cells are partitioned between `empty`, the snake and
/// `obstacles`. Only the tick routine in [`crate::game::engine`] and
/// [`Arena::restart`] mutate it.
#[derive(Debug, Clone)]
pub struct Arena {
    pub(super) config: GameConfig,
    pub(super) geometry: Geometry,
    pub(super) snake: Snake,
    pub(super) direction: Option<Direction>,
    pub(super) empty: CellSet,
    pub(super) obstacles: HashSet<Cell>,
    pub(super) food: Option<Cell>,
    pub(super) score: u32,
    pub(super) moves: u32,
    pub(super) moves_since_last_score: u32,
    pub(super) tick_rate: f64,
    pub(super) phase: Phase,
    pub(super) death_cause: Option<DeathCause>,
    /// Cell the head tried to enter on a fatal collision
    pub(super) fatal_cell: Option<Cell>,
    pub(super) high_score: u32,
    pub(super) rng: SmallRng,
}

impl Arena {
    /// Validate the geometry and build the first episode.
    ///
    /// `high_score` is the persisted best the episode is compared against.
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ArenaError> {
        let geometry = Geometry::from_config(&config)?;
        if config.start_rate <= 0.0 || !config.start_rate.is_finite() {
            return Err(ArenaError::Config(format!(
                "start rate must be a positive number, got {}",
                config.start_rate
            )));
        }
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut arena = Self {
            snake: Snake::new(geometry.center(), config.start_len),
            tick_rate: config.start_rate,
            config,
            geometry,
            direction: None,
            empty: CellSet::new(),
            obstacles: HashSet::new(),
            food: None,
            score: 0,
            moves: 0,
            moves_since_last_score: 0,
            phase: Phase::NotStarted,
            death_cause: None,
            fatal_cell: None,
            high_score,
            rng,
        };
        arena.initialize();
        Ok(arena)
    }

    /// Lay out a fresh episode. The generator is not reseeded, so successive
    /// episodes differ while the whole run stays reproducible.
    fn initialize(&mut self) {
        let geometry = self.geometry;
        self.snake = Snake::new(geometry.center(), self.config.start_len);
        self.direction = None;

        self.empty = geometry.interior_cells().collect();
        let reserved: Vec<Cell> = geometry
            .start_cells()
            .into_iter()
            .filter(|cell| self.empty.remove(*cell))
            .collect();

        let available = self.empty.len();
        let requested = self.config.num_obstacles;
        if requested > available {
            warn!(requested, available, "obstacle request exceeds free cells; clamping");
        }

        self.obstacles = HashSet::with_capacity(requested.min(available));
        for _ in 0..requested.min(available) {
            if let Some(cell) = self.empty.choose(&mut self.rng) {
                self.empty.remove(cell);
                self.obstacles.insert(cell);
            }
        }

        for cell in reserved {
            self.empty.insert(cell);
        }
        // The head occupies the center from the start
        self.empty.remove(self.snake.head());

        self.food = self.empty.choose(&mut self.rng);
        self.score = 0;
        self.moves = 0;
        self.moves_since_last_score = 0;
        self.tick_rate = self.config.start_rate;
        self.phase = Phase::NotStarted;
        self.death_cause = None;
        self.fatal_cell = None;
    }

    /// Throw the episode away and start over. Legal from every phase; the
    /// only way out of [`Phase::Over`]. A new high score from the finished
    /// episode is carried over.
    pub fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.initialize();
    }

    /// Running <-> Paused. Has no effect in other phases.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn bounds(&self) -> Bounds {
        self.geometry.bounds()
    }

    pub fn square_size(&self) -> i32 {
        self.geometry.square_size()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn empty_cells(&self) -> &CellSet {
        &self.empty
    }

    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.empty.contains(cell)
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn moves_since_last_score(&self) -> u32 {
        self.moves_since_last_score
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    /// Where the episode ended: the cell a fatal move tried to enter, or
    /// the head otherwise
    pub fn final_position(&self) -> Cell {
        self.fatal_cell.unwrap_or_else(|| self.snake.head())
    }

    /// Best score known when this episode started
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once the current score beats the stored high score
    pub fn is_new_high_score(&self) -> bool {
        self.score > self.high_score
    }

    /// Check that empty cells, snake and obstacles partition the interior
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.geometry.interior_len());
        let all_unique = self
            .empty
            .iter()
            .chain(self.snake.cells())
            .chain(self.obstacles.iter().copied())
            .all(|cell| self.geometry.is_interior(cell) && seen.insert(cell));
        all_unique && seen.len() == self.geometry.interior_len()
    }

    /// Read-only projection handed to controllers
    pub fn view(&self) -> ArenaView<'_> {
        ArenaView { arena: self }
    }
}

/// What a controller is allowed to see of the arena
#[derive(Debug, Clone, Copy)]
pub struct ArenaView<'a> {
    arena: &'a Arena,
}

impl<'a> ArenaView<'a> {
    pub fn head(&self) -> Cell {
        self.arena.head()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.arena.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.arena.food
    }

    pub fn square_size(&self) -> i32 {
        self.arena.square_size()
    }

    pub fn bounds(&self) -> Bounds {
        self.arena.bounds()
    }

    pub fn phase(&self) -> Phase {
        self.arena.phase
    }

    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.arena.empty.contains(cell)
    }

    pub fn empty_cells(&self) -> &'a CellSet {
        &self.arena.empty
    }
}
