//! Watch an automated controller play in the terminal
//!
//! # Controls
//!
//! - **Esc / Space**: pause or resume
//! - **R**: restart the current episode
//! - **1-5**: speed x1, x3, x5, x10, unlimited
//! - **Q**: quit
//!
//! Episodes restart on their own once they end.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

use super::pacing::{Pacer, SpeedMultiplier};
use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::control::Controller;
use crate::game::{Arena, GameConfig, Phase, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer};

pub struct WatchMode<C: Controller> {
    arena: Arena,
    controller: C,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    title: String,
    speed: SpeedMultiplier,
    should_quit: bool,
    episode_count: usize,
}

impl<C: Controller> WatchMode<C> {
    pub fn new(config: GameConfig, controller: C) -> Result<Self> {
        let arena = Arena::new(config, 0).context("Invalid game configuration")?;
        let title = format!("Watching {} controller", controller.kind());

        Ok(Self {
            arena,
            controller,
            metrics: GameMetrics::default(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            title,
            speed: SpeedMultiplier::X1,
            should_quit: false,
            episode_count: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_watch_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut pacer = Pacer::new(self.speed, self.arena.tick_rate());
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = pacer.tick() => {
                    self.step()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let title = format!("{} | episode {}", self.title, self.episode_count + 1);
                    let hud = HudInfo {
                        title: &title,
                        speed: self.speed,
                        controls: "R restart",
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.arena, &self.metrics, hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
            pacer.retune(self.speed, self.arena.tick_rate());
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::TogglePause => self.arena.toggle_pause(),
            KeyAction::Restart => self.restart(),
            KeyAction::Speed(speed) => self.speed = speed,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Steer(_) | KeyAction::None => {}
        }
    }

    /// One tick: auto-restart a finished episode, otherwise let the
    /// controller move
    fn step(&mut self) -> Result<()> {
        if self.arena.is_over() {
            self.restart();
            return Ok(());
        }
        if self.arena.phase() == Phase::Paused {
            return Ok(());
        }

        let decision = self.controller.decide(&self.arena.view())?;
        if let StepResult::Ended(summary) = self.arena.advance(decision)? {
            debug!(
                episode = self.episode_count,
                score = summary.score,
                cause = %summary.cause,
                "watched episode ended"
            );
            self.metrics.on_game_over(&summary);
        }
        Ok(())
    }

    fn restart(&mut self) {
        self.arena.restart();
        self.controller.reset();
        self.metrics.on_game_start();
        self.episode_count += 1;
    }
}
