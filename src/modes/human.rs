use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use super::pacing::{Pacer, SpeedMultiplier};
use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::control::{Controller, ManualController};
use crate::game::{Arena, GameConfig, Phase, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, HighScoreStore};
use crate::render::{HudInfo, Renderer};

pub struct HumanMode {
    arena: Arena,
    controller: ManualController,
    store: HighScoreStore,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    speed: SpeedMultiplier,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Result<Self> {
        let high_score = store.load()?;
        let arena = Arena::new(config, high_score).context("Invalid game configuration")?;

        Ok(Self {
            arena,
            controller: ManualController::new(),
            store,
            metrics: GameMetrics::new(high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            speed: SpeedMultiplier::X1,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_game_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut pacer = Pacer::new(self.speed, self.arena.tick_rate());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = pacer.tick() => {
                    self.update_game()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = HudInfo {
                        title: "Snake",
                        speed: self.speed,
                        controls: "↑↓←→ or WASD to move | R restart",
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
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if matches!(self.arena.phase(), Phase::NotStarted | Phase::Running) {
                    self.controller.push(direction);
                }
            }
            KeyAction::TogglePause => {
                self.arena.toggle_pause();
                self.controller.reset();
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Speed(speed) => self.speed = speed,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        if !matches!(self.arena.phase(), Phase::NotStarted | Phase::Running) {
            return Ok(());
        }

        let decision = self.controller.decide(&self.arena.view())?;
        if let StepResult::Ended(summary) = self.arena.advance(decision)? {
            self.metrics.on_game_over(&summary);
            if summary.new_high_score {
                self.store.save(summary.score)?;
            }
        }
        Ok(())
    }

    fn reset_game(&mut self) {
        info!(score = self.arena.score(), "restarting game");
        self.arena.restart();
        self.controller.reset();
        self.metrics.on_game_start();
    }
}
