use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Arena, Cell, Phase};
use crate::metrics::GameMetrics;
use crate::modes::SpeedMultiplier;

/// What the status strip should show besides the arena itself
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub title: &'a str,
    pub speed: SpeedMultiplier,
    /// Footer hint, e.g. the steering keys for a human player
    pub controls: &'a str,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, arena: &Arena, metrics: &GameMetrics, hud: HudInfo<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status strip
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(arena, metrics, hud), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if arena.is_over() {
            frame.render_widget(self.render_game_over(arena, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(arena, hud), game_area);
        }

        frame.render_widget(self.render_controls(hud), chunks[2]);
    }

    fn render_grid(&self, arena: &Arena, hud: HudInfo<'_>) -> Paragraph<'_> {
        let geometry = arena.geometry();
        let bounds = geometry.bounds();
        let sq = geometry.square_size();
        let body: HashSet<Cell> = arena.snake().cells().collect();
        let head = arena.head();
        let food = arena.food();

        let mut lines = Vec::new();
        for y in (bounds.y_top..=bounds.y_bottom).step_by(sq as usize) {
            let mut spans = Vec::new();
            for x in (bounds.x_left..=bounds.x_right).step_by(sq as usize) {
                let cell = Cell::new(x, y);
                let span = if geometry.is_border(cell) {
                    Span::styled("█▌", Style::default().fg(Color::Gray))
                } else if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if arena.obstacles().contains(&cell) {
                    Span::styled("▒ ", Style::default().fg(Color::Magenta))
                } else if Some(cell) == food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        let (title, title_style) = match arena.phase() {
            Phase::NotStarted => (
                " Press a direction to start ".to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Phase::Paused => (
                " PAUSED - Esc to resume ".to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            _ => (format!(" {} ", hud.title), Style::default().fg(Color::White)),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(Span::styled(title, title_style)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, arena: &Arena, metrics: &GameMetrics, hud: HudInfo<'_>) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(arena.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{:.1}/s {}", arena.tick_rate(), hud.speed),
                value,
            ),
            Span::raw("    "),
            Span::styled("High score: ", label),
            Span::styled(metrics.high_score.max(arena.score()).to_string(), value),
            Span::raw("    "),
            Span::styled("Moves: ", label),
            Span::styled(arena.moves().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, arena: &Arena, metrics: &GameMetrics) -> Paragraph<'_> {
        let cause = arena
            .death_cause()
            .map(|cause| cause.describe())
            .unwrap_or("game over");

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                cause.to_string(),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
        ];

        if arena.is_new_high_score() {
            text.push(Line::from(vec![Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.extend([
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    arena.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total Moves: ", Style::default().fg(Color::Yellow)),
                Span::styled(arena.moves().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![Span::styled(
                metrics.format_causes(),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, hud: HudInfo<'_>) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(hud.controls.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("1-5", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
