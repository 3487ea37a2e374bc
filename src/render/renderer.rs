use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{ConfigError, GameState, Palette, Phase, Position, parse_hex_color};
use crate::metrics::GameMetrics;

/// Palette resolved to terminal colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardColors {
    pub snake: Color,
    pub snake_head: Color,
    pub snake_border: Color,
    pub food: Color,
    pub food_border: Color,
    pub background: Color,
    pub border: Color,
}

impl BoardColors {
    pub fn from_palette(palette: &Palette) -> Result<Self, ConfigError> {
        let rgb = |hex: &str| parse_hex_color(hex).map(|(r, g, b)| Color::Rgb(r, g, b));

        Ok(Self {
            snake: rgb(&palette.snake)?,
            snake_head: rgb(&palette.snake_head)?,
            snake_border: rgb(&palette.snake_border)?,
            food: rgb(&palette.food)?,
            food_border: rgb(&palette.food_border)?,
            background: rgb(&palette.background)?,
            border: rgb(&palette.border)?,
        })
    }
}

pub struct Renderer {
    colors: BoardColors,
}

impl Renderer {
    pub fn new(palette: &Palette) -> Result<Self, ConfigError> {
        Ok(Self {
            colors: BoardColors::from_palette(palette)?,
        })
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_ended() {
            frame.render_widget(self.render_game_over(state), game_area);
        } else {
            frame.render_widget(self.render_grid(state), game_area);
        }

        frame.render_widget(self.render_controls(state.phase), chunks[2]);
    }

    /// Style a single cell. Each cell is two columns wide so the board looks square.
    fn cell(&self, state: &GameState, pos: Position) -> Span<'static> {
        if pos == state.snake.head() {
            Span::styled("██", Style::default().fg(self.colors.snake_head))
        } else if state.snake.collides_with_body(pos) {
            Span::styled(
                "▓▓",
                Style::default()
                    .fg(self.colors.snake)
                    .bg(self.colors.snake_border),
            )
        } else if pos == state.food {
            Span::styled(
                "◆◆",
                Style::default()
                    .fg(self.colors.food)
                    .bg(self.colors.food_border)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("  ", Style::default().bg(self.colors.background))
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..state.grid_height)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid_width)
                    .map(|x| self.cell(state, Position::new(x as i32, y as i32)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = match state.phase {
            Phase::Paused => " Snake (paused) ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(self.colors.border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(state.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let hint = |t: &'static str| Span::styled(t, Style::default().fg(Color::Gray));

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
        ];

        if let Some(reason) = state.end_reason {
            text.push(Line::from(hint(reason.describe())));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ]);

        if state.new_best {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                hint("Press "),
                key("N", Color::Green),
                hint(" to play again or "),
                key("Q", Color::Red),
                hint(" to quit"),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));

        let line = match phase {
            Phase::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Phase::Running | Phase::Paused => Line::from(vec![
                key("↑↓←→"),
                Span::raw(" or "),
                key("WASD"),
                Span::raw(" to move | "),
                key("Space"),
                Span::raw(if phase == Phase::Paused {
                    " to resume | "
                } else {
                    " to pause | "
                }),
                key("R"),
                Span::raw(" to reset | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Phase::Ended => Line::from(vec![
                key("N"),
                Span::raw(" or "),
                key("R"),
                Span::raw(" to play again | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EndReason, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(1, 1),
            10,
            10,
        )
    }

    fn draw(state: &GameState) -> String {
        let renderer = Renderer::new(&Palette::default()).unwrap();
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_palette_colors() {
        let colors = BoardColors::from_palette(&Palette::default()).unwrap();
        assert_eq!(colors.snake, Color::Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(colors.food, Color::Rgb(0xff, 0x44, 0x44));
        assert_eq!(colors.background, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_bad_palette_rejected() {
        let palette = Palette {
            food: "red".to_string(),
            ..Palette::default()
        };
        assert!(Renderer::new(&palette).is_err());
    }

    #[test]
    fn test_idle_screen() {
        let screen = draw(&state());
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("to start"));
        assert!(screen.contains("◆"));
        assert!(screen.contains("█"));
    }

    #[test]
    fn test_paused_title() {
        let mut state = state();
        state.phase = Phase::Paused;
        assert!(draw(&state).contains("Snake (paused)"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut state = state();
        state.phase = Phase::Ended;
        state.end_reason = Some(EndReason::Wall);
        state.score = 150;
        state.high_score = 150;
        state.new_best = true;

        let screen = draw(&state);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Hit the wall"));
        assert!(screen.contains("Final Score: 150"));
        assert!(screen.contains("New high score!"));
    }

    #[test]
    fn test_tied_score_is_not_a_new_best() {
        let mut state = state();
        state.phase = Phase::Ended;
        state.end_reason = Some(EndReason::SelfCollision);
        state.score = 100;
        state.high_score = 100;

        let screen = draw(&state);
        assert!(screen.contains("Final Score: 100"));
        assert!(!screen.contains("New high score!"));
    }
}
