use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

use crate::game::{Cell, GameState, Winner};
use crate::metrics::GameMetrics;

/// What occupies one board square, in paint order (later wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Glyph {
    Empty,
    Obstacle,
    Food,
    AiBody,
    UserBody,
    AiHead,
    UserHead,
}

impl Glyph {
    fn span(self) -> Span<'static> {
        match self {
            Glyph::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            Glyph::Obstacle => Span::styled("# ", Style::default().fg(Color::Magenta)),
            Glyph::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Glyph::AiBody => Span::styled("□ ", Style::default().fg(Color::Yellow)),
            Glyph::AiHead => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Glyph::UserBody => Span::styled("□ ", Style::default().fg(Color::Green)),
            Glyph::UserHead => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Project the round onto a row-major board of glyphs.
///
/// Positions that are not cell-aligned are drawn in the cell that covers
/// them; anything off the board is skipped.
pub fn board_glyphs(state: &GameState) -> Vec<Vec<Glyph>> {
    let grid = state.grid;
    let mut board = vec![vec![Glyph::Empty; grid.width() as usize]; grid.height() as usize];

    let mut paint = |cell: Cell, glyph: Glyph| {
        if let Some((col, row)) = grid.index_of(cell) {
            let square = &mut board[row][col];
            *square = (*square).max(glyph);
        }
    };

    for obstacle in &state.obstacles {
        paint(*obstacle, Glyph::Obstacle);
    }
    paint(state.food, Glyph::Food);
    for segment in state.ai.body_segments() {
        paint(*segment, Glyph::AiBody);
    }
    for segment in state.user.body_segments() {
        paint(*segment, Glyph::UserBody);
    }
    paint(state.ai.head(), Glyph::AiHead);
    paint(state.user.head(), Glyph::UserHead);

    board
}

/// Banner shown once a round is over
pub fn game_over_text(winner: Winner) -> String {
    match winner {
        Winner::Draw => "Game Over!!! It's a Draw!".to_string(),
        winner => format!("Game Over!!! {winner} Wins!"),
    }
}

/// Draws a read-only view of the round
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        round_duration: Duration,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, round_duration), chunks[0]);
        frame.render_widget(self.render_board(state), chunks[1]);
        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'static> {
        let mut lines: Vec<Line> = board_glyphs(state)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Glyph::span).collect::<Vec<_>>()))
            .collect();

        let mut border = Style::default().fg(Color::White);
        if let Some(winner) = state.winner() {
            border = Style::default().fg(Color::Red);
            let banner = Line::from(Span::styled(
                game_over_text(winner),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
            // Overlay the banner across the middle of the board
            let middle = lines.len() / 2;
            if middle < lines.len() {
                lines[middle] = banner;
            } else {
                lines.push(banner);
            }
            if let Some(cause) = state.end_cause {
                let reason = Line::from(Span::styled(
                    cause.to_string(),
                    Style::default().fg(Color::Gray),
                ));
                if middle + 1 < lines.len() {
                    lines[middle + 1] = reason;
                } else {
                    lines.push(reason);
                }
            }
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(border)
                    .title(" Snake Game "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        round_duration: Duration,
    ) -> Paragraph<'static> {
        let time_left = if state.is_active() {
            metrics.time_left(round_duration)
        } else {
            Duration::ZERO
        };

        let text = vec![Line::from(vec![
            Span::styled("User Score: ", Style::default().fg(Color::Green)),
            Span::styled(
                state.score.user.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  "),
            Span::styled("AI Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.ai.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  "),
            Span::styled("Time left: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                GameMetrics::format_time(time_left),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
        ];
        if !state.is_active() {
            spans.push(Span::styled("R", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" new round | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Grid, RoundState, Snake};
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_state() -> GameState {
        GameState::new(
            Grid::new(30, 30, 20),
            Snake::new(vec![Cell::new(100, 100), Cell::new(90, 100)], Direction::Right),
            Snake::new(vec![Cell::new(200, 200), Cell::new(190, 200)], Direction::Right),
            vec![Cell::new(0, 0), Cell::new(580, 580)],
            Cell::new(300, 40),
        )
    }

    fn draw(state: &GameState) -> String {
        let backend = TestBackend::new(70, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                Renderer::new().render(frame, state, &GameMetrics::new(), Duration::from_secs(60))
            })
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
    fn test_board_projection() {
        let board = board_glyphs(&sample_state());

        assert_eq!(board.len(), 30);
        assert_eq!(board[0].len(), 30);
        assert_eq!(board[5][5], Glyph::UserHead);
        // (90, 100) sits inside column 4
        assert_eq!(board[5][4], Glyph::UserBody);
        assert_eq!(board[10][10], Glyph::AiHead);
        assert_eq!(board[10][9], Glyph::AiBody);
        assert_eq!(board[2][15], Glyph::Food);
        assert_eq!(board[0][0], Glyph::Obstacle);
        assert_eq!(board[29][29], Glyph::Obstacle);
        assert_eq!(board[15][15], Glyph::Empty);
    }

    #[test]
    fn test_heads_paint_over_obstacles() {
        let mut state = sample_state();
        state.obstacles.push(Cell::new(100, 100));
        assert_eq!(board_glyphs(&state)[5][5], Glyph::UserHead);
    }

    #[test]
    fn test_game_over_text() {
        assert_eq!(game_over_text(Winner::User), "Game Over!!! User Wins!");
        assert_eq!(game_over_text(Winner::Ai), "Game Over!!! AI Wins!");
        assert_eq!(game_over_text(Winner::Draw), "Game Over!!! It's a Draw!");
    }

    #[test]
    fn test_render_active_round() {
        let screen = draw(&sample_state());
        assert!(screen.contains("User Score: 0"));
        assert!(screen.contains("AI Score: 0"));
        assert!(screen.contains("Time left: 01:00"));
        assert!(!screen.contains("Game Over"));
    }

    #[test]
    fn test_render_ended_round() {
        let mut state = sample_state();
        state.score.ai = 3;
        state.round = RoundState::Ended(Winner::Ai);

        let screen = draw(&state);
        assert!(screen.contains("AI Score: 3"));
        assert!(screen.contains("Game Over!!! AI Wins!"));
        assert!(screen.contains("Time left: 00:00"));
    }
}
