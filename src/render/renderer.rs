use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::board::{Board, BoardPhase};
use crate::game::{CellMark, Coordinate};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(board), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match board.phase() {
            BoardPhase::Over {
                final_score,
                board_full,
            } => frame.render_widget(
                self.render_game_over(final_score, board_full, board.top_score()),
                game_area,
            ),
            _ => frame.render_widget(self.render_grid(board), game_area),
        }

        frame.render_widget(self.render_controls(board.phase()), chunks[2]);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'static> {
        let grid = board.grid();
        let lines: Vec<Line> = (0..grid.rows() as i32)
            .map(|row| {
                let spans: Vec<Span> = (0..grid.cols() as i32)
                    .map(|col| {
                        let at = Coordinate::new(row, col);
                        match board.mark(at) {
                            CellMark::Snake if board.head() == Some(at) => Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            CellMark::Snake => {
                                Span::styled("□ ", Style::default().fg(Color::Green))
                            }
                            CellMark::Food => Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            CellMark::Empty => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, board: &Board) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                board.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Top: ", Style::default().fg(Color::Yellow)),
            Span::styled(board.top_score().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(board.snake_cells().to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        final_score: u32,
        board_full: bool,
        top_score: u32,
    ) -> Paragraph<'static> {
        let (title, title_color) = if board_full {
            ("BOARD CLEARED", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        if final_score > 0 && final_score == top_score {
            text.push(Line::from(vec![Span::styled(
                "New top score!",
                Style::default().fg(Color::Magenta),
            )]));
        }
        text.extend([
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
                .border_style(Style::default().fg(title_color)),
        )
    }

    fn render_controls(&self, phase: BoardPhase) -> Paragraph<'static> {
        let hint = match phase {
            BoardPhase::Waiting => " to start | ",
            _ => " to move | ",
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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
