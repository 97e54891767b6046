use crate::game::{CellMark, Coordinate, GameEvent, Grid};

/// Where the displayed game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    /// Waiting for the first move
    Waiting,
    Playing,
    Over { final_score: u32, board_full: bool },
}

/// The display's copy of the game, rebuilt purely from engine events
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    marks: Vec<CellMark>,
    head: Option<Coordinate>,
    score: u32,
    top_score: u32,
    phase: BoardPhase,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            marks: vec![CellMark::Empty; grid.cell_count()],
            head: None,
            score: 0,
            top_score: 0,
            phase: BoardPhase::Waiting,
        }
    }

    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Cell { at, mark } => {
                let Some(index) = self.grid.index_of(at) else {
                    return;
                };
                self.marks[index] = mark;
                // Heads are always the most recent snake mark
                if mark == CellMark::Snake {
                    self.head = Some(at);
                } else if self.head == Some(at) {
                    self.head = None;
                }
            }
            GameEvent::Score(score) => self.score = score,
            GameEvent::TopScore(score) => self.top_score = score,
            GameEvent::Started => self.phase = BoardPhase::Playing,
            GameEvent::Ended {
                final_score,
                board_full,
            } => {
                self.phase = BoardPhase::Over {
                    final_score,
                    board_full,
                }
            }
            GameEvent::Reset => {
                self.marks.fill(CellMark::Empty);
                self.head = None;
                self.phase = BoardPhase::Waiting;
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn mark(&self, at: Coordinate) -> CellMark {
        self.grid
            .index_of(at)
            .map(|index| self.marks[index])
            .unwrap_or_default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn head(&self) -> Option<Coordinate> {
        self.head
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    /// Number of cells drawn as snake
    pub fn snake_cells(&self) -> usize {
        self.marks.iter().filter(|m| **m == CellMark::Snake).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine};
    use crate::score::Scoreboard;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cell_marks_and_head() {
        let grid = Grid::new(3, 3).unwrap();
        let mut board = Board::new(grid);
        board.apply_all([
            GameEvent::cell(Coordinate::new(0, 0), CellMark::Snake),
            GameEvent::cell(Coordinate::new(0, 1), CellMark::Snake),
            GameEvent::cell(Coordinate::new(2, 2), CellMark::Food),
        ]);

        assert_eq!(board.mark(Coordinate::new(0, 1)), CellMark::Snake);
        assert_eq!(board.mark(Coordinate::new(2, 2)), CellMark::Food);
        assert_eq!(board.mark(Coordinate::new(1, 1)), CellMark::Empty);
        assert_eq!(board.mark(Coordinate::new(-1, 1)), CellMark::Empty);
        assert_eq!(board.head(), Some(Coordinate::new(0, 1)));

        board.apply(GameEvent::cell(Coordinate::new(0, 1), CellMark::Empty));
        assert_eq!(board.head(), None);
    }

    #[test]
    fn test_phases() {
        let mut board = Board::new(Grid::new(2, 2).unwrap());
        assert_eq!(board.phase(), BoardPhase::Waiting);

        board.apply(GameEvent::Started);
        assert_eq!(board.phase(), BoardPhase::Playing);

        board.apply(GameEvent::Ended {
            final_score: 200,
            board_full: false,
        });
        assert_eq!(
            board.phase(),
            BoardPhase::Over {
                final_score: 200,
                board_full: false
            }
        );

        board.apply(GameEvent::cell(Coordinate::new(1, 1), CellMark::Snake));
        board.apply(GameEvent::Reset);
        assert_eq!(board.phase(), BoardPhase::Waiting);
        assert_eq!(board.snake_cells(), 0);
    }

    #[test]
    fn test_mirrors_engine() {
        let mut engine = GameEngine::with_rng(
            GameConfig::small(),
            Scoreboard::in_memory(),
            ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();
        let mut board = Board::new(*engine.grid());

        // Walk around a little, restarting along the way
        for (i, dir) in [Direction::Right, Direction::Down, Direction::Left]
            .iter()
            .cycle()
            .take(12)
            .enumerate()
        {
            engine.request_direction(*dir);
            engine.step().unwrap();
            if i == 6 {
                engine.restart().unwrap();
            }
            board.apply_all(engine.drain_events());

            let session = engine.session();
            for cell in engine.grid().cells() {
                let expected = if session.snake().is_occupied(cell) {
                    CellMark::Snake
                } else if session.food() == Some(cell) {
                    CellMark::Food
                } else {
                    CellMark::Empty
                };
                assert_eq!(board.mark(cell), expected, "{:?} after move {}", cell, i);
            }
            assert_eq!(board.score(), engine.score());
            assert_eq!(board.top_score(), engine.top_score());
        }
    }
}
