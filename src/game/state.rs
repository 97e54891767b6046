use std::collections::VecDeque;

use super::{
    action::{Direction, DirectionController},
    error::GameError,
    grid::{Coordinate, Grid},
};

/// The snake's body, stored tail first.
///
/// Membership is answered from a flat occupancy grid, so `is_occupied` never
/// scans the body. The two structures are only changed together, through
/// [`Snake::add_head`] and [`Snake::remove_tail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    grid: Grid,
    /// Body segments, tail at the front and head at the back
    body: VecDeque<Coordinate>,
    occupied: Vec<bool>,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(grid: Grid, start: Coordinate) -> Result<Self, GameError> {
        Self::from_segments(grid, [start])
    }

    /// Build a snake from segments ordered tail to head
    pub fn from_segments(
        grid: Grid,
        segments: impl IntoIterator<Item = Coordinate>,
    ) -> Result<Self, GameError> {
        let mut snake = Self {
            grid,
            body: VecDeque::new(),
            occupied: vec![false; grid.cell_count()],
        };
        for segment in segments {
            snake.add_head(segment)?;
        }
        if snake.body.is_empty() {
            return Err(GameError::InvariantViolation("snake needs at least one segment"));
        }
        Ok(snake)
    }

    /// Append a new head. The caller must have ruled out a collision first.
    pub fn add_head(&mut self, c: Coordinate) -> Result<(), GameError> {
        let index = self
            .grid
            .index_of(c)
            .ok_or(GameError::InvariantViolation("head placed outside the grid"))?;
        if self.occupied[index] {
            return Err(GameError::InvariantViolation("head placed on the body"));
        }
        self.occupied[index] = true;
        self.body.push_back(c);
        Ok(())
    }

    /// Drop and return the tail segment
    pub fn remove_tail(&mut self) -> Result<Coordinate, GameError> {
        if self.body.len() <= 1 {
            return Err(GameError::InvariantViolation(
                "cannot remove the tail of a single-segment snake",
            ));
        }
        let tail = self
            .body
            .pop_front()
            .ok_or(GameError::InvariantViolation("snake has no segments"))?;
        if let Some(index) = self.grid.index_of(tail) {
            self.occupied[index] = false;
        }
        Ok(tail)
    }

    pub fn is_occupied(&self, c: Coordinate) -> bool {
        self.grid
            .index_of(c)
            .is_some_and(|index| self.occupied[index])
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Get the head position
    pub fn head(&self) -> Coordinate {
        // body is never empty once constructed
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Coordinate {
        self.body[0]
    }

    /// Segments from tail to head
    pub fn segments(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True when the body covers every cell of the grid
    pub fn fills_grid(&self) -> bool {
        self.body.len() == self.grid.cell_count()
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Snake placed, waiting for the first direction
    #[default]
    Idle,
    /// Ticking
    Running,
    /// Collision happened; waits for a restart
    Ended,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Everything that changes during one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) snake: Snake,
    pub(crate) food: Option<Coordinate>,
    pub(crate) score: u32,
    pub(crate) status: GameStatus,
    pub(crate) controller: DirectionController,
    pub(crate) pending_growth: bool,
}

impl GameSession {
    /// Create a new idle session
    pub fn new(snake: Snake, food: Option<Coordinate>) -> Self {
        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Idle,
            controller: DirectionController::new(),
            pending_growth: false,
        }
    }

    /// Same session with a score already on the board
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coordinate> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn direction(&self) -> Option<Direction> {
        self.controller.current()
    }
}
