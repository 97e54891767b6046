use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{error::GameError, grid::Grid};

/// Largest accepted row or column count
pub const MAX_GRID_SIDE: usize = 200;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Points awarded for each food eaten
    pub food_reward: u32,
    /// Period between ticks while the game is running
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            food_reward: 100,
            tick_interval_ms: 150,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn grid(&self) -> Result<Grid, GameError> {
        if self.rows > MAX_GRID_SIDE || self.cols > MAX_GRID_SIDE {
            return Err(GameError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_GRID_SIDE,
            });
        }
        Grid::new(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.grid().map(|_| ())
    }
}
