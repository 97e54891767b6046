use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The engine broke one of the snake's structural rules. Always a bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// Every cell is covered by the snake, so no food can be placed
    #[error("all cells are occupied")]
    AllCellsOccupied,

    #[error("invalid grid dimensions {rows}x{cols}: both must be positive")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("grid {rows}x{cols} is too large: at most {max} cells per side")]
    GridTooLarge { rows: usize, cols: usize, max: usize },
}
