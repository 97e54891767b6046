//! Notifications emitted by the engine for its collaborators.
//!
//! The engine never draws or schedules anything itself. After each mutation it
//! queues events describing what changed; the host drains them and updates its
//! display and tick source accordingly.

use super::grid::Coordinate;

/// What a cell should be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMark {
    #[default]
    Empty,
    Snake,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A cell changed appearance
    Cell { at: Coordinate, mark: CellMark },
    /// Current score changed
    Score(u32),
    /// Best score changed
    TopScore(u32),
    /// The snake started moving; begin ticking
    Started,
    /// The game is over; stop ticking
    Ended {
        final_score: u32,
        /// The snake had filled the grid before it crashed
        board_full: bool,
    },
    /// The old game was torn down; stop ticking and forget every mark
    Reset,
}

impl GameEvent {
    pub fn cell(at: Coordinate, mark: CellMark) -> Self {
        GameEvent::Cell { at, mark }
    }
}
