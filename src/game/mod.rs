//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is stepped by its host and reports changes as events, so it can be
//! driven by a terminal loop or directly by tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, DirectionController, Turn};
pub use config::{GameConfig, MAX_GRID_SIDE};
pub use engine::{GameEngine, StepOutcome};
pub use error::GameError;
pub use events::{CellMark, GameEvent};
pub use grid::{Coordinate, Grid};
pub use state::{CollisionKind, GameSession, GameStatus, Snake};
