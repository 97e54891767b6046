//! Grid Snake - a tick-driven Snake engine with a terminal front end
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, food, direction buffering and the engine
//! - Top score tracking with pluggable storage (score module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod score;
