//! Best-score tracking and persistence

pub mod scoreboard;
pub mod store;

pub use scoreboard::Scoreboard;
pub use store::{FileStore, MemoryStore, TopScoreStore};
