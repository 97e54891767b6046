pub mod human;

pub use human::{HumanMode, TickSource};
