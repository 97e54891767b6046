pub mod board;
pub mod renderer;

pub use board::{Board, BoardPhase};
pub use renderer::Renderer;
