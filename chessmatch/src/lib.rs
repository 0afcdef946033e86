pub use types::*;

/// Pieces of a match and the cells they stand on, kept consistent with each other.
pub mod board;
/// High-level abstraction of a game of chess: turns, move validation, check and checkmate.
///
/// You probably want to look here.
pub mod game;
/// A bounds-checked, fixed-size matrix of cells.
pub mod grid;
/// Computes where each kind of piece may move, given a board.
pub mod movegen;

pub use board::*;
pub use game::*;
pub use grid::*;
pub use movegen::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::game::*;
    pub use crate::grid::*;
    pub use crate::movegen::*;
    pub use types::prelude::*;
}
