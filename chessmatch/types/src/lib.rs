/// The error taxonomy shared by the board, the pieces and the match.
pub mod error;
/// A boolean matrix over the board, used to report where a piece may move.
pub mod mask;
/// Enums for piece kinds, colors, and a struct for a chess piece.
pub mod piece;
/// Grid coordinates and algebraic chess coordinates, and the mapping between them.
pub mod position;
/// Board dimensions and the standard starting layout.
pub mod utils;

pub use error::*;
pub use mask::*;
pub use piece::*;
pub use position::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::mask::*;
    pub use crate::piece::*;
    pub use crate::position::*;
    pub use crate::utils::*;
}
