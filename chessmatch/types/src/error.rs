use thiserror::Error;

use super::{Color, Position};

/// Everything that can go wrong while building a board or playing a match.
///
/// Fallible operations return [`anyhow::Result`]; the reason can be recovered with
/// `err.downcast_ref::<ChessError>()`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ChessError {
    #[error("Error creating board: there must be at least 1 row and 1 column (got {rows}x{columns})")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Position {0:?} is not on the board")]
    OutOfBounds(Position),

    #[error("There is already a piece on position {0:?}")]
    SquareOccupied(Position),

    #[error("Error reading chess position {0:?}: valid values are from a1 to h8")]
    InvalidChessPosition(String),

    #[error("There is no piece on the source position")]
    EmptySource,

    #[error("The chosen piece is not yours")]
    NotYourPiece,

    #[error("There are no possible moves for the chosen piece")]
    NoPossibleMoves,

    #[error("The chosen piece can't move to the target position")]
    IllegalTarget,

    #[error("You can't put yourself in check")]
    SelfCheck,

    #[error("A promotion must be resolved before the next move")]
    PromotionPending,

    #[error("There is no piece to be promoted")]
    NoPendingPromotion,

    #[error("There is no {0} king on the board")]
    MissingKing(Color),
}

impl ChessError {
    /// Returns `true` if the match is left untouched by this error and the caller may simply try again.
    ///
    /// Only invariant violations are unrecoverable, since they mean the game state is corrupt.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{ChessError, Color};
    /// assert!(ChessError::SelfCheck.is_recoverable());
    /// assert!(!ChessError::MissingKing(Color::White).is_recoverable());
    /// ```
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingKing(_))
    }
}
