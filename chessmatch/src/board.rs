use std::fmt;

use anyhow::{bail, Result};
use arrayvec::ArrayVec;

use super::{
    ChessError, ChessPosition, Color, Grid, Piece, PieceKind, Position, BOARD_COLUMNS, BOARD_ROWS,
    MAX_PIECES,
};

/// Identifies one piece instance for the whole lifetime of a [`Board`].
///
/// Ids are never reused, so holding one is a safe way to refer to "that pawn" even after it
/// was captured or promoted away.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PieceId(usize);

impl PieceId {
    /// Returns this [`PieceId`] as a `usize`.
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A piece as tracked by a [`Board`]: what it is, where it stands, and how often it moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ChessPiece {
    piece: Piece,
    position: Option<Position>,
    move_count: u32,
}

impl ChessPiece {
    /// The `(variant, color)` of this piece.
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    pub const fn color(&self) -> Color {
        self.piece.color()
    }

    pub const fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    /// Grid position of this piece, or `None` if it is no longer on the board.
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Algebraic position of this piece, or `None` if it is no longer on the board.
    pub fn chess_position(&self) -> Option<ChessPosition> {
        self.position
            .and_then(|position| ChessPosition::from_position(position).ok())
    }

    /// Number of times this piece has moved. Zero means it may still take part in castling.
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns `true` if this piece is on the board.
    pub const fn is_on_board(&self) -> bool {
        self.position.is_some()
    }
}

impl fmt::Display for ChessPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece)
    }
}

/// All pieces of a match and the cells they stand on.
///
/// The [`Grid`] holds [`PieceId`]s; the pieces themselves live in an arena indexed by those
/// ids. [`Board::place`] and [`Board::remove`] are the only ways to move a piece, and both
/// update the grid and the piece's recorded position together.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Grid<PieceId>,
    pieces: Vec<ChessPiece>,
}

impl Board {
    /// Creates a new, empty 8x8 [`Board`].
    pub fn new() -> Self {
        Self {
            // Safe unwrap because a chess board always has a non-zero size
            grid: Grid::new(BOARD_ROWS, BOARD_COLUMNS).unwrap(),
            pieces: Vec::with_capacity(MAX_PIECES),
        }
    }

    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub const fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// Returns `true` if `position` is on this [`Board`].
    pub const fn contains(&self, position: Position) -> bool {
        self.grid.contains(position)
    }

    /// Creates a new piece and places it on `position`.
    pub fn add(&mut self, piece: Piece, position: Position) -> Result<PieceId> {
        if self.grid.is_occupied(position)? {
            bail!(ChessError::SquareOccupied(position));
        }

        let id = PieceId(self.pieces.len());
        self.pieces.push(ChessPiece {
            piece,
            position: None,
            move_count: 0,
        });
        self.place(id, position)?;

        Ok(id)
    }

    /// Puts an off-board piece on `position`. Fails if the cell is occupied.
    pub fn place(&mut self, id: PieceId, position: Position) -> Result<()> {
        self.grid.place(id, position)?;
        self.pieces[id.0].position = Some(position);
        Ok(())
    }

    /// Takes whatever piece stands on `position` off the board, returning its id.
    pub fn remove(&mut self, position: Position) -> Result<Option<PieceId>> {
        let removed = self.grid.remove(position)?;
        if let Some(id) = removed {
            self.pieces[id.0].position = None;
        }

        Ok(removed)
    }

    /// Fetches the id of the piece on `position`, failing if it lies off the board.
    pub fn id_at(&self, position: Position) -> Result<Option<PieceId>> {
        self.grid.at(position)
    }

    /// Fetches the piece on `position`, failing if it lies off the board.
    pub fn piece_at(&self, position: Position) -> Result<Option<Piece>> {
        Ok(self.id_at(position)?.map(|id| self.pieces[id.0].piece))
    }

    /// Fetches the piece on `position`, or `None` if it is empty or off the board.
    pub fn occupant(&self, position: Position) -> Option<&ChessPiece> {
        let id = self.grid.at(position).ok().flatten()?;
        Some(&self.pieces[id.0])
    }

    /// Returns `true` if `position` is on the board and empty.
    pub fn is_vacant(&self, position: Position) -> bool {
        self.contains(position) && self.occupant(position).is_none()
    }

    /// Returns `true` if `position` holds a piece of `color`'s opponent.
    pub fn is_opponent_at(&self, position: Position, color: Color) -> bool {
        self.occupant(position)
            .is_some_and(|piece| piece.color() != color)
    }

    /// Returns `true` if a piece of `color` could end its move on `position`: on the board, and
    /// either empty or held by the opponent.
    pub fn can_land(&self, position: Position, color: Color) -> bool {
        self.contains(position)
            && self
                .occupant(position)
                .map_or(true, |piece| piece.color() != color)
    }

    /// Fetches the piece known by `id`, whether or not it is still on the board.
    pub fn get(&self, id: PieceId) -> &ChessPiece {
        &self.pieces[id.0]
    }

    pub fn increase_move_count(&mut self, id: PieceId) {
        self.pieces[id.0].move_count += 1;
    }

    pub fn decrease_move_count(&mut self, id: PieceId) {
        let piece = &mut self.pieces[id.0];
        piece.move_count = piece.move_count.saturating_sub(1);
    }

    /// An iterator over every piece currently on the board.
    pub fn pieces_on_board(&self) -> impl Iterator<Item = (PieceId, &ChessPiece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.is_on_board())
            .map(|(i, piece)| (PieceId(i), piece))
    }

    /// Ids of every piece of `color` currently on the board.
    ///
    /// The list is a snapshot, so the board may be changed while walking it.
    pub fn ids_for(&self, color: Color) -> ArrayVec<PieceId, MAX_PIECES> {
        self.pieces_on_board()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(id, _)| id)
            .collect()
    }

    /// Position of `color`'s King, if there is one on the board.
    pub fn king(&self, color: Color) -> Option<Position> {
        self.pieces_on_board()
            .find(|(_, piece)| piece.piece() == Piece::new(color, PieceKind::King))
            .and_then(|(_, piece)| piece.position())
    }

    /// A read-only snapshot of which piece stands where.
    pub fn snapshot(&self) -> Grid<Piece> {
        self.grid.map(|id| self.pieces[id.0].piece)
    }

    /// Returns `true` if every occupied cell refers to a piece that records that very cell as
    /// its position, and every on-board piece is referenced by exactly its own cell.
    pub fn is_consistent(&self) -> bool {
        let cells_agree = self.grid.iter().all(|(position, id)| {
            id.map_or(true, |id| self.pieces[id.0].position == Some(position))
        });

        let pieces_agree = self.pieces_on_board().all(|(id, piece)| {
            piece
                .position()
                .is_some_and(|position| self.grid.at(position).ok().flatten() == Some(id))
        });

        cells_agree && pieces_agree
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.snapshot().to_rows().into_iter().enumerate() {
            write!(f, "{} ", self.rows() - row)?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, "- ")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "  ")?;
        for column in 0..self.columns() {
            write!(f, "{} ", (b'a' + column as u8) as char)?;
        }

        Ok(())
    }
}
