use std::fmt;

use anyhow::{bail, Result};

use super::BOARD_ROWS;

/// Represents the color of a player or a piece.
///
/// White always moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An iterator over both colors, starting with White.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this [`Color`] is White.
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Row offset of a single pawn step for this [`Color`].
    ///
    /// Row `0` is the eighth rank, so White pawns walk towards smaller rows.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::Color;
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    pub const fn forward(&self) -> i32 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Grid row holding this [`Color`]'s back rank (Kings, Queens, Rooks, ...).
    pub const fn back_row(&self) -> i32 {
        match self {
            Self::White => BOARD_ROWS as i32 - 1,
            Self::Black => 0,
        }
    }

    /// Grid row this [`Color`]'s pawns start on.
    pub const fn pawn_row(&self) -> i32 {
        self.back_row() + self.forward()
    }

    /// Grid row on which this [`Color`]'s pawns are promoted.
    pub const fn promotion_row(&self) -> i32 {
        self.opponent().back_row()
    }

    /// Grid row this [`Color`]'s pawns must stand on to capture en passant.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::Color;
    /// // The fifth rank for White, the fourth rank for Black
    /// assert_eq!(Color::White.en_passant_row(), 3);
    /// assert_eq!(Color::Black.en_passant_row(), 4);
    /// ```
    pub const fn en_passant_row(&self) -> i32 {
        self.opponent().pawn_row() + 2 * self.opponent().forward()
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::Color;
    /// assert_eq!(Color::Black.name(), "Black");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "variant") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The four kinds a pawn may be promoted to.
    pub const fn promotions() -> [Self; 4] {
        use PieceKind::*;
        [Bishop, Knight, Rook, Queen]
    }

    /// Creates a new [`PieceKind`] from its algebraic letter (`P N B R Q K`), case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::PieceKind;
    /// assert_eq!(PieceKind::from_char('n').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Parses a promotion code: one of `B`, `N`, `R`, `Q` (case-insensitive).
    ///
    /// Any other code yields `None`.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::PieceKind;
    /// assert_eq!(PieceKind::from_promotion_code('Q'), Some(PieceKind::Queen));
    /// assert_eq!(PieceKind::from_promotion_code('k'), None);
    /// ```
    pub fn from_promotion_code(code: char) -> Option<Self> {
        Self::from_char(code)
            .ok()
            .filter(|kind| Self::promotions().contains(kind))
    }

    /// Converts this [`PieceKind`] to its uppercase algebraic letter.
    pub const fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A chess piece: a [`PieceKind`] of a given [`Color`].
///
/// This is the read-only `(variant, color)` view handed out to renderers; where the piece
/// stands and how often it moved is tracked by the board that owns it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{Piece, Color, PieceKind};
    /// let black_knight = Piece::new(Color::Black, PieceKind::Knight);
    /// assert_eq!(black_knight.to_string(), "n");
    /// ```
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this [`Piece`] is a King.
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a [`Piece`] of the same [`Color`] but of kind `promotion`.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{Piece, PieceKind};
    /// let queen = Piece::WHITE_PAWN.promoted(PieceKind::Queen);
    /// assert_eq!(queen, Piece::WHITE_QUEEN);
    /// ```
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::new(self.color, promotion)
    }

    /// Converts this [`Piece`] into its letter: uppercase for White, lowercase for Black.
    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.to_char(),
            Color::Black => self.kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
