use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{ChessError, BOARD_COLUMNS, BOARD_ROWS};

/// A cell address on a grid, as a zero-based `(row, column)` pair.
///
/// Row `0` is the top of the board, which is the eighth rank in chess.
///
/// A [`Position`] may lie outside of any board, which is what makes offset arithmetic during
/// move generation convenient. Whether it is valid is up to the grid being indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: i32,
    column: i32,
}

impl Position {
    /// Creates a new [`Position`] from a row and a column.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Fetches the row of this [`Position`].
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Fetches the column of this [`Position`].
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Returns the [`Position`] `rows` rows and `columns` columns away from this one.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::Position;
    /// let p = Position::new(6, 4);
    /// assert_eq!(p.offset(-2, 0), Position::new(4, 4));
    /// assert_eq!(p.offset(2, -5), Position::new(8, -1));
    /// ```
    pub const fn offset(&self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }

    /// Returns `true` if this [`Position`] lies on a grid of `rows` by `columns` cells.
    pub const fn is_within(&self, rows: usize, columns: usize) -> bool {
        self.row >= 0
            && self.column >= 0
            && (self.row as usize) < rows
            && (self.column as usize) < columns
    }

    /// Returns the flat, row-major index of this [`Position`] on a grid `columns` cells wide.
    ///
    /// Only meaningful if [`Position::is_within`] holds.
    pub const fn index(&self, columns: usize) -> usize {
        self.row as usize * columns + self.column as usize
    }

    /// An iterator over every [`Position`] of a `rows` by `columns` grid, in row-major order.
    pub fn iter(rows: usize, columns: usize) -> impl Iterator<Item = Self> {
        (0..rows as i32)
            .flat_map(move |row| (0..columns as i32).map(move |column| Self::new(row, column)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A square in algebraic chess notation: a column letter `a..=h` and a row number `1..=8`.
///
/// This is the coordinate players type and read. It converts to and from a grid [`Position`] by
/// `row = 8 - rank` and `column = file - 'a'`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChessPosition {
    column: char,
    row: u8,
}

impl ChessPosition {
    /// Creates a new [`ChessPosition`], failing if it lies outside of `a1..=h8`.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::ChessPosition;
    /// assert!(ChessPosition::new('e', 4).is_ok());
    /// assert!(ChessPosition::new('i', 4).is_err());
    /// assert!(ChessPosition::new('a', 0).is_err());
    /// ```
    pub fn new(column: char, row: u8) -> Result<Self> {
        let last_column = (b'a' + BOARD_COLUMNS as u8 - 1) as char;
        if !('a'..=last_column).contains(&column) || !(1..=BOARD_ROWS as u8).contains(&row) {
            bail!(ChessError::InvalidChessPosition(format!("{column}{row}")));
        }

        Ok(Self { column, row })
    }

    /// Fetches the column letter of this [`ChessPosition`].
    pub const fn column(&self) -> char {
        self.column
    }

    /// Fetches the row number of this [`ChessPosition`].
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Converts this [`ChessPosition`] into a grid [`Position`].
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{ChessPosition, Position};
    /// let a8 = ChessPosition::new('a', 8).unwrap();
    /// assert_eq!(a8.to_position(), Position::new(0, 0));
    /// let e2 = ChessPosition::new('e', 2).unwrap();
    /// assert_eq!(e2.to_position(), Position::new(6, 4));
    /// ```
    pub const fn to_position(&self) -> Position {
        Position::new(
            BOARD_ROWS as i32 - self.row as i32,
            self.column as i32 - 'a' as i32,
        )
    }

    /// Converts a grid [`Position`] into a [`ChessPosition`], failing if it lies off the board.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{ChessPosition, Position};
    /// let h1 = ChessPosition::from_position(Position::new(7, 7)).unwrap();
    /// assert_eq!(h1.to_string(), "h1");
    /// assert!(ChessPosition::from_position(Position::new(8, 0)).is_err());
    /// ```
    pub fn from_position(position: Position) -> Result<Self> {
        if !position.is_within(BOARD_ROWS, BOARD_COLUMNS) {
            bail!(ChessError::OutOfBounds(position));
        }

        let column = (b'a' + position.column() as u8) as char;
        let row = (BOARD_ROWS as i32 - position.row()) as u8;
        Self::new(column, row)
    }

    /// Parses a [`ChessPosition`] from exactly one letter followed by exactly one digit.
    ///
    /// Surrounding whitespace is ignored and the letter is case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::ChessPosition;
    /// let e4 = ChessPosition::from_algebraic("e4").unwrap();
    /// assert_eq!(e4.column(), 'e');
    /// assert_eq!(e4.row(), 4);
    /// assert_eq!(ChessPosition::from_algebraic(" E4 \n").unwrap(), e4);
    /// assert!(ChessPosition::from_algebraic("e 4").is_err());
    /// assert!(ChessPosition::from_algebraic("e10").is_err());
    /// assert!(ChessPosition::from_algebraic("4e").is_err());
    /// ```
    pub fn from_algebraic(algebraic: &str) -> Result<Self> {
        let mut chars = algebraic.trim().chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!(ChessError::InvalidChessPosition(algebraic.to_string()));
        };

        let Some(row) = row.to_digit(10) else {
            bail!(ChessError::InvalidChessPosition(algebraic.to_string()));
        };

        Self::new(column.to_ascii_lowercase(), row as u8)
    }
}

impl FromStr for ChessPosition {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<Position> for ChessPosition {
    type Error = anyhow::Error;
    fn try_from(value: Position) -> std::result::Result<Self, Self::Error> {
        Self::from_position(value)
    }
}

impl From<ChessPosition> for Position {
    fn from(value: ChessPosition) -> Self {
        value.to_position()
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
