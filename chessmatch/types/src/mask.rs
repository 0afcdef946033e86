use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

use super::Position;

/// A `rows × columns` matrix of booleans, one per board cell.
///
/// Move generation marks every cell a piece could move to next. Marks only ever get set, so
/// combining the results of several directions is a logical OR.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MoveMask {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl MoveMask {
    /// Creates an empty [`MoveMask`] of the given dimensions.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::MoveMask;
    /// let mask = MoveMask::new(8, 8);
    /// assert!(mask.is_empty());
    /// assert_eq!(mask.population(), 0);
    /// ```
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Number of rows in this [`MoveMask`].
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in this [`MoveMask`].
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` if `position` is marked. Positions off the matrix are never marked.
    pub fn get(&self, position: Position) -> bool {
        position.is_within(self.rows, self.columns) && self.cells[position.index(self.columns)]
    }

    /// Marks `position`. Positions off the matrix are ignored.
    ///
    /// # Example
    /// ```
    /// # use chessmatch_types::{MoveMask, Position};
    /// let mut mask = MoveMask::new(8, 8);
    /// mask.set(Position::new(4, 4));
    /// mask.set(Position::new(-1, 4));
    /// assert!(mask.get(Position::new(4, 4)));
    /// assert_eq!(mask.population(), 1);
    /// ```
    pub fn set(&mut self, position: Position) {
        if position.is_within(self.rows, self.columns) {
            let index = position.index(self.columns);
            self.cells[index] = true;
        }
    }

    /// Returns `true` if at least one cell is marked.
    pub fn is_nonempty(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    /// Returns `true` if no cell is marked.
    pub fn is_empty(&self) -> bool {
        !self.is_nonempty()
    }

    /// Number of marked cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// An iterator over all marked [`Position`]s, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::iter(self.rows, self.columns).filter(|&position| self.get(position))
    }

    /// Copies this [`MoveMask`] into nested rows, `mask[row][column]`.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.to_vec())
            .collect()
    }
}

impl BitOrAssign<&MoveMask> for MoveMask {
    fn bitor_assign(&mut self, rhs: &MoveMask) {
        debug_assert_eq!(
            (self.rows, self.columns),
            (rhs.rows, rhs.columns),
            "Cannot combine masks of different dimensions"
        );

        for (cell, &other) in self.cells.iter_mut().zip(rhs.cells.iter()) {
            *cell |= other;
        }
    }
}

impl BitOr<&MoveMask> for MoveMask {
    type Output = Self;
    fn bitor(mut self, rhs: &MoveMask) -> Self::Output {
        self |= rhs;
        self
    }
}

impl fmt::Display for MoveMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let line = row
                .iter()
                .map(|&cell| if cell { "X" } else { "." })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MoveMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveMask({:?}):\n{self}", self.iter().collect::<Vec<_>>())
    }
}
