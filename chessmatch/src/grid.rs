use anyhow::{bail, Result};

use super::{ChessError, Position};

/// A fixed-size, row-major matrix of optional cell contents, with bounds checking.
///
/// A [`Grid`] knows nothing about chess. It only guarantees that every access is on the
/// board and that a cell is never silently overwritten: callers must [`Grid::remove`] before
/// they [`Grid::place`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy> Grid<T> {
    /// Creates a new, empty [`Grid`], failing if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows < 1 || columns < 1 {
            bail!(ChessError::InvalidDimensions { rows, columns });
        }

        Ok(Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        })
    }

    /// Number of rows in this [`Grid`].
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in this [`Grid`].
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` if `position` lies on this [`Grid`].
    pub const fn contains(&self, position: Position) -> bool {
        position.is_within(self.rows, self.columns)
    }

    /// Fetches whatever occupies `position`, failing if it lies off the grid.
    pub fn at(&self, position: Position) -> Result<Option<T>> {
        Ok(self.cells[self.index_of(position)?])
    }

    /// Returns `true` if something occupies `position`, failing if it lies off the grid.
    pub fn is_occupied(&self, position: Position) -> Result<bool> {
        Ok(self.at(position)?.is_some())
    }

    /// Puts `value` on `position`.
    ///
    /// Fails if `position` lies off the grid or is already occupied.
    pub fn place(&mut self, value: T, position: Position) -> Result<()> {
        let index = self.index_of(position)?;
        if self.cells[index].is_some() {
            bail!(ChessError::SquareOccupied(position));
        }

        self.cells[index] = Some(value);
        Ok(())
    }

    /// Clears `position`, returning whatever occupied it.
    ///
    /// Fails only if `position` lies off the grid. Removing from an empty cell yields `None`.
    pub fn remove(&mut self, position: Position) -> Result<Option<T>> {
        let index = self.index_of(position)?;
        Ok(self.cells[index].take())
    }

    /// An iterator over every cell of this [`Grid`] and its contents, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<T>)> + '_ {
        Position::iter(self.rows, self.columns).zip(self.cells.iter().copied())
    }

    /// Applies `f` to every cell, producing a grid of the same shape.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(|cell| cell.map(&mut f)).collect(),
        }
    }

    /// Copies this [`Grid`] into nested rows, `grid[row][column]`.
    pub fn to_rows(&self) -> Vec<Vec<Option<T>>> {
        self.cells.chunks(self.columns).map(|row| row.to_vec()).collect()
    }

    fn index_of(&self, position: Position) -> Result<usize> {
        if !self.contains(position) {
            bail!(ChessError::OutOfBounds(position));
        }

        Ok(position.index(self.columns))
    }
}
