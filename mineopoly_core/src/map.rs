use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Represents errors that can occur within the grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Position ({x}, {y}) is out of bounds for a board of size {size}")]
    OutOfBounds { x: usize, y: usize, size: usize },
}

/// A square 2D grid, the shape every Mineopoly board has.
///
/// Cells are stored in a flat vector, row-major with row 0 at `y == 0`.
/// Scans that feed nearest-point searches go through [`Grid::scan`], which
/// walks x outer and y inner; tie-breaking depends on that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a `size × size` grid filled with default values.
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn new(size: usize) -> Self
    where
        T: Default + Clone,
    {
        let len = size.checked_mul(size).expect("Grid size overflow");
        Grid {
            size,
            cells: vec![T::default(); len],
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y * self.size + position.x)
    }

    /// Checks if the position lies on the grid.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Gets the cell at `position`, or `None` when off the grid.
    pub fn get(&self, position: Position) -> Option<&T> {
        let index = self.index_of(position)?;
        self.cells.get(index)
    }

    /// Sets the value of the cell at `position`.
    pub fn set(&mut self, position: Position, value: T) -> Result<(), GridError> {
        let index = self.index_of(position).ok_or(GridError::OutOfBounds {
            x: position.x,
            y: position.y,
            size: self.size,
        })?;
        self.cells[index] = value;
        Ok(())
    }

    /// Yields `(position, &cell)` with x as the outer loop and y as the inner one.
    pub fn scan(&self) -> impl Iterator<Item = (Position, &T)> {
        let size = self.size;
        (0..size).flat_map(move |x| {
            (0..size).map(move |y| {
                let position = Position { x, y };
                (position, &self.cells[y * size + x])
            })
        })
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, position: Position) -> &Self::Output {
        match self.index_of(position) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}",
                position.x, position.y, self.size
            ),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        let size = self.size;
        match self.index_of(position) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}",
                position.x, position.y, size
            ),
        }
    }
}
