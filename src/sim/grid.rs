//! Grid primitives: cells and movement directions.

use serde::{Deserialize, Serialize};

/// A cell on the game grid, `(row, col)` with `(0, 0)` at the top-left.
///
/// Coordinates are signed so that a candidate head one step past the edge is
/// representable; anything outside `[0, size)` is a wall hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighboring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Whether the cell lies inside a `size` x `size` grid.
    pub fn in_bounds(&self, size: i32) -> bool {
        self.row >= 0 && self.row < size && self.col >= 0 && self.col < size
    }
}

/// Movement direction, one of the four grid-aligned unit vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row/column delta for one step in this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The exact reverse of this direction.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning from `self` to `other` would be a 180-degree reversal.
    pub fn is_opposite(&self, other: Direction) -> bool {
        other == self.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Up), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Down), Cell::new(6, 5));
        assert_eq!(cell.step(Direction::Left), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Right), Cell::new(5, 6));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Cell::new(0, 0).in_bounds(20));
        assert!(Cell::new(19, 19).in_bounds(20));
        assert!(!Cell::new(-1, 0).in_bounds(20));
        assert!(!Cell::new(20, 0).in_bounds(20));
        assert!(!Cell::new(0, 20).in_bounds(20));
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }
}
