//! # Game Module
//!
//! Core game state, world representation and entities.
//!
//! This module contains the fundamental building blocks of Mazecrawl:
//! - The tile grid and entity placement map
//! - Entities with optional combat and armament capabilities
//! - The player and their fixed-size inventory
//! - The turn-based state machine that resolves every command

pub mod entities;
pub mod player;
pub mod state;
pub mod world;

pub use entities::*;
pub use player::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// A map coordinate.
///
/// `x` is the column and `y` is the row; row 0 is the top of the map.
/// Coordinates are signed so that stepping off the edge of the map yields a
/// position that simply fails bounds checks.
///
/// # Examples
///
/// ```
/// use mazecrawl::{Direction, Position};
///
/// let pos = Position::from_row_col(5, 10);
/// assert_eq!((pos.x, pos.y), (10, 5));
/// assert_eq!(pos.step(Direction::North), Position::new(10, 4));
/// assert_eq!(pos.neighbours().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a position from a (row, column) pair.
    pub fn from_row_col(row: usize, col: usize) -> Self {
        Self::new(col as i32, row as i32)
    }

    /// The neighbouring cell in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self.leap(direction, 1)
    }

    /// The cell `distance` cells away in `direction`.
    pub fn leap(self, direction: Direction, distance: i32) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// The 8 surrounding cells, row by row from the north-west corner.
    pub fn neighbours(self) -> [Position; 8] {
        Direction::ALL.map(|direction| self.step(direction))
    }
}

/// The eight compass directions a player can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Northwest,
    North,
    Northeast,
    West,
    East,
    Southwest,
    South,
    Southeast,
}

impl Direction {
    /// Every direction, row by row from the north-west.
    pub const ALL: [Direction; 8] = [
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
        Direction::West,
        Direction::East,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
    ];

    /// The four directions the maze is carved along.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Column and row offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Northwest => (-1, -1),
            Direction::North => (0, -1),
            Direction::Northeast => (1, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::Southwest => (-1, 1),
            Direction::South => (0, 1),
            Direction::Southeast => (1, 1),
        }
    }

    /// The direction of a single step, if `(dx, dy)` is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::Direction;
    ///
    /// assert_eq!(Direction::from_delta(1, -1), Some(Direction::Northeast));
    /// assert_eq!(Direction::from_delta(0, 0), None);
    /// assert_eq!(Direction::from_delta(2, 0), None);
    /// ```
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.delta() == (dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_maps_to_x_y() {
        let pos = Position::from_row_col(10, 5);
        assert_eq!(pos, Position::new(5, 10));
    }

    #[test]
    fn test_neighbours_in_row_order() {
        let around = Position::new(5, 5).neighbours();
        assert_eq!(around[0], Position::new(4, 4));
        assert_eq!(around[3], Position::new(4, 5));
        assert_eq!(around[4], Position::new(6, 5));
        assert_eq!(around[7], Position::new(6, 6));
        assert!(!around.contains(&Position::new(5, 5)));
    }

    #[test]
    fn test_leap_skips_cells() {
        let pos = Position::new(3, 3);
        assert_eq!(pos.leap(Direction::East, 2), Position::new(5, 3));
        assert_eq!(pos.leap(Direction::North, 2), Position::new(3, 1));
        assert_eq!(pos.step(Direction::Southwest), Position::new(2, 4));
    }

    #[test]
    fn test_direction_deltas_are_unique_steps() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
    }
}
