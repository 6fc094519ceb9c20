//! # World Module
//!
//! The dungeon grid: tile states and bounds-checked access.
//!
//! A [`Level`] is mutable only while the generator carves it; the turn
//! engine reads it through the checked accessors and never writes to it.

use crate::Position;
use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    /// Whether an entity can stand on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

/// A fixed-size dungeon grid, stored row-major as `tiles[y][x]`.
///
/// Freshly created levels are solid wall; the generator carves rooms and
/// corridors into them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<Tile>>,
}

impl Level {
    /// Creates a level of the given dimensions filled with wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Level, Position, Tile};
    ///
    /// let level = Level::new(40, 25);
    /// assert_eq!(level.get(Position::new(0, 0)), Some(Tile::Wall));
    /// assert_eq!(level.get(Position::new(40, 0)), None);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Wall; width as usize]; height as usize],
        }
    }

    /// Whether a position lies within the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Returns the tile at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Tile> {
        if self.in_bounds(pos) {
            Some(self.tiles[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Whether `pos` is an in-bounds floor tile.
    ///
    /// Out-of-bounds positions are treated as wall rather than indexed,
    /// so boundary moves are rejected instead of panicking.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Floor)
    }

    /// Sets the tile at `pos`; silently ignores out-of-bounds positions.
    ///
    /// Corridor carving runs clamped segments through this, matching the
    /// generator's "carve what fits" contract.
    pub fn set(&mut self, pos: Position, tile: Tile) {
        if self.in_bounds(pos) {
            self.tiles[pos.y as usize][pos.x as usize] = tile;
        }
    }

    /// Counts floor tiles across the whole grid.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.is_walkable())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_is_solid_wall() {
        let level = Level::new(10, 8);
        assert_eq!(level.floor_count(), 0);
        assert!(!level.is_floor(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let level = Level::new(10, 8);
        assert!(level.in_bounds(Position::new(0, 0)));
        assert!(level.in_bounds(Position::new(9, 7)));
        assert!(!level.in_bounds(Position::new(10, 0)));
        assert!(!level.in_bounds(Position::new(0, 8)));
        assert!(!level.in_bounds(Position::new(-1, 0)));
        assert_eq!(level.get(Position::new(-1, 0)), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut level = Level::new(10, 8);
        let pos = Position::new(3, 4);
        level.set(pos, Tile::Floor);
        assert!(level.is_floor(pos));
        assert_eq!(level.floor_count(), 1);

        // Out-of-bounds writes are ignored, not panics.
        level.set(Position::new(100, 100), Tile::Floor);
        assert_eq!(level.floor_count(), 1);
    }
}
