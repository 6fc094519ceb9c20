//! # Generation Module
//!
//! Procedural dungeon layout generation.
//!
//! All randomness flows through an explicitly injected [`StdRng`], so a
//! fixed seed always reproduces the same grid and room list.

pub mod dungeon;

pub use dungeon::*;

use crate::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Minimum room edge length
    pub min_room_size: u32,
    /// Maximum room edge length
    pub max_room_size: u32,
    /// Number of room placement attempts before giving up
    pub max_placement_attempts: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration: a 40x25 grid with rooms of
    /// 4 to 9 tiles per edge and 200 placement attempts.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.width, 40);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: crate::config::DUNGEON_WIDTH,
            height: crate::config::DUNGEON_HEIGHT,
            min_room_size: 4,
            max_room_size: 9,
            max_placement_attempts: 200,
        }
    }

    /// Creates a configuration for testing with a smaller grid.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 30,
            height: 20,
            min_room_size: 3,
            max_room_size: 6,
            max_placement_attempts: 200,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned rectangular room placed during generation.
///
/// Rooms are immutable after generation; the turn engine only uses them to
/// place entities and the player spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left edge in tile coordinates
    pub x: i32,
    /// Top edge in tile coordinates
    pub y: i32,
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
}

impl Room {
    /// Creates a new room with the given geometry.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Gets the center tile of the room.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(2, 3, 6, 4);
    /// assert_eq!(room.center(), Position::new(5, 5));
    /// ```
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Checks if a position lies inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && pos.x < self.x + self.width
            && pos.y < self.y + self.height
    }

    /// Checks if this room overlaps another, counting a 1-tile margin
    /// around both as overlap.
    ///
    /// The margin keeps accepted rooms from sharing walls, so every room
    /// stays a distinct chamber.
    pub fn overlaps_with_margin(&self, other: &Room) -> bool {
        self.x < other.x + other.width + 1
            && self.x + self.width + 1 > other.x
            && self.y < other.y + other.height + 1
            && self.y + self.height + 1 > other.y
    }
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}
