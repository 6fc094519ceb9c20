//! # Dungeon Generation
//!
//! Room-and-corridor dungeon layout.
//!
//! The generator samples random rectangles, keeps the ones that land with a
//! 1-tile margin from everything placed before, carves them as floor, and
//! then threads an L-shaped corridor from each room to the previous one in
//! acceptance order. The result is a grid whose floor is connected to the
//! first room by construction.

use crate::{Level, Position, Room, Tile};
use crate::generation::GenerationConfig;
use rand::rngs::StdRng;
use rand::Rng;

/// Room-and-corridor dungeon generator.
///
/// Placement is attempt-bounded: candidates that collide are discarded and
/// never retried, so dense configurations simply end up with fewer rooms.
/// Falling short of a "full" dungeon is accepted silently.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Creates a new dungeon generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates a dungeon grid and its rooms in acceptance order.
    ///
    /// Deterministic with respect to the rng: the same seed produces an
    /// identical grid and room list.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DungeonGenerator, GenerationConfig};
    ///
    /// let config = GenerationConfig::new(12345);
    /// let mut rng = delve::generation::create_rng(&config);
    /// let (level, rooms) = DungeonGenerator::new().generate(&config, &mut rng);
    /// assert!(!rooms.is_empty());
    /// assert!(level.floor_count() > 0);
    /// ```
    pub fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> (Level, Vec<Room>) {
        let mut level = Level::new(config.width, config.height);
        let rooms = self.place_rooms(&mut level, config, rng);
        self.connect_rooms(&mut level, &rooms, rng);

        log::debug!(
            "generated {}x{} dungeon: {} rooms, {} floor tiles",
            config.width,
            config.height,
            rooms.len(),
            level.floor_count()
        );

        (level, rooms)
    }

    /// Samples room candidates and carves the ones that fit.
    fn place_rooms(
        &self,
        level: &mut Level,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..config.max_placement_attempts {
            if let Some(room) = self.sample_candidate(config, rng) {
                if rooms.iter().any(|r| room.overlaps_with_margin(r)) {
                    continue;
                }
                self.carve_room(level, &room);
                rooms.push(room);
            }
        }

        rooms
    }

    /// Samples one random room candidate inside the grid border.
    ///
    /// Returns `None` when the sampled size cannot fit the grid at all;
    /// that attempt is spent, matching the fixed attempt budget.
    fn sample_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> Option<Room> {
        let rw = rng.gen_range(config.min_room_size..=config.max_room_size) as i32;
        let rh = rng.gen_range(config.min_room_size..=config.max_room_size) as i32;

        let max_x = config.width as i32 - rw - 1;
        let max_y = config.height as i32 - rh - 1;
        if max_x < 1 || max_y < 1 {
            return None;
        }

        let rx = rng.gen_range(1..=max_x);
        let ry = rng.gen_range(1..=max_y);
        Some(Room::new(rx, ry, rw, rh))
    }

    /// Carves a room's full rectangle as floor.
    fn carve_room(&self, level: &mut Level, room: &Room) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                level.set(Position::new(x, y), Tile::Floor);
            }
        }
    }

    /// Connects each room to the previous one in acceptance order.
    ///
    /// With fewer than two rooms there is nothing to connect; the
    /// degenerate dungeon is accepted as-is.
    fn connect_rooms(&self, level: &mut Level, rooms: &[Room], rng: &mut StdRng) {
        for pair in rooms.windows(2) {
            let (a, b) = (pair[0].center(), pair[1].center());
            if rng.gen_bool(0.5) {
                self.carve_horizontal(level, a.x, b.x, a.y);
                self.carve_vertical(level, a.y, b.y, b.x);
            } else {
                self.carve_vertical(level, a.y, b.y, a.x);
                self.carve_horizontal(level, a.x, b.x, b.y);
            }
        }
    }

    /// Carves a horizontal corridor segment at row `y`.
    fn carve_horizontal(&self, level: &mut Level, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            level.set(Position::new(x, y), Tile::Floor);
        }
    }

    /// Carves a vertical corridor segment at column `x`.
    fn carve_vertical(&self, level: &mut Level, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            level.set(Position::new(x, y), Tile::Floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::create_rng;

    #[test]
    fn test_generation_is_deterministic() {
        let config = GenerationConfig::new(12345);

        let (level_a, rooms_a) = DungeonGenerator::new().generate(&config, &mut create_rng(&config));
        let (level_b, rooms_b) = DungeonGenerator::new().generate(&config, &mut create_rng(&config));

        assert_eq!(level_a, level_b);
        assert_eq!(rooms_a, rooms_b);
    }

    #[test]
    fn test_rooms_are_carved_as_floor() {
        let config = GenerationConfig::new(999);
        let mut rng = create_rng(&config);
        let (level, rooms) = DungeonGenerator::new().generate(&config, &mut rng);

        for room in &rooms {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    assert!(
                        level.is_floor(Position::new(x, y)),
                        "room tile ({}, {}) is not floor",
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_rooms_respect_margin() {
        let config = GenerationConfig::new(4242);
        let mut rng = create_rng(&config);
        let (_, rooms) = DungeonGenerator::new().generate(&config, &mut rng);

        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                assert!(!a.overlaps_with_margin(b), "rooms {:?} and {:?} overlap", a, b);
            }
        }
    }

    #[test]
    fn test_rooms_stay_inside_border() {
        let config = GenerationConfig::new(31337);
        let mut rng = create_rng(&config);
        let (level, rooms) = DungeonGenerator::new().generate(&config, &mut rng);

        for room in &rooms {
            assert!(room.x >= 1);
            assert!(room.y >= 1);
            assert!(room.x + room.width <= level.width as i32 - 1);
            assert!(room.y + room.height <= level.height as i32 - 1);
        }
    }

    #[test]
    fn test_tiny_grid_yields_no_rooms() {
        let config = GenerationConfig {
            seed: 1,
            width: 4,
            height: 4,
            min_room_size: 4,
            max_room_size: 9,
            max_placement_attempts: 200,
        };
        let mut rng = create_rng(&config);
        let (level, rooms) = DungeonGenerator::new().generate(&config, &mut rng);

        // No candidate can fit, so the attempt budget burns out silently.
        assert!(rooms.is_empty());
        assert_eq!(level.floor_count(), 0);
    }
}
