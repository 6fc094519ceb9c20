//! Integration tests for dungeon generation invariants.

use delve::generation::create_rng;
use delve::{DungeonGenerator, GenerationConfig, Level, Position, Room};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

fn generate(config: &GenerationConfig) -> (Level, Vec<Room>) {
    DungeonGenerator::new().generate(config, &mut create_rng(config))
}

/// Breadth-first search over floor tiles from `start`.
fn reachable_floor(level: &Level, start: Position) -> HashSet<Position> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    if level.is_floor(start) {
        visited.insert(start);
        queue.push_back(start);
    }

    while let Some(pos) = queue.pop_front() {
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let next = pos.offset(dx, dy);
            if level.is_floor(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

#[test]
fn room_interiors_are_entirely_floor() {
    let (level, rooms) = generate(&GenerationConfig::new(2024));
    assert!(!rooms.is_empty());

    for room in &rooms {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                assert!(
                    level.is_floor(Position::new(x, y)),
                    "tile ({x}, {y}) of room {room:?} is wall"
                );
            }
        }
    }
}

#[test]
fn accepted_rooms_keep_their_margin() {
    let (_, rooms) = generate(&GenerationConfig::new(2024));

    for (i, a) in rooms.iter().enumerate() {
        for b in rooms.iter().skip(i + 1) {
            assert!(
                !a.overlaps_with_margin(b),
                "rooms {a:?} and {b:?} violate the 1-tile margin"
            );
        }
    }
}

#[test]
fn first_and_last_rooms_are_connected() {
    let (level, rooms) = generate(&GenerationConfig::new(2024));
    assert!(rooms.len() >= 2, "seed should produce a multi-room dungeon");

    let reachable = reachable_floor(&level, rooms[0].center());
    let last = rooms[rooms.len() - 1].center();
    assert!(
        reachable.contains(&last),
        "no floor path from first to last room center"
    );
}

#[test]
fn every_room_is_connected_to_the_first() {
    let (level, rooms) = generate(&GenerationConfig::new(7));
    let reachable = reachable_floor(&level, rooms[0].center());

    for room in &rooms {
        assert!(
            reachable.contains(&room.center()),
            "room {room:?} is unreachable from the spawn room"
        );
    }
}

#[test]
fn fixed_seed_is_deterministic_at_40_by_25() {
    let config = GenerationConfig::new(777);
    assert_eq!(config.width, 40);
    assert_eq!(config.height, 25);

    let (level_a, rooms_a) = generate(&config);
    let (level_b, rooms_b) = generate(&config);

    assert_eq!(level_a, level_b, "same seed must produce identical grids");
    assert_eq!(rooms_a, rooms_b, "same seed must produce identical rooms");
}

#[test]
fn different_seeds_diverge() {
    // Not an invariant, but a sanity check that the seed is actually used.
    let (_, rooms_a) = generate(&GenerationConfig::new(1));
    let (_, rooms_b) = generate(&GenerationConfig::new(2));
    assert_ne!(rooms_a, rooms_b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Generation invariants hold for arbitrary seeds on the standard grid.
    #[test]
    fn generation_invariants_hold_for_any_seed(seed in any::<u64>()) {
        let config = GenerationConfig::new(seed);
        let (level, rooms) = generate(&config);

        // Rooms stay inside the grid border.
        for room in &rooms {
            prop_assert!(room.x >= 1 && room.y >= 1);
            prop_assert!(room.x + room.width <= config.width as i32 - 1);
            prop_assert!(room.y + room.height <= config.height as i32 - 1);
        }

        // Interiors are carved and margins are respected.
        for (i, a) in rooms.iter().enumerate() {
            prop_assert!(level.is_floor(a.center()));
            for b in rooms.iter().skip(i + 1) {
                prop_assert!(!a.overlaps_with_margin(b));
            }
        }

        // Corridors connect everything back to the spawn room.
        if rooms.len() >= 2 {
            let reachable = reachable_floor(&level, rooms[0].center());
            for room in &rooms {
                prop_assert!(reachable.contains(&room.center()));
            }
        }
    }
}
