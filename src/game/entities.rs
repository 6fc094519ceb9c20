//! # Entities Module
//!
//! Plain data records for everything that occupies a tile.
//!
//! Entities carry no behavior; the turn engine owns the table and mutates
//! records in place. The renderer looks visuals up by [`EntityKind`], never
//! the other way around.

use crate::{config, EntityId, Position};
use serde::{Deserialize, Serialize};

/// Tagged variant describing what an entity is, carrying only the fields
/// relevant to that variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player character. Health and max health persist across levels.
    Player { hp: i32, max_hp: i32, attack: i32 },
    /// A hostile creature; pursues and attacks the player.
    Enemy { hp: i32, attack: i32 },
    /// A healing potion, consumed on pickup.
    Item { heal: i32 },
    /// The exit to the next level.
    Stairway,
}

/// One entry in the turn engine's entity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an entity with a fresh unique id.
    pub fn new(position: Position, kind: EntityKind) -> Self {
        Self {
            id: crate::new_entity_id(),
            position,
            kind,
        }
    }

    /// Creates the player at full health.
    pub fn player(position: Position) -> Self {
        Self::new(
            position,
            EntityKind::Player {
                hp: config::PLAYER_MAX_HP,
                max_hp: config::PLAYER_MAX_HP,
                attack: config::PLAYER_ATTACK,
            },
        )
    }

    /// Creates an enemy scaled to the current dungeon level.
    ///
    /// Enemies get tougher as the player descends: `hp = 3 + level`,
    /// `attack = 1 + level / 2`.
    pub fn enemy(position: Position, level: u32) -> Self {
        Self::new(
            position,
            EntityKind::Enemy {
                hp: 3 + level as i32,
                attack: 1 + level as i32 / 2,
            },
        )
    }

    /// Creates a healing potion.
    pub fn potion(position: Position) -> Self {
        Self::new(
            position,
            EntityKind::Item {
                heal: config::POTION_HEAL,
            },
        )
    }

    /// Creates the level exit.
    pub fn stairway(position: Position) -> Self {
        Self::new(position, EntityKind::Stairway)
    }

    /// Whether this entity is the player.
    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    /// Whether this entity is an enemy.
    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_at_full_health() {
        let player = Entity::player(Position::new(5, 5));
        match player.kind {
            EntityKind::Player { hp, max_hp, attack } => {
                assert_eq!(hp, config::PLAYER_MAX_HP);
                assert_eq!(max_hp, config::PLAYER_MAX_HP);
                assert_eq!(attack, config::PLAYER_ATTACK);
            }
            _ => panic!("expected player kind"),
        }
        assert!(player.is_player());
        assert!(!player.is_enemy());
    }

    #[test]
    fn test_enemy_scales_with_level() {
        let shallow = Entity::enemy(Position::new(1, 1), 1);
        let deep = Entity::enemy(Position::new(1, 1), 6);

        let stats = |e: &Entity| match e.kind {
            EntityKind::Enemy { hp, attack } => (hp, attack),
            _ => panic!("expected enemy kind"),
        };

        assert_eq!(stats(&shallow), (4, 1));
        assert_eq!(stats(&deep), (9, 4));
    }

    #[test]
    fn test_potion_heal_amount() {
        let potion = Entity::potion(Position::new(2, 2));
        assert_eq!(
            potion.kind,
            EntityKind::Item {
                heal: config::POTION_HEAL
            }
        );
    }
}
