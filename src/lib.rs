//! # Delve
//!
//! A minimal tile-based roguelike: procedural room-and-corridor dungeons,
//! strictly alternating player/enemy turns, and a generative background
//! music loop.
//!
//! ## Architecture Overview
//!
//! The crate is split along the same seams the game has:
//!
//! - **Game State**: the turn engine — entity table, phase machine, scoring
//! - **Generation System**: seeded procedural dungeon layout
//! - **Input System**: translates macroquad key state into game intents
//! - **Rendering System**: macroquad tile/HUD drawing, no game rules
//! - **Audio System**: fire-and-forget rodio music loop
//!
//! All game rules live in engine-free modules driven by an injected seeded
//! rng, so every behavior is reproducible in tests. The macroquad and rodio
//! layers are thin glue over that core.

pub mod audio;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

pub use audio::MusicPlayer;
pub use game::{
    new_entity_id, CompletionState, Direction, Entity, EntityId, EntityKind, GameState, Level,
    Position, Tile, TurnPhase,
};
pub use generation::{DungeonGenerator, GenerationConfig, Room};
pub use input::{InputHandler, PlayerInput};
pub use rendering::Display;

/// Core error type for the delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Audio device or playback failure
    #[error("Audio error: {0}")]
    Audio(String),
}

/// Result type used throughout the delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const DUNGEON_WIDTH: u32 = 40;

    /// Dungeon height in tiles
    pub const DUNGEON_HEIGHT: u32 = 25;

    /// Player starting (and maximum) health
    pub const PLAYER_MAX_HP: i32 = 10;

    /// Player attack power
    pub const PLAYER_ATTACK: i32 = 3;

    /// Health restored by one potion, clamped at max
    pub const POTION_HEAL: i32 = 3;

    /// Score awarded for reaching the stairway
    pub const STAIRWAY_BONUS: u32 = 100;

    /// Manhattan distance below which an enemy pursues the player
    pub const ENEMY_AWARENESS_RANGE: u32 = 5;

    /// Manhattan distance below which an enemy attacks instead of moving
    pub const ENEMY_MELEE_RANGE: u32 = 2;
}
