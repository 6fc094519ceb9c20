//! # Input Module
//!
//! Translates macroquad key state into game intents.
//!
//! Held movement keys on the two axes combine into one of the 8
//! directions, so up+left held together is a single diagonal move.

use crate::Direction;
use macroquad::prelude::*;

/// Player intents produced from raw key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one tile in a direction
    Move(Direction),
    /// Discard the session and regenerate level 1
    Restart,
    /// Quit the game
    Quit,
}

/// Polls macroquad key state once per frame.
pub struct InputHandler;

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Returns the current input intent, if any key state maps to one.
    ///
    /// Movement reads held state (`is_key_down`) so the axes can combine
    /// into diagonals; the caller gates repeats so one press resolves one
    /// turn.
    pub fn poll(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }
        if is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::Restart);
        }

        let mut dx = 0;
        let mut dy = 0;
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            dx -= 1;
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            dx += 1;
        }
        if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
            dy -= 1;
        }
        if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
            dy += 1;
        }

        Direction::from_axes(dx, dy).map(PlayerInput::Move)
    }
}
