//! # Rendering Module
//!
//! Macroquad drawing for the map, entities, and HUD.
//!
//! Pure glue: everything here reads the game state through its accessors
//! and contains no game rules.

pub mod display;

pub use display::*;
