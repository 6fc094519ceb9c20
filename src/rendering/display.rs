//! # Display Management
//!
//! Screen management and 2D tile rendering using macroquad.

use crate::{CompletionState, EntityKind, GameState, Position};
use macroquad::prelude::*;

/// Side length of one rendered tile in pixels.
pub const TILE_SIZE: f32 = 32.0;

/// Macroquad display manager for the game.
///
/// Draws the tile grid around the player, entities on top, and a fixed
/// HUD. The camera follows the player one tile at a time.
pub struct Display {
    /// Camera zoom factor
    pub zoom: f32,
    /// Background clear color
    pub background: Color,
    wall_color: Color,
    floor_color: Color,
    player_color: Color,
    enemy_color: Color,
    potion_color: Color,
    stairway_color: Color,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    /// Creates a display with the game's palette.
    pub fn new() -> Self {
        Self {
            zoom: 1.5,
            background: Color::from_rgba(0x0f, 0x0f, 0x23, 0xff),
            wall_color: Color::from_rgba(0x6a, 0x0d, 0xad, 0xff),
            floor_color: Color::from_rgba(0x1a, 0x1a, 0x3a, 0xff),
            player_color: Color::from_rgba(0xff, 0xd7, 0x00, 0xff),
            enemy_color: Color::from_rgba(0xff, 0x55, 0x55, 0xff),
            potion_color: Color::from_rgba(0x00, 0xff, 0x99, 0xff),
            stairway_color: Color::from_rgba(0xff, 0x6e, 0xc7, 0xff),
        }
    }

    /// Renders one complete frame of the game.
    pub fn render(&self, state: &GameState) {
        clear_background(self.background);

        let camera = self.camera_offset(state.player().position);
        self.render_map(state, camera);
        self.render_entities(state, camera);
        self.render_hud(state);

        if state.completion() == CompletionState::Defeated {
            self.render_game_over();
        }
    }

    /// Pixel offset that keeps the player in the screen center.
    fn camera_offset(&self, player: Position) -> (f32, f32) {
        let scale = TILE_SIZE * self.zoom;
        (
            screen_width() / 2.0 - (player.x as f32 + 0.5) * scale,
            screen_height() / 2.0 - (player.y as f32 + 0.5) * scale,
        )
    }

    /// Draws the tile grid.
    fn render_map(&self, state: &GameState, camera: (f32, f32)) {
        let level = state.level();
        let scale = TILE_SIZE * self.zoom;

        for y in 0..level.height as i32 {
            for x in 0..level.width as i32 {
                let color = if level.is_floor(Position::new(x, y)) {
                    self.floor_color
                } else {
                    self.wall_color
                };
                draw_rectangle(
                    camera.0 + x as f32 * scale,
                    camera.1 + y as f32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }

    /// Draws every entity, player last so it stays on top.
    fn render_entities(&self, state: &GameState, camera: (f32, f32)) {
        let scale = TILE_SIZE * self.zoom;
        let mut player_pos = None;

        for entity in state.entities() {
            let color = match entity.kind {
                EntityKind::Player { .. } => {
                    player_pos = Some(entity.position);
                    continue;
                }
                EntityKind::Enemy { .. } => self.enemy_color,
                EntityKind::Item { .. } => self.potion_color,
                EntityKind::Stairway => self.stairway_color,
            };
            self.draw_tile(entity.position, color, camera, scale);
        }

        if let Some(pos) = player_pos {
            self.draw_tile(pos, self.player_color, camera, scale);
        }
    }

    fn draw_tile(&self, pos: Position, color: Color, camera: (f32, f32), scale: f32) {
        draw_rectangle(
            camera.0 + pos.x as f32 * scale,
            camera.1 + pos.y as f32 * scale,
            scale,
            scale,
            color,
        );
    }

    /// Draws the fixed HUD: level, health, score, and key hints.
    fn render_hud(&self, state: &GameState) {
        let (hp, max_hp) = state.player_health();
        draw_text(&format!("Level: {}", state.level_number()), 16.0, 24.0, 20.0, WHITE);
        draw_text(&format!("HP: {}/{}", hp.max(0), max_hp), 16.0, 48.0, 20.0, WHITE);
        draw_text(&format!("Score: {}", state.score()), 16.0, 72.0, 20.0, WHITE);
        draw_text(
            "[R] Restart  [Arrows/WASD] Move",
            16.0,
            screen_height() - 16.0,
            20.0,
            WHITE,
        );
    }

    /// Draws the terminal defeat overlay.
    fn render_game_over(&self) {
        let text = "GAME OVER";
        let size = 64.0;
        let dims = measure_text(text, None, size as u16, 1.0);
        draw_text(
            text,
            (screen_width() - dims.width) / 2.0,
            screen_height() / 2.0,
            size,
            RED,
        );
    }
}
