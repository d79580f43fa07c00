//! Egg Catcher - catch the good eggs, dodge the bad ones
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, game state)
//! - `renderer`: Draw list construction and the canvas backend
//! - `session`: Frame pump and lifecycle API shared with the browser glue
//! - `platform`: Collaborator traits (audio, overlay, renderer)
//! - `certificate`: Completion certificate layout
//! - `settings`: Persisted player preferences
//! - `audio`: Web Audio cues and background music (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod certificate;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use certificate::{Certificate, CertificateError, CertificateLayout};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport defaults (canvas is capped to a phone-like column)
    pub const MAX_CANVAS_WIDTH: f32 = 480.0;
    /// Windows wider than this get the capped canvas width
    pub const WIDE_WINDOW_THRESHOLD: f32 = 500.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

    /// Player (basket) defaults
    pub const PLAYER_SIZE: f32 = 140.0;
    /// Distance of the basket's top edge from the bottom of the viewport
    pub const PLAYER_BOTTOM_OFFSET: f32 = 200.0;
    /// Fraction of the remaining distance covered per tick
    pub const PLAYER_LERP: f32 = 0.2;
    /// Max pixels per tick
    pub const PLAYER_MAX_SPEED: f32 = 25.0;
    /// Below this distance the basket doesn't move
    pub const PLAYER_DEAD_ZONE: f32 = 1.0;
    /// Arrow key step in pixels
    pub const KEY_NUDGE: f32 = 30.0;
    /// Squash-and-stretch on catch
    pub const BOUNCE_SCALE_X: f32 = 1.3;
    pub const BOUNCE_SCALE_Y: f32 = 0.7;
    pub const SCALE_EASE: f32 = 0.2;

    /// Falling entity sizes
    pub const EGG_SIZE: f32 = 80.0;
    pub const ITEM_SIZE: f32 = 60.0;
    /// Entities spawn above the top edge so the fall-in is visible
    pub const SPAWN_Y: f32 = -100.0;
    pub const EGG_BASE_SPEED: f32 = 3.0;
    pub const ITEM_BASE_SPEED: f32 = 4.0;
    /// Random extra speed on top of the base speed
    pub const SPEED_JITTER: f32 = 2.0;
    /// Max cosmetic rotation either way (radians)
    pub const EGG_MAX_TILT: f32 = 0.1;
    pub const ITEM_SPIN: f32 = 0.1;

    /// Difficulty curve
    pub const SPEED_PER_POINT: f64 = 0.002;
    pub const MAX_SPEED_MULTIPLIER: f64 = 3.0;
    pub const BASE_SPAWN_INTERVAL: f64 = 60.0;
    pub const MIN_SPAWN_INTERVAL: u32 = 15;
    pub const ITEM_SPAWN_INTERVAL: u64 = 300;
    pub const ITEM_SPAWN_CHANCE: f64 = 0.7;

    /// Scoring
    pub const COMBO_STEP: u32 = 5;
    pub const MAX_CAGES: u32 = 5;

    /// Magnet physics
    pub const MAGNET_PULL: f32 = 0.0007;
    pub const MAGNET_MAX_VX: f32 = 5.0;
    pub const MAGNET_DAMPING: f32 = 0.95;

    /// Delay between catching a bomb and the game ending (300 ms)
    pub const BOMB_GAME_OVER_DELAY: u64 = 18;
    /// Screen shake after a bad catch (50 ms)
    pub const SCREEN_SHAKE_TICKS: u32 = 3;
    pub const SCREEN_SHAKE_OFFSET: f32 = 5.0;

    /// Effects
    pub const PARTICLE_BURST: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Max particle speed on each axis
    pub const PARTICLE_SPREAD: f32 = 4.0;
    pub const FLOATING_TEXT_LIFE: u32 = 40;
    pub const FLOATING_TEXT_RISE: f32 = 1.0;

    /// Colors (0xRRGGBB)
    pub const COLOR_GOLD: u32 = 0xFFD700;
    pub const COLOR_RED: u32 = 0xFF0000;
    pub const COLOR_BLACK: u32 = 0x000000;
    pub const COLOR_WHITE: u32 = 0xFFFFFF;
    pub const COLOR_MAGNET: u32 = 0x00BFFF;
}

/// Canvas width for a given window width
///
/// Wide windows get a fixed-width column, narrow ones use the full width.
#[inline]
pub fn canvas_width_for_window(window_width: f32) -> f32 {
    if window_width > consts::WIDE_WINDOW_THRESHOLD {
        consts::MAX_CANVAS_WIDTH
    } else {
        window_width
    }
}

/// Format a 0xRRGGBB color as a CSS hex string
pub fn css_color(rgb: u32) -> String {
    format!("#{:06X}", rgb & 0xFF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_width() {
        assert_eq!(canvas_width_for_window(1920.0), 480.0);
        assert_eq!(canvas_width_for_window(500.0), 500.0);
        assert_eq!(canvas_width_for_window(375.0), 375.0);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(consts::COLOR_GOLD), "#FFD700");
        assert_eq!(css_color(0x00BFFF), "#00BFFF");
        assert_eq!(css_color(0), "#000000");
    }
}
