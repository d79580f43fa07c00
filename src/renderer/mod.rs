//! Canvas 2D rendering
//!
//! `scene` turns the game state into a draw list; `canvas` plays it back on
//! a `CanvasRenderingContext2d` in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, Sprite, build_scene, fit_aspect};
