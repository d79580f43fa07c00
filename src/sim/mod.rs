//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Delayed effects go through the frame schedule
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod kinds;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collider, HitboxClass, Rect, ShrinkFactors, collides};
pub use difficulty::{spawn_interval, speed_multiplier};
pub use kinds::{EggKind, ItemKind};
pub use schedule::{Schedule, ScheduledAction};
pub use state::{
    Egg, FloatingText, GameEvent, GamePhase, GameState, Item, Particle, Player, Viewport,
};
pub use tick::{combo_bonus, tick};
