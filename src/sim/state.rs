//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`; renderers and
//! the browser glue only ever borrow it.

use chrono::NaiveDate;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, HitboxClass, Rect};
use super::kinds::{EggKind, ItemKind};
use super::schedule::Schedule;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; nothing moves until reset
    Ended,
}

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MAX_CANVAS_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Feedback for collaborators outside the simulation (audio, overlay, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Good egg caught, with the points awarded (bonus included)
    CatchGood { points: i64 },
    /// Bad egg caught
    CatchBad { cages_added: u32 },
    /// Item caught
    ItemPickup(ItemKind),
    /// Magnet effect started or ran out
    MagnetChanged(bool),
    /// Bomb caught
    HazardChanged(bool),
    /// Run ended (emitted exactly once per run)
    GameOver { final_score: i64 },
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Where input wants the basket to be (left edge)
    pub target_x: f32,
    /// Squash-and-stretch, eases back to 1.0
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Player {
    /// Basket centred horizontally near the bottom of the viewport
    pub fn new(viewport: Viewport) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let x = viewport.width / 2.0 - size.x / 2.0;
        Self {
            pos: Vec2::new(x, viewport.height - PLAYER_BOTTOM_OFFSET),
            size,
            target_x: x,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Largest x that keeps the basket fully on screen
    #[inline]
    pub fn max_x(&self, viewport: Viewport) -> f32 {
        viewport.width - self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Aim the basket's centre at a canvas-relative pointer x
    pub fn set_target_from_pointer(&mut self, pointer_x: f32, viewport: Viewport) {
        let half = self.size.x / 2.0;
        let x = pointer_x.max(half).min(viewport.width - half);
        self.target_x = x - half;
    }

    /// Shift the target by a fixed step (keyboard)
    pub fn nudge_target(&mut self, dx: f32, viewport: Viewport) {
        self.target_x = (self.target_x + dx).max(0.0).min(self.max_x(viewport));
    }

    /// Catch feedback
    pub fn bounce(&mut self) {
        self.scale_x = BOUNCE_SCALE_X;
        self.scale_y = BOUNCE_SCALE_Y;
    }

    /// Ease the squash back and move toward the target
    pub fn update(&mut self, viewport: Viewport) {
        self.scale_x += (1.0 - self.scale_x) * SCALE_EASE;
        self.scale_y += (1.0 - self.scale_y) * SCALE_EASE;

        let dx = self.target_x - self.pos.x;
        if dx.abs() > PLAYER_DEAD_ZONE {
            // Lerp, but never faster than the cap so big jumps don't teleport
            self.pos.x += (dx * PLAYER_LERP).clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
        }

        self.pos.x = self.pos.x.max(0.0).min(self.max_x(viewport));
    }
}

impl Collider for Player {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    fn hitbox_class(&self) -> HitboxClass {
        HitboxClass::Player
    }
}

/// A falling egg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Horizontal velocity (only non-zero under the magnet)
    pub vx: f32,
    /// Fall speed in pixels per tick
    pub speed: f32,
    /// Cosmetic tilt (radians)
    pub rotation: f32,
    pub kind: EggKind,
    /// Laying date stamp (MMDD)
    pub date_code: String,
    /// Farm code and grade digit, e.g. "K3Z9Q 1"
    pub farm_code: String,
}

impl Egg {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

impl Collider for Egg {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    fn hitbox_class(&self) -> HitboxClass {
        HitboxClass::Egg
    }
}

/// A falling power-up or hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Wobble animation phase
    pub angle: f32,
    pub kind: ItemKind,
}

impl Item {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

impl Collider for Item {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    fn hitbox_class(&self) -> HitboxClass {
        HitboxClass::Item
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub life: u32,
    pub color: u32,
}

/// Score popups and effect labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    pub life: u32,
    pub color: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Score (only good catches change it)
    pub score: i64,
    /// Fault counter; the run ends at `MAX_CAGES`
    pub cages: u32,
    /// Consecutive good catches
    pub combo: u32,
    /// Simulation tick counter
    pub frame: u64,
    /// Derived from score each tick
    pub speed_multiplier: f64,
    /// Ticks of magnet effect left
    pub magnet_ticks: u32,
    /// Ticks of screen shake left
    pub screen_shake_ticks: u32,
    /// Score at the moment the run ended
    pub final_score: Option<i64>,
    pub viewport: Viewport,
    /// Stamp printed on every egg spawned this run (MMDD)
    pub date_code: String,
    pub player: Player,
    pub eggs: Vec<Egg>,
    pub items: Vec<Item>,
    pub particles: Vec<Particle>,
    pub floating_texts: Vec<FloatingText>,
    /// Delayed actions (bomb fuse)
    pub schedule: Schedule,
    /// Feedback produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new running game
    pub fn new(seed: u64, viewport: Viewport, date: NaiveDate) -> Self {
        Self {
            seed,
            phase: GamePhase::Running,
            score: 0,
            cages: 0,
            combo: 0,
            frame: 0,
            speed_multiplier: 1.0,
            magnet_ticks: 0,
            screen_shake_ticks: 0,
            final_score: None,
            viewport,
            date_code: date_code(date),
            player: Player::new(viewport),
            eggs: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
            floating_texts: Vec::new(),
            schedule: Schedule::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start a fresh run, keeping viewport, date and RNG stream
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.cages = 0;
        self.combo = 0;
        self.frame = 0;
        self.speed_multiplier = 1.0;
        self.magnet_ticks = 0;
        self.screen_shake_ticks = 0;
        self.final_score = None;
        self.player = Player::new(self.viewport);
        self.eggs.clear();
        self.items.clear();
        self.particles.clear();
        self.floating_texts.clear();
        self.schedule.clear();
        self.events.clear();
    }

    /// Canvas was resized; re-centre the basket
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.pos.y = viewport.height - PLAYER_BOTTOM_OFFSET;
        self.player.pos.x = viewport.width / 2.0 - self.player.size.x / 2.0;
        self.player.target_x = self.player.pos.x;
    }

    /// Date stamped on eggs spawned from now on
    pub fn set_date(&mut self, date: NaiveDate) {
        let code = date_code(date);
        if code != self.date_code {
            log::debug!("Egg date code now {}", code);
            self.date_code = code;
        }
    }

    /// Pointer/touch input (ignored once the run is over)
    pub fn set_player_target_x(&mut self, pointer_x: f32) {
        if self.is_running() {
            self.player.set_target_from_pointer(pointer_x, self.viewport);
        }
    }

    /// Keyboard input (ignored once the run is over)
    pub fn nudge_player_target(&mut self, dx: f32) {
        if self.is_running() {
            self.player.nudge_target(dx, self.viewport);
        }
    }

    /// One-way transition to `Ended`
    ///
    /// Returns false if the run had already ended, so callers can fire it
    /// from several triggers without double game-overs.
    pub fn end_game(&mut self) -> bool {
        if self.phase == GamePhase::Ended {
            return false;
        }
        self.phase = GamePhase::Ended;
        self.final_score = Some(self.score);
        self.schedule.clear();
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Game over at frame {} (score {}, cages {})",
            self.frame,
            self.score,
            self.cages
        );
        true
    }

    /// Take all pending feedback events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Uniform float in [0, 1)
    pub(crate) fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Burst of particles at a point
    pub fn spawn_burst(&mut self, at: Vec2, color: u32) {
        for _ in 0..PARTICLE_BURST {
            let vel = Vec2::new(
                (self.random() - 0.5) * PARTICLE_SPREAD * 2.0,
                (self.random() - 0.5) * PARTICLE_SPREAD * 2.0,
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                life: PARTICLE_LIFE,
                color,
            });
        }
    }

    pub fn show_text(&mut self, text: impl Into<String>, at: Vec2, color: u32) {
        self.floating_texts.push(FloatingText {
            text: text.into(),
            pos: at,
            life: FLOATING_TEXT_LIFE,
            color,
        });
    }
}

/// Egg date stamp for a calendar day (MMDD)
pub fn date_code(date: NaiveDate) -> String {
    date.format("%m%d").to_string()
}
