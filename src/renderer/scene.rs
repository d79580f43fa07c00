//! Draw list generation
//!
//! Turns a read-only `GameState` into a flat list of 2D canvas commands.
//! Building the list is pure, so layout, z-order and settings handling are
//! testable without a browser; `canvas` only executes it.

use glam::Vec2;

use crate::consts::*;
use crate::css_color;
use crate::settings::Settings;
use crate::sim::{Collider, GameState, ItemKind, Rect};

const SKY: &str = "#87CEEB";
const GROUND: &str = "#8BC34A";
const GROUND_HEIGHT: f32 = 20.0;
const CLOUD: &str = "☁️";
const CAGE_SIZE: f32 = 40.0;
const CAGE_SPACING: f32 = 50.0;
const EGG_CODE_COLOR: &str = "rgba(0, 0, 0, 0.8)";
const DEBUG_HITBOX: &str = "red";
const DEBUG_BOUNDS: &str = "rgba(255, 0, 0, 0.3)";
const PARTICLE_RADIUS: f32 = 4.0;
const TEXT_STROKE_WIDTH: f32 = 3.0;

/// Image assets, drawn aspect-fit into their box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Basket,
    Egg,
    Cage,
    Bomb,
    Magnet,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Basket,
        Sprite::Egg,
        Sprite::Cage,
        Sprite::Bomb,
        Sprite::Magnet,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Sprite::Basket => "images/basket.png",
            Sprite::Egg => "images/egg.png",
            Sprite::Cage => "images/cage.png",
            Sprite::Bomb => "images/bomb.png",
            Sprite::Magnet => "images/magnet.png",
        }
    }

    fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Magnet => Sprite::Magnet,
            ItemKind::Bomb => Sprite::Bomb,
        }
    }
}

/// Black outline drawn under filled text
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub color: String,
    pub width: f32,
}

impl Outline {
    fn black() -> Self {
        Self {
            color: "black".to_string(),
            width: TEXT_STROKE_WIDTH,
        }
    }
}

/// One 2D canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        width: f32,
    },
    Sprite {
        sprite: Sprite,
        rect: Rect,
    },
    /// Text is centred on `pos`; left-aligned only for the sky decorations
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
        outline: Option<Outline>,
        centered: bool,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        alpha: f32,
    },
    /// save + translate + rotate + scale
    PushTransform {
        translate: Vec2,
        rotate: f32,
        scale: Vec2,
    },
    /// restore
    PopTransform,
}

impl DrawCmd {
    fn push(translate: Vec2, rotate: f32, scale: Vec2) -> Self {
        DrawCmd::PushTransform {
            translate,
            rotate,
            scale,
        }
    }

    fn centered_text(text: impl Into<String>, pos: Vec2, font: impl Into<String>, color: &str) -> Self {
        DrawCmd::Text {
            text: text.into(),
            pos,
            font: font.into(),
            color: color.to_string(),
            outline: None,
            centered: true,
        }
    }

    fn outlined_text(text: impl Into<String>, pos: Vec2, font: impl Into<String>, color: &str) -> Self {
        DrawCmd::Text {
            text: text.into(),
            pos,
            font: font.into(),
            color: color.to_string(),
            outline: Some(Outline::black()),
            centered: true,
        }
    }
}

/// Largest rect with the image's aspect ratio that fits centred in `target`
///
/// Returns `None` for images that have not loaded yet (zero natural size).
pub fn fit_aspect(natural_w: f32, natural_h: f32, target: Rect) -> Option<Rect> {
    if natural_w <= 0.0 || natural_h <= 0.0 {
        return None;
    }
    let scale = (target.w / natural_w).min(target.h / natural_h);
    let (w, h) = (natural_w * scale, natural_h * scale);
    Some(Rect::new(
        target.x + (target.w - w) / 2.0,
        target.y + (target.h - h) / 2.0,
        w,
        h,
    ))
}

/// Left edge of the cage slot `index` along the ground
pub fn cage_x(viewport_width: f32, index: u32) -> f32 {
    let start = (viewport_width - MAX_CAGES as f32 * CAGE_SPACING) / 2.0 + CAGE_SPACING / 2.0;
    start + index as f32 * CAGE_SPACING - CAGE_SIZE / 2.0
}

/// Combo badge scale for a frame
pub fn combo_pulse(frame: u64, reduced_motion: bool) -> f32 {
    if reduced_motion {
        1.0
    } else {
        1.0 + ((frame as f64 * 0.2).sin() * 0.1) as f32
    }
}

/// Build the full frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(64 + state.eggs.len() * 5 + state.particles.len());
    let vp = state.viewport;

    let shaking = state.screen_shake_ticks > 0 && settings.effective_screen_shake();
    if shaking {
        cmds.push(DrawCmd::push(Vec2::new(SCREEN_SHAKE_OFFSET, 0.0), 0.0, Vec2::ONE));
    }

    // Background
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, 0.0, vp.width, vp.height),
        color: SKY.to_string(),
    });
    for pos in [Vec2::new(30.0, 80.0), Vec2::new(vp.width - 80.0, 120.0)] {
        cmds.push(DrawCmd::Text {
            text: CLOUD.to_string(),
            pos,
            font: "60px Arial".to_string(),
            color: SKY.to_string(),
            outline: None,
            centered: false,
        });
    }
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, vp.height - GROUND_HEIGHT, vp.width, GROUND_HEIGHT),
        color: GROUND.to_string(),
    });

    for i in 0..state.cages.min(MAX_CAGES) {
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Cage,
            rect: Rect::new(cage_x(vp.width, i), vp.height - 50.0, CAGE_SIZE, CAGE_SIZE),
        });
    }

    push_player(&mut cmds, state, settings);

    for egg in &state.eggs {
        let half = egg.size / 2.0;
        cmds.push(DrawCmd::push(egg.center(), egg.rotation, Vec2::ONE));
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Egg,
            rect: Rect::new(-half, -half, egg.size, egg.size),
        });
        let font = "bold 9px Arial";
        cmds.push(DrawCmd::centered_text(&egg.date_code, Vec2::new(0.0, -10.0), font, EGG_CODE_COLOR));
        cmds.push(DrawCmd::centered_text(&egg.farm_code, Vec2::new(0.0, 10.0), font, EGG_CODE_COLOR));
        cmds.push(DrawCmd::PopTransform);

        if settings.debug_collision {
            cmds.push(debug_rect(egg.hitbox(), DEBUG_HITBOX));
            cmds.push(debug_rect(egg.bounds(), &css_color(egg.kind.color())));
        }
    }

    for item in &state.items {
        let half = item.size / 2.0;
        cmds.push(DrawCmd::push(item.center(), item.angle.sin() * 0.2, Vec2::ONE));
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::for_item(item.kind),
            rect: Rect::new(-half, -half, item.size, item.size),
        });
        cmds.push(DrawCmd::PopTransform);

        if settings.debug_collision {
            cmds.push(debug_rect(item.hitbox(), DEBUG_HITBOX));
        }
    }

    if settings.particles {
        for p in &state.particles {
            cmds.push(DrawCmd::Circle {
                center: p.pos,
                radius: PARTICLE_RADIUS,
                color: css_color(p.color),
                alpha: p.life as f32 / PARTICLE_LIFE as f32,
            });
        }
    }

    for ft in &state.floating_texts {
        cmds.push(DrawCmd::outlined_text(&ft.text, ft.pos, "bold 20px Jua", &css_color(ft.color)));
    }

    if shaking {
        cmds.push(DrawCmd::PopTransform);
    }

    cmds
}

fn push_player(cmds: &mut Vec<DrawCmd>, state: &GameState, settings: &Settings) {
    let player = &state.player;
    let center_x = player.pos.x + player.size.x / 2.0;
    let bottom_y = player.pos.y + player.size.y;

    // Squash about the bottom centre, so coordinates below are relative to it
    cmds.push(DrawCmd::push(
        Vec2::new(center_x, bottom_y),
        0.0,
        Vec2::new(player.scale_x, player.scale_y),
    ));
    cmds.push(DrawCmd::Sprite {
        sprite: Sprite::Basket,
        rect: Rect::new(-player.size.x / 2.0, -player.size.y, player.size.x, player.size.y),
    });
    cmds.push(DrawCmd::outlined_text(
        format!("{}점", state.score),
        Vec2::new(0.0, -player.size.y / 2.0 - 10.0),
        format!("bold {}px Jua", player.size.x * 0.2),
        "white",
    ));
    cmds.push(DrawCmd::PopTransform);

    if state.combo >= 2 {
        let scale = combo_pulse(state.frame, settings.reduced_motion);
        cmds.push(DrawCmd::push(
            player.pos + player.size - Vec2::splat(20.0),
            0.0,
            Vec2::splat(scale),
        ));
        cmds.push(DrawCmd::centered_text("🔥", Vec2::ZERO, "50px Arial", "white"));
        cmds.push(DrawCmd::outlined_text(
            state.combo.to_string(),
            Vec2::new(0.0, 5.0),
            "bold 24px Jua",
            "white",
        ));
        cmds.push(DrawCmd::PopTransform);
    }

    if settings.debug_collision {
        cmds.push(debug_rect(player.hitbox(), DEBUG_HITBOX));
        cmds.push(debug_rect(player.bounds(), DEBUG_BOUNDS));
    }
}

fn debug_rect(rect: Rect, color: &str) -> DrawCmd {
    DrawCmd::StrokeRect {
        rect,
        color: color.to_string(),
        width: 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Egg, EggKind, Viewport};
    use chrono::NaiveDate;

    fn state() -> GameState {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        GameState::new(3, Viewport::default(), date)
    }

    fn count(cmds: &[DrawCmd], pred: impl Fn(&DrawCmd) -> bool) -> usize {
        cmds.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_fit_aspect() {
        let target = Rect::new(0.0, 0.0, 80.0, 80.0);
        let fitted = fit_aspect(100.0, 200.0, target).unwrap();
        assert_eq!(fitted, Rect::new(20.0, 0.0, 40.0, 80.0));
        assert_eq!(fit_aspect(0.0, 50.0, target), None);
    }

    #[test]
    fn test_cage_slots_are_centred() {
        let xs: Vec<f32> = (0..MAX_CAGES).map(|i| cage_x(480.0, i)).collect();
        assert_eq!(xs, vec![120.0, 170.0, 220.0, 270.0, 320.0]);
        // Middle slot centred on the canvas
        assert_eq!(xs[2] + CAGE_SIZE / 2.0, 240.0);
    }

    #[test]
    fn test_transforms_balanced() {
        let mut state = state();
        state.combo = 4;
        state.screen_shake_ticks = 2;
        state.eggs.push(Egg {
            pos: Vec2::new(100.0, 100.0),
            size: EGG_SIZE,
            vx: 0.0,
            speed: 3.0,
            rotation: 0.05,
            kind: EggKind::Standard,
            date_code: "0501".into(),
            farm_code: "ABCDE 2".into(),
        });
        let cmds = build_scene(&state, &Settings::default());
        let pushes = count(&cmds, |c| matches!(c, DrawCmd::PushTransform { .. }));
        let pops = count(&cmds, |c| matches!(c, DrawCmd::PopTransform));
        assert_eq!(pushes, pops);
        // shake + player + badge + egg
        assert_eq!(pushes, 4);
    }

    #[test]
    fn test_score_and_cages_drawn() {
        let mut state = state();
        state.score = 120;
        state.cages = 3;
        let cmds = build_scene(&state, &Settings::default());
        assert_eq!(
            count(&cmds, |c| matches!(c, DrawCmd::Sprite { sprite: Sprite::Cage, .. })),
            3
        );
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "120점")));
    }

    #[test]
    fn test_combo_badge_threshold() {
        let mut state = state();
        state.combo = 1;
        let has_badge = |cmds: &[DrawCmd]| {
            cmds.iter().any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "🔥"))
        };
        assert!(!has_badge(&build_scene(&state, &Settings::default())));
        state.combo = 2;
        assert!(has_badge(&build_scene(&state, &Settings::default())));
    }

    #[test]
    fn test_settings_gate_effects() {
        let mut state = state();
        state.screen_shake_ticks = 3;
        state.spawn_burst(Vec2::new(50.0, 50.0), COLOR_GOLD);

        let quiet = Settings {
            particles: false,
            reduced_motion: true,
            ..Default::default()
        };
        let cmds = build_scene(&state, &quiet);
        assert_eq!(count(&cmds, |c| matches!(c, DrawCmd::Circle { .. })), 0);
        assert!(!matches!(cmds[0], DrawCmd::PushTransform { .. }));

        let cmds = build_scene(&state, &Settings::default());
        assert_eq!(count(&cmds, |c| matches!(c, DrawCmd::Circle { .. })), PARTICLE_BURST);
        assert!(matches!(cmds[0], DrawCmd::PushTransform { .. }));
    }

    #[test]
    fn test_debug_hitboxes() {
        let mut state = state();
        state.eggs.push(Egg {
            pos: Vec2::new(40.0, 40.0),
            size: EGG_SIZE,
            vx: 0.0,
            speed: 3.0,
            rotation: 0.0,
            kind: EggKind::Battery,
            date_code: "0501".into(),
            farm_code: "ABCDE 4".into(),
        });
        let debug = Settings {
            debug_collision: true,
            ..Default::default()
        };
        let cmds = build_scene(&state, &debug);
        assert!(cmds.contains(&DrawCmd::StrokeRect {
            rect: state.player.hitbox(),
            color: DEBUG_HITBOX.to_string(),
            width: 2.0,
        }));
        assert!(cmds.contains(&DrawCmd::StrokeRect {
            rect: state.eggs[0].bounds(),
            color: "#DC3545".to_string(),
            width: 2.0,
        }));
        assert_eq!(
            count(&build_scene(&state, &Settings::default()), |c| matches!(
                c,
                DrawCmd::StrokeRect { .. }
            )),
            0
        );
    }

    #[test]
    fn test_pulse() {
        assert_eq!(combo_pulse(0, false), 1.0);
        assert_eq!(combo_pulse(123, true), 1.0);
        for frame in 0..200 {
            let s = combo_pulse(frame, false);
            assert!((0.9..=1.1).contains(&s));
        }
    }
}
