//! End-to-end runs through the public API

use chrono::NaiveDate;
use glam::Vec2;

use egg_catcher::Session;
use egg_catcher::consts::*;
use egg_catcher::platform::{NullAudio, NullOverlay, NullRenderer};
use egg_catcher::sim::{Egg, EggKind, GameEvent, GamePhase, GameState, Viewport, tick};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn new_state(seed: u64) -> GameState {
    GameState::new(seed, Viewport::default(), date())
}

/// Motionless egg whose box sits on the basket's centre
fn egg_on_player(state: &GameState, kind: EggKind) -> Egg {
    Egg {
        pos: state.player.center() - Vec2::splat(EGG_SIZE / 2.0),
        size: EGG_SIZE,
        vx: 0.0,
        speed: 0.0,
        rotation: 0.0,
        kind,
        date_code: state.date_code.clone(),
        farm_code: "TEST0 1".into(),
    }
}

#[test]
fn difficulty_follows_score() {
    let mut state = new_state(1);
    state.score = 45;

    tick(&mut state);
    assert!((state.speed_multiplier - 1.09).abs() < 1e-9);

    // Interval is floor(60 / 1.09) = 55
    while state.frame < 54 {
        tick(&mut state);
    }
    assert!(state.eggs.is_empty());
    tick(&mut state);
    assert_eq!(state.frame, 55);
    assert_eq!(state.eggs.len(), 1);
}

#[test]
fn fifth_good_catch_earns_combo_bonus() {
    let mut state = new_state(2);
    state.combo = 4;
    state.score = 100;
    let egg = egg_on_player(&state, EggKind::Premium);
    state.eggs.push(egg);

    tick(&mut state);

    assert_eq!(state.combo, 5);
    assert_eq!(state.score, 115);
    assert!(state.drain_events().contains(&GameEvent::CatchGood { points: 15 }));
}

#[test]
fn cage_overflow_ends_run() {
    let mut state = new_state(3);
    state.cages = 4;
    state.score = 60;
    let egg = egg_on_player(&state, EggKind::Battery);
    state.eggs.push(egg);

    tick(&mut state);

    assert_eq!(state.cages, 6);
    assert_eq!(state.phase, GamePhase::Ended);
    assert_eq!(state.final_score, Some(60));

    // Frozen from here on
    let frame = state.frame;
    tick(&mut state);
    assert_eq!(state.frame, frame);
}

#[test]
fn missed_egg_is_removed_silently() {
    let mut state = new_state(4);
    state.eggs.push(Egg {
        pos: Vec2::new(0.0, state.viewport.height - 1.0),
        size: EGG_SIZE,
        vx: 0.0,
        speed: 5.0,
        rotation: 0.0,
        kind: EggKind::Caged,
        date_code: state.date_code.clone(),
        farm_code: "TEST0 3".into(),
    });

    tick(&mut state);

    assert!(state.eggs.is_empty());
    assert_eq!(state.cages, 0);
    assert!(state.drain_events().is_empty());
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let mut session = Session::new(seed, Viewport::default(), date(), NullAudio, NullOverlay);
        let mut renderer = NullRenderer;
        session.start_game();
        for frame in 0..2_000u32 {
            // Sweep the basket back and forth
            let x = (frame % 480) as f32;
            session.set_player_target_x(x);
            if !session.frame(&mut renderer) {
                break;
            }
        }
        let state = session.state();
        (
            state.score,
            state.cages,
            state.frame,
            state.eggs.iter().map(|e| e.farm_code.clone()).collect::<Vec<_>>(),
        )
    };

    assert_eq!(run(77), run(77));
}
