//! Egg and item spawning
//!
//! All randomness comes from the state's seeded RNG, so a seed plus an input
//! sequence always replays the same game.

use glam::Vec2;

use super::kinds::{EggKind, ItemKind};
use super::state::{Egg, GameState, Item};
use crate::consts::*;

/// Characters used for farm codes (base-36, upper case)
const FARM_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const FARM_CODE_LEN: usize = 5;

/// Spawn whatever is due on the current frame
pub fn spawn_due(state: &mut GameState, spawn_interval: u32) {
    if state.frame % u64::from(spawn_interval) == 0 {
        spawn_egg(state);
    }

    if state.frame % ITEM_SPAWN_INTERVAL == 0 && f64::from(state.random()) < ITEM_SPAWN_CHANCE {
        spawn_item(state);
    }
}

/// Drop a random egg from above the viewport
pub fn spawn_egg(state: &mut GameState) {
    let kind = EggKind::ALL[pick_index(state, EggKind::ALL.len())];
    let size = EGG_SIZE;
    let x = state.random() * (state.viewport.width - size);
    let speed = (EGG_BASE_SPEED + state.random() * SPEED_JITTER) * state.speed_multiplier as f32;
    let rotation = (state.random() - 0.5) * EGG_MAX_TILT * 2.0;
    let farm_code = format!("{} {}", farm_code(state), kind.label());

    log::debug!("Spawned {:?} egg at x={:.0} speed={:.2}", kind, x, speed);

    state.eggs.push(Egg {
        pos: Vec2::new(x, SPAWN_Y),
        size,
        vx: 0.0,
        speed,
        rotation,
        kind,
        date_code: state.date_code.clone(),
        farm_code,
    });
}

/// Drop a random power-up/hazard from above the viewport
pub fn spawn_item(state: &mut GameState) {
    let kind = ItemKind::ALL[pick_index(state, ItemKind::ALL.len())];
    let size = ITEM_SIZE;
    let x = state.random() * (state.viewport.width - size);
    let speed = (ITEM_BASE_SPEED + state.random() * SPEED_JITTER) * state.speed_multiplier as f32;

    log::debug!("Spawned {:?} item at x={:.0}", kind, x);

    state.items.push(Item {
        pos: Vec2::new(x, SPAWN_Y),
        size,
        speed,
        angle: 0.0,
        kind,
    });
}

/// Uniform index in `0..len`
fn pick_index(state: &mut GameState, len: usize) -> usize {
    ((state.random() * len as f32) as usize).min(len - 1)
}

/// Random five-character farm code
fn farm_code(state: &mut GameState) -> String {
    (0..FARM_CODE_LEN)
        .map(|_| FARM_ALPHABET[pick_index(state, FARM_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use chrono::NaiveDate;

    fn state(seed: u64) -> GameState {
        let date = NaiveDate::from_ymd_opt(2025, 11, 23).unwrap();
        GameState::new(seed, Viewport::default(), date)
    }

    #[test]
    fn test_egg_spawn_shape() {
        let mut state = state(3);
        for _ in 0..200 {
            spawn_egg(&mut state);
        }
        for egg in &state.eggs {
            assert_eq!(egg.pos.y, SPAWN_Y);
            assert!(egg.pos.x >= 0.0 && egg.pos.x <= state.viewport.width - EGG_SIZE);
            assert!(egg.speed >= 3.0 && egg.speed <= 5.0);
            assert!(egg.rotation.abs() <= EGG_MAX_TILT + 1e-6);
            assert_eq!(egg.vx, 0.0);
            assert_eq!(egg.date_code, "1123");

            let (farm, label) = egg.farm_code.split_at(FARM_CODE_LEN);
            assert!(farm.bytes().all(|b| FARM_ALPHABET.contains(&b)));
            assert_eq!(label, format!(" {}", egg.kind.label()));
        }
    }

    #[test]
    fn test_every_variant_spawns() {
        let mut state = state(11);
        for _ in 0..400 {
            spawn_egg(&mut state);
            spawn_item(&mut state);
        }
        for kind in EggKind::ALL {
            assert!(state.eggs.iter().any(|e| e.kind == kind), "{:?} never spawned", kind);
        }
        for kind in ItemKind::ALL {
            assert!(state.items.iter().any(|i| i.kind == kind), "{:?} never spawned", kind);
        }
    }

    #[test]
    fn test_speed_scales_with_multiplier() {
        let mut state = state(5);
        state.speed_multiplier = 2.0;
        spawn_egg(&mut state);
        spawn_item(&mut state);
        assert!(state.eggs[0].speed >= 6.0 && state.eggs[0].speed <= 10.0);
        assert!(state.items[0].speed >= 8.0 && state.items[0].speed <= 12.0);
    }

    #[test]
    fn test_spawn_schedule() {
        let mut state = state(9);
        state.frame = 59;
        spawn_due(&mut state, 60);
        assert!(state.eggs.is_empty());
        state.frame = 120;
        spawn_due(&mut state, 60);
        assert_eq!(state.eggs.len(), 1);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_items_spawn_most_of_the_time() {
        let mut state = state(21);
        let mut spawned = 0;
        for i in 1..=200u64 {
            state.frame = i * ITEM_SPAWN_INTERVAL;
            let before = state.items.len();
            // Interval that never lines up with item frames
            spawn_due(&mut state, 7);
            if state.items.len() > before {
                spawned += 1;
            }
        }
        assert!(spawned > 100 && spawned < 180, "spawned {} of 200", spawned);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = state(77);
        let mut b = state(77);
        for _ in 0..10 {
            spawn_egg(&mut a);
            spawn_egg(&mut b);
        }
        for (ea, eb) in a.eggs.iter().zip(&b.eggs) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.farm_code, eb.farm_code);
        }
    }
}
