//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation one frame.

use glam::Vec2;

use super::collision::collides;
use super::difficulty::{spawn_interval, speed_multiplier};
use super::kinds::ItemKind;
use super::schedule::ScheduledAction;
use super::spawn::spawn_due;
use super::state::{Egg, GameEvent, GamePhase, GameState, Item};
use crate::consts::*;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    // Nothing moves once the run is over
    if state.phase == GamePhase::Ended {
        return;
    }

    state.frame += 1;

    // Timers queued by earlier frames (bomb fuse)
    for action in state.schedule.drain_due(state.frame) {
        match action {
            ScheduledAction::EndGame => {
                state.end_game();
            }
        }
    }
    if state.phase == GamePhase::Ended {
        return;
    }

    // Difficulty and spawning
    state.speed_multiplier = speed_multiplier(state.score);
    let interval = spawn_interval(state.score);
    spawn_due(state, interval);

    // Magnet countdown
    if state.magnet_ticks > 0 {
        state.magnet_ticks -= 1;
        if state.magnet_ticks == 0 {
            state.events.push(GameEvent::MagnetChanged(false));
        }
    }
    state.screen_shake_ticks = state.screen_shake_ticks.saturating_sub(1);

    let viewport = state.viewport;
    state.player.update(viewport);

    update_eggs(state);
    // A catch may have ended the run; pickups no longer apply
    if state.is_running() {
        update_items(state);
    }
    update_effects(state);
}

/// Move eggs, resolve catches and drop the ones that fell off screen
fn update_eggs(state: &mut GameState) {
    let magnet_active = state.magnet_ticks > 0;
    let player_center_x = state.player.center().x;
    let bottom = state.viewport.height;

    let mut caught: Vec<Egg> = Vec::new();
    let eggs = std::mem::take(&mut state.eggs);
    let mut survivors = Vec::with_capacity(eggs.len());

    for mut egg in eggs {
        if magnet_active {
            // Horizontal pull only; the fall speed is untouched
            let dist_x = player_center_x - egg.center().x;
            egg.vx = (egg.vx + dist_x * MAGNET_PULL).clamp(-MAGNET_MAX_VX, MAGNET_MAX_VX);
            egg.pos.x += egg.vx;
            egg.pos.y += egg.speed;
            egg.vx *= MAGNET_DAMPING;
        } else {
            egg.pos.y += egg.speed;
            egg.vx = 0.0;
        }

        if collides(&egg, &state.player) {
            caught.push(egg);
        } else if egg.pos.y <= bottom {
            survivors.push(egg);
        }
    }
    state.eggs = survivors;

    // Newest first, stopping at the catch that ends the run
    for egg in caught.iter().rev() {
        if !state.is_running() {
            break;
        }
        catch_egg(state, egg);
    }
}

/// Score a caught egg
fn catch_egg(state: &mut GameState, egg: &Egg) {
    state.player.bounce();
    let center = egg.center();

    if egg.kind.is_good() {
        state.combo += 1;
        let points = egg.kind.score() + combo_bonus(state.combo);
        state.score += points;

        state.spawn_burst(center, COLOR_GOLD);
        state.show_text(format!("+{}", points), egg.pos, COLOR_WHITE);
        state.events.push(GameEvent::CatchGood { points });
    } else {
        state.combo = 0;
        let penalty = egg.kind.cage_penalty();
        state.cages += penalty;

        state.spawn_burst(center, COLOR_RED);
        state.show_text(format!("+{} 🏚️", penalty), egg.pos, COLOR_RED);
        state.screen_shake_ticks = SCREEN_SHAKE_TICKS;
        state.events.push(GameEvent::CatchBad {
            cages_added: penalty,
        });

        if state.cages >= MAX_CAGES {
            state.end_game();
        }
    }
}

/// Extra points for every full streak of `COMBO_STEP` good catches
pub fn combo_bonus(combo: u32) -> i64 {
    i64::from(combo / COMBO_STEP * COMBO_STEP)
}

/// Move items and apply pickups
fn update_items(state: &mut GameState) {
    let bottom = state.viewport.height;

    let mut caught: Vec<Item> = Vec::new();
    let items = std::mem::take(&mut state.items);
    let mut survivors = Vec::with_capacity(items.len());

    for mut item in items {
        item.pos.y += item.speed;
        item.angle += ITEM_SPIN;

        if collides(&item, &state.player) {
            caught.push(item);
        } else if item.pos.y <= bottom {
            survivors.push(item);
        }
    }
    state.items = survivors;

    for item in caught.iter().rev() {
        pick_up_item(state, item);
    }
}

fn pick_up_item(state: &mut GameState, item: &Item) {
    state.player.bounce();
    state.events.push(GameEvent::ItemPickup(item.kind));
    let label_pos = state.player.pos - Vec2::new(0.0, 20.0);

    match item.kind {
        ItemKind::Magnet => {
            // Re-catching restarts the timer rather than stacking
            state.magnet_ticks = item.kind.duration().unwrap_or(0);
            state.events.push(GameEvent::MagnetChanged(true));
            state.show_text("🧲 MAGNET!", label_pos, COLOR_MAGNET);
            log::debug!("Magnet active for {} ticks", state.magnet_ticks);
        }
        ItemKind::Bomb => {
            state.spawn_burst(item.center(), COLOR_BLACK);
            state.show_text("💣 BOOM!", label_pos, COLOR_BLACK);
            state.events.push(GameEvent::HazardChanged(true));
            // Let the explosion show for a moment before freezing
            state
                .schedule
                .schedule(state.frame, BOMB_GAME_OVER_DELAY, ScheduledAction::EndGame);
            log::debug!("Bomb caught at frame {}", state.frame);
        }
    }
}

/// Particles and floating texts
fn update_effects(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    for text in state.floating_texts.iter_mut() {
        text.pos.y -= FLOATING_TEXT_RISE;
        text.life = text.life.saturating_sub(1);
    }
    state.floating_texts.retain(|t| t.life > 0);
}
