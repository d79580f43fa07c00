//! Game session: lifecycle API and the per-frame pump
//!
//! The session owns the simulation state and the collaborators. Browser
//! callbacks share it through `Rc<RefCell<..>>` and only ever call the input
//! and lifecycle methods; entity collections are touched by `tick` alone.

use chrono::NaiveDate;

use crate::platform::{Audio, EffectOverlay, Renderer, dispatch_events};
use crate::sim::{GameState, Viewport, tick};

pub struct Session<A: Audio, O: EffectOverlay> {
    state: GameState,
    audio: A,
    overlay: O,
    /// Set by `start_game`; the pump idles on the start screen until then
    started: bool,
}

impl<A: Audio, O: EffectOverlay> Session<A, O> {
    pub fn new(seed: u64, viewport: Viewport, date: NaiveDate, audio: A, overlay: O) -> Self {
        Self {
            state: GameState::new(seed, viewport, date),
            audio,
            overlay,
            started: false,
        }
    }

    /// Begin a fresh run
    pub fn start_game(&mut self) {
        self.state.reset();
        self.started = true;
        self.overlay.set_magnet_active(false);
        self.overlay.set_hazard_active(false);
        self.audio.start_ambient();
        log::info!(
            "Game started ({}x{} viewport)",
            self.state.viewport.width,
            self.state.viewport.height
        );
    }

    /// Play again after a game over
    pub fn reset_game(&mut self) {
        self.start_game();
    }

    /// Run one tick and one render; returns whether the pump should continue
    pub fn frame(&mut self, renderer: &mut impl Renderer) -> bool {
        if !self.is_running() {
            return false;
        }

        tick(&mut self.state);
        let events = self.state.drain_events();
        dispatch_events(&events, &mut self.audio, &mut self.overlay);
        renderer.render(&self.state);

        self.state.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.started && self.state.is_running()
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    /// Score of the last finished run
    pub fn final_score(&self) -> Option<i64> {
        self.state.final_score
    }

    /// Pointer/touch x relative to the canvas
    pub fn set_player_target_x(&mut self, canvas_x: f32) {
        if self.is_running() {
            self.state.set_player_target_x(canvas_x);
        }
    }

    /// Keyboard step
    pub fn nudge_player_target(&mut self, dx: f32) {
        if self.is_running() {
            self.state.nudge_player_target(dx);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.state.set_date(date);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn overlay(&self) -> &O {
        &self.overlay
    }
}
