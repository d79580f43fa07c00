//! Platform abstraction layer
//!
//! The simulation never talks to the browser. It leaves `GameEvent`s in the
//! state and the session hands them to these collaborators:
//! - `Audio`: sound effects and the ambient track
//! - `EffectOverlay`: full-screen magnet/bomb tint
//! - `Renderer`: draws a frame from a read-only state borrow
//!
//! Collaborators are fire-and-forget. Failures are logged at the boundary
//! and never reach the simulation.

use crate::sim::{GameEvent, GameState};

/// Sound output
pub trait Audio {
    fn play_catch_good(&mut self);
    fn play_catch_bad(&mut self);
    fn play_item_pickup(&mut self);
    fn start_ambient(&mut self);
    fn stop_ambient(&mut self);
}

/// Full-screen effect tint
pub trait EffectOverlay {
    fn set_magnet_active(&mut self, active: bool);
    fn set_hazard_active(&mut self, active: bool);
}

/// Frame output
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Audio that does nothing (headless runs, muted browsers)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play_catch_good(&mut self) {}
    fn play_catch_bad(&mut self) {}
    fn play_item_pickup(&mut self) {}
    fn start_ambient(&mut self) {}
    fn stop_ambient(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl EffectOverlay for NullOverlay {
    fn set_magnet_active(&mut self, _active: bool) {}
    fn set_hazard_active(&mut self, _active: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Route simulation feedback to the collaborators
pub fn dispatch_events(
    events: &[GameEvent],
    audio: &mut impl Audio,
    overlay: &mut impl EffectOverlay,
) {
    for event in events {
        match *event {
            GameEvent::CatchGood { .. } => audio.play_catch_good(),
            GameEvent::CatchBad { .. } => audio.play_catch_bad(),
            GameEvent::ItemPickup(_) => audio.play_item_pickup(),
            GameEvent::MagnetChanged(active) => overlay.set_magnet_active(active),
            GameEvent::HazardChanged(active) => overlay.set_hazard_active(active),
            GameEvent::GameOver { final_score } => {
                audio.stop_ambient();
                audio.play_catch_bad();
                overlay.set_magnet_active(false);
                overlay.set_hazard_active(false);
                log::info!("Final score: {}", final_score);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Collaborators that record what they were asked to do

    use super::*;

    #[derive(Debug, Default, Clone)]
    pub struct RecordingAudio {
        pub calls: Vec<&'static str>,
    }

    impl Audio for RecordingAudio {
        fn play_catch_good(&mut self) {
            self.calls.push("good");
        }
        fn play_catch_bad(&mut self) {
            self.calls.push("bad");
        }
        fn play_item_pickup(&mut self) {
            self.calls.push("item");
        }
        fn start_ambient(&mut self) {
            self.calls.push("start_ambient");
        }
        fn stop_ambient(&mut self) {
            self.calls.push("stop_ambient");
        }
    }

    #[derive(Debug, Default, Clone)]
    pub struct RecordingOverlay {
        pub magnet: bool,
        pub hazard: bool,
        pub changes: usize,
    }

    impl EffectOverlay for RecordingOverlay {
        fn set_magnet_active(&mut self, active: bool) {
            self.magnet = active;
            self.changes += 1;
        }
        fn set_hazard_active(&mut self, active: bool) {
            self.hazard = active;
            self.changes += 1;
        }
    }
}
