//! Audio system using Web Audio API
//!
//! Catch sounds are synthesized tones; only the ambient loop is a file.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::platform::Audio;
use crate::settings::Settings;

/// Looping background track
const BGM_PATH: &str = "bgm.mp3";

/// Peak gain of a single tone before volume settings
const TONE_GAIN: f32 = 0.1;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    bgm: Option<HtmlAudioElement>,
    settings: Settings,
    /// Whether the ambient track should be playing (a run is in progress)
    ambient_wanted: bool,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }

        let bgm = HtmlAudioElement::new_with_src(BGM_PATH).ok();
        match &bgm {
            Some(bgm) => bgm.set_loop(true),
            None => log::warn!("Failed to create audio element for {}", BGM_PATH),
        }

        let manager = Self {
            ctx,
            bgm,
            settings,
            ambient_wanted: false,
        };
        manager.apply_music_volume();
        manager
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flip mute; pauses or resumes the ambient track to match
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.settings.save();
        if muted {
            if let Some(bgm) = &self.bgm {
                let _ = bgm.pause();
            }
        } else if self.ambient_wanted {
            self.play_bgm();
        }
        self.apply_music_volume();
        muted
    }

    fn apply_music_volume(&self) {
        if let Some(bgm) = &self.bgm {
            bgm.set_volume(self.settings.effective_music_volume() as f64);
        }
    }

    fn play_bgm(&self) {
        if let Some(bgm) = &self.bgm {
            // Autoplay rejections surface as a rejected promise we don't await
            if let Err(e) = bgm.play() {
                log::warn!("Background music failed to start: {:?}", e);
            }
        }
    }

    /// Context to play an effect on, or None when silent
    fn active_ctx(&self) -> Option<(&AudioContext, f32)> {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        self.resume();
        Some((ctx, vol))
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single tone with an exponential fade, starting `delay` seconds from now
    fn tone(
        &self,
        ctx: &AudioContext,
        vol: f32,
        freq: f32,
        osc_type: OscillatorType,
        delay: f64,
        duration: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(TONE_GAIN * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }
}

impl Audio for AudioManager {
    /// Rising two-note chime
    fn play_catch_good(&mut self) {
        let Some((ctx, vol)) = self.active_ctx() else { return };
        self.tone(ctx, vol, 880.0, OscillatorType::Sine, 0.0, 0.1);
        self.tone(ctx, vol, 1109.0, OscillatorType::Sine, 0.05, 0.2);
    }

    /// Low buzz
    fn play_catch_bad(&mut self) {
        let Some((ctx, vol)) = self.active_ctx() else { return };
        self.tone(ctx, vol, 150.0, OscillatorType::Sawtooth, 0.0, 0.3);
        self.tone(ctx, vol, 100.0, OscillatorType::Square, 0.0, 0.3);
    }

    /// Upward sweep
    fn play_item_pickup(&mut self) {
        let Some((ctx, vol)) = self.active_ctx() else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency().linear_ramp_to_value_at_time(880.0, t + 0.3).ok();
        gain.gain().set_value_at_time(TONE_GAIN * vol, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    fn start_ambient(&mut self) {
        self.ambient_wanted = true;
        self.resume();
        if !self.settings.muted {
            self.play_bgm();
        }
    }

    fn stop_ambient(&mut self) {
        self.ambient_wanted = false;
        if let Some(bgm) = &self.bgm {
            let _ = bgm.pause();
            bgm.set_current_time(0.0);
        }
    }
}
