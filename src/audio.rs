//! Cue tones for simulation events
//!
//! Procedurally generated with Web Audio oscillators - no sound files.
//! The tone tables are plain data so they work (and test) natively; only
//! `AudioManager` touches the browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Round started
    Start,
    /// Player jumped
    Jump,
    /// Player hit an obstacle
    Collision,
}

/// Oscillator shape, mirrors Web Audio's `OscillatorType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator voice with an exponential pitch sweep and decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCue {
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds after the effect is triggered
    pub delay: f64,
    pub duration: f64,
    pub gain: f32,
    pub waveform: Waveform,
}

impl SoundEffect {
    /// Which cue, if any, an event should trigger
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Collided { .. } => Some(SoundEffect::Collision),
            GameEvent::ObstacleSpawned { .. } => None,
        }
    }

    /// Voices making up this effect
    pub fn tones(self) -> &'static [ToneCue] {
        match self {
            // Quick rising blip
            SoundEffect::Start => &[
                ToneCue {
                    start_hz: 440.0,
                    end_hz: 440.0,
                    delay: 0.0,
                    duration: 0.08,
                    gain: 0.25,
                    waveform: Waveform::Triangle,
                },
                ToneCue {
                    start_hz: 660.0,
                    end_hz: 660.0,
                    delay: 0.08,
                    duration: 0.1,
                    gain: 0.25,
                    waveform: Waveform::Triangle,
                },
            ],
            // Short upward chirp
            SoundEffect::Jump => &[ToneCue {
                start_hz: 300.0,
                end_hz: 600.0,
                delay: 0.0,
                duration: 0.1,
                gain: 0.3,
                waveform: Waveform::Square,
            }],
            // Low buzz falling off
            SoundEffect::Collision => &[
                ToneCue {
                    start_hz: 200.0,
                    end_hz: 60.0,
                    delay: 0.0,
                    duration: 0.3,
                    gain: 0.4,
                    waveform: Waveform::Sawtooth,
                },
                ToneCue {
                    start_hz: 80.0,
                    end_hz: 40.0,
                    delay: 0.0,
                    duration: 0.2,
                    gain: 0.35,
                    waveform: Waveform::Sine,
                },
            ],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, ToneCue, Waveform};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect. Never blocks; failures just skip the cue.
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone, vol);
            }
        }

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

        fn play_tone(&self, ctx: &AudioContext, tone: &ToneCue, vol: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_hz, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();
            if tone.end_hz != tone.start_hz {
                osc.frequency().set_value_at_time(tone.start_hz, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_hz, t + tone.duration)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration + 0.05).ok();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SoundEffect;

    /// Headless stand-in: logs cues instead of playing them
    #[derive(Debug)]
    pub struct AudioManager {
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        pub fn resume(&self) {}

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.muted {
                return;
            }
            log::trace!(
                "cue {:?} at volume {:.2}",
                effect,
                self.master_volume * self.sfx_volume
            );
        }
    }
}
