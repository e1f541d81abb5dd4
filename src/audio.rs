//! Audio cues and their tones
//!
//! Every cue is a single procedurally generated beep - no sample files.
//! Synthesis happens in whatever backend implements `AudioSink`.

use serde::{Deserialize, Serialize};

use crate::platform::AudioSink;
use crate::sim::AudioCue;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Square,
    Sine,
    Sawtooth,
}

/// A single beep with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
}

impl Tone {
    const fn new(frequency_hz: f32, duration_secs: f32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            duration_secs,
            waveform,
        }
    }
}

impl AudioCue {
    /// Tone played for this cue
    pub fn tone(&self) -> Tone {
        match self {
            AudioCue::ShotFired => Tone::new(400.0, 0.1, Waveform::Square),
            AudioCue::EnemyShot => Tone::new(200.0, 0.1, Waveform::Square),
            AudioCue::EnemyKilled => Tone::new(300.0, 0.2, Waveform::Square),
            AudioCue::PlayerHit => Tone::new(100.0, 0.3, Waveform::Square),
            AudioCue::UfoDestroyed => Tone::new(500.0, 0.3, Waveform::Sine),
            AudioCue::UfoSpawned => Tone::new(800.0, 0.1, Waveform::Sawtooth),
            AudioCue::PowerUpCollected => Tone::new(600.0, 0.2, Waveform::Sine),
            AudioCue::LevelUp => Tone::new(700.0, 0.5, Waveform::Sine),
        }
    }
}

/// Audio sink that logs the tones it would play.
/// Used by the headless binary in place of a real synthesizer.
#[derive(Debug, Clone)]
pub struct ToneLogger {
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for ToneLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneLogger {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Number of cues actually played
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for ToneLogger {
    fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let tone = cue.tone();
        log::debug!(
            "{:?}: {:?} {}Hz for {}s at {:.2}",
            cue,
            tone.waveform,
            tone.frequency_hz,
            tone.duration_secs,
            vol
        );
        self.played += 1;
    }
}
