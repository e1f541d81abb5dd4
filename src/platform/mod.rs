//! Platform abstraction layer
//!
//! Contracts for the collaborators living outside the simulation:
//! - Input (logical actions, key mapping)
//! - Rendering (frame hand-off)
//! - Audio (cue playback)
//! - Visual effects (explosion requests)

use crate::sim::{AudioCue, Explosion, RenderFrame, TickInput};

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Shoot,
    Pause,
    Start,
}

impl Action {
    /// Map a browser-style key name (`KeyboardEvent.key`) to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Action::MoveRight),
            " " | "Space" => Some(Action::Shoot),
            "p" | "P" => Some(Action::Pause),
            "Enter" => Some(Action::Start),
            _ => None,
        }
    }
}

impl TickInput {
    /// Build a snapshot from the set of currently active actions
    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        let mut input = TickInput::default();
        for action in actions {
            match action {
                Action::MoveLeft => input.move_left = true,
                Action::MoveRight => input.move_right = true,
                Action::Shoot => input.shoot = true,
                Action::Pause => input.pause = true,
                Action::Start => input.start = true,
            }
        }
        input
    }
}

/// Receives the entity snapshot and HUD once per tick
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame<'_>);
}

/// Plays discrete sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Spawns cosmetic explosions
pub trait EffectsSink {
    fn explode(&mut self, explosion: Explosion);
}

/// Sink that drops everything (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &RenderFrame<'_>) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _cue: AudioCue) {}
}

impl EffectsSink for NullSink {
    fn explode(&mut self, _explosion: Explosion) {}
}
