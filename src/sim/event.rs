//! Side-channel events emitted by the simulation
//!
//! The simulation never talks to audio, particles or persistence directly.
//! It pushes events onto `GameState::events` and the driver drains them once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete sound cues (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player fired
    ShotFired,
    /// An enemy in the formation fired
    EnemyShot,
    /// Enemy destroyed by a player bullet
    EnemyKilled,
    /// Player ship hit by an enemy bullet
    PlayerHit,
    /// Bonus UFO destroyed
    UfoDestroyed,
    /// Bonus UFO entered the playfield
    UfoSpawned,
    /// Power-up caught
    PowerUpCollected,
    /// Wave cleared
    LevelUp,
}

/// Palette hint for explosion particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorHint {
    Enemy,
    Ufo,
    Player,
}

impl ColorHint {
    /// 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            ColorHint::Enemy => 0xff8800,
            ColorHint::Ufo => 0xff00ff,
            ColorHint::Player => 0x00ff00,
        }
    }
}

/// Request for a cosmetic explosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub position: Vec2,
    pub color: ColorHint,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Last life lost to an enemy bullet
    LivesExhausted,
    /// Formation reached the player's line
    Breach,
}

/// Events produced during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(AudioCue),
    Explosion(Explosion),
    /// Formation cleared, `level` is the new level
    LevelCleared { level: u32 },
    /// Run ended with the final score
    GameOver { score: u64, cause: GameOverCause },
}
