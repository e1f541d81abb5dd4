//! Render snapshot handed to the drawing collaborator once per tick

use serde::Serialize;

use super::state::{
    Barrier, Bullet, Enemy, GamePhase, GameState, Player, PowerUp, TimedPowerUp, Ufo,
};
use crate::consts::TICKS_PER_SECOND;

/// Active power-up as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUpStatus {
    pub kind: TimedPowerUp,
    /// Whole seconds left, rounded up
    pub seconds_remaining: u32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub high_score: u64,
    pub power_up: Option<PowerUpStatus>,
}

/// Everything a renderer needs for one frame, borrowed from the state
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderFrame<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub barriers: &'a [Barrier],
    pub power_ups: &'a [PowerUp],
    pub ufo: Option<&'a Ufo>,
    pub hud: Hud,
}

impl<'a> RenderFrame<'a> {
    /// Snapshot at the default cadence of 60 ticks per second
    pub fn from_state(state: &'a GameState, high_score: u64) -> Self {
        Self::with_tick_rate(state, high_score, TICKS_PER_SECOND)
    }

    /// Snapshot with HUD seconds derived from the driver's tick rate
    pub fn with_tick_rate(state: &'a GameState, high_score: u64, ticks_per_second: u32) -> Self {
        let ticks_per_second = ticks_per_second.max(1);
        let power_up = state.player.power_up.map(|active| PowerUpStatus {
            kind: active.kind,
            seconds_remaining: active.remaining_ticks.div_ceil(ticks_per_second),
        });

        Self {
            phase: state.phase,
            player: &state.player,
            enemies: &state.enemies,
            player_bullets: &state.player_bullets,
            enemy_bullets: &state.enemy_bullets,
            barriers: &state.barriers,
            power_ups: &state.power_ups,
            ufo: state.ufo.as_ref(),
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
                high_score,
                power_up,
            },
        }
    }
}
