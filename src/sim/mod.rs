//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and storage concerns:
//! - One call to `tick` per display refresh
//! - Seeded RNG only
//! - Removals compact a collection before the next pass reads it
//! - Side effects leave as `GameEvent`s

pub mod collision;
pub mod event;
pub mod frame;
pub mod movement;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use event::{AudioCue, ColorHint, Explosion, GameEvent, GameOverCause};
pub use frame::{Hud, PowerUpStatus, RenderFrame};
pub use rect::{Rect, overlaps};
pub use spawn::{build_barriers, build_enemy_wave, maybe_spawn_power_up, maybe_spawn_ufo};
pub use state::{
    ActivePowerUp, Barrier, BarrierBlock, Bullet, Enemy, EnemyTier, Formation, GamePhase,
    GameState, Player, PowerUp, PowerUpKind, TimedPowerUp, Ufo,
};
pub use tick::{TickInput, begin, level_up, tick, toggle_pause};
