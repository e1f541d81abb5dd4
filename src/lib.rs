//! Lockstep Invaders - simulation core for a classic fixed-screen shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, formation movement, collisions, progression)
//! - `platform`: Contracts for the render/audio/effects collaborators and input mapping
//! - `audio`: Cue-to-tone table and a logging audio sink
//! - `highscores`: High score persistence
//! - `settings`: JSON configuration
//! - `session`: Wires the simulation to persistence and the sinks

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, PersistenceError};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the playfield bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Shot cooldowns in ticks
    pub const SHOOT_COOLDOWN: u32 = 20;
    pub const RAPID_FIRE_COOLDOWN: u32 = 10;
    pub const SPREAD_COOLDOWN: u32 = 30;
    /// Power-up duration in ticks (10 seconds)
    pub const POWER_UP_DURATION: u32 = 600;

    /// Enemy grid
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 25.0;
    pub const ENEMY_GRID_ORIGIN_X: f32 = 50.0;
    pub const ENEMY_GRID_ORIGIN_Y: f32 = 50.0;
    pub const ENEMY_SPACING_X: f32 = 50.0;
    pub const ENEMY_SPACING_Y: f32 = 45.0;
    /// Horizontal margin that triggers a formation descent
    pub const FORMATION_EDGE_MARGIN: f32 = 10.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = -7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    /// Horizontal speed of the outer spread shots
    pub const SPREAD_SIDE_SPEED: f32 = 2.0;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_ROWS: usize = 6;
    pub const BARRIER_COLS: usize = 8;
    pub const BARRIER_BLOCK_SIZE: f32 = 10.0;
    pub const BARRIER_WIDTH: f32 = BARRIER_COLS as f32 * BARRIER_BLOCK_SIZE;
    /// Distance from the playfield bottom to the barriers' top edge
    pub const BARRIER_BOTTOM_OFFSET: f32 = 150.0;

    /// Bonus UFO
    pub const UFO_WIDTH: f32 = 50.0;
    pub const UFO_HEIGHT: f32 = 25.0;
    pub const UFO_Y: f32 = 30.0;
    pub const UFO_SPEED: f32 = 2.0;
    pub const UFO_SPAWN_CHANCE: f64 = 0.002;
    pub const UFO_REWARDS: [u64; 3] = [100, 200, 300];

    /// Falling power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.1;
}
