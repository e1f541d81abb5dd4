//! Game state and core simulation types
//!
//! `GameState` is the single world object. Movement, collision and progression
//! all take it by `&mut`; nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::rect::Rect;
use super::spawn::{build_barriers, build_enemy_wave};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start trigger
    Start,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Run ended, waiting for the restart trigger
    GameOver,
}

/// Enemy rank, assigned by starting row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Back rows (row 3 and beyond)
    Back,
    /// Rows 1-2
    Middle,
    /// Front row, worth the most
    Front,
}

impl EnemyTier {
    /// Tier for a grid row (row 0 is the top of the wave)
    pub fn for_row(row: usize) -> Self {
        if row < 1 {
            EnemyTier::Front
        } else if row < 3 {
            EnemyTier::Middle
        } else {
            EnemyTier::Back
        }
    }

    /// Numeric rank 0-2
    pub fn rank(&self) -> u64 {
        match self {
            EnemyTier::Back => 0,
            EnemyTier::Middle => 1,
            EnemyTier::Front => 2,
        }
    }

    /// Points awarded for a kill at the given level
    pub fn points(&self, level: u32) -> u64 {
        (self.rank() + 1) * 10 * level as u64
    }
}

/// Timed power-up effects held by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedPowerUp {
    /// Shorter shot cooldown
    RapidFire,
    /// Three-way shots
    Spread,
}

/// Kinds of falling power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Spread,
    /// Instant extra life, never timed
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Spread,
        PowerUpKind::ExtraLife,
    ];

    /// The timed effect this pickup grants, if any
    pub fn timed(&self) -> Option<TimedPowerUp> {
        match self {
            PowerUpKind::RapidFire => Some(TimedPowerUp::RapidFire),
            PowerUpKind::Spread => Some(TimedPowerUp::Spread),
            PowerUpKind::ExtraLife => None,
        }
    }
}

/// Power-up currently affecting the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: TimedPowerUp,
    pub remaining_ticks: u32,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Horizontal speed per tick
    pub speed: f32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub power_up: Option<ActivePowerUp>,
}

impl Player {
    /// Spawn centered at the bottom of the playfield
    pub fn new(playfield_width: f32, playfield_height: f32) -> Self {
        Self {
            pos: Vec2::new(
                spawn_x(playfield_width),
                playfield_height - PLAYER_BOTTOM_OFFSET,
            ),
            speed: PLAYER_SPEED,
            shoot_cooldown: 0,
            power_up: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Move back to horizontal center (keeps cooldown and power-up)
    pub fn recenter(&mut self, playfield_width: f32) {
        self.pos.x = spawn_x(playfield_width);
    }

    /// Grant a timed power-up, replacing any active one
    pub fn grant(&mut self, kind: TimedPowerUp) {
        self.power_up = Some(ActivePowerUp {
            kind,
            remaining_ticks: POWER_UP_DURATION,
        });
    }

    /// Active power-up kind
    pub fn power_up_kind(&self) -> Option<TimedPowerUp> {
        self.power_up.map(|p| p.kind)
    }

    /// Remaining power-up ticks (0 when none)
    pub fn power_up_timer(&self) -> u32 {
        self.power_up.map(|p| p.remaining_ticks).unwrap_or(0)
    }
}

fn spawn_x(playfield_width: f32) -> f32 {
    playfield_width / 2.0 - PLAYER_WIDTH / 2.0
}

/// A formation member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub tier: EnemyTier,
}

impl Enemy {
    pub fn new(x: f32, y: f32, tier: EnemyTier) -> Self {
        Self {
            pos: Vec2::new(x, y),
            tier,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

/// A projectile (owner is implied by the collection it lives in)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    /// True once the top-left corner leaves the playfield
    pub fn is_off_screen(&self, width: f32, height: f32) -> bool {
        self.pos.y < 0.0 || self.pos.y > height || self.pos.x < 0.0 || self.pos.x > width
    }
}

/// One destructible cell of a barrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierBlock {
    pub rect: Rect,
    /// Only ever goes from true to false
    pub active: bool,
}

/// An arch-shaped cluster of blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    /// Top-left corner of the 8x6 grid
    pub pos: Vec2,
    pub blocks: Vec<BarrierBlock>,
}

impl Barrier {
    /// Build the arch: a full grid minus the two bottom rows' outer columns
    pub fn new(x: f32, y: f32) -> Self {
        let mut blocks = Vec::with_capacity(BARRIER_ROWS * BARRIER_COLS);
        for row in 0..BARRIER_ROWS {
            for col in 0..BARRIER_COLS {
                if row >= 4 && (col <= 1 || col >= 6) {
                    continue;
                }
                blocks.push(BarrierBlock {
                    rect: Rect::new(
                        x + col as f32 * BARRIER_BLOCK_SIZE,
                        y + row as f32 * BARRIER_BLOCK_SIZE,
                        BARRIER_BLOCK_SIZE,
                        BARRIER_BLOCK_SIZE,
                    ),
                    active: true,
                });
            }
        }
        Self {
            pos: Vec2::new(x, y),
            blocks,
        }
    }

    /// Deactivate the first active block overlapping `rect`.
    /// Returns true if a block absorbed the hit.
    pub fn absorb(&mut self, rect: &Rect) -> bool {
        match self
            .blocks
            .iter_mut()
            .find(|block| block.active && block.rect.overlaps(rect))
        {
            Some(block) => {
                block.active = false;
                true
            }
            None => false,
        }
    }

    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }

    /// All blocks gone; the shell stays in place but absorbs nothing
    pub fn is_destroyed(&self) -> bool {
        self.active_blocks() == 0
    }
}

/// A falling power-up (positioned by its center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub center: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(center: Vec2, kind: PowerUpKind) -> Self {
        Self { center, kind }
    }

    /// Bounding square of the pickup circle (radius = size / 2)
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.center, Vec2::splat(POWER_UP_SIZE))
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.center.y > height
    }
}

/// The bonus saucer crossing the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ufo {
    pub pos: Vec2,
    /// Bonus drawn once at spawn
    pub points: u64,
}

impl Ufo {
    /// Enters from just past the left edge
    pub fn new(points: u64) -> Self {
        Self {
            pos: Vec2::new(-UFO_WIDTH, UFO_Y),
            points,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, UFO_WIDTH, UFO_HEIGHT)
    }

    pub fn is_off_screen(&self, width: f32) -> bool {
        self.pos.x > width
    }
}

/// Shared lock-step state for the whole enemy grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Ticks since the last advance
    pub move_counter: u32,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            direction: 1.0,
            move_counter: 0,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub barriers: Vec<Barrier>,
    pub power_ups: Vec<PowerUp>,
    pub ufo: Option<Ufo>,
    pub formation: Formation,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state on the default playfield
    pub fn new(seed: u64) -> Self {
        Self::with_playfield(seed, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    /// Create a state on a custom playfield, parked on the title screen
    pub fn with_playfield(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            phase: GamePhase::Start,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            time_ticks: 0,
            player: Player::new(width, height),
            enemies: build_enemy_wave(1),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            barriers: build_barriers(width, height),
            power_ups: Vec::new(),
            ufo: None,
            formation: Formation::default(),
            events: Vec::new(),
        }
    }

    /// Full reset for a new run (score 0, lives 3, level 1) and enter `Playing`
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.time_ticks = 0;
        self.player = Player::new(self.width, self.height);
        self.enemies = build_enemy_wave(self.level);
        self.barriers = build_barriers(self.width, self.height);
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.ufo = None;
        self.formation = Formation::default();
        self.phase = GamePhase::Playing;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
