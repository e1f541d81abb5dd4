//! Wave layout and bonus spawns
//!
//! Layout builders are deterministic. The UFO and power-up rolls take the
//! session RNG so a seeded run stays reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{Barrier, Enemy, EnemyTier, PowerUp, PowerUpKind, Ufo};
use crate::consts::*;

/// Grid dimensions (rows, cols) for a level
pub fn wave_dimensions(level: u32) -> (usize, usize) {
    let rows = 3 + level as usize;
    let cols = 8 + level.min(3) as usize;
    (rows, cols)
}

/// Build the enemy grid for a level, row-major from the top-left
pub fn build_enemy_wave(level: u32) -> Vec<Enemy> {
    let (rows, cols) = wave_dimensions(level);
    log::info!("Level {} wave: {} rows x {} cols", level, rows, cols);

    let mut enemies = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            enemies.push(Enemy::new(
                ENEMY_GRID_ORIGIN_X + col as f32 * ENEMY_SPACING_X,
                ENEMY_GRID_ORIGIN_Y + row as f32 * ENEMY_SPACING_Y,
                EnemyTier::for_row(row),
            ));
        }
    }
    enemies
}

/// Four evenly spaced barriers above the player
pub fn build_barriers(width: f32, height: f32) -> Vec<Barrier> {
    let spacing = width / (BARRIER_COUNT + 1) as f32;
    (0..BARRIER_COUNT)
        .map(|i| {
            Barrier::new(
                spacing * (i + 1) as f32 - BARRIER_WIDTH / 2.0,
                height - BARRIER_BOTTOM_OFFSET,
            )
        })
        .collect()
}

/// Per-tick UFO roll; never spawns while one is active
pub fn maybe_spawn_ufo<R: Rng + ?Sized>(has_active_ufo: bool, rng: &mut R) -> Option<Ufo> {
    if has_active_ufo || !rng.random_bool(UFO_SPAWN_CHANCE) {
        return None;
    }
    let points = UFO_REWARDS[rng.random_range(0..UFO_REWARDS.len())];
    log::debug!("UFO spawned worth {}", points);
    Some(Ufo::new(points))
}

/// Kill-drop roll at the killed enemy's bottom-center
pub fn maybe_spawn_power_up<R: Rng + ?Sized>(
    kill_position: Vec2,
    rng: &mut R,
) -> Option<PowerUp> {
    if !rng.random_bool(POWER_UP_DROP_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    log::debug!("Power-up {:?} dropped at {:?}", kind, kill_position);
    Some(PowerUp::new(kill_position, kind))
}
