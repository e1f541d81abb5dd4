//! Per-tick movement
//!
//! Player steering and timers, straight-line projectiles, and the enemy
//! formation's lock-step advance.

use glam::Vec2;
use rand::Rng;

use super::event::{AudioCue, GameEvent};
use super::state::{Bullet, GameState, TimedPowerUp};
use super::tick::TickInput;
use crate::consts::*;

/// Ticks between formation advances at a level
pub fn move_interval(level: u32) -> u32 {
    30u32.saturating_sub(level.saturating_mul(3)).max(10)
}

/// Horizontal step per advance
pub fn formation_step(level: u32) -> f32 {
    8.0 + level as f32 * 1.5
}

/// Vertical drop when the formation hits an edge
pub fn formation_drop(level: u32) -> f32 {
    15.0 + level as f32 * 2.0
}

/// Chance per enemy per advance of firing, capped at certainty
pub fn enemy_fire_chance(level: u32) -> f64 {
    (0.003 * (1.0 + level as f64 * 0.3)).min(1.0)
}

/// Steer the player, run down its timers, and fire if requested
pub fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let max_x = state.width - PLAYER_WIDTH;

    let mut dx = 0.0;
    if input.move_left {
        dx -= player.speed;
    }
    if input.move_right {
        dx += player.speed;
    }
    player.pos.x = (player.pos.x + dx).clamp(0.0, max_x.max(0.0));

    player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);

    if let Some(active) = player.power_up.as_mut() {
        active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
        if active.remaining_ticks == 0 {
            log::debug!("{:?} expired", active.kind);
            player.power_up = None;
        }
    }

    if input.shoot {
        player_shoot(state);
    }
}

/// Fire according to the active power-up. Returns false while on cooldown.
pub fn player_shoot(state: &mut GameState) -> bool {
    let player = &mut state.player;
    if player.shoot_cooldown > 0 {
        return false;
    }

    let muzzle = Vec2::new(
        player.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        player.pos.y,
    );
    let straight = Vec2::new(0.0, PLAYER_BULLET_SPEED);

    match player.power_up_kind() {
        Some(TimedPowerUp::RapidFire) => {
            state.player_bullets.push(Bullet::new(muzzle, straight));
            player.shoot_cooldown = RAPID_FIRE_COOLDOWN;
        }
        Some(TimedPowerUp::Spread) => {
            for vx in [0.0, -SPREAD_SIDE_SPEED, SPREAD_SIDE_SPEED] {
                state
                    .player_bullets
                    .push(Bullet::new(muzzle, Vec2::new(vx, PLAYER_BULLET_SPEED)));
            }
            player.shoot_cooldown = SPREAD_COOLDOWN;
        }
        None => {
            state.player_bullets.push(Bullet::new(muzzle, straight));
            player.shoot_cooldown = SHOOT_COOLDOWN;
        }
    }

    state.events.push(GameEvent::Sound(AudioCue::ShotFired));
    true
}

/// Translate bullets, power-ups and the UFO, then drop whatever left the playfield
pub fn advance_projectiles(state: &mut GameState) {
    let (width, height) = (state.width, state.height);

    for bullet in state
        .player_bullets
        .iter_mut()
        .chain(state.enemy_bullets.iter_mut())
    {
        bullet.pos += bullet.vel;
    }
    state
        .player_bullets
        .retain(|b| !b.is_off_screen(width, height));
    state
        .enemy_bullets
        .retain(|b| !b.is_off_screen(width, height));

    for power_up in &mut state.power_ups {
        power_up.center.y += POWER_UP_SPEED;
    }
    state.power_ups.retain(|p| !p.is_off_screen(height));

    if let Some(ufo) = state.ufo.as_mut() {
        ufo.pos.x += UFO_SPEED;
        if ufo.is_off_screen(width) {
            log::debug!("UFO escaped");
            state.ufo = None;
        }
    }
}

/// Count down to the next lock-step advance and perform it when due.
/// Returns true if the formation moved this tick.
pub fn advance_formation(state: &mut GameState) -> bool {
    let level = state.level;
    state.formation.move_counter += 1;
    if state.formation.move_counter < move_interval(level) {
        return false;
    }
    state.formation.move_counter = 0;

    let direction = state.formation.direction;
    let right_bound = state.width - ENEMY_WIDTH - FORMATION_EDGE_MARGIN;
    let at_edge = state.enemies.iter().any(|enemy| {
        (enemy.pos.x <= FORMATION_EDGE_MARGIN && direction < 0.0)
            || (enemy.pos.x >= right_bound && direction > 0.0)
    });

    let offset = if at_edge {
        Vec2::new(0.0, formation_drop(level))
    } else {
        Vec2::new(direction * formation_step(level), 0.0)
    };

    let fire_chance = enemy_fire_chance(level);
    for enemy in &mut state.enemies {
        enemy.pos += offset;

        if state.rng.random_bool(fire_chance) {
            let muzzle = enemy.bounds().bottom_center() - Vec2::new(BULLET_WIDTH / 2.0, 0.0);
            state
                .enemy_bullets
                .push(Bullet::new(muzzle, Vec2::new(0.0, ENEMY_BULLET_SPEED)));
            state.events.push(GameEvent::Sound(AudioCue::EnemyShot));
        }
    }

    if at_edge {
        state.formation.direction = -direction;
    }
    true
}
