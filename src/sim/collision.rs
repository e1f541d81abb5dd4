//! Collision resolution
//!
//! Runs once per playing tick in a fixed order. Each category compacts its
//! collections (`retain`) before the next one runs, so an entity removed in
//! one pass is never seen by a later pass in the same tick.

use super::event::{AudioCue, ColorHint, Explosion, GameEvent, GameOverCause};
use super::spawn::maybe_spawn_power_up;
use super::state::{Barrier, Bullet, Enemy, GamePhase, GameState, PowerUpKind};

/// Resolve every pairwise interaction for this tick
pub fn resolve_collisions(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    let absorbed = absorb_into_barriers(&mut state.player_bullets, &mut state.barriers);
    if absorbed > 0 {
        log::trace!("Barriers absorbed {} player bullets", absorbed);
    }
    player_bullets_vs_ufo(state);

    enemy_bullets_vs_player(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    absorb_into_barriers(&mut state.enemy_bullets, &mut state.barriers);

    power_ups_vs_player(state);
    check_breach(state);
}

/// Each bullet kills at most the first enemy it overlaps
fn player_bullets_vs_enemies(state: &mut GameState) {
    let enemies = &mut state.enemies;
    let mut killed: Vec<Enemy> = Vec::new();

    state.player_bullets.retain(|bullet| {
        let bounds = bullet.bounds();
        match enemies.iter().position(|enemy| enemy.bounds().overlaps(&bounds)) {
            Some(idx) => {
                killed.push(enemies.remove(idx));
                false
            }
            None => true,
        }
    });

    for enemy in killed {
        let bounds = enemy.bounds();
        state.score += enemy.tier.points(state.level);
        state.events.push(GameEvent::Explosion(Explosion {
            position: bounds.center(),
            color: ColorHint::Enemy,
        }));
        state.events.push(GameEvent::Sound(AudioCue::EnemyKilled));

        if let Some(power_up) = maybe_spawn_power_up(bounds.bottom_center(), &mut state.rng) {
            state.power_ups.push(power_up);
        }
    }
}

/// Let barriers soak up bullets; returns how many were absorbed
fn absorb_into_barriers(bullets: &mut Vec<Bullet>, barriers: &mut [Barrier]) -> usize {
    let before = bullets.len();
    bullets.retain(|bullet| {
        let bounds = bullet.bounds();
        !barriers.iter_mut().any(|barrier| barrier.absorb(&bounds))
    });
    before - bullets.len()
}

fn player_bullets_vs_ufo(state: &mut GameState) {
    let Some(ufo_bounds) = state.ufo.as_ref().map(|u| u.bounds()) else {
        return;
    };

    let mut hit = false;
    state.player_bullets.retain(|bullet| {
        if !hit && bullet.bounds().overlaps(&ufo_bounds) {
            hit = true;
            return false;
        }
        true
    });

    if !hit {
        return;
    }
    if let Some(ufo) = state.ufo.take() {
        log::info!("UFO destroyed for {} points", ufo.points);
        state.score += ufo.points;
        state.events.push(GameEvent::Explosion(Explosion {
            position: ufo_bounds.center(),
            color: ColorHint::Ufo,
        }));
        state.events.push(GameEvent::Sound(AudioCue::UfoDestroyed));
    }
}

fn enemy_bullets_vs_player(state: &mut GameState) {
    let width = state.width;
    let GameState {
        enemy_bullets,
        player,
        lives,
        events,
        ..
    } = state;

    enemy_bullets.retain(|bullet| {
        if *lives == 0 || !bullet.bounds().overlaps(&player.bounds()) {
            return true;
        }

        *lives -= 1;
        let center = player.bounds().center();
        events.push(GameEvent::Explosion(Explosion {
            position: center,
            color: ColorHint::Player,
        }));
        events.push(GameEvent::Sound(AudioCue::PlayerHit));
        log::info!("Player hit, {} lives left", *lives);

        if *lives > 0 {
            player.recenter(width);
            player.power_up = None;
        }
        false
    });

    if state.lives == 0 {
        enter_game_over(state, GameOverCause::LivesExhausted);
    }
}

fn power_ups_vs_player(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let mut collected: Vec<PowerUpKind> = Vec::new();

    state.power_ups.retain(|power_up| {
        if power_up.bounds().overlaps(&player_bounds) {
            collected.push(power_up.kind);
            return false;
        }
        true
    });

    for kind in collected {
        match kind.timed() {
            Some(timed) => state.player.grant(timed),
            None => state.lives += 1,
        }
        log::debug!("Collected {:?}", kind);
        state.events.push(GameEvent::Sound(AudioCue::PowerUpCollected));
    }
}

/// Any enemy reaching the player's line ends the run outright
fn check_breach(state: &mut GameState) {
    let line = state.player.pos.y;
    if state.enemies.iter().any(|e| e.bounds().bottom() >= line) {
        enter_game_over(state, GameOverCause::Breach);
    }
}

/// Move to `GameOver` once; later calls are no-ops
pub fn enter_game_over(state: &mut GameState, cause: GameOverCause) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    log::info!(
        "Game over ({:?}) at level {} with score {}",
        cause,
        state.level,
        state.score
    );
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        cause,
    });
}
