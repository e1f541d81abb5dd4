//! Per-tick simulation driver
//!
//! Owns the phase state machine: start/restart, pause toggling, level
//! progression. Movement and collisions only run while `Playing`.

use super::collision::resolve_collisions;
use super::event::{AudioCue, GameEvent};
use super::movement::{advance_formation, advance_projectiles, update_player};
use super::spawn::{build_barriers, build_enemy_wave, maybe_spawn_ufo};
use super::state::{GamePhase, GameState};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steer left (held)
    pub move_left: bool,
    /// Steer right (held)
    pub move_right: bool,
    /// Fire (held; gated by the shot cooldown)
    pub shoot: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Begin or restart a run (one-shot)
    pub start: bool,
}

/// Start a new run from the title or game-over screen.
/// Returns false (and changes nothing) in any other phase.
pub fn begin(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            state.reset_run();
            log::info!("Run started");
            true
        }
        GamePhase::Playing | GamePhase::Paused => false,
    }
}

/// Toggle `Playing` and `Paused`. Returns false in any other phase.
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
            true
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            log::info!("Resumed");
            true
        }
        GamePhase::Start | GamePhase::GameOver => false,
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        begin(state);
    }

    if input.pause && toggle_pause(state) && state.phase == GamePhase::Paused {
        return;
    }

    // Nothing moves, spawns or collides outside of play
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    update_player(state, input);
    advance_formation(state);
    advance_projectiles(state);

    if let Some(ufo) = maybe_spawn_ufo(state.ufo.is_some(), &mut state.rng) {
        state.ufo = Some(ufo);
        state.events.push(GameEvent::Sound(AudioCue::UfoSpawned));
    }

    resolve_collisions(state);

    if state.phase == GamePhase::Playing && state.enemies.is_empty() {
        level_up(state);
    }
}

/// Formation cleared: next level, fresh wave and barriers, no stray bullets
pub fn level_up(state: &mut GameState) {
    state.level += 1;
    log::info!("Level {} reached (score {})", state.level, state.score);

    state.enemies = build_enemy_wave(state.level);
    state.barriers = build_barriers(state.width, state.height);
    state.player.recenter(state.width);
    state.player_bullets.clear();
    state.enemy_bullets.clear();

    state.events.push(GameEvent::LevelCleared { level: state.level });
    state.events.push(GameEvent::Sound(AudioCue::LevelUp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::event::GameOverCause;
    use crate::sim::frame::RenderFrame;
    use crate::sim::spawn::wave_dimensions;
    use crate::sim::state::{Bullet, Enemy, EnemyTier};
    use glam::Vec2;

    fn snapshot(state: &GameState) -> String {
        serde_json::to_string(&RenderFrame::from_state(state, 0)).unwrap()
    }

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    #[test]
    fn test_start_enters_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);

        // Without the trigger nothing happens
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);

        let state = started(12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.score, state.lives, state.level), (0, 3, 1));
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = started(1);
        state.score = 500;
        assert!(!begin(&mut state));
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = started(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_is_noop_outside_play() {
        let mut state = GameState::new(3);
        assert!(!toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::Start);

        state.phase = GamePhase::GameOver;
        assert!(!toggle_pause(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_paused_ticks_freeze_everything() {
        let mut state = started(99);
        // Put some motion in flight
        let busy = TickInput {
            move_right: true,
            shoot: true,
            ..Default::default()
        };
        for _ in 0..45 {
            tick(&mut state, &busy);
        }
        state
            .enemy_bullets
            .push(Bullet::new(Vec2::new(300.0, 300.0), Vec2::new(0.0, ENEMY_BULLET_SPEED)));
        toggle_pause(&mut state);

        let frozen = snapshot(&state);
        let counter = state.formation.move_counter;
        let cooldown = state.player.shoot_cooldown;
        let ticks = state.time_ticks;
        state.events.clear();

        for _ in 0..500 {
            tick(&mut state, &busy);
        }

        assert_eq!(snapshot(&state), frozen);
        assert_eq!(state.formation.move_counter, counter);
        assert_eq!(state.player.shoot_cooldown, cooldown);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_ticks_freeze_everything() {
        let mut state = started(5);
        state.phase = GamePhase::GameOver;
        let frozen = snapshot(&state);
        for _ in 0..200 {
            tick(
                &mut state,
                &TickInput {
                    move_left: true,
                    shoot: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(snapshot(&state), frozen);
    }

    #[test]
    fn test_level_clear_end_to_end() {
        let mut state = started(2024);
        assert_eq!(state.enemies.len(), {
            let (rows, cols) = wave_dimensions(1);
            rows * cols
        });

        // Wipe the wave except one enemy, then shoot the last one
        state.enemies.truncate(1);
        let target = state.enemies[0].bounds().center();
        state.player_bullets = vec![Bullet::new(
            Vec2::new(target.x - 2.0, target.y - 5.0 - PLAYER_BULLET_SPEED),
            Vec2::new(0.0, PLAYER_BULLET_SPEED),
        )];
        state
            .enemy_bullets
            .push(Bullet::new(Vec2::new(700.0, 300.0), Vec2::new(0.0, ENEMY_BULLET_SPEED)));
        state.player.pos.x = 10.0;

        // Freeze the formation this tick so the target stays put
        state.formation.move_counter = 0;
        tick(&mut state, &TickInput::default());

        let kill_points = EnemyTier::Front.points(1);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, kill_points);
        let (rows, cols) = wave_dimensions(2);
        assert_eq!((rows, cols), (5, 10));
        assert_eq!(state.enemies.len(), rows * cols);
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player.pos.x, state.width / 2.0 - PLAYER_WIDTH / 2.0);
        assert!(state.barriers.iter().all(|b| b.active_blocks() == 40));
        assert!(state.events.contains(&GameEvent::LevelCleared { level: 2 }));
        assert!(state.events.contains(&GameEvent::Sound(AudioCue::LevelUp)));
    }

    #[test]
    fn test_lives_exhausted_end_to_end() {
        let mut state = started(8);
        state.enemies = vec![Enemy::new(50.0, 50.0, EnemyTier::Back)];
        state.formation.move_counter = 0;

        for expected_lives in (0..3).rev() {
            let player = state.player.bounds();
            state.enemy_bullets.push(Bullet::new(
                Vec2::new(player.center().x, player.top() - ENEMY_BULLET_SPEED + 1.0),
                Vec2::new(0.0, ENEMY_BULLET_SPEED),
            ));
            tick(&mut state, &TickInput::default());
            assert_eq!(state.lives, expected_lives);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(
            game_overs,
            vec![GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::LivesExhausted
            }]
        );
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = started(11);
        state.score = 1234;
        state.lives = 0;
        state.level = 4;
        state.ufo = Some(crate::sim::state::Ufo::new(200));
        state.phase = GamePhase::GameOver;

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 36);
        assert_eq!(state.formation.direction, 1.0);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs give identical runs
        let mut a = started(424242);
        let mut b = started(424242);
        let inputs = [
            TickInput {
                move_left: true,
                shoot: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput {
                shoot: true,
                ..Default::default()
            },
        ];
        for i in 0..2_000 {
            let input = inputs[i % inputs.len()];
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(a.score, b.score);
    }
}
