//! Lockstep Invaders entry point
//!
//! Runs a headless attract-mode session: an autopilot plays, the session
//! persists the high score, and a summary is logged on exit.
//!
//! Usage: `lockstep-invaders [settings.json]`

use std::path::PathBuf;

use lockstep_invaders::audio::ToneLogger;
use lockstep_invaders::platform::NullSink;
use lockstep_invaders::sim::{GameEvent, GamePhase, GameState, TickInput};
use lockstep_invaders::{FileHighScoreStore, Session, Settings};

/// Track the closest enemy column and keep firing
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        shoot: true,
        ..Default::default()
    };

    let player_x = state.player.bounds().center().x;
    let target = state
        .enemies
        .iter()
        .map(|enemy| enemy.bounds().center().x)
        .min_by(|a, b| (a - player_x).abs().total_cmp(&(b - player_x).abs()));

    if let Some(target_x) = target {
        if target_x < player_x - 2.0 {
            input.move_left = true;
        } else if target_x > player_x + 2.0 {
            input.move_right = true;
        }
    }
    input
}

fn main() {
    env_logger::init();
    log::info!("Lockstep Invaders (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };

    let store = FileHighScoreStore::new(settings.high_score_path.clone());
    let mut session = Session::new(&settings, store);

    let mut audio = ToneLogger::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_muted(settings.muted);

    let mut runs = 0u32;
    let mut best_run = 0u64;
    let mut levels_cleared = 0u32;

    for _ in 0..settings.demo_ticks {
        let mut input = autopilot(session.state());
        if matches!(session.phase(), GamePhase::Start | GamePhase::GameOver) {
            input.start = true;
            runs += 1;
        }

        let events = session.advance(&input, &mut NullSink, &mut audio, &mut NullSink);
        for event in events {
            match event {
                GameEvent::LevelCleared { level } => {
                    levels_cleared += 1;
                    log::info!("Autopilot reached level {}", level);
                }
                GameEvent::GameOver { score, cause } => {
                    best_run = best_run.max(score);
                    log::info!("Run {} over ({:?}) with {} points", runs, cause, score);
                }
                GameEvent::Sound(_) | GameEvent::Explosion(_) => {}
            }
        }
    }

    let state = session.state();
    best_run = best_run.max(state.score);
    let seconds = settings.demo_ticks / u64::from(settings.ticks_per_second.max(1));
    log::info!(
        "Simulated {}s over {} run(s): best run {}, {} level(s) cleared",
        seconds,
        runs,
        best_run,
        levels_cleared
    );
    log::info!(
        "High score {} (stored in {}), {} cues played",
        session.high_score(),
        session.store().path().display(),
        audio.played()
    );
}
