//! Game session
//!
//! Owns the simulation state together with the high score and its store.
//! The host calls `advance` once per refresh; events produced by the tick
//! are routed to the audio and effects sinks, then the frame is presented.

use crate::highscores::HighScoreStore;
use crate::platform::{AudioSink, EffectsSink, RenderSink};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, RenderFrame, TickInput};

/// A running game bound to a high score store
#[derive(Debug)]
pub struct Session<S: HighScoreStore> {
    state: GameState,
    high_score: u64,
    store: S,
    ticks_per_second: u32,
}

impl<S: HighScoreStore> Session<S> {
    /// Load the stored best and park on the title screen
    pub fn new(settings: &Settings, mut store: S) -> Self {
        let seed = settings.resolve_seed();
        let high_score = store.load();
        log::info!("Session seed {}, high score {}", seed, high_score);
        Self {
            state: GameState::with_playfield(
                seed,
                settings.playfield_width,
                settings.playfield_height,
            ),
            high_score,
            store,
            ticks_per_second: settings.ticks_per_second,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Begin a run from the title screen
    pub fn start(&mut self) -> bool {
        sim::begin(&mut self.state)
    }

    /// Begin a new run after game over
    pub fn restart(&mut self) -> bool {
        sim::begin(&mut self.state)
    }

    pub fn toggle_pause(&mut self) -> bool {
        sim::toggle_pause(&mut self.state)
    }

    /// Run one tick and return the events it produced.
    /// A game over that beats the best score is persisted here.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        sim::tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score, .. } = event {
                self.record_score(*score);
            }
        }
        events
    }

    fn record_score(&mut self, score: u64) {
        if score <= self.high_score {
            return;
        }
        log::info!("New high score {} (was {})", score, self.high_score);
        self.high_score = score;
        if let Err(err) = self.store.save(score) {
            log::warn!("Failed to save high score: {}", err);
        }
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::with_tick_rate(&self.state, self.high_score, self.ticks_per_second)
    }

    /// Tick, dispatch cues and explosions, then present the frame
    pub fn advance(
        &mut self,
        input: &TickInput,
        render: &mut dyn RenderSink,
        audio: &mut dyn AudioSink,
        effects: &mut dyn EffectsSink,
    ) -> Vec<GameEvent> {
        let events = self.tick(input);
        for event in &events {
            match *event {
                GameEvent::Sound(cue) => audio.play(cue),
                GameEvent::Explosion(explosion) => effects.explode(explosion),
                GameEvent::LevelCleared { .. } | GameEvent::GameOver { .. } => {}
            }
        }
        render.present(&self.frame());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{MemoryHighScoreStore, PersistenceError};
    use crate::platform::NullSink;
    use crate::sim::{AudioCue, Bullet, Explosion, GameOverCause};
    use glam::Vec2;

    fn settings() -> Settings {
        Settings {
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Drop enemy bullets onto the player until the run is over
    fn lose_all_lives<S: HighScoreStore>(session: &mut Session<S>) -> Vec<GameEvent> {
        let mut all = Vec::new();
        for _ in 0..10 {
            if session.phase() == GamePhase::GameOver {
                break;
            }
            let target = session.state.player.pos + Vec2::new(18.0, 10.0);
            session
                .state
                .enemy_bullets
                .push(Bullet::new(target, Vec2::ZERO));
            all.extend(session.tick(&TickInput::default()));
        }
        all
    }

    #[derive(Default)]
    struct Recorder {
        cues: Vec<AudioCue>,
        explosions: Vec<Explosion>,
        frames: usize,
        last_score: u64,
    }

    impl RenderSink for Recorder {
        fn present(&mut self, frame: &RenderFrame<'_>) {
            self.frames += 1;
            self.last_score = frame.hud.score;
        }
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }
    }

    impl EffectsSink for Recorder {
        fn explode(&mut self, explosion: Explosion) {
            self.explosions.push(explosion);
        }
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&mut self) -> u64 {
            0
        }

        fn save(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                path: "unwritable".into(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    #[test]
    fn test_new_loads_high_score() {
        let session = Session::new(&settings(), MemoryHighScoreStore::new(700));
        assert_eq!(session.high_score(), 700);
        assert_eq!(session.phase(), GamePhase::Start);
        assert_eq!(session.state().seed, 42);
        assert_eq!(session.frame().hud.high_score, 700);
    }

    #[test]
    fn test_new_best_saved_exactly_once() {
        let mut session = Session::new(&settings(), MemoryHighScoreStore::new(0));
        assert!(session.start());
        session.state.score = 1500;

        let events = lose_all_lives(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Ticking on the game-over screen saves nothing further
        for _ in 0..5 {
            session.tick(&TickInput::default());
        }
        assert_eq!(session.store().saves, vec![1500]);
        assert_eq!(session.high_score(), 1500);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut session = Session::new(&settings(), MemoryHighScoreStore::new(5000));
        session.start();
        session.state.score = 120;

        let events = lose_all_lives(&mut session);
        assert!(events.contains(&GameEvent::GameOver {
            score: 120,
            cause: GameOverCause::LivesExhausted
        }));
        assert!(session.store().saves.is_empty());
        assert_eq!(session.high_score(), 5000);
    }

    #[test]
    fn test_save_failure_keeps_running() {
        let mut session = Session::new(&settings(), FailingStore);
        session.start();
        session.state.score = 90;
        lose_all_lives(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score(), 90);
        assert!(session.restart());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_advance_routes_events() {
        let mut session = Session::new(&settings(), MemoryHighScoreStore::default());
        session.start();

        // Bullet sitting on the first enemy
        let enemy = session.state.enemies[0].pos;
        session
            .state
            .player_bullets
            .push(Bullet::new(enemy + Vec2::new(10.0, 10.0), Vec2::ZERO));

        let mut recorder = Recorder::default();
        let mut effects = Recorder::default();
        let input = TickInput {
            shoot: true,
            ..Default::default()
        };
        session.advance(&input, &mut NullSink, &mut recorder, &mut effects);

        assert!(recorder.cues.contains(&AudioCue::ShotFired));
        assert!(recorder.cues.contains(&AudioCue::EnemyKilled));
        assert_eq!(effects.explosions.len(), 1);

        let mut render = Recorder::default();
        session.advance(&TickInput::default(), &mut render, &mut NullSink, &mut NullSink);
        assert_eq!(render.frames, 1);
        assert_eq!(render.last_score, session.state().score);
    }

    #[test]
    fn test_frame_uses_configured_tick_rate() {
        let settings = Settings {
            ticks_per_second: 30,
            ..settings()
        };
        let mut session = Session::new(&settings, MemoryHighScoreStore::default());
        session.start();
        session.state.player.grant(crate::sim::TimedPowerUp::RapidFire);
        let status = session.frame().hud.power_up.unwrap();
        assert_eq!(status.seconds_remaining, 20);
    }

    #[test]
    fn test_pause_through_session() {
        let mut session = Session::new(&settings(), MemoryHighScoreStore::default());
        assert!(!session.toggle_pause());
        session.start();
        assert!(session.toggle_pause());
        assert_eq!(session.phase(), GamePhase::Paused);
        let ticks = session.state().time_ticks;
        session.tick(&TickInput::default());
        assert_eq!(session.state().time_ticks, ticks);
    }
}
