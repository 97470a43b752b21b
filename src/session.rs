//! Host-facing game session
//!
//! Owns the arena state plus the score store and runs the frame loop the
//! way every host needs it: accumulate wall time, run fixed ticks (capped per
//! frame), react to events, then draw.

use crate::consts::{MAX_SUBSTEPS, TICKS_PER_SECOND};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::renderer::{Surface, render_frame};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Seconds per simulation tick
pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
/// Longest frame gap the accumulator will absorb (e.g. after a tab switch)
const MAX_FRAME_DT: f32 = 0.1;

pub struct Session {
    state: GameState,
    tuning: Tuning,
    store: Box<dyn KeyValueStore>,
    high_score: HighScore,
    accumulator: f32,
}

impl Session {
    /// Start a run, seeding the best score from `store`
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        let state = GameState::new(seed, tuning.clone()).with_high_score(high_score.best);
        log::info!("Session started with seed {}", seed);
        Self {
            state,
            tuning,
            store,
            high_score,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    /// Run exactly one tick and handle its events
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        self.handle_events(&events);
        events
    }

    /// Run as many ticks as `dt` seconds of wall time cover.
    /// Leftover time carries into the next frame.
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step(input));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Behind by more than the cap; drop the backlog
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        events
    }

    /// Draw the current state
    pub fn render(&self, surface: &mut dyn Surface) {
        render_frame(&self.state, surface);
    }

    /// Throw the run away and start a fresh one with a new seed
    pub fn restart(&mut self, seed: u64) {
        self.state = GameState::new(seed, self.tuning.clone()).with_high_score(self.high_score.best);
        self.accumulator = 0.0;
        log::info!("Session restarted with seed {}", seed);
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::HighScore(score) = event {
                if self.high_score.submit(*score) {
                    self.save_high_score();
                }
            }
        }
    }

    fn save_high_score(&mut self) {
        if let Err(e) = self.high_score.save(self.store.as_mut()) {
            log::warn!("Failed to save high score: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileStore, MemoryStore, StoreError};
    use crate::renderer::DrawList;

    fn session(store: impl KeyValueStore + 'static) -> Session {
        Session::new(11, Tuning::without_tutorial(), Box::new(store))
    }

    #[test]
    fn test_loads_stored_best() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "250").unwrap();
        let s = session(store);
        assert_eq!(s.high_score(), 250);
        assert_eq!(s.state().high_score, 250);
    }

    #[test]
    fn test_advance_runs_whole_ticks_and_carries_remainder() {
        let mut s = session(MemoryStore::new());
        s.advance(SIM_DT * 2.5, &TickInput::default());
        assert_eq!(s.state().time_ticks, 2);
        s.advance(SIM_DT * 0.6, &TickInput::default());
        assert_eq!(s.state().time_ticks, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut s = session(MemoryStore::new());
        s.advance(10.0, &TickInput::default());
        assert_eq!(s.state().time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_new_best_is_saved() {
        let mut s = session(MemoryStore::new());
        s.state.add_score(40);
        let events = s.step(&TickInput::default());
        assert!(events.contains(&GameEvent::HighScore(40)));
        assert_eq!(s.high_score(), 40);
        assert_eq!(
            s.store.get(HighScore::STORAGE_KEY).as_deref(),
            Some("40")
        );
    }

    #[test]
    fn test_new_best_survives_reopening_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut s = session(FileStore::open(&path));
        s.state.add_score(90);
        s.step(&TickInput::default());
        drop(s);

        let reopened = session(FileStore::open(&path));
        assert_eq!(reopened.high_score(), 90);
        assert_eq!(reopened.state().high_score, 90);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_store_failure_does_not_stop_play() {
        let mut s = session(BrokenStore);
        s.state.add_score(5);
        s.step(&TickInput::default());
        assert_eq!(s.high_score(), 5);
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut s = session(MemoryStore::new());
        s.state.add_score(70);
        s.step(&TickInput::default());
        s.restart(12);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().high_score, 70);
        assert_eq!(s.state().time_ticks, 0);
    }

    #[test]
    fn test_render_draws_frame() {
        let s = session(MemoryStore::new());
        let mut list = DrawList::new();
        s.render(&mut list);
        assert!(!list.is_empty());
        assert!(list.is_balanced());
    }
}
