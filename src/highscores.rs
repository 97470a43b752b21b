//! Best-score tracking
//!
//! A single scalar persisted through a [`KeyValueStore`]. No stored value
//! (or an unparsable one) simply means no high score yet.

use crate::persistence::{KeyValueStore, StoreError};

/// The best score seen across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Store key for the best score
    pub const STORAGE_KEY: &'static str = "glitch_arena_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a score; returns true if it became the new best
    pub fn submit(&mut self, score: u64) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from a store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Stored high score {:?} is not a number, ignoring", raw);
                    Self::default()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write the best score to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::debug!("High score {} saved", self.best);
        Ok(())
    }
}
