//! Daily Progress Store
//!
//! Persists the in-progress daily session under one well-known key, scoped
//! to the current calendar date. Failures never reach the game: unreadable
//! records load as "no progress" and failed writes are logged and dropped.
//!
//! Saves are debounced through a single pending slot: a newer save replaces
//! an unwritten older one, [`ProgressStore::poll`] writes the slot once its
//! quiet period has passed, and dropping the store flushes whatever is left.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::core::clock::{Clock, today_string};
use crate::game::state::{DailyProgress, Guess, Session};
use crate::persist::storage::{JsonFileStorage, ProgressStorage, StorageError};

/// Default record key.
pub const PROGRESS_KEY: &str = "newyawkr-daily-progress";

#[derive(Debug, Clone)]
struct PendingWrite {
    due_millis: i64,
    record: DailyProgress,
}

/// Date-scoped progress persistence over a [`ProgressStorage`].
pub struct ProgressStore<S: ProgressStorage, C: Clock> {
    storage: S,
    clock: C,
    key: String,
    debounce_millis: i64,
    pending: Option<PendingWrite>,
}

impl<C: Clock> ProgressStore<JsonFileStorage, C> {
    /// File-backed store from configuration.
    pub fn from_config(config: &StoreConfig, clock: C) -> Self {
        Self::new(JsonFileStorage::new(&config.data_dir), clock, &config.key, config.save_debounce)
    }
}

impl<S: ProgressStorage, C: Clock> ProgressStore<S, C> {
    /// Create a store writing `key` after `debounce` of quiet.
    pub fn new(storage: S, clock: C, key: &str, debounce: Duration) -> Self {
        Self {
            storage,
            clock,
            key: key.to_string(),
            debounce_millis: debounce.as_millis() as i64,
            pending: None,
        }
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Is a save waiting to be written?
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Today's record, if any.
    ///
    /// A record from another date is deleted and reported as absent.
    /// A pending save is written first so the result reflects it.
    pub fn load(&mut self) -> Option<DailyProgress> {
        self.flush();

        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read progress: {}", e);
                return None;
            }
        };

        let progress: DailyProgress = match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(e) => {
                warn!("Ignoring unreadable progress: {}", e);
                return None;
            }
        };

        let today = today_string(&self.clock);
        if progress.date != today {
            info!("Discarding progress from {} (today is {})", progress.date, today);
            if let Err(e) = self.storage.remove(&self.key) {
                warn!("Failed to delete stale progress: {}", e);
            }
            return None;
        }

        Some(progress)
    }

    /// Schedule a write of the given state stamped with today's date.
    ///
    /// Replaces any pending write.
    pub fn save(&mut self, rounds_played: usize, guesses: &[Guess], total_score: u32, complete: bool) {
        let record = DailyProgress {
            date: today_string(&self.clock),
            rounds_played,
            guesses: guesses.to_vec(),
            total_score,
            complete,
        };
        self.schedule(record);
    }

    /// Schedule a write of a live session's state.
    pub fn save_session(&mut self, session: &Session) {
        self.save(session.current_round, &session.guesses, session.total_score, session.complete);
    }

    fn schedule(&mut self, record: DailyProgress) {
        if self.pending.is_some() {
            debug!("Superseding pending progress write");
        }
        self.pending = Some(PendingWrite {
            due_millis: self.clock.now_millis() + self.debounce_millis,
            record,
        });
    }

    /// Write the pending save if its quiet period has elapsed.
    ///
    /// Returns true if a write was attempted.
    pub fn poll(&mut self) -> bool {
        match &self.pending {
            Some(p) if self.clock.now_millis() >= p.due_millis => self.flush(),
            _ => false,
        }
    }

    /// Write the pending save now.
    ///
    /// Returns true if a write was attempted.
    pub fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if let Err(e) = self.write_record(&pending.record) {
            warn!("Failed to save progress: {}", e);
        }
        true
    }

    fn write_record(&mut self, record: &DailyProgress) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        self.storage.write(&self.key, &json)?;
        debug!("Saved progress for {} at round {}", record.date, record.rounds_played);
        Ok(())
    }

    /// Delete the record and drop any pending save.
    pub fn clear(&mut self) {
        self.pending = None;
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("Failed to clear progress: {}", e);
        }
    }
}

impl<S: ProgressStorage, C: Clock> Drop for ProgressStore<S, C> {
    fn drop(&mut self) {
        self.flush();
    }
}

// =============================================================================
// TESTS
// =============================================================================
