//! Progress persistence
//!
//! The only durable state is a two-field record: highest level unlocked and
//! cumulative score. Reads fall back to defaults and writes are best-effort;
//! storage trouble is logged and never reaches gameplay.

pub mod store;

use serde::{Deserialize, Serialize};

use crate::consts::FINAL_LEVEL;
use crate::error::GameError;

pub use store::{MemoryStore, ProgressStore};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;

/// Key the progress record is stored under
pub const STORAGE_KEY: &str = "dash_runner_progress";

/// Persisted progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Highest level the player may start (1-based)
    pub max_level: u32,
    /// Cumulative score across all sessions
    pub score: u64,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            max_level: 1,
            score: 0,
        }
    }
}

impl ProgressRecord {
    /// Parse and validate a stored record
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let record: Self = serde_json::from_str(json).map_err(|e| GameError::Corrupt {
            what: "progress record",
            reason: e.to_string(),
        })?;

        if !(1..=FINAL_LEVEL).contains(&record.max_level) {
            return Err(GameError::Corrupt {
                what: "progress record",
                reason: format!("max_level {} out of range", record.max_level),
            });
        }

        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::Corrupt {
            what: "progress record",
            reason: e.to_string(),
        })
    }
}

/// Load progress, treating missing or unreadable data as a fresh start
pub fn load_progress(store: &impl ProgressStore) -> ProgressRecord {
    let json = match store.read(STORAGE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No saved progress, starting fresh");
            return ProgressRecord::default();
        }
        Err(e) => {
            log::warn!("Could not read progress: {}", e);
            return ProgressRecord::default();
        }
    };

    match ProgressRecord::from_json(&json) {
        Ok(record) => {
            log::info!(
                "Loaded progress (max level {}, score {})",
                record.max_level,
                record.score
            );
            record
        }
        Err(e) => {
            log::warn!("Discarding saved progress: {}", e);
            ProgressRecord::default()
        }
    }
}

/// Save progress. Failures are logged and dropped, never retried.
pub fn save_progress(store: &mut impl ProgressStore, record: &ProgressRecord) {
    let result = record
        .to_json()
        .and_then(|json| store.write(STORAGE_KEY, &json));

    match result {
        Ok(()) => log::info!(
            "Progress saved (max level {}, score {})",
            record.max_level,
            record.score
        ),
        Err(e) => log::warn!("Progress not saved: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails
    struct BrokenStore;

    impl ProgressStore for BrokenStore {
        fn read(&self, key: &str) -> Result<Option<String>, GameError> {
            Err(GameError::Storage {
                key: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), GameError> {
            Err(GameError::Storage {
                key: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            })
        }
    }

    #[test]
    fn test_missing_record_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let record = ProgressRecord {
            max_level: 4,
            score: 230,
        };
        save_progress(&mut store, &record);
        assert_eq!(load_progress(&store), record);
    }

    #[test]
    fn test_corrupt_record_defaults() {
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());

        store
            .write(STORAGE_KEY, r#"{"max_level": 0, "score": 50}"#)
            .unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());

        store
            .write(STORAGE_KEY, r#"{"max_level": 11, "score": 50}"#)
            .unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());

        store.write(STORAGE_KEY, r#"{"max_level": 3}"#).unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_storage_errors_are_not_fatal() {
        let mut store = BrokenStore;
        assert_eq!(load_progress(&store), ProgressRecord::default());
        // Must not panic
        save_progress(&mut store, &ProgressRecord::default());
    }
}
