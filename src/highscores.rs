//! Best score persistence
//!
//! Persisted to LocalStorage in the browser, kept in memory elsewhere.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key/value storage for small JSON payloads
pub trait ScoreStore {
    fn read(&self, key: &str) -> Option<String>;
    /// Returns false if the write did not stick
    fn write(&mut self, key: &str, value: &str) -> bool;
}

/// Non-persistent store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        Self::storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }
}

/// Highest score reached across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sidescroller_best";

    /// Read the stored best; missing or unreadable data counts as zero
    pub fn load(store: &impl ScoreStore) -> Self {
        if let Some(json) = store.read(Self::STORAGE_KEY) {
            if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                log::info!("Loaded best score {}", best.score);
                return best;
            }
            log::warn!("Ignoring malformed best score entry");
        }
        Self::default()
    }

    /// Persist `score` if it beats the stored best.
    /// Returns true if it was a new best.
    pub fn record(&mut self, score: u64, store: &mut impl ScoreStore) -> bool {
        if score <= self.score {
            return false;
        }
        self.score = score;
        match serde_json::to_string(self) {
            Ok(json) if store.write(Self::STORAGE_KEY, &json) => {
                log::info!("New best score {} saved", score);
            }
            _ => log::warn!("New best score {} could not be saved", score),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryStore::default();
        assert_eq!(BestScore::load(&store).score, 0);
    }

    #[test]
    fn test_malformed_entry_is_zero() {
        let mut store = MemoryStore::default();
        store.write(BestScore::STORAGE_KEY, "{oops");
        assert_eq!(BestScore::load(&store).score, 0);
    }

    #[test]
    fn test_record_only_improvements() {
        let mut store = MemoryStore::default();
        let mut best = BestScore::load(&store);

        assert!(!best.record(0, &mut store));
        assert!(store.read(BestScore::STORAGE_KEY).is_none());

        assert!(best.record(7, &mut store));
        assert!(!best.record(7, &mut store));
        assert!(!best.record(3, &mut store));
        assert_eq!(BestScore::load(&store).score, 7);

        assert!(best.record(12, &mut store));
        assert_eq!(BestScore::load(&store).score, 12);
    }

    struct ReadOnly;

    impl ScoreStore for ReadOnly {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }
        fn write(&mut self, _key: &str, _value: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_failed_write_still_updates_in_memory() {
        let mut best = BestScore::default();
        assert!(best.record(5, &mut ReadOnly));
        assert_eq!(best.score, 5);
    }
}
