//! Persisted best score
//!
//! A single integer under one key. Coins and jumps are per-session and are
//! never stored.

use crate::persistence::KeyValueStore;

/// Best floored score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u64);

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "dinoHighScoreEnhanced";

    /// Read the stored value; a missing or malformed entry counts as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self(0);
        };
        match raw.trim().parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                Self(score)
            }
            Err(e) => {
                log::warn!("Ignoring malformed high score {:?}: {}", raw, e);
                Self(0)
            }
        }
    }

    /// Write the value; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.0.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.0),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, NullStore};

    #[test]
    fn missing_key_is_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()), HighScore(0));
    }

    #[test]
    fn saves_and_loads() {
        let mut store = MemoryStore::new();
        HighScore(1200).save(&mut store);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("1200"));
        assert_eq!(HighScore::load(&store), HighScore(1200));
    }

    #[test]
    fn malformed_value_is_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(HighScore::load(&store), HighScore(0));
    }

    #[test]
    fn save_failure_is_swallowed() {
        HighScore(5).save(&mut NullStore);
    }
}
