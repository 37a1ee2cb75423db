//! Unlocked levels and best scores across sessions

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::StorageError;
use crate::consts::MAX_LEVEL;
use crate::highscores::HighScores;
use crate::platform::KeyValueStore;

fn first_level() -> u32 {
    1
}

/// Accept any positive JSON number; anything else reads as level 1
fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let level = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0)
                .map(|f| f.floor() as u64)
        })
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX).max(1));
    Ok(level.unwrap_or_else(|| {
        log::warn!("Ignoring unreadable unlockedLevels: {value}");
        first_level()
    }))
}

/// Persisted progress record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default = "first_level", deserialize_with = "lenient_level")]
    pub unlocked_levels: u32,
    #[serde(default)]
    pub high_scores: HighScores,
    /// Fields written by other versions, kept as they are
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked_levels: first_level(),
            high_scores: HighScores::default(),
            extra: Map::new(),
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, level: u32) -> bool {
        (1..=self.unlocked_levels).contains(&level)
    }

    /// Unlock every level up to `level` (capped at the last level)
    pub fn unlock_through(&mut self, level: u32) {
        self.unlocked_levels = self.unlocked_levels.max(level.min(MAX_LEVEL));
    }

    /// Take the larger unlocked count and the larger score per difficulty
    pub fn merge(&mut self, other: &Progress) {
        self.unlocked_levels = self.unlocked_levels.max(other.unlocked_levels);
        self.high_scores.merge(&other.high_scores);
        for (key, value) in &other.extra {
            self.extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Read the stored record, `None` if nothing was saved yet
    pub fn read(store: &impl KeyValueStore, key: &str) -> Result<Option<Progress>, StorageError> {
        match store.get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load progress, falling back to a fresh record on any failure
    pub fn load(store: &impl KeyValueStore, key: &str) -> Progress {
        match Self::read(store, key) {
            Ok(Some(progress)) => {
                log::info!(
                    "Loaded progress: {} levels unlocked, {} high scores",
                    progress.unlocked_levels,
                    progress.high_scores.len()
                );
                progress
            }
            Ok(None) => {
                log::info!("No saved progress found, starting fresh");
                Progress::default()
            }
            Err(e) => {
                log::warn!("Could not load progress: {e}");
                Progress::default()
            }
        }
    }

    /// Merge with the stored record and write the result back.
    ///
    /// Returns the merged record. A stored record that cannot be read
    /// (including one that is not JSON) is left untouched and the error is
    /// returned, so a save never replaces progress it could not merge.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) -> Result<Progress, StorageError> {
        let mut merged = self.clone();
        if let Some(existing) = Self::read(&*store, key)? {
            merged.merge(&existing);
        }
        let json = serde_json::to_string(&merged)?;
        store.set(key, &json)?;
        log::info!(
            "Progress saved ({} levels unlocked)",
            merged.unlocked_levels
        );
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Difficulty;
    use crate::platform::MemoryStore;
    use proptest::prelude::*;

    const KEY: &str = "snakeGameProgress";

    #[test]
    fn test_default_unlocks_first_level() {
        let p = Progress::default();
        assert!(p.is_unlocked(1));
        assert!(!p.is_unlocked(2));
        assert!(!p.is_unlocked(0));
    }

    #[test]
    fn test_unlock_through_caps_at_max() {
        let mut p = Progress::default();
        p.unlock_through(5);
        assert_eq!(p.unlocked_levels, 5);
        p.unlock_through(3);
        assert_eq!(p.unlocked_levels, 5);
        p.unlock_through(99);
        assert_eq!(p.unlocked_levels, MAX_LEVEL);
    }

    #[test]
    fn test_json_shape() {
        let mut p = Progress::default();
        p.unlocked_levels = 4;
        p.high_scores.record(Difficulty::Easy, 120);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"unlockedLevels":4,"highScores":{"easy":120}}"#);
    }

    #[test]
    fn test_reads_partial_record() {
        let p: Progress = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Progress::default());
        let p: Progress = serde_json::from_str(r#"{"unlockedLevels":7}"#).unwrap();
        assert_eq!(p.unlocked_levels, 7);
    }

    #[test]
    fn test_load_missing_is_default() {
        let store = MemoryStore::new();
        assert_eq!(Progress::load(&store, KEY), Progress::default());
    }

    #[test]
    fn test_load_malformed_is_default() {
        let mut store = MemoryStore::new();
        store.insert(KEY, "not json");
        assert_eq!(Progress::load(&store, KEY), Progress::default());
        assert!(matches!(
            Progress::read(&store, KEY),
            Err(StorageError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_unavailable_is_default() {
        let mut store = MemoryStore::new();
        store.set_available(false);
        assert_eq!(Progress::load(&store, KEY), Progress::default());
    }

    #[test]
    fn test_save_never_lowers_stored_values() {
        let mut store = MemoryStore::new();
        let mut high = Progress::default();
        high.unlocked_levels = 10;
        high.high_scores.record(Difficulty::Medium, 300);
        high.save(&mut store, KEY).unwrap();

        let mut low = Progress::default();
        low.unlocked_levels = 3;
        low.high_scores.record(Difficulty::Medium, 90);
        low.high_scores.record(Difficulty::Easy, 40);
        let merged = low.save(&mut store, KEY).unwrap();

        assert_eq!(merged.unlocked_levels, 10);
        assert_eq!(merged.high_scores.best(Difficulty::Medium), 300);
        assert_eq!(merged.high_scores.best(Difficulty::Easy), 40);
        assert_eq!(Progress::load(&store, KEY), merged);
    }

    #[test]
    fn test_save_keeps_unparseable_record() {
        let mut store = MemoryStore::new();
        store.insert(KEY, "{broken");
        let mut p = Progress::default();
        p.unlocked_levels = 2;
        assert!(matches!(
            p.save(&mut store, KEY),
            Err(StorageError::Malformed(_))
        ));
        assert_eq!(store.raw(KEY), Some("{broken"));
    }

    #[test]
    fn test_save_merges_record_with_unknown_tier() {
        let mut store = MemoryStore::new();
        store.insert(KEY, r#"{"unlockedLevels":12,"highScores":{"easy":100,"normal":5}}"#);

        let loaded = Progress::load(&store, KEY);
        assert_eq!(loaded.unlocked_levels, 12);
        assert_eq!(loaded.high_scores.best(Difficulty::Easy), 100);

        let mut p = Progress::default();
        p.unlocked_levels = 2;
        let merged = p.save(&mut store, KEY).unwrap();
        assert_eq!(merged.unlocked_levels, 12);
        assert_eq!(merged.high_scores.best(Difficulty::Easy), 100);
        assert_eq!(Progress::load(&store, KEY).unlocked_levels, 12);
    }

    #[test]
    fn test_lenient_unlocked_levels() {
        let p: Progress = serde_json::from_str(r#"{"unlockedLevels":6.0}"#).unwrap();
        assert_eq!(p.unlocked_levels, 6);
        let p: Progress = serde_json::from_str(r#"{"unlockedLevels":"six"}"#).unwrap();
        assert_eq!(p.unlocked_levels, 1);
        let p: Progress = serde_json::from_str(r#"{"unlockedLevels":0}"#).unwrap();
        assert_eq!(p.unlocked_levels, 1);
    }

    #[test]
    fn test_save_keeps_unknown_fields() {
        let mut store = MemoryStore::new();
        store.insert(KEY, r#"{"unlockedLevels":3,"theme":"dark"}"#);
        Progress::default().save(&mut store, KEY).unwrap();

        let stored: Value = serde_json::from_str(store.raw(KEY).unwrap()).unwrap();
        assert_eq!(stored["theme"], "dark");
        assert_eq!(stored["unlockedLevels"], 3);
    }

    #[test]
    fn test_save_unavailable_errors() {
        let mut store = MemoryStore::new();
        store.set_available(false);
        assert!(Progress::default().save(&mut store, KEY).is_err());
    }

    fn difficulty() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(Difficulty::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_save_then_load_is_no_less(
            stored_levels in 1u32..=MAX_LEVEL,
            saved_levels in 1u32..=MAX_LEVEL,
            stored_scores in prop::collection::vec((difficulty(), 0u64..10_000), 0..6),
            saved_scores in prop::collection::vec((difficulty(), 0u64..10_000), 0..6),
        ) {
            let mut store = MemoryStore::new();
            let mut stored = Progress { unlocked_levels: stored_levels, ..Default::default() };
            for (d, s) in stored_scores {
                stored.high_scores.record(d, s);
            }
            stored.save(&mut store, KEY).unwrap();

            let mut saved = Progress { unlocked_levels: saved_levels, ..Default::default() };
            for (d, s) in saved_scores {
                saved.high_scores.record(d, s);
            }
            saved.save(&mut store, KEY).unwrap();

            let loaded = Progress::load(&store, KEY);
            prop_assert!(loaded.unlocked_levels >= saved.unlocked_levels);
            prop_assert!(loaded.unlocked_levels >= stored.unlocked_levels);
            for d in Difficulty::ALL {
                prop_assert!(loaded.high_scores.best(d) >= saved.high_scores.best(d));
                prop_assert!(loaded.high_scores.best(d) >= stored.high_scores.best(d));
            }
        }
    }
}
