//! Best score per difficulty tier
//!
//! Stored inside the progress record as `{"easy": 120, "hell": 450}`.
//! Reading is lenient: entries with an unknown tier or a score that is
//! not a non-negative number are dropped instead of failing the record.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::levels::Difficulty;

/// Best total score reached while playing each difficulty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: BTreeMap<Difficulty, u64>,
}

/// Whole-point score from a stored JSON number
fn score_of(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.floor() as u64)
    })
}

impl<'de> Deserialize<'de> for HighScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut scores = HighScores::new();
        for (key, value) in &raw {
            match (key.parse::<Difficulty>(), score_of(value)) {
                (Ok(difficulty), Some(score)) => {
                    scores.record(difficulty, score);
                }
                _ => log::warn!("Dropping high score entry {key:?}: {value}"),
            }
        }
        Ok(scores)
    }
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score for `difficulty`, 0 if none recorded
    pub fn best(&self, difficulty: Difficulty) -> u64 {
        self.entries.get(&difficulty).copied().unwrap_or(0)
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, difficulty: Difficulty, score: u64) -> bool {
        score > 0 && score > self.best(difficulty)
    }

    /// Record a score; returns true if it became the new best
    pub fn record(&mut self, difficulty: Difficulty, score: u64) -> bool {
        if !self.qualifies(difficulty, score) {
            return false;
        }
        self.entries.insert(difficulty, score);
        true
    }

    /// Keep the larger score for every difficulty
    pub fn merge(&mut self, other: &HighScores) {
        for (&difficulty, &score) in &other.entries {
            self.record(difficulty, score);
        }
    }

    /// Highest score across all difficulties
    pub fn top_score(&self) -> Option<(Difficulty, u64)> {
        self.entries
            .iter()
            .max_by_key(|&(_, &score)| score)
            .map(|(&d, &s)| (d, s))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, u64)> + '_ {
        self.entries.iter().map(|(&d, &s)| (d, s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
