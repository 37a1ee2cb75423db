//! Difficulty tiers and level zones
//!
//! A level never picks its difficulty directly: the zone containing it
//! does, and every tuning value is looked up through that zone.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BASE_FOOD_SCORE, MIN_TICK_MS, SPEED_STEP_MS};

/// Difficulty tier shared by all levels in a zone
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Hell,
}

/// Tuning values for a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    pub name: &'static str,
    /// Nominal tick interval (ms); per-level speed comes from the zone
    pub speed_ms: u32,
    pub score_multiplier: f32,
    /// Level score that clears a level
    pub required_score: u64,
    pub icon: &'static str,
}

const EASY: DifficultyConfig = DifficultyConfig {
    name: "Easy",
    speed_ms: 200,
    score_multiplier: 1.0,
    required_score: 50,
    icon: "😊",
};

const MEDIUM: DifficultyConfig = DifficultyConfig {
    name: "Medium",
    speed_ms: 150,
    score_multiplier: 1.5,
    required_score: 75,
    icon: "😐",
};

const HARD: DifficultyConfig = DifficultyConfig {
    name: "Hard",
    speed_ms: 100,
    score_multiplier: 2.0,
    required_score: 100,
    icon: "😰",
};

const HELL: DifficultyConfig = DifficultyConfig {
    name: "Hell",
    speed_ms: 70,
    score_multiplier: 3.0,
    required_score: 150,
    icon: "💀",
};

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Hell,
    ];

    pub fn config(self) -> &'static DifficultyConfig {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
            Difficulty::Hell => &HELL,
        }
    }

    /// Storage key used in the persisted progress record
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Hell => "hell",
        }
    }
}

/// A difficulty key that names no known tier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    /// Case-insensitive tier key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "hell" => Ok(Difficulty::Hell),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// A contiguous band of levels sharing a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub key: &'static str,
    pub name: &'static str,
    pub first_level: u32,
    pub last_level: u32,
    pub base_speed_ms: u32,
    pub difficulty: Difficulty,
}

impl Zone {
    pub fn contains(&self, level: u32) -> bool {
        (self.first_level..=self.last_level).contains(&level)
    }

    /// 0-based position of `level` within this zone
    pub fn index_of(&self, level: u32) -> Option<u32> {
        self.contains(level).then(|| level - self.first_level)
    }

    pub fn levels(&self) -> std::ops::RangeInclusive<u32> {
        self.first_level..=self.last_level
    }

    pub fn config(&self) -> &'static DifficultyConfig {
        self.difficulty.config()
    }
}

/// Zones in level order; together they cover 1..=MAX_LEVEL exactly once
pub const ZONES: [Zone; 4] = [
    Zone {
        key: "EASY",
        name: "Novice Zone",
        first_level: 1,
        last_level: 8,
        base_speed_ms: 200,
        difficulty: Difficulty::Easy,
    },
    Zone {
        key: "MEDIUM",
        name: "Advanced Zone",
        first_level: 9,
        last_level: 16,
        base_speed_ms: 150,
        difficulty: Difficulty::Medium,
    },
    Zone {
        key: "HARD",
        name: "Expert Zone",
        first_level: 17,
        last_level: 24,
        base_speed_ms: 100,
        difficulty: Difficulty::Hard,
    },
    Zone {
        key: "HELL",
        name: "Hell Zone",
        first_level: 25,
        last_level: 30,
        base_speed_ms: 70,
        difficulty: Difficulty::Hell,
    },
];

/// Zone containing `level`, or the first zone for out-of-range input
pub fn zone_of(level: u32) -> &'static Zone {
    ZONES
        .iter()
        .find(|zone| zone.contains(level))
        .unwrap_or(&ZONES[0])
}

/// Tick interval for `level` in milliseconds.
///
/// Drops by `SPEED_STEP_MS` per level inside the zone, never below
/// `MIN_TICK_MS`.
pub fn speed_of(level: u32) -> u32 {
    let zone = zone_of(level);
    let index = zone.index_of(level).unwrap_or(0);
    zone.base_speed_ms
        .saturating_sub(index * SPEED_STEP_MS)
        .max(MIN_TICK_MS)
}

pub fn score_multiplier_of(level: u32) -> f32 {
    zone_of(level).config().score_multiplier
}

pub fn required_score_of(level: u32) -> u64 {
    zone_of(level).config().required_score
}

/// Points awarded for one food on `level`: floor(base * multiplier)
pub fn food_score_of(level: u32) -> u64 {
    (BASE_FOOD_SCORE as f32 * score_multiplier_of(level)).floor() as u64
}
