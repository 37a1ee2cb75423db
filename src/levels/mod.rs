//! Level catalog and difficulty progression
//!
//! 30 hand-authored levels split into four zones. Each zone fixes the
//! difficulty tier, which in turn fixes tick speed, score multiplier and
//! the level score needed to clear a level.

pub mod catalog;
pub mod generator;
pub mod zones;

pub use catalog::{LevelEntry, catalog, difficulty_icon, difficulty_label, level, level_name, obstacles_for};
pub use generator::{Axis, line, rect_perimeter};
pub use zones::{
    Difficulty, DifficultyConfig, UnknownDifficulty, ZONES, Zone, food_score_of, required_score_of,
    score_multiplier_of, speed_of, zone_of,
};
