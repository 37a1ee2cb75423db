//! Grid Snake - state-and-rules engine for a 30-level snake game
//!
//! Core modules:
//! - `levels`: Level catalog, zones and obstacle generators
//! - `sim`: Deterministic simulation (movement, collisions, food, scoring)
//! - `session`: Game state machine driven by a timer collaborator
//! - `platform`: Timer, storage and input collaborator contracts
//! - `persistence`: Progress record with merge-on-save semantics

pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use levels::{Difficulty, DifficultyConfig, LevelEntry, Zone};
pub use persistence::{Progress, StorageError};
pub use session::Game;
pub use settings::Settings;

use glam::IVec2;

/// A cell on the grid. Head moves may step outside `0..GRID_SIZE`,
/// which is how wall collisions are detected.
pub type Position = IVec2;

/// Game configuration constants
pub mod consts {
    /// Cells per side of the square grid
    pub const GRID_SIZE: i32 = 20;
    /// Snake length at every (re)spawn
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    /// Last level in the catalog
    pub const MAX_LEVEL: u32 = 30;
    /// Points for one food before the zone multiplier
    pub const BASE_FOOD_SCORE: u64 = 10;

    /// Fastest allowed tick interval (ms)
    pub const MIN_TICK_MS: u32 = 50;
    /// Interval reduction per level inside a zone (ms)
    pub const SPEED_STEP_MS: u32 = 15;

    /// Grace period between level completion and the next level (ms)
    pub const LEVEL_COMPLETE_DELAY_MS: u32 = 2000;
    /// Random head placements tried before scanning the grid
    pub const SNAKE_SPAWN_ATTEMPTS: u32 = 100;
    /// Random food placements tried before scanning the grid
    pub const FOOD_SPAWN_ATTEMPTS: u32 = 400;
    /// Obstacles closer than this (Chebyshev) to a spawn head reject it
    pub const SPAWN_CLEARANCE: i32 = 2;
}

/// Whether a position lies on the grid
#[inline]
pub fn in_bounds(pos: Position) -> bool {
    (0..consts::GRID_SIZE).contains(&pos.x) && (0..consts::GRID_SIZE).contains(&pos.y)
}

/// Chebyshev (king-move) distance between two cells
#[inline]
pub fn chebyshev(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// Install browser console logging (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
