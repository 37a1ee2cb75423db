//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - One discrete step per call, no wall-clock time
//! - Seeded RNG only
//! - No timer, storage or rendering dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, check_head, is_fatal};
pub use spawn::{is_valid_spawn, place_food, spawn_snake};
pub use state::{Direction, GameEvent, GameState, GameStatus, SpawnLimits};
pub use tick::{StepOutcome, start_level, step};
