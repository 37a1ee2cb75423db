//! Platform abstraction layer
//!
//! Contracts for the collaborators the game core depends on:
//! - Time/ticks (`timer`)
//! - Input events (`input`)
//! - Storage (`storage`, LocalStorage on web)

pub mod input;
pub mod storage;
pub mod timer;

pub use input::{Intent, intent_for_key};
pub use storage::{KeyValueStore, MemoryStore};
pub use timer::{ManualTimer, Timer, TimerHandle};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
