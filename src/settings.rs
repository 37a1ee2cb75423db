//! Runtime configuration
//!
//! Persisted separately from progress under its own key. Missing fields
//! take their defaults, so older records keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::{FOOD_SPAWN_ATTEMPTS, LEVEL_COMPLETE_DELAY_MS, SNAKE_SPAWN_ATTEMPTS};
use crate::platform::KeyValueStore;
use crate::sim::SpawnLimits;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grace period before the next level starts (ms)
    pub level_complete_delay_ms: u32,
    /// Random snake placements tried before scanning
    pub snake_spawn_attempts: u32,
    /// Random food placements tried before scanning
    pub food_spawn_attempts: u32,
    /// Storage key of the progress record
    pub progress_key: String,
    /// Fixed RNG seed; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_complete_delay_ms: LEVEL_COMPLETE_DELAY_MS,
            snake_spawn_attempts: SNAKE_SPAWN_ATTEMPTS,
            food_spawn_attempts: FOOD_SPAWN_ATTEMPTS,
            progress_key: "snakeGameProgress".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snake_settings";

    /// Default settings with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn spawn_limits(&self) -> SpawnLimits {
        SpawnLimits {
            snake_attempts: self.snake_spawn_attempts,
            food_attempts: self.food_spawn_attempts,
        }
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged, not returned
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(Into::into)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}
