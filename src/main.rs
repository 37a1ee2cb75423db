//! Grid Snake entry point
//!
//! Native: headless demo that lets the autopilot play from a chosen level,
//! saving progress under `$GRID_SNAKE_DATA` (default `.grid-snake`).
//! Web: exports `WebGame` for a JS front end to drive.

#[cfg(target_arch = "wasm32")]
mod web_game {
    use wasm_bindgen::prelude::*;

    use grid_snake::platform::{LocalStorage, ManualTimer, intent_for_key};
    use grid_snake::{Game, Settings};

    /// Game handle for JavaScript. The page calls `advance(elapsed_ms)` from
    /// its animation frame and forwards key names to `key`.
    #[wasm_bindgen]
    pub struct WebGame {
        game: Game<ManualTimer, LocalStorage>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebGame {
            let settings = Settings::load(&LocalStorage);
            WebGame {
                game: Game::new(ManualTimer::new(), LocalStorage, settings),
            }
        }

        /// Returns true if the key was bound
        pub fn key(&mut self, key: &str) -> bool {
            match intent_for_key(key) {
                Some(intent) => {
                    self.game.handle_intent(intent);
                    true
                }
                None => false,
            }
        }

        pub fn advance(&mut self, elapsed_ms: u32) {
            self.game.advance(u64::from(elapsed_ms));
        }

        pub fn select_level(&mut self, level: u32) {
            self.game.select_level(level);
        }

        pub fn reset(&mut self) {
            self.game.reset();
        }

        pub fn score(&self) -> u64 {
            self.game.score()
        }

        pub fn level(&self) -> u32 {
            self.game.level()
        }

        pub fn unlocked_levels(&self) -> u32 {
            self.game.unlocked_levels()
        }

        pub fn level_name(&self) -> String {
            self.game.level_name().to_string()
        }

        pub fn difficulty_label(&self) -> String {
            self.game.difficulty_label()
        }

        /// Snake, food, obstacles and status as JSON
        pub fn snapshot(&self) -> String {
            let state = self.game.state();
            let snapshot = serde_json::json!({
                "status": state.status,
                "snake": state.snake,
                "food": state.food,
                "obstacles": state.obstacles,
                "score": state.score,
                "levelScore": state.level_score,
                "requiredScore": self.game.required_score(),
            });
            snapshot.to_string()
        }

        /// Events since the last call, as a JSON array
        pub fn drain_events(&mut self) -> String {
            serde_json::to_string(&self.game.drain_events()).unwrap_or_else(|e| {
                log::warn!("Could not encode events: {e}");
                "[]".to_string()
            })
        }
    }

    impl Default for WebGame {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn run() {
        grid_snake::init_web_logging();
        log::info!("Grid Snake (web) ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    web_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_snake::consts::MAX_LEVEL;
    use grid_snake::platform::{FileStore, ManualTimer};
    use grid_snake::sim::{GameEvent, autopilot};
    use grid_snake::{Game, Settings};

    /// Virtual milliseconds the demo may run before giving up
    const DEMO_LIMIT_MS: u64 = 30 * 60 * 1000;

    env_logger::init();
    log::info!("Grid Snake (native) starting...");

    let data_dir = std::env::var("GRID_SNAKE_DATA").unwrap_or_else(|_| ".grid-snake".to_string());
    let store = FileStore::new(&data_dir);
    let settings = Settings::load(&store);
    let start_level = match std::env::args().nth(1).map(|arg| arg.parse::<u32>()) {
        Some(Ok(level)) if (1..=MAX_LEVEL).contains(&level) => level,
        Some(_) => {
            log::warn!("Level must be 1-{MAX_LEVEL}; starting at 1");
            1
        }
        None => 1,
    };

    let mut game = Game::new(ManualTimer::new(), store, settings);
    game.select_level(start_level);
    game.start();
    log::info!(
        "Autopilot playing level {} \"{}\" ({})",
        game.level(),
        game.level_name(),
        game.difficulty_label()
    );

    while !game.is_game_over() && game.timer().now_ms() < DEMO_LIMIT_MS {
        if game.is_running() {
            if let Some(direction) = autopilot::suggest(game.state()) {
                game.set_direction(direction);
            }
        }
        let elapsed = u64::from(game.current_speed_ms());
        game.advance(elapsed);

        for event in game.drain_events() {
            match event {
                GameEvent::LevelStarted { level } => {
                    log::info!("Level {level}: {}", grid_snake::levels::level_name(level));
                }
                GameEvent::GameOver { cause, score } => {
                    log::info!("Crashed ({cause:?}) with score {score}");
                }
                GameEvent::AllLevelsCleared { score } => {
                    log::info!("Campaign cleared with score {score}");
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    println!(
        "Reached level {} with score {} ({} levels unlocked, data in {data_dir})",
        game.level(),
        game.score(),
        game.unlocked_levels()
    );
}
