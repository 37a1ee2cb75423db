//! Game session: the state machine around the simulation
//!
//! `Game` owns one `GameState` plus its collaborators. The timer drives
//! `step()` through `on_timer`; every transition that changes tick speed
//! or stops play cancels the previous tick timer before arming another,
//! so at most one tick source exists at a time.
//!
//! States: Idle -> Running <-> Paused; Running -> GameOver;
//! Running -> LevelComplete -> Running (next level) | GameOver (last level).

use crate::consts::MAX_LEVEL;
use crate::levels::{self, Difficulty, Zone};
use crate::persistence::Progress;
use crate::platform::{Intent, KeyValueStore, ManualTimer, Timer, TimerHandle};
use crate::settings::Settings;
use crate::sim::{self, Direction, GameEvent, GameState, GameStatus, StepOutcome};
use crate::Position;

/// One game session
pub struct Game<T: Timer, S: KeyValueStore> {
    state: GameState,
    settings: Settings,
    progress: Progress,
    timer: T,
    store: S,
    tick_timer: Option<TimerHandle>,
    advance_timer: Option<TimerHandle>,
    campaign_complete: bool,
}

impl<T: Timer, S: KeyValueStore> Game<T, S> {
    /// Create an idle game on level 1, loading stored progress
    pub fn new(timer: T, store: S, settings: Settings) -> Self {
        let seed = settings.resolve_seed();
        let state = GameState::with_limits(seed, settings.spawn_limits());
        let progress = Progress::load(&store, &settings.progress_key);
        log::info!("New game (seed {seed})");
        Self {
            state,
            settings,
            progress,
            timer,
            store,
            tick_timer: None,
            advance_timer: None,
            campaign_complete: false,
        }
    }

    // === Commands ===

    /// Start play on the current level.
    ///
    /// Only valid from Idle or GameOver; both scores reset.
    pub fn start(&mut self) {
        match self.state.status {
            GameStatus::Idle | GameStatus::GameOver => {}
            status => {
                log::debug!("start ignored while {status:?}");
                return;
            }
        }
        self.campaign_complete = false;
        sim::start_level(&mut self.state, true);
        self.arm_tick();
    }

    /// Run one simulation step and react to its outcome
    pub fn step(&mut self) -> StepOutcome {
        let outcome = sim::step(&mut self.state);
        match outcome {
            StepOutcome::LevelComplete => self.complete_level(),
            StepOutcome::Crashed(cause) => {
                log::info!(
                    "Game over on level {} ({cause:?}), score {}",
                    self.state.level,
                    self.state.score
                );
                self.stop_tick();
                self.record_score();
            }
            _ => {}
        }
        outcome
    }

    /// Buffer a turn; ignored unless running or if it reverses the snake
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.state.set_direction(direction) {
            log::debug!("turn {direction:?} ignored");
        }
    }

    /// Running -> Paused; stops ticking without touching state
    pub fn pause(&mut self) {
        if self.state.status == GameStatus::Running {
            self.state.status = GameStatus::Paused;
            self.stop_tick();
        }
    }

    /// Paused -> Running; re-arms ticking at the level speed
    pub fn resume(&mut self) {
        if self.state.status == GameStatus::Paused {
            self.state.status = GameStatus::Running;
            self.arm_tick();
        }
    }

    /// Toggle Running <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.state.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => {}
        }
    }

    /// The combined start/pause control
    pub fn toggle_primary(&mut self) {
        match self.state.status {
            GameStatus::Idle | GameStatus::GameOver => self.start(),
            GameStatus::Running | GameStatus::Paused => self.toggle_pause(),
            GameStatus::LevelComplete => {}
        }
    }

    /// Apply an intent from the input collaborator
    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(direction) => self.set_direction(direction),
            Intent::TogglePrimary => self.toggle_primary(),
        }
    }

    /// Choose the level for the next start.
    ///
    /// Only in Idle or GameOver; out-of-range levels are ignored. Snake
    /// and food stay put until `start` or `reset`.
    pub fn select_level(&mut self, level: u32) {
        if !(1..=MAX_LEVEL).contains(&level) {
            log::debug!("select_level({level}) out of range");
            return;
        }
        if !matches!(
            self.state.status,
            GameStatus::Idle | GameStatus::GameOver
        ) {
            log::debug!("select_level ignored while {:?}", self.state.status);
            return;
        }
        self.state.level = level;
        self.state.level_score = 0;
        self.state.load_obstacles();
        self.campaign_complete = false;
    }

    /// Kept for older callers: difficulty follows the level's zone
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        log::info!(
            "Difficulty is set by level; ignoring request for {}",
            difficulty.as_str()
        );
    }

    /// Stop everything and return to Idle on the current level
    pub fn reset(&mut self) {
        self.stop_tick();
        self.cancel_advance();
        self.state.status = GameStatus::Idle;
        self.state.score = 0;
        self.state.level_score = 0;
        self.state.reset_board();
        self.campaign_complete = false;
    }

    /// Cancel all pending timers; called on drop
    pub fn shutdown(&mut self) {
        self.stop_tick();
        self.cancel_advance();
    }

    /// Dispatch a fired timer
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.tick_timer == Some(handle) {
            self.step();
        } else if self.advance_timer == Some(handle) {
            self.advance_timer = None;
            self.advance_level();
        } else {
            log::debug!("stale timer {handle:?}");
        }
    }

    /// Write current progress to the store (merging with what is there)
    pub fn save_progress(&mut self) {
        match self.progress.save(&mut self.store, &self.settings.progress_key) {
            Ok(merged) => self.progress = merged,
            Err(e) => log::warn!("Could not save progress: {e}"),
        }
    }

    /// Reload progress from the store
    pub fn load_progress(&mut self) {
        self.progress = Progress::load(&self.store, &self.settings.progress_key);
    }

    // === Queries ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn snake(&self) -> impl Iterator<Item = Position> + '_ {
        self.state.snake.iter().copied()
    }

    pub fn food(&self) -> Option<Position> {
        self.state.food
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.state.obstacles
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level_score(&self) -> u64 {
        self.state.level_score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    pub fn is_level_complete(&self) -> bool {
        self.state.status == GameStatus::LevelComplete
    }

    /// True once the final level was cleared (status is then GameOver)
    pub fn campaign_complete(&self) -> bool {
        self.campaign_complete
    }

    pub fn current_speed_ms(&self) -> u32 {
        levels::speed_of(self.state.level)
    }

    pub fn current_zone(&self) -> &'static Zone {
        levels::zone_of(self.state.level)
    }

    pub fn score_multiplier(&self) -> f32 {
        levels::score_multiplier_of(self.state.level)
    }

    pub fn required_score(&self) -> u64 {
        levels::required_score_of(self.state.level)
    }

    pub fn level_name(&self) -> &'static str {
        levels::level_name(self.state.level)
    }

    pub fn difficulty_label(&self) -> String {
        levels::difficulty_label(self.state.level)
    }

    pub fn difficulty_icon(&self) -> &'static str {
        levels::difficulty_icon(self.state.level)
    }

    pub fn unlocked_levels(&self) -> u32 {
        self.progress.unlocked_levels
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // === Internals ===

    /// Record progress and schedule the transition out of LevelComplete
    fn complete_level(&mut self) {
        self.stop_tick();
        let level = self.state.level;
        log::info!(
            "Level {level} complete (level score {}, total {})",
            self.state.level_score,
            self.state.score
        );
        self.progress.unlock_through(level + 1);
        self.record_score();

        self.cancel_advance();
        self.advance_timer = Some(
            self.timer
                .schedule_once(self.settings.level_complete_delay_ms),
        );
    }

    /// Deferred half of level completion
    fn advance_level(&mut self) {
        if self.state.status != GameStatus::LevelComplete {
            return;
        }
        if self.state.level < MAX_LEVEL {
            self.state.level += 1;
            self.state.level_score = 0;
            sim::start_level(&mut self.state, false);
            self.arm_tick();
        } else {
            log::info!("All {MAX_LEVEL} levels cleared, final score {}", self.state.score);
            self.state.status = GameStatus::GameOver;
            self.campaign_complete = true;
            self.state.push_event(GameEvent::AllLevelsCleared {
                score: self.state.score,
            });
        }
    }

    /// Fold the session score into the high score of the current zone and save
    fn record_score(&mut self) {
        let difficulty = levels::zone_of(self.state.level).difficulty;
        if self.progress.high_scores.record(difficulty, self.state.score) {
            log::info!(
                "New {} high score: {}",
                difficulty.as_str(),
                self.state.score
            );
        }
        self.save_progress();
    }

    /// Replace any tick timer with one at the current level's speed
    fn arm_tick(&mut self) {
        self.stop_tick();
        let interval = self.current_speed_ms();
        self.tick_timer = Some(self.timer.schedule_repeating(interval));
    }

    fn stop_tick(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            self.timer.cancel(handle);
        }
    }

    fn cancel_advance(&mut self) {
        if let Some(handle) = self.advance_timer.take() {
            self.timer.cancel(handle);
        }
    }
}

impl<S: KeyValueStore> Game<ManualTimer, S> {
    /// Advance the virtual clock by `ms`, firing every due timer in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.timer.now_ms() + ms;
        while let Some(handle) = self.timer.pop_due(until) {
            self.on_timer(handle);
        }
        self.timer.set_now(until);
    }
}

impl<T: Timer, S: KeyValueStore> Drop for Game<T, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
