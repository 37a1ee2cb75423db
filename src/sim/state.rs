//! Game state and core simulation types
//!
//! Everything one game session mutates lives in `GameState`. There is no
//! global state, so any number of games can run side by side.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionKind;
use crate::Position;
use crate::consts::{FOOD_SPAWN_ATTEMPTS, SNAKE_SPAWN_ATTEMPTS};
use crate::levels;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-cell offset; y grows downward
    pub fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Authoritative lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Paused,
    /// Lost, or every level cleared (see `GameEvent::AllLevelsCleared`)
    GameOver,
    /// Level score reached; next level starts after a grace period
    LevelComplete,
}

/// Notable things that happened, queued for renderers/UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    FoodEaten { at: Position, points: u64 },
    LevelComplete { level: u32, score: u64 },
    GameOver { cause: CollisionKind, score: u64 },
    /// Final level cleared; status becomes `GameOver`
    AllLevelsCleared { score: u64 },
}

/// Retry caps for random placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnLimits {
    pub snake_attempts: u32,
    pub food_attempts: u32,
}

impl Default for SpawnLimits {
    fn default() -> Self {
        Self {
            snake_attempts: SNAKE_SPAWN_ATTEMPTS,
            food_attempts: FOOD_SPAWN_ATTEMPTS,
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Current level (1-based)
    pub level: u32,
    pub status: GameStatus,
    /// Body cells, head first
    pub snake: VecDeque<Position>,
    /// `None` only when no free cell exists
    pub food: Option<Position>,
    /// Obstacles in play, copied from the catalog at level (re)start
    pub obstacles: Vec<Position>,
    /// Facing used by the last step
    pub direction: Direction,
    /// Buffered turn, applied at the start of the next step
    pub next_direction: Direction,
    /// Total score for the session
    pub score: u64,
    /// Score within the current level
    pub level_score: u64,
    /// Steps executed since the level started
    pub ticks: u64,
    pub limits: SpawnLimits,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game on level 1 with snake, obstacles and food placed
    pub fn new(seed: u64) -> Self {
        Self::with_limits(seed, SpawnLimits::default())
    }

    pub fn with_limits(seed: u64, limits: SpawnLimits) -> Self {
        let mut state = Self {
            seed,
            level: 1,
            status: GameStatus::Idle,
            snake: VecDeque::new(),
            food: None,
            obstacles: Vec::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            score: 0,
            level_score: 0,
            ticks: 0,
            limits,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.reset_board();
        state
    }

    /// Head cell
    pub fn head(&self) -> Option<Position> {
        self.snake.front().copied()
    }

    /// Replace obstacles with the catalog layout of the current level
    pub fn load_obstacles(&mut self) {
        self.obstacles.clear();
        self.obstacles
            .extend_from_slice(levels::obstacles_for(self.level));
    }

    /// Reload obstacles, respawn the snake, place food and face right
    pub fn reset_board(&mut self) {
        self.load_obstacles();
        super::spawn::spawn_snake(self);
        super::spawn::place_food(self);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.ticks = 0;
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn is_snake(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Buffer a turn for the next step.
    ///
    /// Ignored unless running, and ignored if it reverses the current
    /// facing. Returns whether the turn was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.next_direction = direction;
        true
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
