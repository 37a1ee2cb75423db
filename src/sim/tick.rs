//! Discrete simulation step
//!
//! One call to `step` advances the snake by one cell. Scheduling lives in
//! the session layer; this module never touches timers or storage.

use super::collision::{CollisionKind, check_head};
use super::spawn::place_food;
use super::state::{GameEvent, GameState, GameStatus};
use crate::levels::{food_score_of, required_score_of};

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing happened
    Skipped,
    Moved,
    Ate { points: u64 },
    /// Food pushed the level score to the threshold
    LevelComplete,
    Crashed(CollisionKind),
}

/// Advance the game by one tick
pub fn step(state: &mut GameState) -> StepOutcome {
    if state.status != GameStatus::Running {
        return StepOutcome::Skipped;
    }
    let Some(head) = state.head() else {
        return StepOutcome::Skipped;
    };

    state.direction = state.next_direction;
    state.ticks += 1;

    let new_head = head + state.direction.delta();
    state.snake.push_front(new_head);

    let mut outcome = StepOutcome::Moved;
    if state.food == Some(new_head) {
        let points = food_score_of(state.level);
        state.score += points;
        state.level_score += points;
        state.push_event(GameEvent::FoodEaten {
            at: new_head,
            points,
        });
        place_food(state);

        // Completion preempts the collision check for this tick
        if state.level_score >= required_score_of(state.level) {
            state.status = GameStatus::LevelComplete;
            state.push_event(GameEvent::LevelComplete {
                level: state.level,
                score: state.score,
            });
            return StepOutcome::LevelComplete;
        }
        outcome = StepOutcome::Ate { points };
    } else {
        state.snake.pop_back();
    }

    if let Some(cause) = check_head(&state.snake, &state.obstacles) {
        state.status = GameStatus::GameOver;
        state.push_event(GameEvent::GameOver {
            cause,
            score: state.score,
        });
        return StepOutcome::Crashed(cause);
    }

    outcome
}

/// Lay out the current level and set the game running.
///
/// `fresh` resets total and level score (a new game rather than a level
/// transition).
pub fn start_level(state: &mut GameState, fresh: bool) {
    state.reset_board();
    if fresh {
        state.score = 0;
        state.level_score = 0;
    }
    state.status = GameStatus::Running;
    state.push_event(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} started ({} obstacles, food {:?})",
        state.level,
        state.obstacles.len(),
        state.food
    );
}
