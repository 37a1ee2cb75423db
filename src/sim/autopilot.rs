//! Demo-mode steering
//!
//! Greedy: head toward the food along any turn that is not immediately
//! fatal, preferring cells with more open neighbours when tied.

use super::collision::is_fatal;
use super::state::{Direction, GameState};
use crate::Position;

fn manhattan(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Suggest a direction for the next step, or `None` if every move is fatal
pub fn suggest(state: &GameState) -> Option<Direction> {
    let head = state.head()?;
    let facing = state.direction;

    Direction::ALL
        .into_iter()
        .filter(|&d| !d.is_opposite(facing))
        .filter_map(|d| {
            let cell = head + d.delta();
            let growing = state.food == Some(cell);
            if is_fatal(cell, &state.snake, &state.obstacles, growing) {
                return None;
            }
            let distance = state.food.map(|f| manhattan(cell, f)).unwrap_or(0);
            let open = Direction::ALL
                .into_iter()
                .filter(|n| !is_fatal(cell + n.delta(), &state.snake, &state.obstacles, true))
                .count() as i32;
            Some((d, distance, open))
        })
        .min_by_key(|&(_, distance, open)| (distance, -open))
        .map(|(d, _, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameStatus;
    use crate::sim::tick::{StepOutcome, start_level, step};

    #[test]
    fn test_heads_toward_food() {
        let mut state = GameState::new(1);
        start_level(&mut state, true);
        state.snake = [(10, 10), (9, 10), (8, 10)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        state.food = Some(Position::new(10, 3));
        assert_eq!(suggest(&state), Some(Direction::Up));
    }

    #[test]
    fn test_avoids_wall() {
        let mut state = GameState::new(1);
        start_level(&mut state, true);
        state.snake = [(19, 5), (18, 5), (17, 5)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        state.food = Some(Position::new(19, 0));
        assert_eq!(suggest(&state), Some(Direction::Up));
    }

    #[test]
    fn test_clears_first_level() {
        let mut state = GameState::new(42);
        start_level(&mut state, true);
        for _ in 0..2_000 {
            if let Some(d) = suggest(&state) {
                state.set_direction(d);
            }
            if matches!(step(&mut state), StepOutcome::LevelComplete) {
                break;
            }
        }
        assert_eq!(state.status, GameStatus::LevelComplete);
    }
}
