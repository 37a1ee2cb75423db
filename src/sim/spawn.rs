//! Snake and food placement
//!
//! Both use bounded rejection sampling followed by a grid scan, so they
//! always terminate even on crowded boards.

use rand::Rng;

use super::state::GameState;
use crate::consts::{GRID_SIZE, INITIAL_SNAKE_LENGTH, SPAWN_CLEARANCE};
use crate::{Position, chebyshev};

/// Margin kept between a spawn head and the grid edge
const SPAWN_MARGIN: i32 = 3;

/// Body cells for a snake whose head is at `head`, trailing to the left
pub fn initial_body(head: Position) -> impl Iterator<Item = Position> {
    (0..INITIAL_SNAKE_LENGTH as i32).map(move |i| head - Position::new(i, 0))
}

/// A head is valid when the body is obstacle-free and no obstacle lies
/// within `SPAWN_CLEARANCE` of the head.
pub fn is_valid_spawn(head: Position, obstacles: &[Position]) -> bool {
    let body_clear = initial_body(head).all(|cell| !obstacles.contains(&cell));
    body_clear
        && obstacles
            .iter()
            .all(|&obstacle| chebyshev(obstacle, head) > SPAWN_CLEARANCE)
}

fn spawn_range() -> std::ops::Range<i32> {
    SPAWN_MARGIN..GRID_SIZE - SPAWN_MARGIN
}

/// Choose a spawn head, falling back to a scan and finally the centre
fn choose_head(state: &mut GameState) -> Position {
    for _ in 0..state.limits.snake_attempts {
        let head = Position::new(
            state.rng.random_range(spawn_range()),
            state.rng.random_range(spawn_range()),
        );
        if is_valid_spawn(head, &state.obstacles) {
            return head;
        }
    }

    let scanned = spawn_range()
        .flat_map(|y| spawn_range().map(move |x| Position::new(x, y)))
        .find(|&head| is_valid_spawn(head, &state.obstacles));
    match scanned {
        Some(head) => {
            log::debug!("Level {}: spawn found by scan at {}", state.level, head);
            head
        }
        None => {
            let centre = Position::splat(GRID_SIZE / 2);
            log::warn!(
                "Level {}: no clear spawn, using centre {}",
                state.level,
                centre
            );
            centre
        }
    }
}

/// Replace the snake with a fresh one of `INITIAL_SNAKE_LENGTH`
pub fn spawn_snake(state: &mut GameState) {
    let head = choose_head(state);
    state.snake.clear();
    state.snake.extend(initial_body(head));
}

fn is_free(state: &GameState, cell: Position) -> bool {
    !state.is_snake(cell) && !state.is_obstacle(cell)
}

/// Put food on a random free cell, or clear it if the grid is full
pub fn place_food(state: &mut GameState) {
    for _ in 0..state.limits.food_attempts {
        let cell = Position::new(
            state.rng.random_range(0..GRID_SIZE),
            state.rng.random_range(0..GRID_SIZE),
        );
        if is_free(state, cell) {
            state.food = Some(cell);
            return;
        }
    }

    let free: Vec<Position> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
        .filter(|&cell| is_free(state, cell))
        .collect();
    if free.is_empty() {
        log::warn!("Level {}: no free cell for food", state.level);
        state.food = None;
    } else {
        let index = state.rng.random_range(0..free.len());
        state.food = Some(free[index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LEVEL;
    use crate::levels;
    use proptest::prelude::*;

    #[test]
    fn test_initial_body_trails_left() {
        let body: Vec<_> = initial_body(Position::new(10, 10)).collect();
        assert_eq!(
            body,
            vec![Position::new(10, 10), Position::new(9, 10), Position::new(8, 10)]
        );
    }

    #[test]
    fn test_spawn_rejects_nearby_obstacle() {
        let head = Position::new(10, 10);
        assert!(is_valid_spawn(head, &[]));
        assert!(!is_valid_spawn(head, &[Position::new(12, 12)]));
        assert!(is_valid_spawn(head, &[Position::new(13, 10)]));
        // Body cell itself blocked
        assert!(!is_valid_spawn(head, &[Position::new(8, 10)]));
    }

    #[test]
    fn test_every_level_gets_valid_spawn() {
        for level in 1..=MAX_LEVEL {
            let mut state = GameState::new(u64::from(level));
            state.level = level;
            state.reset_board();
            let head = state.head().unwrap();
            assert!(
                is_valid_spawn(head, &state.obstacles),
                "level {level} spawned at {head}"
            );
        }
    }

    #[test]
    fn test_scan_fallback_when_random_attempts_disabled() {
        let mut state = GameState::new(5);
        state.limits.snake_attempts = 0;
        state.level = 30;
        state.reset_board();
        let head = state.head().unwrap();
        assert!(is_valid_spawn(head, &state.obstacles));
    }

    #[test]
    fn test_centre_fallback_when_no_spawn_exists() {
        let mut state = GameState::new(5);
        // Obstacles everywhere the head could go
        state.obstacles = spawn_range()
            .flat_map(|y| spawn_range().map(move |x| Position::new(x, y)))
            .collect();
        spawn_snake(&mut state);
        assert_eq!(state.head(), Some(Position::new(10, 10)));
    }

    #[test]
    fn test_food_scan_on_crowded_grid() {
        let mut state = GameState::new(11);
        state.limits.food_attempts = 0;
        // Fill all but one cell with obstacles
        let hole = Position::new(19, 19);
        state.snake.clear();
        state.obstacles = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .filter(|&c| c != hole)
            .collect();
        place_food(&mut state);
        assert_eq!(state.food, Some(hole));
    }

    #[test]
    fn test_food_none_on_full_grid() {
        let mut state = GameState::new(11);
        state.snake.clear();
        state.obstacles = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .collect();
        place_food(&mut state);
        assert_eq!(state.food, None);
    }

    proptest! {
        #[test]
        fn prop_food_never_on_snake_or_obstacle(
            seed in any::<u64>(),
            level in 1u32..=MAX_LEVEL,
            body in prop::collection::vec((0i32..GRID_SIZE, 0i32..GRID_SIZE), 1..150),
            extra in prop::collection::vec((0i32..GRID_SIZE, 0i32..GRID_SIZE), 0..120),
        ) {
            let mut state = GameState::new(seed);
            state.level = level;
            state.reset_board();
            state.snake = body.into_iter().map(|(x, y)| Position::new(x, y)).collect();
            state.obstacles.extend(extra.into_iter().map(|(x, y)| Position::new(x, y)));
            place_food(&mut state);

            // At most 270 random cells plus the layout leave free cells on a 400-cell grid
            let food = state.food.unwrap();
            prop_assert!(!state.is_snake(food));
            prop_assert!(!state.is_obstacle(food));
            prop_assert!(levels::obstacles_for(level).iter().all(|&o| o != food));
        }
    }
}
