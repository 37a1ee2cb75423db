//! Collision detection for the snake head
//!
//! Evaluated after the body has moved, so the tail cell vacated this step
//! is no longer part of the snake.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{Position, in_bounds};

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Left the grid
    Wall,
    /// Hit its own body
    SelfBite,
    Obstacle,
}

/// Check the head (front of `snake`) against walls, body and obstacles
pub fn check_head(snake: &VecDeque<Position>, obstacles: &[Position]) -> Option<CollisionKind> {
    let head = *snake.front()?;

    if !in_bounds(head) {
        return Some(CollisionKind::Wall);
    }
    if snake.iter().skip(1).any(|&segment| segment == head) {
        return Some(CollisionKind::SelfBite);
    }
    if obstacles.contains(&head) {
        return Some(CollisionKind::Obstacle);
    }
    None
}

/// Whether moving the head into `cell` would be fatal on the next step.
///
/// The tail is treated as vacated unless the snake is about to grow.
pub fn is_fatal(
    cell: Position,
    snake: &VecDeque<Position>,
    obstacles: &[Position],
    growing: bool,
) -> bool {
    if !in_bounds(cell) || obstacles.contains(&cell) {
        return true;
    }
    let body_len = if growing {
        snake.len()
    } else {
        snake.len().saturating_sub(1)
    };
    snake.iter().take(body_len).any(|&segment| segment == cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> VecDeque<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_clear_head() {
        let s = snake(&[(10, 10), (9, 10), (8, 10)]);
        assert_eq!(check_head(&s, &[]), None);
    }

    #[test]
    fn test_wall_collisions() {
        assert_eq!(check_head(&snake(&[(-1, 5), (0, 5)]), &[]), Some(CollisionKind::Wall));
        assert_eq!(check_head(&snake(&[(20, 5), (19, 5)]), &[]), Some(CollisionKind::Wall));
        assert_eq!(check_head(&snake(&[(5, -1), (5, 0)]), &[]), Some(CollisionKind::Wall));
        assert_eq!(check_head(&snake(&[(5, 20), (5, 19)]), &[]), Some(CollisionKind::Wall));
    }

    #[test]
    fn test_self_bite() {
        let s = snake(&[(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)]);
        assert_eq!(check_head(&s, &[]), Some(CollisionKind::SelfBite));
    }

    #[test]
    fn test_obstacle_hit() {
        let s = snake(&[(8, 8), (7, 8), (6, 8)]);
        assert_eq!(
            check_head(&s, &[Position::new(8, 8)]),
            Some(CollisionKind::Obstacle)
        );
    }

    #[test]
    fn test_wall_takes_precedence() {
        // Off-grid cells can never be obstacles, but the order is still wall first
        let s = snake(&[(-1, 0), (0, 0)]);
        assert_eq!(
            check_head(&s, &[Position::new(-1, 0)]),
            Some(CollisionKind::Wall)
        );
    }

    #[test]
    fn test_empty_snake_never_collides() {
        assert_eq!(check_head(&VecDeque::new(), &[]), None);
    }

    #[test]
    fn test_is_fatal_tail_chase() {
        // Square loop: head may follow its own tail when not growing
        let s = snake(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
        let tail = Position::new(5, 6);
        assert!(!is_fatal(tail, &s, &[], false));
        assert!(is_fatal(tail, &s, &[], true));
        assert!(is_fatal(Position::new(6, 5), &s, &[], false));
        assert!(is_fatal(Position::new(-1, 5), &s, &[], false));
    }
}
