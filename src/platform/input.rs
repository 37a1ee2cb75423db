//! Keyboard mapping for the input collaborator
//!
//! Keys arrive as DOM-style key names ("ArrowUp", "w", " ").

use crate::sim::Direction;

/// A discrete player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    /// Start from idle/game over, otherwise pause or resume
    TogglePrimary,
}

/// Map a key name to an intent; unbound keys give `None`
pub fn intent_for_key(key: &str) -> Option<Intent> {
    let intent = match key {
        "ArrowUp" | "w" | "W" => Intent::Turn(Direction::Up),
        "ArrowDown" | "s" | "S" => Intent::Turn(Direction::Down),
        "ArrowLeft" | "a" | "A" => Intent::Turn(Direction::Left),
        "ArrowRight" | "d" | "D" => Intent::Turn(Direction::Right),
        " " | "Space" | "Spacebar" => Intent::TogglePrimary,
        _ => return None,
    };
    Some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(intent_for_key("ArrowUp"), Some(Intent::Turn(Direction::Up)));
        assert_eq!(intent_for_key("ArrowDown"), Some(Intent::Turn(Direction::Down)));
        assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::Turn(Direction::Left)));
        assert_eq!(intent_for_key("ArrowRight"), Some(Intent::Turn(Direction::Right)));
    }

    #[test]
    fn test_wasd_either_case() {
        for (lower, upper, dir) in [
            ("w", "W", Direction::Up),
            ("s", "S", Direction::Down),
            ("a", "A", Direction::Left),
            ("d", "D", Direction::Right),
        ] {
            assert_eq!(intent_for_key(lower), Some(Intent::Turn(dir)));
            assert_eq!(intent_for_key(upper), Some(Intent::Turn(dir)));
        }
    }

    #[test]
    fn test_space_toggles() {
        assert_eq!(intent_for_key(" "), Some(Intent::TogglePrimary));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(intent_for_key("q"), None);
        assert_eq!(intent_for_key("Enter"), None);
        assert_eq!(intent_for_key(""), None);
    }
}
