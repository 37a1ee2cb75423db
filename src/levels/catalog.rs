//! The 30-level catalog
//!
//! Layouts are authored as wall segments and expanded into obstacle
//! cells once, on first access.

use std::sync::OnceLock;

use super::generator::{Axis, line};
use super::zones::zone_of;
use crate::Position;
use crate::consts::MAX_LEVEL;

/// A straight wall used to author a layout
#[derive(Debug, Clone, Copy)]
struct Wall {
    x: i32,
    y: i32,
    len: i32,
    axis: Axis,
}

const fn h(x: i32, y: i32, len: i32) -> Wall {
    Wall { x, y, len, axis: Axis::Horizontal }
}

const fn v(x: i32, y: i32, len: i32) -> Wall {
    Wall { x, y, len, axis: Axis::Vertical }
}

/// Authored layouts, index 0 is level 1
static LAYOUTS: [(&str, &[Wall]); MAX_LEVEL as usize] = [
    // Novice zone (1-8)
    ("First Steps", &[]),
    ("First Trial", &[h(8, 8, 3)]),
    ("Little Maze", &[h(5, 5, 4), h(11, 5, 4), h(8, 14, 4)]),
    ("Crossroads", &[v(9, 6, 1), v(10, 6, 1), v(9, 13, 1), v(10, 13, 1)]),
    ("Border Fence", &[h(3, 3, 3), h(14, 3, 3), h(8, 9, 4)]),
    ("Surrounded", &[h(5, 5, 4), h(11, 5, 4), h(8, 14, 4)]),
    (
        "Spiral Maze",
        &[h(3, 6, 5), h(12, 6, 5), v(7, 3, 1), v(12, 3, 1), v(7, 16, 1)],
    ),
    ("Novice Finale", &[h(4, 4, 6), h(10, 4, 6), h(7, 15, 6), v(9, 9, 1)]),
    // Advanced zone (9-16)
    ("Advanced Trial", &[h(4, 4, 4), h(12, 4, 4), h(8, 15, 4)]),
    ("Crossfire", &[h(7, 9, 6), v(9, 6, 1), v(10, 13, 1)]),
    ("Multiple Traps", &[h(4, 4, 3), h(13, 4, 3), h(4, 15, 3), h(8, 9, 4)]),
    ("Narrow Passage", &[h(3, 7, 4), h(13, 7, 4), v(8, 4, 1), v(11, 15, 1)]),
    ("Dense Crossfire", &[h(4, 6, 4), h(12, 6, 4), h(8, 13, 4), v(6, 9, 1)]),
    (
        "Layered Blockade",
        &[h(5, 5, 5), h(10, 5, 5), h(7, 14, 6), v(3, 9, 1), v(16, 9, 1)],
    ),
    (
        "Complex Maze",
        &[h(3, 5, 4), h(13, 5, 4), h(8, 14, 4), v(6, 8, 1), v(13, 8, 1)],
    ),
    (
        "Advanced Finale",
        &[h(4, 4, 6), h(10, 4, 6), h(7, 15, 6), h(2, 9, 3), h(15, 9, 3)],
    ),
    // Expert zone (17-24)
    (
        "Prelude to Hell",
        &[h(3, 4, 5), h(12, 4, 5), h(7, 15, 6), v(5, 9, 1), v(14, 9, 1)],
    ),
    (
        "Steel Jungle",
        &[h(2, 6, 5), h(13, 6, 5), v(7, 3, 1), v(12, 3, 1), v(9, 16, 1)],
    ),
    (
        "Death Trap",
        &[h(4, 5, 4), h(12, 5, 4), h(8, 14, 4), h(2, 9, 3), h(15, 9, 3)],
    ),
    (
        "Endless Maze",
        &[h(3, 6, 5), h(12, 6, 5), h(7, 13, 6), v(6, 3, 1), v(13, 16, 1)],
    ),
    (
        "Extreme Challenge",
        &[h(4, 4, 6), h(10, 4, 6), h(7, 15, 6), h(2, 9, 4), h(14, 9, 4)],
    ),
    (
        "Airtight",
        &[
            h(2, 5, 5),
            h(11, 5, 5),
            h(6, 14, 6),
            v(5, 8, 1),
            v(13, 8, 1),
            v(9, 11, 1),
        ],
    ),
    (
        "Ultimate Test",
        &[
            h(3, 6, 5),
            h(12, 6, 5),
            h(7, 13, 6),
            h(1, 9, 4),
            h(15, 9, 4),
            v(6, 3, 1),
        ],
    ),
    (
        "Expert Finale",
        &[
            h(4, 4, 6),
            h(10, 4, 6),
            h(7, 15, 6),
            h(2, 9, 4),
            h(14, 9, 4),
            v(9, 2, 1),
        ],
    ),
    // Hell zone (25-30)
    (
        "Gates of Hell",
        &[
            h(2, 5, 5),
            h(11, 5, 5),
            h(6, 14, 6),
            v(5, 8, 1),
            v(13, 8, 1),
            v(9, 11, 1),
        ],
    ),
    (
        "Purgatory Fire",
        &[
            h(3, 4, 6),
            h(11, 4, 6),
            h(7, 15, 6),
            h(1, 9, 5),
            h(14, 9, 5),
            v(9, 2, 1),
            v(10, 17, 1),
        ],
    ),
    (
        "Abyss of Despair",
        &[
            h(2, 4, 6),
            h(10, 4, 6),
            h(6, 15, 6),
            v(4, 8, 1),
            v(12, 8, 1),
            v(8, 11, 1),
            h(1, 9, 4),
            h(15, 9, 4),
        ],
    ),
    (
        "Judgment Day",
        &[
            h(3, 4, 6),
            h(11, 4, 6),
            h(7, 15, 6),
            h(2, 9, 5),
            h(13, 9, 5),
            v(9, 2, 1),
            v(10, 17, 1),
            v(6, 11, 1),
        ],
    ),
    (
        "Ultimate Nightmare",
        &[
            h(2, 3, 6),
            h(10, 3, 6),
            h(6, 16, 6),
            v(4, 7, 1),
            v(12, 7, 1),
            v(8, 13, 1),
            h(1, 10, 5),
            h(14, 10, 5),
        ],
    ),
    (
        "Final Challenge",
        &[
            h(2, 3, 6),
            h(10, 3, 6),
            h(6, 16, 6),
            h(1, 8, 6),
            h(13, 8, 6),
            h(1, 11, 6),
            h(13, 11, 6),
            v(4, 6, 1),
            v(12, 6, 1),
            v(8, 13, 1),
        ],
    ),
];

/// A catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    /// 1-based level number
    pub number: u32,
    pub name: &'static str,
    /// Obstacle cells, sorted and free of duplicates
    pub obstacles: Vec<Position>,
}

fn build_entry(number: u32, name: &'static str, walls: &[Wall]) -> LevelEntry {
    let mut obstacles: Vec<Position> = walls
        .iter()
        .flat_map(|w| line(Position::new(w.x, w.y), w.len, w.axis))
        .collect();
    obstacles.sort_by_key(|p| (p.y, p.x));
    obstacles.dedup();
    LevelEntry {
        number,
        name,
        obstacles,
    }
}

/// All levels in order (index 0 is level 1)
pub fn catalog() -> &'static [LevelEntry] {
    static CATALOG: OnceLock<Vec<LevelEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        LAYOUTS
            .iter()
            .zip(1..)
            .map(|(&(name, walls), number)| build_entry(number, name, walls))
            .collect()
    })
}

/// Catalog entry for `number`, if it exists
pub fn level(number: u32) -> Option<&'static LevelEntry> {
    let index = number.checked_sub(1)? as usize;
    catalog().get(index)
}

/// Obstacles for `number`; unknown levels have none
pub fn obstacles_for(number: u32) -> &'static [Position] {
    level(number).map(|l| l.obstacles.as_slice()).unwrap_or(&[])
}

pub fn level_name(number: u32) -> &'static str {
    level(number).map(|l| l.name).unwrap_or("Unknown level")
}

/// "<zone name> - <difficulty name>"
pub fn difficulty_label(number: u32) -> String {
    let zone = zone_of(number);
    format!("{} - {}", zone.name, zone.config().name)
}

pub fn difficulty_icon(number: u32) -> &'static str {
    zone_of(number).config().icon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_bounds;

    #[test]
    fn test_catalog_has_every_level() {
        let levels = catalog();
        assert_eq!(levels.len(), MAX_LEVEL as usize);
        for (i, entry) in levels.iter().enumerate() {
            assert_eq!(entry.number, i as u32 + 1);
            assert!(!entry.name.is_empty());
        }
    }

    #[test]
    fn test_first_level_is_open() {
        assert!(obstacles_for(1).is_empty());
    }

    #[test]
    fn test_level_two_layout() {
        assert_eq!(
            obstacles_for(2),
            &[Position::new(8, 8), Position::new(9, 8), Position::new(10, 8)]
        );
    }

    #[test]
    fn test_all_obstacles_on_grid() {
        for entry in catalog() {
            for cell in &entry.obstacles {
                assert!(in_bounds(*cell), "level {} has {:?} off-grid", entry.number, cell);
            }
        }
    }

    #[test]
    fn test_obstacles_deduplicated() {
        for entry in catalog() {
            let mut cells = entry.obstacles.clone();
            cells.dedup();
            assert_eq!(cells.len(), entry.obstacles.len());
        }
    }

    #[test]
    fn test_unknown_levels() {
        assert!(level(0).is_none());
        assert!(level(31).is_none());
        assert!(obstacles_for(99).is_empty());
        assert_eq!(level_name(0), "Unknown level");
    }

    #[test]
    fn test_labels() {
        assert_eq!(level_name(30), "Final Challenge");
        assert_eq!(difficulty_label(1), "Novice Zone - Easy");
        assert_eq!(difficulty_label(26), "Hell Zone - Hell");
        assert_eq!(difficulty_icon(26), "💀");
    }

    #[test]
    fn test_final_level_is_densest() {
        let last = obstacles_for(MAX_LEVEL).len();
        assert!(catalog().iter().all(|l| l.obstacles.len() <= last));
    }
}
