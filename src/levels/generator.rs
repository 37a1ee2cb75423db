//! Obstacle generator primitives
//!
//! Pure functions producing cell lists. Level layouts are authored from
//! these and baked once into the catalog.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Orientation of a wall segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit step along this axis
    #[inline]
    pub fn step(self) -> Position {
        match self {
            Axis::Horizontal => Position::new(1, 0),
            Axis::Vertical => Position::new(0, 1),
        }
    }
}

/// `length` cells starting at `start`, extending right or down
pub fn line(start: Position, length: i32, axis: Axis) -> Vec<Position> {
    let step = axis.step();
    (0..length.max(0)).map(|i| start + step * i).collect()
}

/// Cells of a `width` x `height` rectangle whose top-left is `start`.
///
/// Only the border is produced unless `filled` is set.
pub fn rect_perimeter(start: Position, width: i32, height: i32, filled: bool) -> Vec<Position> {
    let mut cells = Vec::new();
    for i in 0..width.max(0) {
        for j in 0..height.max(0) {
            if filled || i == 0 || i == width - 1 || j == 0 || j == height - 1 {
                cells.push(start + Position::new(i, j));
            }
        }
    }
    cells
}
