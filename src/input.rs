//! Directional input vocabulary shared by both games
//!
//! Keyboard and swipe collaborators both translate to these four
//! directions before anything reaches an engine gate.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four cardinal directions.
///
/// Grid coordinates are screen-oriented: y grows downward, so `Up` steps
/// by (0, -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset of one step in this direction
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// The exact opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
