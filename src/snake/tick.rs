//! Tick step
//!
//! Advances the snake by one cell. Pure: the engine shell owns scheduling
//! and all mutable state.

use glam::IVec2;

use crate::input::Direction;

/// Result of advancing the snake by one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Post-tick segments, head first; unchanged when `collided`
    pub segments: Vec<IVec2>,
    /// The head hit a wall or the body; terminal
    pub collided: bool,
    /// The head landed on the food this tick
    pub ate: bool,
}

/// Move the head one cell along `heading`.
///
/// Collision is checked against the pre-tick segment list, including the
/// tail cell about to vacate: moving into the current tail cell still
/// collides. On collision the segments are returned unchanged. Eating
/// retains the tail, growing the snake by one.
///
/// `segments` must be non-empty.
pub fn tick(segments: &[IVec2], food: IVec2, heading: Direction, grid_size: i32) -> TickOutcome {
    let head = segments[0] + heading.offset();

    let off_grid = head.x < 0 || head.y < 0 || head.x >= grid_size || head.y >= grid_size;
    if off_grid || segments.contains(&head) {
        return TickOutcome {
            segments: segments.to_vec(),
            collided: true,
            ate: false,
        };
    }

    let ate = head == food;
    let mut next = Vec::with_capacity(segments.len() + 1);
    next.push(head);
    if ate {
        next.extend_from_slice(segments);
    } else {
        next.extend_from_slice(&segments[..segments.len() - 1]);
    }
    TickOutcome {
        segments: next,
        collided: false,
        ate,
    }
}
