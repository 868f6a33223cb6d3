//! Grid snake game
//!
//! `tick` and `place_food` are pure functions over the segment list;
//! `engine` latches headings, schedules fixed-period ticks and tracks
//! score.

pub mod engine;
pub mod food;
pub mod tick;

pub use engine::SnakeEngine;
pub use food::place_food;
pub use tick::{TickOutcome, tick};
