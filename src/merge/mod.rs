//! Sliding-tile merge game
//!
//! The tile list is the authoritative state. `slide` and `combine` are
//! pure steps over it; `engine` sequences them through a two-phase move
//! state machine and gates raw input.

pub mod combine;
pub mod engine;
pub mod slide;
pub mod tile;

pub use combine::combine;
pub use engine::MergeEngine;
pub use slide::{Axis, slide};
pub use tile::{Tile, is_game_over, project};
