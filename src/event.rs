//! Side-effect signals emitted by the engines
//!
//! The excluded collaborators (rendering, audio, persistence) consume
//! these instead of reaching into engine state. Engines accumulate events
//! internally; callers drain them after each mutating call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// At least one tile changed position during a slide
    TilesMoved,
    /// Two tiles combined into one of the given value
    TileMerged { value: u32 },
    /// A tile value appeared for the first time this game
    TileDiscovered { value: u32 },
    /// The snake captured the food; score after the capture
    FoodEaten { score: u32 },
    /// Terminal state reached (board saturated, or snake hit wall/body)
    GameOver,
    /// Score exceeded the previous high score; persistence should write it
    NewHighScore { score: u32 },
}
