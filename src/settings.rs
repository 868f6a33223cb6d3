//! Engine configuration
//!
//! One settings struct per engine, owned by the engine instance. Defaults
//! match the original browser games; the snake grid size is the only knob
//! exposed to players.

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::consts::*;

/// Merge-game tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Board side length
    pub grid_size: i32,
    /// Chance a spawned tile is a 4 instead of a 2
    pub four_tile_chance: f64,
    /// Delay before the post-move tile spawns
    pub spawn_delay_ms: Millis,
    /// Cooldown between accepted directional inputs
    pub input_cooldown_ms: Millis,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            grid_size: MERGE_GRID_SIZE,
            four_tile_chance: FOUR_TILE_CHANCE,
            spawn_delay_ms: SPAWN_DELAY_MS,
            input_cooldown_ms: INPUT_COOLDOWN_MS,
        }
    }
}

/// Snake-game tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeSettings {
    /// Board side length
    pub grid_size: i32,
    /// Fixed tick period
    pub tick_ms: Millis,
    /// Cooldown between accepted heading changes
    pub heading_cooldown_ms: Millis,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: SNAKE_GRID_SIZE,
            tick_ms: TICK_MS,
            heading_cooldown_ms: HEADING_COOLDOWN_MS,
        }
    }
}

impl SnakeSettings {
    /// Settings for a user-chosen board size
    pub fn with_grid_size(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }
}
