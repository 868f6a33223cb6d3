//! Grid Arcade - rule engines for two small grid games
//!
//! Core modules:
//! - `merge`: sliding-tile merge game (slide/combine steps, two-phase move orchestrator)
//! - `snake`: fixed-tick snake game (tick step, food placement, heading gate)
//! - `clock`: monotonic time abstraction for cooldowns and deferred phases
//! - `highscore`: best-effort high-score persistence collaborator
//!
//! All gameplay logic is deterministic: seeded RNG only, time supplied by
//! the caller as monotonic milliseconds, no rendering or platform
//! dependencies. Rendering, audio and input capture live outside the crate
//! and consume the engines through read-only projections and drained
//! [`event::GameEvent`]s.

pub mod clock;
pub mod event;
pub mod highscore;
pub mod input;
pub mod merge;
pub mod settings;
pub mod snake;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use event::GameEvent;
pub use input::Direction;
pub use merge::MergeEngine;
pub use settings::{MergeSettings, SnakeSettings};
pub use snake::SnakeEngine;

/// Game configuration constants
pub mod consts {
    use crate::clock::Millis;

    /// Merge-game board side length
    pub const MERGE_GRID_SIZE: i32 = 4;
    /// Probability that a spawned tile is a 4 (otherwise a 2)
    pub const FOUR_TILE_CHANCE: f64 = 0.1;
    /// Delay between publishing a move and spawning the next tile, so the
    /// slide/merge animation finishes before the new tile appears
    pub const SPAWN_DELAY_MS: Millis = 200;
    /// Minimum interval between accepted merge-game inputs
    pub const INPUT_COOLDOWN_MS: Millis = 300;
    /// Tile value the external caller conventionally treats as a win
    pub const WIN_TILE_VALUE: u32 = 2048;

    /// Default snake board side length (the user-selectable difficulty knob)
    pub const SNAKE_GRID_SIZE: i32 = 10;
    /// Fixed snake tick period
    pub const TICK_MS: Millis = 200;
    /// Minimum interval between accepted heading changes
    pub const HEADING_COOLDOWN_MS: Millis = 200;
    /// Snake starting length
    pub const SNAKE_START_LENGTH: i32 = 3;
    /// Maximum ticks replayed in one poll when the caller falls behind
    pub const MAX_CATCHUP_TICKS: u32 = 4;
}
