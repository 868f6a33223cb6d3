//! Move orchestrator and input gate
//!
//! Sequences slide -> combine -> deferred spawn -> game-over check. A move
//! is staged into two phases: the slid/merged arrangement is published
//! immediately, then one new tile spawns after a fixed delay so the slide
//! animation finishes before it appears. The deferred phase carries a
//! snapshot of the board taken at scheduling time and discards itself if
//! the board no longer matches - the only race in the system, resolved by
//! comparison rather than locking.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clock::Millis;
use crate::event::GameEvent;
use crate::input::Direction;
use crate::settings::MergeSettings;

use super::combine::combine;
use super::slide::{Axis, slide};
use super::tile::{self, Tile};

/// Orchestrator phase
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    /// A move was published; one tile spawns when the delay elapses, unless
    /// the board stopped matching the snapshot taken at scheduling time.
    AwaitingSpawn { due: Millis, snapshot: Vec<Tile> },
}

/// One merge-game instance: owned state plus explicit transition/query
/// surface. No ambient globals.
pub struct MergeEngine {
    settings: MergeSettings,
    rng: Pcg32,
    tiles: Vec<Tile>,
    next_id: u32,
    score: u32,
    high_score: u32,
    /// Tile values seen this game, seeded with the starting tiles
    discovered: HashSet<u32>,
    phase: Phase,
    active: bool,
    won: bool,
    game_over: bool,
    last_accepted: Option<Millis>,
    events: Vec<GameEvent>,
}

impl MergeEngine {
    /// Build an initialized but inactive engine. `high_score` comes from
    /// the caller's persistence collaborator.
    pub fn new(settings: MergeSettings, seed: u64, high_score: u32) -> Self {
        let mut engine = Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            tiles: Vec::new(),
            next_id: 0,
            score: 0,
            high_score,
            discovered: HashSet::new(),
            phase: Phase::Idle,
            active: false,
            won: false,
            game_over: false,
            last_accepted: None,
            events: Vec::new(),
        };
        engine.reinitialize();
        engine
    }

    /// Discard the whole store and reseed two starting tiles
    fn reinitialize(&mut self) {
        self.next_id = 0;
        self.tiles = tile::initialize(
            &mut self.rng,
            self.settings.grid_size,
            self.settings.four_tile_chance,
            &mut self.next_id,
        );
        self.discovered = self.tiles.iter().map(|t| t.value).collect();
        self.score = 0;
        self.won = false;
        self.game_over = false;
        self.phase = Phase::Idle;
        self.last_accepted = None;
    }

    /// Begin accepting input
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Fresh board and score under a new seed; the high score survives
    pub fn restart(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.reinitialize();
        self.active = true;
        log::info!("merge game restarted with seed {seed}");
    }

    /// Traversal parameters for a direction: axis, first placement index,
    /// and step (+1 walks from the near edge, -1 from the far edge)
    fn move_params(&self, dir: Direction) -> (Axis, i32, i32) {
        let last = self.settings.grid_size - 1;
        match dir {
            Direction::Left => (Axis::X, 0, 1),
            Direction::Right => (Axis::X, last, -1),
            Direction::Up => (Axis::Y, 0, 1),
            Direction::Down => (Axis::Y, last, -1),
        }
    }

    /// Input gate: inactive, won, over, mid-flight, or cooling down all
    /// silently reject
    fn accepts_input(&self, now: Millis) -> bool {
        if !self.active || self.won || self.game_over || self.phase != Phase::Idle {
            return false;
        }
        match self.last_accepted {
            Some(last) => now.saturating_sub(last) >= self.settings.input_cooldown_ms,
            None => true,
        }
    }

    /// The sole mutating entry point for input. Returns true when the move
    /// changed the board; a rejected or no-op input returns false with no
    /// state change beyond the gate's own cooldown.
    pub fn submit_direction(&mut self, dir: Direction, now: Millis) -> bool {
        if !self.accepts_input(now) {
            return false;
        }
        self.last_accepted = Some(now);

        let (axis, start, step) = self.move_params(dir);
        let slid = slide(&self.tiles, axis, start, step);
        let moved = slid.iter().any(|t| {
            self.tiles
                .iter()
                .find(|o| o.id == t.id)
                .is_some_and(|o| o.pos != t.pos)
        });
        let (merged, score_delta) = combine(&slid, axis, start, step);

        if !arrangement_changed(&self.tiles, &merged) {
            // Legal direction that changes nothing: not a move
            return false;
        }

        if moved {
            self.events.push(GameEvent::TilesMoved);
        }
        for tile in merged.iter().filter(|t| t.newly_merged) {
            self.events.push(GameEvent::TileMerged { value: tile.value });
            if self.discovered.insert(tile.value) {
                self.events.push(GameEvent::TileDiscovered { value: tile.value });
            }
        }
        if score_delta > 0 {
            self.add_score(score_delta);
        }

        self.tiles = merged;
        self.phase = Phase::AwaitingSpawn {
            due: now + self.settings.spawn_delay_ms,
            snapshot: self.tiles.clone(),
        };
        true
    }

    /// Drive the deferred spawn phase. Call whenever time passes; fires at
    /// most one spawn per elapsed deadline.
    pub fn poll(&mut self, now: Millis) {
        match &self.phase {
            Phase::AwaitingSpawn { due, .. } if now >= *due => {}
            _ => return,
        }
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::AwaitingSpawn { snapshot, .. } = phase else {
            return;
        };

        if arrangement_changed(&snapshot, &self.tiles) {
            // A newer cycle owns the board; this timer is stale
            log::debug!("discarding stale spawn timer");
            return;
        }

        tile::add_random_tile(
            &mut self.tiles,
            &mut self.rng,
            self.settings.grid_size,
            self.settings.four_tile_chance,
            &mut self.next_id,
        );
        if tile::is_game_over(&self.tiles, self.settings.grid_size) {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            log::info!("merge game over at score {}", self.score);
        }
    }

    fn add_score(&mut self, delta: u32) {
        self.score += delta;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    /// Win state is an external decision (conventionally a 2048 tile); the
    /// caller feeds it back so the gate can block further input
    pub fn set_won(&mut self, won: bool) {
        self.won = won;
    }

    /// Deadline of the pending spawn phase, for the scheduling shell
    pub fn next_deadline(&self) -> Option<Millis> {
        match &self.phase {
            Phase::AwaitingSpawn { due, .. } => Some(*due),
            Phase::Idle => None,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Row-major value matrix, recomputed from the store
    pub fn board(&self) -> Vec<Vec<Option<u32>>> {
        tile::project(&self.tiles, self.settings.grid_size)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// Largest tile value on the board, for the external win check
    pub fn max_tile(&self) -> Option<u32> {
        self.tiles.iter().map(|t| t.value).max()
    }

    /// Take all pending side-effect signals
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn set_tiles(&mut self, tiles: Vec<Tile>) {
        self.next_id = tiles.iter().map(|t| t.id + 1).max().unwrap_or(0);
        self.discovered = tiles.iter().map(|t| t.value).collect();
        self.tiles = tiles;
    }
}

/// True when the two stores differ anywhere in (id, position, value)
fn arrangement_changed(old: &[Tile], new: &[Tile]) -> bool {
    if old.len() != new.len() {
        return true;
    }
    old.iter().any(|o| {
        !new.iter()
            .any(|n| n.id == o.id && n.pos == o.pos && n.value == o.value)
    })
}
