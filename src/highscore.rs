//! High-score persistence collaborator
//!
//! A single scalar per game, keyed by game name. Writes are best-effort:
//! a failing backend is logged and otherwise ignored, and never blocks or
//! corrupts the simulation. Engines themselves never touch a store; they
//! emit [`crate::event::GameEvent::NewHighScore`] and the shell persists.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage key for the merge game
pub const MERGE_GAME_KEY: &str = "2048";
/// Storage key for the snake game
pub const SNAKE_GAME_KEY: &str = "snake";

/// Persisted high-score scalar, keyed by game name
pub trait HighScoreStore {
    /// Last persisted high score for the game, if any
    fn read(&self, game: &str) -> Option<u32>;
    /// Persist a new high score (best-effort)
    fn write(&mut self, game: &str, score: u32);
}

/// In-memory store for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self, game: &str) -> Option<u32> {
        self.scores.get(game).copied()
    }

    fn write(&mut self, game: &str, score: u32) {
        self.scores.insert(game.to_string(), score);
    }
}

/// On-disk table, one JSON file for all games
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ScoreTable {
    scores: HashMap<String, u32>,
}

/// JSON-file-backed store
///
/// Loaded once at open; every write rewrites the file. A missing or
/// corrupt file starts fresh rather than failing.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: ScoreTable,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match Self::load(&path) {
            Ok(Some(table)) => {
                log::info!(
                    "Loaded {} high scores from {}",
                    table.scores.len(),
                    path.display()
                );
                table
            }
            Ok(None) => {
                log::info!("No high-score file at {}, starting fresh", path.display());
                ScoreTable::default()
            }
            Err(e) => {
                log::warn!("Failed to read high scores from {}: {}", path.display(), e);
                ScoreTable::default()
            }
        };
        Self { path, table }
    }

    fn load(path: &Path) -> io::Result<Option<ScoreTable>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        match serde_json::from_str(&json) {
            Ok(table) => Ok(Some(table)),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }

    fn save(&self) -> io::Result<()> {
        let json = serde_json::to_string(&self.table).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }
}

impl HighScoreStore for JsonFileStore {
    fn read(&self, game: &str) -> Option<u32> {
        self.table.scores.get(game).copied()
    }

    fn write(&mut self, game: &str, score: u32) {
        self.table.scores.insert(game.to_string(), score);
        if let Err(e) = self.save() {
            log::warn!("Failed to save high scores to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grid_arcade_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read(MERGE_GAME_KEY), None);

        store.write(MERGE_GAME_KEY, 128);
        store.write(SNAKE_GAME_KEY, 7);
        assert_eq!(store.read(MERGE_GAME_KEY), Some(128));
        assert_eq!(store.read(SNAKE_GAME_KEY), Some(7));
    }

    #[test]
    fn json_store_persists_across_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path);
            assert_eq!(store.read(SNAKE_GAME_KEY), None);
            store.write(SNAKE_GAME_KEY, 42);
        }

        let store = JsonFileStore::open(&path);
        assert_eq!(store.read(SNAKE_GAME_KEY), Some(42));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.read(MERGE_GAME_KEY), None);

        // Still writable after recovering from corruption
        store.write(MERGE_GAME_KEY, 4);
        assert_eq!(store.read(MERGE_GAME_KEY), Some(4));

        let _ = fs::remove_file(&path);
    }
}
