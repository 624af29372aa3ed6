//! High-score persistence
//!
//! Features:
//! - JSON list of `{name, score}` records, same layout on every backend
//! - Malformed or missing data loads as an empty table (logged, never fatal)
//! - Backends: in-memory, JSON file (native), LocalStorage (wasm32)

mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use crate::highscores::{HighScoreEntry, HighScores};

/// Persistence errors
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend not reachable (e.g. LocalStorage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to the persisted high-score table
pub trait ScoreStore {
    /// Stored table; empty when nothing (valid) is stored
    fn load(&self) -> HighScores;

    /// Replace the stored table
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;

    /// Merge one record into the stored table and persist it
    ///
    /// Returns the rank achieved, or None if the score fell off the table.
    fn record(&mut self, name: &str, score: u64) -> Result<Option<usize>, StoreError> {
        let mut scores = self.load();
        let rank = scores.add_score(name, score);
        self.save(&scores)?;
        match rank {
            Some(rank) => log::info!("Recorded {name}: {score} at rank {rank}"),
            None => log::info!("{name}: {score} did not make the table"),
        }
        Ok(rank)
    }
}

/// Parse stored JSON, treating anything malformed as an empty table
pub fn parse_scores(raw: &str) -> HighScores {
    match serde_json::from_str::<Vec<HighScoreEntry>>(raw) {
        Ok(entries) => HighScores::from_entries(entries),
        Err(e) => {
            log::warn!("Ignoring malformed high scores: {e}");
            HighScores::new()
        }
    }
}

/// Serialize a table to the stored JSON layout
pub fn encode_scores(scores: &HighScores) -> Result<String, StoreError> {
    Ok(serde_json::to_string(scores)?)
}

/// Store kept in memory as the JSON text a key-value backend would hold
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text (possibly malformed)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.raw.as_deref().map(parse_scores).unwrap_or_default()
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.raw = Some(encode_scores(scores)?);
        Ok(())
    }
}
