use web_sys::Storage;

use super::{ScoreStore, StoreError, encode_scores, parse_scores};
use crate::highscores::HighScores;

/// High scores in browser LocalStorage
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "astro_drift_highscores";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> HighScores {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let scores = parse_scores(&json);
                log::info!("Loaded {} high scores", scores.len());
                return scores;
            }
        }

        log::info!("No high scores found, starting fresh");
        HighScores::new()
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not available".into()))?;
        let json = encode_scores(scores)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}
