use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError, encode_scores, parse_scores};
use crate::highscores::HighScores;

/// High scores in a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> HighScores {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let scores = parse_scores(&contents);
                log::info!(
                    "Loaded {} high scores from {}",
                    scores.len(),
                    self.path.display()
                );
                scores
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                HighScores::new()
            }
            Err(e) => {
                log::warn!("Failed to read {}: {e}", self.path.display());
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, encode_scores(scores)?)?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}
