//! High score persistence

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access high score file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse high score file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode high score")]
    Encode(#[from] serde_json::Error),
}

/// Key-value store holding the best score across sessions
pub trait Store {
    /// Read the stored high score, 0 when nothing has been saved yet
    fn load_high_score(&self) -> Result<u32, StoreError>;
    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept as a small JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/tui-snake/high_score.json`, if the platform has a data dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tui-snake").join("high_score.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonFileStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No high score file at {:?}, starting from 0", self.path);
                return Ok(0);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record: HighScoreRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        log::info!("Loaded high score {} from {:?}", record.high_score, self.path);
        Ok(record.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, content).map_err(io_error)?;

        log::info!("Saved high score {} to {:?}", score, self.path);
        Ok(())
    }
}

/// Store that forgets everything when the process exits
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    high_score: Option<u32>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_high_score(score: u32) -> Self {
        Self {
            high_score: Some(score),
            saves: 0,
        }
    }

    pub fn high_score(&self) -> Option<u32> {
        self.high_score
    }
}

impl Store for MemoryStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(self.high_score.unwrap_or(0))
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = Some(score);
        self.saves += 1;
        Ok(())
    }
}
