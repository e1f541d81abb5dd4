//! High score persistence
//!
//! A single integer, read once at startup and written only when a run ends
//! with a new best. Anything unreadable counts as zero.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure while writing the high score
#[derive(Debug)]
pub enum PersistenceError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::Json(err) => write!(f, "invalid JSON: {}", err),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Storage backend for the best score
pub trait HighScoreStore {
    /// Stored best, 0 when missing or invalid
    fn load(&mut self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Parse persisted text; missing or non-numeric content is zero
pub fn parse_high_score(text: &str) -> u64 {
    match text.trim().parse::<u64>() {
        Ok(score) => score,
        Err(_) => {
            if !text.trim().is_empty() {
                log::warn!("Ignoring invalid high score {:?}", text.trim());
            }
            0
        }
    }
}

/// High score kept as decimal text in a file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let score = parse_high_score(&text);
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Could not read {}: {}", self.path.display(), err);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, score.to_string()).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

/// In-memory store; records every save
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub stored: u64,
    pub saves: Vec<u64>,
}

impl MemoryHighScoreStore {
    pub fn new(stored: u64) -> Self {
        Self {
            stored,
            saves: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> u64 {
        self.stored
    }

    fn save(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.stored = score;
        self.saves.push(score);
        Ok(())
    }
}
