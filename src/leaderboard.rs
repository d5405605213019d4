//! Best-score leaderboard keyed by nickname
//!
//! Persisted as a JSON table next to the player's home directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub high_score: u32,
}

/// Storage behind the leaderboard screen.
pub trait ScoreStore {
    /// Record `score` for `nickname`, keeping the larger of the stored and
    /// new value.
    fn save_score(&mut self, nickname: &str, score: u32) -> Result<(), StoreError>;

    /// Top `limit` rows, highest score first; ties ordered by nickname.
    fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry>;
}

/// In-memory best-score table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    scores: BTreeMap<String, u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Max-upsert.  Returns true when the stored value changed.
    pub fn record(&mut self, nickname: &str, score: u32) -> bool {
        match self.scores.get_mut(nickname) {
            Some(best) if *best >= score => false,
            Some(best) => {
                *best = score;
                true
            }
            None => {
                self.scores.insert(nickname.to_string(), score);
                true
            }
        }
    }

    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .scores
            .iter()
            .map(|(nickname, &high_score)| LeaderboardEntry {
                nickname: nickname.clone(),
                high_score,
            })
            .collect();
        // BTreeMap iteration is already nickname-ascending; a stable sort keeps
        // that as the tie-break.
        entries.sort_by(|a, b| b.high_score.cmp(&a.high_score));
        entries.truncate(limit);
        entries
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreStore for Leaderboard {
    fn save_score(&mut self, nickname: &str, score: u32) -> Result<(), StoreError> {
        self.record(nickname, score);
        Ok(())
    }

    fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.top(limit)
    }
}

/// Leaderboard mirrored to a JSON file after every save
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    board: Leaderboard,
    /// The file is behind the board since the last failed write.
    dirty: bool,
}

impl JsonScoreStore {
    /// Open the table at `path`.  A missing file is an empty board.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let board = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Leaderboard::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        log::info!("Loaded {} leaderboard entries from {}", board.len(), path.display());
        Ok(Self {
            path,
            board,
            dirty: false,
        })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.board).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for JsonScoreStore {
    /// The in-memory board is updated even when the write fails, so the
    /// current session still shows on the leaderboard screen.  Until a write
    /// succeeds, every save rewrites the file, whether or not its score
    /// changed the board.
    fn save_score(&mut self, nickname: &str, score: u32) -> Result<(), StoreError> {
        let changed = self.board.record(nickname, score);
        if !changed && !self.dirty {
            return Ok(());
        }
        if let Err(e) = self.flush() {
            self.dirty = true;
            return Err(e);
        }
        if self.dirty {
            log::info!("Score table {} written after earlier failure", self.path.display());
            self.dirty = false;
        }
        if changed {
            log::info!("New best for {}: {}", nickname, score);
        }
        Ok(())
    }

    fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.board.top(limit)
    }
}

/// Score store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unreadable score table {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
