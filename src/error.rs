//! Error types

use crate::config::ConfigError;
use crate::leaderboard::StoreError;

/// Top-level errors surfaced to `main`.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("score store error: {0}")]
    Store(#[from] StoreError),

    #[error("logger setup failed: {0}")]
    Logger(String),

    #[error("arena {width}x{height} is too small to spawn moles")]
    ArenaTooSmall { width: f32, height: f32 },
}
