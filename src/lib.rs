//! Pop-A-Mole — a terminal whac-a-mole arcade game
//!
//! Core modules:
//! - `entities`: pure data (round state, moles, projectiles, tuning constants)
//! - `compute`: pure per-frame logic (spawning, motion, collisions, timer)
//! - `round`: screen sequencing for a play session
//! - `controls`: key events → held actions and one-shot commands
//! - `leaderboard`: best score per nickname, persisted as JSON
//! - `nickname`: nickname validation and entry buffer
//! - `display`: crossterm rendering
//! - `audio`: sound cues
//! - `config`, `error`: ambient plumbing

pub mod audio;
pub mod compute;
pub mod config;
pub mod controls;
pub mod display;
pub mod entities;
pub mod error;
pub mod leaderboard;
pub mod nickname;
pub mod round;

pub use config::Config;
pub use error::GameError;
