//! All game entity types — pure data, no logic.

use glam::Vec2;

use crate::error::GameError;

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Logical arena size.  The renderer scales this onto the terminal grid.
pub const ARENA_WIDTH: f32 = 1280.0;
pub const ARENA_HEIGHT: f32 = 720.0;

pub const PLAYER_RADIUS: f32 = 30.0;
/// Units per second while a direction is held.
pub const PLAYER_SPEED: f32 = 1000.0;
/// Units per second of the push-back applied at an arena edge.
pub const PLAYER_COLLISION_SPEED: f32 = 2000.0;

/// Units per second, upward.
pub const PROJECTILE_SPEED: f32 = 750.0;
/// Hit radius of a mole, also the margin kept from the arena edges on spawn.
pub const TARGET_SIZE: f32 = 40.0;
pub const TARGET_LIFETIME_MS: u64 = 2000;

pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 2000;
pub const RAMP_INTERVAL_MS: u64 = 3000;
pub const RAMP_STEP_MS: u64 = 200;
/// Tempo of the soundtrack; the spawn interval never drops below one beat.
pub const TEMPO_BPM: u32 = 123;

pub const BASE_DURATION_SECS: u32 = 30;
pub const FIRE_COOLDOWN_MS: u64 = 300;

/// Number of rows shown on the leaderboard screen.
pub const LEADERBOARD_LIMIT: usize = 5;

// ── Arena ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Spawn bounds need room for `TARGET_SIZE` on both horizontal sides and
    /// a non-empty band in the top third.
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        if width <= 2.0 * TARGET_SIZE || height / 3.0 < TARGET_SIZE {
            return Err(GameError::ArenaTooSmall { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

// ── Moles & projectiles ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    /// Round clock (ms) at which the mole appeared.
    pub spawn_time: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub moving: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerColor {
    Neutral,
    Moving,
    AtBoundary,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// No mole has spawned yet; the countdown is frozen.
    NotStarted,
    Running,
    Ended,
}

/// Next due instants of the two recurring round actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub next_spawn_at: u64,
    pub next_ramp_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledAction {
    SpawnTarget,
    RampDifficulty,
}

/// Fire-and-forget audio triggers raised by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Fire,
    Hit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub score: u32,
    /// Seconds of extra play earned from hits.
    pub bonus_time: u32,
    /// Set by the first mole spawn, never reset within a round.
    pub start_time: Option<u64>,
    pub spawn_interval: u64,
    pub spawn_interval_floor: u64,
    pub last_shot_time: Option<u64>,
    pub status: SessionStatus,
}

// ── Master round state ────────────────────────────────────────────────────────

/// Everything one round owns.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub arena: Arena,
    pub player: Player,
    pub targets: Vec<Target>,
    pub projectiles: Vec<Projectile>,
    pub session: Session,
    pub schedule: Schedule,
    /// Cues raised during the most recent tick.
    pub cues: Vec<Cue>,
    /// Round clock (ms) of the most recent tick.
    pub now: u64,
}

/// Logical actions held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}
