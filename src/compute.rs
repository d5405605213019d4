//! Pure game-logic functions.
//!
//! Every public function takes an immutable view of the current round (and,
//! where needed, an RNG handle) and returns brand-new values.  Side effects
//! are limited to the injected RNG; audio is requested through `Cue`s left on
//! the returned state.
//!
//! Time is the round clock in milliseconds (`now`), frame length is `dt` in
//! seconds.  Collections keep insertion order, which is also the order used
//! for collision tie-breaks.

use glam::Vec2;
use rand::Rng;

use crate::entities::{
    ActionState, Arena, Cue, Player, PlayerColor, Projectile, RoundState, Schedule,
    ScheduledAction, Session, SessionStatus, Target, BASE_DURATION_SECS, FIRE_COOLDOWN_MS,
    INITIAL_SPAWN_INTERVAL_MS, PLAYER_COLLISION_SPEED, PLAYER_RADIUS, PLAYER_SPEED,
    PROJECTILE_SPEED, RAMP_INTERVAL_MS, RAMP_STEP_MS, TARGET_LIFETIME_MS, TARGET_SIZE, TEMPO_BPM,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Minimum spawn interval: one beat of the soundtrack, rounded to whole ms.
pub fn spawn_interval_floor(bpm: u32) -> u64 {
    (60_000.0 / f64::from(bpm)).round() as u64
}

/// Build the initial state for a fresh round.  Both recurring actions are
/// armed relative to round time 0.
pub fn init_round(arena: Arena) -> RoundState {
    RoundState {
        arena,
        player: Player {
            pos: Vec2::new(arena.width / 2.0, arena.height / 1.15),
            moving: false,
        },
        targets: Vec::new(),
        projectiles: Vec::new(),
        session: Session {
            score: 0,
            bonus_time: 0,
            start_time: None,
            spawn_interval: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_floor: spawn_interval_floor(TEMPO_BPM),
            last_shot_time: None,
            status: SessionStatus::NotStarted,
        },
        schedule: Schedule {
            next_spawn_at: INITIAL_SPAWN_INTERVAL_MS,
            next_ramp_at: RAMP_INTERVAL_MS,
        },
        cues: Vec::new(),
        now: 0,
    }
}

// ── Spawn scheduler ──────────────────────────────────────────────────────────

/// The earliest action due at or before `now`.  A spawn wins a tie with a
/// ramp.
pub fn next_due(schedule: &Schedule, now: u64) -> Option<(ScheduledAction, u64)> {
    let spawn = (schedule.next_spawn_at <= now).then_some(schedule.next_spawn_at);
    let ramp = (schedule.next_ramp_at <= now).then_some(schedule.next_ramp_at);
    match (spawn, ramp) {
        (Some(s), Some(r)) if r < s => Some((ScheduledAction::RampDifficulty, r)),
        (Some(s), _) => Some((ScheduledAction::SpawnTarget, s)),
        (None, Some(r)) => Some((ScheduledAction::RampDifficulty, r)),
        (None, None) => None,
    }
}

/// Place a mole uniformly in the top third, kept `TARGET_SIZE` away from the
/// arena edges.  Coordinates are whole units.
pub fn spawn_target(arena: &Arena, now: u64, rng: &mut impl Rng) -> Target {
    let x = rng.gen_range(TARGET_SIZE as i32..=(arena.width - TARGET_SIZE) as i32);
    let y = rng.gen_range(TARGET_SIZE as i32..=(arena.height / 3.0) as i32);
    Target {
        pos: Vec2::new(x as f32, y as f32),
        spawn_time: now,
    }
}

/// One ramp step: shorten the interval by `RAMP_STEP_MS`, never below the
/// floor.
pub fn ramp_interval(interval: u64, floor: u64) -> u64 {
    interval.saturating_sub(RAMP_STEP_MS).max(floor)
}

/// Dispatch every scheduled action due by `now`, oldest first.
///
/// A spawn stamps the mole with `now` and starts the countdown on the first
/// one.  A ramp that changes the interval re-arms the spawn action one new
/// interval after the ramp instant.
pub fn run_schedule(state: &RoundState, now: u64, rng: &mut impl Rng) -> RoundState {
    let mut targets = state.targets.clone();
    let mut session = state.session.clone();
    let mut schedule = state.schedule.clone();

    while let Some((action, at)) = next_due(&schedule, now) {
        match action {
            ScheduledAction::SpawnTarget => {
                targets.push(spawn_target(&state.arena, now, rng));
                if session.start_time.is_none() {
                    session.start_time = Some(now);
                    session.status = SessionStatus::Running;
                }
                schedule.next_spawn_at = at + session.spawn_interval;
            }
            ScheduledAction::RampDifficulty => {
                if session.spawn_interval > session.spawn_interval_floor {
                    session.spawn_interval =
                        ramp_interval(session.spawn_interval, session.spawn_interval_floor);
                    schedule.next_spawn_at = at + session.spawn_interval;
                }
                schedule.next_ramp_at = at + RAMP_INTERVAL_MS;
            }
        }
    }

    RoundState {
        targets,
        session,
        schedule,
        ..state.clone()
    }
}

// ── Entity expiry ────────────────────────────────────────────────────────────

/// Survivors of the lifetime check.  A mole aged exactly the lifetime stays.
pub fn expire_targets(targets: &[Target], now: u64) -> Vec<Target> {
    targets
        .iter()
        .filter(|t| now.saturating_sub(t.spawn_time) <= TARGET_LIFETIME_MS)
        .cloned()
        .collect()
}

// ── Input-driven transitions (pure) ─────────────────────────────────────────

/// Slide the player for one frame.  Left is checked before right; at an
/// edge the held direction pushes the player back inside instead.
pub fn move_player(player: &Player, input: &ActionState, dt: f32, arena: &Arena) -> Player {
    let mut pos = player.pos;
    let mut moving = false;

    if input.left {
        if pos.x > PLAYER_RADIUS {
            pos.x -= PLAYER_SPEED * dt;
            moving = true;
        } else {
            pos.x += PLAYER_COLLISION_SPEED * dt;
        }
    } else if input.right {
        if pos.x < arena.width - PLAYER_RADIUS {
            pos.x += PLAYER_SPEED * dt;
            moving = true;
        } else {
            pos.x -= PLAYER_COLLISION_SPEED * dt;
        }
    }

    Player { pos, moving }
}

/// Boundary contact beats movement, movement beats idle.
pub fn player_color(player: &Player, arena: &Arena) -> PlayerColor {
    if player.pos.x >= arena.width - PLAYER_RADIUS || player.pos.x <= PLAYER_RADIUS {
        PlayerColor::AtBoundary
    } else if player.moving {
        PlayerColor::Moving
    } else {
        PlayerColor::Neutral
    }
}

/// Whether the fire cooldown has elapsed.  The first shot of a round is
/// always allowed.
pub fn can_fire(last_shot_time: Option<u64>, now: u64) -> bool {
    match last_shot_time {
        None => true,
        Some(last) => now.saturating_sub(last) >= FIRE_COOLDOWN_MS,
    }
}

/// Fire a projectile from the player if the cooldown allows.  A refused
/// request is dropped, not queued.
pub fn player_shoot(state: &RoundState, now: u64) -> RoundState {
    if !can_fire(state.session.last_shot_time, now) {
        return state.clone();
    }
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile { pos: state.player.pos });
    let mut cues = state.cues.clone();
    cues.push(Cue::Fire);
    RoundState {
        projectiles,
        cues,
        session: Session {
            last_shot_time: Some(now),
            ..state.session.clone()
        },
        ..state.clone()
    }
}

// ── Motion & collision ───────────────────────────────────────────────────────

/// Result of one motion-and-collision pass.  Totals are left to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionOutcome {
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    /// One point per hit, so this is also the hit count.
    pub score_delta: u32,
    pub bonus_delta: u32,
}

/// Seconds granted for the hit that brought the score to `score`.
pub fn bonus_for(score: u32) -> u32 {
    if score % 10 == 0 {
        5
    } else if score % 5 == 0 {
        2
    } else {
        1
    }
}

/// Advance projectiles by `dt`, drop the ones past the top, then match each
/// remaining projectile against the first mole closer than `TARGET_SIZE`.
/// Both sides are visited in insertion order.  `score` is the round total
/// before this pass and feeds the cumulative bonus rule.
pub fn resolve_collisions(
    projectiles: &[Projectile],
    targets: &[Target],
    dt: f32,
    score: u32,
) -> CollisionOutcome {
    let moved: Vec<Projectile> = projectiles
        .iter()
        .map(|p| Projectile {
            pos: Vec2::new(p.pos.x, p.pos.y - PROJECTILE_SPEED * dt),
        })
        .filter(|p| p.pos.y >= 0.0)
        .collect();

    let mut hit_targets = vec![false; targets.len()];
    let mut survivors: Vec<Projectile> = Vec::with_capacity(moved.len());
    let mut score_delta = 0;
    let mut bonus_delta = 0;

    for projectile in moved {
        let struck = targets.iter().enumerate().position(|(ti, target)| {
            !hit_targets[ti] && projectile.pos.distance(target.pos) < TARGET_SIZE
        });
        match struck {
            Some(ti) => {
                hit_targets[ti] = true;
                score_delta += 1;
                bonus_delta += bonus_for(score + score_delta);
            }
            None => survivors.push(projectile),
        }
    }

    let targets = targets
        .iter()
        .zip(&hit_targets)
        .filter(|(_, hit)| !**hit)
        .map(|(t, _)| t.clone())
        .collect();

    CollisionOutcome {
        projectiles: survivors,
        targets,
        score_delta,
        bonus_delta,
    }
}

// ── Session timer ────────────────────────────────────────────────────────────

/// Seconds left on the clock.  Before the first spawn the full base duration
/// is shown.
pub fn remaining_secs(session: &Session, now: u64) -> u32 {
    match session.start_time {
        None => BASE_DURATION_SECS,
        Some(start) => {
            let elapsed = now.saturating_sub(start) / 1000;
            let budget = u64::from(BASE_DURATION_SECS + session.bonus_time);
            budget.saturating_sub(elapsed) as u32
        }
    }
}

/// Move a running session to `Ended` once its clock hits zero.
pub fn update_timer(session: &Session, now: u64) -> Session {
    let status = match session.status {
        SessionStatus::Running if remaining_secs(session, now) == 0 => SessionStatus::Ended,
        other => other,
    };
    Session {
        status,
        ..session.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the round by one frame at round time `now`, `dt` seconds after
/// the previous frame.  An ended round is returned unchanged.
pub fn tick(
    state: &RoundState,
    input: &ActionState,
    now: u64,
    dt: f32,
    rng: &mut impl Rng,
) -> RoundState {
    if state.session.status == SessionStatus::Ended {
        return state.clone();
    }

    // ── 1. Scheduled spawns and ramps ────────────────────────────────────────
    let mut next = run_schedule(state, now, rng);
    next.now = now;
    next.cues.clear();

    // ── 2. Expire stale moles ────────────────────────────────────────────────
    next.targets = expire_targets(&next.targets, now);

    // ── 3. Movement ──────────────────────────────────────────────────────────
    next.player = move_player(&next.player, input, dt, &next.arena);

    // ── 4. Fire ──────────────────────────────────────────────────────────────
    if input.fire {
        next = player_shoot(&next, now);
    }

    // ── 5. Projectiles ↔ moles ───────────────────────────────────────────────
    let outcome = resolve_collisions(&next.projectiles, &next.targets, dt, next.session.score);
    next.projectiles = outcome.projectiles;
    next.targets = outcome.targets;
    next.session.score += outcome.score_delta;
    next.session.bonus_time += outcome.bonus_delta;
    next.cues
        .extend(std::iter::repeat(Cue::Hit).take(outcome.score_delta as usize));

    // ── 6. Timer ─────────────────────────────────────────────────────────────
    next.session = update_timer(&next.session, now);

    next
}
