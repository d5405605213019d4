use pop_a_mole::compute::init_round;
use pop_a_mole::entities::*;
use pop_a_mole::GameError;

use glam::Vec2;

#[test]
fn arena_accepts_default_dimensions() {
    let arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT).unwrap();
    assert_eq!(arena, Arena::default());
}

#[test]
fn arena_rejects_too_narrow() {
    // Exactly 2 × TARGET_SIZE leaves no room between the spawn margins.
    let err = Arena::new(2.0 * TARGET_SIZE, 720.0).unwrap_err();
    assert!(matches!(err, GameError::ArenaTooSmall { .. }));
}

#[test]
fn arena_rejects_too_short() {
    let err = Arena::new(1280.0, 3.0 * TARGET_SIZE - 1.0).unwrap_err();
    assert!(matches!(err, GameError::ArenaTooSmall { .. }));
    assert!(Arena::new(1280.0, 3.0 * TARGET_SIZE).is_ok());
}

#[test]
fn enums_compare() {
    assert_eq!(SessionStatus::Running, SessionStatus::Running);
    assert_ne!(SessionStatus::NotStarted, SessionStatus::Ended);
    assert_ne!(Cue::Fire, Cue::Hit);
    assert_ne!(PlayerColor::Moving, PlayerColor::AtBoundary);
    assert_ne!(ScheduledAction::SpawnTarget, ScheduledAction::RampDifficulty);
}

#[test]
fn round_state_clone_is_independent() {
    let original = init_round(Arena::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.pos.x = 99.0;
    cloned.session.score = 999;
    cloned.targets.push(Target { pos: Vec2::new(5.0, 5.0), spawn_time: 0 });

    assert_eq!(original.player.pos.x, 640.0);
    assert_eq!(original.session.score, 0);
    assert!(original.targets.is_empty());
}
