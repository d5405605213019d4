//! Device input → logical actions.
//!
//! Terminals deliver key events, not key state, so "held" is derived: a key
//! counts as held if its last press/repeat event arrived within
//! `HOLD_WINDOW` frames.  Terminals that report releases (kitty protocol)
//! drop the key immediately instead.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::ActionState;

/// 8 frames @ 60 FPS ≈ 133 ms, shorter than the slowest OS repeat interval
/// so a held key stays live between repeats.
pub const HOLD_WINDOW: u64 = 8;

/// One-shot actions taken from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Confirm,
    Restart,
}

fn is_left(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A'))
}

fn is_right(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D'))
}

fn is_fire(code: &KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('e') | KeyCode::Char('E')
    )
}

/// Map a key press to a one-shot command.  Ctrl-C always quits.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Last frame each key was seen pressed or repeating.
#[derive(Debug, Default, Clone)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: &KeyEvent, frame: u64) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
            }
        }
    }

    fn any_held(&self, frame: u64, pred: fn(&KeyCode) -> bool) -> bool {
        self.key_frame
            .iter()
            .any(|(code, &last)| pred(code) && frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    pub fn actions(&self, frame: u64) -> ActionState {
        ActionState {
            left: self.any_held(frame, is_left),
            right: self.any_held(frame, is_right),
            fire: self.any_held(frame, is_fire),
        }
    }
}

// ── Modal screens ─────────────────────────────────────────────────────────────

/// Key presses and repeats; releases and non-key events are dropped.
pub fn key_press(ev: Event) -> Option<KeyEvent> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}

/// Block until one of `accepted` is pressed.  Quit always ends the wait.
pub fn wait_for_command(rx: &Receiver<Event>, accepted: &[Command]) -> Command {
    loop {
        let Ok(ev) = rx.recv() else {
            return Command::Quit;
        };
        if let Some(cmd) = key_press(ev).as_ref().and_then(command_for) {
            if cmd == Command::Quit || accepted.contains(&cmd) {
                return cmd;
            }
        }
    }
}

/// Keep the current screen up for `hold`.
///
/// Quit (or a closed channel) cuts the hold short.  A Restart pressed during
/// the hold does not, but it is returned so the caller can act on it once the
/// screen is done.
pub fn hold_screen(rx: &Receiver<Event>, hold: Duration) -> Option<Command> {
    let until = Instant::now() + hold;
    let mut held = None;
    loop {
        let remaining = until.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return held;
        }
        match rx.recv_timeout(remaining) {
            Ok(ev) => match key_press(ev).as_ref().and_then(command_for) {
                Some(Command::Quit) => return Some(Command::Quit),
                Some(Command::Restart) => held = Some(Command::Restart),
                _ => {}
            },
            Err(RecvTimeoutError::Timeout) => return held,
            Err(RecvTimeoutError::Disconnected) => return Some(Command::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn pressed_key_is_held_within_window() {
        let mut keys = KeyTracker::new();
        keys.observe(&press(KeyCode::Char('a')), 10);
        assert!(keys.actions(10 + HOLD_WINDOW).left);
        assert!(!keys.actions(11 + HOLD_WINDOW).left);
    }

    #[test]
    fn release_drops_key_immediately() {
        let mut keys = KeyTracker::new();
        keys.observe(&press(KeyCode::Right), 1);
        keys.observe(&release(KeyCode::Right), 2);
        assert!(!keys.actions(2).right);
    }

    #[test]
    fn fire_and_move_can_be_held_together() {
        let mut keys = KeyTracker::new();
        keys.observe(&press(KeyCode::Char(' ')), 5);
        keys.observe(&press(KeyCode::Left), 5);
        let a = keys.actions(6);
        assert!(a.fire && a.left && !a.right);
    }

    #[test]
    fn alternate_bindings_map_to_same_action() {
        let mut keys = KeyTracker::new();
        keys.observe(&press(KeyCode::Char('E')), 0);
        assert!(keys.actions(0).fire);

        let mut keys = KeyTracker::new();
        keys.observe(&press(KeyCode::Up), 0);
        assert!(keys.actions(0).fire);
    }

    #[test]
    fn commands_from_presses() {
        assert_eq!(command_for(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(&press(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(command_for(&press(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command_for(&press(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&release(KeyCode::Esc)), None);
    }

    const SHORT: Duration = Duration::from_millis(20);

    #[test]
    fn restart_during_hold_is_remembered() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(Event::Key(press(KeyCode::Char('r')))).unwrap();
        tx.send(Event::Key(press(KeyCode::Char('x')))).unwrap();
        assert_eq!(hold_screen(&rx, SHORT), Some(Command::Restart));
    }

    #[test]
    fn quit_during_hold_wins_over_restart() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(Event::Key(press(KeyCode::Char('R')))).unwrap();
        tx.send(Event::Key(press(KeyCode::Esc))).unwrap();
        assert_eq!(hold_screen(&rx, Duration::from_secs(5)), Some(Command::Quit));
    }

    #[test]
    fn quiet_hold_runs_out() {
        let (_tx, rx) = std::sync::mpsc::channel::<Event>();
        assert_eq!(hold_screen(&rx, SHORT), None);
    }

    #[test]
    fn closed_channel_ends_hold_as_quit() {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        drop(tx);
        assert_eq!(hold_screen(&rx, Duration::from_secs(5)), Some(Command::Quit));
    }

    #[test]
    fn wait_ignores_commands_not_accepted() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(Event::Key(press(KeyCode::Enter))).unwrap();
        tx.send(Event::Key(release(KeyCode::Char('r')))).unwrap();
        tx.send(Event::Key(press(KeyCode::Char('r')))).unwrap();
        assert_eq!(wait_for_command(&rx, &[Command::Restart]), Command::Restart);
    }
}
