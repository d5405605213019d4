use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use pop_a_mole::audio::{CuePlayer, Silent, TerminalBell};
use pop_a_mole::compute::{init_round, tick};
use pop_a_mole::controls::{
    command_for, hold_screen, key_press, wait_for_command, Command, KeyTracker,
};
use pop_a_mole::display::{self, Viewport};
use pop_a_mole::entities::{Arena, SessionStatus, ARENA_HEIGHT, ARENA_WIDTH, LEADERBOARD_LIMIT};
use pop_a_mole::leaderboard::{JsonScoreStore, Leaderboard, ScoreStore};
use pop_a_mole::nickname::NicknameBuffer;
use pop_a_mole::round::{Orchestrator, Screen, Signal};
use pop_a_mole::{Config, GameError};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// How long the end-of-round score stays up before the leaderboard.
const SUMMARY_HOLD: Duration = Duration::from_millis(1500);
/// How long the leaderboard stays up.  R pressed meanwhile restarts once it ends.
const LEADERBOARD_HOLD: Duration = Duration::from_millis(4000);

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log records go to a file.
fn init_logging(path: &Path) -> Result<(), GameError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| GameError::Logger(e.to_string()))
}

// ── Score store ───────────────────────────────────────────────────────────────

/// An unreadable score file never blocks play: the session falls back to a
/// board that lives only in memory.
fn open_store(config: &Config) -> Box<dyn ScoreStore> {
    match JsonScoreStore::open(&config.scores_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Leaderboard unavailable, keeping scores in memory: {}", e);
            Box::new(Leaderboard::new())
        }
    }
}

// ── Modal screens ─────────────────────────────────────────────────────────────

fn viewport() -> std::io::Result<Viewport> {
    let (width, height) = terminal::size()?;
    Ok(Viewport::new(width, height))
}

/// Returns the confirmed nickname, or `None` if the player quit.
fn nickname_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<String>> {
    let mut buffer = NicknameBuffer::new();
    loop {
        display::render_nickname_prompt(out, buffer.as_str(), buffer.is_valid(), viewport()?)?;

        let Ok(ev) = rx.recv() else {
            return Ok(None);
        };
        let Some(key) = key_press(ev) else {
            continue;
        };
        match (command_for(&key), key.code) {
            (Some(Command::Quit), _) => return Ok(None),
            (Some(Command::Confirm), _) => {
                if let Some(name) = buffer.confirm() {
                    return Ok(Some(name));
                }
            }
            (_, KeyCode::Backspace) => buffer.backspace(),
            (_, KeyCode::Char(c)) => buffer.push(c),
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum RoundExit {
    Finished(u32),
    Quit,
}

/// Play one round to the end of its clock.
///
/// Input model: key events only refresh a `KeyTracker`; each frame reads the
/// set of keys still considered held and applies them together, so fire and
/// a direction can be held at the same time.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    arena: Arena,
    cues: &mut dyn CuePlayer,
) -> std::io::Result<RoundExit> {
    let mut rng = thread_rng();
    let mut state = init_round(arena);
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    let round_start = Instant::now();
    let mut last_frame: Option<Instant> = None;

    log::info!("Round started");

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if command_for(&key) == Some(Command::Quit) {
                    log::info!("Quit during round at score {}", state.session.score);
                    return Ok(RoundExit::Quit);
                }
                keys.observe(&key, frame);
            }
        }

        // First frame of a round moves nothing.
        let dt = last_frame
            .map(|t| frame_start.duration_since(t).as_secs_f32())
            .unwrap_or(0.0);
        last_frame = Some(frame_start);
        let now = round_start.elapsed().as_millis() as u64;

        state = tick(&state, &keys.actions(frame), now, dt, &mut rng);
        for &cue in &state.cues {
            cues.play(cue);
        }

        if state.session.status == SessionStatus::Ended {
            log::info!(
                "Round ended: score {}, bonus {}s",
                state.session.score,
                state.session.bonus_time
            );
            return Ok(RoundExit::Finished(state.session.score));
        }

        display::render_round(out, &state, viewport()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = Config::from_env()?;
    if let Err(e) = init_logging(&config.log_path) {
        eprintln!("logging disabled: {}", e);
    }
    log::info!("Pop-A-Mole starting with {:?}", config);

    let arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, arena);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Exiting on error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    arena: Arena,
) -> Result<(), GameError> {
    let mut store = open_store(config);
    let mut cues: Box<dyn CuePlayer> = if config.sound {
        Box::new(TerminalBell::new(stdout()))
    } else {
        Box::new(Silent)
    };
    let mut orchestrator = Orchestrator::new();
    let mut queued_restart = false;

    while !orchestrator.is_terminated() {
        let signal = match orchestrator.screen.clone() {
            Screen::NicknameEntry => match nickname_screen(out, rx)? {
                Some(name) => {
                    log::info!("Player {} joined", name);
                    Signal::NicknameConfirmed(name)
                }
                None => Signal::Quit,
            },
            Screen::Controls => {
                display::render_controls(out, viewport()?)?;
                match wait_for_command(rx, &[Command::Confirm]) {
                    Command::Quit => Signal::Quit,
                    _ => Signal::ControlsConfirmed,
                }
            }
            Screen::RoundActive => match game_loop(out, rx, arena, cues.as_mut())? {
                RoundExit::Finished(score) => Signal::RoundFinished { score },
                RoundExit::Quit => Signal::Quit,
            },
            Screen::RoundSummary => {
                let nickname = orchestrator.nickname.clone().unwrap_or_default();
                let score = orchestrator.last_score.unwrap_or(0);
                display::render_summary(out, &nickname, score, viewport()?)?;
                if let Err(e) = store.save_score(&nickname, score) {
                    log::warn!("Could not save score for {}: {}", nickname, e);
                }
                match hold_screen(rx, SUMMARY_HOLD) {
                    Some(Command::Quit) => Signal::Quit,
                    held => {
                        queued_restart |= held == Some(Command::Restart);
                        Signal::SummaryShown
                    }
                }
            }
            Screen::LeaderboardDisplay => {
                let entries = store.leaderboard(LEADERBOARD_LIMIT);
                display::render_leaderboard(out, &entries, viewport()?)?;
                match hold_screen(rx, LEADERBOARD_HOLD) {
                    Some(Command::Quit) => Signal::Quit,
                    held => {
                        queued_restart |= held == Some(Command::Restart);
                        Signal::LeaderboardShown
                    }
                }
            }
            // R pressed while the summary or leaderboard was held counts here.
            Screen::ReplayDecision if queued_restart => {
                queued_restart = false;
                Signal::Restart
            }
            Screen::ReplayDecision => match wait_for_command(rx, &[Command::Restart]) {
                Command::Restart => Signal::Restart,
                _ => Signal::Quit,
            },
            Screen::Terminated => Signal::Quit,
        };
        orchestrator.advance(signal);
    }

    log::info!("Quit after {} round(s)", orchestrator.rounds_played);
    Ok(())
}
