//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! round (or of a modal screen's data).  No game logic is performed; this
//! module only translates state into terminal commands, scaling the logical
//! arena onto whatever grid the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;

use crate::compute::{player_color, remaining_secs};
use crate::entities::{Arena, PlayerColor, RoundState, SessionStatus};
use crate::leaderboard::LeaderboardEntry;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_MOLE: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_INPUT_OK: Color = Color::Green;
const C_INPUT_BAD: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn player_colour(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Neutral => Color::Cyan,
        PlayerColor::Moving => Color::Green,
        PlayerColor::AtBoundary => Color::Red,
    }
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Terminal grid the arena is drawn into: inside the border, below the HUD,
/// above the hint row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    fn play_cols(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }

    fn play_rows(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }

    /// Cell for a logical position, clamped inside the play area.
    pub fn cell(&self, arena: &Arena, pos: Vec2) -> (u16, u16) {
        let fx = (pos.x / arena.width).clamp(0.0, 1.0);
        let fy = (pos.y / arena.height).clamp(0.0, 1.0);
        let col = 1 + ((fx * f32::from(self.play_cols() - 1)).round() as u16);
        let row = 2 + ((fy * f32::from(self.play_rows() - 1)).round() as u16);
        (col, row)
    }
}

fn centered<W: Write>(out: &mut W, vp: Viewport, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (vp.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn finish<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.height.saturating_sub(1)))?;
    out.flush()
}

// ── Round frame ───────────────────────────────────────────────────────────────

/// Render one complete frame of an active round.
pub fn render_round<W: Write>(out: &mut W, state: &RoundState, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, vp)?;
    draw_hud(out, state, vp)?;

    for target in &state.targets {
        let (col, row) = vp.cell(&state.arena, target.pos);
        out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
        out.queue(style::SetForegroundColor(C_MOLE))?;
        out.queue(Print("(●)"))?;
    }
    for projectile in &state.projectiles {
        let (col, row) = vp.cell(&state.arena, projectile.pos);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print("∙"))?;
    }

    let (col, row) = vp.cell(&state.arena, state.player.pos);
    out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
    out.queue(style::SetForegroundColor(player_colour(player_color(&state.player, &state.arena))))?;
    out.queue(Print("◖█◗"))?;

    out.queue(cursor::MoveTo(1, vp.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   E / ↑ / SPACE : Shoot   ESC : Quit"))?;

    finish(out, vp)
}

fn draw_border<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let w = vp.width as usize;
    let h = vp.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Score and clock appear only once the first mole is up.
fn draw_hud<W: Write>(out: &mut W, state: &RoundState, vp: Viewport) -> std::io::Result<()> {
    let time_left = remaining_secs(&state.session, state.now);
    if state.session.status == SessionStatus::NotStarted || time_left == 0 {
        return Ok(());
    }

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.session.score)))?;

    let time_text = format!("Time: {}s", time_left);
    let rx = vp.width.saturating_sub(time_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_text))?;

    Ok(())
}

// ── Modal screens ─────────────────────────────────────────────────────────────

pub fn render_nickname_prompt<W: Write>(
    out: &mut W,
    typed: &str,
    valid: bool,
    vp: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let cy = vp.height / 2;
    centered(out, vp, cy.saturating_sub(2), "Enter your nickname:", C_TEXT)?;
    centered(out, vp, cy, typed, if valid { C_INPUT_OK } else { C_INPUT_BAD })?;
    centered(
        out,
        vp,
        cy + 2,
        "3-12 letters, digits or _   ENTER : Confirm   ESC : Quit",
        C_HINT,
    )?;
    finish(out, vp)
}

pub fn render_controls<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let lines = [
        "Controls:",
        "Move Left: A or Left Arrow",
        "Move Right: D or Right Arrow",
        "Shoot: E, Up Arrow, or Space",
        "Quit: ESC",
        "",
        "Press ENTER to Start",
    ];
    let top = (vp.height / 2).saturating_sub(lines.len() as u16 / 2 + 2);
    centered(out, vp, top, "★  POP-A-MOLE  ★", Color::Cyan)?;
    for (i, line) in lines.iter().enumerate() {
        centered(out, vp, top + 2 + i as u16, line, C_TEXT)?;
    }
    finish(out, vp)
}

const REPLAY_PROMPT: &str = "Press R to play again or ESC to quit";

pub fn render_summary<W: Write>(
    out: &mut W,
    nickname: &str,
    score: u32,
    vp: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let cy = vp.height / 2;
    centered(out, vp, cy.saturating_sub(1), "Time's up!", C_TEXT)?;
    centered(out, vp, cy + 1, &format!("Final Score: {}", score), C_HUD_SCORE)?;
    centered(out, vp, cy + 3, nickname, C_HINT)?;
    centered(out, vp, cy + 5, REPLAY_PROMPT, C_HINT)?;
    finish(out, vp)
}

/// Ranked rows as shown on the leaderboard screen.
pub fn leaderboard_lines(entries: &[LeaderboardEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}: {}", i + 1, e.nickname, e.high_score))
        .collect()
}

pub fn render_leaderboard<W: Write>(
    out: &mut W,
    entries: &[LeaderboardEntry],
    vp: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let top = (vp.height / 2).saturating_sub(entries.len() as u16 / 2 + 2);
    centered(out, vp, top, "Top Scores", Color::Cyan)?;
    for (i, line) in leaderboard_lines(entries).iter().enumerate() {
        centered(out, vp, top + 2 + i as u16, line, C_TEXT)?;
    }
    centered(
        out,
        vp,
        top + 3 + entries.len() as u16,
        REPLAY_PROMPT,
        C_HINT,
    )?;
    finish(out, vp)
}
