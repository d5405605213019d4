//! Sound cues
//!
//! The terminal has one instrument: the bell.  Cues are fire-and-forget.

use std::io::Write;

use crate::entities::Cue;

pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Drops every cue.
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Rings the terminal bell on hits.  Fire cues are too frequent to be worth
/// a bell each and are only logged at trace level.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Hit => {
                // A lost bell is not worth interrupting the round for.
                if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                    log::debug!("bell failed: {}", e);
                }
            }
            Cue::Fire => log::trace!("fire"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_only_on_hits() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Cue::Fire);
        bell.play(Cue::Hit);
        bell.play(Cue::Hit);
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }
}
