//! Screen sequencing for a play session — pure state machine, no I/O.
//!
//! NicknameEntry → Controls (first run only) → RoundActive → RoundSummary
//! → LeaderboardDisplay → ReplayDecision → RoundActive | Terminated.
//! `Quit` is honoured from every screen.

/// What the player is currently looking at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    NicknameEntry,
    Controls,
    RoundActive,
    RoundSummary,
    LeaderboardDisplay,
    ReplayDecision,
    Terminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    NicknameConfirmed(String),
    ControlsConfirmed,
    RoundFinished { score: u32 },
    SummaryShown,
    LeaderboardShown,
    Restart,
    Quit,
}

/// Session-wide progress through the screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orchestrator {
    pub screen: Screen,
    pub nickname: Option<String>,
    /// Controls are shown once per process, not once per round.
    pub controls_shown: bool,
    pub rounds_played: u32,
    pub last_score: Option<u32>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            screen: Screen::NicknameEntry,
            nickname: None,
            controls_shown: false,
            rounds_played: 0,
            last_score: None,
        }
    }

    /// Apply `signal`.  Signals that make no sense on the current screen are
    /// ignored.
    pub fn advance(&mut self, signal: Signal) -> &Screen {
        let next = match (self.screen.clone(), signal) {
            (Screen::Terminated, _) => Screen::Terminated,
            (_, Signal::Quit) => Screen::Terminated,
            (Screen::NicknameEntry, Signal::NicknameConfirmed(name)) => {
                self.nickname = Some(name);
                self.start_or_controls()
            }
            (Screen::Controls, Signal::ControlsConfirmed) => Screen::RoundActive,
            (Screen::RoundActive, Signal::RoundFinished { score }) => {
                self.rounds_played += 1;
                self.last_score = Some(score);
                Screen::RoundSummary
            }
            (Screen::RoundSummary, Signal::SummaryShown) => Screen::LeaderboardDisplay,
            (Screen::LeaderboardDisplay, Signal::LeaderboardShown) => Screen::ReplayDecision,
            (Screen::ReplayDecision, Signal::Restart) => self.start_or_controls(),
            (current, _) => current,
        };
        self.screen = next;
        &self.screen
    }

    fn start_or_controls(&mut self) -> Screen {
        if self.controls_shown {
            Screen::RoundActive
        } else {
            self.controls_shown = true;
            Screen::Controls
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.screen == Screen::Terminated
    }
}
