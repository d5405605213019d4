use pop_a_mole::round::*;

fn through_first_round(o: &mut Orchestrator) {
    o.advance(Signal::NicknameConfirmed("mole_1".into()));
    o.advance(Signal::ControlsConfirmed);
    o.advance(Signal::RoundFinished { score: 12 });
    o.advance(Signal::SummaryShown);
    o.advance(Signal::LeaderboardShown);
}

#[test]
fn starts_at_nickname_entry() {
    let o = Orchestrator::new();
    assert_eq!(o.screen, Screen::NicknameEntry);
    assert!(!o.is_terminated());
}

#[test]
fn first_run_shows_controls() {
    let mut o = Orchestrator::new();
    assert_eq!(o.advance(Signal::NicknameConfirmed("mole_1".into())), &Screen::Controls);
    assert_eq!(o.nickname.as_deref(), Some("mole_1"));
    assert_eq!(o.advance(Signal::ControlsConfirmed), &Screen::RoundActive);
}

#[test]
fn full_cycle_reaches_replay_decision() {
    let mut o = Orchestrator::new();
    through_first_round(&mut o);
    assert_eq!(o.screen, Screen::ReplayDecision);
    assert_eq!(o.last_score, Some(12));
    assert_eq!(o.rounds_played, 1);
}

#[test]
fn restart_skips_controls_and_keeps_nickname() {
    let mut o = Orchestrator::new();
    through_first_round(&mut o);
    assert_eq!(o.advance(Signal::Restart), &Screen::RoundActive);
    assert_eq!(o.nickname.as_deref(), Some("mole_1"));
}

#[test]
fn quit_is_honoured_from_every_screen() {
    let signals = [
        vec![],
        vec![Signal::NicknameConfirmed("abc".into())],
        vec![Signal::NicknameConfirmed("abc".into()), Signal::ControlsConfirmed],
        vec![
            Signal::NicknameConfirmed("abc".into()),
            Signal::ControlsConfirmed,
            Signal::RoundFinished { score: 0 },
        ],
        vec![
            Signal::NicknameConfirmed("abc".into()),
            Signal::ControlsConfirmed,
            Signal::RoundFinished { score: 0 },
            Signal::SummaryShown,
        ],
        vec![
            Signal::NicknameConfirmed("abc".into()),
            Signal::ControlsConfirmed,
            Signal::RoundFinished { score: 0 },
            Signal::SummaryShown,
            Signal::LeaderboardShown,
        ],
    ];
    for path in signals {
        let mut o = Orchestrator::new();
        for s in path {
            o.advance(s);
        }
        assert_eq!(o.advance(Signal::Quit), &Screen::Terminated);
        assert!(o.is_terminated());
    }
}

#[test]
fn terminated_is_final() {
    let mut o = Orchestrator::new();
    o.advance(Signal::Quit);
    assert_eq!(o.advance(Signal::Restart), &Screen::Terminated);
    assert_eq!(o.advance(Signal::NicknameConfirmed("abc".into())), &Screen::Terminated);
}

#[test]
fn out_of_place_signals_are_ignored() {
    let mut o = Orchestrator::new();
    assert_eq!(o.advance(Signal::Restart), &Screen::NicknameEntry);
    assert_eq!(o.advance(Signal::RoundFinished { score: 3 }), &Screen::NicknameEntry);
    assert_eq!(o.rounds_played, 0);
}
