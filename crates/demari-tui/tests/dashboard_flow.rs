// End-to-end dashboard tests: key presses through `handle_key`, updates
// through `apply_ui_update`, and the rendered screen through `TestBackend`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use demari_app::protocol::{SessionSnapshot, UiUpdate, UserCommand};
use demari_app::session::SessionMode;
use demari_core::bet::{Bet, DrawResult, NumberFrequency};
use demari_core::validator::DuplicateCheck;
use demari_tui::tui::{apply_ui_update, input::handle_key, render_frame, ViewState};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn type_str(state: &mut ViewState, text: &str) {
    for c in text.chars() {
        handle_key(key(KeyCode::Char(c)), state);
    }
}

fn snapshot(mode: SessionMode, bets: Vec<Bet>, draw: Option<DrawResult>) -> UiUpdate {
    UiUpdate::Snapshot(Box::new(SessionSnapshot {
        mode,
        valid_bets: bets,
        draw,
        acknowledged_bet: None,
        loading: mode == SessionMode::Drawing,
    }))
}

fn screen(state: &ViewState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| render_frame(frame, state)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn register_bet_then_draw() {
    let mut state = ViewState::new(DuplicateCheck::LastEdit);

    // Fill the form and submit.
    handle_key(key(KeyCode::Char('n')), &mut state);
    type_str(&mut state, "Carla");
    handle_key(key(KeyCode::Tab), &mut state);
    type_str(&mut state, "111.222.333-44");
    for n in ["7", "14", "21", "28", "35"] {
        handle_key(key(KeyCode::Tab), &mut state);
        type_str(&mut state, n);
    }
    let bet = match handle_key(key(KeyCode::Enter), &mut state) {
        Some(UserCommand::SubmitBet(bet)) => bet,
        other => panic!("expected SubmitBet, got {other:?}"),
    };
    assert_eq!(bet.tax_id, "111.222.333-44");
    assert_eq!(bet.numbers, vec![7, 14, 21, 28, 35]);

    // Backend registers it.
    let bet = bet.with_id(77);
    apply_ui_update(&mut state, UiUpdate::BetSubmitted(bet.clone()));
    let mut update = snapshot(SessionMode::Intake, vec![bet.clone()], None);
    if let UiUpdate::Snapshot(s) = &mut update {
        s.acknowledged_bet = Some(77);
    }
    apply_ui_update(&mut state, update);
    assert!(state.form.is_none());
    let text = screen(&state);
    assert!(text.contains("Carla"));
    assert!(text.contains("Bet #77 registered"));

    // Two presses to draw.
    assert_eq!(
        handle_key(key(KeyCode::Char('d')), &mut state),
        Some(UserCommand::PressDraw)
    );
    apply_ui_update(&mut state, snapshot(SessionMode::Confirming, vec![bet.clone()], None));
    assert!(screen(&state).contains("Draw now over 1 bet?"));
    assert_eq!(
        handle_key(key(KeyCode::Char('d')), &mut state),
        Some(UserCommand::PressDraw)
    );
    apply_ui_update(&mut state, snapshot(SessionMode::Drawing, Vec::new(), None));
    assert!(screen(&state).contains("Loading"));
    assert!(handle_key(key(KeyCode::Char('d')), &mut state).is_none());

    // Results, then back to intake.
    let draw = DrawResult {
        drawn_numbers: vec![7, 14, 21, 28, 35],
        winners: vec![bet],
        number_frequency: vec![NumberFrequency { number: 7, count: 1 }],
    };
    apply_ui_update(&mut state, snapshot(SessionMode::Results, Vec::new(), Some(draw)));
    let text = screen(&state);
    assert!(text.contains("07 14 21 28 35"));
    assert!(text.contains("Winners (1)"));
    assert_eq!(
        handle_key(key(KeyCode::Enter), &mut state),
        Some(UserCommand::ReturnToIntake)
    );
}

#[test]
fn failed_submission_allows_retry() {
    let mut state = ViewState::new(DuplicateCheck::LastEdit);
    handle_key(key(KeyCode::Char('n')), &mut state);
    type_str(&mut state, "Davi");
    handle_key(key(KeyCode::Tab), &mut state);
    type_str(&mut state, "55566677788");
    handle_key(key(KeyCode::Char(' ')), &mut state);

    assert!(matches!(
        handle_key(key(KeyCode::Enter), &mut state),
        Some(UserCommand::SubmitBet(_))
    ));
    apply_ui_update(&mut state, UiUpdate::BetSubmissionFailed);

    let form = state.form.as_ref().expect("form stays open");
    assert_eq!(form.draft.bettor_name(), "Davi");
    assert!(matches!(
        handle_key(key(KeyCode::Enter), &mut state),
        Some(UserCommand::SubmitBet(bet)) if bet.is_surprise
    ));
}

#[test]
fn strict_duplicate_rule_reaches_new_forms() {
    let mut state = ViewState::new(DuplicateCheck::Strict);
    handle_key(key(KeyCode::Char('n')), &mut state);
    let form = state.form.as_ref().unwrap();
    assert_eq!(form.draft.duplicate_check(), DuplicateCheck::Strict);
}
