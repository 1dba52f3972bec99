// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the session snapshot pushed by the
// app orchestrator, plus purely local state (the bet form, the quit dialog).
// Updates arrive over an mpsc channel; the screen re-renders at ~30 fps.

pub mod form;
pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use demari_app::protocol::{SessionSnapshot, UiUpdate, UserCommand};
use demari_app::session::SessionMode;
use demari_core::bet::{Bet, BetId, DrawResult};
use demari_core::validator::DuplicateCheck;
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use form::BetForm;
use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the session for rendering.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub mode: SessionMode,
    pub valid_bets: Vec<Bet>,
    pub draw: Option<DrawResult>,
    /// Bet whose "registered" message is showing.
    pub acknowledged_bet: Option<BetId>,
    pub loading: bool,
    /// Open bet form, if any.
    pub form: Option<BetForm>,
    /// Duplicate rule new forms start with.
    pub duplicate_check: DuplicateCheck,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn new(duplicate_check: DuplicateCheck) -> Self {
        ViewState {
            duplicate_check,
            ..ViewState::default()
        }
    }

    /// Replace the mirrored session fields. Local state is left unchanged.
    pub fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.mode = snapshot.mode;
        self.valid_bets = snapshot.valid_bets;
        self.draw = snapshot.draw;
        self.acknowledged_bet = snapshot.acknowledged_bet;
        self.loading = snapshot.loading;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::BetSubmitted(bet) => {
            debug!("Closing bet form after bet {} was registered", bet.id);
            state.form = None;
        }
        UiUpdate::BetSubmissionFailed => {
            if let Some(form) = state.form.as_mut() {
                form.submitting = false;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::banner::render(frame, layout.banner, state);
    match state.mode {
        SessionMode::Intake | SessionMode::Confirming => {
            widgets::bets_table::render(frame, layout.main_panel, &state.valid_bets)
        }
        SessionMode::Drawing => widgets::results::render_loading(frame, layout.main_panel),
        SessionMode::Results => {
            widgets::results::render(frame, layout.main_panel, state.draw.as_ref())
        }
    }
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.mode == SessionMode::Confirming {
        widgets::draw_confirm::render(frame, frame.area(), state.valid_bets.len());
    }
    if let Some(form) = &state.form {
        widgets::bet_form::render(frame, frame.area(), form);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop over UI updates, keyboard input and render
///    ticks until the user quits or the app closes the update channel.
/// 4. Restores the terminal.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    duplicate_check: DuplicateCheck,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(duplicate_check);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App is shutting down
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
