// Application state and orchestration logic.
//
// The central event loop coordinating user commands from the TUI, completions
// of backend requests, and the acknowledgement timer. Every session
// transition happens on this loop, one event at a time; backend requests run
// as spawned tasks and report back through `ApiEvent`s.

use std::sync::Arc;

use demari_core::bet::NewBet;
use demari_core::config::Config;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::BetsApi;
use crate::protocol::{ApiEvent, UiUpdate, UserCommand};
use crate::session::{DrawPress, Session, SessionMode};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub session: Session,
    /// Backend client shared with spawned request tasks.
    pub api: Arc<dyn BetsApi>,
    /// Sender spawned request tasks use to report back to the event loop.
    pub api_tx: mpsc::Sender<ApiEvent>,
}

impl AppState {
    pub fn new(config: &Config, api: Arc<dyn BetsApi>, api_tx: mpsc::Sender<ApiEvent>) -> Self {
        AppState {
            session: Session::new(config.session.acknowledgement_window()),
            api,
            api_tx,
        }
    }

    /// Fetch the valid bets list in the background.
    pub fn request_bets(&self) {
        info!("Requesting valid bets");
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let event = match api.list_bets().await {
                Ok(bets) => ApiEvent::BetsLoaded(bets),
                Err(e) => {
                    warn!("Failed to fetch valid bets: {}", e);
                    ApiEvent::BetsLoadFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Submit a bet in the background.
    pub fn submit_bet(&self, bet: NewBet) {
        info!(
            "Submitting bet for {} (surprise: {})",
            bet.bettor_name, bet.is_surprise
        );
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let event = match api.create_bet(&bet).await {
                Ok(id) => ApiEvent::BetCreated(bet.with_id(id)),
                Err(e) => {
                    warn!("Failed to register bet: {}", e);
                    ApiEvent::BetCreateFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Run the draw in the background.
    pub fn request_draw(&self) {
        info!("Requesting number draw");
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let event = match api.draw_numbers().await {
                Ok(result) => ApiEvent::DrawCompleted(result),
                Err(e) => {
                    warn!("Number draw failed: {}", e);
                    ApiEvent::DrawFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event).await;
        });
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until the user quits or the command
/// channel closes.
///
/// Fetches the bet list once on start-up and pushes a fresh snapshot through
/// `ui_tx` after every transition.
pub async fn run(
    mut api_rx: mpsc::Receiver<ApiEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    state.request_bets();
    send_snapshot(&state, &ui_tx).await;

    loop {
        let ack_deadline = state.session.acknowledgement().map(|a| a.expires_at);

        tokio::select! {
            // --- Backend request completions ---
            Some(event) = api_rx.recv() => {
                handle_api_event(&mut state, event, &ui_tx).await;
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Acknowledgement expiry ---
            _ = tokio::time::sleep_until(ack_deadline.unwrap_or_else(Instant::now)), if ack_deadline.is_some() => {
                if state.session.expire_acknowledgement(Instant::now()) {
                    debug!("Bet acknowledgement cleared");
                    send_snapshot(&state, &ui_tx).await;
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.session.snapshot();
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}

/// Apply a backend request outcome to the session.
async fn handle_api_event(state: &mut AppState, event: ApiEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
    match event {
        ApiEvent::BetsLoaded(bets) => {
            if state.session.bets_loaded(bets) {
                send_snapshot(state, ui_tx).await;
            }
        }
        ApiEvent::BetsLoadFailed { message } => {
            debug!("Keeping current bet list after fetch failure: {}", message);
        }
        ApiEvent::BetCreated(bet) => {
            state.session.bet_created(bet.clone(), Instant::now());
            let _ = ui_tx.send(UiUpdate::BetSubmitted(bet)).await;
            send_snapshot(state, ui_tx).await;
        }
        ApiEvent::BetCreateFailed { message } => {
            debug!("Bet submission failed: {}", message);
            let _ = ui_tx.send(UiUpdate::BetSubmissionFailed).await;
        }
        ApiEvent::DrawCompleted(result) => {
            if state.session.draw_completed(result) {
                send_snapshot(state, ui_tx).await;
            }
        }
        ApiEvent::DrawFailed { message } => {
            debug!("Showing empty results after draw failure: {}", message);
            if state.session.draw_failed() {
                send_snapshot(state, ui_tx).await;
            }
        }
    }
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::RefreshBets => {
            if state.session.mode() == SessionMode::Intake {
                state.request_bets();
            } else {
                debug!("Ignoring bet refresh outside of intake");
            }
        }
        UserCommand::SubmitBet(bet) => {
            if state.session.mode() == SessionMode::Intake {
                state.submit_bet(bet);
            } else {
                debug!("Ignoring bet submission outside of intake");
                let _ = ui_tx.send(UiUpdate::BetSubmissionFailed).await;
            }
        }
        UserCommand::PressDraw => match state.session.press_draw() {
            DrawPress::AwaitingConfirmation => send_snapshot(state, ui_tx).await,
            DrawPress::Dispatch => {
                state.request_draw();
                send_snapshot(state, ui_tx).await;
            }
            DrawPress::Ignored => {
                debug!("Draw press ignored in {:?}", state.session.mode());
            }
        },
        UserCommand::CancelDraw => {
            if state.session.cancel_draw() {
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::ReturnToIntake => {
            if state.session.return_to_intake() {
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}
