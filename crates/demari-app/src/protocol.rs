// Message types passed between the TUI, the app orchestrator, and the
// spawned backend requests.

use demari_core::bet::{Bet, BetId, DrawResult, NewBet};

use crate::session::SessionMode;

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Re-fetch the valid bets list (intake only).
    RefreshBets,
    /// Submit a bet that passed local validation.
    SubmitBet(NewBet),
    /// Draw button: first press asks for confirmation, second press draws.
    PressDraw,
    /// Back out of a pending draw confirmation.
    CancelDraw,
    /// Leave the results view.
    ReturnToIntake,
    Quit,
}

/// Outcomes of backend requests, reported back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    BetsLoaded(Vec<Bet>),
    BetsLoadFailed { message: String },
    BetCreated(Bet),
    BetCreateFailed { message: String },
    DrawCompleted(DrawResult),
    DrawFailed { message: String },
}

/// Everything the TUI needs to render the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub mode: SessionMode,
    pub valid_bets: Vec<Bet>,
    pub draw: Option<DrawResult>,
    /// Id of the bet whose "registered" message is currently showing.
    pub acknowledged_bet: Option<BetId>,
    pub loading: bool,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Snapshot(Box<SessionSnapshot>),
    /// The submitted bet was registered; the form can close.
    BetSubmitted(Bet),
    /// Submission failed; the form stays open with its data.
    BetSubmissionFailed,
}
