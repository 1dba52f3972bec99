// Session view model: the intake / draw / results state machine.
//
//   Intake --draw--> Confirming --draw--> Drawing --response--> Results
//     ^                  |                                        |
//     +------cancel------+----------------return------------------+
//
// Transitions are plain methods so the machine can be driven without any
// rendering. Network calls are not made here; `press_draw` reports when the
// caller must dispatch the draw request.

use std::time::Duration;

use demari_core::bet::{Bet, BetId, DrawResult};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::protocol::SessionSnapshot;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Registering bets.
    #[default]
    Intake,
    /// Draw pressed once; waiting for the confirming second press.
    Confirming,
    /// Draw request in flight.
    Drawing,
    /// Draw finished (or failed); showing the outcome.
    Results,
}

/// Transient "bet registered" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    pub bet_id: BetId,
    pub expires_at: Instant,
}

/// What a press of the draw button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPress {
    /// First press: now waiting for confirmation. No request.
    AwaitingConfirmation,
    /// Second press: the caller must send exactly one draw request.
    Dispatch,
    /// Not available in the current mode.
    Ignored,
}

pub struct Session {
    mode: SessionMode,
    valid_bets: Vec<Bet>,
    draw: Option<DrawResult>,
    acknowledgement: Option<Acknowledgement>,
    acknowledgement_window: Duration,
}

impl Session {
    pub fn new(acknowledgement_window: Duration) -> Self {
        Session {
            mode: SessionMode::Intake,
            valid_bets: Vec::new(),
            draw: None,
            acknowledgement: None,
            acknowledgement_window,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn valid_bets(&self) -> &[Bet] {
        &self.valid_bets
    }

    pub fn draw(&self) -> Option<&DrawResult> {
        self.draw.as_ref()
    }

    pub fn acknowledgement(&self) -> Option<Acknowledgement> {
        self.acknowledgement
    }

    /// A draw request is in flight.
    pub fn is_loading(&self) -> bool {
        self.mode == SessionMode::Drawing
    }

    /// Replace the bet list with a fresh fetch.
    ///
    /// Ignored once a draw has been dispatched: those bets are spent.
    pub fn bets_loaded(&mut self, bets: Vec<Bet>) -> bool {
        match self.mode {
            SessionMode::Intake | SessionMode::Confirming => {
                info!("Loaded {} valid bets", bets.len());
                self.valid_bets = bets;
                true
            }
            SessionMode::Drawing | SessionMode::Results => {
                debug!("Discarding bet list fetched after the draw started");
                false
            }
        }
    }

    /// Record a bet the backend acknowledged and start its acknowledgement.
    pub fn bet_created(&mut self, bet: Bet, now: Instant) {
        info!("Bet {} added for {}", bet.id, bet.bettor_name);
        self.acknowledgement = Some(Acknowledgement {
            bet_id: bet.id,
            expires_at: now + self.acknowledgement_window,
        });
        self.valid_bets.push(bet);
    }

    /// Clear the acknowledgement if it has expired at `now`.
    pub fn expire_acknowledgement(&mut self, now: Instant) -> bool {
        match self.acknowledgement {
            Some(ack) if now >= ack.expires_at => {
                self.acknowledgement = None;
                true
            }
            _ => false,
        }
    }

    /// Handle a press of the draw button.
    pub fn press_draw(&mut self) -> DrawPress {
        match self.mode {
            SessionMode::Intake => {
                info!("Draw requested, awaiting confirmation");
                self.mode = SessionMode::Confirming;
                DrawPress::AwaitingConfirmation
            }
            SessionMode::Confirming => {
                info!("Draw confirmed, clearing {} bets", self.valid_bets.len());
                self.mode = SessionMode::Drawing;
                self.valid_bets.clear();
                self.draw = None;
                DrawPress::Dispatch
            }
            SessionMode::Drawing | SessionMode::Results => DrawPress::Ignored,
        }
    }

    /// Back out of a pending confirmation.
    pub fn cancel_draw(&mut self) -> bool {
        if self.mode != SessionMode::Confirming {
            return false;
        }
        info!("Draw confirmation cancelled");
        self.mode = SessionMode::Intake;
        true
    }

    /// Store the draw outcome and show results.
    pub fn draw_completed(&mut self, mut result: DrawResult) -> bool {
        if self.mode != SessionMode::Drawing {
            debug!("Ignoring draw result outside of Drawing ({:?})", self.mode);
            return false;
        }
        result.sort_frequency_desc();
        self.draw = Some(result);
        self.mode = SessionMode::Results;
        true
    }

    /// The draw request failed. Loading still ends and the results view
    /// opens with no data, so the operator can return to intake.
    pub fn draw_failed(&mut self) -> bool {
        if self.mode != SessionMode::Drawing {
            return false;
        }
        self.draw = Some(DrawResult::default());
        self.mode = SessionMode::Results;
        true
    }

    /// Leave the results view. The bet list is not re-fetched: the draw
    /// consumed every bet it held.
    pub fn return_to_intake(&mut self) -> bool {
        if self.mode != SessionMode::Results {
            return false;
        }
        info!("Returning to bet intake");
        self.draw = None;
        self.mode = SessionMode::Intake;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            valid_bets: self.valid_bets.clone(),
            draw: self.draw.clone(),
            acknowledged_bet: self.acknowledgement.map(|a| a.bet_id),
            loading: self.is_loading(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
