// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (bet form editing, the quit
// dialog).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use demari_app::protocol::UserCommand;
use demari_app::session::SessionMode;
use demari_core::tax_id::TAX_ID_DIGITS;

use super::form::{BetForm, FormField};
use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key was handled locally or
/// ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm also reports key releases.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if let Some(form) = view_state.form.as_mut() {
        let (close, cmd) = handle_form_key(key_event, form);
        if close {
            view_state.form = None;
        }
        return cmd;
    }

    match view_state.mode {
        SessionMode::Intake => match key_event.code {
            KeyCode::Char('n') => {
                view_state.form = Some(BetForm::new(view_state.duplicate_check));
                None
            }
            KeyCode::Char('d') => Some(UserCommand::PressDraw),
            KeyCode::Char('r') => Some(UserCommand::RefreshBets),
            KeyCode::Char('q') => request_quit(view_state),
            _ => None,
        },
        SessionMode::Confirming => match key_event.code {
            KeyCode::Char('d') | KeyCode::Char('y') | KeyCode::Enter => {
                Some(UserCommand::PressDraw)
            }
            KeyCode::Char('n') | KeyCode::Esc => Some(UserCommand::CancelDraw),
            KeyCode::Char('q') => request_quit(view_state),
            _ => None,
        },
        // Draw and bet actions are locked out until the backend answers.
        SessionMode::Drawing => match key_event.code {
            KeyCode::Char('q') => request_quit(view_state),
            _ => None,
        },
        SessionMode::Results => match key_event.code {
            KeyCode::Enter | KeyCode::Char('b') | KeyCode::Esc => {
                Some(UserCommand::ReturnToIntake)
            }
            KeyCode::Char('q') => request_quit(view_state),
            _ => None,
        },
    }
}

fn request_quit(view_state: &mut ViewState) -> Option<UserCommand> {
    view_state.confirm_quit = true;
    None
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Bet form
// ---------------------------------------------------------------------------

/// Handle a key while the bet form is open.
///
/// Returns whether the form should close, and the command to send, if any.
/// Edits are blocked while a submission is in flight.
fn handle_form_key(key_event: KeyEvent, form: &mut BetForm) -> (bool, Option<UserCommand>) {
    match key_event.code {
        KeyCode::Esc => return (true, None),
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            return (false, None);
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            return (false, None);
        }
        KeyCode::Enter => {
            if !form.can_submit() {
                return (false, None);
            }
            let cmd = form.draft.to_new_bet().map(UserCommand::SubmitBet);
            form.submitting = cmd.is_some();
            return (false, cmd);
        }
        _ => {}
    }

    if form.submitting {
        return (false, None);
    }

    match (form.focus, key_event.code) {
        (FormField::Name, KeyCode::Char(c)) => {
            let name = format!("{}{}", form.draft.bettor_name(), c);
            form.draft = form.draft.with_bettor_name(&name);
        }
        (FormField::Name, KeyCode::Backspace) => {
            let mut name = form.draft.bettor_name().to_string();
            name.pop();
            form.draft = form.draft.with_bettor_name(&name);
        }
        // Space toggles surprise from any field except the name.
        (_, KeyCode::Char(' ')) => {
            let on = !form.draft.is_surprise();
            form.draft = form.draft.with_surprise(on, &mut rand::thread_rng());
            form.settle_focus();
        }
        (FormField::TaxId, KeyCode::Char(c)) => {
            let raw = format!("{}{}", form.draft.tax_id(), c);
            form.draft = form.draft.with_tax_id_input(&raw);
        }
        (FormField::TaxId, KeyCode::Backspace) => {
            // Drop the last digit, not the last mask character.
            let mut digits: String = form
                .draft
                .tax_id()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(TAX_ID_DIGITS)
                .collect();
            digits.pop();
            form.draft = form.draft.with_tax_id_input(&digits);
        }
        (FormField::Slot(index), KeyCode::Char(c)) => {
            let raw = format!("{}{}", form.draft.slot_text(index), c);
            form.draft = form.draft.with_slot_input(index, &raw);
        }
        (FormField::Slot(index), KeyCode::Backspace) => {
            let mut raw = form.draft.slot_text(index);
            raw.pop();
            form.draft = form.draft.with_slot_input(index, &raw);
        }
        _ => {}
    }
    (false, None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
