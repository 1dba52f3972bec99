// Help bar widget: key hints for the current mode.

use demari_app::session::SessionMode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        return " y:Quit | n/Esc:Stay";
    }
    if state.form.is_some() {
        return " Tab/Shift-Tab:Field | Space:Surprise | Enter:Place bet | Esc:Close";
    }
    match state.mode {
        SessionMode::Intake => " n:New bet | d:Draw | r:Refresh | q:Quit",
        SessionMode::Confirming => " d/y:Confirm draw | n/Esc:Cancel | q:Quit",
        SessionMode::Drawing => " Drawing... | q:Quit",
        SessionMode::Results => " Enter/b:Back to bets | q:Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::form::BetForm;
    use demari_core::validator::DuplicateCheck;

    #[test]
    fn hints_follow_mode() {
        let mut state = ViewState::default();
        assert!(help_text(&state).contains("n:New bet"));
        state.mode = SessionMode::Results;
        assert!(help_text(&state).contains("Back to bets"));
    }

    #[test]
    fn dialogs_override_mode_hints() {
        let mut state = ViewState::default();
        state.form = Some(BetForm::new(DuplicateCheck::LastEdit));
        assert!(help_text(&state).contains("Space:Surprise"));
        state.confirm_quit = true;
        assert!(help_text(&state).starts_with(" y:Quit"));
    }
}
