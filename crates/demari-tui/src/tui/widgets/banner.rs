// Banner widget: operator messages under the status bar.
//
// Shows the "bet registered" acknowledgement while it is live, the pending
// draw prompt while confirming, and a short hint otherwise.

use demari_app::session::SessionMode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, style) = banner_message(state);
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// The banner text and its style for the current state.
pub fn banner_message(state: &ViewState) -> (String, Style) {
    if let Some(id) = state.acknowledged_bet {
        return (
            format!(" Bet #{} registered!", id),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        );
    }
    let plain = Style::default().fg(Color::Gray);
    match state.mode {
        SessionMode::Intake => (" Press n to register a bet.".to_string(), plain),
        SessionMode::Confirming => (
            " Draw requested. Press d again to confirm.".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        SessionMode::Drawing => (" Drawing numbers...".to_string(), plain),
        SessionMode::Results => (" Draw finished.".to_string(), plain),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
