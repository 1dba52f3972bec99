// Status bar widget: session mode and bet count.

use demari_app::session::SessionMode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [mode badge] | [bet count] [loading]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (label, color) = mode_badge(state.mode);
    let mut spans = vec![
        Span::styled(
            " Demari Bets ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", label),
            Style::default().fg(Color::Black).bg(color),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(bet_count(state.valid_bets.len()), Style::default().fg(Color::White)),
    ];
    if state.loading {
        spans.push(Span::styled(
            " | Loading...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Label and background color for the mode badge.
pub fn mode_badge(mode: SessionMode) -> (&'static str, Color) {
    match mode {
        SessionMode::Intake => ("Taking bets", Color::Green),
        SessionMode::Confirming => ("Confirm draw", Color::Yellow),
        SessionMode::Drawing => ("Drawing", Color::Cyan),
        SessionMode::Results => ("Results", Color::Magenta),
    }
}

pub fn bet_count(count: usize) -> String {
    match count {
        1 => "1 bet".to_string(),
        n => format!("{} bets", n),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
