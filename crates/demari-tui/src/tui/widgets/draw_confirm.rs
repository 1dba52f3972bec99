// Draw confirmation overlay, shown while the session is in Confirming.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::status_bar::bet_count;
use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 6;

/// Render the confirmation dialog for a draw over `bet_count` bets.
pub fn render(frame: &mut Frame, area: Rect, bets: usize) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Confirm draw ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::raw(format!("  Draw now over {}?", bet_count(bets))),
        Line::raw("  The bet list is cleared."),
        Line::from(vec![
            Span::raw("  ("),
            Span::styled("d", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" draw, "),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" cancel)"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}
