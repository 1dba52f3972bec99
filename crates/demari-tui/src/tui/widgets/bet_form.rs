// Bet form overlay: name, masked tax id, five number slots, surprise toggle.
//
// The focused field is marked with `>`. Number slots are dimmed and their
// values hidden while surprise mode is on. The invalid-numbers hint shows
// whenever the slots would not pass validation.

use demari_core::validator::SLOT_COUNT;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::form::{BetForm, FormField};
use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 52;
const DIALOG_HEIGHT: u16 = 15;

pub fn render(frame: &mut Frame, area: Rect, form: &BetForm) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " New bet ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(form_lines(form))
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Build the dialog body.
pub fn form_lines(form: &BetForm) -> Vec<Line<'static>> {
    let draft = &form.draft;
    let mut lines = vec![
        field_line("Name", draft.bettor_name().to_string(), form.focus == FormField::Name),
        field_line(
            "Tax id",
            placeholder(draft.tax_id(), "000.000.000-00"),
            form.focus == FormField::TaxId,
        ),
        Line::raw(""),
        slots_line(form),
    ];

    if !draft.all_numbers_are_valid() {
        lines.push(Line::from(Span::styled(
            "  Invalid numbers for a bet",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::raw(""));
    }

    let dim = Style::default().fg(Color::DarkGray);
    lines.push(Line::from(Span::styled("  - Numbers from 1 to 50", dim)));
    lines.push(Line::from(Span::styled("  - Numbers cannot repeat", dim)));
    lines.push(Line::raw(""));

    let checkbox = if draft.is_surprise() { "[x]" } else { "[ ]" };
    lines.push(field_line(
        "Surprise",
        format!("{} pick my numbers", checkbox),
        form.focus == FormField::Surprise,
    ));
    lines.push(Line::raw(""));
    lines.push(submit_line(form));
    lines
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{}{:<9}", marker, format!("{}:", label)), label_style),
        Span::raw(value),
    ])
}

fn placeholder(value: &str, empty: &str) -> String {
    if value.is_empty() {
        empty.to_string()
    } else {
        value.to_string()
    }
}

fn slots_line(form: &BetForm) -> Line<'static> {
    let focused_slot = match form.focus {
        FormField::Slot(i) => Some(i),
        _ => None,
    };
    let marker = if focused_slot.is_some() { "> " } else { "  " };
    let mut spans = vec![Span::styled(
        format!("{}{:<9}", marker, "Numbers:"),
        Style::default().fg(if focused_slot.is_some() { Color::Cyan } else { Color::White }),
    )];

    for i in 0..SLOT_COUNT {
        let text = if form.draft.is_surprise() {
            "??".to_string()
        } else {
            format!("{:>2}", form.draft.slot_text(i))
        };
        let style = if form.draft.is_surprise() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if focused_slot == Some(i) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", text), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn submit_line(form: &BetForm) -> Line<'static> {
    if form.submitting {
        Line::from(Span::styled(
            "  Registering bet...",
            Style::default().fg(Color::Cyan),
        ))
    } else if form.can_submit() {
        Line::from(Span::styled(
            "  Enter: place bet",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "  Fill in every field to place the bet",
            Style::default().fg(Color::DarkGray),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use demari_core::validator::DuplicateCheck;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| &*s.content).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_form_shows_placeholder_and_hint() {
        let form = BetForm::new(DuplicateCheck::LastEdit);
        let text = text_of(&form_lines(&form));
        assert!(text.contains("000.000.000-00"));
        assert!(text.contains("Invalid numbers"));
        assert!(text.contains("[ ] pick my numbers"));
        assert!(text.contains("Fill in every field"));
    }

    #[test]
    fn valid_numbers_hide_hint() {
        let mut form = BetForm::new(DuplicateCheck::LastEdit);
        form.draft = ["10", "20", "30", "40", "50"]
            .iter()
            .enumerate()
            .fold(form.draft.clone(), |d, (i, v)| d.with_slot_input(i, v));
        let text = text_of(&form_lines(&form));
        assert!(!text.contains("Invalid numbers"));
        assert!(text.contains("[10] [20] [30] [40] [50]"));
    }

    #[test]
    fn surprise_hides_slot_values() {
        let mut form = BetForm::new(DuplicateCheck::LastEdit);
        form.draft = form.draft.with_surprise(true, &mut rand::thread_rng());
        let text = text_of(&form_lines(&form));
        assert!(text.contains("[??] [??] [??] [??] [??]"));
        assert!(text.contains("[x] pick my numbers"));
        assert!(!text.contains("Invalid numbers"));
    }

    #[test]
    fn ready_and_submitting_states() {
        let mut form = BetForm::new(DuplicateCheck::LastEdit);
        form.draft = form
            .draft
            .with_bettor_name("Ana")
            .with_tax_id_input("12345678901")
            .with_surprise(true, &mut rand::thread_rng());
        assert!(text_of(&form_lines(&form)).contains("Enter: place bet"));
        form.submitting = true;
        assert!(text_of(&form_lines(&form)).contains("Registering bet"));
    }

    #[test]
    fn render_does_not_panic_in_small_terminal() {
        let backend = ratatui::backend::TestBackend::new(30, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let form = BetForm::new(DuplicateCheck::LastEdit);
        terminal
            .draw(|frame| render(frame, frame.area(), &form))
            .unwrap();
    }
}
