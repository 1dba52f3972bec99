// Results widgets: the loading panel while a draw is in flight and the draw
// outcome afterwards (drawn numbers, winners, number frequency).

use demari_core::bet::{DrawResult, NumberFrequency};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::{bets_table, format_numbers};
use crate::tui::layout::results_layout;

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("  Loading...")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Draw"));
    frame.render_widget(paragraph, area);
}

/// Render the draw outcome. A missing draw renders like an empty one.
pub fn render(frame: &mut Frame, area: Rect, draw: Option<&DrawResult>) {
    let empty = DrawResult::default();
    let draw = draw.unwrap_or(&empty);
    let (drawn_area, winners_area, frequency_area) = results_layout(area);

    let drawn = Paragraph::new(format!(" {}", format_numbers(&draw.drawn_numbers)))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Drawn numbers"));
    frame.render_widget(drawn, drawn_area);

    let winners_title = format!("Winners ({})", draw.winners.len());
    if draw.winners.is_empty() {
        let paragraph = Paragraph::new("  No winners this round.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(winners_title));
        frame.render_widget(paragraph, winners_area);
    } else {
        frame.render_widget(bets_table::bets_table(&draw.winners, winners_title), winners_area);
    }

    frame.render_widget(frequency_table(&draw.number_frequency), frequency_area);
}

/// Number frequency in the order given (already sorted by count).
fn frequency_table(frequency: &[NumberFrequency]) -> Table<'static> {
    let header = Row::new(vec![Cell::from("Number"), Cell::from("Bets")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = frequency
        .iter()
        .map(|f| {
            Row::new(vec![
                Cell::from(format!("{:02}", f.number)),
                Cell::from(f.count.to_string()),
            ])
        })
        .collect();

    Table::new(rows, [Constraint::Length(8), Constraint::Length(6)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Most picked"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
