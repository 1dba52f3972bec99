// Bets table widget: the valid bets registered since the last draw.
//
// Columns: Code, Name, Tax id, Numbers. Also used for the winners list on
// the results screen.

use demari_core::bet::Bet;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::format_numbers;

/// Render the valid bets table into the given area.
pub fn render(frame: &mut Frame, area: Rect, bets: &[Bet]) {
    let title = format!("Bets ({})", bets.len());
    if bets.is_empty() {
        let paragraph = Paragraph::new("  No bets registered yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }
    frame.render_widget(bets_table(bets, title), area);
}

/// Build a bordered table listing `bets`.
pub fn bets_table(bets: &[Bet], title: String) -> Table<'static> {
    let header = Row::new(vec![
        Cell::from("Code"),
        Cell::from("Name"),
        Cell::from("Tax id"),
        Cell::from("Numbers"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = bets
        .iter()
        .map(|bet| {
            Row::new(vec![
                Cell::from(format!("#{}", bet.id)),
                Cell::from(bet.bettor_name.clone()),
                Cell::from(bet.tax_id.clone()),
                Cell::from(numbers_cell(bet)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(26),
    ];

    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
}

/// Numbers column text; surprise bets are labelled as such.
pub fn numbers_cell(bet: &Bet) -> String {
    match (bet.is_surprise, bet.numbers.is_empty()) {
        (true, true) => "surprise".to_string(),
        (true, false) => format!("{} (surprise)", format_numbers(&bet.numbers)),
        (false, _) => format_numbers(&bet.numbers),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
