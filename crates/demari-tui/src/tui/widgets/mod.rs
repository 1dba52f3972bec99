// TUI widget modules for each dashboard panel and dialog.

pub mod banner;
pub mod bet_form;
pub mod bets_table;
pub mod draw_confirm;
pub mod help_bar;
pub mod quit_confirm;
pub mod results;
pub mod status_bar;

/// Format bet numbers as zero-padded two-digit values: "04 08 15 16 23".
pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ")
}
