//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use super::table::render_table;
use crate::types::{ResultEntry, SearchMode};
use console::style;
use serde_json::Number;
use std::io::{self, Write};

/// Default number of entries shown in the preview table.
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Print the preview table for the first `rows` entries and a result count.
pub fn print_preview(entries: &[ResultEntry], rows: usize, max_width: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render_preview(entries, rows, max_width))
}

/// Render the table for the first `rows` entries followed by the result count.
pub fn render_preview(entries: &[ResultEntry], rows: usize, max_width: usize) -> String {
    let shown = &entries[..entries.len().min(rows)];
    format!(
        "{}\n{}\n",
        render_table(shown, max_width),
        preview_summary(entries.len(), shown.len())
    )
}

/// Balance line printed after every page.
pub fn balance_message(balance: Option<&Number>) -> String {
    match balance {
        Some(balance) => format!("Balance of requests: {}", balance),
        None => "Balance of requests: unknown".to_string(),
    }
}

/// Summary line printed under the preview table.
fn preview_summary(total: usize, shown: usize) -> String {
    if shown < total {
        format!(
            "{} {} (showing first {})",
            style("Results found:").bold(),
            style(total).green().bold(),
            shown
        )
    } else {
        format!(
            "{} {}",
            style("Results found:").bold(),
            style(total).green().bold()
        )
    }
}

/// Print a search header before fetching begins.
pub fn print_search_header(query: &str, mode: SearchMode, dedupe: bool) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("leakseek").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Searching for: {}",
        style("•").dim(),
        style(query).white().bold()
    );
    println!(
        "{} Match: {}{}",
        style("•").dim(),
        style(mode).yellow(),
        if dedupe { ", de-duplicated" } else { "" }
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
