//! Preview table rendering.
//!
//! Multi-valued fields are joined only here; the entries themselves are
//! never modified.

use crate::types::ResultEntry;
use console::measure_text_width;
use serde_json::Value;

/// Column headers, in display order.
pub const COLUMNS: [&str; 6] = ["Email", "Username", "Password", "Phone", "IP", "Source"];

/// Entry field shown in each column.
const FIELDS: [&str; 6] = [
    "email",
    "username",
    "password",
    "phone",
    "ip_address",
    "database_name",
];

/// Placeholder for absent or empty fields.
pub const PLACEHOLDER: &str = "N/A";

/// Default maximum width of a cell, in terminal columns.
pub const DEFAULT_COLUMN_WIDTH: usize = 30;

/// Render one entry as a row of display strings.
pub fn render_row(entry: &ResultEntry) -> [String; 6] {
    FIELDS.map(|field| field_text(entry.get(field)).unwrap_or_else(|| PLACEHOLDER.to_string()))
}

/// Flatten a field value into display text, `None` when there is nothing to show.
fn field_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| field_text(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Render entries as a bordered table with cells wrapped at `max_width`.
pub fn render_table(entries: &[ResultEntry], max_width: usize) -> String {
    let max_width = max_width.max(1);
    let header: Vec<Vec<String>> = COLUMNS.iter().map(|c| wrap(c, max_width)).collect();
    let rows: Vec<Vec<Vec<String>>> = entries
        .iter()
        .map(|entry| render_row(entry).iter().map(|cell| wrap(cell, max_width)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|lines| block_width(lines)).collect();
    for row in &rows {
        for (width, lines) in widths.iter_mut().zip(row) {
            *width = (*width).max(block_width(lines));
        }
    }

    let separator = separator_line(&widths);
    let mut out = String::new();
    out.push_str(&separator);
    push_row(&mut out, &header, &widths, Align::Center);
    out.push_str(&separator);
    for row in &rows {
        push_row(&mut out, row, &widths, Align::Left);
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }
    out
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

fn block_width(lines: &[String]) -> usize {
    lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0)
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(out: &mut String, cells: &[Vec<String>], widths: &[usize], align: Align) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);
    for line_no in 0..height {
        out.push('|');
        for (lines, &width) in cells.iter().zip(widths) {
            let text = lines.get(line_no).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(measure_text_width(text));
            let (left, right) = match align {
                Align::Left => (0, pad),
                Align::Center => (pad / 2, pad - pad / 2),
            };
            out.push(' ');
            out.push_str(&" ".repeat(left));
            out.push_str(text);
            out.push_str(&" ".repeat(right));
            out.push_str(" |");
        }
        out.push('\n');
    }
}

/// Wrap text into lines no wider than `width`.
///
/// Control characters are shown escaped (`\n`, `\t`, `\u{1b}`) so a cell
/// always stays on its own grid line. Breaks on whitespace where possible;
/// words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let text = escape_control(text);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(char::is_whitespace).filter(|w| !w.is_empty()) {
        let word_width = measure_text_width(word);
        let current_width = measure_text_width(&current);

        if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_width <= width {
            current.push_str(word);
            continue;
        }

        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let ch_width = measure_text_width(ch.encode_utf8(&mut buf));
            if !current.is_empty() && measure_text_width(&current) + ch_width > width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_control(text: &str) -> String {
    text.chars()
        .flat_map(|ch| {
            let escaped: Vec<char> = if ch.is_control() {
                ch.escape_default().collect()
            } else {
                vec![ch]
            };
            escaped
        })
        .collect()
}
