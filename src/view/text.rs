//! Plain-text rendering of a table page for headless output.

use std::fmt::Write;

use super::{Cell, HeaderSpec, PaginationView, TableBody};

/// Column separator in text output.
const GAP: &str = "  ";

/// Render header, rows and the page label as aligned text columns. The
/// actions column is omitted.
pub fn render_page(header: &HeaderSpec, body: &TableBody, pagination: &PaginationView) -> String {
    let titles: Vec<String> = header
        .cells
        .iter()
        .filter(|cell| cell.key.is_some())
        .map(|cell| cell.title())
        .collect();

    let mut out = String::new();
    match body {
        TableBody::Empty(empty) => {
            let _ = writeln!(out, "{}", titles.join(GAP));
            let _ = writeln!(out, "{}", empty.title);
            let _ = writeln!(out, "{}", empty.hint);
        }
        TableBody::Rows(rows) => {
            let lines: Vec<Vec<&str>> = rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .filter_map(|cell| match cell {
                            Cell::Text(text) => Some(text.as_str()),
                            Cell::Actions { .. } => None,
                        })
                        .collect()
                })
                .collect();

            let mut widths: Vec<usize> = titles.iter().map(|t| t.chars().count()).collect();
            for line in &lines {
                for (width, text) in widths.iter_mut().zip(line) {
                    *width = (*width).max(text.chars().count());
                }
            }

            push_line(&mut out, titles.iter().map(String::as_str), &widths);
            for line in &lines {
                push_line(&mut out, line.iter().copied(), &widths);
            }
        }
    }
    let _ = writeln!(out, "{} ({} total)", pagination.label(), pagination.total);
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(text, width)| format!("{text:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(GAP).trim_end());
}
