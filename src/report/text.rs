//! Plain-text rendering with padded, aligned columns.

use serde_json::Value;

use crate::style::{Align, TextStyle};

use super::ReportDataset;
use super::table::{format_cell, is_numeric_column};

fn pad(text: &str, width: usize, align: Align) -> String {
    let len = text.chars().count();
    let gap = width.saturating_sub(len);
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(gap)),
        Align::Right => format!("{}{}", " ".repeat(gap), text),
        Align::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

/// Render `dataset` as text lines joined by `\n`.
///
/// Numeric columns are right-aligned; others follow `style.align`.
/// Trailing padding is trimmed from every line.
pub fn render_text(dataset: &ReportDataset, style: &TextStyle) -> String {
    if dataset.columns.is_empty() {
        return String::new();
    }

    let aligns: Vec<Align> = dataset
        .columns
        .iter()
        .map(|c| {
            if is_numeric_column(dataset, c) {
                Align::Right
            } else {
                style.align
            }
        })
        .collect();

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(dataset.rows.len() + 1);
    if style.show_header {
        grid.push(dataset.columns.clone());
    }
    for row in &dataset.rows {
        grid.push(
            dataset
                .columns
                .iter()
                .map(|c| format_cell(row.get(c).unwrap_or(&Value::Null), &style.number))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..dataset.columns.len())
        .map(|i| grid.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    grid.iter()
        .map(|cells| {
            let line = cells
                .iter()
                .enumerate()
                .map(|(i, text)| pad(text, widths[i], aligns[i]))
                .collect::<Vec<_>>()
                .join(&style.separator);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
