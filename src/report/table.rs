//! Row-oriented table rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::style::{Align, NumberFormat, TableStyle};

use super::ReportDataset;

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub align: Align,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub background: String,
    /// True on every other body row when zebra banding is on.
    pub striped: bool,
}

/// Fully styled table, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub header: TableRow,
    pub rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<TableRow>,
    /// Pixel width per column.
    pub column_widths: Vec<u32>,
}

/// Format one cell. Numbers go through `number`; `null` is blank.
pub(crate) fn format_cell(value: &Value, number: &NumberFormat) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(|f| number.format(f)).unwrap_or_default(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A column is numeric when it has at least one number and nothing else
/// besides nulls.
pub(crate) fn is_numeric_column(dataset: &ReportDataset, column: &str) -> bool {
    let mut seen = false;
    for row in &dataset.rows {
        match row.get(column) {
            None | Some(Value::Null) => {}
            Some(Value::Number(_)) => seen = true,
            Some(_) => return false,
        }
    }
    seen
}

fn column_sum(dataset: &ReportDataset, column: &str) -> f64 {
    dataset
        .rows
        .iter()
        .filter_map(|row| row.get(column).and_then(Value::as_f64))
        .sum()
}

/// Render `dataset` with `style`.
///
/// Numeric columns are right-aligned. The totals row, when enabled, puts the
/// label in the first column and sums every other numeric column.
pub fn render_table(dataset: &ReportDataset, style: &TableStyle) -> TableView {
    let numeric: Vec<bool> = dataset
        .columns
        .iter()
        .map(|c| is_numeric_column(dataset, c))
        .collect();
    let body_align = |i: usize| if numeric[i] { Align::Right } else { style.body.align };

    let header = TableRow {
        cells: dataset
            .columns
            .iter()
            .map(|c| TableCell {
                text: c.clone(),
                align: style.header.align,
                bold: style.header.bold,
            })
            .collect(),
        background: style.header.background.to_string(),
        striped: false,
    };

    let rows: Vec<TableRow> = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let striped = style.zebra.enabled && r % 2 == 1;
            TableRow {
                cells: dataset
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| TableCell {
                        text: format_cell(row.get(c).unwrap_or(&Value::Null), &style.number),
                        align: body_align(i),
                        bold: style.body.bold,
                    })
                    .collect(),
                background: if striped {
                    style.zebra.color.to_string()
                } else {
                    style.body.background.to_string()
                },
                striped,
            }
        })
        .collect();

    let totals = (style.totals.show && !dataset.columns.is_empty()).then(|| TableRow {
        cells: dataset
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let text = if i == 0 {
                    style.totals.label.clone()
                } else if numeric[i] {
                    style.number.format(column_sum(dataset, c))
                } else {
                    String::new()
                };
                TableCell {
                    text,
                    align: body_align(i),
                    bold: style.totals.bold,
                }
            })
            .collect(),
        background: style.body.background.to_string(),
        striped: false,
    });

    let column_widths = (0..dataset.columns.len())
        .map(|i| {
            let chars = std::iter::once(&header)
                .chain(rows.iter())
                .chain(totals.iter())
                .map(|row| row.cells[i].text.chars().count())
                .max()
                .unwrap_or(0);
            let pixels = (chars as f64 * f64::from(style.font.size) * GLYPH_WIDTH_RATIO).ceil();
            style.column_width.resolve(pixels as u32)
        })
        .collect();

    TableView {
        header,
        rows,
        totals,
        column_widths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Overlay, WidthMode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dataset() -> ReportDataset {
        ReportDataset::from_values(
            vec!["Machine".into(), "Output".into(), "Note".into()],
            json!([
                {"Machine": "M1", "Output": 1200.5, "Note": "ok"},
                {"Machine": "M2", "Output": 800, "Note": null},
                {"Machine": "M3", "Output": null, "Note": "idle"}
            ])
            .as_array()
            .unwrap(),
        )
    }

    #[test]
    fn test_cells_formatted_and_aligned() {
        let view = render_table(&dataset(), &TableStyle::default());
        assert_eq!(view.header.cells[1].text, "Output");
        assert!(view.header.cells[0].bold);
        assert_eq!(view.rows[0].cells[1].text, "1,200.50");
        assert_eq!(view.rows[0].cells[1].align, Align::Right);
        assert_eq!(view.rows[0].cells[0].align, Align::Left);
        assert_eq!(view.rows[1].cells[2].text, "");
        assert_eq!(view.rows[2].cells[1].text, "");
        assert_eq!(view.totals, None);
    }

    #[test]
    fn test_zebra_bands() {
        let style = TableStyle::default();
        let view = render_table(&dataset(), &style);
        let striped: Vec<bool> = view.rows.iter().map(|r| r.striped).collect();
        assert_eq!(striped, vec![false, true, false]);
        assert_eq!(view.rows[1].background, style.zebra.color.to_string());

        let mut plain = TableStyle::default();
        plain.overlay(&json!({"zebra": {"enabled": false}}));
        let view = render_table(&dataset(), &plain);
        assert!(view.rows.iter().all(|r| !r.striped));
    }

    #[test]
    fn test_totals_sum_numeric_columns() {
        let mut style = TableStyle::default();
        style.overlay(&json!({"totals": {"show": true, "label": "Sum"}, "number": {"precision": 1}}));
        let view = render_table(&dataset(), &style);
        let totals = view.totals.unwrap();
        let texts: Vec<&str> = totals.cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Sum", "2,000.5", ""]);
        assert!(totals.cells.iter().all(|c| c.bold));
    }

    #[test]
    fn test_mixed_column_is_not_numeric() {
        let ds = ReportDataset::from_values(
            vec!["A".into()],
            json!([{"A": 1}, {"A": "two"}]).as_array().unwrap(),
        );
        assert!(!is_numeric_column(&ds, "A"));
        assert!(!is_numeric_column(&ds, "missing"));
    }

    #[test]
    fn test_column_widths() {
        let mut style = TableStyle::default();
        style.overlay(&json!({"column_width": {"mode": "fixed", "width": 50}}));
        assert_eq!(style.column_width.mode, WidthMode::Fixed);
        let view = render_table(&dataset(), &style);
        assert_eq!(view.column_widths, vec![50, 50, 50]);

        let view = render_table(&dataset(), &TableStyle::default());
        assert_eq!(view.column_widths.len(), 3);
        assert!(view.column_widths.iter().all(|w| *w >= 96 && *w <= 320));
    }

    #[test]
    fn test_empty_dataset() {
        let view = render_table(&ReportDataset::default(), &TableStyle::default());
        assert!(view.rows.is_empty());
        assert!(view.column_widths.is_empty());
    }
}
