//! # Report Data
//!
//! The server-confirmed tabular dataset a preview returns, and the
//! row-oriented renderers that consume it alongside a resolved style.
//!
//! | Renderer | Output |
//! |----------|--------|
//! | [`render_table`] | [`TableView`]: formatted cells, zebra bands, totals |
//! | [`render_text`] | aligned plain text |
//! | [`series_from_dataset`] | chart input for [`crate::chart::build_chart`] |

mod table;
mod text;

pub use table::{TableCell, TableRow, TableView, render_table};
pub use text::render_text;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Ordered rows keyed by `columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl ReportDataset {
    pub fn new(columns: Vec<String>, rows: Vec<Map<String, Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build from loose JSON rows. Non-object rows are skipped.
    pub fn from_values(columns: Vec<String>, rows: &[Value]) -> Self {
        let rows = rows
            .iter()
            .filter_map(|row| match row {
                Value::Object(map) => Some(map.clone()),
                other => {
                    tracing::debug!(row = %other, "skipping non-object report row");
                    None
                }
            })
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Cell value, `null` when the row lacks the column.
    pub fn cell(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Value::Null)
    }
}

/// One chart series per non-first column; the first column supplies `x`.
///
/// Each point keeps the full source row under `row` so click handlers can
/// reach it.
pub fn series_from_dataset(dataset: &ReportDataset) -> Vec<Value> {
    let Some((x_column, value_columns)) = dataset.columns.split_first() else {
        return Vec::new();
    };

    value_columns
        .iter()
        .map(|column| {
            let data: Vec<Value> = dataset
                .rows
                .iter()
                .map(|row| {
                    json!({
                        "x": row.get(x_column).cloned().unwrap_or(Value::Null),
                        "y": row.get(column).cloned().unwrap_or(Value::Null),
                        "row": Value::Object(row.clone()),
                    })
                })
                .collect();
            json!({ "label": column, "data": data })
        })
        .collect()
}
