//! # Report Preview
//!
//! Routes a backend preview response to the right renderer for the
//! requested format. Transformation lives in [`crate::chart`] and
//! [`crate::report`]; this module only decides which one runs.
//!
//! | Response | Format | Result |
//! |----------|--------|--------|
//! | `chart_png` present | any | [`Preview::Image`] |
//! | no rows | any | [`Preview::Empty`] |
//! | rows | `chart` | [`Preview::Chart`] |
//! | rows | `table`, `excel` | [`Preview::Table`] |
//! | rows | `text` | [`Preview::Text`] |
//!
//! [`PreviewOrchestrator`] runs fetches so that only the most recently
//! started one can update the visible state.

mod backend;
mod orchestrator;

pub use backend::{HttpPreviewBackend, PreviewBackend};
pub use orchestrator::{PreviewOrchestrator, PreviewState, PreviewTask};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::{BuildOptions, ChartSpec, ChartView, build_chart};
use crate::error::TinctureError;
use crate::report::{ReportDataset, TableView, render_table, render_text, series_from_dataset};
use crate::style::StyleConfig;

/// Output format of a report template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Chart,
    Table,
    Excel,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub template_id: String,
    pub format: ReportFormat,
    pub period_type: String,
    pub time_of_day: String,
}

/// Backend preview payload. Everything but `ok` is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewResponse {
    pub ok: bool,
    pub columns: Option<Vec<String>>,
    pub data: Option<Vec<Value>>,
    /// Pre-rendered chart, base64 PNG. Wins over client-side charting.
    pub chart_png: Option<String>,
    pub period: Option<Value>,
    pub error: Option<String>,
}

impl PreviewResponse {
    /// Rows as a dataset. Missing columns fall back to the first row's keys.
    pub fn dataset(&self) -> ReportDataset {
        let rows = self.data.as_deref().unwrap_or_default();
        let columns = match &self.columns {
            Some(columns) => columns.clone(),
            None => rows
                .first()
                .and_then(Value::as_object)
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default(),
        };
        ReportDataset::from_values(columns, rows)
    }
}

/// What the preview pane shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    Image { png_base64: String },
    Chart { chart: ChartSpec },
    Table { table: TableView },
    Text { text: String },
    #[default]
    Empty,
}

/// Render a backend response for `format` with `style`.
pub fn render_preview(
    style: &StyleConfig,
    format: ReportFormat,
    response: &PreviewResponse,
) -> Result<Preview, TinctureError> {
    if !response.ok {
        let message = response
            .error
            .clone()
            .unwrap_or_else(|| "Preview failed".to_string());
        return Err(TinctureError::Transport(message));
    }

    if let Some(png) = response.chart_png.as_ref().filter(|p| !p.is_empty()) {
        return Ok(Preview::Image {
            png_base64: png.clone(),
        });
    }

    let dataset = response.dataset();
    if dataset.is_empty() {
        return Ok(Preview::Empty);
    }

    let preview = match format {
        ReportFormat::Chart => {
            let series = series_from_dataset(&dataset);
            let options = BuildOptions::from_style(&style.chart, series.len());
            match build_chart(&series, &options) {
                ChartView::Ready(chart) => Preview::Chart { chart },
                ChartView::NoData => Preview::Empty,
            }
        }
        ReportFormat::Table => Preview::Table {
            table: render_table(&dataset, &style.table),
        },
        ReportFormat::Excel => Preview::Table {
            table: render_table(&dataset, &style.excel.as_table_style()),
        },
        ReportFormat::Text => Preview::Text {
            text: render_text(&dataset, &style.text),
        },
    };
    Ok(preview)
}
