//! Chart API handlers.

use axum::{Json, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::chart::{BuildOptions, ChartKind, ChartView, build_chart, series_of};
use crate::color::ChartArea;
use crate::style;

/// Request body for POST /api/chart/build.
#[derive(Deserialize)]
pub struct BuildRequest {
    /// Raw style in any accepted shape; defaults when absent.
    #[serde(default)]
    pub style: Value,
    pub data: Vec<Value>,
    /// Overrides the style's chart type (pie, scatter, ...).
    pub kind: Option<ChartKind>,
    pub chart_area: Option<ChartArea>,
}

/// POST /api/chart/build - Build chart datasets from raw rows.
pub async fn build(Json(req): Json<BuildRequest>) -> Result<Json<ChartView>, (StatusCode, String)> {
    if req.chart_area.is_some_and(|a| a.right < a.left || a.bottom < a.top) {
        return Err((StatusCode::BAD_REQUEST, "chart_area is inverted".to_string()));
    }

    let resolved = style::resolve(Some(&req.style));
    let mut options = BuildOptions::from_style(&resolved.chart, series_of(&req.data).len());
    if let Some(kind) = req.kind {
        options.kind = kind;
    }
    if let Some(area) = req.chart_area {
        options = options.with_chart_area(area);
    }

    Ok(Json(build_chart(&req.data, &options)))
}
