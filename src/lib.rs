//! # Tincture - Report Style and Chart Dataset Engine
//!
//! Tincture resolves the visual style of periodic industrial reports and
//! turns report rows into chart-ready datasets. It provides:
//!
//! - **Normalization**: persisted styles in any historical shape become one
//!   canonical object per section
//! - **Resolution**: partial styles are overlaid onto a closed, typed
//!   default schema, so malformed leaves never reach a renderer
//! - **Charting**: series, axes, colors and per-point attributes for bar,
//!   line, scatter, pie, doughnut and bubble charts
//! - **Previews**: table and text renderers plus latest-wins preview fetching
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use tincture::{
//!     chart::{build_chart, BuildOptions, ChartView},
//!     report::{series_from_dataset, ReportDataset},
//!     style,
//! };
//!
//! // A legacy payload: string-encoded section, camelCase keys
//! let raw = json!({"ChartStyle": "{\"chartType\": \"line\", \"colors\": [\"#ff0000\"]}"});
//! let resolved = style::resolve(Some(&raw));
//!
//! let rows = json!([
//!     {"Timestamp": "2024-05-01 06:00", "Seed": 12},
//!     {"Timestamp": "2024-05-01 07:00", "Seed": 15}
//! ]);
//! let dataset = ReportDataset::from_values(
//!     vec!["Timestamp".into(), "Seed".into()],
//!     rows.as_array().unwrap(),
//! );
//! let series = series_from_dataset(&dataset);
//! let options = BuildOptions::from_style(&resolved.chart, series.len());
//!
//! let ChartView::Ready(chart) = build_chart(&series, &options) else {
//!     panic!("expected a chart");
//! };
//! assert_eq!(chart.datasets[0].label, "Seed");
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`style`] | Typed style schema, defaults and resolution |
//! | [`normalize`] | Legacy payload adapters |
//! | [`merge`] | Deep merge of raw JSON trees |
//! | [`color`] | Color resolution and gradients |
//! | [`chart`] | Chart dataset builder and post-render passes |
//! | [`report`] | Report dataset, table and text renderers |
//! | [`preview`] | Preview routing and latest-wins fetching |
//! | [`store`] | Style persistence and editing sessions |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod chart;
pub mod color;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod preview;
pub mod report;
pub mod server;
pub mod store;
pub mod style;

// Re-exports for convenience
pub use error::TinctureError;
pub use style::{StyleConfig, resolve};
