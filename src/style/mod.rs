//! # Style Schema & Defaults
//!
//! [`StyleConfig`] is the root of a report style: a display name plus four
//! self-contained sub-configs for the chart renderer, the table renderer,
//! the spreadsheet exporter and the plain-text renderer.
//!
//! A resolved config is structurally closed: every leaf is defined and no
//! key outside the schema survives. Resolution never fails; malformed leaves
//! keep their default value.
//!
//! ```
//! use serde_json::json;
//! use tincture::style::{ChartType, StyleConfig, resolve};
//!
//! let style = resolve(Some(&json!({
//!     "ChartStyle": "{\"type\": \"line\", \"dpi\": 150}",
//!     "table": {"zebra": {"enabled": false}},
//!     "unknown": 1
//! })));
//! assert_eq!(style.chart.kind, ChartType::Line);
//! assert_eq!(style.chart.dpi, 150);
//! assert!(!style.table.zebra.enabled);
//! assert_eq!(style.excel, StyleConfig::default().excel);
//! ```

#[macro_use]
mod overlay;

pub mod chart;
pub mod common;
pub mod table;
pub mod text;

pub use chart::{
    AxesStyle, AxisStyle, BarStyle, ChartStyle, ChartType, GradientStyle, LayoutStyle,
    LegendPosition, LegendStyle, LineDash, LineStyle, PaletteMode, PaletteStyle, PointStyle,
    TitleStyle, WatermarkStyle,
};
pub use common::{
    Align, BorderStyle, CellStyle, ColumnWidth, FontStyle, NumberFormat, TotalsRow, WidthMode,
    ZebraStyle,
};
pub use overlay::Overlay;
pub use table::{ExcelStyle, TableStyle};
pub use text::TextStyle;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{NormalizedStyle, normalize_style_response};

/// Fully resolved style for all four renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Display name; empty until one is given.
    pub style_name: String,
    pub chart: ChartStyle,
    pub table: TableStyle,
    pub excel: ExcelStyle,
    pub text: TextStyle,
}

impl StyleConfig {
    /// Overlay a normalized payload onto a copy of `self`.
    pub fn merged_with(&self, normalized: &NormalizedStyle) -> StyleConfig {
        let mut out = self.clone();
        if !normalized.style_name.is_empty() {
            out.style_name = normalized.style_name.clone();
        }
        out.chart.overlay(&normalized.chart);
        out.table.overlay(&normalized.table);
        out.excel.overlay(&normalized.excel);
        out.text.overlay(&normalized.text);
        out
    }

    /// Apply a user edit (any persisted or partial shape) on top of this state.
    pub fn apply(&self, patch: &Value) -> StyleConfig {
        self.merged_with(&normalize_style_response(patch))
    }

    /// Resolved style as a JSON tree.
    pub fn to_value(&self) -> Value {
        // Plain structs of strings, numbers and bools always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Resolve a raw persisted or partial style against the defaults.
///
/// `None` and `null` return the defaults unchanged.
pub fn resolve(raw: Option<&Value>) -> StyleConfig {
    match raw {
        None | Some(Value::Null) => StyleConfig::default(),
        Some(raw) => StyleConfig::default().apply(raw),
    }
}

/// Resolve an already normalized payload against the defaults.
pub fn resolve_normalized(normalized: &NormalizedStyle) -> StyleConfig {
    StyleConfig::default().merged_with(normalized)
}
