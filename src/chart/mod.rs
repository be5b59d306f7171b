//! # Chart Dataset Builder
//!
//! Turns rows of report data plus a resolved chart style into a
//! [`ChartSpec`]: the datasets, labels and axis settings a chart renderer
//! draws. No pixels are produced here.
//!
//! ## Pipeline
//!
//! 1. Detect the input shape (flat points or named series)
//! 2. Infer the x-axis (time when the first `x` starts with `YYYY-MM-DD`)
//! 3. Compute the y ceiling (`max * 1.15`)
//! 4. Shape one dataset per series (or one for pie/doughnut) with colors,
//!    dash pattern, point and bar attributes
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tincture::chart::{BuildOptions, ChartKind, ChartView, XAxis, build_chart};
//!
//! let data = json!([
//!     {"label": "Seed", "data": [{"x": "2024-05-01 06:00", "y": 12}, {"x": "2024-05-01 07:00", "y": 15}]},
//!     {"label": "Husk", "data": [{"x": "2024-05-01 06:00", "y": 4}, {"x": "2024-05-01 07:00", "y": 5}]}
//! ]);
//! let options = BuildOptions { kind: ChartKind::Line, ..Default::default() };
//! let ChartView::Ready(spec) = build_chart(data.as_array().unwrap(), &options) else {
//!     panic!("expected data");
//! };
//! assert_eq!(spec.datasets.len(), 2);
//! assert!(matches!(spec.x_axis, XAxis::Time { .. }));
//! ```

mod input;
mod interact;
mod options;

pub use input::{
    SeriesInput, as_number, compute_max_y, has_temporal_x, is_iso_date_prefix, is_series_shape,
    point_label, point_value, series_of, suggested_max,
};
pub use interact::{
    BarElement, ElementRef, Pointer, RenderedChart, VALUE_LABEL_OFFSET, ValueLabel, resolve_click,
    value_labels,
};
pub use options::{BarOptions, BuildOptions, GradientOptions};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{Paint, resolve_color, vertical_gradient};
use crate::style::PointStyle;

/// Built-in palette cycled when neither the point nor the caller names a color.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Curve tension for smoothed lines.
pub const LINE_TENSION: f64 = 0.4;

/// Every chart kind the builder can shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Doughnut,
    Bubble,
}

impl ChartKind {
    fn is_radial(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Minute,
    Day,
}

/// Horizontal axis kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum XAxis {
    /// Raw labels, in input order.
    Category,
    /// Parsed timestamps with the given tick unit.
    Time { unit: TimeUnit },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxis {
    /// `None` lets the renderer auto-scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_max: Option<f64>,
    pub begin_at_zero: bool,
}

/// One plotted point. `y` is `None` for missing or non-numeric values so
/// positions stay aligned with the input records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Value,
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

/// Per-dataset color: one paint for the series, or one color per slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Uniform(Paint),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Default,
    Monotone,
}

/// Bar-only geometry attached to bar datasets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub max_bar_thickness: u32,
    pub category_percentage: f64,
    pub bar_percentage: f64,
    pub border_radius: u32,
}

/// A derived, plottable series with its resolved visual attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Point>,
    pub border_color: SeriesColor,
    pub background_color: SeriesColor,
    pub fill: bool,
    pub border_width: f64,
    pub point_radius: f64,
    pub point_style: PointStyle,
    pub border_dash: Vec<f64>,
    pub tension: f64,
    pub interpolation: Interpolation,
    pub show_line: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<BarGeometry>,
}

/// Renderer-ready chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub show_legend: bool,
    /// Draw the value-label overlay after the series pass.
    pub show_values: bool,
}

/// Outcome of a build: an explicit "no data" state or a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "chart", rename_all = "snake_case")]
pub enum ChartView {
    NoData,
    Ready(ChartSpec),
}

impl ChartView {
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartView::Ready(spec) => Some(spec),
            ChartView::NoData => None,
        }
    }
}

// ============================================================================
// BUILD
// ============================================================================

/// Build a chart from raw input. Empty input yields [`ChartView::NoData`].
pub fn build_chart(data: &[Value], options: &BuildOptions) -> ChartView {
    let series = series_of(data);
    // Radial charts and category labels read the first series with points.
    let Some(primary) = series.iter().find(|s| !s.points.is_empty()) else {
        tracing::debug!(kind = ?options.kind, "chart input is empty");
        return ChartView::NoData;
    };

    let spec = if options.kind.is_radial() {
        build_radial(primary, options)
    } else {
        build_cartesian(&series, primary, data, options)
    };
    ChartView::Ready(spec)
}

fn build_radial(series: &SeriesInput<'_>, options: &BuildOptions) -> ChartSpec {
    let labels: Vec<String> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| point_label(p, i))
        .collect();
    let colors: Vec<String> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| slice_color(p, i, &options.colors))
        .collect();
    let data = series
        .points
        .iter()
        .zip(&labels)
        .map(|(p, label)| Point {
            x: Value::String(label.clone()),
            y: point_value(p),
            r: None,
        })
        .collect();

    let dataset = Dataset {
        label: series.label.clone(),
        data,
        border_color: SeriesColor::Uniform(Paint::Solid("#ffffff".into())),
        background_color: SeriesColor::PerPoint(colors),
        fill: true,
        border_width: 1.0,
        point_radius: 0.0,
        point_style: options.point_style,
        border_dash: Vec::new(),
        tension: 0.0,
        interpolation: Interpolation::Default,
        show_line: false,
        bar: None,
    };

    ChartSpec {
        kind: options.kind,
        labels: Some(labels),
        datasets: vec![dataset],
        x_axis: XAxis::Category,
        y_axis: YAxis {
            suggested_max: None,
            begin_at_zero: true,
        },
        title: options.title.clone(),
        show_legend: options.show_legend,
        show_values: false,
    }
}

/// Slice color: the point's own color, else the caller palette at `index`,
/// else the built-in palette cycled.
fn slice_color(point: &Value, index: usize, palette: &[String]) -> String {
    point
        .get("color")
        .and_then(|c| resolve_color(c, None))
        .or_else(|| palette.get(index).cloned())
        .unwrap_or_else(|| DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string())
}

fn build_cartesian(
    series: &[SeriesInput<'_>],
    primary: &SeriesInput<'_>,
    data: &[Value],
    options: &BuildOptions,
) -> ChartSpec {
    let kind = options.kind;
    let x_axis = if has_temporal_x(series) {
        let unit = match kind {
            ChartKind::Bar => TimeUnit::Day,
            _ => TimeUnit::Minute,
        };
        XAxis::Time { unit }
    } else {
        XAxis::Category
    };

    let labels = match x_axis {
        XAxis::Category => Some(
            primary
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| point_label(p, i))
                .collect::<Vec<_>>(),
        ),
        XAxis::Time { .. } => None,
    };

    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, s)| shape_series(s, i, x_axis, options))
        .collect();

    ChartSpec {
        kind,
        labels,
        datasets,
        x_axis,
        y_axis: YAxis {
            suggested_max: suggested_max(compute_max_y(data)),
            begin_at_zero: true,
        },
        title: options.title.clone(),
        show_legend: options.show_legend,
        show_values: options.show_values && kind == ChartKind::Bar,
    }
}

/// Series color: palette entry, else single color, else gradient (needs a
/// known chart area, else its flat top color), else the built-in palette.
fn series_paint(index: usize, options: &BuildOptions) -> Paint {
    if let Some(c) = options.colors.get(index) {
        return Paint::Solid(c.clone());
    }
    if let Some(c) = &options.color {
        return Paint::Solid(c.clone());
    }
    if let Some(g) = &options.gradient {
        return match &options.chart_area {
            Some(area) => Paint::Gradient(vertical_gradient(area, &g.from, &g.to)),
            None => Paint::Solid(g.to.clone()),
        };
    }
    Paint::Solid(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string())
}

fn shape_series(
    series: &SeriesInput<'_>,
    index: usize,
    x_axis: XAxis,
    options: &BuildOptions,
) -> Dataset {
    let kind = options.kind;
    let data = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Point {
            x: match x_axis {
                XAxis::Time { .. } => p.get("x").cloned().unwrap_or(Value::Null),
                XAxis::Category => Value::String(point_label(p, i)),
            },
            y: point_value(p),
            r: match kind {
                ChartKind::Bubble => Some(
                    p.get("r")
                        .and_then(as_number)
                        .unwrap_or(options.point_radius.max(1.0)),
                ),
                _ => None,
            },
        })
        .collect();

    let paint = series_paint(index, options);
    let label = if series.label.is_empty() {
        format!("Series {}", index + 1)
    } else {
        series.label.clone()
    };

    Dataset {
        label,
        data,
        border_color: SeriesColor::Uniform(paint.clone()),
        background_color: SeriesColor::Uniform(paint),
        fill: options.fill,
        border_width: options.line_width,
        point_radius: if options.show_points {
            options.point_radius
        } else {
            0.0
        },
        point_style: options.point_style,
        border_dash: options.line_dash.pattern(),
        tension: if options.smooth { LINE_TENSION } else { 0.0 },
        interpolation: Interpolation::Monotone,
        // Scatter never connects its points.
        show_line: kind != ChartKind::Scatter,
        bar: (kind == ChartKind::Bar).then_some(BarGeometry {
            max_bar_thickness: options.bar.max_thickness,
            category_percentage: options.bar.category_percentage,
            bar_percentage: options.bar.bar_percentage,
            border_radius: options.bar.radius,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ChartArea;
    use crate::style::LineDash;
    use serde_json::json;

    fn arr(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap_or_default()
    }

    fn ready(view: ChartView) -> ChartSpec {
        match view {
            ChartView::Ready(spec) => spec,
            ChartView::NoData => panic!("expected a chart"),
        }
    }

    fn opts(kind: ChartKind) -> BuildOptions {
        BuildOptions {
            kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert_eq!(build_chart(&[], &opts(ChartKind::Bar)), ChartView::NoData);
        let empty_series = arr(json!([{"label": "A", "data": []}]));
        assert_eq!(build_chart(&empty_series, &opts(ChartKind::Line)), ChartView::NoData);
    }

    #[test]
    fn test_leading_empty_series_is_skipped() {
        let data = arr(json!([
            {"label": "A", "data": []},
            {"label": "B", "data": [{"label": "x", "y": 3}, {"label": "z", "y": 4}]}
        ]));

        let pie = ready(build_chart(&data, &opts(ChartKind::Pie)));
        assert_eq!(pie.datasets[0].label, "B");
        assert_eq!(pie.datasets[0].data.len(), 2);
        assert_eq!(pie.labels, Some(vec!["x".to_string(), "z".to_string()]));

        let bar = ready(build_chart(&data, &opts(ChartKind::Bar)));
        assert_eq!(bar.labels, Some(vec!["x".to_string(), "z".to_string()]));
        assert_eq!(bar.datasets.len(), 2);
    }

    #[test]
    fn test_time_axis_units() {
        let data = arr(json!([{"x": "2024-01-01T00:00", "y": 1}]));
        let line = ready(build_chart(&data, &opts(ChartKind::Line)));
        assert_eq!(line.x_axis, XAxis::Time { unit: TimeUnit::Minute });
        assert_eq!(line.labels, None);
        assert_eq!(line.datasets[0].data[0].x, json!("2024-01-01T00:00"));
        let bar = ready(build_chart(&data, &opts(ChartKind::Bar)));
        assert_eq!(bar.x_axis, XAxis::Time { unit: TimeUnit::Day });
    }

    #[test]
    fn test_category_axis_uses_raw_labels() {
        let data = arr(json!([{"x": "machine-1", "y": 1}, {"x": "machine-2", "y": 2}]));
        let spec = ready(build_chart(&data, &opts(ChartKind::Bar)));
        assert_eq!(spec.x_axis, XAxis::Category);
        assert_eq!(spec.labels, Some(vec!["machine-1".to_string(), "machine-2".to_string()]));
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].label, "Series 1");
    }

    #[test]
    fn test_suggested_max_headroom() {
        let data = arr(json!([{"x": "a", "y": 10}, {"x": "b", "y": 20}]));
        let spec = ready(build_chart(&data, &opts(ChartKind::Bar)));
        assert!((spec.y_axis.suggested_max.unwrap() - 23.0).abs() < 1e-9);

        let zeros = arr(json!([{"x": "a", "y": 0}]));
        let spec = ready(build_chart(&zeros, &opts(ChartKind::Bar)));
        assert_eq!(spec.y_axis.suggested_max, None);
    }

    #[test]
    fn test_pie_palette_wraps_around() {
        let data: Vec<Value> = (0..12).map(|i| json!({"label": format!("s{}", i), "y": i + 1})).collect();
        let spec = ready(build_chart(&data, &opts(ChartKind::Pie)));
        let SeriesColor::PerPoint(colors) = &spec.datasets[0].background_color else {
            panic!("pie slices carry per-point colors");
        };
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[11], colors[1]);
        assert_eq!(colors[10], colors[0]);
        assert_eq!(colors[0], DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_pie_color_precedence() {
        let data = arr(json!([
            {"label": "a", "value": 1, "color": {"hex": "#010101"}},
            {"label": "b", "value": 2},
            {"label": "c", "value": 3}
        ]));
        let options = BuildOptions {
            kind: ChartKind::Doughnut,
            colors: vec!["#aa0000".into(), "#bb0000".into()],
            ..Default::default()
        };
        let spec = ready(build_chart(&data, &options));
        let SeriesColor::PerPoint(colors) = &spec.datasets[0].background_color else {
            panic!("doughnut slices carry per-point colors");
        };
        assert_eq!(colors, &vec!["#010101".to_string(), "#bb0000".into(), DEFAULT_PALETTE[2].into()]);
        assert_eq!(spec.datasets[0].data[1].y, Some(2.0));
        assert_eq!(spec.labels.as_ref().unwrap()[2], "c");
    }

    #[test]
    fn test_bubble_radius() {
        let data = arr(json!([{"x": 1, "y": 2, "r": 9}, {"x": 2, "y": 3}]));
        let spec = ready(build_chart(&data, &opts(ChartKind::Bubble)));
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].data[0].r, Some(9.0));
        assert_eq!(spec.datasets[0].data[1].r, Some(3.0));
    }

    #[test]
    fn test_series_color_precedence() {
        let area = ChartArea { left: 0.0, top: 10.0, right: 100.0, bottom: 90.0 };
        let mut options = BuildOptions {
            kind: ChartKind::Line,
            colors: vec!["#111111".into()],
            color: Some("#222222".into()),
            gradient: Some(GradientOptions { from: "#000".into(), to: "#fff".into() }),
            ..Default::default()
        };
        assert_eq!(series_paint(0, &options), Paint::Solid("#111111".into()));
        assert_eq!(series_paint(1, &options), Paint::Solid("#222222".into()));
        options.color = None;
        assert_eq!(series_paint(1, &options), Paint::Solid("#fff".into()));
        options.chart_area = Some(area);
        assert!(matches!(series_paint(1, &options), Paint::Gradient(_)));
        options.gradient = None;
        assert_eq!(series_paint(3, &options), Paint::Solid(DEFAULT_PALETTE[3].into()));
    }

    #[test]
    fn test_line_attributes() {
        let data = arr(json!([{"x": "a", "y": 1}]));
        let options = BuildOptions {
            kind: ChartKind::Line,
            show_points: false,
            line_dash: LineDash::Dashed,
            fill: true,
            ..Default::default()
        };
        let ds = &ready(build_chart(&data, &options)).datasets[0];
        assert_eq!(ds.point_radius, 0.0);
        assert_eq!(ds.border_dash, vec![6.0, 4.0]);
        assert!(ds.fill);
        assert!(ds.show_line);
        assert_eq!(ds.tension, LINE_TENSION);
        assert_eq!(ds.interpolation, Interpolation::Monotone);
        assert_eq!(ds.bar, None);
    }

    #[test]
    fn test_scatter_never_draws_line() {
        let data = arr(json!([{"x": 1, "y": 1}, {"x": 2, "y": 4}]));
        let spec = ready(build_chart(&data, &opts(ChartKind::Scatter)));
        assert!(!spec.datasets[0].show_line);
        assert_eq!(spec.datasets[0].point_radius, 3.0);
    }

    #[test]
    fn test_bar_geometry() {
        let data = arr(json!([{"x": "a", "y": 1}]));
        let options = BuildOptions {
            show_values: true,
            ..opts(ChartKind::Bar)
        };
        let spec = ready(build_chart(&data, &options));
        assert!(spec.show_values);
        let bar = spec.datasets[0].bar.unwrap();
        assert_eq!(bar.max_bar_thickness, 48);
        assert_eq!(bar.category_percentage, 0.8);
    }

    #[test]
    fn test_malformed_points_keep_positions() {
        let data = arr(json!([{"x": "a", "y": 1}, {"x": "b", "y": "n/a"}, {"x": "c", "y": 3}]));
        let spec = ready(build_chart(&data, &opts(ChartKind::Line)));
        let ys: Vec<_> = spec.datasets[0].data.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_chart_view_serialization() {
        assert_eq!(serde_json::to_value(ChartView::NoData).unwrap(), json!({"status": "no_data"}));
    }
}
