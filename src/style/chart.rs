//! Chart style: everything the chart renderer needs besides the data.

use serde::{Deserialize, Serialize};

use crate::color::Color;

use super::common::{Align, FontStyle};

/// Chart palette used when a style does not define one.
pub const DEFAULT_STYLE_PALETTE: [&str; 12] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc", "#2f4554", "#61a0a8", "#d48265",
];

/// The two chart kinds a report style can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
}

choice_enum!(ChartType {
    Bar => "bar",
    Line => "line",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

choice_enum!(LegendPosition {
    Top => "top",
    Bottom => "bottom",
    Left => "left",
    Right => "right",
});

/// Marker shape drawn at each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PointStyle {
    #[default]
    Circle,
    Rect,
    RectRounded,
    Triangle,
    Cross,
    Star,
}

choice_enum!(PointStyle {
    Circle => "circle",
    Rect => "rect",
    RectRounded => "rect_rounded",
    Triangle => "triangle",
    Cross => "cross",
    Star => "star",
});

/// Named stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

choice_enum!(LineDash {
    Solid => "solid",
    Dashed => "dashed",
    Dotted => "dotted",
});

impl LineDash {
    /// Dash segments for the renderer. Empty means a continuous stroke.
    pub fn pattern(&self) -> Vec<f64> {
        match self {
            LineDash::Solid => Vec::new(),
            LineDash::Dashed => vec![6.0, 4.0],
            LineDash::Dotted => vec![2.0, 2.0],
        }
    }
}

/// How series colors are picked from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PaletteMode {
    /// Single color for one series, the color list for several.
    #[default]
    Auto,
    Single,
    Multi,
}

choice_enum!(PaletteMode {
    Auto => "auto",
    Single => "single",
    Multi => "multi",
});

// ============================================================================
// BLOCKS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    pub show: bool,
    pub text: String,
    pub font_size: u32,
    pub align: Align,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            show: true,
            text: String::new(),
            font_size: 16,
            align: Align::Center,
        }
    }
}

overlay_fields!(TitleStyle { show, text, font_size, align });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendStyle {
    pub show: bool,
    pub position: LegendPosition,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Top,
        }
    }
}

overlay_fields!(LegendStyle { show, position });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    pub title: TitleStyle,
    pub legend: LegendStyle,
}

overlay_fields!(LayoutStyle { title, legend });

/// One axis. `rotation` is the tick label angle in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub label: String,
    pub rotation: f64,
    pub tick_font_size: u32,
    pub show_grid: bool,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            label: String::new(),
            rotation: 0.0,
            tick_font_size: 11,
            show_grid: true,
        }
    }
}

overlay_fields!(AxisStyle { label, rotation, tick_font_size, show_grid });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesStyle {
    pub x: AxisStyle,
    pub y: AxisStyle,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            x: AxisStyle {
                show_grid: false,
                ..Default::default()
            },
            y: AxisStyle::default(),
        }
    }
}

overlay_fields!(AxesStyle { x, y });

/// Bar series settings. `width` is the maximum bar thickness in pixels and
/// `gap` the share of each category left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub width: u32,
    pub gap: f64,
    pub radius: u32,
    pub show_values: bool,
    pub precision: u32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            width: 48,
            gap: 0.2,
            radius: 4,
            show_values: false,
            precision: 1,
        }
    }
}

overlay_fields!(BarStyle { width, gap, radius, show_values, precision });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub width: f64,
    pub smooth: bool,
    pub show_points: bool,
    pub point_radius: f64,
    pub point_style: PointStyle,
    pub dash: LineDash,
    pub fill: bool,
    pub precision: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            smooth: true,
            show_points: true,
            point_radius: 3.0,
            point_style: PointStyle::Circle,
            dash: LineDash::Solid,
            fill: false,
            precision: 1,
        }
    }
}

overlay_fields!(LineStyle {
    width,
    smooth,
    show_points,
    point_radius,
    point_style,
    dash,
    fill,
    precision,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientStyle {
    pub enabled: bool,
    pub from: Color,
    pub to: Color,
}

impl Default for GradientStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            from: Color::from("#dbe7ff"),
            to: Color::from("#5470c6"),
        }
    }
}

overlay_fields!(GradientStyle { enabled, from, to });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteStyle {
    pub mode: PaletteMode,
    pub color: Color,
    pub colors: Vec<Color>,
    pub gradient: GradientStyle,
}

impl Default for PaletteStyle {
    fn default() -> Self {
        Self {
            mode: PaletteMode::Auto,
            color: Color::from(DEFAULT_STYLE_PALETTE[0]),
            colors: DEFAULT_STYLE_PALETTE.iter().map(|c| Color::from(*c)).collect(),
            gradient: GradientStyle::default(),
        }
    }
}

overlay_fields!(PaletteStyle { mode, color, colors, gradient });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkStyle {
    pub enabled: bool,
    pub text: String,
    pub color: Color,
    pub opacity: f64,
    pub font_size: u32,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            text: String::new(),
            color: Color::from("#000000"),
            opacity: 0.08,
            font_size: 48,
        }
    }
}

overlay_fields!(WatermarkStyle { enabled, text, color, opacity, font_size });

// ============================================================================
// CHART STYLE
// ============================================================================

/// Complete chart style.
///
/// ## Example (JSON)
///
/// ```json
/// {
///   "type": "line",
///   "dpi": 150,
///   "line": {"dash": "dashed", "show_points": false},
///   "palette": {"mode": "multi", "colors": ["#1f77b4", "#ff7f0e"]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub font: FontStyle,
    pub dpi: u32,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutStyle,
    pub axes: AxesStyle,
    pub bar: BarStyle,
    pub line: LineStyle,
    pub palette: PaletteStyle,
    pub background: Color,
    pub watermark: WatermarkStyle,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            kind: ChartType::Bar,
            font: FontStyle {
                family: "Inter".into(),
                size: 12,
                color: Color::from("#333333"),
                bold: false,
            },
            dpi: 100,
            width: 1200,
            height: 600,
            layout: LayoutStyle::default(),
            axes: AxesStyle::default(),
            bar: BarStyle::default(),
            line: LineStyle::default(),
            palette: PaletteStyle::default(),
            background: Color::from("#ffffff"),
            watermark: WatermarkStyle::default(),
        }
    }
}

overlay_fields!(ChartStyle {
    kind => "type",
    font,
    dpi,
    width,
    height,
    layout,
    axes,
    bar,
    line,
    palette,
    background,
    watermark,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Overlay;
    use serde_json::json;

    #[test]
    fn test_unknown_type_falls_back_to_bar() {
        let mut style = ChartStyle {
            kind: ChartType::Line,
            ..Default::default()
        };
        style.overlay(&json!({"type": "pie"}));
        assert_eq!(style.kind, ChartType::Bar);
        style.overlay(&json!({"type": "line"}));
        assert_eq!(style.kind, ChartType::Line);
    }

    #[test]
    fn test_dash_patterns() {
        assert!(LineDash::Solid.pattern().is_empty());
        assert_eq!(LineDash::Dashed.pattern(), vec![6.0, 4.0]);
        assert_eq!(LineDash::Dotted.pattern(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_serialized_type_key() {
        let value = serde_json::to_value(ChartStyle::default()).unwrap();
        assert_eq!(value["type"], json!("bar"));
        assert_eq!(value["line"]["point_style"], json!("circle"));
        assert_eq!(value["palette"]["colors"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_nested_overlay_keeps_siblings() {
        let mut style = ChartStyle::default();
        style.overlay(&json!({"axes": {"x": {"rotation": -45}}, "bar": {"show_values": true}}));
        assert_eq!(style.axes.x.rotation, -45.0);
        assert_eq!(style.axes.x.tick_font_size, 11);
        assert!(!style.axes.x.show_grid);
        assert!(style.bar.show_values);
        assert_eq!(style.bar.width, 48);
    }

    #[test]
    fn test_deserialize_partial_fills_defaults() {
        let style: ChartStyle = serde_json::from_value(json!({"type": "area", "dpi": 200})).unwrap();
        assert_eq!(style.kind, ChartType::Bar);
        assert_eq!(style.dpi, 200);
        assert_eq!(style.palette, PaletteStyle::default());
    }
}
