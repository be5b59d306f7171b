//! Build options: the slice of a resolved style the dataset builder reads.

use serde::{Deserialize, Serialize};

use crate::color::ChartArea;
use crate::style::{ChartStyle, ChartType, LineDash, PaletteMode, PointStyle};

use super::ChartKind;

/// Bar geometry controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarOptions {
    pub max_thickness: u32,
    pub category_percentage: f64,
    pub bar_percentage: f64,
    pub radius: u32,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            max_thickness: 48,
            category_percentage: 0.8,
            bar_percentage: 0.9,
            radius: 0,
        }
    }
}

/// Two-stop vertical gradient, bottom color first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientOptions {
    pub from: String,
    pub to: String,
}

/// Everything `build_chart` needs besides the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub kind: ChartKind,
    /// Explicit palette, indexed by series (or slice) position.
    pub colors: Vec<String>,
    /// Single configured color, used when the palette has no entry.
    pub color: Option<String>,
    pub gradient: Option<GradientOptions>,
    /// Plot area from a previous layout pass; gradients need it.
    pub chart_area: Option<ChartArea>,
    pub fill: bool,
    pub show_points: bool,
    pub point_radius: f64,
    pub point_style: PointStyle,
    pub line_dash: LineDash,
    pub line_width: f64,
    pub smooth: bool,
    pub bar: BarOptions,
    /// Draw the value-label overlay on bar charts.
    pub show_values: bool,
    pub title: Option<String>,
    pub show_legend: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            colors: Vec::new(),
            color: None,
            gradient: None,
            chart_area: None,
            fill: false,
            show_points: true,
            point_radius: 3.0,
            point_style: PointStyle::Circle,
            line_dash: LineDash::Solid,
            line_width: 2.0,
            smooth: true,
            bar: BarOptions::default(),
            show_values: false,
            title: None,
            show_legend: true,
        }
    }
}

impl BuildOptions {
    /// Derive options from a resolved chart style.
    ///
    /// Palette mode `auto` uses the single color for one series and the
    /// color list for more. An enabled gradient takes over from both.
    pub fn from_style(style: &ChartStyle, series_count: usize) -> Self {
        let palette = &style.palette;
        let multi = match palette.mode {
            PaletteMode::Multi => true,
            PaletteMode::Single => false,
            PaletteMode::Auto => series_count > 1,
        };

        let (colors, color, gradient) = if palette.gradient.enabled {
            let gradient = GradientOptions {
                from: palette.gradient.from.to_string(),
                to: palette.gradient.to.to_string(),
            };
            (Vec::new(), None, Some(gradient))
        } else if multi {
            let colors = palette.colors.iter().map(|c| c.to_string()).collect();
            (colors, None, None)
        } else {
            (Vec::new(), Some(palette.color.to_string()), None)
        };

        let title = &style.layout.title;
        Self {
            kind: match style.kind {
                ChartType::Bar => ChartKind::Bar,
                ChartType::Line => ChartKind::Line,
            },
            colors,
            color,
            gradient,
            chart_area: None,
            fill: style.line.fill,
            show_points: style.line.show_points,
            point_radius: style.line.point_radius,
            point_style: style.line.point_style,
            line_dash: style.line.dash,
            line_width: style.line.width,
            smooth: style.line.smooth,
            bar: BarOptions {
                max_thickness: style.bar.width,
                category_percentage: (1.0 - style.bar.gap).clamp(0.1, 1.0),
                bar_percentage: 0.9,
                radius: style.bar.radius,
            },
            show_values: style.bar.show_values,
            title: (title.show && !title.text.is_empty()).then(|| title.text.clone()),
            show_legend: style.layout.legend.show,
        }
    }

    pub fn with_chart_area(mut self, area: ChartArea) -> Self {
        self.chart_area = Some(area);
        self
    }
}
