//! Building blocks shared by the table, spreadsheet and text styles.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Horizontal alignment of cell or line content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

choice_enum!(Align {
    Left => "left",
    Center => "center",
    Right => "right",
});

/// Font descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub family: String,
    pub size: u32,
    pub color: Color,
    pub bold: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: "Arial".into(),
            size: 11,
            color: Color::from("#1f1f1f"),
            bold: false,
        }
    }
}

overlay_fields!(FontStyle { family, size, color, bold });

/// Colors and alignment of a band of cells (header or body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub background: Color,
    pub color: Color,
    pub bold: bool,
    pub align: Align,
}

impl CellStyle {
    pub fn header() -> Self {
        Self {
            background: Color::from("#1f4e79"),
            color: Color::from("#ffffff"),
            bold: true,
            align: Align::Center,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: Color::from("#ffffff"),
            color: Color::from("#1f1f1f"),
            bold: false,
            align: Align::Left,
        }
    }
}

overlay_fields!(CellStyle { background, color, bold, align });

/// Alternate row shading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZebraStyle {
    pub enabled: bool,
    pub color: Color,
}

impl Default for ZebraStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::from("#f2f6fa"),
        }
    }
}

overlay_fields!(ZebraStyle { enabled, color });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub show: bool,
    pub color: Color,
    pub width: u32,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            show: true,
            color: Color::from("#d0d7de"),
            width: 1,
        }
    }
}

overlay_fields!(BorderStyle { show, color, width });

// ============================================================================
// NUMBER FORMAT
// ============================================================================

/// Number rendering with configurable separators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub precision: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            precision: 2,
        }
    }
}

overlay_fields!(NumberFormat {
    thousands_separator,
    decimal_separator,
    precision,
});

impl NumberFormat {
    /// Format `value` with the configured precision and separators.
    ///
    /// Non-finite values render as an empty string. Values that round to
    /// zero never carry a minus sign.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let precision = self.precision.min(12) as usize;
        let fixed = format!("{:.*}", precision, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::new();
        let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum WidthMode {
    /// Fit content, capped at `max`.
    #[default]
    Auto,
    /// Every column gets `width`.
    Fixed,
}

choice_enum!(WidthMode {
    Auto => "auto",
    Fixed => "fixed",
});

/// Column width policy. Units are characters for spreadsheets, pixels for tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidth {
    pub mode: WidthMode,
    pub width: u32,
    pub max: u32,
}

impl ColumnWidth {
    /// Width for a column whose longest rendered cell is `content` units.
    pub fn resolve(&self, content: u32) -> u32 {
        match self.mode {
            WidthMode::Fixed => self.width,
            WidthMode::Auto => content.max(self.width.min(self.max)).min(self.max),
        }
    }
}

impl Default for ColumnWidth {
    fn default() -> Self {
        Self {
            mode: WidthMode::Auto,
            width: 12,
            max: 60,
        }
    }
}

overlay_fields!(ColumnWidth { mode, width, max });

/// Summary row appended below the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalsRow {
    pub show: bool,
    pub label: String,
    pub bold: bool,
}

impl Default for TotalsRow {
    fn default() -> Self {
        Self {
            show: false,
            label: "Total".into(),
            bold: true,
        }
    }
}

overlay_fields!(TotalsRow { show, label, bold });
