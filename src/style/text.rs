//! Plain-text report style (e-mail bodies, chat messages).

use serde::{Deserialize, Serialize};

use super::common::{Align, FontStyle, NumberFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font: FontStyle,
    pub align: Align,
    pub line_height: f64,
    pub number: NumberFormat,
    /// Placed between columns of a row.
    pub separator: String,
    pub show_header: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontStyle {
                family: "monospace".into(),
                size: 12,
                ..Default::default()
            },
            align: Align::Left,
            line_height: 1.4,
            number: NumberFormat::default(),
            separator: " | ".into(),
            show_header: true,
        }
    }
}

overlay_fields!(TextStyle {
    font,
    align,
    line_height,
    number,
    separator,
    show_header,
});
