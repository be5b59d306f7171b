//! # Color Resolution
//!
//! Style payloads carry colors in several shapes: a plain string, a
//! structured picker value with RGBA channels, or an object holding the color
//! under `value`, `hex` or `color`. Everything downstream (chart builder,
//! exporters, the HTTP API) only ever sees plain strings, so every color leaf
//! passes through [`to_color_string`] on its way in.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tincture::color::{ColorValue, to_color_string};
//!
//! let picked = ColorValue::from_json(&json!({"r": 17, "g": 34, "b": 51}));
//! assert_eq!(to_color_string(&picked, None).as_deref(), Some("#112233"));
//!
//! let missing = ColorValue::from_json(&json!(null));
//! assert_eq!(to_color_string(&missing, Some("#FFFFFF")).as_deref(), Some("#FFFFFF"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Field names probed on object-shaped colors, in priority order.
const COLOR_FIELDS: [&str; 3] = ["value", "hex", "color"];

// ============================================================================
// PICKER VALUE
// ============================================================================

/// Failure converting a picker value to hex.
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("channel {channel} out of range: {value}")]
    ChannelOutOfRange { channel: &'static str, value: f64 },
}

fn default_alpha() -> f64 {
    1.0
}

/// Structured color-picker value: RGB channels in `0..=255`, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Hex accessor. `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex_string(&self) -> Result<String, ColorError> {
        let r = channel("r", self.r, 255.0)?;
        let g = channel("g", self.g, 255.0)?;
        let b = channel("b", self.b, 255.0)?;
        let a = channel("a", self.a, 1.0)?;
        if a < 1.0 {
            let alpha = (a * 255.0).round() as u8;
            Ok(format!("#{:02x}{:02x}{:02x}{:02x}", r as u8, g as u8, b as u8, alpha))
        } else {
            Ok(format!("#{:02x}{:02x}{:02x}", r as u8, g as u8, b as u8))
        }
    }
}

fn channel(name: &'static str, value: f64, max: f64) -> Result<f64, ColorError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(if max > 1.0 { value.round() } else { value })
    } else {
        Err(ColorError::ChannelOutOfRange {
            channel: name,
            value,
        })
    }
}

// ============================================================================
// COLOR VALUE
// ============================================================================

/// Every color representation accepted at the editing boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// Plain color string (`#hex`, `rgb(...)`, named color).
    Text(String),
    /// Picker value with a fallible hex accessor.
    Picker(Rgba),
    /// Object carrying the color in one of its named string fields.
    Fields {
        value: Option<String>,
        hex: Option<String>,
        color: Option<String>,
    },
    /// Absent or unrecognized.
    Other,
}

impl ColorValue {
    /// Classify an arbitrary JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => ColorValue::Text(s.clone()),
            Value::Object(map) => {
                let has_channels = ["r", "g", "b"]
                    .iter()
                    .all(|k| map.get(*k).is_some_and(Value::is_number));
                if has_channels {
                    if let Ok(rgba) = Rgba::deserialize(value) {
                        return ColorValue::Picker(rgba);
                    }
                }
                let field = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);
                let [value, hex, color] = COLOR_FIELDS.map(field);
                if value.is_none() && hex.is_none() && color.is_none() {
                    ColorValue::Other
                } else {
                    ColorValue::Fields { value, hex, color }
                }
            }
            _ => ColorValue::Other,
        }
    }
}

/// Resolve any color representation to a plain string.
///
/// Empty strings, failing picker accessors and unknown shapes all yield
/// `fallback` (which may itself be `None`).
pub fn to_color_string(value: &ColorValue, fallback: Option<&str>) -> Option<String> {
    let fallback = || fallback.map(str::to_string);
    match value {
        ColorValue::Text(s) if !s.is_empty() => Some(s.clone()),
        ColorValue::Text(_) => fallback(),
        ColorValue::Picker(rgba) => match rgba.to_hex_string() {
            Ok(hex) => Some(hex),
            Err(e) => {
                tracing::debug!(error = %e, "picker color rejected, using fallback");
                fallback()
            }
        },
        ColorValue::Fields { value, hex, color } => [value, hex, color]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .or_else(fallback),
        ColorValue::Other => fallback(),
    }
}

/// Shorthand for resolving a raw JSON value.
pub fn resolve_color(value: &Value, fallback: Option<&str>) -> Option<String> {
    to_color_string(&ColorValue::from_json(value), fallback)
}

// ============================================================================
// COLOR LEAF
// ============================================================================

/// A resolved color leaf in a style tree. Always a plain string.
///
/// Deserializes from any [`ColorValue`] shape and serializes as the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        resolve_color(&raw, None)
            .map(Color)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color: {}", raw)))
    }
}

// ============================================================================
// GRADIENTS
// ============================================================================

/// Plot area of an already laid-out chart, in pixels.
///
/// Unknown on the very first render; gradients need it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

/// Linear gradient from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<GradientStop>,
}

/// Vertical gradient running bottom → top across the chart area.
pub fn vertical_gradient(area: &ChartArea, bottom: &str, top: &str) -> LinearGradient {
    LinearGradient {
        x0: area.left,
        y0: area.bottom,
        x1: area.left,
        y1: area.top,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: bottom.to_string(),
            },
            GradientStop {
                offset: 1.0,
                color: top.to_string(),
            },
        ],
    }
}

/// Fill or stroke paint: a flat color or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    Gradient(LinearGradient),
}

impl Paint {
    /// The flat color, or the top stop of a gradient.
    pub fn primary_color(&self) -> &str {
        match self {
            Paint::Solid(c) => c,
            Paint::Gradient(g) => g.stops.last().map(|s| s.color.as_str()).unwrap_or(""),
        }
    }
}
