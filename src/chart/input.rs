//! Reading loosely shaped chart input.
//!
//! Input is either a flat list of points or a list of named series, each
//! holding its own point list. A point may be an object carrying `x`,
//! `y`/`value`, `label`, `r` and `color`, or a bare number.

use chrono::NaiveDate;
use serde_json::Value;

/// One series of raw points, borrowed from the caller's input.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput<'a> {
    pub label: String,
    pub points: Vec<&'a Value>,
}

/// True when the first element exposes a `data` field.
pub fn is_series_shape(data: &[Value]) -> bool {
    data.first()
        .and_then(Value::as_object)
        .is_some_and(|o| o.contains_key("data"))
}

/// Split input into series. Flat input becomes one unnamed series.
pub fn series_of(data: &[Value]) -> Vec<SeriesInput<'_>> {
    if !is_series_shape(data) {
        return vec![SeriesInput {
            label: String::new(),
            points: data.iter().collect(),
        }];
    }

    data.iter()
        .enumerate()
        .map(|(i, series)| {
            let label = ["label", "name"]
                .iter()
                .find_map(|k| series.get(*k).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| format!("Series {}", i + 1));
            let points = series
                .get("data")
                .and_then(Value::as_array)
                .map(|points| points.iter().collect())
                .unwrap_or_default();
            SeriesInput { label, points }
        })
        .collect()
}

/// Coerce a JSON scalar to a finite number. Numeric strings count.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Numeric value of a point: the first present of `y`, `value`, or the point
/// itself, coerced to a finite number.
pub fn point_value(point: &Value) -> Option<f64> {
    let source = ["y", "value"]
        .iter()
        .find_map(|k| point.get(*k).filter(|v| !v.is_null()))
        .unwrap_or(point);
    as_number(source)
}

/// Largest finite value across every point of every series; `0` when there
/// is none.
///
/// ```
/// use serde_json::json;
/// use tincture::chart::compute_max_y;
///
/// let data = json!([{"y": 1}, {"y": 5}, {"y": "bad"}]);
/// assert_eq!(compute_max_y(data.as_array().unwrap()), 5.0);
/// assert_eq!(compute_max_y(&[]), 0.0);
/// ```
pub fn compute_max_y(data: &[Value]) -> f64 {
    series_of(data)
        .iter()
        .flat_map(|s| s.points.iter())
        .filter_map(|p| point_value(p))
        .fold(0.0, f64::max)
}

/// Axis ceiling with 15% headroom, unset when nothing is above zero.
pub fn suggested_max(max_y: f64) -> Option<f64> {
    (max_y > 0.0).then(|| max_y * 1.15)
}

/// Whether `s` starts with a calendar date in `YYYY-MM-DD` form.
pub fn is_iso_date_prefix(s: &str) -> bool {
    s.get(..10)
        .is_some_and(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok())
}

/// Whether the first point of the first non-empty series has a date-like `x`.
pub fn has_temporal_x(series: &[SeriesInput<'_>]) -> bool {
    series
        .iter()
        .find_map(|s| s.points.first())
        .and_then(|p| p.get("x"))
        .and_then(Value::as_str)
        .is_some_and(is_iso_date_prefix)
}

/// Display label of a point: `label`, else `x`, else its 1-based position.
pub fn point_label(point: &Value, index: usize) -> String {
    for key in ["label", "x"] {
        match point.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    (index + 1).to_string()
}
