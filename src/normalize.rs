//! # Style Normalization
//!
//! Persisted styles have drifted over time. The same sub-config may arrive
//! under `chart` or `ChartStyle`, as an object or as a JSON-encoded string,
//! wrapped in a `data` envelope, with camelCase keys or with fields from the
//! flat legacy chart layout. [`normalize_style_response`] absorbs all of
//! that and hands the merge step one object per section.
//!
//! Normalization never fails. The worst case is an empty object per section,
//! which the merge step fills from defaults.
//!
//! ## Adapters
//!
//! Each known legacy shape is one pure function over a section object,
//! applied in order. New shapes are added to the adapter lists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Section keys in lookup priority order: primary first, then legacy names.
const CHART_KEYS: &[&str] = &["chart", "ChartStyle", "chart_style", "chartStyle"];
const TABLE_KEYS: &[&str] = &["table", "TableStyle", "table_style", "tableStyle"];
const EXCEL_KEYS: &[&str] = &["excel", "ExcelStyle", "excel_style", "excelStyle"];
const TEXT_KEYS: &[&str] = &["text", "TextStyle", "text_style", "textStyle"];

/// Candidate fields for the display name.
const NAME_KEYS: &[&str] = &["styleName", "style_name", "StyleName", "name"];

/// Envelope fields some endpoints wrap the style in.
const ENVELOPE_KEYS: &[&str] = &["data", "style"];

type Adapter = fn(&mut Map<String, Value>);

const CHART_ADAPTERS: &[Adapter] = &[snake_case_keys, chart_legacy_fields];
const TABLE_ADAPTERS: &[Adapter] = &[snake_case_keys, table_legacy_fields];
const TEXT_ADAPTERS: &[Adapter] = &[snake_case_keys];

/// Canonical per-section payloads. Every section is a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStyle {
    pub chart: Value,
    pub table: Value,
    pub excel: Value,
    pub text: Value,
    pub style_name: String,
}

impl Default for NormalizedStyle {
    fn default() -> Self {
        Self {
            chart: empty(),
            table: empty(),
            excel: empty(),
            text: empty(),
            style_name: String::new(),
        }
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}

/// Normalize any persisted or backend style payload.
///
/// ```
/// use serde_json::json;
/// use tincture::normalize::normalize_style_response;
///
/// let n = normalize_style_response(&json!({
///     "ChartStyle": "{\"chartType\": \"line\"}",
///     "table": "{broken",
///     "name": "Shift report"
/// }));
/// assert_eq!(n.chart, json!({"type": "line"}));
/// assert_eq!(n.table, json!({}));
/// assert_eq!(n.excel, json!({}));
/// assert_eq!(n.style_name, "Shift report");
/// ```
pub fn normalize_style_response(raw: &Value) -> NormalizedStyle {
    let outer = decode_embedded(raw);
    let Some(outer) = outer.as_object() else {
        tracing::debug!("style payload is not an object, using empty sections");
        return NormalizedStyle::default();
    };
    let root = unwrap_envelope(outer);

    NormalizedStyle {
        chart: section(root, CHART_KEYS, CHART_ADAPTERS),
        table: section(root, TABLE_KEYS, TABLE_ADAPTERS),
        excel: section(root, EXCEL_KEYS, TABLE_ADAPTERS),
        text: section(root, TEXT_KEYS, TEXT_ADAPTERS),
        style_name: style_name(root).or_else(|| style_name(outer)).unwrap_or_default(),
    }
}

/// Parse a JSON-encoded string; other values pass through.
/// A string that does not parse yields `Null`.
fn decode_embedded(value: &Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "embedded style JSON did not parse");
            Value::Null
        }),
        other => other.clone(),
    }
}

fn has_section(map: &Map<String, Value>) -> bool {
    [CHART_KEYS, TABLE_KEYS, EXCEL_KEYS, TEXT_KEYS]
        .iter()
        .flat_map(|keys| keys.iter())
        .any(|k| map.contains_key(*k))
}

/// Descend into `data` / `style` envelopes until a level holds sections.
fn unwrap_envelope(map: &Map<String, Value>) -> &Map<String, Value> {
    let mut current = map;
    // Envelopes are at most a few levels deep in practice.
    for _ in 0..3 {
        if has_section(current) {
            break;
        }
        let inner = ENVELOPE_KEYS
            .iter()
            .find_map(|k| current.get(*k).and_then(Value::as_object));
        match inner {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Read one section: the first non-null candidate key wins.
fn section(root: &Map<String, Value>, keys: &[&str], adapters: &[Adapter]) -> Value {
    let Some((key, raw)) = keys
        .iter()
        .find_map(|k| root.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
    else {
        return empty();
    };

    match decode_embedded(raw) {
        Value::Object(mut map) => {
            for adapt in adapters {
                adapt(&mut map);
            }
            Value::Object(map)
        }
        other => {
            tracing::debug!(section = key, got = %other, "style section is not an object, treating as absent");
            empty()
        }
    }
}

fn style_name(map: &Map<String, Value>) -> Option<String> {
    NAME_KEYS
        .iter()
        .filter_map(|k| map.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

// ============================================================================
// ADAPTERS
// ============================================================================

/// `showValues` → `show_values`, recursively. Existing snake keys win.
pub fn snake_case_keys(map: &mut Map<String, Value>) {
    let entries = std::mem::take(map);
    let mut renamed = Vec::new();
    for (key, mut value) in entries {
        if let Value::Object(inner) = &mut value {
            snake_case_keys(inner);
        }
        let snake = to_snake_case(&key);
        if snake == key {
            map.insert(key, value);
        } else {
            renamed.push((snake, value));
        }
    }
    for (key, value) in renamed {
        map.entry(key).or_insert(value);
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Move `from` to the nested `path` unless the target is already set.
fn relocate(map: &mut Map<String, Value>, from: &str, path: &[&str]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let Some(value) = map.remove(from) else {
        return;
    };

    let mut target = map;
    for part in parents {
        let slot = target
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            tracing::debug!(key = from, "legacy field target is not an object, dropping");
            return;
        }
        let Value::Object(next) = slot else { return };
        target = next;
    }
    target.entry(last.to_string()).or_insert(value);
}

/// Flat chart layout used before palettes and layout blocks existed.
pub fn chart_legacy_fields(map: &mut Map<String, Value>) {
    relocate(map, "chart_type", &["type"]);
    relocate(map, "background_color", &["background"]);
    relocate(map, "colors", &["palette", "colors"]);
    relocate(map, "color", &["palette", "color"]);
    relocate(map, "show_legend", &["layout", "legend", "show"]);
    relocate(map, "legend_position", &["layout", "legend", "position"]);
    if map.get("title").is_some_and(Value::is_string) {
        relocate(map, "title", &["layout", "title", "text"]);
    }
}

/// Flat table/spreadsheet fields used before the nested blocks existed.
pub fn table_legacy_fields(map: &mut Map<String, Value>) {
    relocate(map, "striped", &["zebra", "enabled"]);
    if map.get("zebra").is_some_and(Value::is_boolean) {
        relocate(map, "zebra", &["zebra", "enabled"]);
    }
    relocate(map, "thousands_separator", &["number", "thousands_separator"]);
    relocate(map, "decimal_separator", &["number", "decimal_separator"]);
    relocate(map, "precision", &["number", "precision"]);
    relocate(map, "show_totals", &["totals", "show"]);
}
