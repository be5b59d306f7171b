//! Post-render passes over a drawn chart: bar value labels and click mapping.
//!
//! The renderer owns geometry. It is reached through [`RenderedChart`] so
//! these passes stay independent of any drawing backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ChartKind, ChartSpec, series_of};

/// Vertical gap between a bar's top edge and its value label, in pixels.
pub const VALUE_LABEL_OFFSET: f64 = 4.0;

/// Pointer position in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Address of one drawn element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub dataset_index: usize,
    pub index: usize,
}

/// A drawn bar: horizontal center and top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarElement {
    pub index: usize,
    pub x: f64,
    pub top: f64,
}

/// What the passes need from a drawn chart.
pub trait RenderedChart {
    /// Hidden series (toggled off in the legend) report `false`.
    fn is_dataset_visible(&self, dataset_index: usize) -> bool;

    fn bar_elements(&self, dataset_index: usize) -> Vec<BarElement>;

    /// Element nearest to the pointer, if any is in range.
    fn nearest_element(&self, pointer: Pointer) -> Option<ElementRef>;
}

/// Text to draw centered at `(x, y)`, baseline at the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Value labels for every visible bar, one decimal each.
///
/// Empty unless the chart is a bar chart with value labels switched on.
pub fn value_labels(spec: &ChartSpec, chart: &dyn RenderedChart) -> Vec<ValueLabel> {
    if spec.kind != ChartKind::Bar || !spec.show_values {
        return Vec::new();
    }

    let mut labels = Vec::new();
    for (dataset_index, dataset) in spec.datasets.iter().enumerate() {
        if !chart.is_dataset_visible(dataset_index) {
            continue;
        }
        for bar in chart.bar_elements(dataset_index) {
            let Some(value) = dataset
                .data
                .get(bar.index)
                .and_then(|p| p.y)
                .filter(|v| v.is_finite())
            else {
                continue;
            };
            labels.push(ValueLabel {
                text: format!("{:.1}", value),
                x: bar.x,
                y: bar.top - VALUE_LABEL_OFFSET,
            });
        }
    }
    labels
}

/// Map a click back to the caller's input record under the pointer.
///
/// Returns the original record, never the derived point.
pub fn resolve_click<'a>(
    data: &'a [Value],
    chart: &dyn RenderedChart,
    pointer: Pointer,
) -> Option<&'a Value> {
    let element = chart.nearest_element(pointer)?;
    let series = series_of(data);
    let record = series
        .get(element.dataset_index)?
        .points
        .get(element.index)
        .copied();
    if record.is_none() {
        tracing::debug!(
            dataset = element.dataset_index,
            index = element.index,
            "clicked element has no input record"
        );
    }
    record
}
