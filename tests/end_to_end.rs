//! # End-to-End Tests
//!
//! Raw style payloads and report rows in, renderer-ready output out.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use tincture::chart::{
    BuildOptions, ChartKind, ChartView, DEFAULT_PALETTE, SeriesColor, XAxis, build_chart,
    compute_max_y,
};
use tincture::color::{Paint, resolve_color};
use tincture::merge::merge_deep;
use tincture::report::{ReportDataset, render_table, render_text, series_from_dataset};
use tincture::style::{self, ChartType, PaletteMode, StyleConfig};

fn shift_dataset() -> ReportDataset {
    ReportDataset::from_values(
        vec!["Timestamp".into(), "Seed".into(), "Husk".into()],
        json!([
            {"Timestamp": "2024-05-01 06:00", "Seed": 12.5, "Husk": 4},
            {"Timestamp": "2024-05-01 07:00", "Seed": 15, "Husk": 5.5}
        ])
        .as_array()
        .unwrap(),
    )
}

#[test]
fn test_timestamp_seed_husk_chart() {
    let dataset = shift_dataset();
    let series = series_from_dataset(&dataset);
    let options = BuildOptions::from_style(&StyleConfig::default().chart, series.len());

    let ChartView::Ready(chart) = build_chart(&series, &options) else {
        panic!("two rows must produce a chart");
    };

    let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Seed", "Husk"]);
    assert!(chart.datasets.iter().all(|d| d.data.len() == 2));
    assert!(matches!(chart.x_axis, XAxis::Time { .. }));

    let max = compute_max_y(&series);
    assert_eq!(max, 15.0);
    let suggested = chart.y_axis.suggested_max.unwrap();
    assert!((suggested - 15.0 * 1.15).abs() < 1e-9);
}

#[test]
fn test_two_series_use_style_palette() {
    let series = series_from_dataset(&shift_dataset());
    let style = StyleConfig::default();
    assert_eq!(style.chart.palette.mode, PaletteMode::Auto);
    let options = BuildOptions::from_style(&style.chart, series.len());
    let chart = build_chart(&series, &options);
    let spec = chart.spec().unwrap();

    let colors: Vec<&str> = spec
        .datasets
        .iter()
        .map(|d| match &d.border_color {
            SeriesColor::Uniform(paint) => paint.primary_color(),
            SeriesColor::PerPoint(_) => panic!("line/bar series use one paint"),
        })
        .collect();
    assert_eq!(colors[0], style.chart.palette.colors[0].as_str());
    assert_eq!(colors[1], style.chart.palette.colors[1].as_str());
}

#[test]
fn test_legacy_payload_reaches_the_chart() {
    let raw = json!({
        "data": {
            "ChartStyle": "{\"chartType\": \"line\", \"colors\": [{\"hex\": \"#123456\"}], \"showLegend\": false}",
            "TableStyle": {"striped": false},
            "StyleName": "Packing line"
        }
    });
    let resolved = style::resolve(Some(&raw));
    assert_eq!(resolved.chart.kind, ChartType::Line);
    assert!(!resolved.chart.layout.legend.show);
    assert!(!resolved.table.zebra.enabled);

    let mut options = BuildOptions::from_style(&resolved.chart, 2);
    options.kind = ChartKind::Line;
    let chart = build_chart(&series_from_dataset(&shift_dataset()), &options);
    let spec = chart.spec().unwrap();
    assert!(!spec.show_legend);
    assert_eq!(
        spec.datasets[0].border_color,
        SeriesColor::Uniform(Paint::Solid("#123456".into()))
    );
    // The legacy palette has one color, so the second series falls back.
    assert_eq!(
        spec.datasets[1].border_color,
        SeriesColor::Uniform(Paint::Solid(DEFAULT_PALETTE[1].into()))
    );
}

#[test]
fn test_malformed_leaves_keep_defaults() {
    let raw = json!({
        "chart": {
            "width": "wide",
            "bar": {"radius": -3, "gap": "big"},
            "palette": {"colors": "red", "color": {}},
            "line": {"dash": "wavy"},
            "bogus": true
        },
        "table": [1, 2, 3]
    });
    let resolved = style::resolve(Some(&raw));
    let defaults = StyleConfig::default();
    assert_eq!(resolved.chart.width, defaults.chart.width);
    assert_eq!(resolved.chart.bar, defaults.chart.bar);
    assert_eq!(resolved.chart.palette, defaults.chart.palette);
    assert_eq!(resolved.chart.line.dash, defaults.chart.line.dash);
    assert_eq!(resolved.table, defaults.table);
}

#[test]
fn test_resolve_properties() {
    let defaults = StyleConfig::default().to_value();
    assert_eq!(merge_deep(defaults.clone(), &json!({})), defaults);

    let merged = merge_deep(json!({"colors": ["a", "b", "c"]}), &json!({"colors": ["x"]}));
    assert_eq!(merged, json!({"colors": ["x"]}));

    let partial = json!({"chart": {"type": "line", "layout": {"title": {"text": "Hourly"}}}});
    let once = style::resolve(Some(&partial));
    let twice = style::resolve(Some(&once.to_value()));
    assert_eq!(once, twice);
    assert_eq!(once.to_value(), merge_deep(defaults, &partial));
}

#[test]
fn test_color_resolution_examples() {
    assert_eq!(resolve_color(&Value::Null, Some("#FFFFFF")).as_deref(), Some("#FFFFFF"));
    assert_eq!(resolve_color(&json!({"hex": "#112233"}), None).as_deref(), Some("#112233"));
    assert_eq!(resolve_color(&json!({}), None), None);
}

#[test]
fn test_pie_cycles_default_palette() {
    let slices: Vec<Value> = (0..12)
        .map(|i| json!({"label": format!("Zone {}", i), "value": 10 + i}))
        .collect();
    let options = BuildOptions {
        kind: ChartKind::Pie,
        ..Default::default()
    };
    let ChartView::Ready(chart) = build_chart(&slices, &options) else {
        panic!("twelve slices must produce a chart");
    };
    let SeriesColor::PerPoint(colors) = &chart.datasets[0].background_color else {
        panic!("pie uses per-slice colors");
    };
    assert_eq!(colors[11], colors[1]);
}

#[test]
fn test_empty_rows_are_no_data() {
    let empty = ReportDataset::from_values(vec!["Timestamp".into(), "Seed".into()], &[]);
    let series = series_from_dataset(&empty);
    assert_eq!(build_chart(&series, &BuildOptions::default()), ChartView::NoData);
}

#[test]
fn test_table_and_text_share_number_format() {
    let resolved = style::resolve(Some(&json!({
        "table": {"number": {"precision": 1}, "totals": {"show": true}},
        "text": {"number": {"precision": 1}}
    })));
    let dataset = shift_dataset();

    let table = render_table(&dataset, &resolved.table);
    let totals = table.totals.unwrap();
    assert_eq!(totals.cells[1].text, "27.5");
    assert_eq!(totals.cells[2].text, "9.5");

    let text = render_text(&dataset, &resolved.text);
    assert!(text.lines().nth(1).unwrap().ends_with("4.0"));
}
