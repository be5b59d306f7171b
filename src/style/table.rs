//! Table and spreadsheet styles.
//!
//! Both renderers share the same cell vocabulary; the spreadsheet adds sheet
//! level switches (sheet name, frozen header, autofilter).

use serde::{Deserialize, Serialize};

use crate::color::Color;

use super::common::{BorderStyle, CellStyle, ColumnWidth, FontStyle, NumberFormat, TotalsRow, ZebraStyle};

/// Pixels per spreadsheet character unit when previewing a sheet on screen.
const CHAR_WIDTH_PX: u32 = 8;

/// On-screen / PDF table style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub font: FontStyle,
    pub header: CellStyle,
    pub body: CellStyle,
    pub zebra: ZebraStyle,
    pub border: BorderStyle,
    pub number: NumberFormat,
    pub column_width: ColumnWidth,
    pub totals: TotalsRow,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font: FontStyle {
                family: "Inter".into(),
                size: 12,
                ..Default::default()
            },
            header: CellStyle::header(),
            body: CellStyle::default(),
            zebra: ZebraStyle::default(),
            border: BorderStyle::default(),
            number: NumberFormat::default(),
            column_width: ColumnWidth {
                width: 96,
                max: 320,
                ..Default::default()
            },
            totals: TotalsRow::default(),
        }
    }
}

overlay_fields!(TableStyle {
    font,
    header,
    body,
    zebra,
    border,
    number,
    column_width,
    totals,
});

/// Spreadsheet export style. Column widths are in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelStyle {
    pub sheet_name: String,
    pub font: FontStyle,
    pub header: CellStyle,
    pub body: CellStyle,
    pub zebra: ZebraStyle,
    pub number: NumberFormat,
    pub column_width: ColumnWidth,
    pub totals: TotalsRow,
    pub freeze_header: bool,
    pub autofilter: bool,
}

impl ExcelStyle {
    /// Table style for an on-screen preview of the sheet.
    pub fn as_table_style(&self) -> TableStyle {
        TableStyle {
            font: self.font.clone(),
            header: self.header.clone(),
            body: self.body.clone(),
            zebra: self.zebra.clone(),
            border: BorderStyle::default(),
            number: self.number.clone(),
            column_width: ColumnWidth {
                mode: self.column_width.mode,
                width: self.column_width.width.saturating_mul(CHAR_WIDTH_PX),
                max: self.column_width.max.saturating_mul(CHAR_WIDTH_PX),
            },
            totals: self.totals.clone(),
        }
    }

    /// Spreadsheet number format code equivalent to [`NumberFormat`].
    ///
    /// Separators are locale-driven inside the spreadsheet; only grouping
    /// and precision carry over.
    pub fn number_format_code(&self) -> String {
        let grouping = if self.number.thousands_separator.is_empty() {
            "0"
        } else {
            "#,##0"
        };
        match self.number.precision {
            0 => grouping.to_string(),
            p => format!("{}.{}", grouping, "0".repeat(p.min(12) as usize)),
        }
    }
}

impl Default for ExcelStyle {
    fn default() -> Self {
        Self {
            sheet_name: "Report".into(),
            font: FontStyle {
                family: "Calibri".into(),
                size: 11,
                ..Default::default()
            },
            header: CellStyle {
                background: Color::from("#d9e1f2"),
                color: Color::from("#000000"),
                bold: true,
                ..CellStyle::header()
            },
            body: CellStyle::default(),
            zebra: ZebraStyle {
                enabled: false,
                ..Default::default()
            },
            number: NumberFormat::default(),
            column_width: ColumnWidth::default(),
            totals: TotalsRow::default(),
            freeze_header: true,
            autofilter: false,
        }
    }
}

overlay_fields!(ExcelStyle {
    sheet_name,
    font,
    header,
    body,
    zebra,
    number,
    column_width,
    totals,
    freeze_header,
    autofilter,
});
