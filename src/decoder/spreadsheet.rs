use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Datelike, Timelike};

use crate::decoder::{DecodeResult, Decoder};
use crate::engine::{AnalyzeWarning, WarningCode};
use crate::error::AnalyzeError;

/// Decodes workbook formats by taking the first column of the first sheet.
pub struct SpreadsheetDecoder;

/// Format a calamine cell value as display text.
///
/// Whole-number floats display as integers (e.g. `3.0` → `"3"`).
/// Booleans display as `TRUE` / `FALSE`. Empty cells produce an empty string.
/// DateTime cells are formatted as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
/// Error cells (e.g. `#DIV/0!`) produce an empty string and emit a warning,
/// so a broken formula never masquerades as a name.
fn format_cell(cell: &Data, location: &str, warnings: &mut Vec<AnalyzeWarning>) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::DateTime(dt) => {
            if let Some(ndt) = dt.as_datetime() {
                let (h, m, s) = (ndt.hour(), ndt.minute(), ndt.second());
                if h == 0 && m == 0 && s == 0 {
                    format!("{:04}-{:02}-{:02}", ndt.year(), ndt.month(), ndt.day())
                } else {
                    format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        ndt.year(),
                        ndt.month(),
                        ndt.day(),
                        h,
                        m,
                        s
                    )
                }
            } else {
                format!("{dt}")
            }
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => {
            warnings.push(AnalyzeWarning {
                code: WarningCode::MalformedSegment,
                message: format!("cell contains error: {e}"),
                location: Some(location.to_string()),
            });
            String::new()
        }
    }
}

impl Decoder for SpreadsheetDecoder {
    fn supported_extensions(&self) -> &[&str] {
        &["xlsx", "xls", "ods"]
    }

    fn decode(&self, data: &[u8]) -> Result<DecodeResult, AnalyzeError> {
        let cursor = Cursor::new(data);
        let mut workbook = open_workbook_auto_from_rs(cursor)?;

        // Names live in the first column of the first sheet; other sheets
        // are ignored, matching the upload contract.
        let sheet_names = workbook.sheet_names().to_owned();
        let Some(first_sheet) = sheet_names.first() else {
            return Ok(DecodeResult::default());
        };

        let mut warnings = Vec::new();
        let range = match workbook.worksheet_range(first_sheet) {
            Ok(r) => r,
            Err(e) => {
                warnings.push(AnalyzeWarning {
                    code: WarningCode::SkippedElement,
                    message: format!("failed to read sheet '{first_sheet}': {e}"),
                    location: Some(first_sheet.clone()),
                });
                return Ok(DecodeResult {
                    content: String::new(),
                    warnings,
                });
            }
        };

        let mut names = Vec::new();
        for (ri, row) in range.rows().enumerate() {
            let Some(cell) = row.first() else { continue };
            let loc = format!("{}!A{}", first_sheet, ri + 1);
            let text = format_cell(cell, &loc, &mut warnings);
            if !text.trim().is_empty() {
                names.push(text);
            }
        }

        Ok(DecodeResult {
            content: names.join("\n"),
            warnings,
        })
    }
}
