//! Workbook-to-CSV extraction using calamine

use crate::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::NaiveTime;
use docsift_domain::{DocumentFormat, ExtractedText};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Renders every sheet of a workbook as CSV, in workbook order
///
/// Sheets are separated by a single `\n`. The workbook type is picked from
/// the file extension, so staged files must keep theirs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    /// Create a new spreadsheet extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract all sheets synchronously
    pub fn extract_workbook(path: &Path) -> Result<ExtractedText, ExtractionError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ExtractionError::Spreadsheet(format!("Could not open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        debug!("Workbook has {} sheets: {:?}", sheet_names.len(), sheet_names);

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in &sheet_names {
            let range = workbook.worksheet_range(name).map_err(|e| {
                ExtractionError::Spreadsheet(format!("Could not read sheet '{}': {}", name, e))
            })?;
            sheets.push(render_csv(&range)?);
        }

        Ok(sheets.join("\n"))
    }
}

#[async_trait]
impl TextExtractor for SpreadsheetExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Spreadsheet
    }

    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_workbook(&path)).await?
    }
}

/// Render a sheet's used range as CSV with `\n` row terminators and no trailing newline
pub fn render_csv(range: &Range<Data>) -> Result<String, ExtractionError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in range.rows() {
        writer
            .write_record(row.iter().map(cell_text))
            .map_err(|e| ExtractionError::Spreadsheet(format!("CSV encoding failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExtractionError::Spreadsheet(format!("CSV encoding failed: {}", e)))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| ExtractionError::Spreadsheet(format!("CSV is not UTF-8: {}", e)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => format_datetime(dt),
        other => other.to_string(),
    }
}

/// Date cells print as `YYYY-MM-DD`, with a time only when one is set
///
/// Durations and serials outside chrono's range keep the raw serial.
fn format_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return format_number(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(value) if value.time() == NaiveTime::MIN => value.format("%Y-%m-%d").to_string(),
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format_number(dt.as_f64()),
    }
}

/// Whole floats print without a fractional part, as spreadsheets display them
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
