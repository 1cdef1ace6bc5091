// ==========================================
// Aid Registry - spreadsheet parser
// ==========================================
// Stage 0: binary workbook → RawRow list
// Supports: .xlsx / .xls (format sniffed by calamine)
// ==========================================

use crate::domain::import::{CellValue, RawRow};
use crate::importer::entity_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImporterResult};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use tracing::debug;

/// Accepted upload extensions
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

// ==========================================
// ExcelParser
// ==========================================
// First sheet only. Its first row is the header row; blank data rows
// are skipped without shifting the row numbers of later rows.
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ImportError::EmptyWorkbook)?;

        let range = workbook.worksheet_range(&sheet_name)?;
        // absolute sheet position of the range's first row (0-based)
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptySheet(sheet_name.clone()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_to_value(cell).as_text().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let cells: Vec<(String, CellValue)> = data_row
                .iter()
                .zip(headers.iter())
                .filter(|(_, header)| !header.is_empty())
                .map(|(cell, header)| (header.clone(), cell_to_value(cell)))
                .collect();

            // header is at first_row, the first data row follows it; +1 for 1-based
            let raw = RawRow::new(first_row + idx + 2, cells);
            if raw.is_blank() {
                continue;
            }
            records.push(raw);
        }

        if records.is_empty() {
            return Err(ImportError::EmptySheet(sheet_name));
        }

        debug!(sheet = %sheet_name, columns = headers.len(), rows = records.len(), "sheet parsed");
        Ok(records)
    }
}

/// calamine cell → CellValue; date cells become dates, error cells become empty
pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // as_datetime honours the workbook's 1900/1904 date system
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(date) => CellValue::Date(date),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Lower-case extension check used before reading an upload
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}
