// ==========================================
// Aid Registry - import pipeline data model
// ==========================================
// RawRow / ValidationIssue live for one import call only.
// ImportResult is handed to the caller and not touched afterwards.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - raw spreadsheet cell
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellValue {
    /// String representation handed to validators.
    ///
    /// Integral numbers print without a fractional part so that an id typed
    /// as a number reads back as `400`, not `400.0`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(dt) => dt.date().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// RawRow - one data row keyed by header text
// ==========================================
// Keeps the sheet's column order; header lookup is exact after trim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Row number as a spreadsheet application shows it (header = 1)
    pub row_number: usize,
    pub cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<(String, CellValue)>) -> Self {
        Self { row_number, cells }
    }

    /// Build a row of text cells, handy for callers that already hold strings
    pub fn from_pairs(row_number: usize, pairs: &[(&str, &str)]) -> Self {
        Self {
            row_number,
            cells: pairs
                .iter()
                .map(|(h, v)| (h.to_string(), CellValue::Text(v.to_string())))
                .collect(),
        }
    }

    pub fn with_cell(mut self, header: &str, value: CellValue) -> Self {
        self.cells.push((header.to_string(), value));
        self
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}

// ==========================================
// ValidationIssue - row-level error or warning
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// `text` cut to `max` characters, with a trailing ellipsis when cut
pub fn clip_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

// ==========================================
// RowOutcome - result of validating one row
// ==========================================
// Invariant: record.is_some() <=> errors.is_empty()
#[derive(Debug, Clone)]
pub struct RowOutcome<R> {
    pub record: Option<R>,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl<R> RowOutcome<R> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// ImportSummary - per-call counters
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_rows: usize,
    pub valid: usize,
    pub error_rows: usize,   // rows with >= 1 error, counted once
    pub warning_rows: usize, // rows with >= 1 warning
}

// ==========================================
// ImportResult - aggregated output of one import call
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult<R> {
    pub valid_records: Vec<R>,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub summary: ImportSummary,
}

impl<R> Default for ImportResult<R> {
    fn default() -> Self {
        Self {
            valid_records: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            summary: ImportSummary::default(),
        }
    }
}

impl<R> ImportResult<R> {
    /// Append one row outcome, preserving input order
    pub fn push(&mut self, outcome: RowOutcome<R>) {
        self.summary.total_rows += 1;
        let valid = outcome.is_valid();
        if !outcome.warnings.is_empty() {
            self.summary.warning_rows += 1;
        }

        match outcome.record {
            Some(record) if valid => {
                self.summary.valid += 1;
                self.valid_records.push(record);
            }
            _ => {
                self.summary.error_rows += 1;
            }
        }

        self.errors.extend(outcome.errors);
        self.warnings.extend(outcome.warnings);
    }

}
