// ==========================================
// Aid Registry - output workbook model
// ==========================================
// Workbooks are built as plain data first (testable without bytes),
// then rendered to .xlsx in one place.
// ==========================================

use crate::domain::import::CellValue;
use crate::importer::error::{ImportError, ImporterResult};
use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook, Worksheet};

const HEADER_BACKGROUND: u32 = 0x4472C4;

/// Excel's per-cell text limit
pub const MAX_CELL_CHARS: usize = 32_767;

// ==========================================
// Sheet
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
    pub column_widths: Vec<f64>,
    pub right_to_left: bool,
    /// Render the first row as a styled header
    pub header_row: bool,
}

impl Sheet {
    /// Right-to-left sheet with a styled first row
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            right_to_left: true,
            header_row: true,
        }
    }

    pub fn with_column_widths(mut self, widths: Vec<f64>) -> Self {
        self.column_widths = widths;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header_row = false;
        self
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn push_text_row(&mut self, values: &[&str]) {
        self.rows
            .push(values.iter().map(|v| CellValue::from(*v)).collect());
    }

    /// First row as text (empty when the sheet has no rows)
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.as_text()).collect())
            .unwrap_or_default()
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        match (self.header_row, self.rows.split_first()) {
            (true, Some((_, rest))) => rest,
            _ => &self.rows,
        }
    }
}

// ==========================================
// Workbook
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Render to .xlsx bytes
    pub fn render(&self) -> ImporterResult<Vec<u8>> {
        let mut workbook = XlsxWorkbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_BACKGROUND))
            .set_font_color(Color::White);

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            render_sheet(worksheet, sheet, &header_format)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn render_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header_format: &Format) -> ImporterResult<()> {
    worksheet.set_name(&sheet.name)?;
    worksheet.set_right_to_left(sheet.right_to_left);

    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(column_index(col)?, *width)?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = u32::try_from(r)
            .map_err(|_| ImportError::WorkbookWriteError(format!("too many rows in {}", sheet.name)))?;
        let is_header = sheet.header_row && r == 0;

        for (c, cell) in row.iter().enumerate() {
            let c = column_index(c)?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) if is_header => {
                    worksheet.write_string_with_format(r, c, s, header_format)?;
                }
                // ids and phones are written as text so leading zeros survive
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                CellValue::Date(_) => {
                    worksheet.write_string(r, c, cell.as_text())?;
                }
            }
        }
    }
    Ok(())
}

fn column_index(col: usize) -> ImporterResult<u16> {
    u16::try_from(col).map_err(|_| ImportError::WorkbookWriteError(format!("column {} out of range", col)))
}
