// ==========================================
// Test helpers
// ==========================================
// Responsibility: in-memory uploads, reference data, reading workbooks back
// ==========================================

#![allow(dead_code)]

use aid_registry::domain::{Area, Gender, Guardian, LookupTable, ResidenceStatus};
use aid_registry::exporter::{Sheet, Workbook};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::error::Error;
use std::io::Cursor;
use tempfile::NamedTempFile;

/// Temporary sqlite file (keep the NamedTempFile alive)
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("non-utf8 temp path")?
        .to_string();
    Ok((temp_file, db_path))
}

/// Single-sheet .xlsx with text cells; first row is the header row
pub fn upload(rows: &[&[&str]]) -> Vec<u8> {
    let mut sheet = Sheet::new("بيانات");
    for row in rows {
        sheet.push_text_row(row);
    }
    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet);
    workbook.render().expect("render upload")
}

pub fn guardian(national_id: &str, name: &str, phone: &str, area_id: &str) -> Guardian {
    Guardian {
        name: name.to_string(),
        national_id: national_id.to_string(),
        phone: phone.to_string(),
        gender: Gender::Male,
        wives_count: 1,
        children_count: 2,
        family_members_count: 4,
        residence_status: ResidenceStatus::Resident,
        area_id: area_id.to_string(),
        address: String::new(),
    }
}

pub fn areas() -> Vec<Area> {
    vec![Area::new("a1", "الشمال"), Area::new("a2", "الوسط")]
}

/// Guardian 400 "X" (phone, area a1) and 0401 "Y" (no phone, area a2)
pub fn lookup() -> LookupTable {
    LookupTable::new(
        vec![
            guardian("400", "X", "0599111111", "a1"),
            guardian("0401", "Y", "", "a2"),
        ],
        areas(),
    )
}

/// Cells of sheet `name` as text, header row included
pub fn read_sheet(bytes: &[u8], name: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).expect("open workbook");
    let range = workbook.worksheet_range(name).expect("sheet exists");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    Data::Bool(b) => b.to_string(),
                    other => format!("{:?}", other),
                })
                .collect()
        })
        .collect()
}

pub fn sheet_names(bytes: &[u8]) -> Vec<String> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .expect("open workbook")
        .sheet_names()
}
