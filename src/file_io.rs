// ==========================================
// Aid Registry - file I/O adapter
// ==========================================
// Responsibility: bytes in (upload), bytes out (generated workbook)
// The only async boundary of the import/export core.
// ==========================================

use crate::exporter::workbook::Workbook;
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::file_parser::is_supported_extension;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const XLSX_EXTENSION: &str = "xlsx";

/// Read an uploaded spreadsheet into memory
///
/// # Errors
/// - UnsupportedFormat: extension is not .xlsx / .xls
/// - FileNotFound / FileReadError
pub async fn read_upload(path: &Path) -> ImporterResult<Vec<u8>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !is_supported_extension(ext) {
        return Err(ImportError::UnsupportedFormat(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
        _ => ImportError::FileReadError(format!("{}: {}", path.display(), e)),
    })?;

    debug!(path = %path.display(), size = bytes.len(), "upload read");
    Ok(bytes)
}

/// `name` with `.xlsx` appended unless it already ends with it
pub fn with_xlsx_extension(name: &str) -> String {
    let has_ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(XLSX_EXTENSION))
        .unwrap_or(false);

    if has_ext {
        name.to_string()
    } else {
        format!("{}.{}", name, XLSX_EXTENSION)
    }
}

/// Render `workbook` and write it to `dir/<file_name>.xlsx`
///
/// # Returns
/// - Ok(PathBuf): path of the written file
pub async fn write_workbook(dir: &Path, file_name: &str, workbook: &Workbook) -> ImporterResult<PathBuf> {
    let bytes = workbook.render()?;
    let path = dir.join(with_xlsx_extension(file_name));

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), size = bytes.len(), sheets = workbook.sheets.len(), "workbook written");
    Ok(path)
}
