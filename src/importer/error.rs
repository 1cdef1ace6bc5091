// ==========================================
// Aid Registry - importer error type
// ==========================================
// Structural failures only. Row-level problems are ValidationIssue
// values inside ImportResult, never an Err.
// ==========================================

use thiserror::Error;

/// Structural import / export failure
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file =====
    #[error("الملف غير موجود: {0}")]
    FileNotFound(String),

    #[error("صيغة الملف غير مدعومة: {0} (المسموح: .xlsx / .xls)")]
    UnsupportedFormat(String),

    #[error("تعذر قراءة الملف: {0}")]
    FileReadError(String),

    // ===== workbook structure =====
    #[error("تعذر تحليل ملف Excel: {0}")]
    ExcelParseError(String),

    #[error("ملف Excel لا يحتوي على أي ورقة عمل")]
    EmptyWorkbook,

    #[error("ورقة العمل \"{0}\" لا تحتوي على بيانات")]
    EmptySheet(String),

    // ===== output =====
    #[error("تعذر إنشاء ملف Excel: {0}")]
    WorkbookWriteError(String),

    #[error("تعذر حفظ الملف: {0}")]
    FileWriteError(String),

    // ===== generic =====
    #[error("خطأ داخلي: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImportError::WorkbookWriteError(err.to_string())
    }
}

/// Result alias for the importer / exporter
pub type ImporterResult<T> = Result<T, ImportError>;
