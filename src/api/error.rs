// ==========================================
// Aid Registry - API error type
// ==========================================
// Responsibility: turn repository / importer failures into messages a
// user can act on
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer error
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== input =====
    #[error("مدخلات غير صالحة: {0}")]
    InvalidInput(String),

    #[error("غير موجود: {0}")]
    NotFound(String),

    // ===== data access =====
    #[error("خطأ في قاعدة البيانات: {0}")]
    DatabaseError(String),

    #[error("تعذر الاتصال بقاعدة البيانات: {0}")]
    DatabaseConnectionError(String),

    #[error("فشل تنفيذ المعاملة: {0}")]
    DatabaseTransactionError(String),

    // ===== import / export =====
    /// Structural failure: the whole import is aborted
    #[error("فشل الاستيراد: {0}")]
    ImportError(String),

    #[error("فشل إنشاء الملف: {0}")]
    ExportError(String),

    #[error("خطأ في الإعدادات: {0}")]
    ConfigError(String),

    // ===== generic =====
    #[error("خطأ داخلي: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => ApiError::DatabaseTransactionError(msg),
            RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::SerializationError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("{}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::WorkbookWriteError(_) | ImportError::FileWriteError(_) => {
                ApiError::ExportError(err.to_string())
            }
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            _ => ApiError::ImportError(err.to_string()),
        }
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_import_failure_keeps_message() {
        let err: ApiError = ImportError::EmptyWorkbook.into();
        assert!(matches!(err, ApiError::ImportError(_)));
        assert!(err.to_string().contains("ورقة"));
    }

    #[test]
    fn test_repository_conversion() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseConnectionError(_)));
    }
}
