// ==========================================
// Aid Registry - core library
// ==========================================
// Spreadsheet import / validation / export for a beneficiary registry
// (guardians, aids, damages, injured). Stack: Rust + SQLite.
// ==========================================

// Domain - entities and vocabularies
pub mod domain;

// Import - spreadsheet rows to validated records
pub mod importer;

// Export - templates, data exports, issue reports
pub mod exporter;

// Byte boundary (uploads in, workbooks out)
pub mod file_io;

// Settings
pub mod config;

// Storage
pub mod repository;

// SQLite connection setup / schema
pub mod db;

// Logging
pub mod logging;

// Facade for the UI
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    Aid, Area, CellValue, Damage, DamageType, EntityKind, Gender, Guardian, ImportResult,
    ImportSummary, Injured, InjuryType, IssueLevel, LookupTable, RawRow, ResidenceStatus,
    ValidationIssue,
};

pub use importer::{
    import_kind, EntityImporter, ImportError, ImportedRecords, ImporterResult,
};

pub use exporter::{build_error_report, build_export, build_template, build_warning_report, Workbook};

pub use config::{ConfigManager, ImportConfig, ImportConfigReader};

pub use repository::{BeneficiaryRepository, BeneficiaryRepositoryImpl};

pub use api::{ApiError, ImportApi, ImportApiResponse};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "سجل المستفيدين";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
