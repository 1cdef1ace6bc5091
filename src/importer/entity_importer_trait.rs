// ==========================================
// Aid Registry - importer traits
// ==========================================
// Responsibility: import interfaces only (no implementation)
// Pipeline: parse → validate (rule engine) → duplicate check → aggregate
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::LookupTable;
use crate::domain::import::{ImportResult, RawRow};
use crate::importer::error::ImporterResult;
use crate::importer::rule_engine::CheckedRow;
use crate::importer::schema::EntitySchema;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// EntityImporter Trait
// ==========================================
// Implementor: EntityImporterImpl<V>
#[async_trait]
pub trait EntityImporter: Send + Sync {
    type Record: Send;

    /// Import the first sheet of a spreadsheet file
    ///
    /// # Arguments
    /// - file_path: .xlsx / .xls
    /// - lookup: known guardians and areas (read only)
    ///
    /// # Returns
    /// - Ok(ImportResult): valid records plus row-level errors / warnings
    /// - Err: structural failure (unreadable file, no sheet, no rows)
    async fn import_from_file(
        &self,
        file_path: &Path,
        lookup: &LookupTable,
    ) -> ImporterResult<ImportResult<Self::Record>>;

    /// Same as `import_from_file` for an upload already in memory
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        lookup: &LookupTable,
    ) -> ImporterResult<ImportResult<Self::Record>>;

    /// Validate rows that were already parsed
    fn import_rows(&self, rows: Vec<RawRow>, lookup: &LookupTable) -> ImportResult<Self::Record>;
}

// ==========================================
// FileParser Trait
// ==========================================
// Implementor: ExcelParser
pub trait FileParser: Send + Sync {
    /// Parse the first sheet into data rows keyed by header
    ///
    /// # Returns
    /// - Ok(Vec<RawRow>): non-blank data rows, in sheet order
    /// - Err: unreadable binary, no sheet, no data row
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<RawRow>>;
}

// ==========================================
// EntityValidator Trait
// ==========================================
// One implementor per importable entity. The column checks live in the
// schema; implementors only turn a clean row into a record.
pub trait EntityValidator: Send + Sync {
    type Record: Clone + Send + Sync;

    /// Column rule table (also the template header contract)
    fn schema(&self) -> &'static EntitySchema;

    /// Build the record of a row without errors
    ///
    /// None only if the row is inconsistent with its own checks.
    fn assemble(&self, row: &CheckedRow<'_>, config: &ImportConfig) -> Option<Self::Record>;

    /// Key that must be unique inside one file
    fn duplicate_key<'r>(&self, _record: &'r Self::Record) -> Option<&'r str> {
        None
    }
}
