// ==========================================
// Aid Registry - entity importer
// ==========================================
// Responsibility: drive one import call from bytes to ImportResult
// Flow: read → parse first sheet → validate rows → duplicate check → aggregate
// Red line: row problems never become Err; only structural ones do
// ==========================================

use crate::config::{ImportConfig, ImportConfigReader};
use crate::domain::beneficiary::{Aid, Damage, Guardian, Injured, LookupTable};
use crate::domain::import::{ImportResult, RawRow, ValidationIssue};
use crate::domain::types::EntityKind;
use crate::file_io::read_upload;
use crate::importer::conflict_handler::{duplicate_message, DuplicateTracker};
use crate::importer::entity_importer_trait::{EntityImporter, EntityValidator, FileParser};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::file_parser::ExcelParser;
use crate::importer::rule_engine::RuleEngine;
use crate::importer::schema::FieldKey;
use crate::importer::validators::{AidValidator, DamageValidator, GuardianValidator, InjuredValidator};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, error, info, instrument};

// ==========================================
// EntityImporterImpl
// ==========================================
pub struct EntityImporterImpl<V>
where
    V: EntityValidator,
{
    validator: V,
    engine: RuleEngine,
    file_parser: Box<dyn FileParser>,
}

pub type GuardianImporter = EntityImporterImpl<GuardianValidator>;
pub type AidImporter = EntityImporterImpl<AidValidator>;
pub type DamageImporter = EntityImporterImpl<DamageValidator>;
pub type InjuredImporter = EntityImporterImpl<InjuredValidator>;

impl<V> EntityImporterImpl<V>
where
    V: EntityValidator,
{
    /// # Arguments
    /// - validator: entity record assembly
    /// - config: importer defaults (date window, gender, counts, labels)
    /// - file_parser: workbook reader
    pub fn new(validator: V, config: ImportConfig, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            validator,
            engine: RuleEngine::new(config),
            file_parser,
        }
    }

    /// Excel parser with the given settings
    pub fn with_config(validator: V, config: ImportConfig) -> Self {
        Self::new(validator, config, Box::new(ExcelParser))
    }

    /// Settings read from a config source
    pub async fn from_reader<C>(validator: V, reader: &C) -> ImporterResult<Self>
    where
        C: ImportConfigReader + ?Sized,
    {
        let config = reader
            .load_import_config()
            .await
            .map_err(|e| ImportError::InternalError(format!("config load failed: {}", e)))?;
        Ok(Self::with_config(validator, config))
    }

    pub fn kind(&self) -> EntityKind {
        self.validator.schema().kind
    }

    pub fn config(&self) -> &ImportConfig {
        self.engine.config()
    }
}

#[async_trait]
impl<V> EntityImporter for EntityImporterImpl<V>
where
    V: EntityValidator,
{
    type Record = V::Record;

    #[instrument(skip(self, file_path, lookup), fields(entity = %self.kind()))]
    async fn import_from_file(
        &self,
        file_path: &Path,
        lookup: &LookupTable,
    ) -> ImporterResult<ImportResult<V::Record>> {
        info!(file_path = %file_path.display(), "import started");
        let bytes = read_upload(file_path).await.map_err(|e| {
            error!(error = %e, "upload read failed");
            e
        })?;
        self.import_from_bytes(&bytes, lookup).await
    }

    #[instrument(skip(self, bytes, lookup), fields(entity = %self.kind(), size = bytes.len()))]
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        lookup: &LookupTable,
    ) -> ImporterResult<ImportResult<V::Record>> {
        // === stage 1: parse ===
        debug!("stage 1: parse first sheet");
        let rows = self.file_parser.parse_bytes(bytes).map_err(|e| {
            error!(error = %e, "workbook parse failed");
            e
        })?;
        info!(total_rows = rows.len(), "workbook parsed");

        // === stage 2..4: validate / dedupe / aggregate ===
        Ok(self.import_rows(rows, lookup))
    }

    fn import_rows(&self, rows: Vec<RawRow>, lookup: &LookupTable) -> ImportResult<V::Record> {
        let mut result = ImportResult::default();
        let mut tracker = DuplicateTracker::new();
        let key_field = self.validator.schema().header_of(FieldKey::NationalId);

        for row in &rows {
            let mut outcome = self.engine.validate(&self.validator, row, lookup);

            if let Some(record) = &outcome.record {
                if let Some(key) = self.validator.duplicate_key(record) {
                    if let Some(first_row) = tracker.register(key, row.row_number) {
                        outcome.errors.push(ValidationIssue::new(
                            row.row_number,
                            key_field,
                            duplicate_message(key, first_row),
                        ));
                    }
                }
            }
            if !outcome.errors.is_empty() {
                outcome.record = None;
            }

            result.push(outcome);
        }

        info!(
            entity = %self.kind(),
            total_rows = result.summary.total_rows,
            valid = result.summary.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "rows validated"
        );
        result
    }
}

// ==========================================
// Convenience constructors (default settings)
// ==========================================
pub fn guardian_importer(config: ImportConfig) -> GuardianImporter {
    EntityImporterImpl::with_config(GuardianValidator, config)
}

pub fn aid_importer(config: ImportConfig) -> AidImporter {
    EntityImporterImpl::with_config(AidValidator, config)
}

pub fn damage_importer(config: ImportConfig) -> DamageImporter {
    EntityImporterImpl::with_config(DamageValidator, config)
}

pub fn injured_importer(config: ImportConfig) -> InjuredImporter {
    EntityImporterImpl::with_config(InjuredValidator, config)
}

/// Records produced by each importer (for callers that switch on kind)
#[derive(Debug, Clone)]
pub enum ImportedRecords {
    Guardians(ImportResult<Guardian>),
    Aids(ImportResult<Aid>),
    Damages(ImportResult<Damage>),
    Injured(ImportResult<Injured>),
}

impl ImportedRecords {
    pub fn kind(&self) -> EntityKind {
        match self {
            ImportedRecords::Guardians(_) => EntityKind::Guardians,
            ImportedRecords::Aids(_) => EntityKind::Aids,
            ImportedRecords::Damages(_) => EntityKind::Damages,
            ImportedRecords::Injured(_) => EntityKind::Injured,
        }
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        match self {
            ImportedRecords::Guardians(r) => &r.errors,
            ImportedRecords::Aids(r) => &r.errors,
            ImportedRecords::Damages(r) => &r.errors,
            ImportedRecords::Injured(r) => &r.errors,
        }
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        match self {
            ImportedRecords::Guardians(r) => &r.warnings,
            ImportedRecords::Aids(r) => &r.warnings,
            ImportedRecords::Damages(r) => &r.warnings,
            ImportedRecords::Injured(r) => &r.warnings,
        }
    }

    pub fn summary(&self) -> crate::domain::import::ImportSummary {
        match self {
            ImportedRecords::Guardians(r) => r.summary,
            ImportedRecords::Aids(r) => r.summary,
            ImportedRecords::Damages(r) => r.summary,
            ImportedRecords::Injured(r) => r.summary,
        }
    }
}

/// Import `bytes` with the importer matching `kind`
///
/// # Errors
/// - InternalError: `kind` has no importer (areas)
pub async fn import_kind(
    kind: EntityKind,
    bytes: &[u8],
    lookup: &LookupTable,
    config: ImportConfig,
) -> ImporterResult<ImportedRecords> {
    Ok(match kind {
        EntityKind::Guardians => {
            ImportedRecords::Guardians(guardian_importer(config).import_from_bytes(bytes, lookup).await?)
        }
        EntityKind::Aids => {
            ImportedRecords::Aids(aid_importer(config).import_from_bytes(bytes, lookup).await?)
        }
        EntityKind::Damages => {
            ImportedRecords::Damages(damage_importer(config).import_from_bytes(bytes, lookup).await?)
        }
        EntityKind::Injured => {
            ImportedRecords::Injured(injured_importer(config).import_from_bytes(bytes, lookup).await?)
        }
        EntityKind::Areas => {
            return Err(ImportError::InternalError(format!(
                "no importer for {}",
                kind.storage_key()
            )))
        }
    })
}
