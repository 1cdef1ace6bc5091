// ==========================================
// Aid Registry - import API
// ==========================================
// Responsibility: what the UI calls
// Flow: lookup table (store) → import → persist valid rows → reports
// The import core stays pure; only this facade touches the store.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfig, ImportConfigReader};
use crate::db::{ensure_schema, get_default_db_path, open_sqlite_connection};
use crate::domain::beneficiary::{Aid, Area, Damage, Guardian, Injured};
use crate::domain::import::{ImportSummary, ValidationIssue};
use crate::domain::types::EntityKind;
use crate::exporter::{build_error_report, build_export, build_template, build_warning_report, Workbook};
use crate::file_io::{read_upload, write_workbook};
use crate::importer::{import_kind, ImportedRecords};
use crate::repository::{BeneficiaryRepository, BeneficiaryRepositoryImpl};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};

/// Import response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResponse {
    pub entity: EntityKind,
    pub summary: ImportSummary,
    /// Records written to the store
    pub inserted: usize,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Rendered error report, only when there are errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_report: Option<Vec<u8>>,
    /// Rendered warning report, only when there are warnings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_report: Option<Vec<u8>>,
}

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi<R, C>
where
    R: BeneficiaryRepository,
    C: ImportConfigReader,
{
    repo: R,
    config: C,
}

impl ImportApi<BeneficiaryRepositoryImpl, ConfigManager> {
    /// Store and settings on one sqlite file
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let conn = Arc::new(Mutex::new(conn));

        let repo = BeneficiaryRepositoryImpl::from_connection(Arc::clone(&conn))?;
        let config = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(Self::new(repo, config))
    }

    /// `open` on `get_default_db_path()`
    pub fn open_default() -> ApiResult<Self> {
        Self::open(&get_default_db_path())
    }
}

impl<R, C> ImportApi<R, C>
where
    R: BeneficiaryRepository,
    C: ImportConfigReader,
{
    pub fn new(repo: R, config: C) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    async fn import_config(&self) -> ApiResult<ImportConfig> {
        self.config
            .load_import_config()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// Import a spreadsheet file and store its valid rows
    ///
    /// # Arguments
    /// - kind: guardians / aids / damages / injured
    /// - path: .xlsx / .xls file
    ///
    /// # Returns
    /// - Ok(ImportApiResponse): partial success is still Ok
    /// - Err(ApiError::ImportError): unreadable file, no sheet, no rows
    #[instrument(skip(self, path), fields(entity = %kind))]
    pub async fn import_file(&self, kind: EntityKind, path: &Path) -> ApiResult<ImportApiResponse> {
        let bytes = read_upload(path).await?;
        self.import_bytes(kind, &bytes).await
    }

    /// Same as `import_file` for an upload already in memory
    pub async fn import_bytes(&self, kind: EntityKind, bytes: &[u8]) -> ApiResult<ImportApiResponse> {
        if kind == EntityKind::Areas {
            return Err(ApiError::InvalidInput(format!("{} لا يدعم الاستيراد", kind.label())));
        }

        let lookup = self.repo.load_lookup_table().await?;
        let config = self.import_config().await?;
        let imported = import_kind(kind, bytes, &lookup, config).await?;

        let errors = imported.errors().to_vec();
        let warnings = imported.warnings().to_vec();
        let summary = imported.summary();

        // reports first: nothing is stored when they cannot be produced
        let error_report = render_if_any(&errors, build_error_report)?;
        let warning_report = render_if_any(&warnings, build_warning_report)?;

        let inserted = self.persist(imported).await?;

        if summary.error_rows > 0 {
            warn!(entity = %kind, error_rows = summary.error_rows, "rows excluded from import");
        }
        info!(entity = %kind, total_rows = summary.total_rows, inserted, "import finished");

        Ok(ImportApiResponse {
            entity: kind,
            summary,
            inserted,
            errors,
            warnings,
            error_report,
            warning_report,
        })
    }

    async fn persist(&self, imported: ImportedRecords) -> ApiResult<usize> {
        let inserted = match imported {
            ImportedRecords::Guardians(result) => {
                self.repo
                    .insert_records(EntityKind::Guardians, result.valid_records)
                    .await?
                    .len()
            }
            ImportedRecords::Aids(result) => {
                self.repo
                    .insert_records(EntityKind::Aids, result.valid_records)
                    .await?
                    .len()
            }
            ImportedRecords::Damages(result) => {
                self.repo
                    .insert_records(EntityKind::Damages, result.valid_records)
                    .await?
                    .len()
            }
            ImportedRecords::Injured(result) => {
                self.repo
                    .insert_records(EntityKind::Injured, result.valid_records)
                    .await?
                    .len()
            }
        };
        Ok(inserted)
    }

    /// Import template of `kind`, filled with the current reference data
    pub async fn template(&self, kind: EntityKind) -> ApiResult<Workbook> {
        let lookup = self.repo.load_lookup_table().await?;
        Ok(build_template(kind, &lookup)?)
    }

    /// Every stored record of `kind`, with template headers
    pub async fn export(&self, kind: EntityKind) -> ApiResult<Workbook> {
        let lookup = self.repo.load_lookup_table().await?;
        let workbook = match kind {
            EntityKind::Guardians => build_export(&self.records::<Guardian>(kind).await?, &lookup),
            EntityKind::Aids => build_export(&self.records::<Aid>(kind).await?, &lookup),
            EntityKind::Damages => build_export(&self.records::<Damage>(kind).await?, &lookup),
            EntityKind::Injured => build_export(&self.records::<Injured>(kind).await?, &lookup),
            EntityKind::Areas => {
                return Err(ApiError::InvalidInput(format!("{} لا يدعم التصدير", kind.label())))
            }
        };
        Ok(workbook)
    }

    async fn records<T>(&self, kind: EntityKind) -> ApiResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        Ok(self
            .repo
            .list_records::<T>(kind)
            .await?
            .into_iter()
            .map(|stored| stored.record)
            .collect())
    }

    /// Write a workbook to `dir/<file_name>.xlsx`
    pub async fn save(&self, workbook: &Workbook, dir: &Path, file_name: &str) -> ApiResult<PathBuf> {
        Ok(write_workbook(dir, file_name, workbook).await?)
    }

    /// Register or rename areas
    pub async fn upsert_areas(&self, areas: Vec<Area>) -> ApiResult<usize> {
        Ok(self.repo.upsert_areas(areas).await?)
    }
}

fn render_if_any(
    issues: &[ValidationIssue],
    build: fn(&[ValidationIssue]) -> Workbook,
) -> ApiResult<Option<Vec<u8>>> {
    if issues.is_empty() {
        return Ok(None);
    }
    Ok(Some(build(issues).render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::{Sheet, ERRORS_SHEET};
    use calamine::{open_workbook_auto_from_rs, Reader};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn upload(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let mut sheet = Sheet::new("بيانات");
        for row in rows {
            sheet.push_text_row(row);
        }
        workbook.add_sheet(sheet);
        workbook.render().unwrap()
    }

    async fn api_with_areas() -> ImportApi<BeneficiaryRepositoryImpl, ConfigManager> {
        let api = ImportApi::open(":memory:").unwrap();
        api.upsert_areas(vec![Area::new("a1", "الشمال")]).await.unwrap();
        api
    }

    #[tokio::test]
    async fn test_import_persists_valid_rows_only() {
        let api = api_with_areas().await;
        let bytes = upload(&[
            &["الاسم الرباعي", "رقم الهوية", "المنطقة"],
            &["أحمد", "0400", "الشمال"],
            &["", "401", "الشمال"],
        ]);

        let response = api.import_bytes(EntityKind::Guardians, &bytes).await.unwrap();
        assert_eq!(response.summary.total_rows, 2);
        assert_eq!(response.inserted, 1);
        assert_eq!(response.errors.len(), 1);
        assert!(response.error_report.is_some());
        assert!(response.warning_report.is_none());

        let count = api.repository().count_records(EntityKind::Guardians).await.unwrap();
        assert_eq!(count, 1);

        let report = response.error_report.unwrap();
        let workbook = open_workbook_auto_from_rs(Cursor::new(report)).unwrap();
        assert!(workbook.sheet_names().contains(&ERRORS_SHEET.to_string()));
    }

    #[tokio::test]
    async fn test_damage_needs_guardian_from_store() {
        let api = api_with_areas().await;
        let guardians = upload(&[
            &["الاسم الرباعي", "رقم الهوية", "المنطقة"],
            &["أحمد", "0400", "الشمال"],
        ]);
        api.import_bytes(EntityKind::Guardians, &guardians).await.unwrap();

        let damages = upload(&[
            &["رقم هوية ولي الأمر", "نوع الضرر"],
            &["0400", "كلي"],
            &["999", "جزئي"],
        ]);
        let response = api.import_bytes(EntityKind::Damages, &damages).await.unwrap();
        assert_eq!(response.inserted, 1);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].row, 3);
    }

    #[tokio::test]
    async fn test_oversized_cell_is_reported_once_and_stored_once() {
        let api = api_with_areas().await;
        let guardians = upload(&[
            &["الاسم الرباعي", "رقم الهوية", "المنطقة"],
            &["أحمد", "0400", "الشمال"],
        ]);
        api.import_bytes(EntityKind::Guardians, &guardians).await.unwrap();

        let huge = "x".repeat(32_750);
        let damages = upload(&[
            &["رقم هوية ولي الأمر", "نوع الضرر"],
            &["0400", "كلي"],
            &["0400", huge.as_str()],
        ]);
        let response = api.import_bytes(EntityKind::Damages, &damages).await.unwrap();
        assert_eq!(response.inserted, 1);
        assert_eq!(response.errors.len(), 1);
        assert!(response.error_report.is_some());

        let stored = api.repository().count_records(EntityKind::Damages).await.unwrap();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_structural_failure_is_err() {
        let api = api_with_areas().await;
        let err = api
            .import_bytes(EntityKind::Guardians, b"not a workbook")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ImportError(_)));

        let err = api.import_bytes(EntityKind::Areas, b"").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_export_after_import_and_save() {
        let api = api_with_areas().await;
        let bytes = upload(&[
            &["الاسم الرباعي", "رقم الهوية", "المنطقة"],
            &["أحمد", "0400", "الشمال"],
        ]);
        api.import_bytes(EntityKind::Guardians, &bytes).await.unwrap();

        let export = api.export(EntityKind::Guardians).await.unwrap();
        let sheet = &export.sheets[0];
        assert_eq!(sheet.data_rows().len(), 1);

        let dir = TempDir::new().unwrap();
        let path = api.save(&export, dir.path(), "أولياء الأمور").await.unwrap();
        assert!(path.exists());

        // the export is itself a valid upload
        let reimport = api.import_file(EntityKind::Guardians, &path).await.unwrap();
        assert_eq!(reimport.errors.len(), 0);
        assert_eq!(reimport.inserted, 1);
    }

    #[tokio::test]
    async fn test_template_lists_areas() {
        let api = api_with_areas().await;
        let template = api.template(EntityKind::Guardians).await.unwrap();
        assert!(template.sheet_names().len() >= 2);
    }
}
