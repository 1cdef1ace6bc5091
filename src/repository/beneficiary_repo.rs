// ==========================================
// Aid Registry - beneficiary repository trait
// ==========================================
// Responsibility: persist imported records, supply the lookup table
// Red line: no validation rules here; the import core never calls it
// ==========================================

use crate::domain::beneficiary::{Area, LookupTable};
use crate::domain::types::EntityKind;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Record plus the identity and timestamps assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord<T> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub record: T,
}

// ==========================================
// BeneficiaryRepository Trait
// ==========================================
// Implementor: BeneficiaryRepositoryImpl (rusqlite, JSON payloads)
#[async_trait]
pub trait BeneficiaryRepository: Send + Sync {
    /// Append records of one entity (single transaction)
    ///
    /// # Returns
    /// - Ok(Vec<StoredRecord>): records with fresh uuid v4 ids and timestamps,
    ///   in input order
    async fn insert_records<T>(
        &self,
        kind: EntityKind,
        records: Vec<T>,
    ) -> RepositoryResult<Vec<StoredRecord<T>>>
    where
        T: Serialize + Send + Sync + 'static;

    /// All records of one entity in insertion order
    async fn list_records<T>(&self, kind: EntityKind) -> RepositoryResult<Vec<StoredRecord<T>>>
    where
        T: DeserializeOwned + Send + 'static;

    async fn count_records(&self, kind: EntityKind) -> RepositoryResult<usize>;

    /// Remove every record of one entity, returns the number removed
    async fn delete_entity(&self, kind: EntityKind) -> RepositoryResult<usize>;

    /// Stored guardians and areas as a read-only lookup table
    async fn load_lookup_table(&self) -> RepositoryResult<LookupTable>;

    /// Insert or replace areas by their own id
    async fn upsert_areas(&self, areas: Vec<Area>) -> RepositoryResult<usize>;
}
