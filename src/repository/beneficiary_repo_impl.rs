// ==========================================
// Aid Registry - beneficiary repository (rusqlite)
// ==========================================
// Storage: entity_record(id, entity, payload JSON, created_at, updated_at)
// One table for every collection, keyed by EntityKind::storage_key.
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::beneficiary::{Area, Guardian, LookupTable};
use crate::domain::types::EntityKind;
use crate::repository::beneficiary_repo::{BeneficiaryRepository, StoredRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// BeneficiaryRepositoryImpl
// ==========================================
pub struct BeneficiaryRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl BeneficiaryRepositoryImpl {
    /// # Arguments
    /// - db_path: sqlite file path, `:memory:` for tests
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share a connection (e.g. with ConfigManager)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn list_records_sync<T: DeserializeOwned>(
        conn: &Connection,
        kind: EntityKind,
    ) -> RepositoryResult<Vec<StoredRecord<T>>> {
        let mut stmt = conn.prepare(
            "SELECT id, payload, created_at, updated_at FROM entity_record
             WHERE entity = ?1 ORDER BY created_at, rowid",
        )?;

        let rows = stmt.query_map(params![kind.storage_key()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, payload, created_at, updated_at) = row?;
            records.push(StoredRecord {
                record: serde_json::from_str(&payload)?,
                created_at: parse_timestamp("created_at", &created_at)?,
                updated_at: parse_timestamp("updated_at", &updated_at)?,
                id,
            });
        }
        Ok(records)
    }
}

fn parse_timestamp(field: &str, value: &str) -> RepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::FieldValueError {
            field: field.to_string(),
            message: format!("{}: {}", value, e),
        })
}

#[async_trait]
impl BeneficiaryRepository for BeneficiaryRepositoryImpl {
    async fn insert_records<T>(
        &self,
        kind: EntityKind,
        records: Vec<T>,
    ) -> RepositoryResult<Vec<StoredRecord<T>>>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let now = Utc::now();
        let timestamp = now.to_rfc3339();

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut stored = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entity_record (id, entity, payload, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
            )?;
            for record in records {
                let id = Uuid::new_v4().to_string();
                let payload = serde_json::to_string(&record)?;
                stmt.execute(params![id, kind.storage_key(), payload, timestamp])?;
                stored.push(StoredRecord {
                    id,
                    created_at: now,
                    updated_at: now,
                    record,
                });
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(entity = %kind, count = stored.len(), "records inserted");
        Ok(stored)
    }

    async fn list_records<T>(&self, kind: EntityKind) -> RepositoryResult<Vec<StoredRecord<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let conn = self.lock()?;
        Self::list_records_sync(&conn, kind)
    }

    async fn count_records(&self, kind: EntityKind) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM entity_record WHERE entity = ?1",
            params![kind.storage_key()],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as usize)
    }

    async fn delete_entity(&self, kind: EntityKind) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM entity_record WHERE entity = ?1",
            params![kind.storage_key()],
        )?;
        info!(entity = %kind, removed, "entity cleared");
        Ok(removed)
    }

    async fn load_lookup_table(&self) -> RepositoryResult<LookupTable> {
        let conn = self.lock()?;
        let guardians: Vec<Guardian> = Self::list_records_sync(&conn, EntityKind::Guardians)?
            .into_iter()
            .map(|stored| stored.record)
            .collect();
        let areas: Vec<Area> = Self::list_records_sync(&conn, EntityKind::Areas)?
            .into_iter()
            .map(|stored| stored.record)
            .collect();

        debug!(guardians = guardians.len(), areas = areas.len(), "lookup table loaded");
        Ok(LookupTable::new(guardians, areas))
    }

    async fn upsert_areas(&self, areas: Vec<Area>) -> RepositoryResult<usize> {
        let timestamp = Utc::now().to_rfc3339();
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for area in &areas {
            let payload = serde_json::to_string(area)?;
            let updated = tx.execute(
                "UPDATE entity_record SET payload = ?1, updated_at = ?2
                 WHERE entity = ?3 AND json_extract(payload, '$.id') = ?4",
                params![payload, timestamp, EntityKind::Areas.storage_key(), area.id],
            )?;
            if updated == 0 {
                tx.execute(
                    "INSERT INTO entity_record (id, entity, payload, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)",
                    params![
                        Uuid::new_v4().to_string(),
                        EntityKind::Areas.storage_key(),
                        payload,
                        timestamp
                    ],
                )?;
            }
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Gender, ResidenceStatus};

    fn guardian(national_id: &str) -> Guardian {
        Guardian {
            name: "X".to_string(),
            national_id: national_id.to_string(),
            phone: String::new(),
            gender: Gender::Male,
            wives_count: 0,
            children_count: 0,
            family_members_count: 1,
            residence_status: ResidenceStatus::Resident,
            area_id: "a1".to_string(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_keeps_order() {
        let repo = BeneficiaryRepositoryImpl::new(":memory:").unwrap();
        let stored = repo
            .insert_records(EntityKind::Guardians, vec![guardian("0400"), guardian("401")])
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].id, stored[1].id);

        let listed: Vec<StoredRecord<Guardian>> =
            repo.list_records(EntityKind::Guardians).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|s| s.record.national_id.as_str()).collect();
        assert_eq!(ids, vec!["0400", "401"]);
        assert_eq!(listed[0].id, stored[0].id);
    }

    #[tokio::test]
    async fn test_count_and_delete() {
        let repo = BeneficiaryRepositoryImpl::new(":memory:").unwrap();
        repo.insert_records(EntityKind::Guardians, vec![guardian("1")])
            .await
            .unwrap();

        assert_eq!(repo.count_records(EntityKind::Guardians).await.unwrap(), 1);
        assert_eq!(repo.count_records(EntityKind::Aids).await.unwrap(), 0);
        assert_eq!(repo.delete_entity(EntityKind::Guardians).await.unwrap(), 1);
        assert_eq!(repo.count_records(EntityKind::Guardians).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_areas_replaces_by_id() {
        let repo = BeneficiaryRepositoryImpl::new(":memory:").unwrap();
        repo.upsert_areas(vec![Area::new("a1", "الشمال"), Area::new("a2", "الوسط")])
            .await
            .unwrap();
        repo.upsert_areas(vec![Area::new("a1", "الشمال الجديد")])
            .await
            .unwrap();

        let areas: Vec<StoredRecord<Area>> = repo.list_records(EntityKind::Areas).await.unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].record.name, "الشمال الجديد");
    }

    #[tokio::test]
    async fn test_lookup_table_from_store() {
        let repo = BeneficiaryRepositoryImpl::new(":memory:").unwrap();
        repo.upsert_areas(vec![Area::new("a1", "الشمال")]).await.unwrap();
        repo.insert_records(EntityKind::Guardians, vec![guardian("0400")])
            .await
            .unwrap();

        let lookup = repo.load_lookup_table().await.unwrap();
        assert!(lookup.find_guardian("0400").is_some());
        assert!(lookup.find_guardian("400").is_none());
        assert_eq!(lookup.area_name("a1"), "الشمال");
    }
}
