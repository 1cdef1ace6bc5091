// ==========================================
// Aid Registry - configuration manager
// ==========================================
// Responsibility: load / query / override importer settings
// Storage: config_kv table (key-value + scope)
// ==========================================

use crate::config::import_config::{config_keys, DEFAULT_COUNT, UNSPECIFIED_LABEL};
use crate::config::import_config_trait::ImportConfigReader;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::types::Gender;
use crate::importer::date_normalizer::{DateWindow, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Open (and create if needed) the settings store
    ///
    /// # Arguments
    /// - db_path: sqlite file path, `:memory:` works for tests
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection (e.g. with the repository)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("lock failed: {}", e))?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// Read a value from config_kv (scope_id='global')
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Parse a numeric setting; malformed values fall back to the default
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + Copy + std::fmt::Display,
    {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    warn!(config_key = key, value = %raw, default = %default, "malformed config value, using default");
                    Ok(default)
                }
            },
        }
    }

    /// Upsert a global setting
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// JSON snapshot of all global settings
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// ImportConfigReader implementation
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_date_window(&self) -> Result<DateWindow, Box<dyn Error>> {
        let min = self.get_parsed_or_default(config_keys::DATE_YEAR_MIN, DEFAULT_YEAR_MIN)?;
        let max = self.get_parsed_or_default(config_keys::DATE_YEAR_MAX, DEFAULT_YEAR_MAX)?;

        if min > max {
            warn!(min, max, "inverted date window, using defaults");
            return Ok(DateWindow::default());
        }
        Ok(DateWindow::new(min, max))
    }

    async fn get_default_gender(&self) -> Result<Gender, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEFAULT_GENDER, "male")?;
        Ok(Gender::parse(&value).unwrap_or(Gender::Male))
    }

    async fn get_default_count(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::DEFAULT_COUNT, DEFAULT_COUNT)
    }

    async fn get_unspecified_label(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::UNSPECIFIED_LABEL, UNSPECIFIED_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportConfig;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let manager = ConfigManager::new(":memory:").unwrap();
        let config = manager.load_import_config().await.unwrap();
        assert_eq!(config, ImportConfig::default());
    }

    #[tokio::test]
    async fn test_overrides() {
        let manager = ConfigManager::new(":memory:").unwrap();
        manager.set_global_config_value(config_keys::DATE_YEAR_MIN, "2000").unwrap();
        manager.set_global_config_value(config_keys::DATE_YEAR_MAX, "2040").unwrap();
        manager.set_global_config_value(config_keys::DEFAULT_GENDER, "أنثى").unwrap();

        let config = manager.load_import_config().await.unwrap();
        assert_eq!(config.date_window, DateWindow::new(2000, 2040));
        assert_eq!(config.default_gender, Gender::Female);
    }

    #[tokio::test]
    async fn test_malformed_value_falls_back() {
        let manager = ConfigManager::new(":memory:").unwrap();
        manager.set_global_config_value(config_keys::DEFAULT_COUNT, "abc").unwrap();
        manager.set_global_config_value(config_keys::DATE_YEAR_MIN, "2050").unwrap();

        assert_eq!(manager.get_default_count().await.unwrap(), DEFAULT_COUNT);
        // min > max → defaults
        assert_eq!(manager.get_date_window().await.unwrap(), DateWindow::default());
    }

    #[test]
    fn test_snapshot() {
        let manager = ConfigManager::new(":memory:").unwrap();
        manager.set_global_config_value("k", "v").unwrap();
        let snapshot = manager.get_config_snapshot().unwrap();
        assert!(snapshot.contains("\"k\":\"v\""));
    }
}
