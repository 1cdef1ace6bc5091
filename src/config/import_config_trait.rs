// ==========================================
// Aid Registry - import configuration reader trait
// ==========================================
// Responsibility: read-only access to importer settings
// Red line: no config writes, no business logic
// ==========================================

use crate::config::import_config::ImportConfig;
use crate::domain::types::Gender;
use crate::importer::date_normalizer::DateWindow;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// Implementors: ConfigManager (config_kv table), StaticConfig
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// Year window accepted by the textual date patterns
    ///
    /// # Default
    /// - [2020, 2030]
    async fn get_date_window(&self) -> Result<DateWindow, Box<dyn Error>>;

    /// Gender used when the cell is not recognised
    ///
    /// # Default
    /// - male
    async fn get_default_gender(&self) -> Result<Gender, Box<dyn Error>>;

    /// Count used when children / wives count does not parse
    async fn get_default_count(&self) -> Result<u32, Box<dyn Error>>;

    /// Placeholder for unknown name / area on aid rows
    async fn get_unspecified_label(&self) -> Result<String, Box<dyn Error>>;

    /// Snapshot of every setting
    async fn load_import_config(&self) -> Result<ImportConfig, Box<dyn Error>> {
        let date_window = self.get_date_window().await?;
        let default_gender = self.get_default_gender().await?;
        let default_count = self.get_default_count().await?;
        let unspecified_label = self.get_unspecified_label().await?;

        Ok(ImportConfig {
            date_window,
            default_gender,
            default_count,
            unspecified_label,
        })
    }
}

// ==========================================
// StaticConfig - fixed in-memory settings
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    config: ImportConfig,
}

impl StaticConfig {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImportConfigReader for StaticConfig {
    async fn get_date_window(&self) -> Result<DateWindow, Box<dyn Error>> {
        Ok(self.config.date_window)
    }

    async fn get_default_gender(&self) -> Result<Gender, Box<dyn Error>> {
        Ok(self.config.default_gender)
    }

    async fn get_default_count(&self) -> Result<u32, Box<dyn Error>> {
        Ok(self.config.default_count)
    }

    async fn get_unspecified_label(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.config.unspecified_label.clone())
    }
}
