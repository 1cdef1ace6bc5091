// ==========================================
// Aid Registry - configuration
// ==========================================
// Responsibility: importer settings with stored overrides
// Storage: config_kv table
// ==========================================

pub mod config_manager;
pub mod import_config;
pub mod import_config_trait;

pub use config_manager::ConfigManager;
pub use import_config::{config_keys, ImportConfig};
pub use import_config_trait::{ImportConfigReader, StaticConfig};
