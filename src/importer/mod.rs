// ==========================================
// Aid Registry - import layer
// ==========================================
// Responsibility: spreadsheet rows → validated entity records
// Supports: Excel (.xlsx / .xls)
// ==========================================

pub mod conflict_handler;
pub mod date_normalizer;
pub mod entity_importer_impl;
pub mod entity_importer_trait;
pub mod error;
pub mod field_extractor;
pub mod file_parser;
pub mod rule_engine;
pub mod schema;
pub mod validators;

// core types
pub use date_normalizer::{parse_date, DateNormalizer, DateWindow};
pub use entity_importer_impl::{
    aid_importer, damage_importer, guardian_importer, import_kind, injured_importer, AidImporter,
    DamageImporter, EntityImporterImpl, GuardianImporter, ImportedRecords, InjuredImporter,
};
pub use error::{ImportError, ImporterResult};
pub use field_extractor::get_field;
pub use file_parser::ExcelParser;
pub use rule_engine::RuleEngine;
pub use schema::{schema_for, EntitySchema};

// trait interfaces
pub use entity_importer_trait::{EntityImporter, EntityValidator, FileParser};
