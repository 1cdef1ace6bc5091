// ==========================================
// Aid Registry - domain model
// ==========================================
// Responsibility: entity records, closed vocabularies, import data model
// Red line: no I/O, no validation rules
// ==========================================

pub mod beneficiary;
pub mod import;
pub mod types;

pub use beneficiary::{Aid, Area, Damage, Guardian, Injured, LookupTable};
pub use import::{CellValue, ImportResult, ImportSummary, RawRow, RowOutcome, ValidationIssue};
pub use types::{DamageType, EntityKind, Gender, InjuryType, IssueLevel, ResidenceStatus};
