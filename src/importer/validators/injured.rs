// ==========================================
// Injured rows
// ==========================================
// Phone may be omitted when the national id belongs to a registered
// guardian with a phone; injury type is a closed set of 12 labels.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::Injured;
use crate::domain::types::InjuryType;
use crate::importer::entity_importer_trait::EntityValidator;
use crate::importer::rule_engine::CheckedRow;
use crate::importer::schema::{EntitySchema, FieldKey, INJURED_SCHEMA};

pub struct InjuredValidator;

impl EntityValidator for InjuredValidator {
    type Record = Injured;

    fn schema(&self) -> &'static EntitySchema {
        &INJURED_SCHEMA
    }

    fn assemble(&self, row: &CheckedRow<'_>, _config: &ImportConfig) -> Option<Injured> {
        Some(Injured {
            name: row.text(FieldKey::Name).to_string(),
            national_id: row.text(FieldKey::NationalId).to_string(),
            phone: row.text(FieldKey::Phone).to_string(),
            injury_date: row.date(FieldKey::InjuryDate)?,
            injury_type: InjuryType::parse(row.text(FieldKey::InjuryType))?,
            area_id: row.guardian().map(|g| g.area_id.clone()),
            notes: row.text(FieldKey::Notes).to_string(),
        })
    }

    fn duplicate_key<'r>(&self, record: &'r Injured) -> Option<&'r str> {
        Some(&record.national_id)
    }
}
