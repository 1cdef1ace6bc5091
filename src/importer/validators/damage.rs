// ==========================================
// Damage rows
// ==========================================
// The guardian must be registered (unknown id is an error) and the
// damage type must be one of {كلي, جزئي}.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::Damage;
use crate::domain::types::DamageType;
use crate::importer::entity_importer_trait::EntityValidator;
use crate::importer::rule_engine::CheckedRow;
use crate::importer::schema::{EntitySchema, FieldKey, DAMAGE_SCHEMA};

pub struct DamageValidator;

impl EntityValidator for DamageValidator {
    type Record = Damage;

    fn schema(&self) -> &'static EntitySchema {
        &DAMAGE_SCHEMA
    }

    fn assemble(&self, row: &CheckedRow<'_>, _config: &ImportConfig) -> Option<Damage> {
        let guardian = row.guardian()?;
        let damage_type = DamageType::parse(row.text(FieldKey::DamageType))?;

        Some(Damage {
            guardian_national_id: guardian.national_id.clone(),
            guardian_name: guardian.name.clone(),
            guardian_phone: guardian.phone.clone(),
            area_id: guardian.area_id.clone(),
            damage_type,
            notes: row.text(FieldKey::Notes).to_string(),
        })
    }
}
