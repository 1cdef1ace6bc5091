// ==========================================
// Aid Registry - plain data export
// ==========================================
// Same header row as the import template, so an export can be edited
// and imported back.
// ==========================================

use crate::domain::beneficiary::{Aid, Damage, Guardian, Injured, LookupTable};
use crate::domain::import::CellValue;
use crate::exporter::workbook::{Sheet, Workbook};
use crate::importer::schema::{EntitySchema, FieldKey, AID_SCHEMA, DAMAGE_SCHEMA, GUARDIAN_SCHEMA, INJURED_SCHEMA};
use chrono::NaiveDate;
use tracing::debug;

/// Entity record that can be written as one export row
pub trait ExportRow {
    fn schema() -> &'static EntitySchema;

    /// Cell of one schema column; Empty for fields the record does not carry
    fn cell(&self, field: FieldKey, lookup: &LookupTable) -> CellValue;
}

/// One sheet named after the entity, template headers, one row per record
pub fn build_export<T: ExportRow>(records: &[T], lookup: &LookupTable) -> Workbook {
    let schema = T::schema();
    let mut sheet = Sheet::new(schema.kind.label())
        .with_column_widths(schema.columns.iter().map(|c| c.width).collect());

    sheet.push_text_row(&schema.headers());
    for record in records {
        sheet.push_row(
            schema
                .columns
                .iter()
                .map(|column| record.cell(column.field, lookup))
                .collect(),
        );
    }

    debug!(entity = %schema.kind, rows = records.len(), "export built");
    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet);
    workbook
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn date(value: NaiveDate) -> CellValue {
    CellValue::Text(value.format("%Y-%m-%d").to_string())
}

impl ExportRow for Guardian {
    fn schema() -> &'static EntitySchema {
        &GUARDIAN_SCHEMA
    }

    fn cell(&self, field: FieldKey, lookup: &LookupTable) -> CellValue {
        match field {
            FieldKey::Name => text(&self.name),
            FieldKey::NationalId => text(&self.national_id),
            FieldKey::Phone => text(&self.phone),
            FieldKey::Gender => text(self.gender.label()),
            FieldKey::WivesCount => CellValue::Number(f64::from(self.wives_count)),
            FieldKey::ChildrenCount => CellValue::Number(f64::from(self.children_count)),
            FieldKey::ResidenceStatus => text(self.residence_status.label()),
            FieldKey::Area => text(lookup.area_name(&self.area_id)),
            FieldKey::Address => text(&self.address),
            _ => CellValue::Empty,
        }
    }
}

impl ExportRow for Aid {
    fn schema() -> &'static EntitySchema {
        &AID_SCHEMA
    }

    fn cell(&self, field: FieldKey, _lookup: &LookupTable) -> CellValue {
        match field {
            FieldKey::GuardianNationalId => text(&self.guardian_national_id),
            FieldKey::GuardianName => text(&self.guardian_name),
            FieldKey::Phone => text(&self.guardian_phone),
            FieldKey::Area => text(&self.area_name),
            FieldKey::AidType => text(&self.aid_type),
            FieldKey::AidDate => date(self.aid_date),
            FieldKey::Notes => text(&self.notes),
            _ => CellValue::Empty,
        }
    }
}

impl ExportRow for Damage {
    fn schema() -> &'static EntitySchema {
        &DAMAGE_SCHEMA
    }

    fn cell(&self, field: FieldKey, _lookup: &LookupTable) -> CellValue {
        match field {
            FieldKey::GuardianNationalId => text(&self.guardian_national_id),
            FieldKey::DamageType => text(self.damage_type.label()),
            FieldKey::Notes => text(&self.notes),
            _ => CellValue::Empty,
        }
    }
}

impl ExportRow for Injured {
    fn schema() -> &'static EntitySchema {
        &INJURED_SCHEMA
    }

    fn cell(&self, field: FieldKey, _lookup: &LookupTable) -> CellValue {
        match field {
            FieldKey::Name => text(&self.name),
            FieldKey::NationalId => text(&self.national_id),
            FieldKey::Phone => text(&self.phone),
            FieldKey::InjuryDate => date(self.injury_date),
            FieldKey::InjuryType => text(self.injury_type.label()),
            FieldKey::Notes => text(&self.notes),
            _ => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DamageType, InjuryType};

    #[test]
    fn test_damage_export_row() {
        let damage = Damage {
            guardian_national_id: "0400".to_string(),
            guardian_name: "X".to_string(),
            guardian_phone: String::new(),
            area_id: "a1".to_string(),
            damage_type: DamageType::Partial,
            notes: "سقف".to_string(),
        };

        let workbook = build_export(&[damage], &LookupTable::empty());
        let sheet = &workbook.sheets[0];
        assert_eq!(sheet.header(), DAMAGE_SCHEMA.headers());
        assert_eq!(
            sheet.data_rows()[0],
            vec![text("0400"), text("جزئي"), text("سقف")]
        );
    }

    #[test]
    fn test_injured_date_is_iso_text() {
        let injured = Injured {
            name: "ج".to_string(),
            national_id: "5".to_string(),
            phone: "0592".to_string(),
            injury_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            injury_type: InjuryType::Burns,
            area_id: None,
            notes: String::new(),
        };

        let workbook = build_export(&[injured], &LookupTable::empty());
        let row = &workbook.sheets[0].data_rows()[0];
        assert_eq!(row[3], text("2024-03-10"));
        assert_eq!(row[4], text("حروق"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let workbook = build_export::<Guardian>(&[], &LookupTable::empty());
        assert_eq!(workbook.sheets[0].rows.len(), 1);
    }
}
