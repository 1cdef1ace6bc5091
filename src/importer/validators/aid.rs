// ==========================================
// Aid rows
// ==========================================
// Registered guardian: name / phone / area come from the lookup table.
// Unknown guardian: the row keeps the file's own name / phone / area
// (unspecified label when absent) and carries one warning.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::Aid;
use crate::importer::entity_importer_trait::EntityValidator;
use crate::importer::rule_engine::CheckedRow;
use crate::importer::schema::{EntitySchema, FieldKey, AID_SCHEMA};

pub struct AidValidator;

impl EntityValidator for AidValidator {
    type Record = Aid;

    fn schema(&self) -> &'static EntitySchema {
        &AID_SCHEMA
    }

    fn assemble(&self, row: &CheckedRow<'_>, config: &ImportConfig) -> Option<Aid> {
        let aid_date = row.date(FieldKey::AidDate)?;
        let lookup = row.lookup();
        let unspecified = || config.unspecified_label.clone();

        let (guardian_name, guardian_phone, area_id, area_name) = match row.guardian() {
            Some(guardian) => {
                let area_name = lookup.area_name(&guardian.area_id);
                (
                    guardian.name.clone(),
                    guardian.phone.clone(),
                    Some(guardian.area_id.clone()),
                    non_empty_or(area_name, unspecified),
                )
            }
            None => {
                let area_text = row.text(FieldKey::Area);
                (
                    non_empty_or(row.text(FieldKey::GuardianName), unspecified),
                    row.text(FieldKey::Phone).to_string(),
                    lookup.find_area_by_name(area_text).map(|a| a.id.clone()),
                    non_empty_or(area_text, unspecified),
                )
            }
        };

        Some(Aid {
            guardian_national_id: row.text(FieldKey::GuardianNationalId).to_string(),
            guardian_name,
            guardian_phone,
            area_id,
            area_name,
            aid_type: row.text(FieldKey::AidType).to_string(),
            aid_date,
            notes: row.text(FieldKey::Notes).to_string(),
            guardian_registered: row.guardian().is_some(),
        })
    }
}

fn non_empty_or(value: &str, fallback: impl Fn() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::RawRow;
    use crate::importer::validators::test_support::{engine, lookup};
    use chrono::NaiveDate;

    #[test]
    fn test_registered_guardian_wins_over_file() {
        let row = RawRow::from_pairs(
            2,
            &[
                ("رقم هوية ولي الأمر", "400"),
                ("اسم ولي الأمر", "اسم آخر"),
                ("رقم الجوال", "0000"),
                ("نوع المساعدة", "طرد غذائي"),
                ("تاريخ المساعدة", "15/01/2024"),
            ],
        );

        let outcome = engine().validate(&AidValidator, &row, &lookup());
        assert!(outcome.warnings.is_empty());

        let aid = outcome.record.unwrap();
        assert_eq!(aid.guardian_name, "X");
        assert_eq!(aid.guardian_phone, "0599111111");
        assert_eq!(aid.area_id.as_deref(), Some("a1"));
        assert_eq!(aid.area_name, "الشمال");
        assert_eq!(aid.aid_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(aid.guardian_registered);
    }

    #[test]
    fn test_unknown_guardian_is_warning_only() {
        let row = RawRow::from_pairs(
            4,
            &[
                ("رقم هوية ولي الأمر", "999"),
                ("نوع المساعدة", "نقد"),
                ("تاريخ المساعدة", "2024-02-01"),
                ("المنطقة", "الوسط"),
            ],
        );

        let outcome = engine().validate(&AidValidator, &row, &lookup());
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].row, 4);
        assert_eq!(outcome.warnings[0].field, "رقم هوية ولي الأمر");

        let aid = outcome.record.unwrap();
        assert_eq!(aid.guardian_name, "غير محدد");
        assert_eq!(aid.guardian_phone, "");
        assert_eq!(aid.area_id.as_deref(), Some("a2"));
        assert_eq!(aid.area_name, "الوسط");
        assert!(!aid.guardian_registered);
    }

    #[test]
    fn test_unknown_guardian_alias_columns() {
        let row = RawRow::from_pairs(
            2,
            &[
                ("رقم الهوية", "999"),
                ("الاسم", "سعيد"),
                ("رقم الجوال (اختياري)", "0591"),
                ("اسم المنطقة", "مكان"),
                ("نوع المساعدة", "نقد"),
                ("التاريخ", "2024-02-01"),
            ],
        );

        let aid = engine().validate(&AidValidator, &row, &lookup()).record.unwrap();
        assert_eq!(aid.guardian_national_id, "999");
        assert_eq!(aid.guardian_name, "سعيد");
        assert_eq!(aid.guardian_phone, "0591");
        assert_eq!(aid.area_id, None);
        assert_eq!(aid.area_name, "مكان");
    }

    #[test]
    fn test_unparseable_date_excludes_row() {
        let row = RawRow::from_pairs(
            2,
            &[
                ("رقم هوية ولي الأمر", "400"),
                ("نوع المساعدة", "نقد"),
                ("تاريخ المساعدة", "32/13/2024"),
            ],
        );

        let outcome = engine().validate(&AidValidator, &row, &lookup());
        assert!(outcome.record.is_none());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field, "تاريخ المساعدة");
    }

    #[test]
    fn test_missing_aid_type() {
        let row = RawRow::from_pairs(
            2,
            &[("رقم هوية ولي الأمر", "400"), ("تاريخ المساعدة", "2024-02-01")],
        );

        let outcome = engine().validate(&AidValidator, &row, &lookup());
        assert!(outcome.record.is_none());
        assert_eq!(outcome.errors[0].field, "نوع المساعدة");
    }
}
