// ==========================================
// Guardian rows
// ==========================================
// name / national id required; gender, counts and residence fall back
// to configured defaults; area resolved by name (first area + warning
// when unknown). familyMembersCount is always derived.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::Guardian;
use crate::domain::types::{Gender, ResidenceStatus};
use crate::importer::entity_importer_trait::EntityValidator;
use crate::importer::rule_engine::CheckedRow;
use crate::importer::schema::{EntitySchema, FieldKey, GUARDIAN_SCHEMA};

pub struct GuardianValidator;

impl EntityValidator for GuardianValidator {
    type Record = Guardian;

    fn schema(&self) -> &'static EntitySchema {
        &GUARDIAN_SCHEMA
    }

    fn assemble(&self, row: &CheckedRow<'_>, config: &ImportConfig) -> Option<Guardian> {
        let area = row.area()?;
        let wives_count = row.count(FieldKey::WivesCount).unwrap_or(config.default_count);
        let children_count = row
            .count(FieldKey::ChildrenCount)
            .unwrap_or(config.default_count);

        Some(Guardian {
            name: row.text(FieldKey::Name).to_string(),
            national_id: row.text(FieldKey::NationalId).to_string(),
            phone: row.text(FieldKey::Phone).to_string(),
            gender: Gender::parse(row.text(FieldKey::Gender)).unwrap_or(config.default_gender),
            wives_count,
            children_count,
            family_members_count: family_members_count(children_count, wives_count),
            residence_status: ResidenceStatus::parse(row.text(FieldKey::ResidenceStatus)),
            area_id: area.id.clone(),
            address: row.text(FieldKey::Address).to_string(),
        })
    }

    fn duplicate_key<'r>(&self, record: &'r Guardian) -> Option<&'r str> {
        Some(&record.national_id)
    }
}

/// children + wives + the guardian
pub fn family_members_count(children_count: u32, wives_count: u32) -> u32 {
    children_count.saturating_add(wives_count).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::{CellValue, RawRow};
    use crate::importer::validators::test_support::{engine, lookup};

    #[test]
    fn test_full_row() {
        let row = RawRow::from_pairs(
            2,
            &[
                ("الاسم الرباعي", " محمد أحمد "),
                ("رقم الهوية", "0400123"),
                ("رقم الجوال", "0599"),
                ("الجنس", "أنثى"),
                ("عدد الزوجات", "1"),
                ("عدد الأبناء", "4"),
                ("حالة الإقامة", "نازح"),
                ("المنطقة", "الوسط"),
                ("العنوان", "شارع 1"),
            ],
        );

        let outcome = engine().validate(&GuardianValidator, &row, &lookup());
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());

        let g = outcome.record.unwrap();
        assert_eq!(g.name, "محمد أحمد");
        assert_eq!(g.national_id, "0400123");
        assert_eq!(g.gender, Gender::Female);
        assert_eq!(g.family_members_count, 6);
        assert_eq!(g.residence_status, ResidenceStatus::Displaced);
        assert_eq!(g.area_id, "a2");
        assert_eq!(g.address, "شارع 1");
    }

    #[test]
    fn test_silent_defaults() {
        let row = RawRow::from_pairs(
            2,
            &[
                ("الاسم", "أحمد"),
                ("رقم الهوية", "9"),
                ("الجنس", "؟"),
                ("عدد الزوجات", "abc"),
                ("المنطقة", "الشمال"),
            ],
        )
        .with_cell("عدد الأبناء", CellValue::Number(2.0));

        let outcome = engine().validate(&GuardianValidator, &row, &lookup());
        let g = outcome.record.unwrap();
        assert_eq!(g.gender, Gender::Male);
        assert_eq!(g.wives_count, 0);
        assert_eq!(g.children_count, 2);
        assert_eq!(g.family_members_count, 3);
        assert_eq!(g.residence_status, ResidenceStatus::Resident);
    }

    #[test]
    fn test_missing_name_and_id() {
        let row = RawRow::from_pairs(7, &[("المنطقة", "الشمال")]);
        let outcome = engine().validate(&GuardianValidator, &row, &lookup());

        assert!(outcome.record.is_none());
        let fields: Vec<_> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["الاسم الرباعي", "رقم الهوية"]);
    }

    #[test]
    fn test_unknown_area_keeps_row() {
        let row = RawRow::from_pairs(
            3,
            &[("الاسم الرباعي", "أ"), ("رقم الهوية", "9"), ("المنطقة", "الجنوب")],
        );
        let outcome = engine().validate(&GuardianValidator, &row, &lookup());

        assert_eq!(outcome.record.map(|g| g.area_id), Some("a1".to_string()));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].message.contains("الجنوب"));
    }

    #[test]
    fn test_family_members_count() {
        assert_eq!(family_members_count(0, 0), 1);
        assert_eq!(family_members_count(5, 2), 8);
        assert_eq!(family_members_count(u32::MAX, 1), u32::MAX);
    }
}
