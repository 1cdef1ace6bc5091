// ==========================================
// Aid Registry - entity column rule tables
// ==========================================
// One table per importable entity. The table is the header contract:
// the template builder writes `headers[0]` of every column, the rule
// engine accepts any entry of `headers` (first non-empty wins).
// ==========================================

use crate::domain::types::{DamageType, EntityKind, InjuryType};

// ==========================================
// FieldKey - logical field of an import row
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    NationalId,
    Phone,
    Gender,
    WivesCount,
    ChildrenCount,
    ResidenceStatus,
    Area,
    Address,
    GuardianNationalId,
    GuardianName,
    AidType,
    AidDate,
    DamageType,
    InjuryDate,
    InjuryType,
    Notes,
}

/// What happens when a national id is not in the lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyPolicy {
    /// Error, row excluded
    Reject,
    /// Warning, row imported with the file's own data
    Warn,
    /// No issue, the match is only used for back-filling
    Silent,
}

// ==========================================
// ColumnRule - check applied to one column
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Non-empty text
    Required,
    /// Free text, may be empty
    Optional,
    /// Required, must pass the date normalizer
    Date,
    /// Required, exact member of a closed set
    OneOf(&'static [&'static str]),
    /// Required national id, resolved against the lookup table
    GuardianRef(ForeignKeyPolicy),
    /// Area name; unknown names fall back to the first area with a warning
    AreaRef,
    /// Required unless the matched guardian has a phone
    RequiredUnlessGuardianPhone,
    /// Non-negative integer, configured default when unparseable
    Count,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: FieldKey,
    /// Accepted headers; the first one is canonical
    pub headers: &'static [&'static str],
    pub rule: ColumnRule,
    pub example: &'static str,
    pub width: f64,
}

impl ColumnSpec {
    /// Canonical header, also the field name in validation issues
    pub fn header(&self) -> &'static str {
        self.headers.first().copied().unwrap_or("")
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self.rule,
            ColumnRule::Required
                | ColumnRule::Date
                | ColumnRule::OneOf(_)
                | ColumnRule::GuardianRef(_)
        )
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub columns: &'static [ColumnSpec],
}

impl EntitySchema {
    pub fn column(&self, field: FieldKey) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Canonical header of a field, empty when the entity has no such column
    pub fn header_of(&self, field: FieldKey) -> &'static str {
        self.column(field).map(|c| c.header()).unwrap_or("")
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }
}

// ===== shared header aliases =====
const PHONE_HEADERS: &[&str] = &["رقم الجوال", "رقم الجوال (اختياري)", "الجوال"];
const AREA_HEADERS: &[&str] = &["المنطقة", "اسم المنطقة"];
const NOTES_HEADERS: &[&str] = &["ملاحظات", "ملاحظات (اختياري)"];

// ==========================================
// Guardians
// ==========================================
pub static GUARDIAN_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Guardians,
    columns: &[
        ColumnSpec {
            field: FieldKey::Name,
            headers: &["الاسم الرباعي", "الاسم", "اسم ولي الأمر"],
            rule: ColumnRule::Required,
            example: "محمد أحمد محمود حسن",
            width: 28.0,
        },
        ColumnSpec {
            field: FieldKey::NationalId,
            headers: &["رقم الهوية", "رقم هوية ولي الأمر"],
            rule: ColumnRule::Required,
            example: "400123456",
            width: 16.0,
        },
        ColumnSpec {
            field: FieldKey::Phone,
            headers: PHONE_HEADERS,
            rule: ColumnRule::Optional,
            example: "0599123456",
            width: 16.0,
        },
        ColumnSpec {
            field: FieldKey::Gender,
            headers: &["الجنس"],
            rule: ColumnRule::Optional,
            example: "ذكر",
            width: 10.0,
        },
        ColumnSpec {
            field: FieldKey::WivesCount,
            headers: &["عدد الزوجات"],
            rule: ColumnRule::Count,
            example: "1",
            width: 12.0,
        },
        ColumnSpec {
            field: FieldKey::ChildrenCount,
            headers: &["عدد الأبناء", "عدد الأطفال"],
            rule: ColumnRule::Count,
            example: "3",
            width: 12.0,
        },
        ColumnSpec {
            field: FieldKey::ResidenceStatus,
            headers: &["حالة الإقامة", "الحالة"],
            rule: ColumnRule::Optional,
            example: "مقيم",
            width: 14.0,
        },
        ColumnSpec {
            field: FieldKey::Area,
            headers: AREA_HEADERS,
            rule: ColumnRule::AreaRef,
            example: "",
            width: 18.0,
        },
        ColumnSpec {
            field: FieldKey::Address,
            headers: &["العنوان", "العنوان (اختياري)"],
            rule: ColumnRule::Optional,
            example: "",
            width: 24.0,
        },
    ],
};

// ==========================================
// Aids
// ==========================================
// Unknown guardians are allowed: aid can reach unregistered families.
pub static AID_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Aids,
    columns: &[
        ColumnSpec {
            field: FieldKey::GuardianNationalId,
            headers: &["رقم هوية ولي الأمر", "رقم الهوية"],
            rule: ColumnRule::GuardianRef(ForeignKeyPolicy::Warn),
            example: "400123456",
            width: 18.0,
        },
        ColumnSpec {
            field: FieldKey::GuardianName,
            headers: &["اسم ولي الأمر", "الاسم الرباعي", "الاسم"],
            rule: ColumnRule::Optional,
            example: "محمد أحمد محمود حسن",
            width: 28.0,
        },
        ColumnSpec {
            field: FieldKey::Phone,
            headers: PHONE_HEADERS,
            rule: ColumnRule::Optional,
            example: "0599123456",
            width: 16.0,
        },
        ColumnSpec {
            field: FieldKey::Area,
            headers: AREA_HEADERS,
            rule: ColumnRule::Optional,
            example: "",
            width: 18.0,
        },
        ColumnSpec {
            field: FieldKey::AidType,
            headers: &["نوع المساعدة"],
            rule: ColumnRule::Required,
            example: "طرد غذائي",
            width: 18.0,
        },
        ColumnSpec {
            field: FieldKey::AidDate,
            headers: &["تاريخ المساعدة", "التاريخ"],
            rule: ColumnRule::Date,
            example: "2024-01-15",
            width: 14.0,
        },
        ColumnSpec {
            field: FieldKey::Notes,
            headers: NOTES_HEADERS,
            rule: ColumnRule::Optional,
            example: "",
            width: 30.0,
        },
    ],
};

// ==========================================
// Damages
// ==========================================
// Unlike aids, the guardian must already be registered.
pub static DAMAGE_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Damages,
    columns: &[
        ColumnSpec {
            field: FieldKey::GuardianNationalId,
            headers: &["رقم هوية ولي الأمر", "رقم الهوية"],
            rule: ColumnRule::GuardianRef(ForeignKeyPolicy::Reject),
            example: "400123456",
            width: 18.0,
        },
        ColumnSpec {
            field: FieldKey::DamageType,
            headers: &["نوع الضرر"],
            rule: ColumnRule::OneOf(DamageType::LABELS),
            example: "كلي",
            width: 12.0,
        },
        ColumnSpec {
            field: FieldKey::Notes,
            headers: &["ملاحظات", "ملاحظات (اختياري)", "وصف الضرر"],
            rule: ColumnRule::Optional,
            example: "",
            width: 30.0,
        },
    ],
};

// ==========================================
// Injured
// ==========================================
pub static INJURED_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Injured,
    columns: &[
        ColumnSpec {
            field: FieldKey::Name,
            headers: &["اسم الجريح", "الاسم"],
            rule: ColumnRule::Required,
            example: "أحمد محمد محمود حسن",
            width: 28.0,
        },
        ColumnSpec {
            field: FieldKey::NationalId,
            headers: &["رقم هوية الجريح", "رقم الهوية"],
            rule: ColumnRule::GuardianRef(ForeignKeyPolicy::Silent),
            example: "401234567",
            width: 16.0,
        },
        ColumnSpec {
            field: FieldKey::Phone,
            headers: PHONE_HEADERS,
            rule: ColumnRule::RequiredUnlessGuardianPhone,
            example: "0599123456",
            width: 16.0,
        },
        ColumnSpec {
            field: FieldKey::InjuryDate,
            headers: &["تاريخ الإصابة"],
            rule: ColumnRule::Date,
            example: "2024-01-15",
            width: 14.0,
        },
        ColumnSpec {
            field: FieldKey::InjuryType,
            headers: &["نوع الإصابة"],
            rule: ColumnRule::OneOf(InjuryType::LABELS),
            example: "كسور",
            width: 20.0,
        },
        ColumnSpec {
            field: FieldKey::Notes,
            headers: &["ملاحظات", "ملاحظات (اختياري)", "وصف الإصابة"],
            rule: ColumnRule::Optional,
            example: "",
            width: 30.0,
        },
    ],
};

/// Rule table of an importable entity
pub fn schema_for(kind: EntityKind) -> Option<&'static EntitySchema> {
    match kind {
        EntityKind::Guardians => Some(&GUARDIAN_SCHEMA),
        EntityKind::Aids => Some(&AID_SCHEMA),
        EntityKind::Damages => Some(&DAMAGE_SCHEMA),
        EntityKind::Injured => Some(&INJURED_SCHEMA),
        EntityKind::Areas => None,
    }
}
