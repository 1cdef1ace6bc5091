// ==========================================
// Aid Registry - generic row validation engine
// ==========================================
// Responsibility: run an EntitySchema over one RawRow
// Flow: column checks (schema order) → assemble record (no errors only)
// Red line: pure function of (row, lookup table, config); the lookup
//           table is never mutated
// ==========================================

use crate::config::ImportConfig;
use crate::domain::beneficiary::{Area, Guardian, LookupTable};
use crate::domain::import::{clip_text, RawRow, RowOutcome, ValidationIssue};
use crate::importer::date_normalizer::DateNormalizer;
use crate::importer::entity_importer_trait::EntityValidator;
use crate::importer::field_extractor::{get_cell, get_field};
use crate::importer::schema::{ColumnRule, ColumnSpec, EntitySchema, FieldKey, ForeignKeyPolicy};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::trace;

/// Longest cell value quoted back in an issue message
pub const MAX_QUOTED_CHARS: usize = 80;

// ==========================================
// CheckedRow - typed values of a row that passed its column checks
// ==========================================
#[derive(Debug, Clone, PartialEq)]
enum CheckedValue {
    Text(String),
    Date(NaiveDate),
    Count(u32),
}

#[derive(Debug)]
pub struct CheckedRow<'a> {
    pub row_number: usize,
    values: HashMap<FieldKey, CheckedValue>,
    guardian: Option<&'a Guardian>,
    area: Option<&'a Area>,
    lookup: &'a LookupTable,
}

impl<'a> CheckedRow<'a> {
    fn new(row_number: usize, lookup: &'a LookupTable) -> Self {
        Self {
            row_number,
            values: HashMap::new(),
            guardian: None,
            area: None,
            lookup,
        }
    }

    /// Trimmed text of a field, `""` when absent
    pub fn text(&self, field: FieldKey) -> &str {
        match self.values.get(&field) {
            Some(CheckedValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn date(&self, field: FieldKey) -> Option<NaiveDate> {
        match self.values.get(&field) {
            Some(CheckedValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn count(&self, field: FieldKey) -> Option<u32> {
        match self.values.get(&field) {
            Some(CheckedValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    /// Guardian matched by a GuardianRef column
    pub fn guardian(&self) -> Option<&'a Guardian> {
        self.guardian
    }

    /// Area resolved by an AreaRef column (possibly the fallback)
    pub fn area(&self) -> Option<&'a Area> {
        self.area
    }

    pub fn lookup(&self) -> &'a LookupTable {
        self.lookup
    }
}

/// Column checks of one row
#[derive(Debug)]
pub struct RowCheck<'a> {
    pub row: CheckedRow<'a>,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

// ==========================================
// RuleEngine
// ==========================================
#[derive(Debug, Clone)]
pub struct RuleEngine {
    normalizer: DateNormalizer,
    config: ImportConfig,
}

impl RuleEngine {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            normalizer: DateNormalizer::new(config.date_window),
            config,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Validate one row and build its record when it has no errors
    ///
    /// # Returns
    /// - record: Some only when errors is empty
    /// - errors / warnings: in column check order
    pub fn validate<V>(&self, validator: &V, row: &RawRow, lookup: &LookupTable) -> RowOutcome<V::Record>
    where
        V: EntityValidator + ?Sized,
    {
        let RowCheck {
            row: checked,
            mut errors,
            warnings,
        } = self.check_row(validator.schema(), row, lookup);

        let record = if errors.is_empty() {
            let record = validator.assemble(&checked, &self.config);
            if record.is_none() {
                errors.push(ValidationIssue::new(
                    row.row_number,
                    validator.schema().kind.label(),
                    "تعذر إنشاء السجل من بيانات الصف",
                ));
            }
            record
        } else {
            None
        };

        trace!(
            row = row.row_number,
            errors = errors.len(),
            warnings = warnings.len(),
            "row validated"
        );

        RowOutcome {
            record,
            errors,
            warnings,
        }
    }

    /// Run every column rule of `schema` over `row`
    ///
    /// GuardianRef columns must come before columns that depend on the
    /// matched guardian (RequiredUnlessGuardianPhone).
    pub fn check_row<'a>(
        &self,
        schema: &EntitySchema,
        row: &RawRow,
        lookup: &'a LookupTable,
    ) -> RowCheck<'a> {
        let mut check = RowCheck {
            row: CheckedRow::new(row.row_number, lookup),
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        for column in schema.columns {
            self.check_column(column, row, lookup, &mut check);
        }

        check
    }

    fn check_column<'a>(
        &self,
        column: &ColumnSpec,
        row: &RawRow,
        lookup: &'a LookupTable,
        check: &mut RowCheck<'a>,
    ) {
        let header = column.header();
        let row_number = row.row_number;
        let value = get_field(row, column.headers);

        let required_error = || ValidationIssue::new(row_number, header, format!("{} مطلوب", header));

        match column.rule {
            ColumnRule::Required => {
                if value.is_empty() {
                    check.errors.push(required_error());
                    return;
                }
            }
            ColumnRule::Optional => {}
            ColumnRule::Date => {
                let Some(cell) = get_cell(row, column.headers) else {
                    check.errors.push(required_error());
                    return;
                };
                match self.normalizer.parse_naive_date(cell) {
                    Some(date) => {
                        check.row.values.insert(column.field, CheckedValue::Date(date));
                    }
                    None => check.errors.push(ValidationIssue::new(
                        row_number,
                        header,
                        format!(
                            "تاريخ غير صالح: \"{}\" (الصيغة المطلوبة YYYY-MM-DD)",
                            clip_text(cell.as_text().trim(), MAX_QUOTED_CHARS)
                        ),
                    )),
                }
                return;
            }
            ColumnRule::OneOf(allowed) => {
                if value.is_empty() {
                    check.errors.push(required_error());
                    return;
                }
                if !allowed.contains(&value.as_str()) {
                    check.errors.push(ValidationIssue::new(
                        row_number,
                        header,
                        format!(
                            "قيمة غير مسموحة: \"{}\". القيم المسموحة: {}",
                            clip_text(&value, MAX_QUOTED_CHARS),
                            allowed.join("، ")
                        ),
                    ));
                    return;
                }
            }
            ColumnRule::GuardianRef(policy) => {
                if value.is_empty() {
                    check.errors.push(required_error());
                    return;
                }
                let guardian = lookup.find_guardian(&value);
                check.row.guardian = guardian;
                if guardian.is_none() {
                    match policy {
                        ForeignKeyPolicy::Reject => check.errors.push(ValidationIssue::new(
                            row_number,
                            header,
                            format!(
                                "لا يوجد ولي أمر مسجل برقم الهوية {}",
                                clip_text(&value, MAX_QUOTED_CHARS)
                            ),
                        )),
                        ForeignKeyPolicy::Warn => check.warnings.push(ValidationIssue::new(
                            row_number,
                            header,
                            format!(
                                "ولي الأمر برقم الهوية {} غير مسجل، تم استيراد السجل ببيانات الملف",
                                clip_text(&value, MAX_QUOTED_CHARS)
                            ),
                        )),
                        ForeignKeyPolicy::Silent => {}
                    }
                }
            }
            ColumnRule::AreaRef => {
                if let Some(area) = lookup.find_area_by_name(&value) {
                    check.row.area = Some(area);
                } else if let Some(first) = lookup.first_area() {
                    check.row.area = Some(first);
                    let message = if value.is_empty() {
                        format!("لم يتم تحديد المنطقة، تم تعيين المنطقة \"{}\"", first.name)
                    } else {
                        format!(
                            "المنطقة \"{}\" غير موجودة، تم تعيين المنطقة \"{}\"",
                            clip_text(&value, MAX_QUOTED_CHARS),
                            first.name
                        )
                    };
                    check.warnings.push(ValidationIssue::new(row_number, header, message));
                } else {
                    check.errors.push(ValidationIssue::new(
                        row_number,
                        header,
                        "لا توجد مناطق معرفة في النظام",
                    ));
                    return;
                }
            }
            ColumnRule::RequiredUnlessGuardianPhone => {
                if value.is_empty() {
                    let fallback = check
                        .row
                        .guardian
                        .map(|g| g.phone.trim())
                        .filter(|phone| !phone.is_empty());
                    match fallback {
                        Some(phone) => {
                            check
                                .row
                                .values
                                .insert(column.field, CheckedValue::Text(phone.to_string()));
                        }
                        None => check.errors.push(required_error()),
                    }
                    return;
                }
            }
            ColumnRule::Count => {
                let count = parse_count(&value).unwrap_or(self.config.default_count);
                check.row.values.insert(column.field, CheckedValue::Count(count));
                return;
            }
        }

        check.row.values.insert(column.field, CheckedValue::Text(value));
    }
}

/// Non-negative integer; `"2.0"` is accepted, negatives and fractions are not
pub fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    let n = value.parse::<f64>().ok()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}
