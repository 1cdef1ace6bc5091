// ==========================================
// Aid Registry - import templates
// ==========================================
// Sheet 1 header row is the importer's contract: it is written from the
// same EntitySchema the rule engine reads.
// Sheets: data (example row) / reference / allowed values / instructions
// ==========================================

use crate::domain::beneficiary::LookupTable;
use crate::domain::import::CellValue;
use crate::domain::types::{EntityKind, Gender, ResidenceStatus};
use crate::exporter::workbook::{Sheet, Workbook};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::schema::{schema_for, ColumnRule, ColumnSpec, EntitySchema, FieldKey, ForeignKeyPolicy};
use tracing::debug;

pub const REFERENCE_GUARDIANS_SHEET: &str = "أولياء الأمور المسجلون";
pub const REFERENCE_AREAS_SHEET: &str = "المناطق المتاحة";
pub const ALLOWED_VALUES_SHEET: &str = "القيم المسموحة";
pub const INSTRUCTIONS_SHEET: &str = "التعليمات";

/// Build the import template of `kind`
///
/// # Errors
/// - InternalError: `kind` is not importable (areas)
pub fn build_template(kind: EntityKind, lookup: &LookupTable) -> ImporterResult<Workbook> {
    let schema = schema_for(kind)
        .ok_or_else(|| ImportError::InternalError(format!("no template for {}", kind.storage_key())))?;

    let mut workbook = Workbook::new();
    workbook.add_sheet(data_sheet(schema, lookup));
    workbook.add_sheet(reference_sheet(kind, lookup));
    if let Some(sheet) = allowed_values_sheet(schema) {
        workbook.add_sheet(sheet);
    }
    workbook.add_sheet(instructions_sheet(schema));

    debug!(entity = %kind, sheets = workbook.sheets.len(), "template built");
    Ok(workbook)
}

fn data_sheet(schema: &EntitySchema, lookup: &LookupTable) -> Sheet {
    let mut sheet = Sheet::new(schema.kind.label())
        .with_column_widths(schema.columns.iter().map(|c| c.width).collect());

    sheet.push_text_row(&schema.headers());
    sheet.push_row(
        schema
            .columns
            .iter()
            .map(|column| CellValue::from(example_value(column, lookup)))
            .collect(),
    );
    sheet
}

/// Example cell; area columns show a real area name when one exists
fn example_value(column: &ColumnSpec, lookup: &LookupTable) -> String {
    match column.field {
        FieldKey::Area => lookup
            .first_area()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| column.example.to_string()),
        _ => column.example.to_string(),
    }
}

fn reference_sheet(kind: EntityKind, lookup: &LookupTable) -> Sheet {
    match kind {
        // guardians reference areas by name
        EntityKind::Guardians => {
            let mut sheet = Sheet::new(REFERENCE_AREAS_SHEET).with_column_widths(vec![24.0]);
            sheet.push_text_row(&["اسم المنطقة"]);
            for area in lookup.areas() {
                sheet.push_text_row(&[area.name.as_str()]);
            }
            sheet
        }
        _ => {
            let mut sheet = Sheet::new(REFERENCE_GUARDIANS_SHEET)
                .with_column_widths(vec![18.0, 28.0, 16.0, 18.0]);
            sheet.push_text_row(&["رقم الهوية", "الاسم", "رقم الجوال", "المنطقة"]);
            for guardian in lookup.guardians() {
                sheet.push_text_row(&[
                    guardian.national_id.as_str(),
                    guardian.name.as_str(),
                    guardian.phone.as_str(),
                    lookup.area_name(&guardian.area_id),
                ]);
            }
            sheet
        }
    }
}

/// Closed-choice columns, one column per field; None when the entity has none
fn allowed_values_sheet(schema: &EntitySchema) -> Option<Sheet> {
    let mut columns: Vec<(&str, Vec<&str>)> = Vec::new();
    for column in schema.columns {
        let values: Vec<&str> = match (column.rule, column.field) {
            (ColumnRule::OneOf(allowed), _) => allowed.to_vec(),
            (_, FieldKey::Gender) => vec![Gender::Male.label(), Gender::Female.label()],
            (_, FieldKey::ResidenceStatus) => {
                vec![ResidenceStatus::Resident.label(), ResidenceStatus::Displaced.label()]
            }
            _ => continue,
        };
        columns.push((column.header(), values));
    }

    if columns.is_empty() {
        return None;
    }

    let mut sheet = Sheet::new(ALLOWED_VALUES_SHEET).with_column_widths(vec![24.0; columns.len()]);
    sheet.push_text_row(&columns.iter().map(|(h, _)| *h).collect::<Vec<_>>());

    let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    for i in 0..height {
        sheet.push_row(
            columns
                .iter()
                .map(|(_, values)| values.get(i).map(|v| CellValue::from(*v)).unwrap_or(CellValue::Empty))
                .collect(),
        );
    }
    Some(sheet)
}

fn instructions_sheet(schema: &EntitySchema) -> Sheet {
    let mut sheet = Sheet::new(INSTRUCTIONS_SHEET)
        .with_column_widths(vec![90.0])
        .without_header();

    let mut lines = vec![
        format!("تعليمات تعبئة قالب {}", schema.kind.label()),
        "- لا تغير أسماء الأعمدة في الصف الأول من الورقة الأولى.".to_string(),
        "- احذف صف المثال قبل الاستيراد.".to_string(),
        "- اكتب التواريخ بالصيغة YYYY-MM-DD أو DD/MM/YYYY.".to_string(),
        "- أدخل أرقام الهوية والجوال كنص للحفاظ على الأصفار في البداية.".to_string(),
        String::new(),
        "الأعمدة:".to_string(),
    ];
    lines.extend(schema.columns.iter().map(describe_column));

    for line in &lines {
        sheet.push_text_row(&[line.as_str()]);
    }
    sheet
}

fn describe_column(column: &ColumnSpec) -> String {
    let rule = match column.rule {
        ColumnRule::Required => "مطلوب".to_string(),
        ColumnRule::Optional => "اختياري".to_string(),
        ColumnRule::Date => "مطلوب، تاريخ".to_string(),
        ColumnRule::OneOf(_) => format!("مطلوب، من القيم في ورقة \"{}\"", ALLOWED_VALUES_SHEET),
        ColumnRule::GuardianRef(ForeignKeyPolicy::Reject) => {
            "مطلوب، يجب أن يكون ولي الأمر مسجلاً مسبقاً".to_string()
        }
        ColumnRule::GuardianRef(ForeignKeyPolicy::Warn) => {
            "مطلوب، يقبل ولي أمر غير مسجل مع تنبيه".to_string()
        }
        ColumnRule::GuardianRef(ForeignKeyPolicy::Silent) => "مطلوب".to_string(),
        ColumnRule::AreaRef => "اسم منطقة من القائمة، وإلا تُعين المنطقة الأولى مع تنبيه".to_string(),
        ColumnRule::RequiredUnlessGuardianPhone => {
            "مطلوب إلا إذا كان صاحب الهوية ولي أمر مسجلاً له رقم جوال".to_string()
        }
        ColumnRule::Count => "رقم صحيح غير سالب".to_string(),
    };
    format!("- {}: {}", column.header(), rule)
}
