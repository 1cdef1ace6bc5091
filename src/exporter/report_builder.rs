// ==========================================
// Aid Registry - error / warning reports
// ==========================================
// Sheet 1: row / field / message / category
// Sheet 2: remediation tips
// ==========================================

use crate::domain::import::{clip_text, CellValue, ValidationIssue};
use crate::domain::types::IssueLevel;
use crate::exporter::workbook::{Sheet, Workbook, MAX_CELL_CHARS};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ERRORS_SHEET: &str = "الأخطاء";
pub const WARNINGS_SHEET: &str = "التنبيهات";
pub const TIPS_SHEET: &str = "نصائح التصحيح";

pub const REPORT_HEADERS: [&str; 4] = ["رقم الصف", "الحقل", "الرسالة", "التصنيف"];

// ==========================================
// IssueCategory - keyword match on the field name
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    Date,
    Identity,
    NotAllowed,
    Phone,
    MissingName,
    General,
}

/// Checked in order, first match wins
const CATEGORY_KEYWORDS: &[(&str, IssueCategory)] = &[
    ("تاريخ", IssueCategory::Date),
    ("هوية", IssueCategory::Identity),
    ("نوع", IssueCategory::NotAllowed),
    ("جوال", IssueCategory::Phone),
    ("اسم", IssueCategory::MissingName),
];

impl IssueCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Date => "خطأ في التاريخ",
            IssueCategory::Identity => "خطأ في رقم الهوية",
            IssueCategory::NotAllowed => "قيمة غير مسموحة",
            IssueCategory::Phone => "خطأ في رقم الجوال",
            IssueCategory::MissingName => "اسم مفقود",
            IssueCategory::General => "خطأ عام",
        }
    }
}

pub fn categorize_issue(field: &str) -> IssueCategory {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| field.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(IssueCategory::General)
}

pub fn build_error_report(errors: &[ValidationIssue]) -> Workbook {
    build_issue_report(IssueLevel::Error, errors)
}

pub fn build_warning_report(warnings: &[ValidationIssue]) -> Workbook {
    build_issue_report(IssueLevel::Warning, warnings)
}

pub fn build_issue_report(level: IssueLevel, issues: &[ValidationIssue]) -> Workbook {
    let sheet_name = match level {
        IssueLevel::Error => ERRORS_SHEET,
        IssueLevel::Warning => WARNINGS_SHEET,
    };

    let mut sheet = Sheet::new(sheet_name).with_column_widths(vec![10.0, 24.0, 60.0, 20.0]);
    sheet.push_text_row(&REPORT_HEADERS);
    for issue in issues {
        sheet.push_row(vec![
            CellValue::Number(issue.row as f64),
            CellValue::from(issue.field.as_str()),
            CellValue::from(clip_text(&issue.message, MAX_CELL_CHARS - 1)),
            CellValue::from(categorize_issue(&issue.field).label()),
        ]);
    }

    debug!(?level, issues = issues.len(), "issue report built");
    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet);
    workbook.add_sheet(tips_sheet(level));
    workbook
}

fn tips_sheet(level: IssueLevel) -> Sheet {
    let mut sheet = Sheet::new(TIPS_SHEET).with_column_widths(vec![90.0]);
    sheet.push_text_row(&["نصائح"]);

    let intro = match level {
        IssueLevel::Error => "الصفوف المذكورة لم يتم استيرادها. صححها في الملف الأصلي ثم أعد الاستيراد.",
        IssueLevel::Warning => "الصفوف المذكورة تم استيرادها، لكن يُنصح بمراجعة بياناتها.",
    };
    let tips = [
        intro,
        "رقم الصف يطابق رقم الصف في برنامج الجداول (صف العناوين هو الصف 1).",
        "اكتب التواريخ بالصيغة YYYY-MM-DD أو DD/MM/YYYY.",
        "تأكد من أن رقم الهوية مسجل لولي أمر موجود عند الحاجة.",
        "استخدم القيم المسموحة كما هي في ورقة القيم المسموحة في القالب.",
        "لا تترك الحقول المطلوبة فارغة.",
    ];
    for tip in tips {
        sheet.push_text_row(&[tip]);
    }
    sheet
}
