// ==========================================
// Aid Registry - export layer
// ==========================================
// Responsibility: templates, data exports and issue reports as
// Workbook values; rendering to .xlsx happens in workbook.rs
// ==========================================

pub mod data_export;
pub mod report_builder;
pub mod template_builder;
pub mod workbook;

pub use data_export::{build_export, ExportRow};
pub use report_builder::{
    build_error_report, build_issue_report, build_warning_report, categorize_issue, IssueCategory,
    ERRORS_SHEET, TIPS_SHEET, WARNINGS_SHEET,
};
pub use template_builder::{
    build_template, ALLOWED_VALUES_SHEET, INSTRUCTIONS_SHEET, REFERENCE_AREAS_SHEET,
    REFERENCE_GUARDIANS_SHEET,
};
pub use workbook::{Sheet, Workbook};
