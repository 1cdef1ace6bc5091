// ==========================================
// Aid Registry - import configuration
// ==========================================
// Every silent default of the importer is a named value here.
// ==========================================

use crate::domain::types::Gender;
use crate::importer::date_normalizer::{DateWindow, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN};
use serde::{Deserialize, Serialize};

/// Gender used when the cell is not one of the recognised spellings
pub const DEFAULT_GENDER: Gender = Gender::Male;
/// Children / wives count used when the cell does not parse
pub const DEFAULT_COUNT: u32 = 0;
/// "unspecified", used for unmatched aid rows
pub const UNSPECIFIED_LABEL: &str = "غير محدد";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub date_window: DateWindow,
    pub default_gender: Gender,
    pub default_count: u32,
    pub unspecified_label: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_window: DateWindow::new(DEFAULT_YEAR_MIN, DEFAULT_YEAR_MAX),
            default_gender: DEFAULT_GENDER,
            default_count: DEFAULT_COUNT,
            unspecified_label: UNSPECIFIED_LABEL.to_string(),
        }
    }
}

pub mod config_keys {
    pub const DATE_YEAR_MIN: &str = "import/date_year_min";
    pub const DATE_YEAR_MAX: &str = "import/date_year_max";
    pub const DEFAULT_GENDER: &str = "import/default_gender";
    pub const DEFAULT_COUNT: &str = "import/default_count";
    pub const UNSPECIFIED_LABEL: &str = "import/unspecified_label";
}
