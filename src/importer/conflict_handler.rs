// ==========================================
// Aid Registry - duplicate key detection
// ==========================================
// Responsibility: same national id twice inside one file
// Policy: first valid occurrence wins, later ones are errors
// ==========================================

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DuplicateTracker {
    first_occurrence: HashMap<String, usize>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` seen at `row`
    ///
    /// # Returns
    /// - None: first occurrence (now registered)
    /// - Some(first_row): duplicate of the row that registered it
    pub fn register(&mut self, key: &str, row: usize) -> Option<usize> {
        if let Some(first_row) = self.first_occurrence.get(key) {
            return Some(*first_row);
        }
        self.first_occurrence.insert(key.to_string(), row);
        None
    }
}

pub fn duplicate_message(key: &str, first_row: usize) -> String {
    format!("رقم الهوية {} مكرر في الملف (ورد أولاً في الصف {})", key, first_row)
}
