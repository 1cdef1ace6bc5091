// ==========================================
// Aid Registry - field extractor
// ==========================================
// Header naming differs between template versions, so every logical
// field is read through an ordered alias list.
// ==========================================

use crate::domain::import::{CellValue, RawRow};

/// First alias whose trimmed value is non-empty; `""` when none match.
pub fn get_field(row: &RawRow, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .map(|value| value.as_text().trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Raw cell of the first non-blank alias (date columns keep their type)
pub fn get_cell<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a CellValue> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .find(|value| !value.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_empty_alias_wins() {
        let row = RawRow::from_pairs(
            2,
            &[("رقم الجوال", "  "), ("رقم الجوال (اختياري)", " 0599123456 ")],
        );
        assert_eq!(
            get_field(&row, &["رقم الجوال", "رقم الجوال (اختياري)"]),
            "0599123456"
        );
    }

    #[test]
    fn test_alias_order() {
        let row = RawRow::from_pairs(2, &[("b", "second"), ("a", "first")]);
        assert_eq!(get_field(&row, &["a", "b"]), "first");
    }

    #[test]
    fn test_missing_is_empty_string() {
        let row = RawRow::from_pairs(2, &[("x", "1")]);
        assert_eq!(get_field(&row, &["y", "z"]), "");
        assert_eq!(get_field(&row, &[]), "");
    }

    #[test]
    fn test_numeric_cell_as_text() {
        let row = RawRow::new(2, vec![]).with_cell("id", CellValue::Number(400.0));
        assert_eq!(get_field(&row, &["id"]), "400");
    }

    #[test]
    fn test_get_cell_keeps_type() {
        let row = RawRow::new(2, vec![])
            .with_cell("d", CellValue::Empty)
            .with_cell("date", CellValue::Number(45292.0));
        assert_eq!(get_cell(&row, &["d", "date"]), Some(&CellValue::Number(45292.0)));
        assert_eq!(get_cell(&row, &["nope"]), None);
    }
}
