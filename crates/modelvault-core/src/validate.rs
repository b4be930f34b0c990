//! Bounded-text validation for model metadata fields.
//!
//! The schema stores descriptions and QA remarks as plain TEXT; the length
//! bounds from the data model are enforced here, before any row is written.

use crate::db::StoreError;

/// Maximum length of a model record's description.
pub const RECORD_DESCRIPTION_MAX: usize = 1000;

/// Maximum length of a version's description.
pub const VERSION_DESCRIPTION_MAX: usize = 2000;

/// Maximum length of a version's QA remarks.
pub const QA_REMARKS_MAX: usize = 2000;

/// Reject `value` when it exceeds `max` characters.
///
/// Counts characters, not bytes, so multi-byte text is bounded the same way
/// a varchar column would bound it.
pub fn check_text_bound(field: &str, value: &str, max: usize) -> Result<(), StoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::Validation(format!(
            "{field} is {len} characters, limit is {max}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_at_the_bound() {
        let text = "x".repeat(RECORD_DESCRIPTION_MAX);
        assert!(check_text_bound("description", &text, RECORD_DESCRIPTION_MAX).is_ok());
    }

    #[test]
    fn rejects_text_over_the_bound() {
        let text = "x".repeat(RECORD_DESCRIPTION_MAX + 1);
        let err = check_text_bound("description", &text, RECORD_DESCRIPTION_MAX).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Four characters, twelve bytes
        let text = "日本語文";
        assert!(check_text_bound("remarks", text, 4).is_ok());
        assert!(check_text_bound("remarks", text, 3).is_err());
    }

    #[test]
    fn empty_text_is_fine() {
        assert!(check_text_bound("description", "", 0).is_ok());
    }
}
