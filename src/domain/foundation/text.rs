//! Text field rules shared by every persisted entity.

use super::ValidationError;

/// Characters that would break a delimited record.
const FORBIDDEN: [char; 3] = [';', '\n', '\r'];

/// Checks that a text field can be stored in a delimited record.
pub fn validate_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if let Some(c) = value.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(ValidationError::invalid_format(
            field,
            format!("must not contain {:?}", c),
        ));
    }
    Ok(())
}

/// Like [`validate_text`], and additionally rejects blank values.
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    validate_text(field, value)
}
