//! Validation error types and shared field checks

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Number outside its allowed range
    OutOfRange { field: &'static str, reason: String },

    /// Another image of the same restaurant is already representative
    RepresentativeImageTaken,

    /// Referenced row does not exist
    MissingReference { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::RepresentativeImageTaken => {
                write!(f, "only one representative image allowed")
            }
            Self::MissingReference { field } => {
                write!(f, "{} refers to a record that does not exist", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim and check a required text field.
///
/// Length is counted in characters, not bytes.
pub fn required_text(field: &'static str, s: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Trim and check an optional text field. Blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    s: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => required_text(field, trimmed, max).map(Some),
    }
}

/// Body text: required, no length cap.
pub fn required_body(field: &'static str, s: &str) -> Result<String, ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(s.to_owned())
}

/// Body text that may be left blank.
pub fn optional_body(s: Option<&str>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}

/// Reject negative integers stored in non-negative columns.
pub fn non_negative(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(value)
}
