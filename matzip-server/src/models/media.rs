//! Image path conventions
//!
//! Image columns store a relative path under a per-entity directory of the
//! media root. Bytes are never handled here.

use super::ValidationError;

/// Maximum stored path length for image columns
const MAX_IMAGE_PATH_LEN: usize = 100;

/// Upload directory for each kind of image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDir {
    Article,
    Restaurant,
    RestaurantMenu,
    Review,
    ReviewProfile,
}

impl ImageDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            // article previews land at the media root
            Self::Article => "",
            Self::Restaurant => "restaurant",
            Self::RestaurantMenu => "restaurant-menu",
            Self::Review => "review",
            Self::ReviewProfile => "review-profile",
        }
    }

    /// Normalize user input into the stored path for this directory.
    ///
    /// A bare filename is placed under the directory; a path already under
    /// the directory is kept. Absolute paths, `..` segments, backslashes and
    /// paths under another directory are rejected.
    pub fn stored_path(&self, field: &'static str, input: &str) -> Result<String, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if input.starts_with('/') || input.contains('\\') {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be a relative path",
            });
        }

        if input.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "path segments must be non-empty and may not be '.' or '..'",
            });
        }

        let dir = self.as_str();
        let path = if dir.is_empty() {
            input.to_owned()
        } else if input.contains('/') {
            match input.strip_prefix(dir).and_then(|rest| rest.strip_prefix('/')) {
                Some(_) => input.to_owned(),
                None => {
                    return Err(ValidationError::InvalidFormat {
                        field,
                        reason: "path is outside the upload directory",
                    })
                }
            }
        } else {
            format!("{}/{}", dir, input)
        };

        if path.chars().count() > MAX_IMAGE_PATH_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_IMAGE_PATH_LEN,
            });
        }

        Ok(path)
    }

    /// Same as [`stored_path`](Self::stored_path) for nullable image columns.
    pub fn optional_path(
        &self,
        field: &'static str,
        input: Option<&str>,
    ) -> Result<Option<String>, ValidationError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => self.stored_path(field, s).map(Some),
        }
    }
}
