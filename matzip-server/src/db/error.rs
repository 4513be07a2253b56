//! Repository error type
//!
//! Postgres constraint violations are classified here so handlers never
//! inspect SQLSTATE codes themselves.

use crate::models::ValidationError;

/// Partial unique index backing the representative-image rule
pub const REPRESENTATIVE_INDEX: &str = "uq_restaurant_images_representative";

/// Unique constraints and the message shown when one is violated
const UNIQUE_CONSTRAINTS: &[(&str, &str, &str)] = &[
    ("tags_name_key", "tag", "a tag with this name already exists"),
    (
        "regions_location_key",
        "region",
        "a region with this province, district and neighborhood already exists",
    ),
];

/// Foreign keys and the form field they originate from
const FOREIGN_KEYS: &[(&str, &str)] = &[
    ("restaurant_categories_cuisine_type_id_fkey", "cuisine_type"),
    ("restaurants_category_id_fkey", "category"),
    ("restaurants_region_id_fkey", "region"),
    ("restaurant_tags_restaurant_id_fkey", "restaurant"),
    ("restaurant_tags_tag_id_fkey", "tags"),
    ("restaurant_images_restaurant_id_fkey", "restaurant"),
    ("restaurant_menus_restaurant_id_fkey", "restaurant"),
    ("reviews_restaurant_id_fkey", "restaurant"),
    ("reviews_social_channel_id_fkey", "social_channel"),
    ("review_images_review_id_fkey", "review"),
];

/// Check constraints and the field they guard
const CHECKS: &[(&str, &str)] = &[
    ("restaurants_rating_count_check", "rating_count"),
    ("restaurant_images_display_order_check", "display_order"),
    ("restaurant_menus_price_check", "price"),
    ("reviews_rating_check", "rating"),
];

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource}: {detail}")]
    Conflict {
        resource: &'static str,
        detail: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        let (code, constraint) = match &e {
            sqlx::Error::Database(db) => (
                db.code().map(|c| c.into_owned()),
                db.constraint().map(str::to_owned),
            ),
            _ => return Self::Sqlx(e),
        };

        match classify(code.as_deref(), constraint.as_deref()) {
            Some(mapped) => mapped,
            None => Self::Sqlx(e),
        }
    }
}

/// Map a SQLSTATE code and constraint name to a domain error.
fn classify(code: Option<&str>, constraint: Option<&str>) -> Option<DbError> {
    let constraint = constraint?;

    match code? {
        // unique_violation
        "23505" => {
            if constraint == REPRESENTATIVE_INDEX {
                return Some(DbError::Invalid(ValidationError::RepresentativeImageTaken));
            }
            UNIQUE_CONSTRAINTS
                .iter()
                .find(|(name, _, _)| *name == constraint)
                .map(|&(_, resource, detail)| DbError::Conflict { resource, detail })
        }
        // foreign_key_violation
        "23503" => FOREIGN_KEYS
            .iter()
            .find(|(name, _)| *name == constraint)
            .map(|&(_, field)| DbError::Invalid(ValidationError::MissingReference { field })),
        // check_violation
        "23514" => CHECKS
            .iter()
            .find(|(name, _)| *name == constraint)
            .map(|&(_, field)| {
                DbError::Invalid(ValidationError::OutOfRange {
                    field,
                    reason: "value is out of range".to_string(),
                })
            }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_index_is_validation_error() {
        let err = classify(Some("23505"), Some(REPRESENTATIVE_INDEX)).unwrap();
        assert!(matches!(
            err,
            DbError::Invalid(ValidationError::RepresentativeImageTaken)
        ));
    }

    #[test]
    fn unique_violations_are_conflicts() {
        let err = classify(Some("23505"), Some("tags_name_key")).unwrap();
        assert!(matches!(err, DbError::Conflict { resource: "tag", .. }));

        let err = classify(Some("23505"), Some("regions_location_key")).unwrap();
        assert!(matches!(err, DbError::Conflict { resource: "region", .. }));
    }

    #[test]
    fn foreign_key_names_field() {
        let err = classify(Some("23503"), Some("reviews_social_channel_id_fkey")).unwrap();
        assert!(matches!(
            err,
            DbError::Invalid(ValidationError::MissingReference {
                field: "social_channel"
            })
        ));
    }

    #[test]
    fn check_violation_names_field() {
        let err = classify(Some("23514"), Some("reviews_rating_check")).unwrap();
        assert!(matches!(
            err,
            DbError::Invalid(ValidationError::OutOfRange { field: "rating", .. })
        ));
    }

    #[test]
    fn unknown_constraints_are_not_classified() {
        assert!(classify(Some("23505"), Some("some_other_key")).is_none());
        assert!(classify(Some("40001"), Some("tags_name_key")).is_none());
        assert!(classify(Some("23505"), None).is_none());
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
