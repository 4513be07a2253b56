//! Fixed-point and bounded numeric fields
//!
//! Decimal limits match the NUMERIC columns they are stored in:
//! coordinates are NUMERIC(16,12), restaurant ratings NUMERIC(3,2).

use rust_decimal::Decimal;

use super::ValidationError;

const COORDINATE_PLACES: u32 = 12;
const COORDINATE_INT_DIGITS: u32 = 4;
const RATING_PLACES: u32 = 2;
const RATING_INT_DIGITS: u32 = 1;

pub const REVIEW_RATING_MIN: i16 = 1;
pub const REVIEW_RATING_MAX: i16 = 5;

/// Check a decimal fits NUMERIC(int_digits + places, places).
///
/// Trailing zeros do not count against the fractional digits.
fn fits_numeric(
    field: &'static str,
    value: Decimal,
    int_digits: u32,
    places: u32,
) -> Result<Decimal, ValidationError> {
    let normalized = value.normalize();

    if normalized.scale() > places {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("at most {} decimal places allowed", places),
        });
    }

    let limit = Decimal::from(10_i64.pow(int_digits));
    if normalized.abs() >= limit {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("at most {} digits before the decimal point", int_digits),
        });
    }

    Ok(normalized)
}

/// Latitude in degrees, [-90, 90].
pub fn latitude(value: Decimal) -> Result<Decimal, ValidationError> {
    let value = fits_numeric("latitude", value, COORDINATE_INT_DIGITS, COORDINATE_PLACES)?;
    if value.abs() > Decimal::from(90) {
        return Err(ValidationError::OutOfRange {
            field: "latitude",
            reason: "must be between -90 and 90".to_string(),
        });
    }
    Ok(value)
}

/// Longitude in degrees, [-180, 180].
pub fn longitude(value: Decimal) -> Result<Decimal, ValidationError> {
    let value = fits_numeric("longitude", value, COORDINATE_INT_DIGITS, COORDINATE_PLACES)?;
    if value.abs() > Decimal::from(180) {
        return Err(ValidationError::OutOfRange {
            field: "longitude",
            reason: "must be between -180 and 180".to_string(),
        });
    }
    Ok(value)
}

/// Aggregate restaurant rating, 0 <= rating < 10 with two decimal places.
pub fn restaurant_rating(value: Decimal) -> Result<Decimal, ValidationError> {
    let value = fits_numeric("rating", value, RATING_INT_DIGITS, RATING_PLACES)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::OutOfRange {
            field: "rating",
            reason: "must not be negative".to_string(),
        });
    }
    Ok(value)
}

/// Star rating attached to a review.
pub fn review_rating(value: i64) -> Result<i16, ValidationError> {
    if !(i64::from(REVIEW_RATING_MIN)..=i64::from(REVIEW_RATING_MAX)).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "rating",
            reason: format!(
                "must be between {} and {}",
                REVIEW_RATING_MIN, REVIEW_RATING_MAX
            ),
        });
    }
    Ok(value as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn coordinates_accept_twelve_places() {
        assert_eq!(latitude(dec("37.566535123456")).unwrap(), dec("37.566535123456"));
        assert_eq!(longitude(dec("126.977969000000")).unwrap(), dec("126.977969"));
    }

    #[test]
    fn coordinates_reject_excess_precision() {
        let err = latitude(dec("37.5665351234567")).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "latitude", .. }));
    }

    #[test]
    fn coordinates_reject_off_globe() {
        assert!(latitude(dec("90.5")).is_err());
        assert!(latitude(dec("-90")).is_ok());
        assert!(longitude(dec("-180.000001")).is_err());
        assert!(longitude(dec("9999")).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(restaurant_rating(dec("4.50")).unwrap(), dec("4.5"));
        assert!(restaurant_rating(dec("9.99")).is_ok());
        assert!(restaurant_rating(dec("10")).is_err());
        assert!(restaurant_rating(dec("4.125")).is_err());
        assert!(restaurant_rating(dec("-0.5")).is_err());
        assert!(restaurant_rating(Decimal::ZERO).is_ok());
    }

    #[test]
    fn review_rating_one_to_five() {
        assert_eq!(review_rating(1).unwrap(), 1);
        assert_eq!(review_rating(5).unwrap(), 5);
        assert!(review_rating(0).is_err());
        assert!(review_rating(6).is_err());
        assert!(review_rating(-3).is_err());
    }
}
