//! Restaurants and the rows edited inline under them (images, menus)

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::media::ImageDir;
use super::numeric;
use super::validation::{non_negative, optional_body, optional_text, required_text};
use super::ValidationError;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 255;
const MAX_FEATURE_LEN: usize = 255;
/// E.164 is at most 15 digits plus the leading '+'
const MAX_PHONE_LEN: usize = 16;

/// Restaurant form.
///
/// `rating` and `rating_count` are read-only here; see [`RatingForm`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantForm {
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: Option<String>,
    pub is_closed: bool,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub phone: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
    pub region_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: Option<String>,
    pub is_closed: bool,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub phone: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
    pub region_id: Option<i64>,
    /// Deduplicated, ascending
    pub tag_ids: Vec<i64>,
}

impl RestaurantForm {
    pub fn validate(&self) -> Result<RestaurantDraft, ValidationError> {
        let mut tag_ids = self.tag_ids.clone();
        tag_ids.sort_unstable();
        tag_ids.dedup();

        Ok(RestaurantDraft {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            branch_name: optional_text("branch_name", self.branch_name.as_deref(), MAX_NAME_LEN)?,
            description: optional_body(self.description.as_deref()),
            address: required_text("address", &self.address, MAX_ADDRESS_LEN)?,
            feature: optional_text("feature", self.feature.as_deref(), MAX_FEATURE_LEN)?,
            is_closed: self.is_closed,
            latitude: numeric::latitude(self.latitude.unwrap_or(Decimal::ZERO))?,
            longitude: numeric::longitude(self.longitude.unwrap_or(Decimal::ZERO))?,
            phone: required_text("phone", &self.phone, MAX_PHONE_LEN)?,
            start_time: self.start_time,
            end_time: self.end_time,
            last_order_time: self.last_order_time,
            category_id: self.category_id,
            region_id: self.region_id,
            tag_ids,
        })
    }
}

/// Manual maintenance of the rating aggregate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RatingForm {
    pub rating: Decimal,
    pub rating_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingDraft {
    pub rating: Decimal,
    pub rating_count: i32,
}

impl RatingForm {
    pub fn validate(&self) -> Result<RatingDraft, ValidationError> {
        let count = non_negative("rating_count", self.rating_count)?;
        let rating_count = i32::try_from(count).map_err(|_| ValidationError::OutOfRange {
            field: "rating_count",
            reason: "too large".to_string(),
        })?;

        Ok(RatingDraft {
            rating: numeric::restaurant_rating(self.rating)?,
            rating_count,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantImageForm {
    pub is_representative: bool,
    pub display_order: Option<i64>,
    pub name: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantImageDraft {
    pub is_representative: bool,
    pub display_order: Option<i32>,
    pub name: Option<String>,
    pub image: String,
}

impl RestaurantImageForm {
    pub fn validate(&self) -> Result<RestaurantImageDraft, ValidationError> {
        let display_order = self
            .display_order
            .map(|order| non_negative("display_order", order))
            .transpose()?
            .map(|order| {
                i32::try_from(order).map_err(|_| ValidationError::OutOfRange {
                    field: "display_order",
                    reason: "too large".to_string(),
                })
            })
            .transpose()?;

        Ok(RestaurantImageDraft {
            is_representative: self.is_representative,
            display_order,
            name: optional_text("name", self.name.as_deref(), MAX_NAME_LEN)?,
            image: ImageDir::Restaurant.stored_path("image", &self.image)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantMenuForm {
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantMenuDraft {
    pub name: String,
    pub price: i32,
    pub image: Option<String>,
}

impl RestaurantMenuForm {
    pub fn validate(&self) -> Result<RestaurantMenuDraft, ValidationError> {
        let price = non_negative("price", self.price)?;
        let price = i32::try_from(price).map_err(|_| ValidationError::OutOfRange {
            field: "price",
            reason: "too large".to_string(),
        })?;

        Ok(RestaurantMenuDraft {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            price,
            image: ImageDir::RestaurantMenu.optional_path("image", self.image.as_deref())?,
        })
    }
}
