//! Domain models with validation at construction
//!
//! Admin forms deserialize leniently (missing fields take defaults) and are
//! validated into drafts before any write. Invalid input returns
//! ValidationError, not panic.

pub mod article;
pub mod catalog;
pub mod media;
pub mod numeric;
pub mod pagination;
pub mod representative;
pub mod restaurant;
pub mod review;
pub mod validation;

pub use article::{ArticleDraft, ArticleForm};
pub use catalog::{CategoryDraft, CategoryForm, NameForm, RegionDraft, RegionForm};
pub use media::ImageDir;
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use representative::ensure_single_representative;
pub use restaurant::{
    RatingDraft, RatingForm, RestaurantDraft, RestaurantForm, RestaurantImageDraft,
    RestaurantImageForm, RestaurantMenuDraft, RestaurantMenuForm,
};
pub use review::{ReviewDraft, ReviewForm, ReviewImageDraft, ReviewImageForm};
pub use validation::ValidationError;
