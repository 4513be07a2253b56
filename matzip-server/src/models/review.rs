//! Reviews and their attached images

use serde::Deserialize;

use super::media::ImageDir;
use super::numeric;
use super::validation::{required_body, required_text};
use super::ValidationError;

const MAX_TITLE_LEN: usize = 100;
const MAX_AUTHOR_LEN: usize = 100;
const MAX_IMAGE_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub restaurant_id: Option<i64>,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i64,
    pub social_channel_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub restaurant_id: i64,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i16,
    pub social_channel_id: Option<i64>,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ReviewDraft, ValidationError> {
        let restaurant_id = self
            .restaurant_id
            .ok_or(ValidationError::Empty { field: "restaurant" })?;

        Ok(ReviewDraft {
            restaurant_id,
            title: required_text("title", &self.title, MAX_TITLE_LEN)?,
            author: required_text("author", &self.author, MAX_AUTHOR_LEN)?,
            profile_image: ImageDir::ReviewProfile
                .optional_path("profile_image", self.profile_image.as_deref())?,
            content: required_body("content", &self.content)?,
            rating: numeric::review_rating(self.rating)?,
            social_channel_id: self.social_channel_id,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewImageForm {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewImageDraft {
    pub name: String,
    pub image: String,
}

impl ReviewImageForm {
    pub fn validate(&self) -> Result<ReviewImageDraft, ValidationError> {
        Ok(ReviewImageDraft {
            name: required_text("name", &self.name, MAX_IMAGE_NAME_LEN)?,
            image: ImageDir::Review.stored_path("image", &self.image)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(rating: i64) -> ReviewForm {
        ReviewForm {
            restaurant_id: Some(1),
            title: "Clear broth".into(),
            author: "minji".into(),
            content: "Worth the queue.".into(),
            rating,
            ..Default::default()
        }
    }

    #[test]
    fn rating_must_be_one_to_five() {
        for ok in 1..=5 {
            assert_eq!(form(ok).validate().unwrap().rating, ok as i16);
        }
        for bad in [0, 6, -1, 100] {
            assert!(matches!(
                form(bad).validate(),
                Err(ValidationError::OutOfRange { field: "rating", .. })
            ));
        }
    }

    #[test]
    fn missing_rating_is_rejected() {
        let f: ReviewForm = serde_json::from_str(
            r#"{"restaurant_id": 1, "title": "t", "author": "a", "content": "c"}"#,
        )
        .unwrap();
        assert!(f.validate().is_err());
    }

    #[test]
    fn restaurant_is_required() {
        let mut f = form(3);
        f.restaurant_id = None;
        assert!(matches!(
            f.validate(),
            Err(ValidationError::Empty { field: "restaurant" })
        ));
    }

    #[test]
    fn profile_image_goes_under_review_profile() {
        let mut f = form(4);
        f.profile_image = Some("avatar.png".into());
        assert_eq!(
            f.validate().unwrap().profile_image.as_deref(),
            Some("review-profile/avatar.png")
        );
    }

    #[test]
    fn review_image_requires_name_and_file() {
        let f = ReviewImageForm {
            name: "table".into(),
            image: "table.jpg".into(),
        };
        assert_eq!(f.validate().unwrap().image, "review/table.jpg");
        assert!(ReviewImageForm::default().validate().is_err());
    }
}
