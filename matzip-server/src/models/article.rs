//! Editorial articles ("columns") shown on the site

use serde::Deserialize;

use super::media::ImageDir;
use super::validation::{required_body, required_text};
use super::ValidationError;

const MAX_TITLE_LEN: usize = 100;

/// Article form as submitted by the admin
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
}

/// Validated article fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
}

impl ArticleForm {
    /// Validate the form.
    ///
    /// # Example
    /// ```
    /// use matzip_server::models::ArticleForm;
    ///
    /// let form = ArticleForm {
    ///     title: "Best naengmyeon in Euljiro".into(),
    ///     content: "...".into(),
    ///     ..Default::default()
    /// };
    /// assert!(form.validate().is_ok());
    /// assert!(ArticleForm::default().validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ArticleDraft, ValidationError> {
        Ok(ArticleDraft {
            title: required_text("title", &self.title, MAX_TITLE_LEN)?,
            preview_image: ImageDir::Article
                .optional_path("preview_image", self.preview_image.as_deref())?,
            content: required_body("content", &self.content)?,
            show_at_index: self.show_at_index,
            is_published: self.is_published,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_false() {
        let form: ArticleForm =
            serde_json::from_str(r#"{"title": "Hello", "content": "Body"}"#).unwrap();
        let draft = form.validate().unwrap();

        assert!(!draft.show_at_index);
        assert!(!draft.is_published);
        assert_eq!(draft.preview_image, None);
    }

    #[test]
    fn rejects_long_title() {
        let form = ArticleForm {
            title: "t".repeat(101),
            content: "Body".into(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::TooLong { field: "title", max: 100 })
        ));
    }

    #[test]
    fn rejects_empty_content() {
        let form = ArticleForm {
            title: "Title".into(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Empty { field: "content" })
        ));
    }
}
