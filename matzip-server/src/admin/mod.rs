//! Admin screen configuration
//!
//! Declarative descriptors for each editable model: changelist columns,
//! form fields, search and filters, bulk actions and inline editors. The
//! HTTP layer serves them so an admin frontend can render the screens.

mod registry;

use serde::Serialize;

pub use registry::{
    ARTICLE, CUISINE_TYPE, REGION, REGISTRY, RESTAURANT, RESTAURANT_CATEGORY, REVIEW,
    SOCIAL_CHANNEL, TAG,
};

/// Length of [`content_partial`] before the ellipsis
const CONTENT_PARTIAL_LEN: usize = 20;

/// How a model appears in the admin
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelAdmin {
    /// Model name, e.g. `restaurant_category`
    pub model: &'static str,
    /// URL segment under `/admin`
    pub path: &'static str,
    pub verbose_name: &'static str,
    pub list_display: &'static [&'static str],
    /// Editable form fields, in display order
    pub fields: &'static [&'static str],
    /// Shown on change views, ignored on write
    pub readonly_fields: &'static [&'static str],
    /// Matched case-insensitively by `?q=`
    pub search_fields: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// Enables `?year=&month=` drill-down on this column
    pub date_hierarchy: Option<&'static str>,
    pub autocomplete_fields: &'static [&'static str],
    pub actions: &'static [AdminAction],
    pub inlines: &'static [InlineAdmin],
}

/// Child rows edited in a table under their parent
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InlineAdmin {
    pub model: &'static str,
    /// URL segment under the parent's change view
    pub path: &'static str,
    pub fields: &'static [&'static str],
    /// Blank rows offered for new children
    pub extra: u32,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineStyle {
    Tabular,
}

/// Bulk action applied to selected rows of a changelist
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdminAction {
    pub name: &'static str,
    pub description: &'static str,
}

/// Form descriptor for an add or change view
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub model: &'static str,
    /// `None` on the add view
    pub object_id: Option<i64>,
    pub fields: &'static [&'static str],
    pub readonly_fields: &'static [&'static str],
    pub autocomplete_fields: &'static [&'static str],
    pub inlines: &'static [InlineAdmin],
}

impl ModelAdmin {
    /// Inline editors for an object.
    ///
    /// Children need an existing parent id, so an unsaved object gets none.
    pub fn inline_instances(&self, obj: Option<i64>) -> &'static [InlineAdmin] {
        match obj {
            Some(_) => self.inlines,
            None => &[],
        }
    }

    pub fn add_view(&self) -> FormView {
        self.form_view(None)
    }

    pub fn change_view(&self, id: i64) -> FormView {
        self.form_view(Some(id))
    }

    fn form_view(&self, object_id: Option<i64>) -> FormView {
        FormView {
            model: self.model,
            object_id,
            fields: self.fields,
            readonly_fields: self.readonly_fields,
            autocomplete_fields: self.autocomplete_fields,
            inlines: self.inline_instances(object_id),
        }
    }

    pub fn action(&self, name: &str) -> Option<&'static AdminAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

/// Look up a model admin by model name or URL segment.
pub fn find(name: &str) -> Option<&'static ModelAdmin> {
    REGISTRY
        .iter()
        .copied()
        .find(|m| m.model == name || m.path == name)
}

/// First 20 characters of review content, with `...` when cut.
pub fn content_partial(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(CONTENT_PARTIAL_LEN).collect();

    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_partial_truncates_at_twenty_chars() {
        assert_eq!(content_partial("short"), "short");
        assert_eq!(content_partial("12345678901234567890"), "12345678901234567890");
        assert_eq!(
            content_partial("123456789012345678901"),
            "12345678901234567890..."
        );
    }

    #[test]
    fn content_partial_counts_chars_not_bytes() {
        let korean = "국물이 정말 맑고 깊어요. 면도 쫄깃합니다.";
        let partial = content_partial(korean);
        assert!(partial.ends_with("..."));
        assert_eq!(partial.trim_end_matches("...").chars().count(), 20);
    }

    #[test]
    fn add_view_has_no_inlines() {
        let restaurant = &RESTAURANT;
        assert!(restaurant.add_view().inlines.is_empty());
        assert!(restaurant.inline_instances(None).is_empty());

        let review = &REVIEW;
        assert!(review.add_view().inlines.is_empty());
    }

    #[test]
    fn change_view_has_inlines() {
        let restaurant = &RESTAURANT;
        let view = restaurant.change_view(7);
        assert_eq!(view.object_id, Some(7));

        let paths: Vec<_> = view.inlines.iter().map(|i| i.path).collect();
        assert_eq!(paths, vec!["menus", "images"]);

        let review = REVIEW.change_view(3);
        assert_eq!(review.inlines.len(), 1);
        assert_eq!(review.inlines[0].model, "review_image");
    }

    #[test]
    fn find_by_model_or_path() {
        assert_eq!(find("restaurant_category").map(|m| m.path), Some("restaurant-categories"));
        assert_eq!(find("social-channels").map(|m| m.model), Some("social_channel"));
        assert!(find("menu").is_none());
    }

    #[test]
    fn article_publish_action() {
        let article = &ARTICLE;
        assert!(article.action("make_published").is_some());
        assert!(article.action("delete_everything").is_none());
        assert_eq!(article.date_hierarchy, Some("created_at"));
    }
}
