//! Registered model admins

use super::{AdminAction, InlineAdmin, InlineStyle, ModelAdmin};

const NONE: &[&str] = &[];

pub static ARTICLE: ModelAdmin = ModelAdmin {
    model: "article",
    path: "articles",
    verbose_name: "article",
    list_display: &["id", "title", "show_at_index", "is_published", "created_at", "modified_at"],
    fields: &["title", "preview_image", "content", "show_at_index", "is_published"],
    readonly_fields: NONE,
    search_fields: &["title"],
    list_filter: &["show_at_index", "is_published"],
    date_hierarchy: Some("created_at"),
    autocomplete_fields: NONE,
    actions: &[AdminAction {
        name: "make_published",
        description: "Mark the selected articles as published",
    }],
    inlines: &[],
};

pub static TAG: ModelAdmin = ModelAdmin {
    model: "tag",
    path: "tags",
    verbose_name: "tag",
    list_display: &["id", "name"],
    fields: &["name"],
    readonly_fields: NONE,
    search_fields: &["name"],
    list_filter: NONE,
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[],
};

const RESTAURANT_MENU_INLINE: InlineAdmin = InlineAdmin {
    model: "restaurant_menu",
    path: "menus",
    fields: &["name", "price", "image"],
    extra: 1,
    style: InlineStyle::Tabular,
};

const RESTAURANT_IMAGE_INLINE: InlineAdmin = InlineAdmin {
    model: "restaurant_image",
    path: "images",
    fields: &["is_representative", "display_order", "name", "image"],
    extra: 1,
    style: InlineStyle::Tabular,
};

pub static RESTAURANT: ModelAdmin = ModelAdmin {
    model: "restaurant",
    path: "restaurants",
    verbose_name: "restaurant",
    list_display: &["id", "name", "branch_name", "is_closed", "phone", "rating", "rating_count"],
    fields: &[
        "name",
        "branch_name",
        "category",
        "region",
        "address",
        "description",
        "feature",
        "is_closed",
        "phone",
        "latitude",
        "longitude",
        "start_time",
        "end_time",
        "last_order_time",
        "tags",
    ],
    readonly_fields: &["rating", "rating_count"],
    search_fields: &["name", "branch_name"],
    list_filter: &["tags"],
    date_hierarchy: None,
    autocomplete_fields: &["tags"],
    actions: &[],
    inlines: &[RESTAURANT_MENU_INLINE, RESTAURANT_IMAGE_INLINE],
};

pub static RESTAURANT_CATEGORY: ModelAdmin = ModelAdmin {
    model: "restaurant_category",
    path: "restaurant-categories",
    verbose_name: "restaurant category",
    list_display: &["name"],
    fields: &["cuisine_type", "name"],
    readonly_fields: NONE,
    search_fields: NONE,
    list_filter: NONE,
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[],
};

const REVIEW_IMAGE_INLINE: InlineAdmin = InlineAdmin {
    model: "review_image",
    path: "images",
    fields: &["name", "image"],
    extra: 1,
    style: InlineStyle::Tabular,
};

pub static REVIEW: ModelAdmin = ModelAdmin {
    model: "review",
    path: "reviews",
    verbose_name: "review",
    list_display: &["id", "restaurant_name", "author", "rating", "content_partial"],
    fields: &[
        "restaurant",
        "title",
        "author",
        "profile_image",
        "content",
        "rating",
        "social_channel",
    ],
    readonly_fields: NONE,
    search_fields: NONE,
    list_filter: NONE,
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[REVIEW_IMAGE_INLINE],
};

pub static SOCIAL_CHANNEL: ModelAdmin = ModelAdmin {
    model: "social_channel",
    path: "social-channels",
    verbose_name: "social channel",
    list_display: &["id", "name"],
    fields: &["name"],
    readonly_fields: NONE,
    search_fields: NONE,
    list_filter: NONE,
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[],
};

pub static CUISINE_TYPE: ModelAdmin = ModelAdmin {
    model: "cuisine_type",
    path: "cuisine-types",
    verbose_name: "cuisine type",
    list_display: &["id", "name"],
    fields: &["name"],
    readonly_fields: NONE,
    search_fields: &["name"],
    list_filter: NONE,
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[],
};

pub static REGION: ModelAdmin = ModelAdmin {
    model: "region",
    path: "regions",
    verbose_name: "region",
    list_display: &["id", "province", "district", "neighborhood"],
    fields: &["province", "district", "neighborhood"],
    readonly_fields: NONE,
    search_fields: &["province", "district", "neighborhood"],
    list_filter: &["province"],
    date_hierarchy: None,
    autocomplete_fields: NONE,
    actions: &[],
    inlines: &[],
};

/// Every model exposed in the admin, in index order
pub static REGISTRY: &[&ModelAdmin] = &[
    &ARTICLE,
    &TAG,
    &RESTAURANT,
    &RESTAURANT_CATEGORY,
    &REVIEW,
    &SOCIAL_CHANNEL,
    &CUISINE_TYPE,
    &REGION,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn models_and_paths_are_unique() {
        let models: HashSet<_> = REGISTRY.iter().map(|m| m.model).collect();
        let paths: HashSet<_> = REGISTRY.iter().map(|m| m.path).collect();
        assert_eq!(models.len(), REGISTRY.len());
        assert_eq!(paths.len(), REGISTRY.len());
    }

    #[test]
    fn readonly_fields_are_not_editable() {
        for admin in REGISTRY {
            for field in admin.readonly_fields {
                assert!(!admin.fields.contains(field), "{}.{}", admin.model, field);
            }
        }
    }

    #[test]
    fn autocomplete_fields_are_form_fields() {
        for admin in REGISTRY {
            for field in admin.autocomplete_fields {
                assert!(admin.fields.contains(field), "{}.{}", admin.model, field);
            }
        }
    }

    #[test]
    fn restaurant_rating_is_readonly() {
        assert_eq!(RESTAURANT.readonly_fields, &["rating", "rating_count"]);
        assert!(!RESTAURANT.fields.contains(&"rating"));
    }
}
