//! Schema migrations
//!
//! Every statement is idempotent, so running migrations on each start is
//! safe. Constraint names are referenced by `db::error` and must stay in
//! sync with it.

use sqlx::PgPool;

use super::DbError;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        preview_image VARCHAR(100),
        content TEXT NOT NULL,
        show_at_index BOOLEAN NOT NULL DEFAULT FALSE,
        is_published BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        CONSTRAINT tags_name_key UNIQUE (name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cuisine_types (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(20) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_categories (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(20) NOT NULL,
        cuisine_type_id BIGINT
            CONSTRAINT restaurant_categories_cuisine_type_id_fkey
            REFERENCES cuisine_types(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        id BIGSERIAL PRIMARY KEY,
        province VARCHAR(20) NOT NULL,
        district VARCHAR(20) NOT NULL,
        neighborhood VARCHAR(20) NOT NULL,
        CONSTRAINT regions_location_key UNIQUE (province, district, neighborhood)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS social_channels (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        branch_name VARCHAR(100),
        description TEXT,
        address VARCHAR(255) NOT NULL,
        feature VARCHAR(255),
        is_closed BOOLEAN NOT NULL DEFAULT FALSE,
        latitude NUMERIC(16, 12) NOT NULL DEFAULT 0.0000,
        longitude NUMERIC(16, 12) NOT NULL DEFAULT 0.0000,
        phone VARCHAR(16) NOT NULL,
        rating NUMERIC(3, 2) NOT NULL DEFAULT 0.0,
        rating_count INTEGER NOT NULL DEFAULT 0
            CONSTRAINT restaurants_rating_count_check CHECK (rating_count >= 0),
        start_time TIME,
        end_time TIME,
        last_order_time TIME,
        category_id BIGINT
            CONSTRAINT restaurants_category_id_fkey
            REFERENCES restaurant_categories(id) ON DELETE SET NULL,
        region_id BIGINT
            CONSTRAINT restaurants_region_id_fkey
            REFERENCES regions(id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_tags (
        restaurant_id BIGINT NOT NULL
            CONSTRAINT restaurant_tags_restaurant_id_fkey
            REFERENCES restaurants(id) ON DELETE CASCADE,
        tag_id BIGINT NOT NULL
            CONSTRAINT restaurant_tags_tag_id_fkey
            REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (restaurant_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_images (
        id BIGSERIAL PRIMARY KEY,
        restaurant_id BIGINT NOT NULL
            CONSTRAINT restaurant_images_restaurant_id_fkey
            REFERENCES restaurants(id) ON DELETE CASCADE,
        is_representative BOOLEAN NOT NULL DEFAULT FALSE,
        display_order INTEGER
            CONSTRAINT restaurant_images_display_order_check CHECK (display_order >= 0),
        name VARCHAR(100),
        image VARCHAR(100) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_menus (
        id BIGSERIAL PRIMARY KEY,
        restaurant_id BIGINT NOT NULL
            CONSTRAINT restaurant_menus_restaurant_id_fkey
            REFERENCES restaurants(id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        price INTEGER NOT NULL DEFAULT 0
            CONSTRAINT restaurant_menus_price_check CHECK (price >= 0),
        image VARCHAR(100),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        restaurant_id BIGINT NOT NULL
            CONSTRAINT reviews_restaurant_id_fkey
            REFERENCES restaurants(id) ON DELETE CASCADE,
        title VARCHAR(100) NOT NULL,
        author VARCHAR(100) NOT NULL,
        profile_image VARCHAR(100),
        content TEXT NOT NULL,
        rating SMALLINT NOT NULL
            CONSTRAINT reviews_rating_check CHECK (rating BETWEEN 1 AND 5),
        social_channel_id BIGINT
            CONSTRAINT reviews_social_channel_id_fkey
            REFERENCES social_channels(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS review_images (
        id BIGSERIAL PRIMARY KEY,
        review_id BIGINT NOT NULL
            CONSTRAINT review_images_review_id_fkey
            REFERENCES reviews(id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        image VARCHAR(100) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title)",
    "CREATE INDEX IF NOT EXISTS idx_articles_created ON articles(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_categories_cuisine_type ON restaurant_categories(cuisine_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_name ON restaurants(name)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_branch_name ON restaurants(branch_name)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_address ON restaurants(address)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_latitude ON restaurants(latitude)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_longitude ON restaurants(longitude)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_category ON restaurants(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_region ON restaurants(region_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_tags_tag ON restaurant_tags(tag_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_images_restaurant ON restaurant_images(restaurant_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_images_created ON restaurant_images(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_images_updated ON restaurant_images(updated_at)",
    // At most one representative image per restaurant, for every writer
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_restaurant_images_representative \
     ON restaurant_images(restaurant_id) WHERE is_representative",
    "CREATE INDEX IF NOT EXISTS idx_restaurant_menus_restaurant ON restaurant_menus(restaurant_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_restaurant ON reviews(restaurant_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_social_channel ON reviews(social_channel_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_updated ON reviews(updated_at)",
    "CREATE INDEX IF NOT EXISTS idx_review_images_review ON review_images(review_id)",
    "CREATE INDEX IF NOT EXISTS idx_review_images_created ON review_images(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_review_images_updated ON review_images(updated_at)",
];

/// Run all migrations in a single transaction
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    let mut tx = pool.begin().await?;

    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!(
        tables = TABLES.len(),
        indexes = INDEXES.len(),
        "Migrations complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::error::REPRESENTATIVE_INDEX;

    #[test]
    fn representative_index_name_matches_error_mapping() {
        assert!(INDEXES.iter().any(|s| s.contains(REPRESENTATIVE_INDEX)));
    }

    #[test]
    fn tables_are_created_parents_first() {
        let position = |table: &str| {
            TABLES
                .iter()
                .position(|s| s.contains(&format!("CREATE TABLE IF NOT EXISTS {} ", table)))
                .unwrap_or_else(|| panic!("missing table {}", table))
        };

        assert!(position("cuisine_types") < position("restaurant_categories"));
        assert!(position("restaurant_categories") < position("restaurants"));
        assert!(position("regions") < position("restaurants"));
        assert!(position("restaurants") < position("reviews"));
        assert!(position("social_channels") < position("reviews"));
        assert!(position("reviews") < position("review_images"));
    }

    #[test]
    fn every_statement_is_idempotent() {
        for statement in TABLES.iter().chain(INDEXES) {
            assert!(statement.contains("IF NOT EXISTS"), "{}", statement);
        }
    }
}
