//! Command implementations for the matzip CLI

pub mod admin;
pub mod migrate;
pub mod serve;

pub use admin::run_admin;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use matzip_core::MatzipConfig;
use matzip_server::db::{create_pool_with_options, PgPool};

/// Database URL from `--database-url`/`DATABASE_URL`, falling back to the config file
pub(crate) fn database_url(flag: Option<String>, config: &MatzipConfig) -> Result<String> {
    flag.filter(|url| !url.trim().is_empty())
        .or_else(|| config.database_url().map(str::to_owned))
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or database.url in the config file")
}

/// Connect with the configured pool size
pub(crate) async fn connect(url: &str, config: &MatzipConfig) -> Result<PgPool> {
    create_pool_with_options(url, config.database.max_connections)
        .await
        .context("Failed to create database pool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_config() {
        let mut config = MatzipConfig::default();
        config.database.url = "postgres://config/matzip".to_string();

        let url = database_url(Some("postgres://flag/matzip".to_string()), &config).unwrap();
        assert_eq!(url, "postgres://flag/matzip");

        let url = database_url(Some("  ".to_string()), &config).unwrap();
        assert_eq!(url, "postgres://config/matzip");
    }

    #[test]
    fn missing_url_is_actionable() {
        let err = database_url(None, &MatzipConfig::default()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }
}
