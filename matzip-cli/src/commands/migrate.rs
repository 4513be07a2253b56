//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;
use matzip_core::MatzipConfig;
use matzip_server::migrations;

use super::{connect, database_url};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = MatzipConfig::load_or_default()?;
    let url = database_url(args.database_url, &config)?;
    let pool = connect(&url, &config).await?;

    migrations::run(&pool).await.context("Failed to apply migrations")?;
    println!("Schema is up to date");
    Ok(())
}
