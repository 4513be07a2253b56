//! HTTP server command for the matzip admin API

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matzip_core::MatzipConfig;
use matzip_server::http::{run_server, ServerConfig};
use matzip_server::migrations;

use super::{connect, database_url};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides server.bind)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory image paths are relative to (overrides media.root)
    #[arg(long, value_name = "DIR")]
    pub media_root: Option<PathBuf>,

    /// Apply schema migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = MatzipConfig::load_or_default()?;
    let server_config = server_config(&args, &config)?;
    let url = database_url(args.database_url, &config)?;

    let pool = connect(&url, &config).await?;
    if args.migrate {
        migrations::run(&pool).await.context("Failed to apply migrations")?;
    }

    tracing::info!("Starting matzip server on {}", server_config.bind_addr);
    run_server(pool, server_config).await.context("Server error")?;
    Ok(())
}

/// Config file settings with command-line overrides applied
fn server_config(args: &ServeArgs, config: &MatzipConfig) -> Result<ServerConfig> {
    let mut server = ServerConfig::from_config(config)?;
    if let Some(bind) = args.bind {
        server.bind_addr = bind;
    }
    if args.cors_permissive {
        server.cors_permissive = true;
    }
    if let Some(root) = &args.media_root {
        server.media_root = root.clone();
    }
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let args = ServeArgs::parse_from([
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--media-root",
            "/srv/media",
        ]);
        let config = MatzipConfig::default();

        let server = server_config(&args, &config).unwrap();
        assert_eq!(server.bind_addr.port(), 8080);
        assert_eq!(server.media_root, PathBuf::from("/srv/media"));
        assert!(!server.cors_permissive);
    }

    #[test]
    fn config_file_used_without_flags() {
        let args = ServeArgs::parse_from(["serve"]);
        let mut config = MatzipConfig::default();
        config.server.cors_permissive = true;

        let server = server_config(&args, &config).unwrap();
        assert_eq!(server.bind_addr.port(), 3030);
        assert!(server.cors_permissive);
    }
}
