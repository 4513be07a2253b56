//! Inspect the admin screen registry without a running server

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use matzip_server::admin::{self, REGISTRY};

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List registered admin models
    List,
    /// Print a model's admin configuration as JSON
    Show {
        /// Model name or URL segment (e.g. "restaurant" or "restaurant-categories")
        model: String,
    },
}

pub fn run_admin(args: AdminArgs) -> Result<()> {
    match args.command {
        AdminCommands::List => {
            for model in REGISTRY {
                println!("{:<22} /admin/{:<24} {}", model.model, model.path, model.verbose_name);
            }
            Ok(())
        }
        AdminCommands::Show { model } => {
            let found = admin::find(&model).ok_or_else(|| anyhow!("Unknown admin model: {}", model))?;
            let json = serde_json::to_string_pretty(found).context("Failed to serialize admin config")?;
            println!("{}", json);
            Ok(())
        }
    }
}
