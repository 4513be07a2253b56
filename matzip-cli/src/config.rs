use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use matzip_core::{MatzipConfig, CONFIG_TEMPLATE};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Get a config value by dot-notation key
    Get(GetArgs),
    /// Print the effective config as TOML
    List,
    /// Check that the config is usable for `matzip serve`
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Dot-notation key (e.g. "database.url")
    pub key: String,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Get(args) => run_get(args),
        ConfigCommands::List => run_list(),
        ConfigCommands::Validate => run_validate(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = MatzipConfig::config_path();

    if config_path.exists() && !args.force {
        bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Set DATABASE_URL or database.url");
    println!("  3. Run: matzip config validate");

    Ok(())
}

fn run_get(args: GetArgs) -> Result<()> {
    let config = MatzipConfig::load_or_default()?;
    println!("{}", get_config_value(&config, &args.key)?);
    Ok(())
}

fn run_list() -> Result<()> {
    let config = MatzipConfig::load_or_default()?;
    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_validate() -> Result<()> {
    let config = MatzipConfig::load()?;
    println!("Config loaded from {}", MatzipConfig::config_path().display());

    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  - {}", problem);
        }
        bail!("{} configuration problem(s)", problems.len());
    }

    if !config.media.root.exists() {
        println!("  note: media root {} does not exist yet", config.media.root.display());
    }

    println!("Configuration valid");
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", MatzipConfig::config_path().display());
    Ok(())
}

fn get_config_value(config: &MatzipConfig, key: &str) -> Result<String> {
    match key {
        "server.bind" => Ok(config.server.bind.clone()),
        "server.cors_permissive" => Ok(config.server.cors_permissive.to_string()),
        "database.url" => config
            .database_url()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("database.url not set")),
        "database.max_connections" => Ok(config.database.max_connections.to_string()),
        "media.root" => Ok(config.media.root.display().to_string()),
        _ => Err(anyhow!("Unknown config key: {}", key)),
    }
}
