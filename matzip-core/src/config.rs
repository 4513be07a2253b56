use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "MATZIP_CONFIG";

/// Starter config written by `matzip config init`
pub const CONFIG_TEMPLATE: &str = r#"# matzip configuration

[server]
bind = "127.0.0.1:3030"
cors_permissive = false

[database]
url = "${DATABASE_URL}"
max_connections = 5

[media]
root = "${HOME}/.matzip/media"
"#;

/// `${NAME}` references expanded from the environment
static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid var regex"));

/// Centralized configuration for the matzip server and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatzipConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub media: MediaSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Where uploaded images live. Only used to report paths; storage itself
/// is handled outside this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSection {
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
}

fn default_bind() -> String {
    "127.0.0.1:3030".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: false,
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for MediaSection {
    fn default() -> Self {
        Self {
            root: default_media_root(),
        }
    }
}

impl MatzipConfig {
    /// Load config from `$MATZIP_CONFIG` or ~/.matzip/config.toml
    ///
    /// Fails with an actionable error if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load config if present, defaults otherwise
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            let mut config = Self::default();
            config.expand_variables();
            Ok(config)
        }
    }

    /// Load and expand a config file at an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| CoreError::config_parse(path, e))?;
        config.expand_variables();

        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Get config file path: `$MATZIP_CONFIG` or ~/.matzip/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".matzip/config.toml")
    }

    /// Expand ${VAR} references in string values
    fn expand_variables(&mut self) {
        self.server.bind = expand_string(&self.server.bind);
        self.database.url = expand_string(&self.database.url);
        self.media.root = PathBuf::from(expand_string(&self.media.root.display().to_string()));
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|_| CoreError::invalid_value("server.bind", "not a socket address"))
    }

    /// Database URL, or None if unset or still an unresolved reference
    pub fn database_url(&self) -> Option<&str> {
        let url = self.database.url.trim();
        if url.is_empty() || url.contains("${") {
            None
        } else {
            Some(url)
        }
    }

    /// Collect human-readable problems with the current settings
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.bind_addr().is_err() {
            problems.push(format!("server.bind: {:?} is not a socket address", self.server.bind));
        }
        if self.database_url().is_none() {
            problems.push("database.url: not set".to_string());
        }
        if self.database.max_connections == 0 {
            problems.push("database.max_connections: must be at least 1".to_string());
        }

        problems
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }
}

/// Expand ${VAR} references in a string; unknown variables are left as-is
fn expand_string(s: &str) -> String {
    VAR_RE
        .replace_all(s, |caps: &regex::Captures<'_>| {
            env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: MatzipConfig = toml::from_str("[database]\nurl = \"postgres://db/matzip\"\n")
            .expect("parse");

        assert_eq!(config.server.bind, "127.0.0.1:3030");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database_url(), Some("postgres://db/matzip"));
        assert_eq!(config.media.root, PathBuf::from("media"));
    }

    #[test]
    fn template_parses() {
        let config: MatzipConfig = toml::from_str(CONFIG_TEMPLATE).expect("template parses");
        assert!(!config.server.cors_permissive);
        assert_eq!(config.bind_addr().unwrap().port(), 3030);
    }

    #[test]
    fn unresolved_database_url_is_unset() {
        let mut config = MatzipConfig::default();
        config.database.url = "${MATZIP_TEST_SURELY_UNSET_VAR}".to_string();
        config.expand_variables();

        assert_eq!(config.database_url(), None);
        assert!(config
            .validate()
            .iter()
            .any(|p| p.starts_with("database.url")));
    }

    #[test]
    fn expands_known_variables() {
        let home = env::var("HOME").unwrap_or_default();
        assert_eq!(expand_string("${HOME}/media"), format!("{}/media", home));
        assert_eq!(expand_string("no refs"), "no refs");
    }

    #[test]
    fn bad_bind_is_reported() {
        let mut config = MatzipConfig::default();
        config.server.bind = "localhost".to_string();

        assert!(matches!(
            config.bind_addr(),
            Err(CoreError::InvalidValue { .. })
        ));
        assert!(config.validate().iter().any(|p| p.starts_with("server.bind")));
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = MatzipConfig::default();
        config.database.url = "postgres://localhost/matzip".to_string();
        config.database.max_connections = 8;
        config.save_to(&path).unwrap();

        let loaded = MatzipConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let err = MatzipConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = 1").unwrap();

        let err = MatzipConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }
}
