//! # Configuration Management
//!
//! Handles the forgelink configuration directory and the Forgejo settings
//! file, including XDG base directory support and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::url::ensure_url_scheme;

/// Environment variable overriding the Forgejo instance URL.
pub const ENV_FORGEJO_INSTANCE_URL: &str = "FORGEJO_INSTANCE_URL";

/// Environment variable carrying a Forgejo API token.
pub const ENV_FORGEJO_TOKEN: &str = "FORGEJO_TOKEN";

/// Instance used when nothing else is configured.
pub const DEFAULT_INSTANCE_URL: &str = "https://codeberg.org";

/// Settings stored in `forgejo.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgejoConfig {
  /// Base URL of the Forgejo instance (e.g., https://codeberg.org)
  #[serde(default)]
  pub instance_url: Option<String>,
}

/// Represents the configuration directories for forgelink
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("dev", "forgelink", "forgelink").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit configuration directory
  pub fn from_path<P: AsRef<Path>>(config_dir: P) -> Self {
    Self {
      config_dir: config_dir.as_ref().to_path_buf(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the Forgejo configuration file
  pub fn forgejo_config_path(&self) -> PathBuf {
    self.config_dir.join("forgejo.toml")
  }

  /// Load the Forgejo configuration from file or return the default
  pub fn load_forgejo_config(&self) -> Result<ForgejoConfig> {
    let config_path = self.forgejo_config_path();

    if !config_path.exists() {
      return Ok(ForgejoConfig::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read Forgejo config from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse Forgejo config from {}", config_path.display()))
  }

  /// Save the Forgejo configuration to file
  pub fn save_forgejo_config(&self, config: &ForgejoConfig) -> Result<()> {
    let config_path = self.forgejo_config_path();

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize Forgejo config to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write Forgejo config to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Pick the Forgejo instance URL.
///
/// The command line wins over the environment, which wins over the
/// configuration file. The result always carries a URL scheme.
pub fn resolve_instance_url(cli: Option<&str>, env: Option<&str>, config: &ForgejoConfig) -> Result<String> {
  let candidate = [cli, env, config.instance_url.as_deref()]
    .into_iter()
    .flatten()
    .find(|value| !value.trim().is_empty())
    .unwrap_or(DEFAULT_INSTANCE_URL);

  ensure_url_scheme(candidate).map(|url| url.trim_end_matches('/').to_string())
}
