//! # Config Command
//!
//! Shows and updates the Forgejo settings file.

use anyhow::Result;
use clap::{Args, Subcommand};
use forgelink_core::{ForgejoConfig, ensure_url_scheme, get_config_dirs};

use crate::clients::resolve_instance;
use crate::output::{format_url, print_info, print_success};

/// Command for configuration management
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the configuration file and the instance in effect
  Show,

  /// Store the default Forgejo instance
  SetInstance {
    /// Instance URL (e.g., https://codeberg.org)
    url: String,
  },
}

pub(crate) fn handle_config_command(config: ConfigArgs, instance: Option<&str>) -> Result<()> {
  let dirs = get_config_dirs()?;

  match config.subcommand {
    ConfigSubcommands::Show => {
      print_info(&format!("Config file: {}", dirs.forgejo_config_path().display()));
      println!("  Instance in effect: {}", format_url(&resolve_instance(instance)?));
      Ok(())
    }
    ConfigSubcommands::SetInstance { url } => {
      let url = ensure_url_scheme(&url)?;
      dirs.save_forgejo_config(&ForgejoConfig {
        instance_url: Some(url.clone()),
      })?;
      print_success(&format!("Default instance set to {}", format_url(&url)));
      Ok(())
    }
  }
}
