//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod check;
mod config;
mod issue;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

use crate::output::ColorMode;

/// Top-level CLI command for forgelink
#[derive(Parser)]
#[command(name = "forgelink")]
#[command(about = "Work with issues on Forgejo instances")]
#[command(
  long_about = "forgelink lists, shows and creates issues on Forgejo instances such as Codeberg.\n\n\
        The instance is taken from --instance, FORGEJO_INSTANCE_URL, the config file\n\
        or defaults to https://codeberg.org. API tokens come from FORGEJO_TOKEN or .netrc."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Forgejo instance URL (e.g., https://codeberg.org)
  #[arg(long, global = true, value_name = "URL")]
  pub instance: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for forgelink
#[derive(Subcommand)]
pub enum Commands {
  /// Check Forgejo authentication
  #[command(long_about = "Verify that your Forgejo token is accepted by the instance.\n\n\
            The token is read from FORGEJO_TOKEN or from the .netrc entry whose\n\
            machine matches the instance host.")]
  Check,

  /// Configuration management
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Issue operations
  #[command(long_about = "List, show and create issues of a Forgejo repository.\n\n\
            Repositories are given as owner/repo, as a web URL or as an SSH remote.\n\
            A URL also selects the instance it points to.")]
  #[command(arg_required_else_help = true)]
  Issue(issue::IssueArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let instance = cli.instance.as_deref();
  match cli.command {
    Commands::Check => check::handle_check_command(instance),
    Commands::Config(config) => config::handle_config_command(config, instance),
    Commands::Issue(issue) => issue::handle_issue_command(issue, instance),
  }
}
