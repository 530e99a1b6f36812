//! # Output Formatting
//!
//! Colored status lines and small formatting helpers for terminal output.
//! Colors follow `--colors`: forced on, forced off, or detected per stream.

use forgelink_core::IssueStatus;
use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode to owo-colors' global override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

fn paint(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  println!("{} {}", paint("✓", Stream::Stdout, Style::new().green().bold()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  eprintln!("{} {}", paint("✗", Stream::Stderr, Style::new().red().bold()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  println!("{} {}", paint("⚠", Stream::Stdout, Style::new().yellow().bold()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  println!("{} {}", paint("ℹ", Stream::Stdout, Style::new().blue().bold()), message);
}

/// Make text bold
pub fn format_bold(text: &str) -> String {
  paint(text, Stream::Stdout, Style::new().bold())
}

/// Format an issue status
pub fn format_status(status: IssueStatus) -> String {
  let style = match status {
    IssueStatus::Open => Style::new().green(),
    IssueStatus::Closed => Style::new().red(),
    IssueStatus::All => Style::new(),
  };
  paint(status.as_str(), Stream::Stdout, style)
}

/// Format a repository name
pub fn format_repo_name(name: &str) -> String {
  paint(name, Stream::Stdout, Style::new().bright_cyan().bold())
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  paint(url, Stream::Stdout, Style::new().bright_blue().underline())
}
