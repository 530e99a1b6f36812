//! # Issue Command
//!
//! Derive-based implementation of `forgelink issue`.

use anyhow::Result;
use clap::{Args, Subcommand};
use forgelink_core::{CreateIssueParams, Issue, IssueLabel, IssueListFilter, IssueStatus};
use forgelink_forgejo::ForgejoIssue;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::clients::open_project;
use crate::output::{format_bold, format_repo_name, format_status, format_url, print_info, print_success};

/// Command for issue operations
#[derive(Args)]
pub struct IssueArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: IssueSubcommands,
}

/// Subcommands for the issue command
#[derive(Subcommand)]
pub enum IssueSubcommands {
  /// List issues of a repository
  #[command(alias = "ls")]
  List(ListArgs),

  /// Show a single issue
  Show(ShowArgs),

  /// Create a new issue
  Create(CreateArgs),
}

/// Arguments for `issue list`
#[derive(Args)]
pub struct ListArgs {
  /// Repository (owner/repo, URL or SSH remote)
  pub repo: String,

  /// Only show issues in this state
  #[arg(long, value_enum, ignore_case = true, default_value_t = IssueStatus::Open)]
  pub status: IssueStatus,

  /// Only show issues opened by this user
  #[arg(long)]
  pub author: Option<String>,

  /// Only show issues assigned to this user
  #[arg(long)]
  pub assignee: Option<String>,

  /// Only show issues carrying this label (can be repeated)
  #[arg(long = "label", value_name = "LABEL")]
  pub labels: Vec<String>,
}

/// Arguments for `issue show`
#[derive(Args)]
pub struct ShowArgs {
  /// Repository (owner/repo, URL or SSH remote)
  pub repo: String,

  /// Issue number
  pub id: u64,
}

/// Arguments for `issue create`
#[derive(Args)]
pub struct CreateArgs {
  /// Repository (owner/repo, URL or SSH remote)
  pub repo: String,

  /// Issue title
  #[arg(long)]
  pub title: String,

  /// Issue description
  #[arg(long, default_value = "")]
  pub body: String,

  /// Label name or id to attach (can be repeated)
  #[arg(long = "label", value_name = "LABEL")]
  pub labels: Vec<String>,

  /// Login of a user to assign (can be repeated)
  #[arg(long = "assignee", value_name = "LOGIN")]
  pub assignees: Vec<String>,

  /// Create a private issue
  #[arg(long)]
  pub private: bool,
}

#[derive(Tabled)]
struct IssueRow {
  #[tabled(rename = "#")]
  id: u64,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "Title")]
  title: String,
  #[tabled(rename = "Author")]
  author: String,
}

pub(crate) fn handle_issue_command(issue: IssueArgs, instance: Option<&str>) -> Result<()> {
  match issue.subcommand {
    IssueSubcommands::List(args) => handle_list_command(&args, instance),
    IssueSubcommands::Show(args) => handle_show_command(&args, instance),
    IssueSubcommands::Create(args) => handle_create_command(args, instance),
  }
}

fn handle_list_command(args: &ListArgs, instance: Option<&str>) -> Result<()> {
  let project = open_project(&args.repo, instance)?;

  let mut filter = IssueListFilter::with_status(args.status).labels(args.labels.iter().map(String::as_str));
  filter.author = args.author.clone();
  filter.assignee = args.assignee.clone();

  let issues = ForgejoIssue::get_list(&project, &filter)?;
  if issues.is_empty() {
    print_info(&format!("No issues found in {}", format_repo_name(&project.full_repo_name())));
    return Ok(());
  }

  let rows: Vec<IssueRow> = issues
    .iter()
    .map(|issue| IssueRow {
      id: issue.id(),
      status: format_status(issue.status()),
      title: issue.title().to_string(),
      author: issue.author().to_string(),
    })
    .collect();

  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}

fn handle_show_command(args: &ShowArgs, instance: Option<&str>) -> Result<()> {
  let project = open_project(&args.repo, instance)?;
  let issue = ForgejoIssue::get(&project, args.id)?;

  println!("{} {}", format_bold(&format!("#{}", issue.id())), format_bold(issue.title()));
  println!("  Repository: {}", format_repo_name(&project.full_repo_name()));
  println!("  Status: {}", format_status(issue.status()));
  println!("  Author: {}", issue.author());
  println!("  Created: {}", issue.created().format("%Y-%m-%d %H:%M"));

  let assignees: Vec<&str> = issue.assignees().iter().map(|user| user.login.as_str()).collect();
  if !assignees.is_empty() {
    println!("  Assignees: {}", assignees.join(", "));
  }

  let labels: Vec<String> = issue.labels().iter().map(|label| label.name().to_string()).collect();
  if !labels.is_empty() {
    println!("  Labels: {}", labels.join(", "));
  }

  println!("  URL: {}", format_url(issue.url()));

  if !issue.description().trim().is_empty() {
    println!("\n{}", issue.description());
  }

  Ok(())
}

fn handle_create_command(args: CreateArgs, instance: Option<&str>) -> Result<()> {
  let project = open_project(&args.repo, instance)?;

  let params = CreateIssueParams::new(args.title, args.body)
    .private(args.private)
    .labels(args.labels)
    .assignees(args.assignees);

  let issue = ForgejoIssue::create(&project, &params)?;

  print_success(&format!(
    "Created issue #{} in {}",
    issue.id(),
    format_repo_name(&project.full_repo_name())
  ));
  println!("  {}", format_url(issue.url()));

  Ok(())
}
