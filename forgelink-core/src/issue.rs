//! # Issue Abstraction
//!
//! Vendor-neutral view of a forge issue and the request shapes used to create
//! and list issues. Service crates implement [`Issue`] and [`IssueLabel`] over
//! their own wire models.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::status::IssueStatus;

/// A label attached to an issue
pub trait IssueLabel {
  /// Label name as shown in the forge UI
  fn name(&self) -> &str;

  /// Label color, usually a hex string without the leading `#`
  fn color(&self) -> &str;
}

/// A forge issue as seen by the caller.
///
/// Accessors are projections over the record the forge returned. The
/// mutators (`set_title`, `close`, `add_label`, `add_assignee`) only change
/// that local record; none of them talk to the forge.
pub trait Issue: fmt::Display {
  /// User reference type used for assignees
  type User;

  /// Label view type borrowed from the issue
  type Label<'a>: IssueLabel
  where
    Self: 'a;

  fn title(&self) -> &str;

  fn set_title(&mut self, title: &str);

  /// Per-repository issue number
  fn id(&self) -> u64;

  fn status(&self) -> IssueStatus;

  fn url(&self) -> &str;

  fn description(&self) -> &str;

  /// Login of the author, or the original author for imported issues
  fn author(&self) -> &str;

  fn created(&self) -> DateTime<Utc>;

  fn assignees(&self) -> &[Self::User];

  fn labels(&self) -> Vec<Self::Label<'_>>;

  /// Mark the issue as closed
  fn close(&mut self) -> &mut Self;

  /// Append labels to the issue
  fn add_label(&mut self, labels: &[&str]);

  /// Replace the assignees of the issue with `assignees`.
  ///
  /// Despite the name this does not append to the current assignees.
  fn add_assignee(&mut self, assignees: &[&str]);
}

/// Render an issue the same way for every forge.
///
/// Long descriptions are cut after ten characters.
pub fn describe_issue<I: Issue + ?Sized>(issue: &I) -> String {
  let body = issue.description();
  let description = if body.chars().count() > 10 {
    format!("{}...", body.chars().take(10).collect::<String>())
  } else {
    body.to_string()
  };

  format!(
    "Issue(title='{}', id={}, status='{}', url='{}', description='{}', author='{}', created='{}')",
    issue.title(),
    issue.id(),
    issue.status(),
    issue.url(),
    description,
    issue.author(),
    issue.created()
  )
}

/// Filters applied when listing issues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueListFilter {
  pub status: IssueStatus,
  pub author: Option<String>,
  pub assignee: Option<String>,
  pub labels: Vec<String>,
}

impl IssueListFilter {
  /// Filter on the given status
  pub fn with_status(status: IssueStatus) -> Self {
    Self {
      status,
      ..Default::default()
    }
  }

  pub fn author(mut self, author: impl Into<String>) -> Self {
    self.author = Some(author.into());
    self
  }

  pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
    self.assignee = Some(assignee.into());
    self
  }

  pub fn labels<I, S>(mut self, labels: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.labels = labels.into_iter().map(Into::into).collect();
    self
  }
}

/// Parameters for creating a new issue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateIssueParams {
  pub title: String,
  pub body: String,
  pub private: bool,
  /// Label identifiers: numeric ids or label names
  pub labels: Vec<String>,
  /// Logins of the users to assign
  pub assignees: Vec<String>,
}

impl CreateIssueParams {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      body: body.into(),
      ..Default::default()
    }
  }

  pub fn private(mut self, private: bool) -> Self {
    self.private = private;
    self
  }

  pub fn labels<I, S>(mut self, labels: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.labels = labels.into_iter().map(Into::into).collect();
    self
  }

  pub fn assignees<I, S>(mut self, assignees: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.assignees = assignees.into_iter().map(Into::into).collect();
    self
  }
}
