//! Forgejo label view.

use forgelink_core::IssueLabel;

use crate::issue::ForgejoIssue;
use crate::models::ApiLabel;

/// A label of a Forgejo issue, borrowed from the issue it belongs to
#[derive(Clone, Copy)]
pub struct ForgejoIssueLabel<'i> {
  raw: &'i ApiLabel,
  issue: &'i ForgejoIssue<'i>,
}

impl<'i> ForgejoIssueLabel<'i> {
  pub const fn new(raw: &'i ApiLabel, issue: &'i ForgejoIssue<'i>) -> Self {
    Self { raw, issue }
  }

  /// Forgejo label id; `None` for labels only added locally
  pub const fn id(&self) -> Option<i64> {
    self.raw.id
  }

  /// The issue carrying this label
  pub const fn issue(&self) -> &'i ForgejoIssue<'i> {
    self.issue
  }
}

impl IssueLabel for ForgejoIssueLabel<'_> {
  fn name(&self) -> &str {
    &self.raw.name
  }

  fn color(&self) -> &str {
    &self.raw.color
  }
}
