//! Issue status shared by all forges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// State of an issue, or a state filter when listing issues.
///
/// `All` only makes sense as a query filter; a stored issue is always either
/// open or closed.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
  /// Issue is open
  #[default]
  Open,
  /// Issue has been closed
  Closed,
  /// Matches both open and closed issues
  All,
}

impl IssueStatus {
  /// The name used by forge APIs for this status
  pub const fn as_str(&self) -> &'static str {
    match self {
      IssueStatus::Open => "open",
      IssueStatus::Closed => "closed",
      IssueStatus::All => "all",
    }
  }
}

impl fmt::Display for IssueStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for IssueStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "open" => Ok(IssueStatus::Open),
      "closed" => Ok(IssueStatus::Closed),
      "all" => Ok(IssueStatus::All),
      other => Err(format!("Unknown issue status: '{other}'")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_status_is_open() {
    assert_eq!(IssueStatus::default(), IssueStatus::Open);
  }

  #[test]
  fn test_status_names() {
    assert_eq!(IssueStatus::Open.to_string(), "open");
    assert_eq!(IssueStatus::Closed.to_string(), "closed");
    assert_eq!(IssueStatus::All.as_str(), "all");
  }

  #[test]
  fn test_status_from_str() {
    assert_eq!("open".parse::<IssueStatus>().unwrap(), IssueStatus::Open);
    assert_eq!("Closed".parse::<IssueStatus>().unwrap(), IssueStatus::Closed);
    assert_eq!(" ALL ".parse::<IssueStatus>().unwrap(), IssueStatus::All);

    let error = "merged".parse::<IssueStatus>().unwrap_err();
    assert!(error.contains("merged"));
  }

  #[test]
  fn test_status_serde() {
    let closed: IssueStatus = serde_json::from_str("\"closed\"").unwrap();
    assert_eq!(closed, IssueStatus::Closed);
    assert_eq!(serde_json::to_string(&IssueStatus::Open).unwrap(), "\"open\"");
  }
}
