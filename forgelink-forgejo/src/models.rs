use chrono::{DateTime, Utc};
use forgelink_core::IssueStatus;
use serde::{Deserialize, Deserializer, Serialize};

/// Forgejo sends `null` instead of `[]` for some empty collections.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Represents Forgejo authentication credentials
#[derive(Clone, Default)]
pub struct ForgejoAuth {
  /// Personal access token; requests are anonymous without one
  pub token: Option<String>,
}

/// Represents a Forgejo user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
  #[serde(default)]
  pub id: i64,
  pub login: String,
  #[serde(default)]
  pub full_name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

impl ApiUser {
  /// A user known only by login, as used for local assignee changes
  pub fn with_login(login: &str) -> Self {
    Self {
      id: 0,
      login: login.to_string(),
      full_name: None,
      email: None,
    }
  }
}

/// Represents a Forgejo label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLabel {
  /// Absent for labels added locally by name
  #[serde(default)]
  pub id: Option<i64>,
  pub name: String,
  #[serde(default)]
  pub color: String,
  #[serde(default)]
  pub description: Option<String>,
}

impl ApiLabel {
  /// A label known only by its identifier, as used for local label changes
  pub fn named(name: &str) -> Self {
    Self {
      id: None,
      name: name.to_string(),
      color: String::new(),
      description: None,
    }
  }
}

/// Represents a Forgejo repository
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
  pub id: i64,
  pub name: String,
  pub full_name: String,
  pub owner: ApiUser,
  #[serde(default)]
  pub private: bool,
  #[serde(default)]
  pub has_issues: bool,
  #[serde(default)]
  pub html_url: String,
}

/// Represents a Forgejo issue
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssue {
  pub id: i64,
  pub number: u64,
  /// API URL of the issue
  pub url: String,
  pub html_url: String,
  pub title: String,
  #[serde(default)]
  pub body: String,
  pub user: ApiUser,
  /// Author on the source forge for migrated issues, empty otherwise
  #[serde(default)]
  pub original_author: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub labels: Vec<ApiLabel>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub assignees: Vec<ApiUser>,
  pub state: IssueStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(default)]
  pub closed_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueOption {
  pub title: String,
  pub body: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assignees: Option<Vec<String>>,
  pub labels: Vec<i64>,
}

/// Query string for `GET /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListIssuesQuery {
  pub state: IssueStatus,
  /// Space separated label names
  #[serde(skip_serializing_if = "Option::is_none")]
  pub labels: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_by: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assigned_by: Option<String>,
}

#[cfg(test)]
mod tests {
  use forgelink_test_utils::fixtures;
  use serde_json::json;

  use super::*;

  #[test]
  fn test_issue_deserialization() {
    let mut json = fixtures::issue_json("packit", "ogr", 12, "Support Forgejo");
    json["labels"] = json!([fixtures::label_json(3, "bug")]);
    json["assignees"] = json!([fixtures::user_json("lbarcziova")]);

    let issue: ApiIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.number, 12);
    assert_eq!(issue.title, "Support Forgejo");
    assert_eq!(issue.state, IssueStatus::Open);
    assert_eq!(issue.user.login, "mfocko");
    assert_eq!(issue.labels[0].id, Some(3));
    assert_eq!(issue.labels[0].name, "bug");
    assert_eq!(issue.assignees[0].login, "lbarcziova");
    assert_eq!(issue.created_at.to_rfc3339(), "2024-03-01T10:15:00+00:00");
    assert!(issue.closed_at.is_none());
  }

  #[test]
  fn test_issue_null_collections() {
    let mut json = fixtures::issue_json("packit", "ogr", 1, "Nulls");
    json["labels"] = serde_json::Value::Null;

    let issue: ApiIssue = serde_json::from_value(json).unwrap();

    assert!(issue.labels.is_empty());
    assert!(issue.assignees.is_empty());
  }

  #[test]
  fn test_repository_deserialization() {
    let repo: ApiRepository = serde_json::from_value(fixtures::repository_json("packit", "ogr", false)).unwrap();

    assert_eq!(repo.name, "ogr");
    assert_eq!(repo.full_name, "packit/ogr");
    assert_eq!(repo.owner.login, "packit");
    assert!(!repo.has_issues);
  }

  #[test]
  fn test_create_issue_option_serialization() {
    let option = CreateIssueOption {
      title: "Test Issue".to_string(),
      body: "description".to_string(),
      assignees: None,
      labels: vec![1, 2],
    };

    assert_eq!(
      serde_json::to_value(&option).unwrap(),
      json!({
        "title": "Test Issue",
        "body": "description",
        "labels": [1, 2]
      })
    );
  }

  #[test]
  fn test_list_query_omits_missing_filters() {
    let query = ListIssuesQuery {
      state: IssueStatus::All,
      created_by: Some("mfocko".to_string()),
      ..Default::default()
    };

    assert_eq!(
      serde_json::to_value(&query).unwrap(),
      json!({
        "state": "all",
        "created_by": "mfocko"
      })
    );
  }
}
