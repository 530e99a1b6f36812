//! # Forgejo Issue Adapter
//!
//! Presents Forgejo issues through the vendor-neutral [`Issue`] trait. The
//! constructors (`create`, `get`, `get_list`) talk to the API; the mutators
//! only touch the local record and never send an update back to Forgejo.
//!
//! Only a 404 from Forgejo is translated, into [`ForgeError::ForgejoApi`].
//! Every other client error passes through as [`ForgeError::Service`].

use std::fmt;

use chrono::{DateTime, Utc};
use forgelink_core::{CreateIssueParams, ForgeError, Issue, IssueListFilter, IssueStatus, describe_issue};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::label::ForgejoIssueLabel;
use crate::models::{ApiIssue, ApiLabel, ApiUser, CreateIssueOption, ListIssuesQuery};
use crate::project::ForgejoProject;

/// An issue on a Forgejo repository.
///
/// [`Issue::id`] is the per-repository number and [`Issue::url`] the web page.
/// The instance-wide id and the API URL are available through
/// [`ForgejoIssue::raw`] as `raw().id` and `raw().url`.
pub struct ForgejoIssue<'p> {
  raw: ApiIssue,
  project: &'p ForgejoProject,
}

/// Map a 404 to [`ForgeError::ForgejoApi`], pass anything else through.
fn translate_not_found(error: ApiError, message: impl Into<String>) -> ForgeError {
  if !error.is_not_found() {
    return error.into();
  }

  let message = message.into();
  error!("{}", message);
  ForgeError::forgejo_api(message, error)
}

/// Turn label identifiers into the numeric ids the API expects.
///
/// Numeric identifiers are used as they are. Anything else is looked up by
/// name among the repository labels, which costs one extra request.
fn resolve_label_ids(project: &ForgejoProject, labels: &[String]) -> Result<Vec<i64>, ForgeError> {
  let parsed: Vec<Option<i64>> = labels.iter().map(|label| label.trim().parse::<i64>().ok()).collect();
  if parsed.iter().all(Option::is_some) {
    return Ok(parsed.into_iter().flatten().collect());
  }

  let known = project.labels()?;
  labels
    .iter()
    .zip(parsed)
    .map(|(label, id)| match id {
      Some(id) => Ok(id),
      None => known
        .iter()
        .find(|candidate| candidate.name == *label)
        .and_then(|candidate| candidate.id)
        .ok_or_else(|| ForgeError::UnknownLabel(label.clone())),
    })
    .collect()
}

impl<'p> ForgejoIssue<'p> {
  pub const fn new(raw: ApiIssue, project: &'p ForgejoProject) -> Self {
    Self { raw, project }
  }

  /// The decoded API record behind this view
  pub const fn raw(&self) -> &ApiIssue {
    &self.raw
  }

  pub const fn project(&self) -> &'p ForgejoProject {
    self.project
  }

  /// Create a new issue.
  ///
  /// # Errors
  ///
  /// - [`ForgeError::OperationNotSupported`] for private issues, before any
  ///   request is made
  /// - [`ForgeError::IssueTrackerDisabled`] when the repository has no issue
  ///   tracker
  /// - [`ForgeError::UnknownLabel`] for a label name the repository lacks
  /// - [`ForgeError::ForgejoApi`] when Forgejo answers 404
  pub fn create(project: &'p ForgejoProject, params: &CreateIssueParams) -> Result<Self, ForgeError> {
    // private issues are tracked upstream in https://codeberg.org/forgejo/design/issues/2
    if params.private {
      return Err(ForgeError::OperationNotSupported(
        "Private issues are not supported by Forgejo.".to_string(),
      ));
    }

    if !project.has_issues()? {
      return Err(ForgeError::IssueTrackerDisabled);
    }

    let labels = resolve_label_ids(project, &params.labels)?;
    let repo = project.forgejo_repo()?;

    let option = CreateIssueOption {
      title: params.title.clone(),
      body: params.body.clone(),
      assignees: (!params.assignees.is_empty()).then(|| params.assignees.clone()),
      labels,
    };

    project
      .service()
      .api()
      .create_issue(&repo.owner.login, &repo.name, &option)
      .map(|raw| Self::new(raw, project))
      .map_err(|e| translate_not_found(e, "Issue could not be created."))
  }

  /// Fetch an issue by its per-repository number.
  ///
  /// # Errors
  ///
  /// - [`ForgeError::IssueTrackerDisabled`] when the repository has no issue
  ///   tracker
  /// - [`ForgeError::ForgejoApi`] naming `issue_id` when it does not exist
  pub fn get(project: &'p ForgejoProject, issue_id: u64) -> Result<Self, ForgeError> {
    if !project.has_issues()? {
      return Err(ForgeError::IssueTrackerDisabled);
    }

    let repo = project.forgejo_repo()?;

    project
      .service()
      .api()
      .get_issue(&repo.owner.login, &repo.name, issue_id)
      .map(|raw| Self::new(raw, project))
      .map_err(|e| translate_not_found(e, format!("Issue {issue_id} was not found.")))
  }

  /// List issues matching `filter`.
  ///
  /// Several labels are sent as one space separated `labels` value.
  ///
  /// # Errors
  ///
  /// - [`ForgeError::IssueTrackerDisabled`] when the repository has no issue
  ///   tracker
  /// - [`ForgeError::ForgejoApi`] when Forgejo answers 404
  pub fn get_list(project: &'p ForgejoProject, filter: &IssueListFilter) -> Result<Vec<Self>, ForgeError> {
    if !project.has_issues()? {
      return Err(ForgeError::IssueTrackerDisabled);
    }

    let repo = project.forgejo_repo()?;

    let query = ListIssuesQuery {
      state: filter.status,
      labels: (!filter.labels.is_empty()).then(|| filter.labels.join(" ")),
      created_by: filter.author.clone(),
      assigned_by: filter.assignee.clone(),
    };
    debug!("Issue list query: {:?}", query);

    let issues = project
      .service()
      .api()
      .list_issues(&repo.owner.login, &repo.name, &query)
      .map_err(|e| translate_not_found(e, "Could not access issues."))?;

    Ok(issues.into_iter().map(|raw| Self::new(raw, project)).collect())
  }
}

impl fmt::Display for ForgejoIssue<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Forgejo{}", describe_issue(self))
  }
}

impl Issue for ForgejoIssue<'_> {
  type User = ApiUser;
  type Label<'a>
    = ForgejoIssueLabel<'a>
  where
    Self: 'a;

  fn title(&self) -> &str {
    &self.raw.title
  }

  fn set_title(&mut self, title: &str) {
    self.raw.title = title.to_string();
  }

  fn id(&self) -> u64 {
    self.raw.number
  }

  fn status(&self) -> IssueStatus {
    self.raw.state
  }

  fn url(&self) -> &str {
    &self.raw.html_url
  }

  fn description(&self) -> &str {
    &self.raw.body
  }

  fn author(&self) -> &str {
    if self.raw.original_author.is_empty() {
      &self.raw.user.login
    } else {
      &self.raw.original_author
    }
  }

  fn created(&self) -> DateTime<Utc> {
    self.raw.created_at
  }

  fn assignees(&self) -> &[ApiUser] {
    &self.raw.assignees
  }

  fn labels(&self) -> Vec<ForgejoIssueLabel<'_>> {
    self.raw.labels.iter().map(|label| ForgejoIssueLabel::new(label, self)).collect()
  }

  fn close(&mut self) -> &mut Self {
    self.raw.state = IssueStatus::Closed;
    self
  }

  fn add_label(&mut self, labels: &[&str]) {
    self.raw.labels.extend(labels.iter().map(|label| ApiLabel::named(label)));
  }

  fn add_assignee(&mut self, assignees: &[&str]) {
    self.raw.assignees = assignees.iter().map(|login| ApiUser::with_login(login)).collect();
  }
}

#[cfg(test)]
mod tests {
  use forgelink_core::IssueLabel;
  use forgelink_test_utils::{MockForgejo, fixtures};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::service::ForgejoService;

  fn project(server: &MockForgejo) -> ForgejoProject {
    ForgejoService::new(&server.uri(), Some("test_token")).get_project("packit", "ogr")
  }

  fn decode(raw: serde_json::Value) -> ApiIssue {
    serde_json::from_value(raw).unwrap()
  }

  #[test]
  fn test_private_issue_is_rejected_without_requests() {
    let server = MockForgejo::start();
    let project = project(&server);

    for (title, body) in [("Test Issue", "a real nice testing description"), ("", "")] {
      let params = CreateIssueParams::new(title, body).private(true);
      let error = ForgejoIssue::create(&project, &params).err().unwrap();
      assert!(matches!(error, ForgeError::OperationNotSupported(_)));
      assert_eq!(error.to_string(), "Private issues are not supported by Forgejo.");
    }

    assert!(server.received_requests().is_empty());
  }

  #[test]
  fn test_disabled_tracker_is_rejected_before_issue_calls() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", false);
    let project = project(&server);

    let create = ForgejoIssue::create(&project, &CreateIssueParams::new("t", "b")).err().unwrap();
    let get = ForgejoIssue::get(&project, 1).err().unwrap();
    let list = ForgejoIssue::get_list(&project, &IssueListFilter::default()).err().unwrap();

    assert!(matches!(create, ForgeError::IssueTrackerDisabled));
    assert!(matches!(get, ForgeError::IssueTrackerDisabled));
    assert!(matches!(list, ForgeError::IssueTrackerDisabled));

    let requests = server.received_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/v1/repos/packit/ogr");
  }

  #[test]
  fn test_create_resolves_label_names() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount_labels("packit", "ogr", &[(11, "label1"), (12, "label2")]);

    let mut created = fixtures::issue_json("packit", "ogr", 5, "Test Issue");
    created["labels"] = json!([fixtures::label_json(11, "label1"), fixtures::label_json(12, "label2")]);
    server.mount(
      Mock::given(method("POST"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .and(body_json(json!({
          "title": "Test Issue",
          "body": "a real nice testing description",
          "labels": [11, 12]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1),
    );

    let project = project(&server);
    let params = CreateIssueParams::new("Test Issue", "a real nice testing description").labels(["label1", "label2"]);
    let issue = ForgejoIssue::create(&project, &params).unwrap();

    assert_eq!(issue.title(), "Test Issue");
    assert_eq!(issue.description(), "a real nice testing description");
    let names: Vec<_> = issue.labels().iter().map(|label| label.name().to_string()).collect();
    assert_eq!(names, vec!["label1", "label2"]);
  }

  #[test]
  fn test_create_numeric_labels_skip_lookup() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("POST"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .and(body_json(json!({
          "title": "Numeric",
          "body": "",
          "labels": [3, 4]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::issue_json("packit", "ogr", 6, "Numeric"))),
    );

    let project = project(&server);
    let params = CreateIssueParams::new("Numeric", "").labels(["3", "4"]);
    ForgejoIssue::create(&project, &params).unwrap();

    assert!(
      server
        .received_requests()
        .iter()
        .all(|request| !request.url.path().ends_with("/labels"))
    );
  }

  #[test]
  fn test_create_resolves_label_from_later_page() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);

    let first: Vec<serde_json::Value> = (1..=50).map(|id| fixtures::label_json(id, &format!("area/{id}"))).collect();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/labels"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first)),
    );
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/labels"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::label_json(51, "kind/bug")]))),
    );
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/labels"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );

    let mut created = fixtures::issue_json("packit", "ogr", 7, "Paged");
    created["labels"] = json!([fixtures::label_json(51, "kind/bug")]);
    server.mount(
      Mock::given(method("POST"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .and(body_json(json!({
          "title": "Paged",
          "body": "",
          "labels": [51]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1),
    );

    let project = project(&server);
    let issue = ForgejoIssue::create(&project, &CreateIssueParams::new("Paged", "").labels(["kind/bug"])).unwrap();

    assert_eq!(issue.labels()[0].name(), "kind/bug");
  }

  #[test]
  fn test_create_unknown_label() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount_labels("packit", "ogr", &[(11, "label1")]);

    let project = project(&server);
    let params = CreateIssueParams::new("Test Issue", "").labels(["label1", "nope"]);
    let error = ForgejoIssue::create(&project, &params).err().unwrap();

    assert!(matches!(error, ForgeError::UnknownLabel(ref name) if name == "nope"));
  }

  #[test]
  fn test_create_with_assignee() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);

    let mut created = fixtures::issue_json("packit", "ogr", 8, "Test Issue bububa");
    created["assignees"] = json!([fixtures::user_json("TomasTomecek")]);
    server.mount(
      Mock::given(method("POST"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .and(body_json(json!({
          "title": "Test Issue bububa",
          "body": "a real nice testing description",
          "assignees": ["TomasTomecek"],
          "labels": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created)),
    );

    let project = project(&server);
    let params =
      CreateIssueParams::new("Test Issue bububa", "a real nice testing description").assignees(["TomasTomecek"]);
    let issue = project.create_issue(&params).unwrap();

    assert_eq!(issue.assignees()[0].login, "TomasTomecek");
  }

  #[test]
  fn test_create_not_found_is_translated() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("POST"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .respond_with(ResponseTemplate::new(404)),
    );

    let project = project(&server);
    let error = ForgejoIssue::create(&project, &CreateIssueParams::new("t", "b")).err().unwrap();

    assert_eq!(error.to_string(), "Issue could not be created.");
    let source = std::error::Error::source(&error).unwrap();
    assert!(source.to_string().contains("404"));
  }

  #[test]
  fn test_get_missing_issue_names_the_id() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/issues/987654"))
        .respond_with(ResponseTemplate::new(404)),
    );

    let project = project(&server);
    let error = ForgejoIssue::get(&project, 987654).err().unwrap();

    assert!(matches!(error, ForgeError::ForgejoApi { .. }));
    assert!(error.to_string().contains("987654"));
  }

  #[test]
  fn test_get_other_errors_pass_through() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/issues/1"))
        .respond_with(ResponseTemplate::new(403)),
    );

    let project = project(&server);
    let error = ForgejoIssue::get(&project, 1).err().unwrap();

    assert!(matches!(error, ForgeError::Service(_)));
    assert!(error.to_string().contains("Authentication failed"));
  }

  #[test]
  fn test_get_list_joins_labels_with_spaces() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .and(query_param("state", "open"))
        .and(query_param("labels", "bug help-wanted"))
        .and(query_param("assigned_by", "lbarcziova"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::issues_json("packit", "ogr", 1, 3, "open")))
        .expect(1),
    );

    let project = project(&server);
    let filter = IssueListFilter::default().assignee("lbarcziova").labels(["bug", "help-wanted"]);
    let issues = ForgejoIssue::get_list(&project, &filter).unwrap();

    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0].id(), 1);

    let request = server
      .received_requests()
      .into_iter()
      .find(|request| request.url.path().ends_with("/issues"))
      .unwrap();
    assert_eq!(request.url.query_pairs().filter(|(key, _)| key == "labels").count(), 1);
  }

  #[test]
  fn test_get_list_not_found() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr/issues"))
        .respond_with(ResponseTemplate::new(404)),
    );

    let project = project(&server);
    let error = ForgejoIssue::get_list(&project, &IssueListFilter::default()).err().unwrap();

    assert_eq!(error.to_string(), "Could not access issues.");
  }

  #[test]
  fn test_accessors() {
    let server = MockForgejo::start();
    let project = project(&server);

    let mut raw = fixtures::issue_json("packit", "ogr", 42, "Accessors");
    raw["labels"] = json!([fixtures::label_json(1, "kind/bug")]);
    let issue = ForgejoIssue::new(decode(raw), &project);

    assert_eq!(issue.id(), 42);
    assert_eq!(issue.title(), "Accessors");
    assert_eq!(issue.status(), IssueStatus::Open);
    assert_eq!(issue.url(), "https://forge.example/packit/ogr/issues/42");
    assert_eq!(issue.raw().id, 90042);
    assert_eq!(issue.raw().url, "https://forge.example/api/v1/repos/packit/ogr/issues/42");
    assert_eq!(issue.author(), "mfocko");
    assert_eq!(issue.created().to_rfc3339(), "2024-03-01T10:15:00+00:00");
    assert!(issue.assignees().is_empty());

    let labels = issue.labels();
    assert_eq!(labels[0].name(), "kind/bug");
    assert_eq!(labels[0].color(), "e11d21");
    assert_eq!(labels[0].id(), Some(1));
    assert_eq!(labels[0].issue().id(), 42);
    assert!(issue.to_string().starts_with("ForgejoIssue(title='Accessors', id=42, status='open'"));
  }

  #[test]
  fn test_author_prefers_original_author() {
    let server = MockForgejo::start();
    let project = project(&server);

    let mut raw = fixtures::issue_json("packit", "ogr", 3, "Imported");
    raw["original_author"] = json!("TomasTomecek");
    let issue = ForgejoIssue::new(decode(raw), &project);

    assert_eq!(issue.author(), "TomasTomecek");
  }

  #[test]
  fn test_local_mutators_do_not_call_the_api() {
    let server = MockForgejo::start();
    let project = project(&server);

    let mut raw = fixtures::issue_json("packit", "ogr", 9, "Before");
    raw["assignees"] = json!([fixtures::user_json("mfocko")]);
    raw["labels"] = json!([fixtures::label_json(1, "bug")]);
    let mut issue = ForgejoIssue::new(decode(raw), &project);

    issue.set_title("After");
    assert_eq!(issue.close().status(), IssueStatus::Closed);
    issue.add_label(&["triaged", "easy"]);
    issue.add_assignee(&["lbarcziova", "TomasTomecek"]);

    assert_eq!(issue.title(), "After");
    let names: Vec<_> = issue.labels().iter().map(|label| label.name().to_string()).collect();
    assert_eq!(names, vec!["bug", "triaged", "easy"]);
    assert_eq!(issue.labels()[1].id(), None);

    // assignees are replaced, not appended
    let logins: Vec<_> = issue.assignees().iter().map(|user| user.login.as_str()).collect();
    assert_eq!(logins, vec!["lbarcziova", "TomasTomecek"]);

    assert!(server.received_requests().is_empty());
  }
}
