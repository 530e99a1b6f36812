//! # Forgejo Project
//!
//! A single repository on a Forgejo instance. The project is the collaborator
//! the issue adapter works through: it knows the repository identity, whether
//! the issue tracker is enabled, and how to reach the API.

use std::cell::OnceCell;

use forgelink_core::{CreateIssueParams, ForgeError, IssueListFilter};
use tracing::debug;

use crate::issue::ForgejoIssue;
use crate::models::{ApiLabel, ApiRepository};
use crate::service::ForgejoService;

/// A repository on a Forgejo instance
pub struct ForgejoProject {
  service: ForgejoService,
  namespace: String,
  repo: String,
  forgejo_repo: OnceCell<ApiRepository>,
}

impl ForgejoProject {
  pub fn new(service: ForgejoService, namespace: &str, repo: &str) -> Self {
    Self {
      service,
      namespace: namespace.to_string(),
      repo: repo.to_string(),
      forgejo_repo: OnceCell::new(),
    }
  }

  pub const fn service(&self) -> &ForgejoService {
    &self.service
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  pub fn repo(&self) -> &str {
    &self.repo
  }

  pub fn full_repo_name(&self) -> String {
    format!("{}/{}", self.namespace, self.repo)
  }

  /// Repository metadata, fetched on first use and kept for the lifetime of
  /// the project
  pub fn forgejo_repo(&self) -> Result<&ApiRepository, ForgeError> {
    if let Some(repo) = self.forgejo_repo.get() {
      return Ok(repo);
    }

    debug!("Loading repository data for {}", self.full_repo_name());
    let repo = self.service.api().get_repo(&self.namespace, &self.repo)?;
    Ok(self.forgejo_repo.get_or_init(|| repo))
  }

  /// Login of the repository owner as reported by Forgejo
  pub fn owner_login(&self) -> Result<&str, ForgeError> {
    Ok(&self.forgejo_repo()?.owner.login)
  }

  /// Whether the issue tracker is enabled
  pub fn has_issues(&self) -> Result<bool, ForgeError> {
    Ok(self.forgejo_repo()?.has_issues)
  }

  /// Labels defined in the repository
  pub fn labels(&self) -> Result<Vec<ApiLabel>, ForgeError> {
    let repo = self.forgejo_repo()?;
    Ok(self.service.api().list_labels(&repo.owner.login, &repo.name)?)
  }

  pub fn get_issue(&self, issue_id: u64) -> Result<ForgejoIssue<'_>, ForgeError> {
    ForgejoIssue::get(self, issue_id)
  }

  pub fn get_issue_list(&self, filter: &IssueListFilter) -> Result<Vec<ForgejoIssue<'_>>, ForgeError> {
    ForgejoIssue::get_list(self, filter)
  }

  pub fn create_issue(&self, params: &CreateIssueParams) -> Result<ForgejoIssue<'_>, ForgeError> {
    ForgejoIssue::create(self, params)
  }
}

#[cfg(test)]
mod tests {
  use forgelink_test_utils::{MockForgejo, fixtures};
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;

  #[test]
  fn test_repository_is_fetched_once() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/ogr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::repository_json("packit", "ogr", true)))
        .expect(1),
    );

    let project = ForgejoService::new(&server.uri(), None).get_project("packit", "ogr");

    assert!(project.has_issues().unwrap());
    assert_eq!(project.owner_login().unwrap(), "packit");
    assert_eq!(project.forgejo_repo().unwrap().name, "ogr");
  }

  #[test]
  fn test_missing_repository_passes_error_through() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/repos/packit/gone"))
        .respond_with(ResponseTemplate::new(404)),
    );

    let project = ForgejoService::new(&server.uri(), None).get_project("packit", "gone");
    let error = project.has_issues().unwrap_err();

    assert!(matches!(error, ForgeError::Service(_)));
    assert!(error.to_string().contains("404"));
  }

  #[test]
  fn test_labels() {
    let server = MockForgejo::start();
    server.mount_repository("packit", "ogr", true);
    server.mount_labels("packit", "ogr", &[(5, "bug")]);

    let project = ForgejoService::new(&server.uri(), None).get_project("packit", "ogr");
    let labels = project.labels().unwrap();

    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "bug");
  }
}
