//! Forgejo Issues API endpoint implementations.

use reqwest::Method;
use tracing::{info, instrument, trace};

use crate::client::ForgejoClient;
use crate::error::ApiError;
use crate::models::{ApiIssue, CreateIssueOption, ListIssuesQuery};

impl ForgejoClient {
  /// Create an issue in `owner/repo`.
  ///
  /// # Errors
  ///
  /// Returns [`ApiError::NotFound`] if the repository does not exist, and the
  /// usual client errors for authentication, transport or decoding failures.
  #[instrument(skip(self, option), level = "debug")]
  pub fn create_issue(&self, owner: &str, repo: &str, option: &CreateIssueOption) -> Result<ApiIssue, ApiError> {
    info!("Creating issue '{}' in {}/{}", option.title, owner, repo);

    let url = self.url(&format!("/repos/{owner}/{repo}/issues"));
    let builder = self.request(Method::POST, &url).json(option);

    let issue: ApiIssue = self.send(Method::POST, &url, builder)?;
    trace!("Created issue: {:?}", issue);
    Ok(issue)
  }

  /// Get a specific issue by its per-repository index.
  ///
  /// # Errors
  ///
  /// Returns [`ApiError::NotFound`] if the issue or repository does not exist.
  #[instrument(skip(self), level = "debug")]
  pub fn get_issue(&self, owner: &str, repo: &str, index: u64) -> Result<ApiIssue, ApiError> {
    info!("Fetching issue #{} for {}/{}", index, owner, repo);

    let url = self.url(&format!("/repos/{owner}/{repo}/issues/{index}"));
    let builder = self.request(Method::GET, &url);

    let issue: ApiIssue = self.send(Method::GET, &url, builder)?;
    trace!("Issue: {:?}", issue);
    Ok(issue)
  }

  /// List issues of `owner/repo` matching `query`.
  ///
  /// Only the first page returned by the server is read.
  ///
  /// # Errors
  ///
  /// Returns [`ApiError::NotFound`] if the repository does not exist.
  #[instrument(skip(self), level = "debug")]
  pub fn list_issues(&self, owner: &str, repo: &str, query: &ListIssuesQuery) -> Result<Vec<ApiIssue>, ApiError> {
    info!("Listing {} issues for {}/{}", query.state, owner, repo);

    let url = self.url(&format!("/repos/{owner}/{repo}/issues"));
    let builder = self.request(Method::GET, &url).query(query);

    let issues: Vec<ApiIssue> = self.send(Method::GET, &url, builder)?;
    info!("Received {} issues", issues.len());
    Ok(issues)
  }
}
