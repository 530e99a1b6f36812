//! Forgejo repository endpoints.

use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::client::ForgejoClient;
use crate::consts::PAGE_LIMIT;
use crate::error::ApiError;
use crate::models::{ApiLabel, ApiRepository};

impl ForgejoClient {
  /// Get repository metadata
  #[instrument(skip(self), level = "debug")]
  pub fn get_repo(&self, owner: &str, repo: &str) -> Result<ApiRepository, ApiError> {
    info!("Fetching repository {}/{}", owner, repo);

    let url = self.url(&format!("/repos/{owner}/{repo}"));
    let builder = self.request(Method::GET, &url);
    self.send(Method::GET, &url, builder)
  }

  /// List one page of the labels defined in a repository
  #[instrument(skip(self), level = "debug")]
  pub fn list_labels_page(&self, owner: &str, repo: &str, page: u32, limit: u32) -> Result<Vec<ApiLabel>, ApiError> {
    let url = self.url(&format!("/repos/{owner}/{repo}/labels"));
    let builder = self.request(Method::GET, &url).query(&[("page", page), ("limit", limit)]);
    self.send(Method::GET, &url, builder)
  }

  /// List every label defined in a repository.
  ///
  /// Pages are requested until one comes back empty or brings no label not
  /// already seen. The server may cap `limit` below what is asked for, so a
  /// short page does not end the walk.
  #[instrument(skip(self), level = "debug")]
  pub fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<ApiLabel>, ApiError> {
    let mut labels: Vec<ApiLabel> = Vec::new();

    for page in 1.. {
      let batch = self.list_labels_page(owner, repo, page, PAGE_LIMIT)?;
      let seen = labels.len();

      for label in batch {
        if !labels.iter().any(|known| known.id == label.id && known.name == label.name) {
          labels.push(label);
        }
      }

      if labels.len() == seen {
        debug!("Label listing for {}/{} ended at page {}", owner, repo, page);
        break;
      }
    }

    Ok(labels)
  }
}
