//! A Forgejo instance and the API client used to reach it.

use crate::client::ForgejoClient;
use crate::models::ForgejoAuth;
use crate::project::ForgejoProject;

/// A Forgejo instance
#[derive(Clone)]
pub struct ForgejoService {
  instance_url: String,
  api: ForgejoClient,
}

impl ForgejoService {
  /// Create a service for the instance at `instance_url`
  pub fn new(instance_url: &str, token: Option<&str>) -> Self {
    let auth = ForgejoAuth {
      token: token.map(str::to_string),
    };
    Self::with_client(instance_url, ForgejoClient::new(instance_url, auth))
  }

  /// Create a service around an existing client
  pub fn with_client(instance_url: &str, api: ForgejoClient) -> Self {
    Self {
      instance_url: instance_url.trim_end_matches('/').to_string(),
      api,
    }
  }

  pub fn instance_url(&self) -> &str {
    &self.instance_url
  }

  /// The REST client of this instance
  pub const fn api(&self) -> &ForgejoClient {
    &self.api
  }

  /// Get a project by namespace and repository name.
  ///
  /// No request is made until repository data is needed.
  pub fn get_project(&self, namespace: &str, repo: &str) -> ForgejoProject {
    ForgejoProject::new(self.clone(), namespace, repo)
  }
}
