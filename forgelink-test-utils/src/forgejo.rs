//! A Forgejo mock server usable from synchronous tests.
//!
//! wiremock is async while the Forgejo client is blocking. [`MockForgejo`]
//! owns a multi-threaded tokio runtime that keeps the mock server running, so
//! tests can drive the blocking client from the plain test thread.

use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::fixtures;

/// Mock Forgejo instance backed by wiremock
pub struct MockForgejo {
  // Dropped before the runtime so expectations are verified while it still runs.
  server: MockServer,
  runtime: Runtime,
}

impl Default for MockForgejo {
  fn default() -> Self {
    Self::start()
  }
}

impl MockForgejo {
  /// Start a new mock server
  pub fn start() -> Self {
    let runtime = Runtime::new().expect("Failed to create tokio runtime");
    let server = runtime.block_on(MockServer::start());
    Self { server, runtime }
  }

  /// Base URL of the mock instance (without the `/api/v1` prefix)
  pub fn uri(&self) -> String {
    self.server.uri()
  }

  /// Mount a mock on the server
  pub fn mount(&self, mock: Mock) {
    self.runtime.block_on(mock.mount(&self.server));
  }

  /// Every request the server has received so far
  pub fn received_requests(&self) -> Vec<Request> {
    self
      .runtime
      .block_on(self.server.received_requests())
      .unwrap_or_default()
  }

  /// Serve `GET /api/v1/repos/{owner}/{repo}`
  pub fn mount_repository(&self, owner: &str, repo: &str, has_issues: bool) {
    self.mount(
      Mock::given(method("GET"))
        .and(path(format!("/api/v1/repos/{owner}/{repo}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::repository_json(owner, repo, has_issues))),
    );
  }

  /// Serve `GET /api/v1/repos/{owner}/{repo}/labels` with the given labels
  /// on the first page and nothing on later pages
  pub fn mount_labels(&self, owner: &str, repo: &str, labels: &[(i64, &str)]) {
    let body: Vec<_> = labels.iter().map(|(id, name)| fixtures::label_json(*id, name)).collect();
    let labels_path = format!("/api/v1/repos/{owner}/{repo}/labels");

    self.mount(
      Mock::given(method("GET"))
        .and(path(labels_path.as_str()))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .with_priority(1),
    );
    self.mount(
      Mock::given(method("GET"))
        .and(path(labels_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new())),
    );
  }
}
