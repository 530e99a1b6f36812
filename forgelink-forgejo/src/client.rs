//! # Forgejo HTTP Client
//!
//! Blocking HTTP client for the Forgejo REST API, handling authentication,
//! request building, and status-to-error mapping shared by every endpoint.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::consts::{ACCEPT, API_PREFIX, USER_AGENT};
use crate::error::ApiError;
use crate::models::ForgejoAuth;

/// Represents a Forgejo API client
#[derive(Clone)]
pub struct ForgejoClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: ForgejoAuth,
}

impl ForgejoClient {
  /// Create a new Forgejo client for the instance at `instance_url`
  pub fn new(instance_url: &str, auth: ForgejoAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: format!("{}{}", instance_url.trim_end_matches('/'), API_PREFIX),
      auth,
    }
  }

  /// Base URL of the API, including the `/api/v1` prefix
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Whether requests carry a token
  pub const fn is_authenticated(&self) -> bool {
    self.auth.token.is_some()
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  /// Start a request with the headers every Forgejo call needs
  pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
    trace!("Forgejo API URL: {}", url);

    let builder = self
      .client
      .request(method, url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT);

    match &self.auth.token {
      Some(token) => builder.header(header::AUTHORIZATION, format!("token {token}")),
      None => builder,
    }
  }

  /// Send a request and decode a JSON response
  pub(crate) fn send<T: DeserializeOwned>(&self, method: Method, url: &str, builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().map_err(|source| ApiError::Transport {
      method: method.to_string(),
      url: url.to_string(),
      source,
    })?;

    let status = response.status();
    debug!("Forgejo API response status: {}", status);

    match status {
      s if s.is_success() => response.json::<T>().map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
      }),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing Forgejo API");
        Err(ApiError::Unauthorized { status })
      }
      StatusCode::NOT_FOUND => Err(ApiError::NotFound {
        method: method.to_string(),
        url: url.to_string(),
      }),
      _ => {
        let body = response.text().unwrap_or_default();
        warn!("Unexpected Forgejo API error: HTTP {} - {}", status, body);
        Err(ApiError::Status { status, body })
      }
    }
  }

  /// Test the Forgejo connection by fetching the current user
  pub fn test_connection(&self) -> Result<bool, ApiError> {
    match self.get_current_user() {
      Ok(_) => Ok(true),
      Err(ApiError::Unauthorized { .. }) => Ok(false),
      Err(e) => Err(e),
    }
  }
}

/// Create a Forgejo client for `instance_url`, authenticated when a token is
/// given
pub fn create_forgejo_client(instance_url: &str, token: Option<&str>) -> ForgejoClient {
  let auth = ForgejoAuth {
    token: token.map(str::to_string),
  };

  ForgejoClient::new(instance_url, auth)
}

#[cfg(test)]
mod tests {
  use forgelink_test_utils::{MockForgejo, fixtures};
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;

  #[test]
  fn test_forgejo_client_creation() {
    let client = create_forgejo_client("https://codeberg.org/", Some("test_token"));

    assert_eq!(client.base_url(), "https://codeberg.org/api/v1");
    assert_eq!(client.auth.token.as_deref(), Some("test_token"));
    assert!(client.is_authenticated());
    assert!(!create_forgejo_client("https://codeberg.org", None).is_authenticated());
  }

  #[test]
  fn test_token_header_is_sent() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .and(header("authorization", "token test_token"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user_json("forgeuser")))
        .expect(1),
    );

    let client = create_forgejo_client(&server.uri(), Some("test_token"));

    assert!(client.test_connection().unwrap());
  }

  #[test]
  fn test_connection_rejected() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "token is required"}))),
    );

    let client = create_forgejo_client(&server.uri(), Some("bad"));

    assert!(!client.test_connection().unwrap());
  }

  #[test]
  fn test_unexpected_status_keeps_body() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked")),
    );

    let client = create_forgejo_client(&server.uri(), None);
    let error = client.get_current_user().unwrap_err();

    assert!(matches!(
      &error,
      ApiError::Status { status, body } if *status == StatusCode::INTERNAL_SERVER_ERROR && body == "database is locked"
    ));
  }
}
