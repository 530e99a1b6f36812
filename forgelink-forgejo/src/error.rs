//! Errors reported by the Forgejo REST client.

use forgelink_core::ForgeError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced while talking to the Forgejo API
#[derive(Debug, Error)]
pub enum ApiError {
  /// The requested resource does not exist or is not visible to the caller
  #[error("{method} {url} returned 404 Not Found")]
  NotFound { method: String, url: String },

  /// Forgejo rejected the credentials
  #[error("Authentication failed (HTTP {status}). Please check your Forgejo token.")]
  Unauthorized { status: StatusCode },

  /// Any other non-success response
  #[error("Unexpected error: HTTP {status} - {body}")]
  Status { status: StatusCode, body: String },

  /// The request could not be sent
  #[error("{method} {url} failed")]
  Transport {
    method: String,
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The response body was not what the client expected
  #[error("Failed to parse Forgejo response from {url}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

impl ApiError {
  /// Whether Forgejo answered with 404
  pub const fn is_not_found(&self) -> bool {
    matches!(self, ApiError::NotFound { .. })
  }
}

impl From<ApiError> for ForgeError {
  fn from(error: ApiError) -> Self {
    ForgeError::Service(Box::new(error))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_not_found_detection() {
    let not_found = ApiError::NotFound {
      method: "GET".to_string(),
      url: "http://localhost/api/v1/repos/o/r/issues/1".to_string(),
    };
    let unauthorized = ApiError::Unauthorized {
      status: StatusCode::UNAUTHORIZED,
    };

    assert!(not_found.is_not_found());
    assert!(!unauthorized.is_not_found());
    assert_eq!(
      not_found.to_string(),
      "GET http://localhost/api/v1/repos/o/r/issues/1 returned 404 Not Found"
    );
  }

  #[test]
  fn test_conversion_passes_error_through() {
    let error = ApiError::Status {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      body: "boom".to_string(),
    };
    let forge_error = ForgeError::from(error);

    assert!(matches!(forge_error, ForgeError::Service(_)));
    assert_eq!(forge_error.to_string(), "Unexpected error: HTTP 500 Internal Server Error - boom");
  }
}
