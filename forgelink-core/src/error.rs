//! # Forge Errors
//!
//! The error taxonomy surfaced by every forge adapter. Precondition failures
//! are raised before any issue request and never carry a cause. Remote
//! not-found responses become [`ForgeError::ForgejoApi`] with the original
//! transport error attached. Everything else the vendor client reports passes
//! through untouched as [`ForgeError::Service`].

use thiserror::Error;

/// Boxed error used to carry vendor client errors across crate boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by forge adapters
#[derive(Debug, Error)]
pub enum ForgeError {
  /// The project has its issue tracker turned off
  #[error("Issue tracker is disabled for this project.")]
  IssueTrackerDisabled,

  /// The forge does not offer the requested capability
  #[error("{0}")]
  OperationNotSupported(String),

  /// Forgejo answered with "not found"
  #[error("{message}")]
  ForgejoApi {
    /// Human readable description of the failed operation
    message: String,
    /// The error reported by the Forgejo client
    #[source]
    source: BoxError,
  },

  /// A label name that does not exist in the repository
  #[error("Label '{0}' does not exist in this repository.")]
  UnknownLabel(String),

  /// Any other error reported by the vendor client
  #[error(transparent)]
  Service(BoxError),
}

impl ForgeError {
  /// Wrap a vendor error in a [`ForgeError::ForgejoApi`]
  pub fn forgejo_api(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
    ForgeError::ForgejoApi {
      message: message.into(),
      source: source.into(),
    }
  }
}
