//! # Forgelink Core Library
//!
//! Vendor-neutral building blocks shared by every forge integration: the issue
//! status model, the [`Issue`] and [`IssueLabel`] traits, the [`ForgeError`]
//! taxonomy, plus configuration, credential and URL helpers used by the CLI
//! and the service clients.

pub mod config;
pub mod creds;
pub mod error;
pub mod issue;
pub mod status;
pub mod url;

// Re-export main types for service implementations
pub use config::{ConfigDirs, ForgejoConfig, get_config_dirs};
pub use creds::Credentials;
pub use error::{BoxError, ForgeError};
pub use issue::{CreateIssueParams, Issue, IssueLabel, IssueListFilter, describe_issue};
pub use status::IssueStatus;
pub use url::{RepoSpec, ensure_url_scheme, normalize_host, parse_repo_spec};
