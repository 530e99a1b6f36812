//! # Forgejo Integration
//!
//! Forgejo REST API client plus the adapters that present Forgejo issues,
//! labels and repositories through the vendor-neutral `forgelink-core` model.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod issue;
pub mod label;
pub mod models;
pub mod project;
pub mod service;

pub use auth::{create_forgejo_service, get_forgejo_token};
// Re-export the client
pub use client::{ForgejoClient, create_forgejo_client};
pub use error::ApiError;
// Re-export adapters
pub use issue::ForgejoIssue;
pub use label::ForgejoIssueLabel;
// Re-export models
pub use models::{ApiIssue, ApiLabel, ApiRepository, ApiUser, CreateIssueOption, ForgejoAuth, ListIssuesQuery};
pub use project::ForgejoProject;
pub use service::ForgejoService;
