//! # Forgejo API Endpoints
//!
//! Endpoint implementations grouped by Forgejo API resource type: issues,
//! repositories and users.

pub mod issues;
pub mod repos;
pub mod users;
