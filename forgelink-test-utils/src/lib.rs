//! Test utilities shared across the forgelink workspace
//!
//! This crate provides common testing infrastructure including:
//! - A blocking-friendly Forgejo mock server ([`MockForgejo`])
//! - JSON fixtures shaped like Forgejo API responses ([`fixtures`])
//! - Temporary `.netrc` files ([`NetrcGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod fixtures;
pub mod forgejo;
pub mod netrc;

// Re-export commonly used items
pub use forgejo::MockForgejo;
pub use netrc::NetrcGuard;
