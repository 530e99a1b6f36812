//! Constants for the Forgejo client

/// Path prefix of the Forgejo REST API
pub const API_PREFIX: &str = "/api/v1";

/// User-Agent header value for the Forgejo API client
pub const USER_AGENT: &str = concat!("forgelink/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the Forgejo API
pub const ACCEPT: &str = "application/json";

/// Page size requested when walking paginated listings
pub const PAGE_LIMIT: u32 = 50;
