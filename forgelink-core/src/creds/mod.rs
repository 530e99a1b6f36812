//! # Credential Management
//!
//! Retrieval of authentication credentials for forge instances. Credentials
//! are read from the user's `.netrc` file, keyed by the instance host.

pub mod netrc;

use std::path::Path;

use anyhow::Result;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Look up credentials for `machine` in the `.netrc` file under `home`.
///
/// A missing `.netrc` file is not an error; it simply yields `Ok(None)`.
pub fn get_credentials(home: &Path, machine: &str) -> Result<Option<Credentials>> {
  let path = netrc::get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }
  netrc::parse_netrc_file(&path, machine)
}
