//! Authentication helpers for the Forgejo client.
//!
//! Tokens come from the environment first and from `.netrc` second, keyed by
//! the instance host. Without either, the service talks to Forgejo
//! anonymously, which is enough for reading public repositories.

use std::path::Path;

use anyhow::{Context, Result};
use forgelink_core::creds::get_credentials;
use forgelink_core::normalize_host;
use tracing::debug;

use crate::service::ForgejoService;

/// Look up the API token for `instance_url`.
///
/// `env_token` wins when it is set and not blank; otherwise the password of
/// the `.netrc` entry whose machine matches the instance host is used.
pub fn get_forgejo_token(home: &Path, instance_url: &str, env_token: Option<String>) -> Result<Option<String>> {
  if let Some(token) = env_token.filter(|token| !token.trim().is_empty()) {
    debug!("Using Forgejo token from the environment");
    return Ok(Some(token));
  }

  let machine = normalize_host(instance_url)?;
  let credentials =
    get_credentials(home, &machine).with_context(|| format!("Failed to read credentials for '{machine}'"))?;

  match credentials {
    Some(creds) => {
      debug!("Using Forgejo token from .netrc for {}", machine);
      Ok(Some(creds.password))
    }
    None => {
      debug!("No Forgejo token found for {}, continuing anonymously", machine);
      Ok(None)
    }
  }
}

/// Create a service for `instance_url` with whatever token can be found.
pub fn create_forgejo_service(home: &Path, instance_url: &str, env_token: Option<String>) -> Result<ForgejoService> {
  let token = get_forgejo_token(home, instance_url, env_token)?;
  Ok(ForgejoService::new(instance_url, token.as_deref()))
}
