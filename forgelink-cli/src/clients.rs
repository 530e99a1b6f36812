//! # Client Creation
//!
//! Resolves which Forgejo instance to talk to and builds an authenticated
//! service for it from the environment, the config file and `.netrc`.

use std::env;

use anyhow::{Context, Result};
use directories::BaseDirs;
use forgelink_core::config::{ENV_FORGEJO_INSTANCE_URL, ENV_FORGEJO_TOKEN, resolve_instance_url};
use forgelink_core::{RepoSpec, get_config_dirs, parse_repo_spec};
use forgelink_forgejo::{ForgejoProject, ForgejoService, create_forgejo_service};
use tracing::debug;

/// Pick the instance URL from the `--instance` flag, the environment, the
/// config file or the built-in default, in that order.
pub fn resolve_instance(cli_instance: Option<&str>) -> Result<String> {
  let config = get_config_dirs()?.load_forgejo_config()?;
  let env_instance = env::var(ENV_FORGEJO_INSTANCE_URL).ok();

  resolve_instance_url(cli_instance, env_instance.as_deref(), &config)
}

/// Create a Forgejo service for `instance_url` using `FORGEJO_TOKEN` or
/// `.netrc` credentials.
pub fn create_forgejo_service_from_env(instance_url: &str) -> Result<ForgejoService> {
  let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
  let env_token = env::var(ENV_FORGEJO_TOKEN).ok();

  create_forgejo_service(base_dirs.home_dir(), instance_url, env_token)
    .with_context(|| format!("Failed to create Forgejo client for {instance_url}"))
}

/// Resolve a repository argument to a project.
///
/// A repository given as a full URL names its own instance and overrides
/// `--instance`.
pub fn open_project(repo: &str, cli_instance: Option<&str>) -> Result<ForgejoProject> {
  let RepoSpec {
    instance_url,
    owner,
    repo,
  } = parse_repo_spec(repo)?;

  let instance = resolve_instance(instance_url.as_deref().or(cli_instance))?;
  debug!("Using Forgejo instance {} for {}/{}", instance, owner, repo);

  let service = create_forgejo_service_from_env(&instance)?;
  Ok(service.get_project(&owner, &repo))
}
