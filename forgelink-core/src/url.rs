//! URL parsing helpers shared across crates.
//!
//! These helpers live in `forgelink-core` so both the CLI and service clients
//! can parse instance and repository URLs without depending on a specific
//! client instance.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use url::{Position, Url};

static SSH_REMOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?:ssh://)?[\w.-]+@([^:/]+)(?::\d+)?[:/]([^/]+)/([^/]+?)(?:\.git)?/?$")
    .expect("Failed to compile SSH remote regex")
});

static SHORT_REPO_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([\w.-]+)/([\w.-]+?)(?:\.git)?$").expect("Failed to compile short repo regex"));

/// A repository reference parsed from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
  /// Instance URL when the input named one (full URL or SSH remote)
  pub instance_url: Option<String>,
  pub owner: String,
  pub repo: String,
}

/// Normalize a URL by removing trailing slashes from the path when it's just
/// "/".
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);

  let path = url.path();
  if path != "/" {
    result.push_str(path);
  }

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  if let Some(fragment) = url.fragment() {
    result.push('#');
    result.push_str(fragment);
  }

  result
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{input}");
  Url::parse(&with_scheme).map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Ensure a URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Also handles
/// malformed schemes like "http:/example.com" (missing slash).
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let malformed = (lowered.starts_with("http:") && !lowered.starts_with("http://"))
    || (lowered.starts_with("https:") && !lowered.starts_with("https://"));
  if malformed {
    let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.scheme().len() > 1 && url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}

/// Reduce an instance URL to `host[:port]`, the form used as a `.netrc`
/// machine name.
pub fn normalize_host(instance_url: &str) -> Result<String> {
  let with_scheme = ensure_url_scheme(instance_url)?;
  let url = Url::parse(&with_scheme).with_context(|| format!("Invalid instance URL '{instance_url}'"))?;
  let host = url
    .host_str()
    .with_context(|| format!("Instance URL '{instance_url}' has no host"))?;

  Ok(match url.port() {
    Some(port) => format!("{host}:{port}"),
    None => host.to_string(),
  })
}

fn strip_git_suffix(repo: &str) -> &str {
  repo.strip_suffix(".git").unwrap_or(repo)
}

/// Parse a repository reference.
///
/// Accepted forms:
/// - `owner/repo`
/// - `https://codeberg.org/owner/repo` (optionally ending in `.git` or with
///   further path components such as `/issues/12`)
/// - `codeberg.org/owner/repo`
/// - `git@codeberg.org:owner/repo.git`
///
/// Two segments without a scheme are always read as `owner/repo`, since
/// Forgejo logins may contain dots (`john.doe/repo`). `codeberg.org/owner`
/// therefore parses as owner `codeberg.org`; spell out the repository or the
/// scheme when naming an instance.
pub fn parse_repo_spec(spec: &str) -> Result<RepoSpec> {
  let spec = spec.trim();

  if let Some(captures) = SSH_REMOTE_REGEX.captures(spec) {
    return Ok(RepoSpec {
      instance_url: Some(format!("https://{}", &captures[1])),
      owner: captures[2].to_string(),
      repo: captures[3].to_string(),
    });
  }

  if !spec.contains("://")
    && let Some(captures) = SHORT_REPO_REGEX.captures(spec)
  {
    return Ok(RepoSpec {
      instance_url: None,
      owner: captures[1].to_string(),
      repo: captures[2].to_string(),
    });
  }

  let url = Url::parse(&ensure_url_scheme(spec)?).with_context(|| format!("Invalid repository URL '{spec}'"))?;
  let mut segments = url.path_segments().into_iter().flatten().filter(|s| !s.is_empty());

  match (segments.next(), segments.next()) {
    (Some(owner), Some(repo)) => Ok(RepoSpec {
      instance_url: Some(url[..Position::BeforePath].to_string()),
      owner: owner.to_string(),
      repo: strip_git_suffix(repo).to_string(),
    }),
    _ => Err(anyhow::anyhow!("Could not extract owner and repo from '{spec}'")),
  }
}
