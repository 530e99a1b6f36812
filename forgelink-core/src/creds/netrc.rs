//! Helpers for reading credentials stored in `.netrc` files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use forgelink_core::creds::netrc::get_netrc_path;
///
/// let home = Path::new("/home/user");
/// assert_eq!(get_netrc_path(home), Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both the single-line (`machine host login user password pass`) and the
/// multi-line formats are accepted. If the machine is absent or its entry
/// lacks a `login` or `password`, `Ok(None)` is returned.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let reader = BufReader::new(file);

  let mut current_machine = String::new();
  let mut username = String::new();
  let mut password = String::new();

  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    let parts: Vec<&str> = line.split_whitespace().collect();

    let mut tokens = parts.iter().peekable();
    while let Some(token) = tokens.next() {
      let Some(value) = tokens.peek() else {
        break;
      };

      match *token {
        "machine" => {
          if current_machine == target_machine && !username.is_empty() && !password.is_empty() {
            return Ok(Some(Credentials { username, password }));
          }
          username.clear();
          password.clear();
          current_machine = value.to_string();
          tokens.next();
        }
        "login" => {
          username = value.to_string();
          tokens.next();
        }
        "password" => {
          password = value.to_string();
          tokens.next();
        }
        _ => {}
      }
    }
  }

  if current_machine == target_machine && !username.is_empty() && !password.is_empty() {
    return Ok(Some(Credentials { username, password }));
  }

  Ok(None)
}
