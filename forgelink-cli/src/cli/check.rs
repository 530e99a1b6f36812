//! # Check Command
//!
//! Verifies that the Forgejo instance accepts the configured token. A
//! rejected token or an unreachable instance is reported as an error so the
//! exit status reflects it.

use anyhow::{Result, bail};

use crate::clients::{create_forgejo_service_from_env, resolve_instance};
use crate::output::{format_url, print_error, print_info, print_success, print_warning};

/// Handle the check command
pub(crate) fn handle_check_command(instance: Option<&str>) -> Result<()> {
  let instance = resolve_instance(instance)?;
  let service = create_forgejo_service_from_env(&instance)?;
  let client = service.api();

  if !client.is_authenticated() {
    print_warning(&format!(
      "No Forgejo token found for {}. Set FORGEJO_TOKEN or add the host to your .netrc file.",
      format_url(&instance)
    ));
    return Ok(());
  }

  match client.test_connection() {
    Ok(true) => {
      print_success(&format!("Successfully authenticated with {}", format_url(&instance)));

      match client.get_current_user() {
        Ok(user) => {
          print_info("Forgejo User Information:");
          println!("  Username: {}", user.login);
          if let Some(name) = user.full_name.filter(|name| !name.is_empty()) {
            println!("  Name: {name}");
          }
          println!("  User ID: {}", user.id);
        }
        Err(e) => {
          print_error(&format!("Failed to get user information: {e}"));
        }
      }
    }
    Ok(false) => bail!("Authentication with {instance} failed. Please check your Forgejo token."),
    Err(e) => bail!("Failed to authenticate with Forgejo: {e}"),
  }

  Ok(())
}
