use reqwest::Method;
use tracing::instrument;

use crate::client::ForgejoClient;
use crate::error::ApiError;
use crate::models::ApiUser;

impl ForgejoClient {
  /// Get the current authenticated user
  #[instrument(skip(self), level = "debug")]
  pub fn get_current_user(&self) -> Result<ApiUser, ApiError> {
    let url = self.url("/user");
    let builder = self.request(Method::GET, &url);
    self.send(Method::GET, &url, builder)
  }
}

#[cfg(test)]
mod tests {
  use forgelink_test_utils::{MockForgejo, fixtures};
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, ResponseTemplate};

  use crate::client::create_forgejo_client;

  #[test]
  fn test_get_current_user() {
    let server = MockForgejo::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user_json("forgeuser"))),
    );

    let client = create_forgejo_client(&server.uri(), Some("test_token"));
    let user = client.get_current_user().unwrap();

    assert_eq!(user.login, "forgeuser");
    assert_eq!(user.email.as_deref(), Some("forgeuser@noreply.example.com"));
  }
}
