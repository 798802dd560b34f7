//! Basic Auth credentials for the JIRA REST API.
//!
//! JIRA Cloud accepts `user:api_token` pairs encoded as HTTP Basic Auth.
//! The raw token is encoded once and never kept around afterwards.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for JIRA.
#[derive(Clone)]
pub struct Auth {
    /// The account the token belongs to.
    user: String,
    /// The complete `Basic ...` authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a user name and API token.
    pub fn new(user: &str, token: &str) -> Self {
        Self {
            user: user.to_string(),
            auth_header: build_auth_header(user, token),
        }
    }

    /// The value to send in the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The user name the credentials were built for.
    pub fn user(&self) -> &str {
        &self.user
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("user", &self.user)
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Encode "user:token" in Base64 and prepend "Basic ".
fn build_auth_header(user: &str, token: &str) -> String {
    let credentials = format!("{}:{}", user, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
