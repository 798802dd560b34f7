//! Connection details for a JIRA instance.

use super::{ConfigError, Result};

/// Where to connect and which credentials to use.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    /// The JIRA instance URL (e.g., "https://company.atlassian.net").
    pub url: String,

    /// The Basic Auth user, usually an email address.
    pub user: String,

    /// The API token paired with `user`.
    pub token: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(url: String, user: String, token: String) -> Self {
        Self { url, user, token }
    }

    /// Validate this profile.
    ///
    /// Checks that the URL is non-empty with an http(s) scheme and that the
    /// user and token are non-empty.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "URL cannot be empty".to_string(),
            ));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "URL '{}' must start with http:// or https://",
                self.url
            )));
        }

        if self.user.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "user cannot be empty".to_string(),
            ));
        }

        if self.token.is_empty() {
            return Err(ConfigError::ValidationError(
                "API token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
