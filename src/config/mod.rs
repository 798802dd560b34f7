//! Configuration for jira-board.
//!
//! A [`Config`] is resolved once at startup from command line flags (which
//! fall back to environment variables), the optional settings file and
//! built-in defaults. It is then handed to the API client explicitly.

mod profile;
mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use profile::Profile;
pub use settings::Settings;

/// Environment variable holding the JIRA base URL.
pub const URL_ENV: &str = "JIRA_URL";

/// Environment variable holding the Basic Auth user.
pub const USER_ENV: &str = "ATLASSIAN_USER";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "ATLASSIAN_API_TOKEN";

/// Sprints requested per page when the settings file does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// The agile API refuses to return more than this many sprints per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Where raw responses are dumped when `--dump` is given without a path.
pub const DEFAULT_DUMP_DIR: &str = "debug";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was given nowhere.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// The settings file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`].
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Values taken from the command line or its environment fallbacks.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub user: Option<String>,
    pub dump_dir: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where to connect and as whom.
    pub profile: Profile,
    /// `maxResults` for paginated sprint requests.
    pub page_size: u32,
    /// Directory for raw response dumps, if enabled.
    pub dump_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the settings file and the process environment.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let settings = Settings::load()?;
        let token = std::env::var(TOKEN_ENV).ok();
        Self::resolve(overrides, settings, token)
    }

    /// Merge the configuration sources, highest precedence first.
    pub fn resolve(
        overrides: &Overrides,
        settings: Settings,
        token: Option<String>,
    ) -> Result<Self> {
        let url = overrides
            .url
            .clone()
            .or(settings.url)
            .ok_or(ConfigError::Missing(URL_ENV))?;
        let user = overrides
            .user
            .clone()
            .or(settings.user)
            .ok_or(ConfigError::Missing(USER_ENV))?;
        let token = token.ok_or(ConfigError::Missing(TOKEN_ENV))?;

        let profile = Profile::new(url, user, token);
        profile.validate()?;

        let page_size = settings.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }

        Ok(Self {
            profile,
            page_size,
            dump_dir: overrides.dump_dir.clone().or(settings.dump_dir),
        })
    }
}
