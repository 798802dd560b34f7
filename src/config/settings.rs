//! Optional settings file.
//!
//! Lives at `<config dir>/jira-board/config.toml`. Every key is optional:
//!
//! ```toml
//! url = "https://company.atlassian.net"
//! user = "me@company.com"
//! page_size = 50
//! dump_dir = "/tmp/jira-debug"
//! ```
//!
//! The API token is never read from this file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{ConfigError, Result};

/// Values read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The JIRA instance URL.
    pub url: Option<String>,
    /// The Basic Auth user.
    pub user: Option<String>,
    /// Sprints requested per page.
    pub page_size: Option<u32>,
    /// Directory for raw response dumps.
    pub dump_dir: Option<PathBuf>,
}

impl Settings {
    /// The platform-specific settings file location.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jira-board").join("config.toml"))
    }

    /// Load the settings file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}
