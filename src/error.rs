//! Centralized error type for jira-board.
//!
//! Every command returns [`Result`]; only `main` turns an error into a
//! message and an exit code.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested sprint offset points outside the board's sprints.
    #[error("sprint offset {offset} out of range. must be between {min} and {max}")]
    SprintOutOfRange { offset: i64, min: i64, max: i64 },

    /// The board has no sprints at all.
    #[error("board {0} has no sprints")]
    EmptyBoard(String),
}

impl AppError {
    /// A hint for fixing the error, if there is an obvious one.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::Missing(_)) => Some(
                "Set JIRA_URL, ATLASSIAN_USER and ATLASSIAN_API_TOKEN, or pass --url and --user.",
            ),
            AppError::Api(ApiError::Unauthorized) => Some(
                "Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens",
            ),
            AppError::Api(ApiError::Network(_)) => Some("Check your internet connection and JIRA URL."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
