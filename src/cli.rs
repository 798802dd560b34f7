//! Command line interface.
//!
//! ```text
//! jira board|b <BOARD_ID> [OFFSET]
//! jira issue|i <ISSUE_ID> [comment|c]
//! ```

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::api::JiraClient;
use crate::config::{Config, Overrides, DEFAULT_DUMP_DIR};
use crate::error::Result;
use crate::ui::views::{board, issue, IssueSection};

#[derive(Debug, Parser)]
#[command(
    name = "jira",
    version,
    about = "Print JIRA sprint boards and issues in the terminal"
)]
pub struct Cli {
    /// JIRA base URL, e.g. https://company.atlassian.net
    #[arg(long, global = true, env = "JIRA_URL")]
    pub url: Option<String>,

    /// User for Basic Auth (the API token comes from ATLASSIAN_API_TOKEN)
    #[arg(long, global = true, env = "ATLASSIAN_USER")]
    pub user: Option<String>,

    /// Write every raw JSON response into DIR (default: ./debug)
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_DUMP_DIR
    )]
    pub dump: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Show a sprint and its issues grouped by status
    #[command(visible_alias = "b")]
    Board {
        /// The board ID
        board_id: String,

        /// Sprint relative to the active one: -1 is the previous sprint, 1 the next
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// Show an issue's description, or its comments
    #[command(visible_alias = "i")]
    Issue {
        /// The issue key, e.g. PROJ-123 (case-insensitive)
        issue_id: String,

        #[arg(value_enum)]
        action: Option<IssueAction>,
    },
}

/// Optional issue subaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IssueAction {
    /// Show comments instead of the description
    #[value(alias = "c")]
    Comment,
}

impl From<Option<IssueAction>> for IssueSection {
    fn from(action: Option<IssueAction>) -> Self {
        match action {
            Some(IssueAction::Comment) => IssueSection::Comments,
            None => IssueSection::Description,
        }
    }
}

impl Cli {
    /// Configuration values given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            user: self.user.clone(),
            dump_dir: self.dump.clone(),
        }
    }

    /// Load configuration and run the selected command against stdout.
    pub async fn run(self) -> Result<()> {
        let config = Config::load(&self.overrides())?;
        let client = JiraClient::new(&config)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Command::Board { board_id, offset } => {
                info!(%board_id, offset, "Showing board");
                board::show(&client, &mut out, &board_id, offset, Local::now()).await?;
            }
            Command::Issue { issue_id, action } => {
                info!(%issue_id, ?action, "Showing issue");
                issue::show(&client, &mut out, &issue_id, action.into()).await?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Print a parse failure to `out` and return the process exit status.
///
/// `--help` and `--version` exit 0; usage errors print clap's message and
/// usage, then exit 1.
pub fn exit_code_for(e: &clap::Error, out: &mut impl Write) -> u8 {
    // Nothing useful is left to report if stdout itself is gone.
    let _ = write!(out, "{}", e);
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("jira").chain(args.iter().copied()))
    }

    #[test]
    fn test_board_defaults_to_offset_zero() {
        let cli = parse(&["board", "45"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Board {
                board_id: "45".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    fn test_board_alias_and_negative_offset() {
        let cli = parse(&["b", "45", "-2"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Board {
                board_id: "45".to_string(),
                offset: -2
            }
        );
    }

    #[test]
    fn test_board_explicit_positive_offset() {
        let cli = parse(&["board", "45", "+1"]);
        assert_eq!(
            cli.unwrap().command,
            Command::Board {
                board_id: "45".to_string(),
                offset: 1
            }
        );
    }

    #[test]
    fn test_board_non_numeric_offset_is_rejected() {
        let err = parse(&["board", "45", "soon"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_issue() {
        let cli = parse(&["issue", "proj-1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Issue {
                issue_id: "proj-1".to_string(),
                action: None
            }
        );
    }

    #[test]
    fn test_issue_comment_aliases() {
        for args in [["i", "PROJ-1", "comment"], ["issue", "PROJ-1", "c"]] {
            let cli = parse(&args).unwrap();
            match cli.command {
                Command::Issue { action, .. } => assert_eq!(action, Some(IssueAction::Comment)),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_issue_section_from_action() {
        assert_eq!(IssueSection::from(None), IssueSection::Description);
        assert_eq!(
            IssueSection::from(Some(IssueAction::Comment)),
            IssueSection::Comments
        );
    }

    #[test]
    fn test_invalid_invocations() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["sprint", "1"]).is_err());
        assert!(parse(&["board"]).is_err());
        assert!(parse(&["issue"]).is_err());
        assert!(parse(&["issue", "PROJ-1", "edit"]).is_err());
    }

    #[test]
    fn test_dump_flag() {
        let cli = parse(&["--dump", "board", "1"]).unwrap();
        assert_eq!(cli.dump, Some(PathBuf::from(DEFAULT_DUMP_DIR)));

        let cli = parse(&["board", "1", "--dump=/tmp/x"]).unwrap();
        assert_eq!(cli.dump, Some(PathBuf::from("/tmp/x")));

        let cli = parse(&["board", "1"]).unwrap();
        assert_eq!(cli.dump, None);
        assert_eq!(cli.overrides().dump_dir, None);
    }

    #[test]
    fn test_url_flag_feeds_overrides() {
        let cli = parse(&["--url", "https://x.atlassian.net", "i", "P-1"]).unwrap();
        assert_eq!(cli.overrides().url.as_deref(), Some("https://x.atlassian.net"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_usage_error_prints_usage_and_fails() {
        let err = parse(&["frobnicate"]).unwrap_err();
        let mut out = Vec::new();

        assert_eq!(exit_code_for(&err, &mut out), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Usage:"), "got: {}", text);
    }

    #[test]
    fn test_missing_board_id_fails() {
        let err = parse(&["board"]).unwrap_err();
        let mut out = Vec::new();

        assert_eq!(exit_code_for(&err, &mut out), 1);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_help_succeeds() {
        let err = parse(&["--help"]).unwrap_err();
        let mut out = Vec::new();

        assert_eq!(exit_code_for(&err, &mut out), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("board"), "got: {}", text);
    }
}
