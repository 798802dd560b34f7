//! Single issue view.

use std::io::Write;

use tracing::instrument;

use crate::api::{Comment, Issue, JiraClient};
use crate::error::Result;
use crate::ui::date::{format_date, parse_timestamp};
use crate::ui::{document, theme};

/// What to print for an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueSection {
    /// The rendered description.
    #[default]
    Description,
    /// Every comment, oldest first.
    Comments,
}

/// Print the issue's description.
pub fn write_description(out: &mut impl Write, issue: &Issue) -> std::io::Result<()> {
    let text = issue
        .fields
        .description
        .as_ref()
        .map(|doc| document::render(&doc.content))
        .unwrap_or_default();
    writeln!(out, "{}", text)
}

/// Print each comment as a bold author line followed by its body.
pub fn write_comments(out: &mut impl Write, comments: &[Comment]) -> std::io::Result<()> {
    if comments.is_empty() {
        return writeln!(out, "No comments.");
    }

    for comment in comments {
        let author = theme::paint(&[theme::BOLD], &comment.author.display_name);
        match comment.created.as_deref().and_then(parse_timestamp) {
            Some(created) => writeln!(out, "{} ({})", author, format_date(&created))?,
            None => writeln!(out, "{}", author)?,
        }
        write!(out, "{}", document::render(&comment.body.content))?;
    }
    Ok(())
}

/// Fetch an issue by id and print the requested section.
///
/// The id is uppercased before the request.
#[instrument(skip(client, out))]
pub async fn show(
    client: &JiraClient,
    out: &mut impl Write,
    issue_id: &str,
    section: IssueSection,
) -> Result<()> {
    let issue = client.get_issue(&issue_id.to_uppercase()).await?;

    match section {
        IssueSection::Description => write_description(out, &issue)?,
        IssueSection::Comments => write_comments(out, issue.comments())?,
    }
    Ok(())
}
