//! JIRA API response types.
//!
//! These model the parts of the agile (`/rest/agile/1.0`) and platform
//! (`/rest/api/3`) responses that the board and issue views read. Fields the
//! views never look at are left out; serde ignores them.

use serde::Deserialize;

/// Lifecycle state of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Future,
    Active,
    Closed,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A sprint on a board.
///
/// Returned as part of `GET /rest/agile/1.0/board/{boardId}/sprint`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// The sprint ID.
    pub id: u64,
    /// The sprint display name.
    pub name: String,
    /// Where the sprint is in its lifecycle.
    pub state: SprintState,
    /// Start timestamp (ISO-8601), absent for future sprints.
    #[serde(default)]
    pub start_date: Option<String>,
    /// End timestamp (ISO-8601), absent for future sprints.
    #[serde(default)]
    pub end_date: Option<String>,
    /// The sprint goal, often empty.
    #[serde(default)]
    pub goal: Option<String>,
    /// The board that owns the sprint.
    #[serde(default)]
    pub origin_board_id: Option<u64>,
}

impl Sprint {
    /// Whether this sprint is the currently running one.
    pub fn is_active(&self) -> bool {
        self.state == SprintState::Active
    }
}

/// One page of sprints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPage {
    /// Whether this is the final page.
    #[serde(default)]
    pub is_last: bool,
    /// The sprints in this page, in server order.
    #[serde(default)]
    pub values: Vec<Sprint>,
}

/// Issues of a sprint.
///
/// Returned by `GET /rest/agile/1.0/board/{boardId}/sprint/{sprintId}/issue`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintIssues {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// A JIRA issue.
///
/// Returned by `GET /rest/api/3/issue/{issueKey}` or as part of a sprint's
/// issue list.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The issue fields.
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the issue status name.
    pub fn status(&self) -> &str {
        &self.fields.status.name
    }

    /// Get the assignee display name, if assigned.
    ///
    /// An assignee with an empty display name counts as unassigned.
    pub fn assignee(&self) -> Option<&str> {
        self.fields
            .assignee
            .as_ref()
            .map(|a| a.display_name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Get the comments embedded in the issue response.
    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|c| c.comments.as_slice())
            .unwrap_or(&[])
    }
}

/// Issue fields.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
    /// The issue status.
    #[serde(default)]
    pub status: Status,
    /// The issue assignee.
    #[serde(default)]
    pub assignee: Option<User>,
    /// The issue description in Atlassian Document Format.
    #[serde(default)]
    pub description: Option<Document>,
    /// Comments, present on the single-issue endpoint.
    #[serde(default)]
    pub comment: Option<CommentPage>,
}

/// Issue status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    /// The status name (e.g., "To Do", "In Progress", "Done").
    #[serde(default)]
    pub name: String,
}

/// A JIRA user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's display name.
    #[serde(default)]
    pub display_name: String,
}

/// The `comment` field of an issue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a JIRA issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// The user who wrote the comment.
    pub author: User,
    /// The comment body in Atlassian Document Format.
    #[serde(default)]
    pub body: Document,
    /// When the comment was created.
    #[serde(default)]
    pub created: Option<String>,
}

/// Atlassian Document Format (ADF) root.
///
/// JIRA uses ADF for rich text fields like descriptions and comments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// The top level nodes of the document.
    #[serde(default)]
    pub content: Vec<Node>,
}

/// A node in an ADF document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A run of literal text with optional marks.
    Text {
        #[serde(default)]
        text: String,
        #[serde(default)]
        marks: Vec<Mark>,
    },
    /// A paragraph holding inline nodes.
    Paragraph {
        #[serde(default)]
        content: Vec<Node>,
    },
    /// Lists, headings, media and everything else.
    #[serde(other)]
    Other,
}

#[cfg(test)]
impl Node {
    /// A text node without marks.
    pub fn text(text: &str) -> Self {
        Node::Text {
            text: text.to_string(),
            marks: Vec::new(),
        }
    }

    /// A text node carrying a link mark.
    pub fn link(text: &str, href: &str) -> Self {
        Node::Text {
            text: text.to_string(),
            marks: vec![Mark::Link {
                attrs: LinkAttrs {
                    href: href.to_string(),
                },
            }],
        }
    }

    /// A paragraph with the given children.
    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }
}

/// An inline annotation on a text node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Link {
        #[serde(default)]
        attrs: LinkAttrs,
    },
    /// Bold, italic, code and the rest: not styled.
    #[serde(other)]
    Other,
}

/// Attributes of a link mark.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkAttrs {
    #[serde(default)]
    pub href: String,
}
