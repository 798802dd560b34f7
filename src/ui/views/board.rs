//! Sprint board view.
//!
//! Picks a sprint relative to the active one, then prints its header and
//! its issues grouped by status.

use std::io::Write;

use chrono::{DateTime, Local};
use tracing::{debug, info, instrument};

use crate::api::{Issue, JiraClient, Sprint};
use crate::error::{AppError, Result};
use crate::ui::date::{days_between, format_date, parse_timestamp};
use crate::ui::theme;

/// Index of the first active sprint, or 0 if none is active.
pub fn active_index(sprints: &[Sprint]) -> usize {
    sprints.iter().position(Sprint::is_active).unwrap_or(0)
}

/// Resolve `offset` relative to the active sprint to an index into `sprints`.
///
/// # Errors
///
/// Returns `AppError::SprintOutOfRange` with the valid inclusive offset
/// range when the target falls outside the list.
pub fn resolve_sprint(sprints: &[Sprint], offset: i64) -> Result<usize> {
    let active = active_index(sprints) as i64;
    let count = sprints.len() as i64;
    match active.checked_add(offset) {
        Some(target) if (0..count).contains(&target) => Ok(target as usize),
        _ => Err(AppError::SprintOutOfRange {
            offset,
            min: -active,
            max: count - 1 - active,
        }),
    }
}

/// Group issues by status name, ordered by status priority.
///
/// Issues keep server order within a group. Statuses with equal priority
/// keep the order in which they were first seen.
pub fn group_by_status(issues: &[Issue]) -> Vec<(&str, Vec<&Issue>)> {
    let mut groups: Vec<(&str, Vec<&Issue>)> = Vec::new();

    for issue in issues {
        match groups.iter_mut().find(|(status, _)| *status == issue.status()) {
            Some((_, members)) => members.push(issue),
            None => groups.push((issue.status(), vec![issue])),
        }
    }

    groups.sort_by_key(|(status, _)| theme::status_priority(status));
    groups
}

/// Start and end of a sprint, if both parse.
fn sprint_dates(sprint: &Sprint) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let start = parse_timestamp(sprint.start_date.as_deref()?)?;
    let end = parse_timestamp(sprint.end_date.as_deref()?)?;
    Some((start, end))
}

/// Print today's date and the sprint's name, dates, goal and days left.
pub fn write_header(
    out: &mut impl Write,
    sprint: &Sprint,
    now: &DateTime<Local>,
) -> std::io::Result<()> {
    let dates = sprint_dates(sprint);

    writeln!(out)?;
    writeln!(out, "Today: {}", format_date(now))?;
    writeln!(out)?;

    match &dates {
        Some((start, end)) => writeln!(
            out,
            "Sprint: {} ({} - {})",
            sprint.name,
            format_date(start),
            format_date(end)
        )?,
        None => writeln!(out, "Sprint: {}", sprint.name)?,
    }

    if let Some(goal) = sprint.goal.as_deref().filter(|g| !g.is_empty()) {
        writeln!(out, "Goal: {}", goal)?;
    }

    if let Some((_, end)) = &dates {
        writeln!(out, "Days left: {:.1}", days_between(now, end))?;
    }

    writeln!(out)
}

/// Print each status heading followed by its issues.
pub fn write_issues(out: &mut impl Write, groups: &[(&str, Vec<&Issue>)]) -> std::io::Result<()> {
    for (status, issues) in groups {
        writeln!(out, "{}", theme::status(status))?;
        for issue in issues {
            match issue.assignee() {
                Some(assignee) => {
                    writeln!(out, "- {}: {} - {}", issue.key, issue.summary(), assignee)?
                }
                None => writeln!(out, "- {}: {}", issue.key, issue.summary())?,
            }
        }
    }
    Ok(())
}

/// Fetch and print the board.
///
/// All requests complete before anything is written, so a failure leaves
/// no partial view behind.
#[instrument(skip(client, out, now))]
pub async fn show(
    client: &JiraClient,
    out: &mut impl Write,
    board_id: &str,
    offset: i64,
    now: DateTime<Local>,
) -> Result<()> {
    let sprints = client.get_sprints(board_id).await?;
    if sprints.is_empty() {
        return Err(AppError::EmptyBoard(board_id.to_string()));
    }

    let index = resolve_sprint(&sprints, offset)?;
    let sprint = &sprints[index];
    info!(
        sprint_id = sprint.id,
        sprint = %sprint.name,
        origin_board = ?sprint.origin_board_id,
        "Resolved sprint"
    );

    let issues = client.get_sprint_issues(board_id, sprint.id).await?;
    let groups = group_by_status(&issues);
    debug!("{} issues in {} statuses", issues.len(), groups.len());

    write_header(out, sprint, &now)?;
    write_issues(out, &groups)?;
    Ok(())
}
