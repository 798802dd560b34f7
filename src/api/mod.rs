//! JIRA API client and types.
//!
//! This module provides the interface for reading sprints and issues from the
//! JIRA REST API.

mod auth;
mod client;
mod dump;
pub mod error;
pub mod types;

pub use client::JiraClient;
pub use error::ApiError;
pub use types::{Comment, Issue, Mark, Node, Sprint};

#[cfg(test)]
pub(crate) use client::tests as test_support;
