//! Printable views.

pub mod board;
pub mod issue;

pub use issue::IssueSection;
