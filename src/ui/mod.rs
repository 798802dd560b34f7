//! Terminal output.
//!
//! Views fetch what they need through the API client and write plain text
//! with ANSI styling to any `std::io::Write`.

pub mod date;
pub mod document;
pub mod theme;
pub mod views;
