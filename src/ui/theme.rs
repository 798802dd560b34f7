//! Terminal styling.
//!
//! Output goes straight to stdout as plain text with inline ANSI escape
//! sequences, so the sequences are spelled out here. Styling crates such as
//! `console` emit the colour before bold and drop colour when stdout is not
//! a terminal, which changes the bytes the board prints.

/// Resets all attributes.
pub const RESET: &str = "\x1b[0m";
/// Bold.
pub const BOLD: &str = "\x1b[1m";
/// Underline.
pub const UNDERLINE: &str = "\x1b[4m";
/// Red foreground.
pub const RED: &str = "\x1b[31m";
/// Green foreground.
pub const GREEN: &str = "\x1b[32m";
/// Yellow foreground.
pub const YELLOW: &str = "\x1b[33m";
/// Blue foreground.
pub const BLUE: &str = "\x1b[34m";
/// Cyan foreground.
pub const CYAN: &str = "\x1b[36m";
/// Bright black (grey) foreground.
pub const GREY: &str = "\x1b[90m";

/// Wrap `text` in the given escape sequences followed by a reset.
pub fn paint(codes: &[&str], text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for code in codes {
        out.push_str(code);
    }
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// Style used for hyperlinks.
pub fn link(text: &str) -> String {
    paint(&[UNDERLINE, CYAN], text)
}

/// Escape sequences for a status heading, matched case-insensitively.
pub fn status_codes(status: &str) -> &'static [&'static str] {
    match status.to_lowercase().as_str() {
        "in progress" => &[BOLD, BLUE],
        "review" => &[BOLD, YELLOW],
        "done" => &[GREEN],
        "blocked" => &[RED],
        _ => &[BOLD, GREY],
    }
}

/// A status name wrapped in its colour.
pub fn status(status: &str) -> String {
    paint(status_codes(status), status)
}

/// Display order of a status; lower comes first.
pub fn status_priority(status: &str) -> u32 {
    match status.to_lowercase().as_str() {
        "in progress" => 10,
        "review" => 20,
        "done" => 30,
        _ => 9999,
    }
}
