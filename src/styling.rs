//! Styling for terminal output.
//!
//! Messages are built with `color_print::cformat!` and printed through the
//! `anstream` macros re-exported here, which strip ANSI codes when the stream
//! is not a terminal or `NO_COLOR` is set.
//!
//! - **stdout**: the generated link only, so it can be piped
//! - **stderr**: every status, warning, and error message

use std::fmt;

use anstyle::{AnsiColor, Color, Style};
use color_print::{cformat, cstr};

pub use anstream::{eprint, eprintln, print, println, stderr, stdout};

/// Secondary text (commit hashes, commands) - use as `{DIM}text{DIM:#}`
pub const DIM: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));

/// Success symbol (green ✓)
pub const SUCCESS_SYMBOL: &str = cstr!("<green>✓</>");

/// Error symbol (red ✗)
pub const ERROR_SYMBOL: &str = cstr!("<red>✗</>");

/// Warning symbol (yellow ▲)
pub const WARNING_SYMBOL: &str = cstr!("<yellow>▲</>");

/// Hint symbol (dim ↳)
pub const HINT_SYMBOL: &str = cstr!("<dim>↳</>");

/// Info symbol (dim ○)
pub const INFO_SYMBOL: &str = cstr!("<dim>○</>");

/// A message that already carries its symbol and styling.
///
/// Message functions take `impl AsRef<str>`, which this type deliberately does
/// not implement, so a formatted message can't be formatted twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage(String);

impl FormattedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FormattedMessage> for String {
    fn from(msg: FormattedMessage) -> String {
        msg.0
    }
}

/// Format an error message with symbol and red styling
///
/// Content can include inner styling like `<bold>`:
/// ```
/// use color_print::cformat;
/// use permalink::styling::error_message;
///
/// let path = "src/lib.rs";
/// println!("{}", error_message(cformat!("<bold>{path}</> is not tracked")));
/// ```
pub fn error_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{ERROR_SYMBOL} <red>{}</>", content.as_ref()))
}

/// Format a hint message with symbol and dim styling
pub fn hint_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{HINT_SYMBOL} <dim>{}</>", content.as_ref()))
}

/// Format a warning message with symbol and yellow styling
pub fn warning_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{WARNING_SYMBOL} <yellow>{}</>", content.as_ref()))
}

/// Format a success message with symbol and green styling
pub fn success_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{SUCCESS_SYMBOL} <green>{}</>", content.as_ref()))
}

/// Format an info message with symbol (no color on text - neutral status)
pub fn info_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(format!("{INFO_SYMBOL} {}", content.as_ref()))
}

/// Indent every line of `content` under a two-space gutter.
///
/// Used for quoting git's own output beneath an error line.
pub fn format_with_gutter(content: &str) -> String {
    content
        .trim_end()
        .lines()
        .map(|line| format!("  {DIM}{line}{DIM:#}"))
        .collect::<Vec<_>>()
        .join("\n")
}
