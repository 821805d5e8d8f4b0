//! crates/logger-sink/src/format/plain.rs

use std::fmt::Write as _;

use logger::{Formatter, LogMessage, PluginError};

use super::{display_label, format_timestamp};

/// Human-readable single-line formatter.
///
/// Produces `<timestamp> [<LABEL>] <text>` followed by the compact JSON of
/// each structured argument. Pseudo-level calls are labelled with their name
/// (`[LOG]`, `[VERBOSE]`).
///
/// # Examples
///
/// ```
/// use logger::{Arg, Formatter, Severity, parse_at};
/// use logger_sink::PlainFormatter;
/// use serde_json::json;
/// use time::OffsetDateTime;
///
/// let message = parse_at(
///     Severity::WARN,
///     &[Arg::from("2025-07-22T02:45:00Z"), Arg::from("low disk"), Arg::from(json!({"free": 3}))],
///     OffsetDateTime::UNIX_EPOCH,
/// );
///
/// assert_eq!(
///     PlainFormatter::new().format(&message).unwrap(),
///     r#"2025-07-22T02:45:00.000Z [WARN] low disk {"free":3}"#
/// );
/// assert_eq!(
///     PlainFormatter::without_timestamp().format(&message).unwrap(),
///     r#"[WARN] low disk {"free":3}"#
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlainFormatter {
    timestamp: bool,
}

impl PlainFormatter {
    /// Creates a formatter that prefixes each line with its timestamp.
    #[must_use]
    pub const fn new() -> Self {
        Self { timestamp: true }
    }

    /// Creates a formatter that omits the timestamp.
    #[must_use]
    pub const fn without_timestamp() -> Self {
        Self { timestamp: false }
    }

    /// Reports whether timestamps are rendered.
    #[must_use]
    pub const fn includes_timestamp(&self) -> bool {
        self.timestamp
    }

    /// Renders `message` without going through the [`Formatter`] error channel.
    #[must_use]
    pub fn render(&self, message: &LogMessage) -> String {
        let mut line = String::with_capacity(message.text().len() + 40);
        if self.timestamp {
            line.push_str(&format_timestamp(message.timestamp()));
            line.push(' ');
        }
        line.push('[');
        line.push_str(display_label(message));
        line.push(']');

        if !message.text().is_empty() {
            line.push(' ');
            line.push_str(message.text());
        }
        for arg in message.structured_args() {
            let _ = write!(line, " {}", arg.to_json());
        }
        line
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PlainFormatter {
    fn format(&self, message: &LogMessage) -> Result<String, PluginError> {
        Ok(self.render(message))
    }
}
