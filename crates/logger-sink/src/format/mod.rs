//! crates/logger-sink/src/format/mod.rs
//! Formatter implementations.

mod json;
mod plain;

pub use json::JsonFormatter;
pub use plain::PlainFormatter;

use logger::LogMessage;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Renders `instant` as RFC 3339 in UTC with millisecond precision.
pub(crate) fn format_timestamp(instant: OffsetDateTime) -> String {
    instant
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_default()
}

/// The bracketed label: the standard label, or the pseudo-level's name.
pub(crate) fn display_label(message: &LogMessage) -> &'static str {
    match message.level_label() {
        "" => message.severity().name(),
        label => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logger::{Arg, Severity, parse_at};
    use time::macros::datetime;

    #[test]
    fn timestamps_are_normalised_to_utc_milliseconds() {
        assert_eq!(
            format_timestamp(datetime!(2025-07-22 04:45:00.123456 +02:00)),
            "2025-07-22T02:45:00.123Z"
        );
        assert_eq!(
            format_timestamp(datetime!(2024-01-01 00:00:00 UTC)),
            "2024-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn pseudo_levels_use_their_name() {
        let now = datetime!(2024-01-01 00:00:00 UTC);
        let log = parse_at(Severity::LOG, &[Arg::from("x")], now);
        let warn = parse_at(Severity::WARN, &[Arg::from("x")], now);
        assert_eq!(display_label(&log), "LOG");
        assert_eq!(display_label(&warn), "WARN");
    }
}
