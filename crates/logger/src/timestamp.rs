//! crates/logger/src/timestamp.rs
//! Recognises caller-supplied timestamps at the head of an argument list.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Parses `input` as a message timestamp.
///
/// Accepted forms:
///
/// - RFC 3339 / ISO-8601 with a `Z` or `±HH:MM` offset, optional fraction
///   (`2025-07-22T02:45:00.000Z`, `2025-07-22T04:45:00+02:00`)
/// - ISO-8601 without an offset (`2025-07-22T02:45:00`, `2025-07-22T02:45:00.5`)
/// - space separated, whole seconds only (`2025-07-22 02:45:00`)
///
/// Offset-less forms are taken as UTC. Strings that match the shape but name an
/// impossible instant (`2025-02-30T00:00:00Z`) are rejected.
///
/// # Examples
///
/// ```
/// use logger::parse_timestamp;
///
/// assert!(parse_timestamp("2025-07-22T02:45:00.000Z").is_some());
/// assert!(parse_timestamp("2025-07-22 02:45:00").is_some());
/// assert!(parse_timestamp("2025-07-22").is_none());
/// assert!(parse_timestamp("hello").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<OffsetDateTime> {
    if !has_date_prefix(input) {
        return None;
    }

    if let Ok(instant) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(instant);
    }

    let iso_local = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    PrimitiveDateTime::parse(input, iso_local)
        .or_else(|_| PrimitiveDateTime::parse(input, spaced))
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Cheap shape check so ordinary text never reaches the full parsers.
fn has_date_prefix(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 19
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && matches!(bytes[10], b'T' | b't' | b' ')
}
