//! crates/logger/src/message.rs
//! The immutable message handed to formatters and the parser that builds it.

use time::OffsetDateTime;

use crate::levels::Severity;
use crate::timestamp::parse_timestamp;
use crate::value::{Arg, Primitive, StructuredArg};

/// A parsed log call.
///
/// Built once per accepted call and never modified afterwards; formatters only
/// receive shared references to it.
#[derive(Clone, Debug, PartialEq)]
pub struct LogMessage {
    severity: Severity,
    level_label: &'static str,
    text: String,
    timestamp: OffsetDateTime,
    structured_args: Vec<StructuredArg>,
}

impl LogMessage {
    /// Returns the severity the message was emitted at.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the standard level label, `""` for pseudo-level calls.
    #[must_use]
    pub const fn level_label(&self) -> &'static str {
        self.level_label
    }

    /// Returns the space-joined text of every primitive argument.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the instant the message refers to.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Returns the structured arguments in call order.
    #[must_use]
    pub fn structured_args(&self) -> &[StructuredArg] {
        &self.structured_args
    }
}

/// Parses `args` into a [`LogMessage`] stamped with the current UTC instant
/// unless the first argument supplies its own timestamp.
#[must_use]
pub fn parse(severity: Severity, args: &[Arg]) -> LogMessage {
    parse_at(severity, args, OffsetDateTime::now_utc())
}

/// Deterministic variant of [`parse`] using `now` as the fallback timestamp.
///
/// # Examples
///
/// ```
/// use logger::{Arg, Severity, StructuredArg, parse_at};
/// use serde_json::json;
/// use time::OffsetDateTime;
///
/// let args = [
///     Arg::from("a"),
///     Arg::from(1),
///     Arg::from(true),
///     Arg::from(json!({"x": 1})),
///     Arg::from(json!([1, 2])),
/// ];
/// let message = parse_at(Severity::INFO, &args, OffsetDateTime::UNIX_EPOCH);
///
/// assert_eq!(message.text(), "a 1 true");
/// assert_eq!(
///     message.structured_args(),
///     &[StructuredArg::Json(json!({"x": 1})), StructuredArg::Json(json!([1, 2]))]
/// );
/// assert_eq!(message.level_label(), "INFO");
/// ```
#[must_use]
pub fn parse_at(severity: Severity, args: &[Arg], now: OffsetDateTime) -> LogMessage {
    let (timestamp, rest) = match args.split_first() {
        Some((Arg::Primitive(Primitive::Str(first)), rest)) => {
            parse_timestamp(first).map_or((now, args), |instant| (instant, rest))
        }
        _ => (now, args),
    };

    let mut text = String::new();
    let mut structured_args = Vec::new();
    for arg in rest {
        match arg {
            Arg::Primitive(primitive) => {
                if !text.is_empty() {
                    text.push(' ');
                }
                primitive.render_into(&mut text);
            }
            Arg::Structured(structured) => structured_args.push(structured.clone()),
        }
    }

    LogMessage {
        severity,
        level_label: severity.label(),
        text: trim_owned(text),
        timestamp,
        structured_args,
    }
}

fn trim_owned(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;
    use serde_json::json;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-01-01 00:00:00 UTC);

    #[test]
    fn empty_args_yield_empty_message() {
        let message = parse_at(Severity::INFO, &[], NOW);
        assert_eq!(message.text(), "");
        assert!(message.structured_args().is_empty());
        assert_eq!(message.timestamp(), NOW);
        assert_eq!(message.level_label(), "INFO");
    }

    #[test]
    fn leading_timestamp_is_consumed() {
        let args = [Arg::from("2025-07-22T02:45:00.000Z"), Arg::from("hello")];
        let message = parse_at(Severity::WARN, &args, NOW);
        assert_eq!(message.timestamp(), datetime!(2025-07-22 02:45:00 UTC));
        assert_eq!(message.text(), "hello");
        assert!(message.structured_args().is_empty());
    }

    #[test]
    fn timestamp_alone_yields_empty_text() {
        let args = [Arg::from("2025-07-22 02:45:00")];
        let message = parse_at(Severity::WARN, &args, NOW);
        assert_eq!(message.timestamp(), datetime!(2025-07-22 02:45:00 UTC));
        assert_eq!(message.text(), "");
    }

    #[test]
    fn invalid_timestamp_stays_in_text() {
        let args = [Arg::from("2025-02-30T00:00:00Z"), Arg::from("x")];
        let message = parse_at(Severity::ERROR, &args, NOW);
        assert_eq!(message.timestamp(), NOW);
        assert_eq!(message.text(), "2025-02-30T00:00:00Z x");
    }

    #[test]
    fn spaced_timestamp_with_fraction_stays_in_text() {
        let args = [Arg::from("2025-07-22 02:45:00.5"), Arg::from("x")];
        let message = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(message.timestamp(), NOW);
        assert_eq!(message.text(), "2025-07-22 02:45:00.5 x");
    }

    #[test]
    fn only_first_argument_can_be_a_timestamp() {
        let args = [Arg::from("start"), Arg::from("2025-07-22T02:45:00Z")];
        let message = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(message.timestamp(), NOW);
        assert_eq!(message.text(), "start 2025-07-22T02:45:00Z");
    }

    #[test]
    fn primitives_and_structured_values_are_partitioned() {
        let args = [
            Arg::from("a"),
            Arg::from(1),
            Arg::from(true),
            Arg::from(json!({"x": 1})),
            Arg::from(json!([1, 2])),
        ];
        let message = parse_at(Severity::DEBUG, &args, NOW);
        assert_eq!(message.text(), "a 1 true");
        assert_eq!(
            message.structured_args(),
            &[
                StructuredArg::Json(json!({"x": 1})),
                StructuredArg::Json(json!([1, 2]))
            ]
        );
    }

    #[test]
    fn structured_order_is_preserved_across_interleaving() {
        let args = [
            Arg::null(),
            Arg::from("one"),
            Arg::function("cb"),
            Arg::from(2.5),
            Arg::undefined(),
        ];
        let message = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(message.text(), "one 2.5");
        assert_eq!(
            message.structured_args(),
            &[
                StructuredArg::Null,
                StructuredArg::Function("cb".to_owned()),
                StructuredArg::Undefined
            ]
        );
    }

    #[test]
    fn text_is_trimmed_but_inner_spacing_kept() {
        let args = [Arg::from("  padded"), Arg::from(""), Arg::from("end  ")];
        let message = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(message.text(), "padded  end");
    }

    #[test]
    fn symbols_and_special_numbers_render_in_text() {
        let args = [Arg::symbol("tag"), Arg::from(f64::NAN), Arg::from(-0.0)];
        let message = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(message.text(), "Symbol(tag) NaN 0");
    }

    #[test]
    fn pseudo_levels_have_empty_label() {
        let message = parse_at(Severity::LOG, &[Arg::from("forced")], NOW);
        assert_eq!(message.level_label(), "");
        assert_eq!(message.severity(), Severity::LOG);
        let message = parse_at(Severity::Standard(Level::Trace), &[], NOW);
        assert_eq!(message.level_label(), "TRACE");
    }

    #[test]
    fn input_is_left_untouched() {
        let args = vec![Arg::from("2025-07-22T02:45:00Z"), Arg::from(json!({"k": 1}))];
        let before = args.clone();
        let _ = parse_at(Severity::INFO, &args, NOW);
        assert_eq!(args, before);
    }

    #[test]
    fn parsing_is_deterministic_for_fixed_now() {
        let args = [Arg::from("x"), Arg::from(json!([1]))];
        assert_eq!(
            parse_at(Severity::INFO, &args, NOW),
            parse_at(Severity::INFO, &args, NOW)
        );
    }
}
