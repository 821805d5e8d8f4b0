//! crates/logger-sink/src/format/json.rs

use logger::{Formatter, LogMessage, PluginError};
use serde_json::{Map, Value};

use super::{display_label, format_timestamp};

/// Formatter emitting one JSON object per message.
///
/// The object carries `timestamp`, `level`, `message` and `args`. `args`
/// holds the structured arguments; `undefined` becomes `null` and functions
/// become their `[Function: name]` description.
///
/// # Examples
///
/// ```
/// use logger::{Arg, Formatter, Severity, parse_at};
/// use logger_sink::JsonFormatter;
/// use serde_json::{Value, json};
/// use time::OffsetDateTime;
///
/// let message = parse_at(
///     Severity::ERROR,
///     &[Arg::from("failed"), Arg::from(json!({"code": 7}))],
///     OffsetDateTime::UNIX_EPOCH,
/// );
/// let line = JsonFormatter::new().format(&message).unwrap();
/// let parsed: Value = serde_json::from_str(&line).unwrap();
///
/// assert_eq!(parsed["level"], "ERROR");
/// assert_eq!(parsed["message"], "failed");
/// assert_eq!(parsed["args"], json!([{"code": 7}]));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact, single-line formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Creates a formatter producing indented multi-line output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Builds the JSON value for `message`.
    #[must_use]
    pub fn to_value(message: &LogMessage) -> Value {
        let mut object = Map::with_capacity(4);
        object.insert(
            "timestamp".to_owned(),
            Value::String(format_timestamp(message.timestamp())),
        );
        object.insert(
            "level".to_owned(),
            Value::String(display_label(message).to_owned()),
        );
        object.insert("message".to_owned(), Value::String(message.text().to_owned()));
        object.insert(
            "args".to_owned(),
            message.structured_args().iter().map(|arg| arg.to_json()).collect(),
        );
        Value::Object(object)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, message: &LogMessage) -> Result<String, PluginError> {
        let value = Self::to_value(message);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(rendered)
    }
}
