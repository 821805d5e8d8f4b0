#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logger` is a leveled logging front-end with pluggable formatting and
//! output. Callers pass a heterogeneous argument list to one of the severity
//! methods on [`Logger`]; calls that clear the threshold are parsed into a
//! [`LogMessage`], rendered by the configured [`Formatter`] and written by the
//! [`Sink`] routed for that severity.
//!
//! # Design
//!
//! - [`Level`] is the closed set of standard thresholds, `OFF` through
//!   `TRACE`. [`PseudoLevel`] names the call-time selectors (`LOG`, `VERBOSE`,
//!   `DEFAULT`) that follow their own gating rules and can never be assigned as
//!   a threshold. [`Severity`] covers both.
//! - [`parse_at`] splits arguments into display text and structured values,
//!   consuming a leading timestamp string when one is present.
//! - [`LoggerConfig`] holds the threshold, verbose flag, formatter and the
//!   per-severity sink table. [`ConfigUpdate`] expresses partial changes and
//!   [`Settings`] loads them from the environment.
//! - [`Logger`] guards a configuration with an `RwLock` and drives the
//!   gate → parse → format → sink pipeline. Concrete formatters and sinks live
//!   in the companion `logger-sink` crate.
//!
//! # Invariants
//!
//! - Filtered calls perform no parsing, formatting or writing.
//! - The threshold is always a standard level once assigned; invalid values
//!   leave it unchanged.
//! - `log` calls are never filtered; `verbose` calls depend only on the
//!   verbose flag.
//! - Sink lookup always resolves: an override for the severity, else the
//!   default sink.
//!
//! # Errors
//!
//! [`Logger`] operations return [`LoggerError`]. Invalid thresholds produce
//! [`LoggerError::InvalidLogLevel`]; formatter and sink failures are returned
//! to the caller unchanged inside [`LoggerError::Format`] and
//! [`LoggerError::Sink`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logger::{Level, Logger, LogMessage, args, formatter_fn, sink_fn};
//! use serde_json::json;
//!
//! let out = Arc::new(Mutex::new(String::new()));
//! let sink_out = Arc::clone(&out);
//!
//! let logger = Logger::new();
//! logger.set_formatter(Arc::new(formatter_fn(|m: &LogMessage| {
//!     format!("[{}] {} ({} extra)", m.level_label(), m.text(), m.structured_args().len())
//! })));
//! logger.set_default_sink(Arc::new(sink_fn(move |line: &str| {
//!     sink_out.lock().unwrap().push_str(line);
//! })));
//! logger.set_level(Level::Debug).unwrap();
//!
//! logger.debug(args!["cache", "miss", json!({"key": "a"})]).unwrap();
//! assert_eq!(*out.lock().unwrap(), "[DEBUG] cache miss (1 extra)");
//! ```
//!
//! # See also
//!
//! - [`Logger::global`] for the process-wide instance.
//! - The `logger-sink` crate for plain and JSON formatters and writer sinks.

mod config;
mod diagnostics;
mod error;
mod levels;
mod logger;
mod message;
mod plugin;
mod settings;
mod timestamp;
mod value;

pub use config::{ConfigUpdate, LoggerConfig};
pub use error::{LoggerError, ParseLevelError, PluginError};
pub use levels::{Level, PseudoLevel, Severity, code_of, label_of, label_of_value};
pub use logger::{Logger, reset_global};
pub use message::{LogMessage, parse, parse_at};
pub use plugin::{
    FnFormatter, FnSink, Formatter, NoopFormatter, NoopSink, Sink, formatter_fn, sink_fn,
};
pub use settings::{LEVEL_ENV, Settings, VERBOSE_ENV};
pub use timestamp::parse_timestamp;
pub use value::{Arg, Primitive, StructuredArg};

/// Builds a `&[Arg]` slice from heterogeneous values.
///
/// Each element is converted with [`Arg::from`], so strings, numbers, booleans,
/// levels and `serde_json` values can be mixed freely.
///
/// # Examples
///
/// ```
/// use logger::{Arg, args};
///
/// let list = args!["retry", 3, true];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list[0], Arg::from("retry"));
///
/// let empty = args![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let empty: &[$crate::Arg] = &[];
        empty
    }};
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::Arg::from($arg)),+]
    };
}
