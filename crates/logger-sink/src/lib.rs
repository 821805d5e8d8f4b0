#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logger-sink/src/lib.rs
//!
//! # Overview
//!
//! `logger-sink` provides the concrete [`Formatter`](logger::Formatter) and
//! [`Sink`](logger::Sink) implementations used with the `logger` crate:
//! human-readable and JSON formatters, writer-backed and console sinks, an
//! in-memory buffer, and recording doubles for tests.
//!
//! # Design
//!
//! - [`PlainFormatter`] renders `<timestamp> [<LABEL>] <text>` followed by
//!   the compact JSON of each structured argument. [`JsonFormatter`] renders
//!   one JSON object per message.
//! - [`WriterSink`] wraps any [`std::io::Write`] implementor behind a mutex;
//!   the [`LineMode`] decides whether each message ends with a newline.
//!   [`ConsoleSink`] targets standard output or standard error.
//! - [`BufferSink`], [`RecordingSink`] and [`RecordingFormatter`] keep what
//!   they receive in memory and share state across clones.
//! - With the `tracing` feature, `TracingSink` forwards output to `tracing`
//!   and `LoggerLayer` routes `tracing` events into a logger.
//!
//! # Invariants
//!
//! - Formatters are pure: the same message renders to the same string.
//! - Timestamps are rendered in UTC, RFC 3339, with millisecond precision.
//! - `LineMode::WithNewline` is the default so each message occupies its own
//!   line.
//!
//! # Errors
//!
//! I/O failures from writers and serialisation failures from the JSON
//! formatter surface as [`PluginError`](logger::PluginError) values, which
//! the logger returns to its caller.
//!
//! # Examples
//!
//! Route errors to one buffer and everything else to another:
//!
//! ```
//! use std::sync::Arc;
//! use logger::{Level, Logger, args};
//! use logger_sink::{BufferSink, PlainFormatter};
//!
//! let errors = BufferSink::new();
//! let rest = BufferSink::new();
//!
//! let logger = Logger::new();
//! logger.set_formatter(Arc::new(PlainFormatter::without_timestamp()));
//! logger.set_default_sink(Arc::new(rest.clone()));
//! logger.register_sink(Level::Error, Arc::new(errors.clone()));
//!
//! logger.error(args!["upload", "failed"]).unwrap();
//! logger.info(args!["retrying"]).unwrap();
//!
//! assert_eq!(errors.lines(), ["[ERROR] upload failed"]);
//! assert_eq!(rest.lines(), ["[INFO] retrying"]);
//! ```
//!
//! # See also
//!
//! - The `logger` crate for levels, parsing, configuration and dispatch.

mod format;
mod line_mode;
mod recording;
mod sink;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use format::{JsonFormatter, PlainFormatter};
pub use line_mode::LineMode;
pub use recording::{RecordingFormatter, RecordingSink};
pub use sink::{BufferSink, ConsoleSink, ConsoleStream, WriterSink};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    LoggerLayer, OUTPUT_TARGET, TracingSink, logger_level, tracing_level, try_init_tracing,
    try_init_tracing_with_filter,
};
