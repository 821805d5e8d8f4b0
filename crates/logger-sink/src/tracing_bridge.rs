//! crates/logger-sink/src/tracing_bridge.rs
//! Bridge between the tracing crate and the logger.
//!
//! Two directions are covered:
//!
//! - [`TracingSink`] forwards formatted logger output to `tracing` events, so
//!   an application already running a subscriber sees logger output there.
//! - [`LoggerLayer`] is a `tracing-subscriber` layer that turns `tracing`
//!   events into logger calls, applying the logger's own gate, formatter and
//!   sink routing.
//!
//! Events under the `logger` target prefix are never routed back into a
//! logger, which keeps the two directions from feeding each other.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logger::Logger;
//! use logger_sink::{ConsoleSink, PlainFormatter, try_init_tracing};
//!
//! let logger = Arc::new(Logger::new());
//! logger.set_formatter(Arc::new(PlainFormatter::new()));
//! logger.set_default_sink(Arc::new(ConsoleSink::stderr()));
//! try_init_tracing(Arc::clone(&logger))?;
//!
//! tracing::warn!(attempt = 3, "retrying upload");
//! ```

use std::fmt;
use std::sync::Arc;

use logger::{Arg, Level as LogLevel, Logger, PluginError, Severity, Sink};
use serde_json::{Map, Number, Value};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Target of the events emitted by [`TracingSink`].
pub const OUTPUT_TARGET: &str = "logger::output";

const RESERVED_PREFIX: &str = "logger";

/// Maps a logger severity onto the closest `tracing` level.
///
/// `FATAL` shares `ERROR`; the pseudo-levels map to `INFO`.
#[must_use]
pub const fn tracing_level(severity: Severity) -> Level {
    match severity {
        Severity::Standard(LogLevel::Off | LogLevel::Fatal | LogLevel::Error) => Level::ERROR,
        Severity::Standard(LogLevel::Warn) => Level::WARN,
        Severity::Standard(LogLevel::Debug) => Level::DEBUG,
        Severity::Standard(LogLevel::Trace) => Level::TRACE,
        Severity::Standard(LogLevel::Info) | Severity::Pseudo(_) => Level::INFO,
    }
}

/// Maps a `tracing` level onto the logger's standard levels.
#[must_use]
pub fn logger_level(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warn,
        Level::INFO => LogLevel::Info,
        Level::DEBUG => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}

/// Sink that re-emits each formatted message as a `tracing` event.
///
/// Events use the [`OUTPUT_TARGET`] target and carry the formatted text as
/// their message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a sink emitting events at `level`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a sink emitting at the level mapped from `severity`.
    #[must_use]
    pub const fn for_severity(severity: Severity) -> Self {
        Self::new(tracing_level(severity))
    }

    /// Returns the level events are emitted at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl Sink for TracingSink {
    fn write(&self, output: &str) -> Result<(), PluginError> {
        match self.level {
            Level::ERROR => tracing::error!(target: OUTPUT_TARGET, "{}", output),
            Level::WARN => tracing::warn!(target: OUTPUT_TARGET, "{}", output),
            Level::INFO => tracing::info!(target: OUTPUT_TARGET, "{}", output),
            Level::DEBUG => tracing::debug!(target: OUTPUT_TARGET, "{}", output),
            _ => tracing::trace!(target: OUTPUT_TARGET, "{}", output),
        }
        Ok(())
    }
}

/// A tracing layer that routes events into a [`Logger`].
///
/// Each event becomes one logger call at the mapped level. The event's
/// `message` field supplies the text and any other fields are passed along as
/// a single JSON object argument.
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Creates a layer feeding `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Returns the logger events are routed to.
    #[must_use]
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    fn is_reserved(target: &str) -> bool {
        target
            .strip_prefix(RESERVED_PREFIX)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl fmt::Debug for LoggerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerLayer")
            .field("level", &self.logger.level())
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_reserved(metadata.target()) {
            return;
        }
        let level = logger_level(metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut args = Vec::with_capacity(2);
        if let Some(message) = visitor.message {
            args.push(Arg::from(message));
        }
        if !visitor.fields.is_empty() {
            args.push(Arg::from(Value::Object(visitor.fields)));
        }

        // A layer has no channel back to the emitting call site.
        let _ = self.logger.emit(level, &args);
    }
}

/// Collects the message and remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &tracing::field::Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert(field, Value::String(value.to_owned()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.insert(field, Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}

/// Installs a global subscriber that routes every `tracing` event into
/// `logger`.
///
/// # Errors
///
/// Fails when a global subscriber has already been set.
pub fn try_init_tracing(
    logger: Arc<Logger>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .try_init()
}

/// Like [`try_init_tracing`], with an additional filter layer such as
/// `tracing_subscriber::EnvFilter` applied before events reach the logger.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use logger::Logger;
/// use logger_sink::try_init_tracing_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// let logger = Arc::new(Logger::new());
/// try_init_tracing_with_filter(logger, EnvFilter::from_default_env())?;
/// ```
pub fn try_init_tracing_with_filter<F>(
    logger: Arc<Logger>,
    filter: F,
) -> Result<(), tracing_subscriber::util::TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init()
}
