//! crates/logger/src/logger.rs
//! The orchestrator: gates each call, then runs parse, format and sink.

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::{ConfigUpdate, LoggerConfig};
use crate::diagnostics::{trace_level_ignored, trace_plugin_failure};
use crate::error::LoggerError;
use crate::levels::{Level, Severity};
use crate::message::parse;
use crate::plugin::{Formatter, Sink};
use crate::value::Arg;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// A leveled logger with pluggable formatting and output.
///
/// Every call is synchronous: the gate is checked against the current
/// configuration and, when the call passes, the arguments are parsed into a
/// [`LogMessage`](crate::LogMessage), handed to the formatter, and the result
/// written to the sink routed for the call's severity. Filtered calls return
/// before any of that work starts.
///
/// The formatter and sink are snapshotted before they run, so either may
/// reconfigure the logger without deadlocking. Changes made that way apply
/// from the next call.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logger::{Level, Logger, args, formatter_fn, sink_fn};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&lines);
///
/// let logger = Logger::new();
/// logger.set_formatter(Arc::new(formatter_fn(|m| format!("{} {}", m.level_label(), m.text()))));
/// logger.set_default_sink(Arc::new(sink_fn(move |line| {
///     captured.lock().unwrap().push(line.to_owned());
/// })));
/// logger.set_level(Level::Warn).unwrap();
///
/// logger.error(args!["disk", 3, "full"]).unwrap();
/// logger.info(args!["not shown"]).unwrap();
///
/// assert_eq!(*lines.lock().unwrap(), ["ERROR disk 3 full"]);
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    config: RwLock<LoggerConfig>,
}

impl Logger {
    /// Creates a logger with the default configuration.
    ///
    /// Nothing is written until a formatter and sink are installed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::new())
    }

    /// Creates a logger starting from `config`.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Creates an isolated logger for tests.
    ///
    /// Equivalent to [`Logger::new`]; the separate name keeps tests from
    /// reaching for [`Logger::global`] and sharing state.
    #[must_use]
    pub fn new_for_test() -> Self {
        Self::new()
    }

    /// Returns the process-wide logger, creating it on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Logs at `FATAL`.
    pub fn fatal(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::FATAL, args)
    }

    /// Logs at `ERROR`.
    pub fn error(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::ERROR, args)
    }

    /// Logs at `WARN`.
    pub fn warn(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::WARN, args)
    }

    /// Logs at `INFO`.
    pub fn info(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::INFO, args)
    }

    /// Logs at `DEBUG`.
    pub fn debug(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::DEBUG, args)
    }

    /// Logs at `TRACE`.
    pub fn trace(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::TRACE, args)
    }

    /// Logs regardless of the configured threshold, including `OFF`.
    pub fn log(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::LOG, args)
    }

    /// Logs only while verbose output is enabled, regardless of the threshold.
    pub fn verbose(&self, args: &[Arg]) -> Result<(), LoggerError> {
        self.emit(Severity::VERBOSE, args)
    }

    /// Logs `args` at `severity`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Format`] or [`LoggerError::Sink`] when the
    /// formatter or sink fails. The configuration is unaffected either way.
    pub fn emit(&self, severity: impl Into<Severity>, args: &[Arg]) -> Result<(), LoggerError> {
        let severity = severity.into().resolve();

        let (formatter, sink) = {
            let config = self.read();
            if !config.is_enabled(severity) {
                return Ok(());
            }
            (Arc::clone(config.formatter()), config.sink_for(severity))
        };

        let message = parse(severity, args);
        let output = formatter.format(&message).map_err(|error| {
            trace_plugin_failure(severity, "formatter", &error);
            LoggerError::Format(error)
        })?;
        sink.write(&output).map_err(|error| {
            trace_plugin_failure(severity, "sink", &error);
            LoggerError::Sink(error)
        })
    }

    /// Reports whether a call at `severity` would currently be emitted.
    #[must_use]
    pub fn is_enabled(&self, severity: impl Into<Severity>) -> bool {
        self.read().is_enabled(severity.into().resolve())
    }

    /// Returns the configured threshold, `DEFAULT` until one is assigned.
    #[must_use]
    pub fn level(&self) -> Severity {
        self.read().level()
    }

    /// Returns the threshold the gate applies.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        self.read().effective_level()
    }

    /// Assigns the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLogLevel`] when `value` is not a standard
    /// level; the previous threshold stays in effect.
    pub fn set_level(&self, value: impl Into<Arg>) -> Result<(), LoggerError> {
        let value = value.into();
        let mut config = self.write();
        if config.set_level(value.clone()) {
            Ok(())
        } else {
            Err(invalid_level(&value))
        }
    }

    /// Reports whether verbose output is enabled.
    #[must_use]
    pub fn verbose_enabled(&self) -> bool {
        self.read().verbose()
    }

    /// Enables or disables verbose output.
    pub fn set_verbose(&self, verbose: bool) {
        self.write().set_verbose(verbose);
    }

    /// Replaces the formatter.
    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        self.write().set_formatter(formatter);
    }

    /// Replaces the fallback sink.
    pub fn set_default_sink(&self, sink: Arc<dyn Sink>) {
        self.write().set_default_sink(sink);
    }

    /// Routes `severity` to `sink`, or back to the default sink when `None`.
    pub fn set_sink(&self, severity: impl Into<Severity>, sink: Option<Arc<dyn Sink>>) {
        self.write().set_sink(severity, sink);
    }

    /// Routes `severity` to `sink`.
    pub fn register_sink(&self, severity: impl Into<Severity>, sink: Arc<dyn Sink>) {
        self.write().register_sink(severity, sink);
    }

    /// Drops the override for `severity`.
    pub fn clear_sink(&self, severity: impl Into<Severity>) {
        self.write().clear_sink(severity);
    }

    /// Returns the sink `severity` is currently routed to.
    #[must_use]
    pub fn sink_for(&self, severity: impl Into<Severity>) -> Arc<dyn Sink> {
        self.read().sink_for(severity)
    }

    /// Applies a partial update in one step.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLogLevel`] when the update carries an
    /// invalid level. Nothing from the update is applied in that case.
    pub fn configure(&self, update: ConfigUpdate) -> Result<(), LoggerError> {
        if let Some(value) = update.requested_level() {
            if Level::try_from(value).is_err() {
                let config = self.read();
                trace_level_ignored(value, config.threshold());
                return Err(invalid_level(value));
            }
        }
        self.write().apply(update);
        Ok(())
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        self.read().clone()
    }

    /// Restores the default configuration.
    pub fn reset(&self) {
        self.write().reset();
    }

    fn read(&self) -> RwLockReadGuard<'_, LoggerConfig> {
        self.config
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoggerConfig> {
        self.config
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Restores the default configuration of [`Logger::global`].
pub fn reset_global() {
    Logger::global().reset();
}

fn invalid_level(value: &Arg) -> LoggerError {
    LoggerError::InvalidLogLevel {
        value: value.to_string(),
    }
}
