//! crates/logger/src/config.rs
//! Mutable logger configuration: threshold, verbose flag, formatter and the
//! per-severity sink routing table.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{trace_level_changed, trace_level_ignored, trace_reset};
use crate::levels::{Level, PseudoLevel, Severity};
use crate::plugin::{Formatter, NoopFormatter, NoopSink, Sink};
use crate::value::Arg;

/// Configuration consulted by every log call.
///
/// Mutations are validated: an invalid threshold is ignored and the previous
/// value kept. Sink lookup always resolves, falling back to the default sink
/// for severities without an override.
#[derive(Clone)]
pub struct LoggerConfig {
    level: Option<Level>,
    verbose: bool,
    formatter: Arc<dyn Formatter>,
    default_sink: Arc<dyn Sink>,
    sinks: [Option<Arc<dyn Sink>>; Severity::SLOTS],
}

impl LoggerConfig {
    /// Creates the initial configuration: no-op formatter and sink, the
    /// `DEFAULT` threshold, verbose output off and no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: None,
            verbose: false,
            formatter: Arc::new(NoopFormatter),
            default_sink: Arc::new(NoopSink),
            sinks: Default::default(),
        }
    }

    /// Returns the configured threshold.
    ///
    /// Until a standard level is assigned this is the `DEFAULT` pseudo-level.
    #[must_use]
    pub const fn level(&self) -> Severity {
        match self.level {
            Some(level) => Severity::Standard(level),
            None => Severity::Pseudo(PseudoLevel::Default),
        }
    }

    /// Returns the assigned standard threshold, if any.
    pub(crate) const fn threshold(&self) -> Option<Level> {
        self.level
    }

    /// Returns the threshold the gate actually applies.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        self.level.unwrap_or(Level::DEFAULT)
    }

    /// Assigns the threshold if `value` is a standard level.
    ///
    /// Anything else (pseudo-level codes, out-of-range or fractional numbers,
    /// `NaN`, strings, structured values) leaves the threshold unchanged.
    /// Returns whether the assignment took effect.
    pub fn set_level(&mut self, value: impl Into<Arg>) -> bool {
        let value = value.into();
        match Level::try_from(&value) {
            Ok(level) => {
                self.level = Some(level);
                trace_level_changed(level);
                true
            }
            Err(()) => {
                trace_level_ignored(&value, self.level);
                false
            }
        }
    }

    /// Reports whether verbose output is enabled.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Enables or disables verbose output.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Returns the active formatter.
    #[must_use]
    pub fn formatter(&self) -> &Arc<dyn Formatter> {
        &self.formatter
    }

    /// Replaces the formatter.
    pub fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.formatter = formatter;
    }

    /// Returns the fallback sink.
    #[must_use]
    pub fn default_sink(&self) -> &Arc<dyn Sink> {
        &self.default_sink
    }

    /// Replaces the fallback sink.
    pub fn set_default_sink(&mut self, sink: Arc<dyn Sink>) {
        self.default_sink = sink;
    }

    /// Routes `severity` to `sink`, or back to the default sink when `None`.
    ///
    /// `DEFAULT` shares the routing slot of the level it resolves to.
    pub fn set_sink(&mut self, severity: impl Into<Severity>, sink: Option<Arc<dyn Sink>>) {
        self.sinks[severity.into().slot()] = sink;
    }

    /// Routes `severity` to `sink`.
    pub fn register_sink(&mut self, severity: impl Into<Severity>, sink: Arc<dyn Sink>) {
        self.set_sink(severity, Some(sink));
    }

    /// Drops the override for `severity`.
    pub fn clear_sink(&mut self, severity: impl Into<Severity>) {
        self.set_sink(severity, None);
    }

    /// Reports whether `severity` has its own sink.
    #[must_use]
    pub fn has_sink_override(&self, severity: impl Into<Severity>) -> bool {
        self.sinks[severity.into().slot()].is_some()
    }

    /// Returns the sink `severity` is routed to.
    #[must_use]
    pub fn sink_for(&self, severity: impl Into<Severity>) -> Arc<dyn Sink> {
        self.sinks[severity.into().slot()]
            .as_ref()
            .map_or_else(|| Arc::clone(&self.default_sink), Arc::clone)
    }

    /// Applies the gate to a call at `severity`.
    ///
    /// Standard levels pass when the threshold is not OFF and the call is at
    /// least as severe as the threshold. `LOG` always passes; `VERBOSE` passes
    /// exactly when verbose output is enabled; `DEFAULT` is gated as a call at
    /// [`Level::DEFAULT`].
    #[must_use]
    pub fn is_enabled(&self, severity: impl Into<Severity>) -> bool {
        match severity.into() {
            Severity::Standard(level) => self.effective_level().permits(level),
            Severity::Pseudo(PseudoLevel::Log) => true,
            Severity::Pseudo(PseudoLevel::Verbose) => self.verbose,
            Severity::Pseudo(PseudoLevel::Default) => self.effective_level().permits(Level::DEFAULT),
        }
    }

    /// Merges a partial update. Fields absent from `update` are untouched and
    /// an invalid level is ignored like [`set_level`](Self::set_level).
    pub fn apply(&mut self, update: ConfigUpdate) {
        let ConfigUpdate {
            level,
            verbose,
            formatter,
            default_sink,
            sinks,
        } = update;

        if let Some(level) = level {
            self.set_level(level);
        }
        if let Some(verbose) = verbose {
            self.verbose = verbose;
        }
        if let Some(formatter) = formatter {
            self.formatter = formatter;
        }
        if let Some(sink) = default_sink {
            self.default_sink = sink;
        }
        for (severity, sink) in sinks {
            self.set_sink(severity, sink);
        }
    }

    /// Restores the initial configuration, dropping every override.
    pub fn reset(&mut self) {
        *self = Self::new();
        trace_reset();
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<usize> = self
            .sinks
            .iter()
            .enumerate()
            .filter_map(|(slot, sink)| sink.as_ref().map(|_| slot))
            .collect();
        f.debug_struct("LoggerConfig")
            .field("level", &self.level())
            .field("verbose", &self.verbose)
            .field("sink_overrides", &overrides)
            .finish_non_exhaustive()
    }
}

/// A partial configuration change.
///
/// Only the fields that were set are applied; everything else keeps its
/// current value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logger::{ConfigUpdate, Level, LoggerConfig, NoopSink, Severity};
///
/// let mut config = LoggerConfig::new();
/// config.apply(
///     ConfigUpdate::new()
///         .level(Level::Debug)
///         .sink(Severity::ERROR, Arc::new(NoopSink)),
/// );
///
/// assert_eq!(config.effective_level(), Level::Debug);
/// assert!(config.has_sink_override(Severity::ERROR));
/// assert!(!config.verbose());
/// ```
#[derive(Clone, Default)]
pub struct ConfigUpdate {
    level: Option<Arg>,
    verbose: Option<bool>,
    formatter: Option<Arc<dyn Formatter>>,
    default_sink: Option<Arc<dyn Sink>>,
    sinks: Vec<(Severity, Option<Arc<dyn Sink>>)>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold. Validated when applied.
    pub fn level(mut self, level: impl Into<Arg>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the verbose flag.
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Replaces the formatter.
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replaces the fallback sink.
    pub fn default_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.default_sink = Some(sink);
        self
    }

    /// Routes `severity` to `sink`.
    pub fn sink(mut self, severity: impl Into<Severity>, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push((severity.into(), Some(sink)));
        self
    }

    /// Drops the override for `severity`.
    pub fn clear_sink(mut self, severity: impl Into<Severity>) -> Self {
        self.sinks.push((severity.into(), None));
        self
    }

    /// Returns the requested threshold, if any.
    #[must_use]
    pub const fn requested_level(&self) -> Option<&Arg> {
        self.level.as_ref()
    }

    /// Reports whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.verbose.is_none()
            && self.formatter.is_none()
            && self.default_sink.is_none()
            && self.sinks.is_empty()
    }
}

impl fmt::Debug for ConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sinks: Vec<(Severity, bool)> = self
            .sinks
            .iter()
            .map(|(severity, sink)| (*severity, sink.is_some()))
            .collect();
        f.debug_struct("ConfigUpdate")
            .field("level", &self.level)
            .field("verbose", &self.verbose)
            .field("formatter", &self.formatter.is_some())
            .field("default_sink", &self.default_sink.is_some())
            .field("sinks", &sinks)
            .finish()
    }
}
