//! crates/logger/src/diagnostics.rs
//! The logger's own diagnostics, routed through `tracing` when the feature is
//! enabled and compiled away otherwise.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::levels::{Level, Severity};
use crate::value::Arg;

/// Trace an invalid threshold that the configuration ignored.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_level_ignored(value: &Arg, kept: Option<Level>) {
    debug!(
        target: "logger::config",
        operation = "set_level",
        rejected = %value,
        kept = kept.map_or("DEFAULT", Level::label),
        "ignored invalid log level ({})",
        value
    );
}

/// Trace an invalid threshold - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_level_ignored(_value: &Arg, _kept: Option<Level>) {}

/// Trace a threshold change.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_level_changed(level: Level) {
    debug!(
        target: "logger::config",
        operation = "set_level",
        level = level.label(),
        "log level set to {}",
        level
    );
}

/// Trace a threshold change - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_level_changed(_level: Level) {}

/// Trace a configuration reset.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_reset() {
    debug!(target: "logger::config", operation = "reset", "configuration reset to defaults");
}

/// Trace a configuration reset - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_reset() {}

/// Trace a formatter or sink failure on its way back to the caller.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_plugin_failure(severity: Severity, stage: &str, error: &dyn std::fmt::Display) {
    debug!(
        target: "logger::dispatch",
        severity = severity.name(),
        stage = stage,
        "{} failed: {}",
        stage,
        error
    );
}

/// Trace a formatter or sink failure - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_plugin_failure(_severity: Severity, _stage: &str, _error: &dyn std::fmt::Display) {}
