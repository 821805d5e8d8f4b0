//! crates/logger/src/error.rs
//! Error types surfaced by the logger.

use thiserror::Error;

/// Error raised by a [`Sink`](crate::Sink) or [`Formatter`](crate::Formatter).
pub type PluginError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned from [`Logger`](crate::Logger) operations.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A value that is not a standard level was assigned as the threshold.
    ///
    /// The payload is the rendered form of the rejected value.
    #[error("Invalid log level ({value})")]
    InvalidLogLevel {
        /// The rejected value.
        value: String,
    },
    /// The configured formatter failed.
    #[error("formatter failed: {0}")]
    Format(#[source] PluginError),
    /// The resolved sink failed.
    #[error("sink failed: {0}")]
    Sink(#[source] PluginError),
}

impl LoggerError {
    /// Returns the rejected value of an [`LoggerError::InvalidLogLevel`].
    #[must_use]
    pub fn invalid_value(&self) -> Option<&str> {
        match self {
            Self::InvalidLogLevel { value } => Some(value),
            _ => None,
        }
    }

    /// Reports whether the error originated in a formatter or sink.
    #[must_use]
    pub const fn is_plugin_failure(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Sink(_))
    }
}

/// Error returned when a level label is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level `{label}`")]
pub struct ParseLevelError {
    label: String,
}

impl ParseLevelError {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
        }
    }

    /// Returns the label that failed to parse, as supplied.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
