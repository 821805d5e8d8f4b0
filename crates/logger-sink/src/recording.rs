//! crates/logger-sink/src/recording.rs
//! Test doubles that count and capture what the logger hands them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logger::{Formatter, LogMessage, PluginError, Sink};

#[derive(Debug)]
struct Recorded<T> {
    calls: AtomicUsize,
    items: Mutex<Vec<T>>,
    failure: Mutex<Option<String>>,
}

impl<T> Default for Recorded<T> {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            items: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }
}

impl<T: Clone> Recorded<T> {
    fn record(&self, item: T) -> Result<(), PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = lock(&self.failure).clone() {
            return Err(reason.into());
        }
        lock(&self.items).push(item);
        Ok(())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn items(&self) -> Vec<T> {
        lock(&self.items).clone()
    }

    fn fail_with(&self, reason: Option<String>) {
        *lock(&self.failure) = reason;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sink that records every output it receives.
///
/// Clones share state. Calls are counted even when a failure is injected;
/// only successful writes are recorded.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    state: Arc<Recorded<String>>,
}

impl RecordingSink {
    /// Creates a sink that accepts every write.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink whose writes fail with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        let sink = Self::new();
        sink.fail_with(reason);
        sink
    }

    /// Makes subsequent writes fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.state.fail_with(Some(reason.into()));
    }

    /// Lets subsequent writes succeed again.
    pub fn succeed(&self) {
        self.state.fail_with(None);
    }

    /// Number of times [`Sink::write`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.calls()
    }

    /// Outputs written successfully, in order.
    #[must_use]
    pub fn outputs(&self) -> Vec<String> {
        self.state.items()
    }
}

impl Sink for RecordingSink {
    fn write(&self, output: &str) -> Result<(), PluginError> {
        self.state.record(output.to_owned())
    }
}

/// Formatter that records every message and renders its text.
///
/// Clones share state. A failure can be injected the same way as for
/// [`RecordingSink`].
#[derive(Clone, Debug, Default)]
pub struct RecordingFormatter {
    state: Arc<Recorded<LogMessage>>,
}

impl RecordingFormatter {
    /// Creates a formatter that renders each message as its text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter that fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        let formatter = Self::new();
        formatter.fail_with(reason);
        formatter
    }

    /// Makes subsequent calls fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.state.fail_with(Some(reason.into()));
    }

    /// Lets subsequent calls succeed again.
    pub fn succeed(&self) {
        self.state.fail_with(None);
    }

    /// Number of times [`Formatter::format`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.calls()
    }

    /// Messages formatted successfully, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<LogMessage> {
        self.state.items()
    }
}

impl Formatter for RecordingFormatter {
    fn format(&self, message: &LogMessage) -> Result<String, PluginError> {
        self.state.record(message.clone())?;
        Ok(message.text().to_owned())
    }
}
