//! crates/logger-sink/src/sink/buffer.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logger::{PluginError, Sink};

/// In-memory sink keeping each formatted message as a separate entry.
///
/// Clones share the same buffer, so one handle can be installed in a logger
/// while another inspects what was written.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logger::{Logger, args};
/// use logger_sink::{BufferSink, PlainFormatter};
///
/// let buffer = BufferSink::new();
/// let logger = Logger::new();
/// logger.set_formatter(Arc::new(PlainFormatter::without_timestamp()));
/// logger.set_default_sink(Arc::new(buffer.clone()));
///
/// logger.warn(args!["low", "disk"]).unwrap();
/// assert_eq!(buffer.drain(), ["[WARN] low disk"]);
/// assert!(buffer.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every buffered message in write order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns every buffered message.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Discards every buffered message.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the number of buffered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the buffered messages joined by newlines.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lock().join("\n")
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for BufferSink {
    fn write(&self, output: &str) -> Result<(), PluginError> {
        self.lock().push(output.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let sink = BufferSink::new();
        let handle = sink.clone();
        sink.write("one").unwrap();
        sink.write("two").unwrap();
        assert_eq!(handle.len(), 2);
        assert_eq!(handle.lines(), ["one", "two"]);
        assert_eq!(handle.contents(), "one\ntwo");
    }

    #[test]
    fn drain_and_clear_empty_the_buffer() {
        let sink = BufferSink::new();
        sink.write("a").unwrap();
        assert_eq!(sink.drain(), ["a"]);
        assert!(sink.is_empty());

        sink.write("b").unwrap();
        sink.clear();
        assert_eq!(sink.len(), 0);
        assert!(sink.drain().is_empty());
    }
}
