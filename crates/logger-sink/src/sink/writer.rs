//! crates/logger-sink/src/sink/writer.rs

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use logger::{PluginError, Sink};

use crate::line_mode::LineMode;

/// Sink that streams formatted messages into an [`std::io::Write`] target.
///
/// The writer sits behind a mutex so a single sink can be shared by every
/// severity and every thread. Each message is written with one `write_all`
/// call followed by the newline selected by the [`LineMode`], then flushed.
///
/// # Examples
///
/// ```
/// use logger::Sink;
/// use logger_sink::{LineMode, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write("first")?;
/// sink.write("second")?;
/// assert_eq!(sink.into_inner(), b"first\nsecond\n");
///
/// let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.write("ready")?;
/// assert_eq!(sink.into_inner(), b"ready");
/// # Ok::<(), logger::PluginError>(())
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates every message with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink using the supplied [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the sink's [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write(&self, output: &str) -> Result<(), PluginError> {
        let mut writer = self.lock();
        writer.write_all(output.as_bytes())?;
        if self.line_mode.append_newline() {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &*self.lock())
            .field("line_mode", &self.line_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn newline_mode_terminates_each_message() {
        let sink = WriterSink::new(Vec::new());
        sink.write("a").unwrap();
        sink.write("").unwrap();
        assert_eq!(sink.into_inner(), b"a\n\n");
    }

    #[test]
    fn raw_mode_concatenates() {
        let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
        assert_eq!(sink.line_mode(), LineMode::WithoutNewline);
        sink.write("a").unwrap();
        sink.write("b").unwrap();
        assert_eq!(sink.into_inner(), b"ab");
    }

    #[test]
    fn io_errors_surface_as_plugin_errors() {
        let sink = WriterSink::new(BrokenPipe);
        let err = sink.write("lost").unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn writer_is_reachable_while_shared() {
        let sink = WriterSink::new(Vec::new());
        sink.write("x").unwrap();
        let len = sink.with_writer(|buffer| {
            buffer.clear();
            buffer.len()
        });
        assert_eq!(len, 0);
        assert!(format!("{sink:?}").contains("WithNewline"));
    }
}
