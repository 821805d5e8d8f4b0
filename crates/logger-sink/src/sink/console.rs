//! crates/logger-sink/src/sink/console.rs

use std::io::{self, Write};

use logger::{PluginError, Sink};

use crate::line_mode::LineMode;

/// Standard stream a [`ConsoleSink`] writes to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConsoleStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    #[default]
    Stderr,
}

/// Sink writing to the process's standard output or standard error.
///
/// The stream is locked for the duration of each message so lines from
/// concurrent callers do not interleave.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConsoleSink {
    stream: ConsoleStream,
    line_mode: LineMode,
}

impl ConsoleSink {
    /// Creates a sink for `stream`, one message per line.
    #[must_use]
    pub const fn new(stream: ConsoleStream) -> Self {
        Self {
            stream,
            line_mode: LineMode::WithNewline,
        }
    }

    /// Shorthand for a standard output sink.
    #[must_use]
    pub const fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    /// Shorthand for a standard error sink.
    #[must_use]
    pub const fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Returns a copy of the sink using `line_mode`.
    #[must_use]
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Returns the selected stream.
    #[must_use]
    pub const fn stream(&self) -> ConsoleStream {
        self.stream
    }

    /// Returns the sink's [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    fn emit(&self, mut writer: impl Write, output: &str) -> io::Result<()> {
        writer.write_all(output.as_bytes())?;
        if self.line_mode.append_newline() {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, output: &str) -> Result<(), PluginError> {
        match self.stream {
            ConsoleStream::Stdout => self.emit(io::stdout().lock(), output)?,
            ConsoleStream::Stderr => self.emit(io::stderr().lock(), output)?,
        }
        Ok(())
    }
}
