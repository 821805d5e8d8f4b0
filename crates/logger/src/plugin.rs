//! crates/logger/src/plugin.rs
//! Formatter and sink contracts plus the built-in no-op implementations.

use std::fmt;

use crate::error::PluginError;
use crate::message::LogMessage;

/// Receives formatted output and performs the actual write.
///
/// Fallible closures taking `&str` implement the trait directly; use
/// [`sink_fn`] to adapt an infallible closure.
pub trait Sink: Send + Sync {
    /// Writes one formatted message.
    fn write(&self, output: &str) -> Result<(), PluginError>;
}

impl<F> Sink for F
where
    F: Fn(&str) -> Result<(), PluginError> + Send + Sync,
{
    fn write(&self, output: &str) -> Result<(), PluginError> {
        self(output)
    }
}

/// Turns a [`LogMessage`] into the string handed to a sink.
///
/// Implementations must not rely on mutating shared state to produce output;
/// the same message formats to the same string.
pub trait Formatter: Send + Sync {
    /// Renders `message`.
    fn format(&self, message: &LogMessage) -> Result<String, PluginError>;
}

impl<F> Formatter for F
where
    F: Fn(&LogMessage) -> Result<String, PluginError> + Send + Sync,
{
    fn format(&self, message: &LogMessage) -> Result<String, PluginError> {
        self(message)
    }
}

/// Sink that discards everything. Installed by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn write(&self, _output: &str) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Formatter that renders every message as the empty string. Installed by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _message: &LogMessage) -> Result<String, PluginError> {
        Ok(String::new())
    }
}

/// Adapter returned by [`sink_fn`].
#[derive(Clone)]
pub struct FnSink<F>(F);

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink")
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn write(&self, output: &str) -> Result<(), PluginError> {
        (self.0)(output);
        Ok(())
    }
}

/// Wraps an infallible closure as a [`Sink`].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logger::{Sink, sink_fn};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&seen);
/// let sink = sink_fn(move |line| captured.lock().unwrap().push(line.to_owned()));
///
/// sink.write("hello").unwrap();
/// assert_eq!(*seen.lock().unwrap(), ["hello"]);
/// ```
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    FnSink(f)
}

/// Adapter returned by [`formatter_fn`].
#[derive(Clone)]
pub struct FnFormatter<F>(F);

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormatter")
    }
}

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&LogMessage) -> String + Send + Sync,
{
    fn format(&self, message: &LogMessage) -> Result<String, PluginError> {
        Ok((self.0)(message))
    }
}

/// Wraps an infallible closure as a [`Formatter`].
pub fn formatter_fn<F>(f: F) -> FnFormatter<F>
where
    F: Fn(&LogMessage) -> String + Send + Sync,
{
    FnFormatter(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Severity;
    use crate::message::parse_at;
    use crate::value::Arg;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    fn message(text: &str) -> LogMessage {
        parse_at(Severity::INFO, &[Arg::from(text)], OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn noop_plugins_succeed_silently() {
        assert!(NoopSink.write("anything").is_ok());
        assert_eq!(NoopFormatter.format(&message("x")).unwrap(), "");
    }

    #[test]
    fn fallible_closures_are_plugins() {
        let sink = |output: &str| -> Result<(), PluginError> {
            if output.is_empty() {
                Err("empty output".into())
            } else {
                Ok(())
            }
        };
        assert!(sink.write("x").is_ok());
        assert_eq!(sink.write("").unwrap_err().to_string(), "empty output");

        let formatter =
            |message: &LogMessage| -> Result<String, PluginError> { Ok(message.text().to_uppercase()) };
        assert_eq!(formatter.format(&message("shout")).unwrap(), "SHOUT");
    }

    #[test]
    fn infallible_adapters_wrap_closures() {
        let seen = Mutex::new(Vec::new());
        let sink = sink_fn(|output: &str| seen.lock().unwrap().push(output.to_owned()));
        sink.write("one").unwrap();
        sink.write("two").unwrap();
        assert_eq!(*seen.lock().unwrap(), ["one", "two"]);

        let formatter = formatter_fn(|message: &LogMessage| format!("<{}>", message.text()));
        assert_eq!(formatter.format(&message("m")).unwrap(), "<m>");
    }

    #[test]
    fn plugins_are_object_safe() {
        let sinks: Vec<Box<dyn Sink>> = vec![
            Box::new(NoopSink) as Box<dyn Sink>,
            Box::new(sink_fn(|_: &str| {})),
        ];
        for sink in &sinks {
            assert!(sink.write("x").is_ok());
        }
        let formatter: Box<dyn Formatter> = Box::new(NoopFormatter);
        assert!(formatter.format(&message("x")).is_ok());
    }
}
