//! crates/logger-sink/src/sink/mod.rs
//! Sink implementations.

mod buffer;
mod console;
mod writer;

pub use buffer::BufferSink;
pub use console::{ConsoleSink, ConsoleStream};
pub use writer::WriterSink;
