//! Line sources: the capability that turns an open stream into log entries.
//!
//! This module provides:
//! - `LogEntry`: One record read from a log stream
//! - `LineSource`: Trait yielding entries one at a time in stream order
//! - `LineSourceBuilder`: Trait building a `LineSource` from a freshly opened stream
//! - `TextLineSource`: Line-framed implementation for ELF files

use std::fmt::Debug;
use std::io::{self, Read};

use serde::{Deserialize, Serialize};

mod lines;

pub use lines::{TextLineSource, TextLineSourceBuilder};

/// One record read from a log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based physical line number within the stream
    pub line_number: u64,
    /// The raw record text, without its line terminator
    pub text: String,
}

impl LogEntry {
    pub fn new(line_number: u64, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

/// A lazy, finite sequence of log entries read from one open stream.
pub trait LineSource: Send + Debug {
    /// Read the next entry.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. Implementations must
    /// keep returning `Ok(None)` on later calls unless new data has appeared.
    /// An entry is only returned once it is complete; re-reading the same
    /// stream must yield the same entries in the same order.
    fn next(&mut self) -> io::Result<Option<LogEntry>>;

    /// Release the underlying stream.
    fn close(&mut self) -> io::Result<()>;
}

/// Builds a `LineSource` over a stream positioned at its beginning.
pub trait LineSourceBuilder: Send + Sync + Debug {
    fn build(&self, reader: Box<dyn Read + Send>) -> io::Result<Box<dyn LineSource>>;
}
