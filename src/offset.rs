//! Record offset accounting for one open stream.

use std::io;

use tracing::trace;

use crate::source::{LineSource, LogEntry};

/// Zero-based record offset. `-1` means no record has been read yet.
pub type Offset = i64;

/// Offset of a stream before its first record.
pub const NO_OFFSET: Offset = -1;

/// Counts records read from a `LineSource`.
///
/// After N successful reads the offset is N-1. End of stream does not move
/// the offset.
#[derive(Debug)]
pub struct OffsetTracker {
    source: Box<dyn LineSource>,
    offset: Offset,
}

impl OffsetTracker {
    pub fn new(source: Box<dyn LineSource>) -> Self {
        Self {
            source,
            offset: NO_OFFSET,
        }
    }

    /// Read the next entry, advancing the offset if there was one.
    pub fn next(&mut self) -> io::Result<Option<LogEntry>> {
        let entry = self.source.next()?;
        if entry.is_some() {
            self.offset += 1;
        }
        Ok(entry)
    }

    /// Offset of the last entry read, or `NO_OFFSET`.
    pub fn current_offset(&self) -> Offset {
        self.offset
    }

    pub fn close(&mut self) -> io::Result<()> {
        trace!(offset = self.offset, "closing line source");
        self.source.close()
    }
}
