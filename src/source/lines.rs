//! Line-framed log source.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use tracing::{debug, trace};

use super::{LineSource, LineSourceBuilder, LogEntry};

/// Prefix of ELF directive lines (`#Version`, `#Fields`, `#Date`, ...).
const DIRECTIVE_PREFIX: char = '#';

/// Yields one entry per non-blank line of a stream.
///
/// Lines may end in LF or CRLF. Directive lines are not records and are
/// skipped unless disabled on the builder. Field values are left
/// uninterpreted.
///
/// Bytes after the last newline are held back until their newline arrives, so
/// a line still being written is never split into two records. Inputs known to
/// be complete can opt into delivering that tail with
/// `emit_unterminated_line`.
pub struct TextLineSource {
    reader: Option<BufReader<Box<dyn Read + Send>>>,
    skip_directives: bool,
    emit_unterminated: bool,
    line_number: u64,
    buf: Vec<u8>,
}

impl TextLineSource {
    pub fn new(reader: Box<dyn Read + Send>, skip_directives: bool) -> Self {
        Self {
            reader: Some(BufReader::new(reader)),
            skip_directives,
            emit_unterminated: false,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Deliver a final line that has no terminator.
    pub fn emit_unterminated_line(mut self) -> Self {
        self.emit_unterminated = true;
        self
    }

    /// Number of complete lines consumed so far, including skipped ones.
    pub fn lines_read(&self) -> u64 {
        self.line_number
    }

    /// Bytes read past the last newline and not yet returned.
    pub fn pending_bytes(&self) -> usize {
        self.buf.len()
    }

    fn is_record(&self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        !(self.skip_directives && line.starts_with(DIRECTIVE_PREFIX))
    }
}

impl fmt::Debug for TextLineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLineSource")
            .field("open", &self.reader.is_some())
            .field("skip_directives", &self.skip_directives)
            .field("emit_unterminated", &self.emit_unterminated)
            .field("line_number", &self.line_number)
            .field("pending", &self.buf.len())
            .finish()
    }
}

impl LineSource for TextLineSource {
    fn next(&mut self) -> io::Result<Option<LogEntry>> {
        loop {
            let Some(reader) = self.reader.as_mut() else {
                return Ok(None);
            };

            // A partial line from an earlier call stays in `buf` and is extended here
            reader.read_until(b'\n', &mut self.buf)?;
            if self.buf.is_empty() {
                return Ok(None);
            }

            let terminated = self.buf.last() == Some(&b'\n');
            if !terminated && !self.emit_unterminated {
                trace!(pending = self.buf.len(), "holding unterminated line");
                return Ok(None);
            }

            let mut bytes = std::mem::take(&mut self.buf);
            self.line_number += 1;
            if terminated {
                bytes.pop();
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
            }

            let line = String::from_utf8(bytes).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {} is not valid UTF-8: {}", self.line_number, e),
                )
            })?;

            if self.is_record(&line) {
                return Ok(Some(LogEntry::new(self.line_number, line)));
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            debug!(pending = self.buf.len(), "dropping unterminated line on close");
        }
        self.reader = None;
        self.buf.clear();
        Ok(())
    }
}

/// Builder for `TextLineSource`.
#[derive(Debug, Clone, Copy)]
pub struct TextLineSourceBuilder {
    skip_directives: bool,
    emit_unterminated: bool,
}

impl TextLineSourceBuilder {
    pub fn new() -> Self {
        Self {
            skip_directives: true,
            emit_unterminated: false,
        }
    }

    /// Treat `#` lines as records instead of skipping them.
    pub fn keep_directives(mut self) -> Self {
        self.skip_directives = false;
        self
    }

    /// Deliver a final unterminated line instead of waiting for its newline.
    ///
    /// Only for inputs that never grow, such as archived logs.
    pub fn emit_unterminated_line(mut self) -> Self {
        self.emit_unterminated = true;
        self
    }
}

impl Default for TextLineSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSourceBuilder for TextLineSourceBuilder {
    fn build(&self, reader: Box<dyn Read + Send>) -> io::Result<Box<dyn LineSource>> {
        let mut source = TextLineSource::new(reader, self.skip_directives);
        if self.emit_unterminated {
            source = source.emit_unterminated_line();
        }
        Ok(Box::new(source))
    }
}
