//! Opening a stream and positioning it after the last committed record.

use std::fmt;
use std::io;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::error::{Stage, StreamError, TaskError};
use crate::io::InputProvider;
use crate::offset::{NO_OFFSET, Offset, OffsetTracker};
use crate::source::LineSourceBuilder;

/// Lifecycle of the stream owned by a `Resumer`.
///
/// `Unconfigured -> Configuring -> Ready -> [Draining -> Ready]* -> Closed`.
/// A failed drain goes back to `Ready`; a failed configure goes back to
/// `Unconfigured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Unconfigured,
    /// Skipping records up to the resume offset
    Configuring,
    Ready,
    Draining,
    Closed,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Unconfigured => write!(f, "unconfigured"),
            StreamState::Configuring => write!(f, "configuring"),
            StreamState::Ready => write!(f, "ready"),
            StreamState::Draining => write!(f, "draining"),
            StreamState::Closed => write!(f, "closed"),
        }
    }
}

/// Outcome of positioning a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resumed {
    /// Records read and discarded
    pub skipped: u64,
    /// Offset after skipping
    pub offset: Offset,
    /// The source ran out before reaching the requested offset
    pub exhausted: bool,
}

impl Resumed {
    fn fresh() -> Self {
        Self {
            skipped: 0,
            offset: NO_OFFSET,
            exhausted: false,
        }
    }
}

/// Owns the single open stream and (re)positions it on `configure`.
#[derive(Debug)]
pub struct Resumer {
    builder: Arc<dyn LineSourceBuilder>,
    tracker: Option<OffsetTracker>,
    source_id: String,
    state: StreamState,
}

impl Resumer {
    pub fn new(builder: Arc<dyn LineSourceBuilder>) -> Self {
        Self {
            builder,
            tracker: None,
            source_id: String::new(),
            state: StreamState::Unconfigured,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Identifier of the input the current stream was opened from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Offset of the last record read from the open stream.
    pub fn current_offset(&self) -> Option<Offset> {
        self.tracker.as_ref().map(OffsetTracker::current_offset)
    }

    /// Open `input` from its beginning and skip past `last_offset`.
    ///
    /// Any previously open stream is closed first. With `Some(n)`, exactly
    /// `n + 1` records are discarded, or fewer if the source runs out, which
    /// is reported through `Resumed::exhausted` rather than as an error.
    pub fn configure(
        &mut self,
        input: &dyn InputProvider,
        last_offset: Option<Offset>,
    ) -> Result<Resumed, TaskError> {
        if self.tracker.is_some() {
            trace!(source = %self.source_id, "configure() - closing existing stream");
            self.release();
        }

        self.state = StreamState::Configuring;
        self.source_id = input.id().to_string();

        let mut tracker = match self.open(input) {
            Ok(tracker) => tracker,
            Err(e) => {
                self.state = StreamState::Unconfigured;
                return Err(TaskError::Configure(e));
            }
        };

        let resumed = match last_offset {
            None => Resumed::fresh(),
            Some(last) => {
                if last < NO_OFFSET {
                    warn!(
                        source = %self.source_id,
                        last_offset = last,
                        "configure() - negative offset, starting from the beginning"
                    );
                }
                match skip_past(&mut tracker, last) {
                    Ok(resumed) => resumed,
                    Err(e) => {
                        let err = StreamError::new(
                            Stage::Skip,
                            self.source_id.clone(),
                            tracker.current_offset(),
                            e,
                        );
                        if let Err(close_err) = tracker.close() {
                            warn!(source = %self.source_id, error = %close_err, "configure() - failed to close stream");
                        }
                        self.state = StreamState::Unconfigured;
                        return Err(TaskError::Configure(err));
                    }
                }
            }
        };

        if let Some(last) = last_offset {
            trace!(source = %self.source_id, skipped = resumed.skipped, "configure() - skipped record(s)");
            if resumed.exhausted {
                info!(
                    source = %self.source_id,
                    last_offset = last,
                    skipped = resumed.skipped,
                    "configure() - source ended before the committed offset, treating it as fully consumed"
                );
            }
            info!(source = %self.source_id, offset = resumed.offset, "configure() - starting on offset");
        }

        self.tracker = Some(tracker);
        self.state = StreamState::Ready;
        Ok(resumed)
    }

    /// Close the open stream, if any.
    pub fn close(&mut self) {
        self.release();
        if self.state != StreamState::Unconfigured {
            self.state = StreamState::Closed;
        }
    }

    pub(crate) fn begin_drain(&mut self) -> Result<&mut OffsetTracker, TaskError> {
        let actual = self.state;
        match self.tracker.as_mut() {
            Some(tracker) if actual == StreamState::Ready => {
                self.state = StreamState::Draining;
                Ok(tracker)
            }
            _ => Err(TaskError::InvalidState {
                expected: StreamState::Ready,
                actual,
            }),
        }
    }

    pub(crate) fn end_drain(&mut self) {
        if self.state == StreamState::Draining {
            self.state = StreamState::Ready;
        }
    }

    fn open(&self, input: &dyn InputProvider) -> Result<OffsetTracker, StreamError> {
        let reader = input
            .open()
            .map_err(|e| StreamError::new(Stage::Open, input.id(), NO_OFFSET, e))?;
        let source = self
            .builder
            .build(reader)
            .map_err(|e| StreamError::new(Stage::Open, input.id(), NO_OFFSET, e))?;
        debug!(source = %input.id(), "opened stream");
        Ok(OffsetTracker::new(source))
    }

    fn release(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            if let Err(e) = tracker.close() {
                warn!(source = %self.source_id, error = %e, "failed to close stream, dropping handle");
            }
        }
    }
}

/// Discard records until the one at `last_offset` has been read.
fn skip_past(tracker: &mut OffsetTracker, last_offset: Offset) -> io::Result<Resumed> {
    let target = last_offset.saturating_add(1).max(0) as u64;
    let mut skipped = 0;
    while skipped < target {
        if tracker.next()?.is_none() {
            return Ok(Resumed {
                skipped,
                offset: tracker.current_offset(),
                exhausted: true,
            });
        }
        skipped += 1;
    }
    Ok(Resumed {
        skipped,
        offset: tracker.current_offset(),
        exhausted: false,
    })
}
