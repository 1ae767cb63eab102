//! Host-facing source task composed from a `Resumer` and a `BatchEmitter`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::emitter::BatchEmitter;
use crate::error::TaskError;
use crate::io::InputProvider;
use crate::offset::Offset;
use crate::record::SourceRecord;
use crate::resume::{Resumed, Resumer, StreamState};
use crate::source::LineSourceBuilder;
use crate::store::OffsetStore;

/// Source task reading ELF log entries from one input at a time.
///
/// The host calls `start`, then `poll` repeatedly, and `commit` once the
/// records of a poll have been delivered. A restarted task given the same
/// offset store continues after the last committed record.
#[derive(Debug)]
pub struct ElfSourceTask {
    input: Arc<dyn InputProvider>,
    store: Arc<dyn OffsetStore>,
    resumer: Resumer,
    emitter: BatchEmitter,
}

impl ElfSourceTask {
    /// Create a new task.
    pub fn new(
        input: Arc<dyn InputProvider>,
        line_source: Arc<dyn LineSourceBuilder>,
        store: Arc<dyn OffsetStore>,
        emitter: BatchEmitter,
    ) -> Self {
        Self {
            input,
            store,
            resumer: Resumer::new(line_source),
            emitter,
        }
    }

    /// Open the input and skip past its last committed offset.
    pub fn start(&mut self) -> Result<Resumed, TaskError> {
        let last_offset = self.store.load(self.input.id())?;
        info!(
            source = %self.input.id(),
            last_offset = ?last_offset,
            batch_size = self.emitter.batch_size(),
            "starting task"
        );
        self.resumer.configure(self.input.as_ref(), last_offset)
    }

    /// Drain the next batch. Empty means no new data right now.
    ///
    /// After a `TaskError::Drain` the records read before the failure are
    /// gone from the open stream. Call `start` again before polling so the
    /// stream is reopened from the last committed offset.
    pub fn poll(&mut self) -> Result<Vec<SourceRecord>, TaskError> {
        self.emitter.drain(&mut self.resumer)
    }

    /// Persist the position of the last delivered record.
    pub fn commit(&self, records: &[SourceRecord]) -> Result<(), TaskError> {
        let Some(last) = records.last() else {
            return Ok(());
        };
        self.store.commit(&last.source, last.offset)?;
        Ok(())
    }

    /// Switch to a new input, e.g. after a log rotation.
    ///
    /// The current stream is closed before the new one is opened.
    pub fn rotate(&mut self, input: Arc<dyn InputProvider>) -> Result<Resumed, TaskError> {
        debug!(from = %self.input.id(), to = %input.id(), "rotating input");
        self.input = input;
        self.start()
    }

    /// Close the stream.
    pub fn stop(&mut self) {
        info!(source = %self.input.id(), offset = ?self.resumer.current_offset(), "stopping task");
        self.resumer.close();
    }

    pub fn state(&self) -> StreamState {
        self.resumer.state()
    }

    /// Offset of the last record read, `None` before `start`.
    pub fn current_offset(&self) -> Option<Offset> {
        self.resumer.current_offset()
    }

    pub fn source_id(&self) -> &str {
        self.input.id()
    }

    pub fn batch_size(&self) -> usize {
        self.emitter.batch_size()
    }
}
