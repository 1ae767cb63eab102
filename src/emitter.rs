//! Draining bounded batches of records from a positioned stream.

use tracing::{debug, trace};

use crate::error::{Stage, StreamError, TaskError};
use crate::offset::OffsetTracker;
use crate::record::SourceRecord;
use crate::resume::Resumer;

/// Default maximum number of records returned by one drain.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Pulls records from a `Resumer`'s stream in batches of at most `batch_size`.
#[derive(Debug, Clone, Copy)]
pub struct BatchEmitter {
    batch_size: usize,
}

impl BatchEmitter {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Drain up to the configured batch size.
    pub fn drain(&self, stream: &mut Resumer) -> Result<Vec<SourceRecord>, TaskError> {
        self.drain_max(stream, self.batch_size)
    }

    /// Drain up to `max_batch_size` records.
    ///
    /// An empty result means no new data is currently available. On a read or
    /// conversion error nothing is returned; the records read before the
    /// failure are dropped and the stream stays usable for a reconfigure.
    pub fn drain_max(
        &self,
        stream: &mut Resumer,
        max_batch_size: usize,
    ) -> Result<Vec<SourceRecord>, TaskError> {
        let source = stream.source_id().to_string();
        let tracker = stream.begin_drain()?;
        let result = fill(tracker, &source, max_batch_size);
        stream.end_drain();

        let records = result.map_err(TaskError::Drain)?;
        debug!(
            source = %source,
            records = records.len(),
            offset = ?stream.current_offset(),
            "drained batch"
        );
        Ok(records)
    }
}

impl Default for BatchEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

fn fill(
    tracker: &mut OffsetTracker,
    source: &str,
    max_batch_size: usize,
) -> Result<Vec<SourceRecord>, StreamError> {
    let mut records = Vec::with_capacity(max_batch_size.min(DEFAULT_BATCH_SIZE));

    while records.len() < max_batch_size {
        let entry = match tracker.next() {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                return Err(StreamError::new(
                    Stage::Read,
                    source,
                    tracker.current_offset(),
                    e,
                ));
            }
        };

        trace!(source = %source, line = entry.line_number, "processing entry");
        let offset = tracker.current_offset();
        let record = SourceRecord::from_entry(source, offset, &entry)
            .map_err(|e| StreamError::new(Stage::Convert, source, offset, e))?;
        records.push(record);
    }

    Ok(records)
}
