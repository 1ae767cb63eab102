//! CLI integration helpers for the ELF source runners.
//!
//! This module converts command-line arguments into a `TaskConfig`. The
//! `sarge` feature adds `ArgumentType` impls so the types can be read
//! directly by a sarge `ArgumentReader`.
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use elfsource::cli::{BatchSizeArg, InputArg, RunnerArgs};
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let input = reader.add::<InputArg>(tag::both('i', "input"));
//! let args = reader.parse()?;
//! ```

use std::io::Write;

use tracing::info;

use crate::config::{InputConfig, TaskConfig};
use crate::emitter::DEFAULT_BATCH_SIZE;
use crate::task::ElfSourceTask;

#[cfg(feature = "sarge")]
mod sarge;

/// The log to read: a file path, or "-" for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArg(pub String);

impl InputArg {
    /// Normalize a raw token.
    ///
    /// `-` and `stdin` read stdin; a leading `@` forces the rest to be a path.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(path) = token.strip_prefix('@') {
            return InputArg(path.to_string());
        }
        if token == "-" || token.eq_ignore_ascii_case("stdin") {
            return InputArg("-".to_string());
        }
        InputArg(token.to_string())
    }

    /// Check if reading from stdin.
    pub fn is_stdin(&self) -> bool {
        self.0 == "-"
    }

    fn to_config(&self) -> InputConfig {
        if self.is_stdin() {
            InputConfig {
                kind: "stdin".into(),
                path: None,
                id: None,
            }
        } else {
            InputConfig {
                kind: "file".into(),
                path: Some(self.0.clone()),
                id: None,
            }
        }
    }
}

impl Default for InputArg {
    fn default() -> Self {
        InputArg("-".to_string())
    }
}

/// Maximum records per poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSizeArg(pub usize);

impl Default for BatchSizeArg {
    fn default() -> Self {
        BatchSizeArg(DEFAULT_BATCH_SIZE)
    }
}

/// Arguments accepted by the runners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerArgs {
    pub input: InputArg,
    /// JSON file holding committed offsets; offsets are not persisted when absent
    pub offsets: Option<String>,
    pub batch_size: BatchSizeArg,
}

impl RunnerArgs {
    /// Build the task settings these arguments describe.
    pub fn to_config(&self) -> TaskConfig {
        let mut config = TaskConfig {
            batch_size: self.batch_size.0,
            input: self.input.to_config(),
            offsets: None,
            skip_directives: true,
        };
        if let Some(path) = &self.offsets {
            config = config.with_offset_file(path.clone());
        }
        config
    }
}

/// Start `task` and drain it until a poll comes back empty.
///
/// Each batch is written to `out` as NDJSON, flushed, and only then committed,
/// so a crash between the two re-delivers the batch on the next run.
/// Returns the number of records written.
pub fn run_to_end<W: Write>(
    task: &mut ElfSourceTask,
    out: &mut W,
) -> Result<u64, Box<dyn std::error::Error>> {
    let resumed = task.start()?;
    let mut written = 0u64;

    loop {
        let records = task.poll()?;
        if records.is_empty() {
            break;
        }
        for record in &records {
            serde_json::to_writer(&mut *out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        task.commit(&records)?;
        written += records.len() as u64;
    }

    info!(
        source = %task.source_id(),
        skipped = resumed.skipped,
        written,
        offset = ?task.current_offset(),
        "reached end of input"
    );
    task.stop();
    Ok(written)
}
