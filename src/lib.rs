//! # elfsource
//!
//! A resumable source task for Extended Log Format (ELF) web-server logs.
//!
//! ## Overview
//!
//! elfsource provides:
//! - **Line sources**: Turn an open stream into log entries, one at a time, in file order
//! - **Offset tracking**: A zero-based record offset per stream, starting at -1
//! - **Resume**: Reopen a log from its beginning and skip past the last committed record
//! - **Batching**: Drain bounded, all-or-nothing batches of keyless records
//! - **Offset stores**: Persist one offset per logical source (in memory or a JSON file)
//! - **Configuration**: Task settings from YAML, JSON or TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use elfsource::{JsonFileOffsetStore, TaskBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut task = TaskBuilder::new()
//!         .with_file("/var/log/web/access.log")
//!         .with_offset_store(Arc::new(JsonFileOffsetStore::open("offsets.json")?))
//!         .with_batch_size(500)
//!         .build()?;
//!
//!     task.start()?;
//!     loop {
//!         let records = task.poll()?;
//!         if records.is_empty() {
//!             break;
//!         }
//!         // deliver records...
//!         task.commit(&records)?;
//!     }
//!     task.stop();
//!     Ok(())
//! }
//! ```
//!
//! ## Offset semantics
//!
//! - A fresh stream is at offset `-1`. Every record read, whether delivered or
//!   skipped during resume, advances the offset by exactly one.
//! - Resuming from a committed offset `n` discards `n + 1` records. A log with
//!   fewer records than that is treated as fully consumed, not as an error.
//! - Directive (`#...`) and blank lines are not records and never move the offset.
//!
//! ## Features
//!
//! - `yaml` - YAML config files (enabled by default)
//! - `toml` - TOML config files
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - sarge argument types for the CLI helpers
//! - `runner` - the `elfsource_run` binary and its tracing subscriber

// Core modules
pub mod builder;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod io;
pub mod offset;
pub mod record;
pub mod resume;
pub mod source;
pub mod store;
pub mod task;

// Re-exports for convenience
pub use builder::TaskBuilder;
pub use config::{ConfigError, ConfigFormat, TaskConfig};
pub use emitter::{BatchEmitter, DEFAULT_BATCH_SIZE};
pub use error::{Stage, StreamError, TaskError};
pub use io::{FileInput, InMemorySource, InputProvider, StdinInput};
pub use offset::{NO_OFFSET, Offset, OffsetTracker};
pub use record::SourceRecord;
pub use resume::{Resumed, Resumer, StreamState};
pub use source::{LineSource, LineSourceBuilder, LogEntry, TextLineSource, TextLineSourceBuilder};
pub use store::{InMemoryOffsetStore, JsonFileOffsetStore, OffsetStore, StoreError};
pub use task::ElfSourceTask;

/// Build a task from a config file, picking the format from its extension.
pub fn build_task_from_path(
    path: impl AsRef<std::path::Path>,
) -> Result<ElfSourceTask, TaskError> {
    let config = TaskConfig::from_path(path)?;
    builder::TaskBuilder::from_config(&config)?.build()
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::TaskDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
