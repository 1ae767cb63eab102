//! Error types for the ELF source task.
//!
//! This module provides:
//! - `Stage`: Indicates where in the stream lifecycle an error occurred
//! - `StreamError`: A single stream error with context
//! - `TaskError`: The error surfaced to the host for every fallible task call
//!
//! Every `TaskError` is fatal for the call that produced it. Nothing in this
//! crate retries internally; the host is expected to reconfigure the task from
//! its last committed offset.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::resume::StreamState;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening the input or building the line source
    Open,
    /// Read error while skipping already-committed records
    Skip,
    /// Read error while draining a batch
    Read,
    /// Entry could not be turned into a record value
    Convert,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Skip => write!(f, "Skip"),
            Stage::Read => write!(f, "Read"),
            Stage::Convert => write!(f, "Convert"),
        }
    }
}

#[derive(Debug)]
pub struct StreamError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the input (file path, "-" for stdin, etc.)
    pub target: String,
    /// Offset of the last record successfully read before the failure
    pub offset: i64,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl StreamError {
    pub fn new(
        stage: Stage,
        target: impl Into<String>,
        offset: i64,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            target: target.into(),
            offset,
            error: error.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (offset {}): {}",
            self.stage, self.target, self.offset, self.error
        )
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[derive(Debug, Error)]
pub enum TaskError {
    /// The stream could not be opened or positioned at the resume offset
    #[error("cannot configure stream: {0}")]
    Configure(#[source] StreamError),

    /// A batch could not be drained; no records from the batch are returned
    #[error("cannot drain batch: {0}")]
    Drain(#[source] StreamError),

    /// The call is not valid in the current stream state
    #[error("stream is {actual}, expected {expected}")]
    InvalidState {
        expected: StreamState,
        actual: StreamState,
    },

    /// Loading or committing a persisted offset failed
    #[error("offset store error: {0}")]
    Store(#[from] StoreError),

    /// The task settings are invalid
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl TaskError {
    /// The stream stage for errors raised while reading, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TaskError::Configure(e) | TaskError::Drain(e) => Some(e.stage),
            _ => None,
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
