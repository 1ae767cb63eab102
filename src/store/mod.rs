//! Persisted offsets, one per logical source.
//!
//! This module provides:
//! - `OffsetStore`: Trait for loading and committing offsets
//! - `InMemoryOffsetStore`: Process-local store, mostly for tests
//! - `JsonFileOffsetStore`: Store backed by a JSON file with atomic writes

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

use crate::offset::Offset;

mod json_file;

pub use json_file::JsonFileOffsetStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported offset file version {0}")]
    Version(u32),

    #[error("offset store lock poisoned")]
    Poisoned,
}

/// Storage for the last committed offset of each source.
pub trait OffsetStore: Send + Sync + Debug {
    /// Last committed offset for `source`, or `None` if it was never committed.
    fn load(&self, source: &str) -> Result<Option<Offset>, StoreError>;

    /// Record `offset` as the last delivered record of `source`.
    fn commit(&self, source: &str, offset: Offset) -> Result<(), StoreError>;
}

/// In-memory offset store.
///
/// Clones share the same offsets, so a test can keep a handle while the task
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOffsetStore {
    offsets: Arc<Mutex<HashMap<String, Offset>>>,
}

impl InMemoryOffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a committed offset for `source`.
    pub fn with_offset(self, source: impl Into<String>, offset: Offset) -> Self {
        if let Ok(mut guard) = self.offsets.lock() {
            guard.insert(source.into(), offset);
        }
        self
    }
}

impl OffsetStore for InMemoryOffsetStore {
    fn load(&self, source: &str) -> Result<Option<Offset>, StoreError> {
        let guard = self.offsets.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(source).copied())
    }

    fn commit(&self, source: &str, offset: Offset) -> Result<(), StoreError> {
        let mut guard = self.offsets.lock().map_err(|_| StoreError::Poisoned)?;
        guard.insert(source.to_string(), offset);
        debug!(source = %source, offset, "committed offset");
        Ok(())
    }
}
