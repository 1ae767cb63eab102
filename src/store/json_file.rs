//! JSON file-backed offset store with atomic writes.
//!
//! The file holds every source's offset:
//!
//! ```json
//! { "version": 1, "offsets": { "/var/log/web/access.log": 41 } }
//! ```
//!
//! Each commit rewrites the whole file through a temp file and a rename, so a
//! crash leaves either the previous or the new contents on disk.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{OffsetStore, StoreError};
use crate::offset::Offset;

const FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OffsetFile {
    version: u32,
    #[serde(default)]
    offsets: BTreeMap<String, Offset>,
}

impl Default for OffsetFile {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            offsets: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonFileOffsetStore {
    path: PathBuf,
    state: RwLock<OffsetFile>,
}

impl JsonFileOffsetStore {
    /// Open the store at `path`, loading it if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let state = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let state: OffsetFile = serde_json::from_reader(reader)?;
            if state.version != FILE_VERSION {
                return Err(StoreError::Version(state.version));
            }
            info!(
                path = %path.display(),
                sources = state.offsets.len(),
                "loaded committed offsets"
            );
            state
        } else {
            OffsetFile::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OffsetStore for JsonFileOffsetStore {
    fn load(&self, source: &str) -> Result<Option<Offset>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.offsets.get(source).copied())
    }

    fn commit(&self, source: &str, offset: Offset) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        // Memory only changes once the file holds the new offset
        let mut next = state.clone();
        next.offsets.insert(source.to_string(), offset);
        atomic_write(&self.path, &next)?;
        *state = next;
        debug!(source = %source, offset, path = %self.path.display(), "committed offset");
        Ok(())
    }
}

fn atomic_write(path: &Path, state: &OffsetFile) -> Result<(), StoreError> {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // Unique per process and per write so concurrent stores never share a temp file
    let unique_id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let temp_path = path.with_extension(format!("tmp.{}.{}", std::process::id(), unique_id));

    let result = write_and_rename(&temp_path, path, state);
    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!(path = %temp_path.display(), error = %e, "failed to remove temp offset file");
        }
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, state: &OffsetFile) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(temp_path)?);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.flush()?;
    drop(writer);

    fs::rename(temp_path, path)?;
    Ok(())
}
