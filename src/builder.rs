//! Builder for creating ElfSourceTask instances.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigError, InputConfig, OffsetStoreConfig, TaskConfig};
use crate::emitter::{BatchEmitter, DEFAULT_BATCH_SIZE};
use crate::error::TaskError;
use crate::io::{FileInput, InputProvider, StdinInput};
use crate::source::{LineSourceBuilder, TextLineSourceBuilder};
use crate::store::{InMemoryOffsetStore, JsonFileOffsetStore, OffsetStore};
use crate::task::ElfSourceTask;

#[derive(Debug)]
pub struct TaskBuilder {
    input: Option<Arc<dyn InputProvider>>,
    line_source: Arc<dyn LineSourceBuilder>,
    store: Arc<dyn OffsetStore>,
    batch_size: usize,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            input: None,
            line_source: Arc::new(TextLineSourceBuilder::new()),
            store: Arc::new(InMemoryOffsetStore::new()),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_input(mut self, input: Arc<dyn InputProvider>) -> Self {
        self.input = Some(input);
        self
    }

    /// Read from a file identified by its path.
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_input(Arc::new(FileInput::new(path.into())))
    }

    pub fn with_line_source(mut self, line_source: Arc<dyn LineSourceBuilder>) -> Self {
        self.line_source = line_source;
        self
    }

    pub fn with_offset_store(mut self, store: Arc<dyn OffsetStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn build(self) -> Result<ElfSourceTask, TaskError> {
        let input = self
            .input
            .ok_or_else(|| ConfigError::Invalid("no input configured".into()))?;
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()).into());
        }

        Ok(ElfSourceTask::new(
            input,
            self.line_source,
            self.store,
            BatchEmitter::new(self.batch_size),
        ))
    }

    /// Resolve the input and offset store named by a `TaskConfig`.
    pub fn from_config(config: &TaskConfig) -> Result<Self, TaskError> {
        config.validate()?;

        let mut line_source = TextLineSourceBuilder::new();
        if !config.skip_directives {
            line_source = line_source.keep_directives();
        }

        let mut builder = TaskBuilder::new()
            .with_input(input_from_config(&config.input)?)
            .with_line_source(Arc::new(line_source))
            .with_batch_size(config.batch_size);

        if let Some(store_cfg) = &config.offsets {
            builder = builder.with_offset_store(store_from_config(store_cfg)?);
        }

        Ok(builder)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        TaskBuilder::new()
    }
}

fn input_from_config(cfg: &InputConfig) -> Result<Arc<dyn InputProvider>, TaskError> {
    let input: Arc<dyn InputProvider> = match cfg.kind.as_str() {
        "stdin" | "-" => Arc::new(StdinInput::new()),
        "file" => {
            let path = cfg
                .path
                .as_ref()
                .ok_or_else(|| ConfigError::Invalid("file input requires 'path' field".into()))?;
            let mut file = FileInput::new(PathBuf::from(path));
            if let Some(id) = &cfg.id {
                file = file.with_id(id.clone());
            }
            Arc::new(file)
        }
        other => {
            return Err(ConfigError::Invalid(format!("unknown input kind: {}", other)).into());
        }
    };
    Ok(input)
}

fn store_from_config(cfg: &OffsetStoreConfig) -> Result<Arc<dyn OffsetStore>, TaskError> {
    let store: Arc<dyn OffsetStore> = match cfg.kind.as_str() {
        "memory" => Arc::new(InMemoryOffsetStore::new()),
        "file" => {
            let path = cfg.path.as_ref().ok_or_else(|| {
                ConfigError::Invalid("file offset store requires 'path' field".into())
            })?;
            Arc::new(JsonFileOffsetStore::open(path)?)
        }
        other => {
            return Err(
                ConfigError::Invalid(format!("unknown offset store kind: {}", other)).into(),
            );
        }
    };
    Ok(store)
}
