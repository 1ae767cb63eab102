//! Configuration types for the ELF source task.
//!
//! This module provides:
//! - `TaskConfig`: Settings for one task (batch size, input, offset store)
//! - `InputConfig` / `OffsetStoreConfig`: Where records come from and where offsets go
//! - `ConfigFormat`: File formats the settings can be loaded from
//! - `ConfigError`: Errors raised while loading or validating settings

mod task;

pub use task::{ConfigError, ConfigFormat, InputConfig, OffsetStoreConfig, TaskConfig};
