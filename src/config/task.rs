//! Task configuration loaded from YAML, JSON or TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emitter::DEFAULT_BATCH_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The format is unknown or its feature is not enabled
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Invalid(String),
}

/// Formats a `TaskConfig` can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// Check if this format is available (feature enabled).
    pub fn is_available(&self) -> bool {
        match self {
            ConfigFormat::Json => true,
            ConfigFormat::Yaml => cfg!(feature = "yaml"),
            ConfigFormat::Toml => cfg!(feature = "toml"),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Settings for one ELF source task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Maximum records returned by one poll
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Where log entries are read from
    pub input: InputConfig,
    /// Where committed offsets are kept; in memory when absent
    #[serde(default)]
    pub offsets: Option<OffsetStoreConfig>,
    /// Skip `#` directive lines instead of emitting them as records
    #[serde(default = "default_skip_directives")]
    pub skip_directives: bool,
}

/// Configuration for the log input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Kind of input: "file" or "stdin"
    pub kind: String,
    /// File path (for file inputs)
    #[serde(default)]
    pub path: Option<String>,
    /// Logical source name; defaults to the path
    #[serde(default)]
    pub id: Option<String>,
}

/// Configuration for the offset store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetStoreConfig {
    /// Kind of store: "memory" or "file"
    pub kind: String,
    /// JSON file path (for file stores)
    #[serde(default)]
    pub path: Option<String>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_skip_directives() -> bool {
    true
}

impl TaskConfig {
    /// Configuration reading `path` with every other setting at its default.
    pub fn for_file(path: impl Into<String>) -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            input: InputConfig {
                kind: "file".into(),
                path: Some(path.into()),
                id: None,
            },
            offsets: None,
            skip_directives: true,
        }
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Keep offsets in a JSON file.
    pub fn with_offset_file(mut self, path: impl Into<String>) -> Self {
        self.offsets = Some(OffsetStoreConfig {
            kind: "file".into(),
            path: Some(path.into()),
        });
        self
    }

    /// Load and validate settings from a file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = ConfigFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        let content = std::fs::read_to_string(path)?;
        Self::from_str_as(format, &content)
    }

    /// Parse and validate settings in the given format.
    pub fn from_str_as(format: ConfigFormat, content: &str) -> Result<Self, ConfigError> {
        let config: TaskConfig = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,

            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,

            #[cfg(feature = "toml")]
            ConfigFormat::Toml => toml::from_str(content)?,

            #[allow(unreachable_patterns)]
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }

        match self.input.kind.as_str() {
            "file" if self.input.path.is_none() => {
                return Err(ConfigError::Invalid(
                    "file input requires 'path' field".into(),
                ));
            }
            "file" | "stdin" | "-" => {}
            other => {
                return Err(ConfigError::Invalid(format!("unknown input kind: {}", other)));
            }
        }

        if let Some(store) = &self.offsets {
            // A stdin stream never replays earlier records
            if store.kind == "file" && matches!(self.input.kind.as_str(), "stdin" | "-") {
                return Err(ConfigError::Invalid(
                    "offsets cannot be persisted for stdin input".into(),
                ));
            }
            match store.kind.as_str() {
                "file" if store.path.is_none() => {
                    return Err(ConfigError::Invalid(
                        "file offset store requires 'path' field".into(),
                    ));
                }
                "file" | "memory" => {}
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "unknown offset store kind: {}",
                        other
                    )));
                }
            }
        }

        Ok(())
    }
}
