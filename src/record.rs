//! Records handed to the host's record sink.

use serde::{Deserialize, Serialize};

use crate::offset::Offset;
use crate::source::LogEntry;

/// One converted log entry, ready for delivery.
///
/// Records carry no key. `source` and `offset` together are the position the
/// host commits once the record has been delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Logical source (input id) the record was read from
    pub source: String,
    /// Offset of the record within its stream
    pub offset: Offset,
    pub key: Option<serde_json::Value>,
    pub value: serde_json::Value,
}

impl SourceRecord {
    /// Convert an entry into a keyless record.
    pub fn from_entry(
        source: impl Into<String>,
        offset: Offset,
        entry: &LogEntry,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            source: source.into(),
            offset,
            key: None,
            value: serde_json::to_value(entry)?,
        })
    }
}
