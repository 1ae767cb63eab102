//! Tests for StreamError and TaskError.

use std::error::Error;
use std::io;

use crate::config::ConfigError;
use crate::error::{Stage, StreamError, TaskError};
use crate::resume::StreamState;
use crate::store::StoreError;

#[test]
fn stream_error_display_names_stage_target_and_offset() {
    let err = StreamError::new(
        Stage::Read,
        "access.log",
        41,
        io::Error::new(io::ErrorKind::InvalidData, "line 43: invalid UTF-8"),
    );
    assert_eq!(
        err.to_string(),
        "[Read] access.log (offset 41): line 43: invalid UTF-8"
    );
    assert!(err.source().is_some());
}

#[test]
fn stage_is_reported_for_stream_errors_only() {
    let configure = TaskError::Configure(StreamError::new(Stage::Skip, "a", 3, "eof"));
    let drain = TaskError::Drain(StreamError::new(Stage::Convert, "a", 3, "bad"));
    let state = TaskError::InvalidState {
        expected: StreamState::Ready,
        actual: StreamState::Closed,
    };

    assert_eq!(configure.stage(), Some(Stage::Skip));
    assert_eq!(drain.stage(), Some(Stage::Convert));
    assert_eq!(state.stage(), None);
}

#[test]
fn invalid_state_display() {
    let err = TaskError::InvalidState {
        expected: StreamState::Ready,
        actual: StreamState::Unconfigured,
    };
    assert_eq!(err.to_string(), "stream is unconfigured, expected ready");
}

#[test]
fn store_and_config_errors_convert() {
    let store: TaskError = StoreError::Version(7).into();
    assert!(matches!(store, TaskError::Store(StoreError::Version(7))));

    let config: TaskError = ConfigError::Invalid("batch_size must be at least 1".into()).into();
    assert!(matches!(config, TaskError::Config(_)));
    assert!(config.to_string().contains("batch_size"));
}

#[test]
fn configure_error_exposes_the_stream_error_as_source() {
    let err = TaskError::Configure(StreamError::new(Stage::Open, "a.log", -1, "not found"));
    let source = err.source().unwrap();
    assert!(source.to_string().starts_with("[Open] a.log (offset -1)"));
}

#[cfg(feature = "miette")]
#[test]
fn diagnostic_carries_help() {
    use crate::error::TaskDiagnostic;
    use miette::Diagnostic;

    let err = TaskError::Drain(StreamError::new(Stage::Read, "a.log", 2, "boom"));
    let diag = TaskDiagnostic::from(err);
    assert!(diag.help().is_some());
}
