//! Tests for TaskBuilder.

use crate::builder::TaskBuilder;
use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::store::{JsonFileOffsetStore, OffsetStore};

#[test]
fn build_without_input_fails() {
    let err = TaskBuilder::new().build().unwrap_err();
    assert!(matches!(err, TaskError::Config(_)));
}

#[test]
fn build_with_zero_batch_size_fails() {
    let err = TaskBuilder::new()
        .with_file("access.log")
        .with_batch_size(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, TaskError::Config(_)));
}

#[test]
fn builder_defaults() {
    let task = TaskBuilder::default()
        .with_file("/var/log/web/access.log")
        .build()
        .unwrap();
    assert_eq!(task.batch_size(), 1000);
    assert_eq!(task.source_id(), "/var/log/web/access.log");
}

#[test]
fn from_config_resolves_file_input_and_offset_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("access.log");
    let offsets_path = dir.path().join("offsets.json");
    std::fs::write(&log_path, "#Fields: c-ip\n10.0.0.1\n10.0.0.2\n10.0.0.3\n").unwrap();

    let mut config = TaskConfig::for_file(log_path.to_string_lossy())
        .with_batch_size(2)
        .with_offset_file(offsets_path.to_string_lossy());
    config.input.id = Some("web".into());

    let mut task = TaskBuilder::from_config(&config).unwrap().build().unwrap();
    assert_eq!(task.source_id(), "web");

    task.start().unwrap();
    let batch = task.poll().unwrap();
    assert_eq!(batch.len(), 2);
    task.commit(&batch).unwrap();
    task.stop();

    let store = JsonFileOffsetStore::open(&offsets_path).unwrap();
    assert_eq!(store.load("web").unwrap(), Some(1));
}

#[test]
fn from_config_keeps_directives_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("access.log");
    std::fs::write(&log_path, "#Version: 1.0\nrecord\n").unwrap();

    let mut config = TaskConfig::for_file(log_path.to_string_lossy());
    config.skip_directives = false;

    let mut task = TaskBuilder::from_config(&config).unwrap().build().unwrap();
    task.start().unwrap();
    assert_eq!(task.poll().unwrap().len(), 2);
}

#[test]
fn from_config_rejects_invalid_settings() {
    let config = TaskConfig::for_file("a.log").with_batch_size(0);
    assert!(matches!(
        TaskBuilder::from_config(&config),
        Err(TaskError::Config(_))
    ));
}
