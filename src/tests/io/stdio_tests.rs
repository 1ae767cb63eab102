//! Tests for the file and stdin providers.

use std::io::Read;
use std::path::PathBuf;

use crate::io::{FileInput, InputProvider, StdinInput};

#[test]
fn stdin_is_identified_by_dash() {
    assert_eq!(StdinInput::new().id(), "-");
    assert_eq!(StdinInput::default().id(), "-");
}

#[test]
fn file_input_is_identified_by_its_path() {
    let input = FileInput::new(PathBuf::from("/var/log/web/access.log"));
    assert_eq!(input.id(), "/var/log/web/access.log");
    assert_eq!(input.path(), &PathBuf::from("/var/log/web/access.log"));
}

#[test]
fn with_id_replaces_the_identifier_but_not_the_path() {
    let input = FileInput::new(PathBuf::from("access.log")).with_id("web");
    assert_eq!(input.id(), "web");
    assert_eq!(input.path(), &PathBuf::from("access.log"));
}

#[test]
fn file_input_reads_the_file_on_every_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");
    std::fs::write(&path, "first\n").unwrap();

    let input = FileInput::new(path.clone());
    let mut out = String::new();
    input.open().unwrap().read_to_string(&mut out).unwrap();
    assert_eq!(out, "first\n");

    std::fs::write(&path, "first\nsecond\n").unwrap();
    out.clear();
    input.open().unwrap().read_to_string(&mut out).unwrap();
    assert_eq!(out, "first\nsecond\n");
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let input = FileInput::new(dir.path().join("absent.log"));
    let err = input.open().err().unwrap();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
