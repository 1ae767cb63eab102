//! Tests for InMemorySource.

use std::io::Read;

use crate::io::{InMemorySource, InputProvider};

fn read_all(input: &dyn InputProvider) -> String {
    let mut out = String::new();
    input.open().unwrap().read_to_string(&mut out).unwrap();
    out
}

#[test]
fn from_lines_terminates_every_line() {
    let input = InMemorySource::from_lines("mem", ["a", "b"]);
    assert_eq!(input.id(), "mem");
    assert_eq!(read_all(&input), "a\nb\n");
}

#[test]
fn every_open_starts_from_the_beginning() {
    let input = InMemorySource::from_string("mem", "x\ny\n");
    assert_eq!(read_all(&input), "x\ny\n");
    assert_eq!(read_all(&input), "x\ny\n");
    assert_eq!(input.open_count(), 2);
}

#[test]
fn clones_share_the_open_counter() {
    let input = InMemorySource::new("mem", b"data".to_vec());
    let clone = input.clone();
    let _ = clone.open().unwrap();
    assert_eq!(input.open_count(), 1);
}
