//! Tests for run_to_end.

use crate::builder::TaskBuilder;
use crate::cli::{InputArg, RunnerArgs, run_to_end};
use crate::record::SourceRecord;

fn write_log(dir: &std::path::Path, lines: &str) -> String {
    let path = dir.join("access.log");
    std::fs::write(&path, lines).unwrap();
    path.to_string_lossy().into_owned()
}

fn decode(out: &[u8]) -> Vec<SourceRecord> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn run_writes_ndjson_and_resumes_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(
        dir.path(),
        "#Version: 1.0\n#Fields: date time c-ip\n2024-01-01 00:00:01 10.0.0.1\n2024-01-01 00:00:02 10.0.0.2\n",
    );
    let args = RunnerArgs {
        input: InputArg::parse(&log),
        offsets: Some(dir.path().join("offsets.json").to_string_lossy().into_owned()),
        ..Default::default()
    };

    let mut task = TaskBuilder::from_config(&args.to_config())
        .unwrap()
        .with_batch_size(1)
        .build()
        .unwrap();
    let mut out = Vec::new();
    assert_eq!(run_to_end(&mut task, &mut out).unwrap(), 2);

    let records = decode(&out);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].offset, 0);
    assert_eq!(records[1].offset, 1);
    assert_eq!(records[1].value["text"], "2024-01-01 00:00:02 10.0.0.2");
    assert!(records.iter().all(|r| r.key.is_none()));

    // Appended entries are all a rerun delivers
    std::fs::write(
        &log,
        "#Version: 1.0\n#Fields: date time c-ip\n2024-01-01 00:00:01 10.0.0.1\n2024-01-01 00:00:02 10.0.0.2\n2024-01-01 00:00:03 10.0.0.3\n",
    )
    .unwrap();
    let mut task = TaskBuilder::from_config(&args.to_config())
        .unwrap()
        .build()
        .unwrap();
    let mut out = Vec::new();
    assert_eq!(run_to_end(&mut task, &mut out).unwrap(), 1);

    let records = decode(&out);
    assert_eq!(records[0].offset, 2);
    assert_eq!(records[0].value["line_number"], 5);
}

#[test]
fn run_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunnerArgs {
        input: InputArg::parse(&dir.path().join("absent.log").to_string_lossy()),
        ..Default::default()
    };
    let mut task = TaskBuilder::from_config(&args.to_config())
        .unwrap()
        .build()
        .unwrap();

    let mut out = Vec::new();
    assert!(run_to_end(&mut task, &mut out).is_err());
    assert!(out.is_empty());
}
