//! Tests for CLI argument helpers (InputArg, RunnerArgs).

use crate::cli::{BatchSizeArg, InputArg, RunnerArgs};

#[test]
fn test_input_arg_parse() {
    assert_eq!(InputArg::parse("-"), InputArg("-".into()));
    assert_eq!(InputArg::parse("STDIN"), InputArg("-".into()));
    assert_eq!(InputArg::parse(" access.log "), InputArg("access.log".into()));
    assert_eq!(InputArg::parse("@stdin"), InputArg("stdin".into()));
    assert!(InputArg::parse("stdin").is_stdin());
}

#[test]
fn test_runner_args_defaults() {
    let args = RunnerArgs::default();
    assert!(args.input.is_stdin());
    assert_eq!(args.batch_size, BatchSizeArg(1000));

    let config = args.to_config();
    assert_eq!(config.input.kind, "stdin");
    assert_eq!(config.offsets, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_runner_args_to_config() {
    let args = RunnerArgs {
        input: InputArg::parse("/var/log/web/access.log"),
        offsets: Some("offsets.json".into()),
        batch_size: BatchSizeArg(250),
    };
    let config = args.to_config();

    assert_eq!(config.batch_size, 250);
    assert_eq!(config.input.kind, "file");
    assert_eq!(config.input.path.as_deref(), Some("/var/log/web/access.log"));
    let offsets = config.offsets.unwrap();
    assert_eq!(offsets.kind, "file");
    assert_eq!(offsets.path.as_deref(), Some("offsets.json"));
}

#[test]
fn test_stdin_with_offsets_fails_validation() {
    let args = RunnerArgs {
        input: InputArg::parse("-"),
        offsets: Some("offsets.json".into()),
        ..Default::default()
    };
    assert!(args.to_config().validate().is_err());
}
