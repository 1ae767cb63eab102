use std::error::Error;
use std::io::{self, BufWriter};

use elfsource::TaskBuilder;
use elfsource::cli::{BatchSizeArg, InputArg, RunnerArgs, run_to_end};
use sarge::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  elfsource_sarge --input <token> [--offsets <file.json>] [--batch-size <n>]");
    eprintln!();
    eprintln!("Input tokens:");
    eprintln!("  - | stdin          Read from stdin");
    eprintln!("  @<path>            Force treating value as a file path");
    eprintln!("  <path>             Read the log file at <path>");
    eprintln!();
    eprintln!("Records are written to stdout as NDJSON. With --offsets, the last");
    eprintln!("delivered offset is committed after each batch and a rerun resumes");
    eprintln!("after it.");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<InputArg>(tag::both('i', "input"));
    let offsets_ref = reader.add::<String>(tag::both('o', "offsets"));
    let batch_ref = reader.add::<BatchSizeArg>(tag::both('b', "batch-size"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(never)) => match never {},
        None => InputArg::default(),
    };

    let offsets = match offsets_ref.get(&args) {
        Some(Ok(v)) => Some(v),
        Some(Err(e)) => return Err(format!("invalid --offsets: {e:?}").into()),
        None => None,
    };

    let batch_size = match batch_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(e)) => return Err(format!("invalid --batch-size: {e}").into()),
        None => BatchSizeArg::default(),
    };

    let runner = RunnerArgs {
        input,
        offsets,
        batch_size,
    };
    let mut task = TaskBuilder::from_config(&runner.to_config())?.build()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_to_end(&mut task, &mut out)?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("elfsource=info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("elfsource_sarge error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
