use std::env;
use std::io::{self, BufWriter};

use elfsource::build_task_from_path;
use elfsource::cli::run_to_end;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout carries the records, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("elfsource=info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: elfsource_run <task-config.yaml|json|toml>");
            std::process::exit(1);
        }
    };

    let mut task = build_task_from_path(&config_path)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_to_end(&mut task, &mut out)?;

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("elfsource_run error: {e}");
        // Use non-zero exit code so that callers can detect failure.
        std::process::exit(1);
    }
}
