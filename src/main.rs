//! recsweep — disk-quota enforcer for recorded media sessions.
//!
//! Thin binary entry point. All logic lives in the `recsweep-core` crate.

mod cli;

use clap::Parser;
use cli::Cli;
use recsweep_core::platform::LocalFileSystem;
use recsweep_core::report;
use recsweep_core::scanner::progress::LogSink;
use std::fs::File;
use std::io::BufWriter;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialise structured logging.
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = args.to_config();
    let outcome = recsweep_core::run_sweep(&config, &LocalFileSystem, &mut LogSink)?;

    if let Some(path) = &args.json {
        report::write_json(&outcome, BufWriter::new(File::create(path)?))?;
        tracing::info!("Wrote JSON report to {}", path.display());
    }
    if let Some(path) = &args.csv {
        report::write_csv(&outcome, BufWriter::new(File::create(path)?))?;
        tracing::info!("Wrote CSV report to {}", path.display());
    }

    Ok(())
}
