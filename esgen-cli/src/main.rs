//! `esgen`: generate Go structs from a search-index mapping.
//!
//! Run with: `esgen --in mapping.json --out model.go --package searchmodel --struct Doc`

mod cli;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("generation failed: {:?}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
