//! CLI entry point for the tile mosaic generator

use clap::Parser;
use std::process::ExitCode;
use tilemosaic::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Failures are already logged in readable form by `run`
    match FileProcessor::new(cli).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
