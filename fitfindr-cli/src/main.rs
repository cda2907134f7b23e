//! Binary crate for the `fitfindr` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive preference form
//! - Rendering results as a list, map or chart in the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod form;
mod present;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);
    cmd.run().await
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "fitfindr_core=debug,fitfindr=debug",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
