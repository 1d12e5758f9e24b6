//! CLI entry point for the coordinate hash quality analyzer

use clap::Parser;
use hashgrid::io::cli::{Analyzer, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> hashgrid::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Analyzer::new(cli).run().map(|_| ())
}
