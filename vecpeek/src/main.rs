//! vecpeek binary.

mod cli;
mod commands;
mod render;
mod server;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::VecpeekArgs;
use crate::commands::execute_command;

fn main() -> anyhow::Result<()> {
    let args = VecpeekArgs::parse();
    init_tracing(&args.log_directives());
    execute_command(args)
}

// RUST_LOG wins over the -v/-q flags when set.
fn init_tracing(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
