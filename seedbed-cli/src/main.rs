//! seedbed CLI - load database fixtures in dependency-safe order.

use clap::Parser;

use seedbed_cli::cli::{Cli, Command};
use seedbed_cli::commands;
use seedbed_cli::error::CliResult;
use seedbed_cli::output;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Load(args) => commands::load::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
