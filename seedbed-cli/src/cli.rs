//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// seedbed - dependency-aware database fixture loader
#[derive(Parser, Debug)]
#[command(name = "seedbed")]
#[command(version)]
#[command(about = "Load declarative YAML fixtures in dependency-safe order", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a fixture document into a database
    Load(LoadArgs),

    /// Display version information
    Version,
}

/// Supported database providers
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ProviderArg {
    Postgres,
    Mysql,
}

impl From<ProviderArg> for seedbed::Provider {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Postgres => seedbed::Provider::Postgres,
            ProviderArg::Mysql => seedbed::Provider::Mysql,
        }
    }
}

/// Arguments for the `load` command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Path to the YAML fixture document
    #[arg(short, long, default_value = "fixtures.yml")]
    pub file: PathBuf,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub db: String,

    /// Database provider (inferred from the URL scheme when omitted)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Skip truncating tables before loading
    #[arg(long)]
    pub no_truncate: bool,

    /// Skip resetting sequences after loading
    #[arg(long)]
    pub no_reset_seq: bool,

    /// Render statements without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Schema used for unqualified table names
    #[arg(long, default_value = "public")]
    pub schema: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
