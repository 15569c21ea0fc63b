//! `seedbed load` command - load a fixture document into a database.

use tracing_subscriber::EnvFilter;

use crate::cli::LoadArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the load command
pub async fn run(args: LoadArgs) -> CliResult<()> {
    init_logging(&args);

    let provider = match args.provider {
        Some(provider) => provider.into(),
        None => seedbed::Provider::from_url(&args.db).ok_or_else(|| {
            CliError::Config(
                "cannot infer the database provider from the URL; pass --provider".to_string(),
            )
        })?,
    };

    if args.dry_run {
        output::warn("dry-run: no statements will be executed");
    }

    let config = seedbed::Config::new(args.file, args.db)
        .provider(provider)
        .truncate(!args.no_truncate)
        .reset_sequences(!args.no_reset_seq)
        .dry_run(args.dry_run)
        .default_schema(args.schema);

    let report = seedbed::load(&config).await?;

    output::success(&report.summary());
    for table in &report.tables {
        output::list_item(&table.to_string());
    }

    Ok(())
}

/// Dry-run renderings surface through tracing at info level, so a
/// subscriber is always installed; --verbose widens it to debug.
fn init_logging(args: &LoadArgs) {
    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
