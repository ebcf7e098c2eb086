mod commands;

use account_registry::AccountRegistry;
use anyhow::{Context, Result};
use commands::{Args, Parser};

fn main() -> Result<()> {
    let args = Args::parse();

    // Default level is info, override with RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut registry = AccountRegistry::new();

    log::info!("Replaying commands from {}", args.input_file.display());
    let file = std::fs::File::open(&args.input_file)
        .with_context(|| format!("Failed to open input file: {}", args.input_file.display()))?;

    registry
        .process_commands(file)
        .context("Failed to process commands")?;

    log::info!(
        "Processing complete, exporting {} accounts",
        registry.account_count()
    );

    registry
        .export_accounts(std::io::stdout())
        .context("Failed to export accounts to stdout")?;

    if args.total {
        log::info!("Total balance: {}", registry.total_balance());
    }

    log::info!("Export complete");

    Ok(())
}
