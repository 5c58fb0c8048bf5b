use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use price_table::{config, config::LoggingConfig, init_file_tracing, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Dashboard {
            source,
            interval_ms,
            sticky_sort,
        } => {
            let mut cfg = config::load_config(&args.config)?;
            let params = commands::apply_source_args(&mut cfg, &source);
            if let Some(interval_ms) = interval_ms {
                cfg.refresh.interval_ms = interval_ms;
            }
            cfg.refresh.sticky_sort |= sticky_sort;
            config::validate_config(&cfg)?;

            // The dashboard owns the terminal; logs go to a file
            let _log_guard = init_file_tracing(&cfg.logging)?;
            commands::dashboard::execute(cfg, params).await?;
        }
        cli::Commands::Snapshot { source, sort, json } => {
            let mut cfg = config::load_config(&args.config)?;
            let params = commands::apply_source_args(&mut cfg, &source);
            config::validate_config(&cfg)?;

            init_tracing(&cfg.logging)?;
            commands::snapshot::execute(&cfg, &params, sort.map(Into::into), json).await?;
        }
        cli::Commands::Config { action } => {
            init_tracing(&LoggingConfig::default())?;
            match action {
                cli::ConfigCommands::Show => commands::config::show(&args.config)?,
                cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
            }
        }
        cli::Commands::Version => {
            println!("price-table v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
