use anyhow::Result;
use std::path::Path;

use price_table::config::{self, Config};

/// Print the effective configuration (defaults, file and environment merged)
pub fn show(path: &Path) -> Result<()> {
    let cfg = config::load_config(path)?;
    println!("{}", render(&cfg)?);
    Ok(())
}

/// Validate the configuration and print a short summary
pub fn validate(path: &Path) -> Result<()> {
    println!("Validating configuration...");

    match config::load_config(path) {
        Ok(cfg) => {
            println!("✓ Configuration is valid");
            println!();
            println!("  Source:        {}", cfg.source.url);
            println!("  Timeout:       {}s", cfg.source.timeout_seconds);
            println!("  Refresh:       every {}ms", cfg.refresh.interval_ms);
            println!("  Sticky sort:   {}", cfg.refresh.sticky_sort);
            println!("  Currency:      {}", cfg.display.currency_symbol);
            println!("  Log level:     {}", cfg.logging.level);
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid");
            Err(e.into())
        }
    }
}

fn render(cfg: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}
