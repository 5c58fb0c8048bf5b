//! Tracing setup
//!
//! Non-interactive commands log to stderr. The dashboard owns the terminal,
//! so it logs to `<logging.directory>/price-table.log` through a non-blocking
//! writer whose guard must live for the whole session.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

pub const LOG_FILE_NAME: &str = "price-table.log";

/// Initialize tracing to stderr
///
/// Note: This function can only be called once per process.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    install(cfg, std::io::stderr, true)
}

/// Initialize tracing to the dashboard log file
///
/// Logs are flushed by a background worker; keep the returned guard alive
/// until the dashboard exits.
pub fn init_file_tracing(cfg: &LoggingConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&cfg.directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(&cfg.directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    install(cfg, writer, false)?;
    tracing::info!("Logging to {}", log_file_path(cfg).display());
    Ok(guard)
}

/// Full path of the dashboard log file
pub fn log_file_path(cfg: &LoggingConfig) -> PathBuf {
    PathBuf::from(&cfg.directory).join(LOG_FILE_NAME)
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn install<W>(cfg: &LoggingConfig, writer: W, ansi: bool) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (text_layer, json_layer) = match cfg.format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(ansi)
                    .with_writer(writer),
            ),
            None,
        ),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(writer))),
    };

    tracing_subscriber::registry()
        .with(build_filter(&cfg.level))
        .with(text_layer)
        .with(json_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let cfg = LoggingConfig {
            directory: "/tmp/price-table-logs".to_string(),
            ..Default::default()
        };
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/price-table-logs/price-table.log")
        );
    }

    #[test]
    fn test_build_filter_accepts_level() {
        let filter = build_filter("debug");
        assert!(!filter.to_string().is_empty());
    }
}
