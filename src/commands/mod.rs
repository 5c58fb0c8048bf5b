//! Command implementations for the CLI
//!
//! - dashboard: live cost estimation dashboard
//! - snapshot: one fetch, printed as a table or JSON
//! - config: configuration display and validation

pub mod config;
pub mod dashboard;
pub mod snapshot;

use price_table::config::Config;
use price_table::pricing::Parameters;

use crate::cli::SourceArgs;

/// Apply command-line overrides on top of the loaded configuration
///
/// Returns the initial parameters: configured defaults, with any flag given
/// on the command line replacing the corresponding value.
pub fn apply_source_args(cfg: &mut Config, args: &SourceArgs) -> Parameters {
    if let Some(url) = &args.url {
        cfg.source.url = url.clone();
    }

    let defaults = &mut cfg.defaults;
    if let Some(value) = &args.num_requests {
        defaults.num_requests = value.clone();
    }
    if let Some(value) = &args.response_size {
        defaults.response_size = value.clone();
    }
    if let Some(value) = &args.frequency {
        defaults.frequency = value.clone();
    }

    defaults.to_parameters()
}
