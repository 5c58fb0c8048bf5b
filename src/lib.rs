pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod refresh;

pub use logging::{init_file_tracing, init_tracing};
