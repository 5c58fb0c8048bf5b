//! Periodic zone refresh: data source access, fetch tagging and scheduling

pub mod fetcher;
pub mod generation;
pub mod poller;

pub use fetcher::{HttpZoneSource, ZoneSource};
pub use generation::RequestGeneration;
pub use poller::{Poller, RefreshHandle, RefreshUpdate};
