use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic tag attached to every fetch at issue time
///
/// Clones share one counter. Tags start at 1, so 0 can stand for "nothing
/// applied yet" on the receiving side.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    latest: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag for a new fetch; strictly greater than every earlier tag
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }
}
