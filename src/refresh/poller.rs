//! Background refresh scheduling
//!
//! One spawned task owns one interval timer. It issues a fetch on the first
//! tick (mount), on every later tick, on every parameter change and on manual
//! request. Fetches run concurrently in a `JoinSet`; each completion is handed
//! to the owner as a `RefreshUpdate` tagged with the generation it was issued
//! under. The owner applies it only if it is newer than the last applied one.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch, Notify};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::error::FetchError;
use crate::pricing::models::ZoneRecord;
use crate::pricing::params::Parameters;
use crate::refresh::fetcher::ZoneSource;
use crate::refresh::generation::RequestGeneration;

/// Default refresh cadence
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Result of one completed fetch
#[derive(Debug)]
pub struct RefreshUpdate {
    pub generation: u64,
    pub outcome: Result<Vec<ZoneRecord>, FetchError>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Tick,
    Parameters,
    Manual,
}

/// Refresh scheduler for one mounted dashboard
pub struct Poller {
    source: Arc<dyn ZoneSource>,
    interval: Duration,
    generations: RequestGeneration,
}

impl Poller {
    pub fn new(source: Arc<dyn ZoneSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            generations: RequestGeneration::new(),
        }
    }

    /// Start the refresh task
    ///
    /// Parameter changes published on `params` trigger an immediate fetch and
    /// restart the interval. The returned receiver yields one update per
    /// completed fetch.
    pub fn spawn(
        self,
        params: watch::Receiver<Parameters>,
    ) -> (RefreshHandle, mpsc::UnboundedReceiver<RefreshUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let refresh = Arc::new(Notify::new());

        info!("Starting zone refresh (interval: {:?})", self.interval);
        let task = tokio::spawn(self.run(params, cancel_rx, Arc::clone(&refresh), update_tx));

        let handle = RefreshHandle {
            cancel: cancel_tx,
            refresh,
            task,
        };
        (handle, update_rx)
    }

    async fn run(
        self,
        mut params: watch::Receiver<Parameters>,
        mut cancel: oneshot::Receiver<()>,
        refresh: Arc<Notify>,
        updates: mpsc::UnboundedSender<RefreshUpdate>,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut inflight: JoinSet<RefreshUpdate> = JoinSet::new();
        let mut params_open = true;

        loop {
            tokio::select! {
                biased;

                // fires on explicit cancel and on handle drop
                _ = &mut cancel => break,

                changed = params.changed(), if params_open => match changed {
                    Ok(()) => {
                        ticker.reset();
                        self.issue(&mut inflight, Trigger::Parameters);
                    }
                    Err(_) => params_open = false,
                },

                _ = refresh.notified() => self.issue(&mut inflight, Trigger::Manual),

                _ = ticker.tick() => self.issue(&mut inflight, Trigger::Tick),

                Some(joined) = inflight.join_next() => match joined {
                    Ok(update) => {
                        if updates.send(update).is_err() {
                            debug!("Update receiver dropped, stopping refresh");
                            break;
                        }
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => error!("Zone fetch task failed: {}", e),
                },
            }
        }

        inflight.abort_all();
        info!("Zone refresh stopped");
    }

    fn issue(&self, inflight: &mut JoinSet<RefreshUpdate>, trigger: Trigger) {
        let generation = self.generations.issue();
        debug!(generation, ?trigger, "Issuing zone fetch");

        let source = Arc::clone(&self.source);
        inflight.spawn(async move {
            let outcome = source.fetch_zones().await;
            if let Err(e) = &outcome {
                error!(generation, kind = e.kind(), "Zone fetch failed: {}", e);
            }

            RefreshUpdate {
                generation,
                outcome,
                completed_at: Utc::now(),
            }
        });
    }
}

/// Handle to a running refresh task
///
/// Dropping the handle also stops the task, without waiting for it.
pub struct RefreshHandle {
    cancel: oneshot::Sender<()>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Fetch now, independent of the timer
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// Stop the timer, abort in-flight fetches and wait for the task to end
    pub async fn cancel(self) {
        let _ = self.cancel.send(());
        if let Err(e) = self.task.await {
            error!("Zone refresh task ended abnormally: {}", e);
        }
    }
}
