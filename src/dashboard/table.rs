//! The rendered row collection and everything that mutates it
//!
//! All mutation happens on the owner's loop: refresh results are applied
//! here, sort selections are applied here, and nothing else touches the rows.
//! A completed fetch is applied when its generation is newer than the last
//! one applied, so results that arrive out of order are dropped while a
//! source slower than the interval still fills the table.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::pricing::calculator::transform_zones;
use crate::pricing::models::DisplayRow;
use crate::pricing::params::Parameters;
use crate::pricing::sort::{sort_rows, SelectorChoice, SortField, SortState};
use crate::refresh::poller::RefreshUpdate;

/// What applying a refresh update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Rows replaced; holds the new row count
    Replaced(usize),
    /// Fetch failed; previous rows kept
    Failed,
    /// A newer fetch has already been applied; update dropped
    Stale,
}

pub struct PriceTable {
    rows: Vec<DisplayRow>,
    sort: SortState,
    sticky_sort: bool,
    last_applied: u64,
    last_update: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl PriceTable {
    pub fn new(sticky_sort: bool) -> Self {
        Self {
            rows: Vec::new(),
            sort: SortState::none(),
            sticky_sort,
            last_applied: 0,
            last_update: None,
            last_error: None,
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply a completed fetch using the parameters current right now
    ///
    /// Only a fetch issued after the last applied one may change the table.
    /// A successful one replaces every row at once, in source order (or
    /// re-sorted when sticky sort is on). A failed one only records the error.
    pub fn apply_refresh(&mut self, update: RefreshUpdate, params: &Parameters) -> ApplyOutcome {
        if update.generation <= self.last_applied {
            debug!(
                generation = update.generation,
                last_applied = self.last_applied,
                "Discarding superseded zone fetch"
            );
            return ApplyOutcome::Stale;
        }

        match update.outcome {
            Ok(zones) => {
                let mut rows = transform_zones(&zones, params);
                if self.sticky_sort {
                    sort_rows(&mut rows, self.sort);
                } else {
                    self.sort = SortState::none();
                }

                self.rows = rows;
                self.last_applied = update.generation;
                self.last_update = Some(update.completed_at);
                self.last_error = None;
                debug!(rows = self.rows.len(), "Zone table refreshed");
                ApplyOutcome::Replaced(self.rows.len())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Pick an option on the selector for `field` and reorder the rows
    pub fn select(&mut self, field: SortField, choice: SelectorChoice) {
        self.sort = SortState::select(field, choice);
        sort_rows(&mut self.rows, self.sort);
        info!("Sort changed to {}", self.sort.describe());
    }

    /// Advance the selector for `field` to its next option
    pub fn cycle_selector(&mut self, field: SortField) {
        let next = self.sort.choice_for(field).next();
        self.select(field, next);
    }

    /// Sum of daily and monthly totals over all rows
    pub fn totals(&self) -> (f64, f64) {
        self.rows.iter().fold((0.0, 0.0), |(daily, monthly), row| {
            (daily + row.total_cost, monthly + row.total_monthly_cost)
        })
    }
}
