//! Interactive dashboard: row table state and terminal rendering

pub mod table;
pub mod ui;

pub use table::{ApplyOutcome, PriceTable};
pub use ui::{AppAction, DashboardApp};
