//! Cost estimation core: zone records, user parameters, row derivation and
//! sorting. Everything here is synchronous and side-effect free.

pub mod calculator;
pub mod models;
pub mod params;
pub mod sort;

pub use calculator::{round2, transform_row, transform_zones};
pub use models::{DisplayRow, DisplayValue, ZoneRecord, ZonesResponse};
pub use params::{NumericParam, ParamField, Parameters};
pub use sort::{sort_rows, SelectorChoice, SortDirection, SortField, SortState};
