//! Coffee & health survey dashboard core.
//!
//! Loads the survey, applies the sidebar filters and shapes the filtered
//! records into chart options for the five dashboard tabs:
//!
//! ```text
//!  loader ─► cache ─► filter ─► views::{kpi, correlation, geo, categorical, trend} ─► chart
//! ```

pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod views;
