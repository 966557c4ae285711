//! abtest-chart-rs: A/B-test conversion time-series engine.
//!
//! Raw per-day visit/conversion counts are aggregated into per-variation,
//! per-period points (daily or weekly), narrowed by an index-based zoom
//! window and a variation visibility set, and handed to an external
//! rendering surface as a `ViewFrame`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartView, ChartViewConfig};
pub use error::{ChartError, ChartResult};
