mod data_controller;
mod pivot;
mod view;
mod view_config;
mod view_snapshot;
mod visibility_controller;
mod zoom_controller;

pub use pivot::{PivotCell, PivotRow, pivot_rows};
pub use view::ChartView;
pub use view_config::ChartViewConfig;
pub use view_snapshot::{VIEW_SNAPSHOT_SCHEMA_VERSION, VersionedViewSnapshot, ViewSnapshot};
