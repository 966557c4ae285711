pub mod aggregation;
pub mod catalog;
pub mod dataset;
pub mod rate;
pub mod types;
pub mod visibility;
pub mod y_domain;
pub mod zoom;

pub use aggregation::{aggregate, aggregate_daily, aggregate_weekly, week_start};
pub use catalog::VariationCatalog;
pub use dataset::{Dataset, RawRecord, VariationId, VariationInfo, parse_record_date};
pub use rate::conversion_rate;
pub use types::{AggregationMode, Point};
pub use visibility::VisibilitySet;
pub use y_domain::{YDomain, derive_y_domain};
pub use zoom::{ZoomRange, ZoomTuning, ZoomWindow};
