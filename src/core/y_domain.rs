use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::Point;

/// Padding added on each side of the visible rate range, in percentage points.
pub const Y_DOMAIN_PADDING: f64 = 1.0;

/// Rate axis bounds, both whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YDomain {
    pub min: f64,
    pub max: f64,
}

/// Computes padded axis bounds, or `None` when nothing is visible.
///
/// The lower bound never drops below zero.
#[must_use]
pub fn derive_y_domain<'a, I>(points: I) -> Option<YDomain>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut rates = points
        .into_iter()
        .map(|point| OrderedFloat(point.conversion_rate()));
    let first = rates.next()?;
    let (lowest, highest) = rates.fold((first, first), |(lo, hi), rate| (lo.min(rate), hi.max(rate)));

    Some(YDomain {
        min: (lowest.0 - Y_DOMAIN_PADDING).floor().max(0.0),
        max: (highest.0 + Y_DOMAIN_PADDING).ceil(),
    })
}
