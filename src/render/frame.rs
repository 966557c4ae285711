use serde::{Deserialize, Serialize};

use crate::core::{AggregationMode, Point, YDomain, ZoomRange};
use crate::error::{ChartError, ChartResult};
use crate::render::{LineStyle, ThemeMode};

/// Legend entry for one known variation.
///
/// `slot` is the position in the sorted variation list, so color assignment
/// stays stable while the visibility set changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLegend {
    pub identifier: String,
    pub name: String,
    pub slot: usize,
    pub visible: bool,
}

/// Everything a rendering surface needs for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub aggregation: AggregationMode,
    pub line_style: LineStyle,
    pub theme: ThemeMode,
    /// Zoomed and visibility-filtered points, ordered by period.
    pub points: Vec<Point>,
    pub y_domain: Option<YDomain>,
    pub zoom_range: Option<ZoomRange>,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub series: Vec<SeriesLegend>,
}

impl ViewFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if let Some(domain) = self.y_domain {
            if !domain.min.is_finite() || !domain.max.is_finite() || domain.min > domain.max {
                return Err(ChartError::InvalidData(format!(
                    "y domain must be finite and ordered, got [{}, {}]",
                    domain.min, domain.max
                )));
            }
        }

        if let Some(point) = self
            .points
            .iter()
            .find(|point| !point.conversion_rate().is_finite())
        {
            return Err(ChartError::InvalidData(format!(
                "non-finite conversion rate for {} at {}",
                point.variation(),
                point.period_label()
            )));
        }

        if let Some(point) = self
            .points
            .windows(2)
            .find(|pair| pair[0].period_date_iso() > pair[1].period_date_iso())
            .map(|pair| &pair[1])
        {
            return Err(ChartError::InvalidData(format!(
                "points out of period order at {}",
                point.period_label()
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
