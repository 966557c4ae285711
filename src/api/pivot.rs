use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Point, VariationCatalog};
use crate::render::Renderer;

use super::ChartView;

/// Values of one variation in one pivot row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotCell {
    /// Rounded to two decimals for display.
    pub conversion_rate: f64,
    pub visits: u64,
    pub conversions: u64,
}

/// One period with a column per variation, keyed by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub period_label: String,
    pub period_date_iso: String,
    pub series: IndexMap<String, PivotCell>,
}

/// Turns long-form points into a wide table, one row per period label in
/// ascending order.
#[must_use]
pub fn pivot_rows(points: &[Point], catalog: &VariationCatalog) -> Vec<PivotRow> {
    let mut rows: IndexMap<&str, PivotRow> = IndexMap::new();
    for point in points {
        let row = rows.entry(point.period_label()).or_insert_with(|| PivotRow {
            period_label: point.period_label().to_owned(),
            period_date_iso: point.period_date_iso().to_owned(),
            series: IndexMap::new(),
        });
        row.series.insert(
            catalog.display_name(point.variation()).to_owned(),
            PivotCell {
                conversion_rate: round_to_cents(point.conversion_rate()),
                visits: point.visits(),
                conversions: point.conversions(),
            },
        );
    }

    let mut rows: Vec<PivotRow> = rows.into_values().collect();
    rows.sort_by(|a, b| a.period_label.cmp(&b.period_label));
    rows
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl<R: Renderer> ChartView<R> {
    /// Wide table of the visible points.
    #[must_use]
    pub fn pivot_rows(&self) -> Vec<PivotRow> {
        pivot_rows(&self.visible_points(), &self.catalog)
    }
}
