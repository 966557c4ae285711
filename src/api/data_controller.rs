use std::collections::BTreeSet;
use std::io::Read;

use tracing::{debug, warn};

use crate::core::{AggregationMode, Dataset, Point, VariationCatalog, VisibilitySet, aggregate};
use crate::render::Renderer;

use super::ChartView;

impl<R: Renderer> ChartView<R> {
    /// Replaces the dataset, resetting visibility and zoom.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        debug!(
            records = dataset.data.len(),
            variations = dataset.variations.len(),
            "load dataset"
        );
        self.catalog = VariationCatalog::from_variations(&dataset.variations);
        self.variations = self.catalog.sorted_identifiers();
        self.visibility =
            VisibilitySet::initial(&self.variations, self.config.initial_visible_variations);
        warn_on_unlisted_variations(&dataset, &self.catalog);
        self.dataset = dataset;
        self.recompute_points();
        self.zoom.reset();
    }

    /// Loads a JSON dataset; a malformed payload leaves the view empty.
    pub fn load_dataset_json(&mut self, input: &str) {
        self.load_dataset(Dataset::load_or_empty(input));
    }

    /// Reads a JSON dataset; read or parse failures leave the view empty.
    pub fn load_dataset_reader<Rd: Read>(&mut self, reader: Rd) {
        let dataset = Dataset::from_reader(reader).unwrap_or_else(|err| {
            warn!(error = %err, "dataset unavailable, continuing with empty data");
            Dataset::default()
        });
        self.load_dataset(dataset);
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn aggregation(&self) -> AggregationMode {
        self.config.aggregation
    }

    /// Switches between daily and weekly periods.
    ///
    /// Returns `false` when `mode` is already active.
    pub fn set_aggregation(&mut self, mode: AggregationMode) -> bool {
        if self.config.aggregation == mode {
            return false;
        }
        self.config.aggregation = mode;
        self.recompute_points();
        true
    }

    /// All aggregated points for the current mode, before zoom and visibility.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(super) fn recompute_points(&mut self) {
        self.points = aggregate(&self.dataset.data, self.config.aggregation);
        self.zoom.rebase(&self.points);
    }
}

fn warn_on_unlisted_variations(dataset: &Dataset, catalog: &VariationCatalog) {
    let unlisted: BTreeSet<&str> = dataset
        .data
        .iter()
        .flat_map(|record| record.visits.keys())
        .map(String::as_str)
        .filter(|identifier| !catalog.contains(identifier))
        .collect();
    if !unlisted.is_empty() {
        warn!(
            count = unlisted.len(),
            first = unlisted.iter().next().copied().unwrap_or_default(),
            "raw records reference variations missing from the variation list"
        );
    }
}
