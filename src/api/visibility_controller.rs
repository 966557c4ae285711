use crate::core::VisibilitySet;
use crate::render::{Renderer, SeriesLegend};

use super::ChartView;

impl<R: Renderer> ChartView<R> {
    /// Known variation identifiers, sorted.
    #[must_use]
    pub fn variations(&self) -> &[String] {
        &self.variations
    }

    #[must_use]
    pub fn display_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.catalog.display_name(identifier)
    }

    #[must_use]
    pub fn visible_variations(&self) -> &VisibilitySet {
        &self.visibility
    }

    #[must_use]
    pub fn is_variation_visible(&self, identifier: &str) -> bool {
        self.visibility.contains(identifier)
    }

    /// Shows or hides a variation. Hiding the last visible one is refused.
    pub fn toggle_variation(&mut self, identifier: &str) -> bool {
        self.visibility.toggle(identifier)
    }

    #[must_use]
    pub fn series_legend(&self) -> Vec<SeriesLegend> {
        self.variations
            .iter()
            .enumerate()
            .map(|(slot, identifier)| SeriesLegend {
                identifier: identifier.clone(),
                name: self.catalog.display_name(identifier).to_owned(),
                slot,
                visible: self.visibility.contains(identifier),
            })
            .collect()
    }
}
