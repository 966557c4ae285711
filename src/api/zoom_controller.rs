use crate::core::{Point, ZoomRange, ZoomTuning};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartView;

impl<R: Renderer> ChartView<R> {
    /// Active zoom window, `None` meaning full range.
    #[must_use]
    pub fn zoom_range(&self) -> Option<ZoomRange> {
        self.zoom.range()
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom.can_zoom_in()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom.can_zoom_out()
    }

    /// Narrows the window; returns whether it changed.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom.zoom_in()
    }

    /// Widens the window; returns whether it changed.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.zoom.reset()
    }

    /// Applies a window chosen directly by the host (e.g. a brush control).
    ///
    /// Out-of-range indices are clamped; inverted or near-total windows
    /// resolve to full range.
    pub fn set_zoom_range(&mut self, range: Option<ZoomRange>) -> bool {
        self.zoom.select(range)
    }

    #[must_use]
    pub fn zoom_tuning(&self) -> ZoomTuning {
        self.zoom.tuning()
    }

    pub fn set_zoom_tuning(&mut self, tuning: ZoomTuning) -> ChartResult<()> {
        let tuning = tuning.validate()?;
        self.config.zoom = tuning;
        self.zoom.set_tuning(tuning);
        Ok(())
    }

    /// Distinct period labels of the current points, in order.
    #[must_use]
    pub fn periods(&self) -> &[String] {
        self.zoom.periods()
    }

    #[must_use]
    pub fn visible_periods(&self) -> &[String] {
        self.zoom.visible_periods()
    }

    /// Points inside the zoom window, before visibility filtering.
    #[must_use]
    pub fn zoomed_points(&self) -> Vec<Point> {
        self.zoom.visible_subsequence(&self.points)
    }
}
