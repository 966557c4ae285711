use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// Step and limit controls for index-based zoom windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomTuning {
    /// Window width (`end - start`) at or below which zooming in stops.
    /// Zero is allowed when `min_step` is 1.
    pub min_window: usize,
    /// Share of the timeline shown by the first zoom-in.
    pub zoom_in_initial_ratio: f64,
    /// Share of the timeline shown when zooming out starts from full range.
    pub zoom_out_initial_ratio: f64,
    /// Per-end step as a share of the current width.
    pub step_ratio: f64,
    /// Lower bound of the per-end step.
    pub min_step: usize,
    /// Coverage of the timeline at which a window collapses to full range.
    pub collapse_ratio: f64,
}

impl Default for ZoomTuning {
    fn default() -> Self {
        Self {
            min_window: 15,
            zoom_in_initial_ratio: 0.7,
            zoom_out_initial_ratio: 0.8,
            step_ratio: 0.1,
            min_step: 2,
            collapse_ratio: 0.9,
        }
    }
}

impl ZoomTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, ratio) in [
            ("zoom in initial ratio", self.zoom_in_initial_ratio),
            ("zoom out initial ratio", self.zoom_out_initial_ratio),
            ("collapse ratio", self.collapse_ratio),
        ] {
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and in (0, 1]"
                )));
            }
        }

        if !self.step_ratio.is_finite() || self.step_ratio < 0.0 || self.step_ratio >= 0.5 {
            return Err(ChartError::InvalidData(
                "zoom step ratio must be finite and in [0, 0.5)".to_owned(),
            ));
        }

        if self.min_step == 0 {
            return Err(ChartError::InvalidData(
                "zoom min step must be >= 1".to_owned(),
            ));
        }

        // Any window wider than `min_window` must fit a step on each end.
        if self.min_window.saturating_add(1) < self.min_step.saturating_mul(2) {
            return Err(ChartError::InvalidData(
                "zoom min window must be at least twice the min step minus one".to_owned(),
            ));
        }

        if self.zoom_in_initial_ratio >= self.collapse_ratio {
            return Err(ChartError::InvalidData(
                "zoom in initial ratio must be below the collapse ratio".to_owned(),
            ));
        }

        Ok(self)
    }

    fn initial_width(self, total: usize, ratio: f64) -> usize {
        self.min_window.max((total as f64 * ratio).floor() as usize)
    }

    fn step(self, width: usize) -> usize {
        self.min_step
            .max((width as f64 * self.step_ratio).floor() as usize)
    }

    fn covers_nearly_all(self, range: ZoomRange, total: usize) -> bool {
        let full = range.start_index == 0 && range.end_index + 1 >= total;
        full || range.width() as f64 >= total as f64 * self.collapse_ratio
    }
}

/// Inclusive window `[start_index, end_index]` over the ordered periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ZoomRangeParts")]
pub struct ZoomRange {
    start_index: usize,
    end_index: usize,
}

#[derive(Deserialize)]
struct ZoomRangeParts {
    start_index: usize,
    end_index: usize,
}

impl TryFrom<ZoomRangeParts> for ZoomRange {
    type Error = ChartError;

    fn try_from(parts: ZoomRangeParts) -> ChartResult<Self> {
        Self::new(parts.start_index, parts.end_index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "zoom range start {} is past its end {}",
                parts.start_index, parts.end_index
            ))
        })
    }
}

impl ZoomRange {
    /// Returns `None` when `start_index > end_index`.
    #[must_use]
    pub fn new(start_index: usize, end_index: usize) -> Option<Self> {
        (start_index <= end_index).then_some(Self {
            start_index,
            end_index,
        })
    }

    #[must_use]
    pub fn start_index(self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn end_index(self) -> usize {
        self.end_index
    }

    /// Distance between the window edges, `end_index - start_index`.
    #[must_use]
    pub fn width(self) -> usize {
        self.end_index - self.start_index
    }

    /// Clamps the window into a sequence of `total` periods.
    #[must_use]
    pub fn fit(self, total: usize) -> Option<Self> {
        let last = total.checked_sub(1)?;
        Self::new(self.start_index, self.end_index.min(last))
    }

    fn anchored_at_latest(width: usize, total: usize) -> Option<Self> {
        let last = total.checked_sub(1)?;
        Self::new(total.saturating_sub(width), last)
    }
}

#[must_use]
pub fn can_zoom_in(current: Option<ZoomRange>, tuning: &ZoomTuning) -> bool {
    current.is_none_or(|range| range.width() > tuning.min_window)
}

#[must_use]
pub fn can_zoom_out(current: Option<ZoomRange>, total: usize, tuning: &ZoomTuning) -> bool {
    if total == 0 {
        return false;
    }
    current.is_some_and(|range| (range.width() as f64) < total as f64 * tuning.collapse_ratio)
}

/// Narrows the window, starting from the most recent periods when unzoomed.
#[must_use]
pub fn zoom_in_transition(
    current: Option<ZoomRange>,
    total: usize,
    tuning: &ZoomTuning,
) -> Option<ZoomRange> {
    if total == 0 {
        return current;
    }

    let Some(range) = current.and_then(|range| range.fit(total)) else {
        return ZoomRange::anchored_at_latest(
            tuning.initial_width(total, tuning.zoom_in_initial_ratio),
            total,
        );
    };

    let width = range.width();
    if width <= tuning.min_window {
        return Some(range);
    }

    let step = tuning.step(width);
    if step.saturating_mul(2) > width {
        return Some(range);
    }
    ZoomRange::new(range.start_index + step, range.end_index - step)
}

/// Widens the window symmetrically, collapsing to full range once it covers
/// nearly the whole timeline.
#[must_use]
pub fn zoom_out_transition(
    current: Option<ZoomRange>,
    total: usize,
    tuning: &ZoomTuning,
) -> Option<ZoomRange> {
    if total == 0 {
        return current;
    }

    let Some(range) = current.and_then(|range| range.fit(total)) else {
        return ZoomRange::anchored_at_latest(
            tuning.initial_width(total, tuning.zoom_out_initial_ratio),
            total,
        );
    };

    let step = tuning.step(range.width());
    let widened = ZoomRange {
        start_index: range.start_index.saturating_sub(step),
        end_index: range.end_index.saturating_add(step).min(total - 1),
    };
    (!tuning.covers_nearly_all(widened, total)).then_some(widened)
}

/// Fits a directly requested window, collapsing inverted or near-total ones.
#[must_use]
pub fn select_transition(
    requested: Option<ZoomRange>,
    total: usize,
    tuning: &ZoomTuning,
) -> Option<ZoomRange> {
    requested
        .and_then(|range| range.fit(total))
        .filter(|range| !tuning.covers_nearly_all(*range, total))
}

/// Zoom state over the ordered, distinct period labels of a point sequence.
#[derive(Debug, Clone, Default)]
pub struct ZoomWindow {
    tuning: ZoomTuning,
    periods: Vec<String>,
    range: Option<ZoomRange>,
}

impl ZoomWindow {
    #[must_use]
    pub fn new(tuning: ZoomTuning) -> Self {
        Self {
            tuning,
            periods: Vec::new(),
            range: None,
        }
    }

    #[must_use]
    pub fn tuning(&self) -> ZoomTuning {
        self.tuning
    }

    /// Replaces the tuning; an active window is re-fitted under the new limits.
    pub fn set_tuning(&mut self, tuning: ZoomTuning) {
        self.tuning = tuning;
        self.range = select_transition(self.range, self.total(), &self.tuning);
    }

    /// Rebuilds the period index from `points`.
    ///
    /// Returns `true` when an active window was dropped because the period
    /// sequence changed and its indices no longer apply.
    pub fn rebase(&mut self, points: &[Point]) -> bool {
        let periods: Vec<String> = points
            .iter()
            .map(|point| point.period_label().to_owned())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        if periods == self.periods {
            return false;
        }

        self.periods = periods;
        let dropped = self.range.take().is_some();
        if dropped {
            debug!(total = self.periods.len(), "period sequence changed, zoom reset");
        }
        dropped
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.periods.len()
    }

    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    #[must_use]
    pub fn range(&self) -> Option<ZoomRange> {
        self.range
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.range.is_some()
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        can_zoom_in(self.range, &self.tuning)
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        can_zoom_out(self.range, self.total(), &self.tuning)
    }

    pub fn zoom_in(&mut self) -> bool {
        let next = zoom_in_transition(self.range, self.total(), &self.tuning);
        self.replace(next, "zoom in")
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        let next = zoom_out_transition(self.range, self.total(), &self.tuning);
        self.replace(next, "zoom out")
    }

    pub fn reset(&mut self) -> bool {
        self.replace(None, "reset zoom")
    }

    pub fn select(&mut self, requested: Option<ZoomRange>) -> bool {
        let next = select_transition(requested, self.total(), &self.tuning);
        self.replace(next, "select zoom range")
    }

    /// Period labels inside the active window, or all of them when unzoomed.
    #[must_use]
    pub fn visible_periods(&self) -> &[String] {
        match self.range.and_then(|range| range.fit(self.total())) {
            Some(range) => &self.periods[range.start_index..=range.end_index],
            None => &self.periods,
        }
    }

    /// Points whose period label falls inside the active window.
    #[must_use]
    pub fn visible_subsequence(&self, points: &[Point]) -> Vec<Point> {
        if self.range.is_none() || self.periods.is_empty() {
            return points.to_vec();
        }

        let visible: HashSet<&str> = self.visible_periods().iter().map(String::as_str).collect();
        points
            .iter()
            .filter(|point| visible.contains(point.period_label()))
            .cloned()
            .collect()
    }

    fn replace(&mut self, next: Option<ZoomRange>, action: &'static str) -> bool {
        if next == self.range {
            return false;
        }
        trace!(
            action,
            start = next.map(ZoomRange::start_index),
            end = next.map(ZoomRange::end_index),
            total = self.total(),
            "zoom window changed"
        );
        self.range = next;
        true
    }
}
