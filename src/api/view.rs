use crate::core::{
    Dataset, Point, VariationCatalog, VisibilitySet, YDomain, ZoomWindow, derive_y_domain,
};
use crate::error::ChartResult;
use crate::render::{LineStyle, Renderer, ThemeMode, ViewFrame};

use super::ChartViewConfig;

/// Main orchestration facade consumed by host applications.
///
/// `ChartView` owns the raw dataset, the aggregated points for the current
/// aggregation mode, the zoom window and the visibility set. Every derived
/// view (visible points, y domain, frame) is recomputed on request from
/// those four pieces of state.
pub struct ChartView<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartViewConfig,
    pub(super) dataset: Dataset,
    pub(super) catalog: VariationCatalog,
    pub(super) variations: Vec<String>,
    pub(super) points: Vec<Point>,
    pub(super) zoom: ZoomWindow,
    pub(super) visibility: VisibilitySet,
}

impl<R: Renderer> ChartView<R> {
    pub fn new(renderer: R, config: ChartViewConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            config,
            dataset: Dataset::default(),
            catalog: VariationCatalog::default(),
            variations: Vec::new(),
            points: Vec::new(),
            zoom: ZoomWindow::new(config.zoom),
            visibility: VisibilitySet::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartViewConfig {
        self.config
    }

    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        self.config.line_style
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.config.line_style = line_style;
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.config.theme
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.config.theme = self.config.theme.toggled();
        self.config.theme
    }

    /// Zoomed and visibility-filtered points, in period order.
    #[must_use]
    pub fn visible_points(&self) -> Vec<Point> {
        self.visibility.filter_points(&self.zoomed_points())
    }

    #[must_use]
    pub fn y_domain(&self) -> Option<YDomain> {
        derive_y_domain(&self.visible_points())
    }

    /// Derives the full per-render-cycle output.
    #[must_use]
    pub fn frame(&self) -> ViewFrame {
        let points = self.visible_points();
        let y_domain = derive_y_domain(&points);
        ViewFrame {
            aggregation: self.config.aggregation,
            line_style: self.config.line_style,
            theme: self.config.theme,
            points,
            y_domain,
            zoom_range: self.zoom.range(),
            can_zoom_in: self.zoom.can_zoom_in(),
            can_zoom_out: self.zoom.can_zoom_out(),
            series: self.series_legend(),
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
