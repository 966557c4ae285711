mod frame;
mod null_renderer;
mod style;

pub use frame::{SeriesLegend, ViewFrame};
pub use null_renderer::NullRenderer;
pub use style::{LineStyle, ThemeMode};

use crate::error::ChartResult;

/// Contract implemented by any rendering surface.
///
/// Surfaces receive a fully derived `ViewFrame`; pivoting, colors and
/// drawing stay on their side of this boundary.
pub trait Renderer {
    fn render(&mut self, frame: &ViewFrame) -> ChartResult<()>;
}
