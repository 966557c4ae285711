use crate::error::ChartResult;
use crate::render::{Renderer, ViewFrame};

/// Headless renderer for tests and hosts without a drawing surface.
///
/// Frames are still validated so ordering or domain bugs surface early.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_point_count: usize,
    pub last_visible_series: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ViewFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_point_count = frame.points.len();
        self.last_visible_series = frame.series.iter().filter(|series| series.visible).count();
        Ok(())
    }
}
