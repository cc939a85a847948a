use crate::error::PlotResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_graph_count: usize,
    pub last_polyline_count: usize,
    pub last_rect_count: usize,
    pub last_band_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.last_graph_count = frame.graphs.len();
        self.last_polyline_count = frame
            .graphs
            .iter()
            .flat_map(|graph| &graph.layers)
            .map(|layer| layer.polylines.len())
            .sum();
        self.last_rect_count = frame
            .graphs
            .iter()
            .flat_map(|graph| &graph.layers)
            .map(|layer| layer.rects.len())
            .sum();
        self.last_band_count = frame
            .graphs
            .iter()
            .flat_map(|graph| &graph.layers)
            .map(|layer| layer.bands.len())
            .sum();
        Ok(())
    }
}
