mod frame;
mod null_renderer;
mod primitives;

pub use frame::{GraphFrame, LayerPrimitives, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    BandPrimitive, Color, MarkerPrimitive, MarkerShape, PolylinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive, TickEdge, TickPrimitive,
};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from graph domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}
