use crate::core::Viewport;
use crate::error::PlotResult;
use crate::render::{
    BandPrimitive, MarkerPrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive, TickPrimitive,
};

/// Primitives contributed by a single layer, kept in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerPrimitives {
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub bands: Vec<BandPrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub ticks: Vec<TickPrimitive>,
}

impl LayerPrimitives {
    pub fn validate(&self) -> PlotResult<()> {
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for band in &self.bands {
            band.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for tick in &self.ticks {
            tick.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
            && self.rects.is_empty()
            && self.bands.is_empty()
            && self.markers.is_empty()
            && self.texts.is_empty()
            && self.ticks.is_empty()
    }
}

/// Scene for one graph within a render pass.
///
/// `layers` follows the graph's z-order: earlier entries paint first.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    pub graph_name: String,
    pub title: String,
    pub y_label: String,
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl GraphFrame {
    pub fn validate(&self) -> PlotResult<()> {
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }
}

/// Backend-agnostic scene for one full view draw pass.
///
/// Graphs appear in view order, top to bottom; the backend stacks them
/// vertically. A frame with no graphs is valid and simply paints nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub title: String,
    pub pixel_width: f64,
    pub graphs: Vec<GraphFrame>,
}

impl RenderFrame {
    pub fn validate(&self) -> PlotResult<()> {
        for graph in &self.graphs {
            graph.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.iter().all(GraphFrame::is_empty)
    }
}
