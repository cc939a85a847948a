use serde::{Deserialize, Serialize};

use crate::core::transform::AxisTransform;

/// Immutable x/y transform pair snapshotted once per render pass.
///
/// Layers receive the viewport by value and only read it, so every layer in
/// one pass sees the same mapping even if interaction mutates the live
/// transforms immediately afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    x: AxisTransform,
    y: AxisTransform,
}

impl Viewport {
    #[must_use]
    pub fn new(x: AxisTransform, y: AxisTransform) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(&self) -> &AxisTransform {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &AxisTransform {
        &self.y
    }

    /// Maps a data-space point to pixel coordinates.
    #[must_use]
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.to_screen(x), self.y.to_screen(y))
    }

    /// Maps a pixel position back to data space.
    #[must_use]
    pub fn to_data(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x.to_data(px), self.y.to_data(py))
    }

    /// Pixel size of the plot area covered by this viewport.
    #[must_use]
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.x.pixel_extent(), self.y.pixel_extent())
    }
}
