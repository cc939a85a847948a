use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::layer::Layer;
use crate::core::series::Series;
use crate::core::transform::{AxisOrientation, AxisTransform};
use crate::core::viewport::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::GraphFrame;
use crate::summary::SummaryBand;

/// Tuning for the auto-fit y-range policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoFitTuning {
    /// Fraction of the fitted range added as padding on each side.
    pub padding_ratio: f64,
}

impl Default for AutoFitTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
        }
    }
}

impl AutoFitTuning {
    fn validate(self) -> PlotResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(PlotError::InvalidData(
                "auto-fit padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// How a graph derives its y range on each render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YRangePolicy {
    /// Range never changes once set.
    Fixed { min: f64, max: f64 },
    /// Range follows the data visible in the current shared x window.
    AutoFitVisible(AutoFitTuning),
}

impl Default for YRangePolicy {
    fn default() -> Self {
        Self::AutoFitVisible(AutoFitTuning::default())
    }
}

const DEFAULT_GRAPH_HEIGHT_PX: f64 = 150.0;

/// One stacked plot area: an ordered layer stack sharing a single viewport.
///
/// The graph owns its y transform; the x transform is shared across the view
/// and only borrowed for the duration of a render pass.
#[derive(Debug, Clone)]
pub struct Graph {
    title: String,
    y_label: String,
    layers: Vec<Layer>,
    y_policy: YRangePolicy,
    y_transform: AxisTransform,
    visible: bool,
}

impl Graph {
    pub fn new(title: impl Into<String>) -> Self {
        let y_transform = AxisTransform::unit(DEFAULT_GRAPH_HEIGHT_PX, AxisOrientation::Vertical);
        Self {
            title: title.into(),
            y_label: String::new(),
            layers: Vec::new(),
            y_policy: YRangePolicy::default(),
            y_transform,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_y_policy(mut self, policy: YRangePolicy) -> PlotResult<Self> {
        self.set_y_range_policy(policy)?;
        Ok(self)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn y_policy(&self) -> YRangePolicy {
        self.y_policy
    }

    #[must_use]
    pub fn y_transform(&self) -> &AxisTransform {
        &self.y_transform
    }

    /// Direct access for per-graph y interaction. Mutations here affect only
    /// this graph and never propagate to the shared x transform.
    pub fn y_transform_mut(&mut self) -> &mut AxisTransform {
        &mut self.y_transform
    }

    /// Appends a layer on top of the existing stack (z-order = list order).
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        (index < self.layers.len()).then(|| self.layers.remove(index))
    }

    pub fn set_y_range_policy(&mut self, policy: YRangePolicy) -> PlotResult<()> {
        match policy {
            YRangePolicy::Fixed { min, max } => {
                if !min.is_finite() || !max.is_finite() || max <= min {
                    return Err(PlotError::InvalidData(
                        "fixed y range must be finite with max > min".to_owned(),
                    ));
                }
                self.y_transform.reset_domain(min, max)?;
            }
            YRangePolicy::AutoFitVisible(tuning) => {
                tuning.validate()?;
            }
        }
        self.y_policy = policy;
        Ok(())
    }

    /// Replaces the series of the layer at `index` by reference swap.
    pub fn set_series(&mut self, index: usize, series: Arc<Series>) -> PlotResult<()> {
        let len = self.layers.len();
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(PlotError::LayerIndexOutOfRange { index, len })?;
        if !layer.set_series(series) {
            return Err(PlotError::LayerKindMismatch { index });
        }
        Ok(())
    }

    /// Replaces the bands of the summary layer at `index` wholesale.
    pub fn set_summary_bands(
        &mut self,
        index: usize,
        bands: Arc<Vec<SummaryBand>>,
    ) -> PlotResult<()> {
        let len = self.layers.len();
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(PlotError::LayerIndexOutOfRange { index, len })?;
        if !layer.set_bands(bands) {
            return Err(PlotError::LayerKindMismatch { index });
        }
        Ok(())
    }

    /// Union x extent of all layer data, `None` when the graph has no data.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for layer in &self.layers {
            if let Some((layer_min, layer_max)) = layer.x_extent() {
                min = min.min(layer_min);
                max = max.max(layer_max);
            }
        }
        (min <= max).then_some((min, max))
    }

    pub fn set_height(&mut self, pixel_height: f64) -> PlotResult<()> {
        self.y_transform.resize(pixel_height)
    }

    /// Builds this graph's scene for one render pass.
    ///
    /// Refreshes the y transform per policy against the shared visible
    /// window, snapshots a viewport, then collects layer primitives in
    /// z-order. The shared transform is read, never written.
    pub fn build_frame(&mut self, name: &str, shared_x: &AxisTransform) -> PlotResult<GraphFrame> {
        self.refresh_y_range(shared_x.view())?;
        let viewport = Viewport::new(*shared_x, self.y_transform);
        let layers = self
            .layers
            .iter()
            .map(|layer| layer.primitives(&viewport))
            .collect();
        Ok(GraphFrame {
            graph_name: name.to_owned(),
            title: self.title.clone(),
            y_label: self.y_label.clone(),
            viewport,
            layers,
        })
    }

    /// Applies the y-range policy for the given visible x window.
    fn refresh_y_range(&mut self, (window_start, window_end): (f64, f64)) -> PlotResult<()> {
        let YRangePolicy::AutoFitVisible(tuning) = self.y_policy else {
            return Ok(());
        };

        let visible = self.combined_y_extent(|layer| {
            layer.y_extent_in_window(window_start, window_end)
        });
        // Zero visible points: fall back to the full-domain y extent rather
        // than producing a degenerate transform.
        let extent = visible.or_else(|| self.combined_y_extent(Layer::y_extent));
        let Some((mut min, mut max)) = extent else {
            return Ok(());
        };

        let range = max - min;
        if range > 0.0 {
            min -= range * tuning.padding_ratio;
            max += range * tuning.padding_ratio;
        }
        debug!(graph = %self.title, y_min = min, y_max = max, "auto-fit y range");
        self.y_transform.reset_domain(min, max)
    }

    fn combined_y_extent(
        &self,
        extent_of: impl Fn(&Layer) -> Option<(f64, f64)>,
    ) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for layer in &self.layers {
            if let Some((layer_min, layer_max)) = extent_of(layer) {
                min = min.min(layer_min);
                max = max.max(layer_max);
            }
        }
        (min <= max).then_some((min, max))
    }
}
