//! The synchronization authority: one shared x transform drives every graph.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{AxisOrientation, AxisTransform, Graph, Series};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{EventOutcome, InputEvent, InteractionController, InteractionMode};
use crate::render::{GraphFrame, RenderFrame};

const DEFAULT_VIEW_WIDTH_PX: f64 = 800.0;
const HISTORY_CAPACITY: usize = 64;

/// Ordered collection of stacked graphs sharing synchronized pan/zoom over
/// one x axis.
///
/// The view owns the shared x transform's lifecycle: it is created when the
/// first graph with data arrives, its domain grows to the union of member
/// extents, and it never contracts except on an explicit reset. Graphs read
/// the transform during rendering; every mutation routes through the view.
#[derive(Debug, Clone)]
pub struct GraphView {
    title: String,
    graphs: IndexMap<String, Graph>,
    shared_x: Option<AxisTransform>,
    pixel_width: f64,
    controller: InteractionController,
    history: Vec<(f64, f64)>,
    history_position: usize,
}

impl GraphView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            graphs: IndexMap::new(),
            shared_x: None,
            pixel_width: DEFAULT_VIEW_WIDTH_PX,
            controller: InteractionController::default(),
            history: Vec::new(),
            history_position: 0,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    #[must_use]
    pub fn graph_names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    pub fn graph_mut(&mut self, name: &str) -> Option<&mut Graph> {
        self.graphs.get_mut(name)
    }

    /// Read-only access to the shared transform. `None` until a graph with
    /// data has been added.
    #[must_use]
    pub fn x_transform(&self) -> Option<&AxisTransform> {
        self.shared_x.as_ref()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    pub fn interaction_controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    /// Adds a graph, expanding the shared domain to the union of extents.
    ///
    /// The first graph with data initializes the shared transform with its
    /// view window covering the full domain. Later additions expand the
    /// domain; an existing narrower view window is left untouched, while a
    /// view that covered the full domain keeps tracking it.
    pub fn add_graph(&mut self, name: impl Into<String>, graph: Graph) -> PlotResult<()> {
        let name = name.into();
        if self.graphs.contains_key(&name) {
            return Err(PlotError::DuplicateGraph(name));
        }
        let extent = graph.x_extent();
        self.graphs.insert(name.clone(), graph);
        if let Some((min, max)) = extent {
            self.union_shared_domain(min, max)?;
        }
        debug!(graph = %name, "graph added");
        Ok(())
    }

    /// Removes and returns a graph. The shared domain is not contracted.
    pub fn remove_graph(&mut self, name: &str) -> Option<Graph> {
        let removed = self.graphs.shift_remove(name);
        if removed.is_some() {
            debug!(graph = %name, "graph removed");
        }
        removed
    }

    /// Swaps a series on a member graph's layer, then re-unions the domain.
    pub fn set_graph_series(
        &mut self,
        graph_name: &str,
        layer_index: usize,
        series: Arc<Series>,
    ) -> PlotResult<()> {
        let graph = self
            .graphs
            .get_mut(graph_name)
            .ok_or_else(|| PlotError::InvalidData(format!("no graph named `{graph_name}`")))?;
        graph.set_series(layer_index, series)?;
        if let Some((min, max)) = graph.x_extent() {
            self.union_shared_domain(min, max)?;
        }
        Ok(())
    }

    fn union_shared_domain(&mut self, min: f64, max: f64) -> PlotResult<()> {
        match &mut self.shared_x {
            Some(shared) => shared.expand_domain(min, max)?,
            None => {
                let shared =
                    AxisTransform::new(min, max, self.pixel_width, AxisOrientation::Horizontal)?;
                self.history.clear();
                self.history.push(shared.view());
                self.history_position = 0;
                self.shared_x = Some(shared);
            }
        }
        Ok(())
    }

    /// Builds the scene for every visible graph against one consistent
    /// snapshot of the shared transform.
    ///
    /// Graphs are independent during the pass (no shared mutable state is
    /// written), so frame construction is parallelized across graphs when
    /// the `parallel-render` feature is enabled.
    pub fn render(&mut self) -> PlotResult<RenderFrame> {
        let Some(shared) = self.shared_x else {
            return Ok(RenderFrame {
                title: self.title.clone(),
                pixel_width: self.pixel_width,
                graphs: Vec::new(),
            });
        };

        let graphs = self.build_graph_frames(&shared)?;
        trace!(graphs = graphs.len(), "render pass");
        Ok(RenderFrame {
            title: self.title.clone(),
            pixel_width: self.pixel_width,
            graphs,
        })
    }

    #[cfg(not(feature = "parallel-render"))]
    fn build_graph_frames(&mut self, shared: &AxisTransform) -> PlotResult<Vec<GraphFrame>> {
        let mut frames = Vec::with_capacity(self.graphs.len());
        for (name, graph) in &mut self.graphs {
            if graph.is_visible() {
                frames.push(graph.build_frame(name, shared)?);
            }
        }
        Ok(frames)
    }

    #[cfg(feature = "parallel-render")]
    fn build_graph_frames(&mut self, shared: &AxisTransform) -> PlotResult<Vec<GraphFrame>> {
        use rayon::prelude::*;

        let mut entries: Vec<(&String, &mut Graph)> = self
            .graphs
            .iter_mut()
            .filter(|(_, graph)| graph.is_visible())
            .collect();
        entries
            .par_iter_mut()
            .map(|(name, graph)| graph.build_frame(name.as_str(), shared))
            .collect()
    }

    /// Routes one input event through the gesture machine.
    ///
    /// Any outcome that mutated the shared transform requires the host to
    /// re-render every graph in the view; committed window changes land in
    /// the navigation history once the gesture settles.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let Some(shared) = self.shared_x.as_mut() else {
            return EventOutcome {
                transform_changed: false,
                mode: self.controller.mode(),
            };
        };

        let mode_before = self.controller.mode();
        let outcome = self.controller.handle_event(event, shared);

        let gesture_settled =
            mode_before != InteractionMode::Idle && outcome.mode == InteractionMode::Idle;
        let discrete_change =
            outcome.transform_changed && outcome.mode == InteractionMode::Idle;
        if gesture_settled || discrete_change {
            self.record_window();
        }
        outcome
    }

    /// Assigns the visible window directly (selection zoom, programmatic
    /// navigation). Returns `true` when the window changed.
    pub fn set_x_view(&mut self, min: f64, max: f64) -> bool {
        let Some(shared) = self.shared_x.as_mut() else {
            return false;
        };
        let changed = shared.set_view(min, max);
        if changed {
            self.record_window();
        }
        changed
    }

    /// Pans the shared window by a pixel delta. Affects all graphs.
    pub fn pan(&mut self, delta_pixels: f64) -> bool {
        let Some(shared) = self.shared_x.as_mut() else {
            return false;
        };
        let changed = shared.pan(delta_pixels);
        if changed {
            self.record_window();
        }
        changed
    }

    /// Zooms the shared window around a pixel anchor. Affects all graphs.
    pub fn zoom(&mut self, anchor_pixel: f64, factor: f64) -> bool {
        let Some(shared) = self.shared_x.as_mut() else {
            return false;
        };
        let changed = shared.zoom(anchor_pixel, factor);
        if changed {
            self.record_window();
        }
        changed
    }

    /// Recomputes the shared domain from scratch over all member graphs and
    /// resets the view to cover it. The one place the domain may contract.
    pub fn reset_view(&mut self) -> PlotResult<()> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for graph in self.graphs.values() {
            if let Some((graph_min, graph_max)) = graph.x_extent() {
                min = min.min(graph_min);
                max = max.max(graph_max);
            }
        }
        if min > max {
            self.shared_x = None;
            self.history.clear();
            self.history_position = 0;
            return Ok(());
        }
        match &mut self.shared_x {
            Some(shared) => shared.reset_domain(min, max)?,
            None => {
                self.shared_x = Some(AxisTransform::new(
                    min,
                    max,
                    self.pixel_width,
                    AxisOrientation::Horizontal,
                )?);
            }
        }
        self.record_window();
        Ok(())
    }

    /// Steps back in the navigation history. Returns `true` on success.
    pub fn history_back(&mut self) -> bool {
        if self.history_position == 0 {
            return false;
        }
        self.history_position -= 1;
        self.apply_history_entry()
    }

    /// Steps forward in the navigation history. Returns `true` on success.
    pub fn history_forward(&mut self) -> bool {
        if self.history_position + 1 >= self.history.len() {
            return false;
        }
        self.history_position += 1;
        self.apply_history_entry()
    }

    fn apply_history_entry(&mut self) -> bool {
        let Some(shared) = self.shared_x.as_mut() else {
            return false;
        };
        let (min, max) = self.history[self.history_position];
        // Applied without re-recording; the position pointer already moved.
        shared.set_view(min, max);
        true
    }

    fn record_window(&mut self) {
        let Some(shared) = self.shared_x.as_ref() else {
            return;
        };
        let window = shared.view();
        if self.history.get(self.history_position) == Some(&window) {
            return;
        }
        // A new committed window discards the forward branch.
        self.history.truncate(self.history_position + 1);
        self.history.push(window);
        if self.history.len() > HISTORY_CAPACITY {
            self.history.remove(0);
        }
        self.history_position = self.history.len() - 1;
    }

    /// Updates the horizontal pixel extent; the visible data window is
    /// unchanged.
    pub fn resize(&mut self, pixel_width: f64) -> PlotResult<()> {
        if !pixel_width.is_finite() || pixel_width <= 0.0 {
            return Err(PlotError::InvalidPixelExtent {
                extent: pixel_width,
            });
        }
        if let Some(shared) = self.shared_x.as_mut() {
            shared.resize(pixel_width)?;
        }
        self.pixel_width = pixel_width;
        Ok(())
    }

    /// Resizes one graph's vertical pixel extent.
    pub fn set_graph_height(&mut self, name: &str, pixel_height: f64) -> PlotResult<()> {
        let graph = self
            .graphs
            .get_mut(name)
            .ok_or_else(|| PlotError::InvalidData(format!("no graph named `{name}`")))?;
        graph.set_height(pixel_height)
    }
}
