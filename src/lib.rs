//! stackplot: interactive stacked-graph charting core.
//!
//! A `GraphView` stacks multiple graphs over one shared, synchronized x
//! axis; each graph renders through an ordered layer stack into
//! backend-agnostic drawing primitives. The crate owns the transform math,
//! the gesture state machine, and summary-statistics computation; painting
//! pixels is left to a host-provided `Renderer`.

pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod summary;
pub mod telemetry;
pub mod view;

pub use crate::core::{
    AxisOrientation, AxisTransform, AxisTuning, Graph, Layer, Sample, Series, Viewport,
    YRangePolicy,
};
pub use crate::error::{PlotError, PlotResult};
pub use crate::view::GraphView;
