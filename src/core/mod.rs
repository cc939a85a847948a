pub mod graph;
pub mod layer;
pub mod series;
pub mod transform;
pub mod viewport;

pub use graph::{AutoFitTuning, Graph, YRangePolicy};
pub use layer::{
    BarLayer, BarStyle, GridLayer, GridStyle, Layer, LineLayer, LineStyle, SummaryLayer,
    SummaryStyle,
};
pub use series::{Sample, Series, datetime_to_unix_seconds};
pub use transform::{AxisOrientation, AxisTransform, AxisTuning};
pub use viewport::Viewport;
