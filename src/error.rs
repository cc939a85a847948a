use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid pixel extent: {extent}")]
    InvalidPixelExtent { extent: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("graph `{0}` already exists in this view")]
    DuplicateGraph(String),

    #[error("layer index {index} out of range (graph has {len} layers)")]
    LayerIndexOutOfRange { index: usize, len: usize },

    #[error("layer at index {index} does not accept that data kind")]
    LayerKindMismatch { index: usize },
}
