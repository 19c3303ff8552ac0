use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("cluster count must be at least 1, got {0}")]
    InvalidClusterCount(u32),

    #[error("requested {requested} clusters but the image has only {distinct} distinct colors")]
    ClusterCountExceedsColors { requested: u32, distinct: usize },
}
