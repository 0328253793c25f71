/// Error type for fixed_nn
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input data or a switch value has the wrong shape or type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Indicates some dimension is incorrect in a layer computation.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Display error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
