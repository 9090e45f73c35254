use thiserror::Error;

/// Top-level error type for the knotvis crate.
#[derive(Debug, Error)]
pub enum KnotvisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("knot vector has {actual} knots, expected {expected}")]
    KnotCountMismatch { expected: usize, actual: usize },

    #[error("knot vector decreases at index {index}")]
    DecreasingKnots { index: usize },

    #[error("control point index {index} is out of bounds (count {count})")]
    ControlPointIndex { index: usize, count: usize },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors related to frame rendering and output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`KnotvisError`].
pub type Result<T> = std::result::Result<T, KnotvisError>;
