use thiserror::Error;

/// Top-level error type for the denting pipeline.
#[derive(Debug, Error)]
pub enum DentError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while validating input geometry. These abort the run.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate polygon {polygon}: {distinct} distinct vertices, at least 3 required")]
    DegeneratePolygon { polygon: usize, distinct: usize },

    #[error("{element} {index} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        element: &'static str,
        index: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("expected {expected} vertex normals, got {actual}")]
    NormalCountMismatch { expected: usize, actual: usize },

    #[error("transform matrix is not invertible")]
    NonInvertibleTransform,
}

/// Errors related to pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A per-vertex failure that is recovered locally.
///
/// The affected vertex is skipped and the run continues; failures are
/// collected into the [`DentReport`](crate::report::DentReport).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VertexFailure {
    #[error("vertex {vertex}: no overlapping hard vertex within radius {radius}")]
    NoOverlap { vertex: usize, radius: f64 },

    #[error("vertex {vertex}: projection ray did not hit the hard surface")]
    NoSurfaceHit { vertex: usize },
}

impl VertexFailure {
    /// Index of the soft vertex that was skipped.
    #[must_use]
    pub fn vertex(&self) -> usize {
        match *self {
            Self::NoOverlap { vertex, .. } | Self::NoSurfaceHit { vertex } => vertex,
        }
    }
}

/// Convenience type alias for results using [`DentError`].
pub type Result<T> = std::result::Result<T, DentError>;
