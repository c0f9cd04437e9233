use thiserror::Error;

/// Top-level error type for the hidline crate.
#[derive(Debug, Error)]
pub enum HidlineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to mesh data handed to a projection pass.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("edge {edge} references vertex {vertex}, but the mesh has {count} vertices")]
    VertexOutOfRange {
        edge: usize,
        vertex: usize,
        count: usize,
    },

    #[error("edge {0} connects a vertex to itself")]
    SelfLoop(usize),

    #[error("triangle {triangle} references vertex {vertex}, but the mesh has {count} vertices")]
    TriangleVertexOutOfRange {
        triangle: usize,
        vertex: usize,
        count: usize,
    },

    #[error("{display} display points but {world} world points")]
    PointCountMismatch { display: usize, world: usize },
}

/// Errors related to projection parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("parameter {parameter} = {value} must be finite and positive")]
    NotPositive { parameter: &'static str, value: f64 },
}

/// Convenience type alias for results using [`HidlineError`].
pub type Result<T> = std::result::Result<T, HidlineError>;
