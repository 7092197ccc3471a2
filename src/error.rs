use thiserror::Error;

/// Top-level error type for the flatgeo kernel.
#[derive(Debug, Error)]
pub enum FlatgeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing a geometry value.
///
/// Invalid geometries are never constructible, so every variant is reported
/// at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("ordinate count {0} is not a whole number of points")]
    OddOrdinateCount(usize),

    #[error("{kind} requires at least {min} points, got {actual}")]
    TooFewPoints {
        kind: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("ring is not closed")]
    RingNotClosed,

    #[error("invalid bounds ({min_x}, {min_y}) - ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to operation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`FlatgeoError`].
pub type Result<T> = std::result::Result<T, FlatgeoError>;
