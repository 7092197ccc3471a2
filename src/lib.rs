pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod relation;

pub use error::{FlatgeoError, GeometryError, OperationError, Result};
pub use geometry::{
    Geometry, LineSegment, LineString, MultiGeometry, MultiPoint, Point, PointCollection,
    Polygon, Rectangle, RectangleBuilder,
};
pub use relation::Relation;
