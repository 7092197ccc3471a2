pub mod distance_2d;
pub mod intersect_2d;
pub mod ords;
pub mod polygon_2d;

/// 2D point type used by the numeric helpers.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix for 2D affine maps.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Guard for divisions by near-zero lengths and cross products.
///
/// This is a numeric floor, not a geometric tolerance; geometric tolerance is
/// always the caller-supplied `accuracy`.
pub const EPSILON: f64 = 1e-12;
