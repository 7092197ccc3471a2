use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::math::{Matrix3, Point2, Vector2, EPSILON};

use super::GeneralTransform;

/// Mirrors a geometry across a line given by a point and a direction.
#[derive(Debug, Clone)]
pub struct Mirror {
    line_origin: Point2,
    line_direction: Vector2,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(line_origin: Point2, line_direction: Vector2) -> Self {
        Self {
            line_origin,
            line_direction,
        }
    }

    /// Executes the reflection, returning a new geometry.
    ///
    /// Orientation flips, so rings are reversed by any later
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the line is not finite or
    /// its direction is zero-length.
    pub fn execute(&self, geometry: &Geometry) -> Result<Geometry> {
        if !self.line_origin.iter().all(|v| v.is_finite())
            || !self.line_direction.iter().all(|v| v.is_finite())
        {
            return Err(
                OperationError::InvalidInput("mirror line must be finite".into()).into(),
            );
        }
        let len = self.line_direction.norm();
        if len < EPSILON {
            return Err(
                OperationError::InvalidInput("mirror direction must be non-zero".into()).into(),
            );
        }
        let d = self.line_direction / len;

        let t_neg = Matrix3::new_translation(&(-self.line_origin.coords));
        let reflect = reflection_matrix(&d);
        let t_pos = Matrix3::new_translation(&self.line_origin.coords);
        GeneralTransform::new(t_pos * reflect * t_neg).execute(geometry)
    }
}

/// Reflection across the line through the origin along unit vector `d`.
fn reflection_matrix(d: &Vector2) -> Matrix3 {
    let (x, y) = (d.x, d.y);
    #[rustfmt::skip]
    let m = Matrix3::new(
        2.0 * x * x - 1.0, 2.0 * x * y,       0.0,
        2.0 * x * y,       2.0 * y * y - 1.0, 0.0,
        0.0,               0.0,               1.0,
    );
    m
}
