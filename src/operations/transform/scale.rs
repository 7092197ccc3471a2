use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::math::{Matrix3, Point2, Vector2, EPSILON};

use super::GeneralTransform;

/// Scales a geometry about a center point, independently along each axis.
#[derive(Debug, Clone)]
pub struct Scale {
    center: Point2,
    factors: Vector2,
}

impl Scale {
    /// Creates a new `Scale` operation with per-axis factors.
    #[must_use]
    pub fn new(center: Point2, factor_x: f64, factor_y: f64) -> Self {
        Self {
            center,
            factors: Vector2::new(factor_x, factor_y),
        }
    }

    /// Creates a new `Scale` operation with the same factor on both axes.
    #[must_use]
    pub fn uniform(center: Point2, factor: f64) -> Self {
        Self::new(center, factor, factor)
    }

    /// Executes the scaling, returning a new geometry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the center or a factor is
    /// not finite, or a factor is zero.
    pub fn execute(&self, geometry: &Geometry) -> Result<Geometry> {
        if !self.center.iter().all(|v| v.is_finite())
            || !self.factors.iter().all(|v| v.is_finite())
        {
            return Err(
                OperationError::InvalidInput("scale parameters must be finite".into()).into(),
            );
        }
        if self.factors.iter().any(|v| v.abs() < EPSILON) {
            return Err(
                OperationError::InvalidInput("scale factors must be non-zero".into()).into(),
            );
        }

        let t_neg = Matrix3::new_translation(&(-self.center.coords));
        let scale = Matrix3::new_nonuniform_scaling(&self.factors);
        let t_pos = Matrix3::new_translation(&self.center.coords);
        GeneralTransform::new(t_pos * scale * t_neg).execute(geometry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_scale_about_center() {
        let g = Geometry::Rectangle(Rectangle::new(0.0, 0.0, 2.0, 2.0).unwrap());
        let out = Scale::uniform(Point2::new(1.0, 1.0), 2.0).execute(&g).unwrap();
        assert_eq!(
            out,
            Geometry::Rectangle(Rectangle::new(-1.0, -1.0, 3.0, 3.0).unwrap())
        );
    }

    #[test]
    fn negative_factor_flips_and_keeps_area() {
        let g = Geometry::Rectangle(Rectangle::new(0.0, 0.0, 2.0, 1.0).unwrap());
        let out = Scale::new(Point2::origin(), -1.0, 3.0).execute(&g).unwrap();
        let bounds = out.bounds().unwrap();
        assert_relative_eq!(bounds.min_x(), -2.0);
        assert_relative_eq!(bounds.max_y(), 3.0);
        assert_relative_eq!(out.area(), 6.0);
    }

    #[test]
    fn zero_factor_is_rejected() {
        let g = Geometry::Rectangle(Rectangle::new(0.0, 0.0, 2.0, 1.0).unwrap());
        assert!(Scale::new(Point2::origin(), 0.0, 1.0).execute(&g).is_err());
    }
}
