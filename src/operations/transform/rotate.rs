use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::math::{Matrix3, Point2};

use super::GeneralTransform;

/// Rotates a geometry counter-clockwise about a center point.
#[derive(Debug, Clone)]
pub struct Rotate {
    center: Point2,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians.
    #[must_use]
    pub fn new(center: Point2, angle: f64) -> Self {
        Self { center, angle }
    }

    /// Executes the rotation, returning a new geometry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the center or the angle is
    /// not finite.
    pub fn execute(&self, geometry: &Geometry) -> Result<Geometry> {
        if !self.angle.is_finite() || !self.center.iter().all(|v| v.is_finite()) {
            return Err(
                OperationError::InvalidInput("rotation parameters must be finite".into()).into(),
            );
        }

        // Translate to origin, rotate, translate back
        let t_neg = Matrix3::new_translation(&(-self.center.coords));
        let rot = Matrix3::new_rotation(self.angle);
        let t_pos = Matrix3::new_translation(&self.center.coords);
        GeneralTransform::new(t_pos * rot * t_neg).execute(geometry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::geometry::{LineSegment, Rectangle};
    use approx::assert_relative_eq;

    #[test]
    fn rotate_segment_90_about_origin() {
        let g = Geometry::LineSegment(LineSegment::new(1.0, 0.0, 2.0, 0.0).unwrap());
        let Geometry::LineSegment(s) = Rotate::new(Point2::origin(), FRAC_PI_2).execute(&g).unwrap()
        else {
            panic!("expected segment");
        };
        assert_relative_eq!(s.start().x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.start().y(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(s.end().y(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn tilted_rectangle_becomes_polygon() {
        let g = Geometry::Rectangle(Rectangle::new(0.0, 0.0, 2.0, 2.0).unwrap());
        let out = Rotate::new(Point2::new(1.0, 1.0), FRAC_PI_4).execute(&g).unwrap();
        assert!(matches!(out, Geometry::Polygon(_)));
        assert_relative_eq!(out.area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_angle_is_rejected() {
        let g = Geometry::Rectangle(Rectangle::new(0.0, 0.0, 2.0, 2.0).unwrap());
        assert!(Rotate::new(Point2::origin(), f64::INFINITY).execute(&g).is_err());
    }
}
