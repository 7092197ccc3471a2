use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::math::{Matrix3, Vector2};

use super::GeneralTransform;

/// Translates a geometry by a displacement vector.
#[derive(Debug, Clone)]
pub struct Translate {
    displacement: Vector2,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector2) -> Self {
        Self { displacement }
    }

    /// Executes the translation, returning a new geometry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the displacement is not
    /// finite.
    pub fn execute(&self, geometry: &Geometry) -> Result<Geometry> {
        if !self.displacement.iter().all(|v| v.is_finite()) {
            return Err(
                OperationError::InvalidInput("displacement must be finite".into()).into(),
            );
        }
        GeneralTransform::new(Matrix3::new_translation(&self.displacement)).execute(geometry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};

    #[test]
    fn translate_polygon_keeps_area() {
        let g = Geometry::Polygon(
            Polygon::from_ring_ords(vec![0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 0.0, 0.0]).unwrap(),
        );
        let out = Translate::new(Vector2::new(10.0, 10.0)).execute(&g).unwrap();
        assert_eq!(out.bounds().unwrap().min(), crate::math::Point2::new(10.0, 10.0));
        assert!((out.area() - g.area()).abs() < 1e-12);
    }

    #[test]
    fn translate_line_string() {
        let g = Geometry::LineString(LineString::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap());
        let out = Translate::new(Vector2::new(1.0, 2.0)).execute(&g).unwrap();
        assert_eq!(
            out,
            Geometry::LineString(LineString::new(vec![1.0, 2.0, 2.0, 2.0, 2.0, 3.0]).unwrap())
        );
    }

    #[test]
    fn non_finite_displacement_is_rejected() {
        let g = Geometry::LineString(LineString::new(vec![0.0, 0.0, 1.0, 0.0]).unwrap());
        assert!(Translate::new(Vector2::new(f64::NAN, 0.0)).execute(&g).is_err());
    }
}
