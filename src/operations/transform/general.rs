use crate::error::{OperationError, Result};
use crate::geometry::Geometry;
use crate::math::{Matrix3, Point2, EPSILON};

/// Applies an arbitrary 3x3 homogeneous affine matrix to a geometry.
#[derive(Debug, Clone)]
pub struct GeneralTransform {
    matrix: Matrix3,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix3) -> Self {
        Self { matrix }
    }

    /// The matrix this operation applies.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Executes the transformation, returning a new geometry.
    ///
    /// Every vertex is mapped through the matrix; rectangles that stay
    /// axis-aligned remain rectangles, others become polygons.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the matrix has non-finite
    /// entries, is not affine, or is singular. Returns a geometry error if
    /// the mapped geometry is degenerate.
    pub fn execute(&self, geometry: &Geometry) -> Result<Geometry> {
        validate_matrix(&self.matrix)?;
        geometry.transform(|x, y| {
            let p = self.matrix.transform_point(&Point2::new(x, y));
            (p.x, p.y)
        })
    }
}

fn validate_matrix(m: &Matrix3) -> Result<()> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(OperationError::InvalidInput("matrix has non-finite entries".into()).into());
    }
    #[allow(clippy::float_cmp)]
    let affine = m[(2, 0)] == 0.0 && m[(2, 1)] == 0.0 && m[(2, 2)] == 1.0;
    if !affine {
        return Err(OperationError::InvalidInput("matrix is not affine".into()).into());
    }
    if m.fixed_view::<2, 2>(0, 0).determinant().abs() < EPSILON {
        return Err(OperationError::InvalidInput("matrix is singular".into()).into());
    }
    Ok(())
}
