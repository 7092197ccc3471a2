use std::collections::HashSet;

use tracing::trace;

use crate::math::ords::sanitize_accuracy;
use crate::math::Point2;

/// Grid clustering of an unordered point set.
///
/// The plane is cut into square cells of side `accuracy`; a point falls in
/// the cell `(round(x / accuracy), round(y / accuracy))`. One representative
/// per occupied cell is kept: the cell's quantized coordinate
/// `(col * accuracy, row * accuracy)`, not the centroid of its members, so
/// the output is reproducible and clustering it again changes nothing.
/// Cells are emitted in order of first occupation.
#[derive(Debug)]
pub struct GridCluster<'a> {
    points: &'a [Point2],
    accuracy: f64,
}

impl<'a> GridCluster<'a> {
    /// Creates a new clustering over `points`.
    #[must_use]
    pub fn new(points: &'a [Point2], accuracy: f64) -> Self {
        Self {
            points,
            accuracy: sanitize_accuracy(accuracy),
        }
    }

    /// Executes the clustering. With a zero accuracy the input is returned
    /// unchanged.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        if self.accuracy <= 0.0 {
            return self.points.to_vec();
        }
        let mut occupied = HashSet::with_capacity(self.points.len());
        let mut clustered = Vec::new();
        for p in self.points {
            let col = (p.x / self.accuracy).round();
            let row = (p.y / self.accuracy).round();
            let quantized = Point2::new(col * self.accuracy, row * self.accuracy);
            // Cells beyond the f64 range cannot be told apart, so such
            // points are keyed and kept by their own coordinates.
            let (cell, kept) = if quantized.x.is_finite() && quantized.y.is_finite() {
                (CellKey::Grid(ord_bits(col), ord_bits(row)), quantized)
            } else {
                (CellKey::Exact(ord_bits(p.x), ord_bits(p.y)), *p)
            };
            if occupied.insert(cell) {
                clustered.push(kept);
            }
        }
        trace!(
            before = self.points.len(),
            after = clustered.len(),
            accuracy = self.accuracy,
            "grid cluster"
        );
        clustered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CellKey {
    Grid(u64, u64),
    Exact(u64, u64),
}

/// Bit pattern of an ordinate with `-0.0` folded onto `0.0`.
fn ord_bits(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn nearby_points_share_a_cell() {
        let input = pts(&[(0.1, 0.1), (0.2, -0.1), (5.0, 5.0), (5.1, 4.9)]);
        let out = GridCluster::new(&input, 1.0).execute();
        assert_eq!(out, pts(&[(0.0, 0.0), (5.0, 5.0)]));
    }

    #[test]
    fn representative_is_quantized_cell() {
        let input = pts(&[(2.4, 3.6)]);
        let out = GridCluster::new(&input, 2.0).execute();
        assert_eq!(out, pts(&[(2.0, 4.0)]));
    }

    #[test]
    fn clustering_is_idempotent() {
        let input = pts(&[(0.3, 0.1), (1.9, 2.2), (2.1, 1.8), (-4.4, 7.7)]);
        let once = GridCluster::new(&input, 0.5).execute();
        let twice = GridCluster::new(&once, 0.5).execute();
        assert_eq!(once, twice);
    }

    #[test]
    fn huge_cell_indices_stay_distinct() {
        let input = pts(&[(1e10, 0.0), (2e10, 0.0), (-3e10, 5.0)]);
        let out = GridCluster::new(&input, 1e-10).execute();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn overflowing_cells_keep_their_points() {
        let input = pts(&[(1e300, 0.0), (1.5e300, 0.0), (1e300, 0.0)]);
        let out = GridCluster::new(&input, 1e-300).execute();
        assert_eq!(out, pts(&[(1e300, 0.0), (1.5e300, 0.0)]));
    }

    #[test]
    fn negative_zero_shares_the_origin_cell() {
        let input = pts(&[(-0.1, -0.1), (0.1, 0.1)]);
        let out = GridCluster::new(&input, 1.0).execute();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn zero_accuracy_is_identity() {
        let input = pts(&[(0.3, 0.1), (0.3, 0.1)]);
        assert_eq!(GridCluster::new(&input, 0.0).execute(), input);
    }
}
