use std::sync::OnceLock;

use crate::error::{GeometryError, Result};
use crate::math::ords::{compare_coords, is_finite_coord};
use crate::math::Point2;

use super::{Point, Rectangle, RectangleBuilder};

/// A non-empty sequence of points stored as flattened ordinates
/// (`x, y, x, y, ...`).
///
/// Bounds are computed on first use and cached on the instance.
#[derive(Debug, Clone)]
pub struct PointCollection {
    ords: Vec<f64>,
    bounds: OnceLock<Rectangle>,
}

impl PointCollection {
    /// Creates a collection from flattened ordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::OddOrdinateCount` if the ordinates do not pair
    /// up, `GeometryError::TooFewPoints` if empty, and
    /// `GeometryError::NonFinite` for NaN or infinite values.
    pub fn new(ords: Vec<f64>) -> Result<Self> {
        if ords.len() % 2 != 0 {
            return Err(GeometryError::OddOrdinateCount(ords.len()).into());
        }
        if ords.is_empty() {
            return Err(GeometryError::TooFewPoints {
                kind: "point collection",
                min: 1,
                actual: 0,
            }
            .into());
        }
        if let Some(pair) = ords.chunks_exact(2).find(|c| !is_finite_coord(c[0], c[1])) {
            return Err(GeometryError::NonFinite {
                x: pair[0],
                y: pair[1],
            }
            .into());
        }
        Ok(Self::from_valid(ords))
    }

    /// Creates a collection from points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` if `points` is empty.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        Self::new(points.iter().flat_map(|p| [p.x(), p.y()]).collect())
    }

    pub(crate) fn from_valid(ords: Vec<f64>) -> Self {
        debug_assert!(!ords.is_empty() && ords.len() % 2 == 0);
        Self {
            ords,
            bounds: OnceLock::new(),
        }
    }

    pub(crate) fn from_point2s(points: &[Point2]) -> Self {
        Self::from_valid(points.iter().flat_map(|p| [p.x, p.y]).collect())
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ords.len() / 2
    }

    /// Always `false`: collections hold at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ords.is_empty()
    }

    /// Flattened ordinates.
    #[must_use]
    pub fn ordinates(&self) -> &[f64] {
        &self.ords
    }

    /// Point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn point(&self, index: usize) -> Point {
        Point::from_finite(self.ords[2 * index], self.ords[2 * index + 1])
    }

    #[must_use]
    pub fn first(&self) -> Point {
        self.point(0)
    }

    #[must_use]
    pub fn last(&self) -> Point {
        self.point(self.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.ords.chunks_exact(2).map(|c| Point::from_finite(c[0], c[1]))
    }

    #[must_use]
    pub fn to_point2s(&self) -> Vec<Point2> {
        self.ords
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect()
    }

    /// Bounds of all points (cached).
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        *self.bounds.get_or_init(|| {
            let mut builder = RectangleBuilder::new();
            for c in self.ords.chunks_exact(2) {
                builder.union(c[0], c[1]);
            }
            builder
                .build()
                .unwrap_or_else(|| Rectangle::from_corners(self.first(), self.first()))
        })
    }

    /// The same points in opposite order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let ords = self.ords.chunks_exact(2).rev().flatten().copied().collect();
        Self::from_valid(ords)
    }

    /// The points sorted canonically (x, then y).
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut pairs: Vec<[f64; 2]> = self.ords.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
        pairs.sort_by(|a, b| compare_coords(a[0], a[1], b[0], b[1]));
        Self::from_valid(pairs.into_iter().flatten().collect())
    }

    /// Applies a coordinate mapping to every point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if the mapping yields a non-finite coordinate.
    pub fn transform<F>(&self, mapper: F) -> Result<Self>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        let mut ords = Vec::with_capacity(self.ords.len());
        for p in self.iter() {
            let q = p.transform(&mapper)?;
            ords.push(q.x());
            ords.push(q.y());
        }
        Ok(Self::from_valid(ords))
    }
}

impl PartialEq for PointCollection {
    fn eq(&self, other: &Self) -> bool {
        self.ords == other.ords
    }
}
