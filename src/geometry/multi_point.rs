use tracing::debug;

use crate::error::Result;
use crate::math::ords::sanitize_accuracy;
use crate::operations::simplify::GridCluster;
use crate::relation::Relation;

use super::{Geometry, Point, PointCollection, Rectangle};

/// An unordered set of points.
///
/// Input order is kept as given; [`MultiPoint::normalize`] yields the
/// canonical sorted form used for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    points: PointCollection,
}

impl MultiPoint {
    /// Creates a multi-point from flattened ordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the ordinates are empty, odd in number or
    /// non-finite.
    pub fn new(ords: Vec<f64>) -> Result<Self> {
        Ok(Self {
            points: PointCollection::new(ords)?,
        })
    }

    /// Creates a multi-point from points.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        Ok(Self {
            points: PointCollection::from_points(points)?,
        })
    }

    #[must_use]
    pub fn from_collection(points: PointCollection) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &PointCollection {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a multi-point holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter()
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.points.bounds()
    }

    /// Point sets carry no structural constraint beyond construction.
    #[must_use]
    pub fn is_valid(&self, _accuracy: f64) -> bool {
        true
    }

    /// Sorted by x then y with exact duplicates removed. A single remaining
    /// point is returned as a bare `Point`.
    #[must_use]
    pub fn normalize(&self) -> Geometry {
        let mut points: Vec<Point> = self.points.sorted().iter().collect();
        points.dedup();
        match points.as_slice() {
            [p] => Geometry::Point(*p),
            _ => Geometry::MultiPoint(Self {
                points: PointCollection::from_point2s(
                    &points.iter().map(|p| p.to_point2()).collect::<Vec<_>>(),
                ),
            }),
        }
    }

    /// Grid-clusters the points under `accuracy`.
    ///
    /// A collection whose bounds collapse becomes its centroid; when
    /// clustering removes nothing the receiver is returned unchanged.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        let accuracy = sanitize_accuracy(accuracy);
        let bounds = self.bounds();
        if bounds.is_collapsible(accuracy) {
            return Geometry::Point(bounds.centroid());
        }
        let input = self.points.to_point2s();
        let clustered = GridCluster::new(&input, accuracy).execute();
        if clustered.len() == input.len() {
            return Geometry::MultiPoint(self.clone());
        }
        debug!(
            before = input.len(),
            after = clustered.len(),
            "multi-point clustered"
        );
        match clustered.as_slice() {
            [p] => Geometry::Point(Point::from_finite(p.x, p.y)),
            _ => Geometry::MultiPoint(Self {
                points: PointCollection::from_point2s(&clustered),
            }),
        }
    }

    /// Relation of this set (A) to a point (B).
    #[must_use]
    pub fn relate_point(&self, p: &Point, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        let bounds = self.bounds();
        if bounds.is_collapsible(accuracy) {
            return bounds.centroid().relate_point(p, accuracy);
        }
        self.iter().fold(Relation::fold_start(), |acc, member| {
            acc.fold_member(member.relate_point(p, accuracy))
        })
    }

    /// Relation of this set (A) to a rectangle (B).
    #[must_use]
    pub fn relate_rectangle(&self, r: &Rectangle, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        let bounds = self.bounds();
        if bounds.is_collapsible(accuracy) {
            return r.relate_point(&bounds.centroid(), accuracy).flip_ab();
        }
        self.iter().fold(Relation::fold_start(), |acc, member| {
            acc.fold_member(r.relate_point(&member, accuracy).flip_ab())
        })
    }

    /// Applies a coordinate mapping to every point.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping yields non-finite coordinates.
    pub fn transform<F>(&self, mapper: F) -> Result<MultiPoint>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        Ok(Self {
            points: self.points.transform(mapper)?,
        })
    }
}
