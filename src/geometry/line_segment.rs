use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{perpendicular_distance, point_to_segment_dist};
use crate::math::intersect_2d::{point_at, segment_segment_intersect_2d, SegmentIntersection};
use crate::math::ords::sanitize_accuracy;
use crate::math::Point2;
use crate::relation::Relation;

use super::{Geometry, Point, Rectangle};

/// A straight segment between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    a: Point,
    b: Point,
}

impl LineSegment {
    /// Creates a segment from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for non-finite coordinates and
    /// `GeometryError::Degenerate` if both endpoints coincide.
    pub fn new(ax: f64, ay: f64, bx: f64, by: f64) -> Result<Self> {
        Self::from_points(Point::new(ax, ay)?, Point::new(bx, by)?)
    }

    /// Creates a segment from two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if both endpoints coincide.
    pub fn from_points(a: Point, b: Point) -> Result<Self> {
        if a.distance_sq(&b) <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at ({}, {})",
                a.x(),
                a.y()
            ))
            .into());
        }
        Ok(Self { a, b })
    }

    /// Builds a segment whose endpoints are known to be distinct.
    pub(crate) fn from_distinct(a: Point, b: Point) -> Self {
        debug_assert!(a != b, "segment endpoints coincide");
        Self { a, b }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.a
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.b
    }

    #[must_use]
    pub fn length_sq(&self) -> f64 {
        self.a.distance_sq(&self.b)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::from_finite(
            0.5 * self.a.x() + 0.5 * self.b.x(),
            0.5 * self.a.y() + 0.5 * self.b.y(),
        )
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_corners(self.a, self.b)
    }

    /// The same segment walked from `b` to `a`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    /// Orders the endpoints so that `(a, b)` and `(b, a)` normalize identically.
    #[must_use]
    pub fn normalize(&self) -> Self {
        if self.b.compare(&self.a) == Ordering::Less {
            self.reversed()
        } else {
            *self
        }
    }

    /// Total order over normalized endpoint pairs.
    #[must_use]
    pub fn compare(&self, other: &LineSegment) -> Ordering {
        let (l, r) = (self.normalize(), other.normalize());
        l.a.compare(&r.a).then_with(|| l.b.compare(&r.b))
    }

    /// A segment is valid while it is longer than `accuracy`.
    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        self.length_sq() > accuracy * accuracy
    }

    /// Distance from `p` to the infinite line through this segment.
    #[must_use]
    pub fn perpendicular_distance(&self, p: &Point) -> f64 {
        perpendicular_distance(&p.to_point2(), &self.a.to_point2(), &self.b.to_point2())
    }

    /// Distance from `p` to the nearest point of the segment.
    #[must_use]
    pub fn distance_to(&self, p: &Point) -> f64 {
        point_to_segment_dist(&p.to_point2(), &self.a.to_point2(), &self.b.to_point2())
    }

    /// Relation of this segment (A) to a point (B).
    ///
    /// `TOUCH` when the clamped distance is within `accuracy`, otherwise
    /// disjoint. A segment collapsible under `accuracy` is related as its
    /// midpoint.
    #[must_use]
    pub fn relate_point(&self, p: &Point, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        if self.bounds().is_collapsible(accuracy) {
            return self.midpoint().relate_point(p, accuracy);
        }
        if self.distance_to(p) <= accuracy {
            Relation::A_OUTSIDE_B | Relation::TOUCH
        } else {
            Relation::DISJOINT
        }
    }

    /// Common part of two segments: a point, an overlapping segment, or
    /// nothing.
    #[must_use]
    pub fn intersect_segment(&self, other: &LineSegment, accuracy: f64) -> Option<Geometry> {
        let accuracy = sanitize_accuracy(accuracy);
        let (a0, a1) = (self.a.to_point2(), self.b.to_point2());
        let (b0, b1) = (other.a.to_point2(), other.b.to_point2());
        match segment_segment_intersect_2d(&a0, &a1, &b0, &b1, accuracy) {
            SegmentIntersection::None => None,
            SegmentIntersection::Point { t, .. } => {
                Some(Geometry::Point(self.point_at_param(t)))
            }
            SegmentIntersection::Overlap { t0, t1 } => {
                let p0 = self.point_at_param(t0);
                let p1 = self.point_at_param(t1);
                Some(match LineSegment::from_points(p0, p1) {
                    Ok(seg) => Geometry::LineSegment(seg),
                    Err(_) => Geometry::Point(p0),
                })
            }
        }
    }

    /// Point at parameter `t` along the segment; endpoints are returned exactly.
    #[must_use]
    pub fn point_at_param(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.a;
        }
        if t >= 1.0 {
            return self.b;
        }
        let p: Point2 = point_at(&self.a.to_point2(), &self.b.to_point2(), t);
        Point::from_finite(p.x, p.y)
    }

    /// Collapses to the midpoint when the segment fits inside one accuracy
    /// cell or is no longer than `accuracy`.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        let accuracy = sanitize_accuracy(accuracy);
        if !self.is_valid(accuracy) || self.bounds().is_collapsible(accuracy) {
            Geometry::Point(self.midpoint())
        } else {
            Geometry::LineSegment(*self)
        }
    }

    /// Applies a coordinate mapping to both endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping yields non-finite coordinates or
    /// collapses the segment.
    pub fn transform<F>(&self, mapper: F) -> Result<LineSegment>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        LineSegment::from_points(self.a.transform(&mapper)?, self.b.transform(&mapper)?)
    }
}
