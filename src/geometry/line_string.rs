use std::cmp::Ordering;

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::ords::sanitize_accuracy;
use crate::math::polygon_2d::{rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;
use crate::operations::simplify::DouglasPeucker;

use super::{Geometry, LineSegment, MultiGeometry, Point, PointCollection, Rectangle};

/// A connected polyline over at least two points.
///
/// Consecutive points never coincide exactly, so every segment has a
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: PointCollection,
}

impl LineString {
    /// Creates a line string from flattened ordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the ordinates are invalid, fewer than two points
    /// are given, or two consecutive points coincide.
    pub fn new(ords: Vec<f64>) -> Result<Self> {
        Self::from_collection(PointCollection::new(ords)?)
    }

    /// Creates a line string from points.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LineString::new`].
    pub fn from_points(points: &[Point]) -> Result<Self> {
        Self::from_collection(PointCollection::from_points(points)?)
    }

    /// Creates a line string over an existing point collection.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` for fewer than two points and
    /// `GeometryError::Degenerate` if two consecutive points coincide.
    pub fn from_collection(points: PointCollection) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                kind: "line string",
                min: 2,
                actual: points.len(),
            }
            .into());
        }
        if let Some(i) = (1..points.len()).find(|&i| points.point(i - 1) == points.point(i)) {
            let p = points.point(i);
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at vertex {i} ({}, {})",
                p.x(),
                p.y()
            ))
            .into());
        }
        Ok(Self { points })
    }

    pub(crate) fn from_point2s_unchecked(points: &[Point2]) -> Self {
        debug_assert!(points.len() >= 2);
        Self {
            points: PointCollection::from_point2s(points),
        }
    }

    #[must_use]
    pub fn points(&self) -> &PointCollection {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a line string has at least two vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.points.first()
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.points.last()
    }

    /// Exact closure test: first vertex equals last vertex.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.points.bounds()
    }

    /// The `n - 1` segments joining consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        (1..self.points.len())
            .map(|i| LineSegment::from_distinct(self.points.point(i - 1), self.points.point(i)))
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Shoelace area of a closed string; `0` for open strings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        if self.is_closed() {
            signed_area_2d(&self.points.to_point2s())
        } else {
            0.0
        }
    }

    /// Valid when every segment is longer than `accuracy`.
    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        self.segments().all(|s| s.is_valid(accuracy))
    }

    /// The same vertices in opposite order.
    #[must_use]
    pub fn reversed(&self) -> LineString {
        LineString {
            points: self.points.reversed(),
        }
    }

    /// Canonical direction: the smaller of this string and its reverse,
    /// comparing the first vertex, then the last vertex, then the full
    /// sequence.
    #[must_use]
    pub fn normalize(&self) -> LineString {
        let reversed = self.reversed();
        if compare_sequences(&reversed, self) == Ordering::Less {
            reversed
        } else {
            self.clone()
        }
    }

    /// Canonical ring form: starts at the lexicographically smallest vertex
    /// and runs counter-clockwise. Open strings fall back to [`LineString::normalize`].
    #[must_use]
    pub fn normalize_ring(&self) -> LineString {
        if !self.is_closed() {
            return self.normalize();
        }
        let mut ring = rotate_to_canonical_start(&self.points.to_point2s());
        if signed_area_2d(&ring) < 0.0 {
            ring.reverse();
        }
        Self::from_point2s_unchecked(&ring)
    }

    /// Simplifies the string under `accuracy`.
    ///
    /// Collapsible bounds yield the centroid point. Otherwise Douglas-Peucker
    /// runs over the vertices and the result narrows to a `Point` (one
    /// vertex left), a `LineSegment` (two) or a `LineString`.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        let accuracy = sanitize_accuracy(accuracy);
        let bounds = self.bounds();
        if bounds.is_collapsible(accuracy) {
            debug!(vertices = self.len(), "line string collapsed to centroid");
            return Geometry::Point(bounds.centroid());
        }
        let input = self.points.to_point2s();
        let mut simplified = DouglasPeucker::new(&input, accuracy).execute();
        simplified.dedup();
        if simplified.len() == input.len() {
            return if input.len() == 2 {
                Geometry::LineSegment(LineSegment::from_distinct(self.start(), self.end()))
            } else {
                Geometry::LineString(self.clone())
            };
        }
        debug!(
            before = input.len(),
            after = simplified.len(),
            "line string generalized"
        );
        chain_to_geometry(&simplified)
    }

    /// Joins two strings that share an endpoint within `accuracy`.
    ///
    /// The receiver's vertices are kept at the join; `other` is reversed
    /// when needed. Returns `None` when no endpoints match or the joined
    /// string would be degenerate.
    #[must_use]
    pub fn merge(&self, other: &LineString, accuracy: f64) -> Option<LineString> {
        let accuracy = sanitize_accuracy(accuracy);
        let mine: Vec<Point> = self.points.iter().collect();
        let theirs: Vec<Point> = other.points.iter().collect();
        let rev_theirs: Vec<Point> = theirs.iter().rev().copied().collect();

        let joined: Vec<Point> = if self.end().matches(&other.start(), accuracy) {
            mine.iter().chain(&theirs[1..]).copied().collect()
        } else if self.end().matches(&other.end(), accuracy) {
            mine.iter().chain(&rev_theirs[1..]).copied().collect()
        } else if self.start().matches(&other.end(), accuracy) {
            theirs[..theirs.len() - 1].iter().chain(&mine).copied().collect()
        } else if self.start().matches(&other.start(), accuracy) {
            rev_theirs[..rev_theirs.len() - 1]
                .iter()
                .chain(&mine)
                .copied()
                .collect()
        } else {
            return None;
        };
        LineString::from_points(&joined).ok()
    }

    /// Applies a coordinate mapping to every vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping yields non-finite coordinates or
    /// makes two consecutive vertices coincide.
    pub fn transform<F>(&self, mapper: F) -> Result<LineString>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        LineString::from_collection(self.points.transform(mapper)?)
    }
}

/// Narrows a simplified vertex chain (no consecutive duplicates) to the
/// simplest geometry holding it. An empty chain is the empty aggregate.
pub(crate) fn chain_to_geometry(chain: &[Point2]) -> Geometry {
    match chain {
        [] => Geometry::MultiGeometry(MultiGeometry::default()),
        [p] => Geometry::Point(Point::from_finite(p.x, p.y)),
        [a, b] => Geometry::LineSegment(LineSegment::from_distinct(
            Point::from_finite(a.x, a.y),
            Point::from_finite(b.x, b.y),
        )),
        _ => Geometry::LineString(LineString::from_point2s_unchecked(chain)),
    }
}

fn compare_sequences(a: &LineString, b: &LineString) -> Ordering {
    a.start()
        .compare(&b.start())
        .then_with(|| a.end().compare(&b.end()))
        .then_with(|| {
            a.points
                .iter()
                .zip(b.points.iter())
                .map(|(p, q)| p.compare(&q))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.len().cmp(&b.len()))
}
