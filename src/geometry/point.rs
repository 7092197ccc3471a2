use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::math::ords::{compare_coords, dist_sq, is_finite_coord, match_coords, sanitize_accuracy};
use crate::math::Point2;
use crate::relation::Relation;

use super::Rectangle;

/// A 2D point with finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !is_finite_coord(x, y) {
            return Err(GeometryError::NonFinite { x, y }.into());
        }
        Ok(Self { x, y })
    }

    /// Builds a point from coordinates already known to be finite.
    pub(crate) fn from_finite(x: f64, y: f64) -> Self {
        debug_assert!(is_finite_coord(x, y), "non-finite point ({x}, {y})");
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Converts to the `nalgebra` point used by the numeric helpers.
    #[must_use]
    pub fn to_point2(self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Squared euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        dist_sq(self.x, self.y, other.x, other.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Returns `true` if `other` lies within `accuracy` of this point.
    #[must_use]
    pub fn matches(&self, other: &Point, accuracy: f64) -> bool {
        match_coords(self.x, self.y, other.x, other.y, sanitize_accuracy(accuracy))
    }

    /// Canonical order: by x, then by y.
    #[must_use]
    pub fn compare(&self, other: &Point) -> Ordering {
        compare_coords(self.x, self.y, other.x, other.y)
    }

    /// The degenerate rectangle covering this point.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_corners(*self, *self)
    }

    /// Relation to another point: `TOUCH` when they match within
    /// `accuracy`, otherwise disjoint.
    #[must_use]
    pub fn relate_point(&self, other: &Point, accuracy: f64) -> Relation {
        if self.matches(other, accuracy) {
            Relation::TOUCH
        } else {
            Relation::DISJOINT
        }
    }

    /// Applies a coordinate mapping.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if the mapping yields a non-finite coordinate.
    pub fn transform<F>(&self, mapper: F) -> Result<Point>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        let (x, y) = mapper(self.x, self.y);
        Point::new(x, y)
    }
}

impl From<Point> for Point2 {
    fn from(p: Point) -> Self {
        p.to_point2()
    }
}

impl TryFrom<Point2> for Point {
    type Error = crate::error::FlatgeoError;

    fn try_from(p: Point2) -> Result<Self> {
        Point::new(p.x, p.y)
    }
}
