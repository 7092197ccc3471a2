use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::math::ords::{compare_ords, is_finite_coord, match_ords, sanitize_accuracy};
use crate::math::Point2;
use crate::relation::shape::{relate_shapes, Shape};
use crate::relation::Relation;

use super::{Geometry, Point};

/// An axis-aligned rectangle with finite, ordered bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Rectangle {
    /// Creates a new rectangle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidBounds` if any bound is non-finite or a
    /// minimum exceeds its maximum.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let finite = is_finite_coord(min_x, min_y) && is_finite_coord(max_x, max_y);
        if !finite || min_x > max_x || min_y > max_y {
            return Err(GeometryError::InvalidBounds {
                min_x,
                min_y,
                max_x,
                max_y,
            }
            .into());
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Creates the rectangle spanned by two corner points, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x().min(b.x()),
            min_y: a.y().min(b.y()),
            max_x: a.x().max(b.x()),
            max_y: a.y().max(b.y()),
        }
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn centroid(&self) -> Point {
        Point::from_finite(
            0.5 * self.min_x + 0.5 * self.max_x,
            0.5 * self.min_y + 0.5 * self.max_y,
        )
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        Point2::new(self.min_x, self.min_y)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        Point2::new(self.max_x, self.max_y)
    }

    /// A rectangle is collapsible when both its width and height are within
    /// `accuracy`, i.e. it can stand in for its centroid.
    #[must_use]
    pub fn is_collapsible(&self, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        self.width() <= accuracy && self.height() <= accuracy
    }

    /// A rectangle is valid under `accuracy` when it extends beyond the
    /// accuracy in both directions.
    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        self.width() > accuracy && self.height() > accuracy
    }

    /// Smallest rectangle covering both rectangles.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Overlapping region of both rectangles, if any (edges included).
    #[must_use]
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        (min_x <= max_x && min_y <= max_y).then_some(Rectangle {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Returns the rectangle grown by `by` on every side.
    ///
    /// Negative values shrink the rectangle, collapsing to its centroid when
    /// they exceed half the extent.
    #[must_use]
    pub fn expanded(&self, by: f64) -> Rectangle {
        if !by.is_finite() {
            return *self;
        }
        let c = self.centroid();
        let half_w = (0.5 * self.width() + by).max(0.0);
        let half_h = (0.5 * self.height() + by).max(0.0);
        Rectangle {
            min_x: c.x() - half_w,
            min_y: c.y() - half_h,
            max_x: c.x() + half_w,
            max_y: c.y() + half_h,
        }
    }

    /// Returns `true` if `other` lies inside this rectangle, edges included,
    /// within `accuracy`.
    #[must_use]
    pub fn contains_rectangle(&self, other: &Rectangle, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        other.min_x >= self.min_x - accuracy
            && other.min_y >= self.min_y - accuracy
            && other.max_x <= self.max_x + accuracy
            && other.max_y <= self.max_y + accuracy
    }

    /// Returns `true` if the rectangles are more than `accuracy` apart
    /// along either axis.
    #[must_use]
    pub fn is_apart(&self, other: &Rectangle, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        self.min_x > other.max_x + accuracy
            || other.min_x > self.max_x + accuracy
            || self.min_y > other.max_y + accuracy
            || other.min_y > self.max_y + accuracy
    }

    /// Total order over (min x, min y, max x, max y).
    #[must_use]
    pub fn compare(&self, other: &Rectangle) -> Ordering {
        compare_ords(self.min_x, other.min_x)
            .then_with(|| compare_ords(self.min_y, other.min_y))
            .then_with(|| compare_ords(self.max_x, other.max_x))
            .then_with(|| compare_ords(self.max_y, other.max_y))
    }

    /// Relation of this rectangle (A) to a point (B).
    ///
    /// Disjoint when the point is more than `accuracy` outside the bounds,
    /// `TOUCH` when it lies within `accuracy` of an edge, otherwise the point
    /// is inside. A collapsible rectangle is related as its centroid.
    #[must_use]
    pub fn relate_point(&self, p: &Point, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        if self.is_collapsible(accuracy) {
            return self.centroid().relate_point(p, accuracy);
        }
        let (x, y) = (p.x(), p.y());
        if x < self.min_x - accuracy
            || x > self.max_x + accuracy
            || y < self.min_y - accuracy
            || y > self.max_y + accuracy
        {
            return Relation::DISJOINT;
        }
        let on_edge = match_ords(x, self.min_x, accuracy)
            || match_ords(x, self.max_x, accuracy)
            || match_ords(y, self.min_y, accuracy)
            || match_ords(y, self.max_y, accuracy);
        if on_edge {
            Relation::A_OUTSIDE_B | Relation::TOUCH
        } else {
            Relation::A_OUTSIDE_B | Relation::A_INSIDE_B
        }
    }

    /// Relation of this rectangle (A) to another rectangle (B).
    ///
    /// Either operand that is collapsible under `accuracy` is treated as its
    /// centroid. An operand too thin to be valid is treated as its diagonal
    /// segment, matching how the generic relate engine sees it.
    #[must_use]
    pub fn relate_rectangle(&self, other: &Rectangle, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        match (self.is_collapsible(accuracy), other.is_collapsible(accuracy)) {
            (true, true) => {
                return self
                    .centroid()
                    .relate_point(&other.centroid(), accuracy);
            }
            (true, false) => return other.relate_point(&self.centroid(), accuracy).flip_ab(),
            (false, true) => return self.relate_point(&other.centroid(), accuracy),
            (false, false) => {}
        }
        if !self.is_valid(accuracy) || !other.is_valid(accuracy) {
            return relate_shapes(
                &Shape::rectangle(self, accuracy),
                &Shape::rectangle(other, accuracy),
                accuracy,
            );
        }

        if self.is_apart(other, accuracy) {
            return Relation::DISJOINT;
        }

        let mut relation = Relation::empty();
        if sticks_out(self, other, accuracy) {
            relation |= Relation::A_OUTSIDE_B;
        }
        if sticks_out(other, self, accuracy) {
            relation |= Relation::B_OUTSIDE_A;
        }

        let overlap_w = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let overlap_h = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if overlap_w > accuracy && overlap_h > accuracy {
            relation |= Relation::A_INSIDE_B;
        }

        // Boundaries of two overlapping rectangles meet unless one is nested
        // strictly inside the other.
        if !strictly_inside(self, other, accuracy) && !strictly_inside(other, self, accuracy) {
            relation |= Relation::TOUCH;
        }
        relation
    }

    /// A collapsible rectangle generalizes to its centroid.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        if self.is_collapsible(accuracy) {
            Geometry::Point(self.centroid())
        } else {
            Geometry::Rectangle(*self)
        }
    }

    /// Closed counter-clockwise ring starting at the lower-left corner.
    #[must_use]
    pub fn ring(&self) -> Vec<Point2> {
        vec![
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
            Point2::new(self.min_x, self.min_y),
        ]
    }

    /// Applies a coordinate mapping to both corners.
    ///
    /// Only axis-preserving mappings keep the result meaningful; general
    /// mappings should go through [`Rectangle::to_polygon`].
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if the mapping yields a non-finite coordinate.
    pub fn transform<F>(&self, mapper: F) -> Result<Rectangle>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        let a = Point::from_finite(self.min_x, self.min_y).transform(&mapper)?;
        let b = Point::from_finite(self.max_x, self.max_y).transform(&mapper)?;
        Ok(Rectangle::from_corners(a, b))
    }
}

fn sticks_out(a: &Rectangle, b: &Rectangle, accuracy: f64) -> bool {
    a.min_x < b.min_x - accuracy
        || a.max_x > b.max_x + accuracy
        || a.min_y < b.min_y - accuracy
        || a.max_y > b.max_y + accuracy
}

fn strictly_inside(a: &Rectangle, b: &Rectangle, accuracy: f64) -> bool {
    a.min_x > b.min_x + accuracy
        && a.max_x < b.max_x - accuracy
        && a.min_y > b.min_y + accuracy
        && a.max_y < b.max_y - accuracy
}

/// Accumulates points and rectangles into bounds.
///
/// `build` yields `None` until something has been unioned, so an empty
/// builder never produces infinite bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleBuilder {
    bounds: Option<Rectangle>,
}

impl RectangleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coordinate. Non-finite coordinates are ignored.
    pub fn union(&mut self, x: f64, y: f64) -> &mut Self {
        if !is_finite_coord(x, y) {
            return self;
        }
        let p = Rectangle {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        self.union_rectangle(&p)
    }

    pub fn union_point(&mut self, p: &Point) -> &mut Self {
        self.union(p.x(), p.y())
    }

    pub fn union_rectangle(&mut self, r: &Rectangle) -> &mut Self {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(r),
            None => *r,
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    #[must_use]
    pub fn build(&self) -> Option<Rectangle> {
        self.bounds
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::LineSegment;
    use approx::assert_relative_eq;

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rectangle {
        Rectangle::new(min_x, min_y, max_x, max_y).unwrap()
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn rejects_unordered_or_non_finite_bounds() {
        assert!(Rectangle::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn empty_builder_yields_none() {
        let builder = RectangleBuilder::new();
        assert!(builder.build().is_none());
        let mut builder = RectangleBuilder::new();
        builder.union(f64::NAN, 1.0);
        assert!(builder.build().is_none());
    }

    #[test]
    fn builder_accumulates() {
        let mut builder = RectangleBuilder::new();
        builder.union(1.0, 5.0).union(-2.0, 3.0);
        builder.union_rectangle(&rect(0.0, 0.0, 1.0, 1.0));
        assert_eq!(builder.build().unwrap(), rect(-2.0, 0.0, 1.0, 5.0));
    }

    #[test]
    fn collapsible_rectangle_generalizes_to_centroid() {
        let r = rect(0.0, 0.0, 0.2, 0.2);
        assert!(r.is_collapsible(1.0));
        assert_eq!(r.generalize(1.0), Geometry::Point(pt(0.1, 0.1)));
        assert_eq!(r.generalize(0.1), Geometry::Rectangle(r));
    }

    #[test]
    fn relate_point_inside_touch_disjoint() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let inside = r.relate_point(&pt(5.0, 5.0), 0.1);
        assert_eq!(inside, Relation::A_OUTSIDE_B | Relation::A_INSIDE_B);
        assert!(!inside.contains(Relation::B_OUTSIDE_A));

        let edge = r.relate_point(&pt(10.05, 5.0), 0.1);
        assert_eq!(edge, Relation::A_OUTSIDE_B | Relation::TOUCH);

        assert!(r.relate_point(&pt(10.5, 5.0), 0.1).is_disjoint());
    }

    #[test]
    fn centroid_is_never_outside() {
        for r in [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(-3.0, 2.0, -1.0, 2.0),
            rect(5.0, 5.0, 5.0, 5.0),
        ] {
            for accuracy in [0.0, 0.5, 100.0] {
                let rel = r.relate_point(&r.centroid(), accuracy);
                assert!(!rel.contains(Relation::B_OUTSIDE_A), "{r:?} at {accuracy}");
                assert!(rel.meets());
            }
        }
    }

    #[test]
    fn relate_nested_rectangles() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 2.0, 4.0, 4.0);
        let rel = outer.relate_rectangle(&inner, 0.1);
        assert_eq!(rel, Relation::A_OUTSIDE_B | Relation::A_INSIDE_B);
        assert_eq!(inner.relate_rectangle(&outer, 0.1), rel.flip_ab());
    }

    #[test]
    fn relate_adjacent_rectangles_touch() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 4.0, 2.0);
        let rel = a.relate_rectangle(&b, 0.01);
        assert_eq!(rel, Relation::DISJOINT | Relation::TOUCH);
        assert!(rel.is_touch());
    }

    #[test]
    fn relate_equal_rectangles() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let rel = a.relate_rectangle(&a, 0.0);
        assert!(rel.is_equal());
        assert!(rel.contains(Relation::A_INSIDE_B));
    }

    #[test]
    fn relate_collapsible_rectangle_as_point() {
        let big = rect(0.0, 0.0, 10.0, 10.0);
        let tiny = rect(5.0, 5.0, 5.05, 5.05);
        let rel = big.relate_rectangle(&tiny, 0.1);
        assert_eq!(rel, big.relate_point(&tiny.centroid(), 0.1));
    }

    #[test]
    fn intersection_and_union() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 1.0, 6.0, 3.0);
        assert_eq!(a.intersection(&b).unwrap(), rect(2.0, 1.0, 4.0, 3.0));
        assert_eq!(a.union(&b), rect(0.0, 0.0, 6.0, 4.0));
        assert!(a.intersection(&rect(5.0, 5.0, 6.0, 6.0)).is_none());
    }

    #[test]
    fn expanded_grows_and_shrinks() {
        let r = rect(0.0, 0.0, 4.0, 2.0);
        assert_eq!(r.expanded(1.0), rect(-1.0, -1.0, 5.0, 3.0));
        let collapsed = r.expanded(-5.0);
        assert_relative_eq!(collapsed.width(), 0.0);
        assert_eq!(collapsed.centroid(), r.centroid());
    }

    #[test]
    fn apart_rectangles() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        assert!(a.is_apart(&rect(2.5, 0.0, 3.0, 1.0), 0.1));
        assert!(!a.is_apart(&rect(2.05, 0.0, 3.0, 1.0), 0.1));
        assert!(!a.is_apart(&rect(1.0, 1.0, 1.5, 1.0), 0.1));
    }

    #[test]
    fn flat_rectangle_relates_as_its_diagonal() {
        let big = rect(0.0, 0.0, 10.0, 10.0);
        let flat = rect(5.0, 5.0, 6.0, 5.0);
        let rel = big.relate_rectangle(&flat, 0.1);
        assert!(rel.meets());
        assert!(rel.b_within_a());
        assert!(flat.relate_rectangle(&big, 0.1).a_within_b());

        let diagonal = Geometry::LineSegment(LineSegment::new(5.0, 5.0, 6.0, 5.0).unwrap());
        assert_eq!(rel, Geometry::Rectangle(big).relate(&diagonal, 0.1));
    }

    #[test]
    fn flat_rectangle_inside_survives_booleans() {
        let big = Geometry::Rectangle(rect(0.0, 0.0, 10.0, 10.0));
        let flat = Geometry::Rectangle(rect(5.0, 5.0, 6.0, 5.0));
        assert_eq!(big.intersection(&flat, 0.1), Some(flat.clone()));
        assert_eq!(big.union(&flat, 0.1), Some(big.clone()));
    }

    #[test]
    fn flat_rectangles_crossing_touch() {
        let horizontal = rect(0.0, 5.0, 10.0, 5.05);
        let vertical = rect(5.0, 0.0, 5.05, 10.0);
        let rel = horizontal.relate_rectangle(&vertical, 0.1);
        assert!(rel.meets());
        assert!(!rel.a_within_b());
        assert!(!rel.b_within_a());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn any_rectangle() -> impl Strategy<Value = Rectangle> {
            (-100.0f64..100.0, -100.0f64..100.0, 1.0f64..50.0, 1.0f64..50.0)
                .prop_map(|(x, y, w, h)| Rectangle::new(x, y, x + w, y + h).unwrap())
        }

        proptest! {
            #[test]
            fn centroid_lies_within(r in any_rectangle()) {
                let relation = r.relate_point(&r.centroid(), 0.01);
                prop_assert!(relation.b_within_a());
            }

            #[test]
            fn union_contains_both(r in any_rectangle(), s in any_rectangle()) {
                let u = r.union(&s);
                prop_assert!(u.contains_rectangle(&r, 0.0));
                prop_assert!(u.contains_rectangle(&s, 0.0));
            }

            #[test]
            fn intersection_is_symmetric(r in any_rectangle(), s in any_rectangle()) {
                prop_assert_eq!(r.intersection(&s), s.intersection(&r));
            }
        }
    }
}
