use std::sync::OnceLock;

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::ords::sanitize_accuracy;
use crate::math::polygon_2d::interior_point;
use crate::math::Point2;
use crate::operations::simplify::DouglasPeucker;
use crate::relation::shape::{relate_shapes, Shape};
use crate::relation::Relation;

use super::line_string::chain_to_geometry;
use super::{Geometry, LineString, Rectangle};

/// An area bounded by a closed outer ring, minus zero or more holes.
///
/// Holes are polygons themselves, so a hole may carry islands of its own.
/// The area and an interior point are computed on first use and cached.
#[derive(Debug, Clone)]
pub struct Polygon {
    outer: LineString,
    holes: Vec<Polygon>,
    area: OnceLock<f64>,
    interior: OnceLock<Option<Point2>>,
}

impl Polygon {
    /// Creates a polygon from an outer ring and holes.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::RingNotClosed` if the first and last vertex of
    /// the ring differ, and `GeometryError::TooFewPoints` for rings with
    /// fewer than four vertices.
    pub fn new(outer: LineString, holes: Vec<Polygon>) -> Result<Self> {
        if !outer.is_closed() {
            return Err(GeometryError::RingNotClosed.into());
        }
        if outer.len() < 4 {
            return Err(GeometryError::TooFewPoints {
                kind: "polygon ring",
                min: 4,
                actual: outer.len(),
            }
            .into());
        }
        Ok(Self::from_parts(outer, holes))
    }

    /// Creates a hole-free polygon from the flattened ordinates of a closed ring.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LineString::new`] and [`Polygon::new`].
    pub fn from_ring_ords(ords: Vec<f64>) -> Result<Self> {
        Self::new(LineString::new(ords)?, Vec::new())
    }

    /// The counter-clockwise polygon covering a rectangle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the rectangle has zero width or
    /// height.
    pub fn from_rectangle(r: &Rectangle) -> Result<Self> {
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "rectangle {} x {} has no area",
                r.width(),
                r.height()
            ))
            .into());
        }
        Ok(Self::from_parts(
            LineString::from_point2s_unchecked(&r.ring()),
            Vec::new(),
        ))
    }

    pub(crate) fn from_parts(outer: LineString, holes: Vec<Polygon>) -> Self {
        Self {
            outer,
            holes,
            area: OnceLock::new(),
            interior: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn outer(&self) -> &LineString {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// The outer ring alone, without holes.
    #[must_use]
    pub fn shell(&self) -> Polygon {
        Self::from_parts(self.outer.clone(), Vec::new())
    }

    /// Returns a copy with `hole` added.
    #[must_use]
    pub fn with_hole(&self, hole: Polygon) -> Polygon {
        let mut holes = self.holes.clone();
        holes.push(hole);
        Self::from_parts(self.outer.clone(), holes)
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.outer.bounds()
    }

    /// Shoelace area of the outer ring; its sign gives the ring direction.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.outer.signed_area()
    }

    /// Area of the outer ring minus the area of every hole.
    #[must_use]
    pub fn area(&self) -> f64 {
        *self.area.get_or_init(|| {
            let holes: f64 = self.holes.iter().map(Polygon::area).sum();
            self.signed_area().abs() - holes
        })
    }

    /// Every ring of the polygon at every nesting depth: outer ring, hole
    /// rings, island rings. Even-odd containment over this set matches the
    /// polygon's area.
    #[must_use]
    pub fn rings(&self) -> Vec<Vec<Point2>> {
        let mut rings = Vec::with_capacity(1 + self.holes.len());
        self.collect_rings(&mut rings);
        rings
    }

    fn collect_rings(&self, out: &mut Vec<Vec<Point2>>) {
        out.push(self.outer.points().to_point2s());
        for hole in &self.holes {
            hole.collect_rings(out);
        }
    }

    /// A point strictly inside the area, if the area is not degenerate.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point2> {
        *self.interior.get_or_init(|| {
            let rings = self.rings();
            let refs: Vec<&[Point2]> = rings.iter().map(Vec::as_slice).collect();
            interior_point(&refs)
        })
    }

    /// Canonical form: every ring starts at its smallest vertex and runs
    /// counter-clockwise; holes are canonicalized recursively and sorted by
    /// bounds.
    #[must_use]
    pub fn normalize(&self) -> Polygon {
        let mut holes: Vec<Polygon> = self.holes.iter().map(Polygon::normalize).collect();
        holes.sort_by(|a, b| a.bounds().compare(&b.bounds()));
        Self::from_parts(self.outer.normalize_ring(), holes)
    }

    /// Valid when every ring is valid under `accuracy`, each hole lies
    /// within the outer ring, and no two holes overlap.
    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        let accuracy = sanitize_accuracy(accuracy);
        if !self.outer.is_valid(accuracy) || !self.bounds().is_valid(accuracy) {
            return false;
        }
        if self.holes.is_empty() {
            return true;
        }
        let shell = Shape::areal(&self.shell());
        let holes: Vec<Shape> = self.holes.iter().map(Shape::areal).collect();
        for (i, hole) in self.holes.iter().enumerate() {
            if !hole.is_valid(accuracy) {
                return false;
            }
            if !relate_shapes(&shell, &holes[i], accuracy).b_within_a() {
                return false;
            }
            let overlaps = holes[i + 1..].iter().any(|other| {
                relate_shapes(&holes[i], other, accuracy).contains(Relation::A_INSIDE_B)
            });
            if overlaps {
                return false;
            }
        }
        true
    }

    /// Simplifies the outer ring and then each hole.
    ///
    /// A ring that degenerates below a triangle turns the polygon into the
    /// point or segment that is left. Holes that no longer form a polygon are
    /// dropped.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        let accuracy = sanitize_accuracy(accuracy);
        let bounds = self.bounds();
        if bounds.is_collapsible(accuracy) {
            debug!(holes = self.holes.len(), "polygon collapsed to centroid");
            return Geometry::Point(bounds.centroid());
        }

        let ring = self.outer.points().to_point2s();
        let mut simplified = DouglasPeucker::new(&ring, accuracy).execute();
        simplified.dedup();
        if simplified.len() < 4 {
            // Drop the closing vertex so the remaining chain narrows cleanly.
            if simplified.len() > 1 {
                simplified.pop();
            }
            let degenerate = chain_to_geometry(&simplified);
            debug!(kind = degenerate.kind(), "polygon ring degenerated");
            return degenerate;
        }

        let mut holes = Vec::with_capacity(self.holes.len());
        let mut dropped = 0_usize;
        for hole in &self.holes {
            match hole.generalize(accuracy) {
                Geometry::Polygon(h) => holes.push(h),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, kept = holes.len(), "dropped degenerate holes");
        }
        if simplified.len() == ring.len() && dropped == 0 && holes == self.holes {
            return Geometry::Polygon(self.clone());
        }
        Geometry::Polygon(Self::from_parts(
            LineString::from_point2s_unchecked(&simplified),
            holes,
        ))
    }

    /// Applies a coordinate mapping to every ring.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping yields non-finite coordinates or
    /// breaks a ring apart.
    pub fn transform<F>(&self, mapper: F) -> Result<Polygon>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        self.transform_with(&mapper)
    }

    pub(crate) fn transform_with(
        &self,
        mapper: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<Polygon> {
        let outer = self.outer.transform(mapper)?;
        let holes = self
            .holes
            .iter()
            .map(|h| h.transform_with(mapper))
            .collect::<Result<Vec<_>>>()?;
        Polygon::new(outer, holes)
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.outer == other.outer && self.holes == other.holes
    }
}

impl Rectangle {
    /// The counter-clockwise polygon covering this rectangle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the rectangle has no area.
    pub fn to_polygon(&self) -> Result<Polygon> {
        Polygon::from_rectangle(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineSegment, Point};
    use crate::math::polygon_2d::rings_contain;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_ring_ords(vec![
            x0,
            y0,
            x0 + size,
            y0,
            x0 + size,
            y0 + size,
            x0,
            y0 + size,
            x0,
            y0,
        ])
        .unwrap()
    }

    #[test]
    fn construction_requires_closed_ring() {
        let open = LineString::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
        assert!(matches!(
            Polygon::new(open, Vec::new()),
            Err(crate::error::FlatgeoError::Geometry(GeometryError::RingNotClosed))
        ));
        let short = LineString::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(Polygon::new(short, Vec::new()).is_err());
    }

    #[test]
    fn area_subtracts_holes() {
        let outer = square(0.0, 0.0, 4.0);
        assert_relative_eq!(outer.area(), 16.0);
        let with_hole = outer.with_hole(square(1.0, 1.0, 1.0));
        assert_relative_eq!(with_hole.area(), 15.0);
    }

    #[test]
    fn area_is_independent_of_hole_orientation() {
        let cw_hole =
            Polygon::from_ring_ords(vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0])
                .unwrap();
        let p = square(0.0, 0.0, 4.0).with_hole(cw_hole);
        assert_relative_eq!(p.area(), 15.0);
    }

    #[test]
    fn normalize_rotates_and_orients_rings() {
        let p = Polygon::from_ring_ords(vec![4.0, 4.0, 4.0, 0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0])
            .unwrap();
        let n = p.normalize();
        assert_eq!(n.outer().start(), Point::new(0.0, 0.0).unwrap());
        assert!(n.signed_area() > 0.0);
        assert_relative_eq!(n.area(), p.area());
    }

    #[test]
    fn interior_point_avoids_holes() {
        let p = square(0.0, 0.0, 4.0).with_hole(square(1.0, 1.0, 2.0));
        let inside = p.interior_point().unwrap();
        let rings = p.rings();
        let refs: Vec<&[Point2]> = rings.iter().map(Vec::as_slice).collect();
        assert!(rings_contain(&inside, &refs));
    }

    #[test]
    fn generalize_collapses_thin_polygon() {
        let sliver =
            Polygon::from_ring_ords(vec![0.0, 0.0, 10.0, 0.0, 10.0, 0.1, 0.0, 0.0]).unwrap();
        assert_eq!(
            sliver.generalize(0.5),
            Geometry::LineSegment(LineSegment::new(0.0, 0.0, 10.0, 0.1).unwrap())
        );
    }

    #[test]
    fn generalize_drops_small_holes() {
        let p = square(0.0, 0.0, 10.0).with_hole(square(4.0, 4.0, 0.2));
        let Geometry::Polygon(g) = p.generalize(0.5) else {
            panic!("expected polygon");
        };
        assert!(g.holes().is_empty());
        assert_relative_eq!(g.area(), 100.0);
    }

    #[test]
    fn generalize_keeps_unchanged_polygon() {
        let p = square(0.0, 0.0, 10.0).with_hole(square(2.0, 2.0, 3.0));
        assert_eq!(p.generalize(0.5), Geometry::Polygon(p.clone()));
    }

    #[test]
    fn validity_checks_hole_placement() {
        let outer = square(0.0, 0.0, 10.0);
        assert!(outer.with_hole(square(2.0, 2.0, 2.0)).is_valid(0.1));
        assert!(!outer.with_hole(square(8.0, 8.0, 5.0)).is_valid(0.1));
        let overlapping = outer
            .with_hole(square(2.0, 2.0, 3.0))
            .with_hole(square(3.0, 3.0, 3.0));
        assert!(!overlapping.is_valid(0.1));
    }

    #[test]
    fn rectangle_converts_to_polygon() {
        let r = Rectangle::new(0.0, 0.0, 3.0, 2.0).unwrap();
        assert_relative_eq!(r.to_polygon().unwrap().area(), 6.0);
        assert!(Rectangle::new(0.0, 0.0, 3.0, 0.0).unwrap().to_polygon().is_err());
    }

    mod props {
        use super::*;
        use crate::geometry::Geometry;
        use crate::math::Point2;
        use crate::operations::transform::Rotate;
        use proptest::prelude::*;

        fn any_triangle() -> impl Strategy<Value = Polygon> {
            prop::array::uniform6(-30i32..30)
                .prop_map(|c| c.map(f64::from))
                .prop_filter("triangle needs area", |c| {
                    ((c[2] - c[0]) * (c[5] - c[1]) - (c[4] - c[0]) * (c[3] - c[1])).abs() > 1.0
                })
                .prop_map(|c| {
                    Polygon::from_ring_ords(vec![c[0], c[1], c[2], c[3], c[4], c[5], c[0], c[1]])
                        .unwrap()
                })
        }

        proptest! {
            #[test]
            fn reversal_flips_sign_but_keeps_area(p in any_triangle()) {
                let reversed = Polygon::new(p.outer().reversed(), Vec::new()).unwrap();
                prop_assert!((reversed.signed_area() + p.signed_area()).abs() < 1e-9);
                prop_assert!((reversed.area() - p.area()).abs() < 1e-9);
            }

            #[test]
            fn normalized_ring_runs_counter_clockwise(p in any_triangle()) {
                let n = p.normalize();
                prop_assert!(n.signed_area() > 0.0);
                prop_assert!((n.area() - p.area()).abs() < 1e-9);
            }

            #[test]
            fn rotation_keeps_area(p in any_triangle(), angle in -6.3f64..6.3) {
                let g = Geometry::Polygon(p.clone());
                let rotated = Rotate::new(Point2::new(3.0, -2.0), angle).execute(&g).unwrap();
                prop_assert!((rotated.area() - p.area()).abs() <= 1e-9 * p.area().max(1.0));
            }
        }
    }
}
