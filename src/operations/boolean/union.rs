use tracing::debug;

use crate::geometry::{Geometry, MultiPoint, Point, PointCollection, Rectangle};
use crate::math::ords::match_ords;
use crate::relation::Relation;

use super::assemble::{assemble_members, to_line_string};
use super::engine::{boolean_execute, dimension, Dimension};
use super::select::BooleanOp;

/// Computes the union of two geometries.
///
/// Containment returns the containing geometry. Point sets merge into one
/// deduplicated set, line strings sharing an endpoint join, and
/// edge-aligned rectangles that extend each other grow into one rectangle.
/// Anything else is returned as a normalized multi-geometry of both
/// operands.
#[derive(Debug)]
pub struct Union<'a> {
    a: &'a Geometry,
    b: &'a Geometry,
    accuracy: f64,
}

impl<'a> Union<'a> {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry, accuracy: f64) -> Self {
        Self { a, b, accuracy }
    }

    /// Executes the union. Returns `None` only when both operands are empty.
    #[must_use]
    pub fn execute(&self) -> Option<Geometry> {
        boolean_execute(self.a, self.b, self.accuracy, BooleanOp::Union)
    }
}

pub(super) fn union_of(
    a: &Geometry,
    b: &Geometry,
    relation: Relation,
    accuracy: f64,
) -> Option<Geometry> {
    if relation.b_within_a() {
        return Some(a.clone());
    }
    if relation.a_within_b() {
        return Some(b.clone());
    }

    match (dimension(a), dimension(b)) {
        (Some(Dimension::Puntal), Some(Dimension::Puntal)) => {
            return Some(union_points(a, b, accuracy));
        }
        (Some(Dimension::Lineal), Some(Dimension::Lineal)) => {
            if let (Some(la), Some(lb)) = (to_line_string(a), to_line_string(b)) {
                if let Some(merged) = la.merge(&lb, accuracy) {
                    return Some(Geometry::LineString(merged));
                }
            }
        }
        _ => {}
    }
    if let (Geometry::Rectangle(r), Geometry::Rectangle(s)) = (a, b) {
        if let Some(joined) = extend_rectangle(r, s, relation, accuracy) {
            return Some(Geometry::Rectangle(joined));
        }
    }

    debug!(a = a.kind(), b = b.kind(), "union kept as aggregate");
    let mut members = a.to_multi_geometry().flatten().into_members();
    members.extend(b.to_multi_geometry().flatten().into_members());
    assemble_members(members)
}

/// Merges two point sets, dropping points that match an earlier one
/// within `accuracy`.
fn union_points(a: &Geometry, b: &Geometry, accuracy: f64) -> Geometry {
    let mut kept: Vec<Point> = Vec::new();
    for g in [a, b] {
        for member in g.to_multi_geometry().flatten().members() {
            if let Geometry::Point(p) = member {
                if !kept.iter().any(|k| k.matches(p, accuracy)) {
                    kept.push(*p);
                }
            }
        }
    }
    let coords: Vec<_> = kept.iter().map(|p| p.to_point2()).collect();
    MultiPoint::from_collection(PointCollection::from_point2s(&coords)).normalize()
}

/// Rectangles sharing both extents along one axis and meeting along the
/// other cover exactly their bounding rectangle.
fn extend_rectangle(
    r: &Rectangle,
    s: &Rectangle,
    relation: Relation,
    accuracy: f64,
) -> Option<Rectangle> {
    if !relation.meets() {
        return None;
    }
    let same_rows =
        match_ords(r.min_y(), s.min_y(), accuracy) && match_ords(r.max_y(), s.max_y(), accuracy);
    let same_columns =
        match_ords(r.min_x(), s.min_x(), accuracy) && match_ords(r.max_x(), s.max_x(), accuracy);
    (same_rows || same_columns).then(|| r.union(s))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineSegment, LineString, Polygon};

    fn pt(x: f64, y: f64) -> Geometry {
        Geometry::Point(Point::new(x, y).unwrap())
    }

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Geometry {
        Geometry::Rectangle(Rectangle::new(min_x, min_y, max_x, max_y).unwrap())
    }

    #[test]
    fn containing_geometry_wins() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = pt(5.0, 5.0);
        assert_eq!(Union::new(&outer, &inner, 0.1).execute(), Some(outer.clone()));
        assert_eq!(Union::new(&inner, &outer, 0.1).execute(), Some(outer));
    }

    #[test]
    fn points_merge_into_sorted_set() {
        let a = pt(5.0, 0.0);
        let b = pt(1.0, 0.0);
        let Some(Geometry::MultiPoint(m)) = Union::new(&a, &b, 0.1).execute() else {
            panic!("expected multi-point");
        };
        assert_eq!(m.points().ordinates(), &[1.0, 0.0, 5.0, 0.0]);
    }

    #[test]
    fn matching_points_collapse() {
        let a = pt(1.0, 1.0);
        let b = pt(1.05, 1.0);
        assert_eq!(Union::new(&a, &b, 0.1).execute(), Some(a));
    }

    #[test]
    fn segments_sharing_an_endpoint_join() {
        let a = Geometry::LineSegment(LineSegment::new(0.0, 0.0, 1.0, 0.0).unwrap());
        let b = Geometry::LineSegment(LineSegment::new(1.0, 0.0, 1.0, 1.0).unwrap());
        assert_eq!(
            Union::new(&a, &b, 0.01).execute(),
            Some(Geometry::LineString(
                LineString::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap()
            ))
        );
    }

    #[test]
    fn adjacent_rectangles_grow() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 4.0, 2.0);
        assert_eq!(Union::new(&a, &b, 0.01).execute(), Some(rect(0.0, 0.0, 4.0, 2.0)));
    }

    #[test]
    fn disjoint_polygons_form_aggregate() {
        let a = Geometry::Polygon(
            Polygon::from_ring_ords(vec![5.0, 5.0, 6.0, 5.0, 6.0, 6.0, 5.0, 5.0]).unwrap(),
        );
        let b = rect(0.0, 0.0, 1.0, 1.0);
        let Some(Geometry::MultiGeometry(m)) = Union::new(&a, &b, 0.01).execute() else {
            panic!("expected multi-geometry");
        };
        assert_eq!(m.len(), 2);
        assert_eq!(m.members()[0], b);
    }
}
