use tracing::debug;

use crate::geometry::{Geometry, LineSegment, LineString, Point, Polygon, Rectangle};
use crate::math::distance_2d::point_to_chain_dist;
use crate::math::Point2;
use crate::relation::shape::{param_point, relate_shapes, split_params, Location, Shape};
use crate::relation::Relation;

use super::assemble::{
    assemble_chains, assemble_members, assemble_ring, lineal_chain, to_polygon,
};
use super::clip::{clip_chain_to_rect, clip_ring_convex, convex_clip_ring, select_chain_pieces};
use super::engine::{aggregate_members, boolean_execute, dimension, Dimension};
use super::select::BooleanOp;

/// Computes the common part of two geometries.
///
/// Supported beyond containment: rectangle pairs, segment pairs, linework
/// against any geometry, and areas against a rectangle or a hole-free
/// convex polygon. Other partial overlaps between two areas yield `None`.
#[derive(Debug)]
pub struct Intersect<'a> {
    a: &'a Geometry,
    b: &'a Geometry,
    accuracy: f64,
}

impl<'a> Intersect<'a> {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry, accuracy: f64) -> Self {
        Self { a, b, accuracy }
    }

    /// Executes the intersection. Returns `None` when the geometries do not
    /// meet.
    #[must_use]
    pub fn execute(&self) -> Option<Geometry> {
        boolean_execute(self.a, self.b, self.accuracy, BooleanOp::Intersect)
    }
}

pub(super) fn intersection_of(
    a: &Geometry,
    b: &Geometry,
    relation: Relation,
    accuracy: f64,
) -> Option<Geometry> {
    if !relation.meets() {
        return None;
    }
    if relation.a_within_b() {
        return Some(a.clone());
    }
    if relation.b_within_a() {
        return Some(b.clone());
    }
    if let Some(members) = aggregate_members(a) {
        return assemble_members(
            members
                .iter()
                .filter_map(|m| m.intersection(b, accuracy))
                .collect(),
        );
    }
    if let Some(members) = aggregate_members(b) {
        return assemble_members(
            members
                .iter()
                .filter_map(|m| a.intersection(m, accuracy))
                .collect(),
        );
    }

    match (a, b) {
        (Geometry::Rectangle(r), Geometry::Rectangle(s)) => {
            return r.intersection(s).map(|overlap| rectangle_or_degenerate(&overlap));
        }
        (Geometry::LineSegment(s), Geometry::LineSegment(t)) => {
            return s.intersect_segment(t, accuracy);
        }
        _ => {}
    }

    match (dimension(a), dimension(b)) {
        (Some(Dimension::Lineal), Some(_)) => intersect_lineal(a, b, accuracy),
        (Some(_), Some(Dimension::Lineal)) => intersect_lineal(b, a, accuracy),
        (Some(Dimension::Areal), Some(Dimension::Areal)) => intersect_areal(a, b, accuracy),
        _ => None,
    }
}

/// An overlap rectangle, narrowed to a segment or point when it is flat.
fn rectangle_or_degenerate(r: &Rectangle) -> Geometry {
    if r.width() > 0.0 && r.height() > 0.0 {
        return Geometry::Rectangle(*r);
    }
    let min = Point::from_finite(r.min_x(), r.min_y());
    let max = Point::from_finite(r.max_x(), r.max_y());
    match LineSegment::from_points(min, max) {
        Ok(segment) => Geometry::LineSegment(segment),
        Err(_) => Geometry::Point(min),
    }
}

/// Linework of `line` covered by `other`, plus isolated contact points.
fn intersect_lineal(line: &Geometry, other: &Geometry, accuracy: f64) -> Option<Geometry> {
    let chain = match line {
        Geometry::Rectangle(r) => vec![r.min(), r.max()],
        _ => lineal_chain(line)?,
    };
    let shape = Shape::from_geometry(other, accuracy)?;
    let pieces = match other {
        Geometry::Rectangle(r) if r.area() > 0.0 => clip_chain_to_rect(&chain, r),
        _ => select_chain_pieces(&chain, &shape, accuracy, BooleanOp::Intersect),
    };
    let contacts = contact_points(&chain, &shape, &pieces, accuracy);

    let mut members: Vec<Geometry> = contacts
        .into_iter()
        .map(|p| Geometry::Point(Point::from_finite(p.x, p.y)))
        .collect();
    if let Some(lines) = assemble_chains(pieces) {
        match lines {
            Geometry::MultiGeometry(m) => members.extend(m.into_members()),
            single => members.push(single),
        }
    }
    assemble_members(members)
}

/// Cut points of the chain that touch `shape` away from every kept piece.
fn contact_points(
    chain: &[Point2],
    shape: &Shape,
    pieces: &[Vec<Point2>],
    accuracy: f64,
) -> Vec<Point2> {
    let mut contacts: Vec<Point2> = Vec::new();
    for w in chain.windows(2) {
        for t in split_params(&w[0], &w[1], shape, accuracy) {
            let p = param_point(&w[0], &w[1], t);
            if shape.locate(&p, accuracy) == Location::Outside {
                continue;
            }
            let covered = pieces
                .iter()
                .any(|piece| point_to_chain_dist(&p, piece) <= accuracy)
                || contacts.iter().any(|c| (c - p).norm() <= accuracy);
            if !covered {
                contacts.push(p);
            }
        }
    }
    contacts
}

fn intersect_areal(a: &Geometry, b: &Geometry, accuracy: f64) -> Option<Geometry> {
    if let (Some(subject), Some(clip)) = (to_polygon(a), convex_clip_ring(b, accuracy)) {
        return clip_polygon(&subject, &clip, accuracy);
    }
    if let (Some(subject), Some(clip)) = (to_polygon(b), convex_clip_ring(a, accuracy)) {
        return clip_polygon(&subject, &clip, accuracy);
    }
    debug!(
        a = a.kind(),
        b = b.kind(),
        "partial overlap of two non-convex areas is not clipped"
    );
    None
}

/// Clips a polygon to a convex region. Holes inside the region are kept
/// and holes outside it vanish; a hole crossing the region's boundary
/// cannot be represented by a clipped outer ring and yields `None`.
fn clip_polygon(subject: &Polygon, clip: &[Point2], accuracy: f64) -> Option<Geometry> {
    let outer = clip_ring_convex(&subject.outer().points().to_point2s(), clip);
    if outer.is_empty() {
        return None;
    }
    let region = Shape::areal(&Polygon::from_parts(
        LineString::from_point2s_unchecked(clip),
        Vec::new(),
    ));
    let mut holes = Vec::new();
    for hole in subject.holes() {
        let relation = relate_shapes(&Shape::areal(hole), &region, accuracy);
        if !relation.meets() {
            continue;
        }
        if relation.a_within_b() && !relation.contains(Relation::TOUCH) {
            holes.push(hole.clone());
            continue;
        }
        debug!("hole crosses the clip region");
        return None;
    }
    assemble_ring(&outer, holes)
}
