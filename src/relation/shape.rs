//! Sample-based relate engine for primitive pairs without a closed-form
//! relation.
//!
//! Every primitive is reduced to a [`Shape`]: a point, a vertex chain, or a
//! set of rings bounding an area. Each shape is cut wherever the other
//! shape's linework crosses it or comes within accuracy, and the cut points
//! plus the midpoints between them are located against the other shape.
//! Between two consecutive cut points a piece of linework cannot change
//! side, so the midpoints cover every piece.

use crate::geometry::{Geometry, Polygon, Rectangle};
use crate::math::distance_2d::{point_to_chain_dist, point_to_segment_dist, project_param};
use crate::math::intersect_2d::{point_at, segment_segment_intersect_2d, SegmentIntersection};
use crate::math::ords::compare_ords;
use crate::math::polygon_2d::rings_contain;
use crate::math::Point2;

use super::Relation;

/// Where a point lies relative to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    Inside,
    Boundary,
    Outside,
}

#[derive(Debug, Clone)]
pub(crate) enum Shape {
    Puntal(Point2),
    Lineal(Vec<Point2>),
    Areal {
        /// All rings at every nesting depth (even-odd rule).
        rings: Vec<Vec<Point2>>,
        interior: Option<Point2>,
        /// One point inside each hole, i.e. outside the area.
        witnesses: Vec<Point2>,
    },
}

struct Sample {
    at: Point2,
    on_boundary: bool,
}

impl Shape {
    /// A rectangle too thin to hold an area under `accuracy` is its
    /// diagonal.
    pub(crate) fn rectangle(r: &Rectangle, accuracy: f64) -> Shape {
        if r.is_valid(accuracy) {
            Shape::Areal {
                rings: vec![r.ring()],
                interior: Some(r.centroid().to_point2()),
                witnesses: Vec::new(),
            }
        } else {
            Shape::Lineal(vec![r.min(), r.max()])
        }
    }

    pub(crate) fn areal(polygon: &Polygon) -> Shape {
        Shape::Areal {
            rings: polygon.rings(),
            interior: polygon.interior_point(),
            witnesses: polygon
                .holes()
                .iter()
                .filter_map(Polygon::interior_point)
                .collect(),
        }
    }

    /// Reduces a primitive geometry to a shape. Aggregates have no single
    /// shape and yield `None`.
    pub(crate) fn from_geometry(g: &Geometry, accuracy: f64) -> Option<Shape> {
        Some(match g {
            Geometry::Point(p) => Shape::Puntal(p.to_point2()),
            Geometry::Rectangle(r) => Shape::rectangle(r, accuracy),
            Geometry::LineSegment(s) => {
                Shape::Lineal(vec![s.start().to_point2(), s.end().to_point2()])
            }
            Geometry::LineString(l) => Shape::Lineal(l.points().to_point2s()),
            Geometry::Polygon(p) => Shape::areal(p),
            Geometry::MultiPoint(_) | Geometry::MultiGeometry(_) => return None,
        })
    }

    fn chains(&self) -> Vec<&[Point2]> {
        match self {
            Shape::Puntal(p) => vec![std::slice::from_ref(p)],
            Shape::Lineal(chain) => vec![chain.as_slice()],
            Shape::Areal { rings, .. } => rings.iter().map(Vec::as_slice).collect(),
        }
    }

    fn witnesses(&self) -> &[Point2] {
        match self {
            Shape::Areal { witnesses, .. } => witnesses,
            _ => &[],
        }
    }

    /// Locates `p` against this shape. Anything within `accuracy` of the
    /// linework is on the boundary.
    pub(crate) fn locate(&self, p: &Point2, accuracy: f64) -> Location {
        match self {
            Shape::Puntal(q) => {
                if (p - q).norm() <= accuracy {
                    Location::Boundary
                } else {
                    Location::Outside
                }
            }
            Shape::Lineal(chain) => {
                if point_to_chain_dist(p, chain) <= accuracy {
                    Location::Boundary
                } else {
                    Location::Outside
                }
            }
            Shape::Areal { rings, .. } => {
                if rings.iter().any(|r| point_to_chain_dist(p, r) <= accuracy) {
                    return Location::Boundary;
                }
                let refs: Vec<&[Point2]> = rings.iter().map(Vec::as_slice).collect();
                if rings_contain(p, &refs) {
                    Location::Inside
                } else {
                    Location::Outside
                }
            }
        }
    }

    fn samples(&self, other: &Shape, accuracy: f64) -> Vec<Sample> {
        match self {
            Shape::Puntal(p) => vec![Sample {
                at: *p,
                on_boundary: true,
            }],
            Shape::Lineal(chain) => chain_samples(chain, other, accuracy),
            Shape::Areal {
                rings, interior, ..
            } => {
                let mut samples: Vec<Sample> = rings
                    .iter()
                    .flat_map(|r| chain_samples(r, other, accuracy))
                    .collect();
                if let Some(c) = interior {
                    samples.push(Sample {
                        at: *c,
                        on_boundary: false,
                    });
                }
                samples
            }
        }
    }
}

/// Relation of shape `a` to shape `b`.
pub(crate) fn relate_shapes(a: &Shape, b: &Shape, accuracy: f64) -> Relation {
    let mut relation = Relation::empty();
    for s in a.samples(b, accuracy) {
        match b.locate(&s.at, accuracy) {
            Location::Outside => relation |= Relation::A_OUTSIDE_B,
            Location::Inside => relation |= Relation::A_INSIDE_B,
            Location::Boundary if s.on_boundary => relation |= Relation::TOUCH,
            Location::Boundary => {}
        }
    }
    for s in b.samples(a, accuracy) {
        match a.locate(&s.at, accuracy) {
            Location::Outside => relation |= Relation::B_OUTSIDE_A,
            Location::Inside => relation |= Relation::B_INSIDE_A,
            Location::Boundary if s.on_boundary => relation |= Relation::TOUCH,
            Location::Boundary => {}
        }
    }
    // A hole of one shape covered by the other: that part of the other lies
    // outside.
    if b
        .witnesses()
        .iter()
        .any(|w| a.locate(w, accuracy) == Location::Inside)
    {
        relation |= Relation::A_OUTSIDE_B;
    }
    if a
        .witnesses()
        .iter()
        .any(|w| b.locate(w, accuracy) == Location::Inside)
    {
        relation |= Relation::B_OUTSIDE_A;
    }
    relation
}

/// Sorted parameters along `a → b` where the other shape's linework crosses
/// the segment, overlaps it, or has a vertex within `accuracy`. Always
/// contains `0` and `1`.
pub(crate) fn split_params(a: &Point2, b: &Point2, other: &Shape, accuracy: f64) -> Vec<f64> {
    let mut params = vec![0.0, 1.0];
    for chain in other.chains() {
        for w in chain.windows(2) {
            match segment_segment_intersect_2d(a, b, &w[0], &w[1], accuracy) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { t, .. } => params.push(t),
                SegmentIntersection::Overlap { t0, t1 } => {
                    params.push(t0);
                    params.push(t1);
                }
            }
        }
        for v in chain {
            if point_to_segment_dist(v, a, b) <= accuracy {
                params.push(project_param(v, a, b).clamp(0.0, 1.0));
            }
        }
    }
    params.sort_by(|x, y| compare_ords(*x, *y));
    params.dedup();
    params
}

/// Point at `t` along `a → b`, returning the endpoints exactly.
pub(crate) fn param_point(a: &Point2, b: &Point2, t: f64) -> Point2 {
    if t <= 0.0 {
        *a
    } else if t >= 1.0 {
        *b
    } else {
        point_at(a, b, t)
    }
}

/// Cuts a vertex chain where it meets `other` and locates every piece.
///
/// Consecutive pieces with the same location are joined, so the result
/// alternates between locations.
pub(crate) fn split_chain(
    chain: &[Point2],
    other: &Shape,
    accuracy: f64,
) -> Vec<(Vec<Point2>, Location)> {
    let mut pieces: Vec<(Vec<Point2>, Location)> = Vec::new();
    for w in chain.windows(2) {
        let params = split_params(&w[0], &w[1], other, accuracy);
        for pair in params.windows(2) {
            let p0 = param_point(&w[0], &w[1], pair[0]);
            let p1 = param_point(&w[0], &w[1], pair[1]);
            if p0 == p1 {
                continue;
            }
            let mid = param_point(&w[0], &w[1], 0.5 * (pair[0] + pair[1]));
            let location = other.locate(&mid, accuracy);
            match pieces.last_mut() {
                Some((piece, loc)) if *loc == location && piece.last() == Some(&p0) => {
                    piece.push(p1);
                }
                _ => pieces.push((vec![p0, p1], location)),
            }
        }
    }
    pieces
}

fn chain_samples(chain: &[Point2], other: &Shape, accuracy: f64) -> Vec<Sample> {
    if let [only] = chain {
        return vec![Sample {
            at: *only,
            on_boundary: true,
        }];
    }
    let mut samples = Vec::new();
    for w in chain.windows(2) {
        let params = split_params(&w[0], &w[1], other, accuracy);
        for (i, t) in params.iter().enumerate() {
            samples.push(Sample {
                at: param_point(&w[0], &w[1], *t),
                on_boundary: true,
            });
            if let Some(next) = params.get(i + 1) {
                samples.push(Sample {
                    at: param_point(&w[0], &w[1], 0.5 * (t + next)),
                    on_boundary: true,
                });
            }
        }
    }
    samples
}
