use crate::geometry::line_string::chain_to_geometry;
use crate::geometry::{Geometry, LineString, MultiGeometry, Polygon};
use crate::math::Point2;

/// Builds the result of a boolean operation from its parts.
///
/// No parts means no geometry; a single part is returned bare; several
/// parts become a normalized multi-geometry.
pub(crate) fn assemble_members(mut members: Vec<Geometry>) -> Option<Geometry> {
    match members.len() {
        0 => None,
        1 => members.pop(),
        _ => Some(MultiGeometry::new(members).normalize()),
    }
}

/// Turns kept linework pieces into geometries. Each piece narrows to a
/// point, segment or line string.
pub(crate) fn assemble_chains(chains: Vec<Vec<Point2>>) -> Option<Geometry> {
    let members = chains
        .into_iter()
        .filter_map(|mut chain| {
            chain.dedup();
            (!chain.is_empty()).then(|| chain_to_geometry(&chain))
        })
        .collect();
    assemble_members(members)
}

/// Turns a clipped ring into a polygon, or nothing when the ring has no
/// area left.
pub(crate) fn assemble_ring(ring: &[Point2], holes: Vec<Polygon>) -> Option<Geometry> {
    if ring.len() < 4 {
        return None;
    }
    let outer = LineString::from_point2s_unchecked(ring);
    if outer.signed_area() == 0.0 {
        return None;
    }
    Some(Geometry::Polygon(
        Polygon::from_parts(outer, holes).normalize(),
    ))
}

/// Vertex chain of a lineal geometry.
pub(crate) fn lineal_chain(g: &Geometry) -> Option<Vec<Point2>> {
    match g {
        Geometry::LineSegment(s) => Some(vec![s.start().to_point2(), s.end().to_point2()]),
        Geometry::LineString(l) => Some(l.points().to_point2s()),
        _ => None,
    }
}

/// Lineal geometry as a line string.
pub(crate) fn to_line_string(g: &Geometry) -> Option<LineString> {
    match g {
        Geometry::LineSegment(s) => Some(LineString::from_point2s_unchecked(&[
            s.start().to_point2(),
            s.end().to_point2(),
        ])),
        Geometry::LineString(l) => Some(l.clone()),
        _ => None,
    }
}

/// Areal geometry as a polygon.
pub(crate) fn to_polygon(g: &Geometry) -> Option<Polygon> {
    match g {
        Geometry::Rectangle(r) => r.to_polygon().ok(),
        Geometry::Polygon(p) => Some(p.clone()),
        _ => None,
    }
}
