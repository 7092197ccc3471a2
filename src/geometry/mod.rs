pub mod line_segment;
pub mod line_string;
pub mod multi_geometry;
pub mod multi_point;
pub mod point;
pub mod point_collection;
pub mod polygon;
pub mod rectangle;

use std::borrow::Cow;

pub use line_segment::LineSegment;
pub use line_string::LineString;
pub use multi_geometry::MultiGeometry;
pub use multi_point::MultiPoint;
pub use point::Point;
pub use point_collection::PointCollection;
pub use polygon::Polygon;
pub use rectangle::{Rectangle, RectangleBuilder};

use crate::error::Result;
use crate::math::ords::sanitize_accuracy;
use crate::operations::boolean::{Intersect, Subtract, Union};
use crate::relation::shape::{relate_shapes, Shape};
use crate::relation::Relation;

/// The closed set of geometry variants.
///
/// Every variant supports the same operation set; operations that simplify
/// may return a different, simpler variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Rectangle(Rectangle),
    LineSegment(LineSegment),
    MultiPoint(MultiPoint),
    LineString(LineString),
    Polygon(Polygon),
    MultiGeometry(MultiGeometry),
}

impl Geometry {
    /// Variant name, for logs and error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Rectangle(_) => "rectangle",
            Geometry::LineSegment(_) => "line segment",
            Geometry::MultiPoint(_) => "multi-point",
            Geometry::LineString(_) => "line string",
            Geometry::Polygon(_) => "polygon",
            Geometry::MultiGeometry(_) => "multi-geometry",
        }
    }

    /// Tie-break order between variants with equal bounds.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Geometry::Point(_) => 0,
            Geometry::MultiPoint(_) => 1,
            Geometry::LineSegment(_) => 2,
            Geometry::LineString(_) => 3,
            Geometry::Rectangle(_) => 4,
            Geometry::Polygon(_) => 5,
            Geometry::MultiGeometry(_) => 6,
        }
    }

    /// Bounds of the geometry; `None` only for an empty multi-geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            Geometry::Point(p) => Some(p.bounds()),
            Geometry::Rectangle(r) => Some(*r),
            Geometry::LineSegment(s) => Some(s.bounds()),
            Geometry::MultiPoint(m) => Some(m.bounds()),
            Geometry::LineString(l) => Some(l.bounds()),
            Geometry::Polygon(p) => Some(p.bounds()),
            Geometry::MultiGeometry(m) => m.bounds(),
        }
    }

    /// Enclosed area. Puntal and lineal geometries have none.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Rectangle(r) => r.area(),
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiGeometry(m) => m.area(),
            Geometry::Point(_)
            | Geometry::LineSegment(_)
            | Geometry::MultiPoint(_)
            | Geometry::LineString(_) => 0.0,
        }
    }

    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        match self {
            Geometry::Point(_) => true,
            Geometry::Rectangle(r) => r.is_valid(accuracy),
            Geometry::LineSegment(s) => s.is_valid(accuracy),
            Geometry::MultiPoint(m) => m.is_valid(accuracy),
            Geometry::LineString(l) => l.is_valid(accuracy),
            Geometry::Polygon(p) => p.is_valid(accuracy),
            Geometry::MultiGeometry(m) => m.is_valid(accuracy),
        }
    }

    /// Canonical form, so that equal geometries compare equal regardless of
    /// vertex order, ring start or member order.
    #[must_use]
    pub fn normalize(&self) -> Geometry {
        match self {
            Geometry::Point(_) | Geometry::Rectangle(_) => self.clone(),
            Geometry::LineSegment(s) => Geometry::LineSegment(s.normalize()),
            Geometry::MultiPoint(m) => m.normalize(),
            Geometry::LineString(l) => Geometry::LineString(l.normalize()),
            Geometry::Polygon(p) => Geometry::Polygon(p.normalize()),
            Geometry::MultiGeometry(m) => m.normalize(),
        }
    }

    /// Lossy simplification under `accuracy`. May narrow to a simpler
    /// variant.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        match self {
            Geometry::Point(_) => self.clone(),
            Geometry::Rectangle(r) => r.generalize(accuracy),
            Geometry::LineSegment(s) => s.generalize(accuracy),
            Geometry::MultiPoint(m) => m.generalize(accuracy),
            Geometry::LineString(l) => l.generalize(accuracy),
            Geometry::Polygon(p) => p.generalize(accuracy),
            Geometry::MultiGeometry(m) => m.generalize(accuracy),
        }
    }

    /// Applies a coordinate mapping to every vertex.
    ///
    /// A rectangle that stays axis-aligned under the mapping remains a
    /// rectangle; otherwise it becomes a polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping produces non-finite coordinates or
    /// collapses a structure below its minimum (coincident segment
    /// endpoints, zero-length line string segments).
    pub fn transform<F>(&self, mapper: F) -> Result<Geometry>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        self.transform_with(&mapper)
    }

    pub(crate) fn transform_with(
        &self,
        mapper: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<Geometry> {
        Ok(match self {
            Geometry::Point(p) => Geometry::Point(p.transform(mapper)?),
            Geometry::Rectangle(r) => transform_rectangle(r, mapper)?,
            Geometry::LineSegment(s) => Geometry::LineSegment(s.transform(mapper)?),
            Geometry::MultiPoint(m) => Geometry::MultiPoint(m.transform(mapper)?),
            Geometry::LineString(l) => Geometry::LineString(l.transform(mapper)?),
            Geometry::Polygon(p) => Geometry::Polygon(p.transform_with(mapper)?),
            Geometry::MultiGeometry(m) => Geometry::MultiGeometry(m.transform_with(mapper)?),
        })
    }

    /// The geometry as a generic aggregate, the shape consumed by text and
    /// drawing formatters.
    #[must_use]
    pub fn to_multi_geometry(&self) -> MultiGeometry {
        match self {
            Geometry::MultiGeometry(m) => m.clone(),
            Geometry::MultiPoint(m) => m.iter().map(Geometry::Point).collect(),
            other => MultiGeometry::new(vec![other.clone()]),
        }
    }

    /// Relation of this geometry (A) to a point (B).
    #[must_use]
    pub fn relate_point(&self, p: &Point, accuracy: f64) -> Relation {
        self.relate(&Geometry::Point(*p), accuracy)
    }

    /// Relation of this geometry (A) to a rectangle (B).
    #[must_use]
    pub fn relate_rectangle(&self, r: &Rectangle, accuracy: f64) -> Relation {
        self.relate(&Geometry::Rectangle(*r), accuracy)
    }

    /// Relation of this geometry (A) to `other` (B) under `accuracy`.
    ///
    /// Bounds are compared first and reject disjoint pairs cheaply. Any
    /// geometry whose bounds collapse under `accuracy` is then related as its
    /// centroid. Aggregates fold their members' relations; a right-hand
    /// aggregate is folded from its own side and flipped once.
    #[must_use]
    pub fn relate(&self, other: &Geometry, accuracy: f64) -> Relation {
        let accuracy = sanitize_accuracy(accuracy);
        let (Some(bounds_a), Some(bounds_b)) = (self.bounds(), other.bounds()) else {
            return Relation::DISJOINT;
        };
        if bounds_a.is_apart(&bounds_b, accuracy) {
            return Relation::DISJOINT;
        }
        let a = collapsed(self, &bounds_a, accuracy);
        let b = collapsed(other, &bounds_b, accuracy);
        relate_resolved(&a, &b, accuracy)
    }

    /// Union of both geometries; see [`Union`].
    #[must_use]
    pub fn union(&self, other: &Geometry, accuracy: f64) -> Option<Geometry> {
        Union::new(self, other, accuracy).execute()
    }

    /// Common part of both geometries; see [`Intersect`].
    #[must_use]
    pub fn intersection(&self, other: &Geometry, accuracy: f64) -> Option<Geometry> {
        Intersect::new(self, other, accuracy).execute()
    }

    /// This geometry minus `other`; see [`Subtract`].
    #[must_use]
    pub fn less(&self, other: &Geometry, accuracy: f64) -> Option<Geometry> {
        Subtract::new(self, other, accuracy).execute()
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Geometry::Point(p)
    }
}

impl From<Rectangle> for Geometry {
    fn from(r: Rectangle) -> Self {
        Geometry::Rectangle(r)
    }
}

impl From<LineSegment> for Geometry {
    fn from(s: LineSegment) -> Self {
        Geometry::LineSegment(s)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(m: MultiPoint) -> Self {
        Geometry::MultiPoint(m)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Geometry::LineString(l)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<MultiGeometry> for Geometry {
    fn from(m: MultiGeometry) -> Self {
        Geometry::MultiGeometry(m)
    }
}

/// Replaces a geometry whose bounds collapse under `accuracy` by its centroid.
pub(crate) fn collapsed<'a>(
    g: &'a Geometry,
    bounds: &Rectangle,
    accuracy: f64,
) -> Cow<'a, Geometry> {
    match g {
        Geometry::Point(_) => Cow::Borrowed(g),
        _ if bounds.is_collapsible(accuracy) => Cow::Owned(Geometry::Point(bounds.centroid())),
        _ => Cow::Borrowed(g),
    }
}

fn relate_resolved(a: &Geometry, b: &Geometry, accuracy: f64) -> Relation {
    match (a, b) {
        (Geometry::MultiGeometry(m), _) => fold_members(m.members().iter(), b, accuracy),
        (Geometry::MultiPoint(m), Geometry::Point(p)) => m.relate_point(p, accuracy),
        (Geometry::MultiPoint(m), Geometry::Rectangle(r)) => m.relate_rectangle(r, accuracy),
        (Geometry::MultiPoint(m), _) => {
            let points: Vec<Geometry> = m.iter().map(Geometry::Point).collect();
            fold_members(points.iter(), b, accuracy)
        }
        (_, Geometry::MultiGeometry(_) | Geometry::MultiPoint(_)) => {
            relate_resolved(b, a, accuracy).flip_ab()
        }
        (Geometry::Point(p), Geometry::Point(q)) => p.relate_point(q, accuracy),
        (Geometry::Rectangle(r), Geometry::Point(p)) => r.relate_point(p, accuracy),
        (Geometry::Point(p), Geometry::Rectangle(r)) => r.relate_point(p, accuracy).flip_ab(),
        (Geometry::Rectangle(r), Geometry::Rectangle(s)) => r.relate_rectangle(s, accuracy),
        (Geometry::LineSegment(s), Geometry::Point(p)) => s.relate_point(p, accuracy),
        (Geometry::Point(p), Geometry::LineSegment(s)) => s.relate_point(p, accuracy).flip_ab(),
        _ => match (
            Shape::from_geometry(a, accuracy),
            Shape::from_geometry(b, accuracy),
        ) {
            (Some(sa), Some(sb)) => relate_shapes(&sa, &sb, accuracy),
            _ => Relation::DISJOINT,
        },
    }
}

/// Folds member relations of a composite A against B. Members without
/// bounds are skipped; with nothing left the composite is disjoint.
fn fold_members<'a>(
    members: impl Iterator<Item = &'a Geometry>,
    other: &Geometry,
    accuracy: f64,
) -> Relation {
    let mut folded = None;
    for member in members.filter(|m| m.bounds().is_some()) {
        let rel = member.relate(other, accuracy);
        folded = Some(folded.unwrap_or_else(Relation::fold_start).fold_member(rel));
    }
    folded.unwrap_or(Relation::DISJOINT)
}

#[allow(clippy::float_cmp)]
fn transform_rectangle(
    r: &Rectangle,
    mapper: &dyn Fn(f64, f64) -> (f64, f64),
) -> Result<Geometry> {
    let corners = r
        .ring()
        .iter()
        .map(|c| Point::from_finite(c.x, c.y).transform(mapper))
        .collect::<Result<Vec<Point>>>()?;
    let [p0, p1, p2, p3, _] = corners.as_slice() else {
        return Ok(Geometry::Rectangle(r.transform(mapper)?));
    };
    let axis_aligned =
        (p0.y() == p1.y() && p1.x() == p2.x() && p2.y() == p3.y() && p3.x() == p0.x())
            || (p0.x() == p1.x() && p1.y() == p2.y() && p2.x() == p3.x() && p3.y() == p0.y());
    if axis_aligned || r.area() <= 0.0 {
        return Ok(Geometry::Rectangle(Rectangle::from_corners(*p0, *p2)));
    }
    Ok(Geometry::Polygon(Polygon::new(
        LineString::from_points(&corners)?,
        Vec::new(),
    )?))
}
