use tracing::trace;

use crate::geometry::Geometry;
use crate::math::ords::sanitize_accuracy;

use super::intersect_op::intersection_of;
use super::select::BooleanOp;
use super::subtract::difference_of;
use super::union::union_of;

/// Topological dimension of a geometry's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Dimension {
    Puntal,
    Lineal,
    Areal,
}

pub(crate) fn dimension(g: &Geometry) -> Option<Dimension> {
    match g {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Some(Dimension::Puntal),
        Geometry::LineSegment(_) | Geometry::LineString(_) => Some(Dimension::Lineal),
        Geometry::Rectangle(r) if r.area() > 0.0 => Some(Dimension::Areal),
        Geometry::Rectangle(_) => Some(Dimension::Lineal),
        Geometry::Polygon(_) => Some(Dimension::Areal),
        Geometry::MultiGeometry(_) => None,
    }
}

/// Executes a boolean operation on two geometries.
///
/// Handles empty operands, then relates both geometries once and hands the
/// relation to the operation-specific routine.
pub(crate) fn boolean_execute(
    a: &Geometry,
    b: &Geometry,
    accuracy: f64,
    op: BooleanOp,
) -> Option<Geometry> {
    let accuracy = sanitize_accuracy(accuracy);
    match (a.bounds().is_some(), b.bounds().is_some(), op) {
        (false, false, _) | (false, true, BooleanOp::Subtract | BooleanOp::Intersect) => {
            return None
        }
        (true, false, BooleanOp::Intersect) => return None,
        (true, false, BooleanOp::Union | BooleanOp::Subtract) => return Some(a.clone()),
        (false, true, BooleanOp::Union) => return Some(b.clone()),
        (true, true, _) => {}
    }

    let relation = a.relate(b, accuracy);
    trace!(?op, ?relation, a = a.kind(), b = b.kind(), "boolean");
    match op {
        BooleanOp::Union => union_of(a, b, relation, accuracy),
        BooleanOp::Intersect => intersection_of(a, b, relation, accuracy),
        BooleanOp::Subtract => difference_of(a, b, relation, accuracy),
    }
}

/// Members of an aggregate operand, or `None` for a primitive.
pub(crate) fn aggregate_members(g: &Geometry) -> Option<Vec<Geometry>> {
    match g {
        Geometry::MultiGeometry(m) => Some(m.flatten().into_members()),
        Geometry::MultiPoint(m) => Some(m.iter().map(Geometry::Point).collect()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{MultiGeometry, Point};

    #[test]
    fn empty_operands() {
        let empty = Geometry::MultiGeometry(MultiGeometry::default());
        let p = Geometry::Point(Point::new(0.0, 0.0).unwrap());
        assert_eq!(
            boolean_execute(&p, &empty, 0.1, BooleanOp::Union),
            Some(p.clone())
        );
        assert_eq!(
            boolean_execute(&empty, &p, 0.1, BooleanOp::Union),
            Some(p.clone())
        );
        assert_eq!(
            boolean_execute(&p, &empty, 0.1, BooleanOp::Subtract),
            Some(p.clone())
        );
        assert!(boolean_execute(&p, &empty, 0.1, BooleanOp::Intersect).is_none());
        assert!(boolean_execute(&empty, &empty, 0.1, BooleanOp::Union).is_none());
    }

    #[test]
    fn dimension_orders_puntal_first() {
        assert!(Dimension::Puntal < Dimension::Lineal);
        assert!(Dimension::Lineal < Dimension::Areal);
    }
}
