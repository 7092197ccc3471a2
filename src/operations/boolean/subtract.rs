use tracing::debug;

use crate::geometry::{Geometry, Polygon, Rectangle};
use crate::relation::shape::{relate_shapes, Shape};
use crate::relation::Relation;

use super::assemble::{assemble_chains, assemble_members, lineal_chain, to_polygon};
use super::clip::select_chain_pieces;
use super::engine::{aggregate_members, boolean_execute, dimension, Dimension};
use super::select::BooleanOp;

/// Removes the part of `a` covered by `b`.
///
/// Lower-dimensional parts of `b` remove nothing. Linework loses its pieces
/// inside or along `b`; an area nested strictly inside another is cut out
/// as a hole; a rectangle loses a band spanning its full width or height.
#[derive(Debug)]
pub struct Subtract<'a> {
    a: &'a Geometry,
    b: &'a Geometry,
    accuracy: f64,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation.
    #[must_use]
    pub fn new(a: &'a Geometry, b: &'a Geometry, accuracy: f64) -> Self {
        Self { a, b, accuracy }
    }

    /// Executes the difference. Returns `None` when nothing of `a` is left.
    #[must_use]
    pub fn execute(&self) -> Option<Geometry> {
        boolean_execute(self.a, self.b, self.accuracy, BooleanOp::Subtract)
    }
}

pub(super) fn difference_of(
    a: &Geometry,
    b: &Geometry,
    relation: Relation,
    accuracy: f64,
) -> Option<Geometry> {
    if !relation.meets() {
        return Some(a.clone());
    }
    if relation.a_within_b() {
        return None;
    }
    if let Some(members) = aggregate_members(a) {
        return assemble_members(
            members
                .iter()
                .filter_map(|m| m.less(b, accuracy))
                .collect(),
        );
    }
    if let Some(members) = aggregate_members(b) {
        let mut rest = a.clone();
        for m in &members {
            rest = rest.less(m, accuracy)?;
        }
        return Some(rest);
    }

    let (Some(da), Some(db)) = (dimension(a), dimension(b)) else {
        return Some(a.clone());
    };
    if db < da {
        return Some(a.clone());
    }
    match da {
        Dimension::Lineal => subtract_lineal(a, b, accuracy),
        Dimension::Areal => subtract_areal(a, b, relation, accuracy),
        Dimension::Puntal => Some(a.clone()),
    }
}

fn subtract_lineal(a: &Geometry, b: &Geometry, accuracy: f64) -> Option<Geometry> {
    let chain = match a {
        Geometry::Rectangle(r) => vec![r.min(), r.max()],
        _ => lineal_chain(a)?,
    };
    let Some(shape) = Shape::from_geometry(b, accuracy) else {
        return Some(a.clone());
    };
    assemble_chains(select_chain_pieces(
        &chain,
        &shape,
        accuracy,
        BooleanOp::Subtract,
    ))
}

fn subtract_areal(
    a: &Geometry,
    b: &Geometry,
    relation: Relation,
    accuracy: f64,
) -> Option<Geometry> {
    if let (Geometry::Rectangle(r), Geometry::Rectangle(s)) = (a, b) {
        if let Some(rest) = trim_rectangle(r, s, accuracy) {
            return rest;
        }
    }
    if relation.b_within_a() && !relation.contains(Relation::TOUCH) {
        if let (Some(shell), Some(cut)) = (to_polygon(a), to_polygon(b)) {
            if let Some(rest) = punch_hole(&shell, &cut, accuracy) {
                return Some(rest);
            }
        }
    }
    debug!(
        a = a.kind(),
        b = b.kind(),
        "partial overlap of two areas left uncut"
    );
    Some(a.clone())
}

/// Cuts `cut` out of `shell` as a new hole. Holes of `shell` swallowed by
/// the cut merge into it and holes of `cut` stay behind as islands.
///
/// Returns `None` when an existing hole crosses the cut's boundary.
fn punch_hole(shell: &Polygon, cut: &Polygon, accuracy: f64) -> Option<Geometry> {
    let cut_shape = Shape::areal(&cut.shell());
    let mut holes = Vec::with_capacity(shell.holes().len() + 1);
    for hole in shell.holes() {
        let relation = relate_shapes(&Shape::areal(hole), &cut_shape, accuracy);
        if !relation.meets() {
            holes.push(hole.clone());
        } else if !relation.a_within_b() {
            debug!("existing hole crosses the cut");
            return None;
        }
    }
    holes.push(cut.shell());

    let mut members = vec![Geometry::Polygon(
        Polygon::from_parts(shell.outer().clone(), holes).normalize(),
    )];
    members.extend(cut.holes().iter().cloned().map(Geometry::Polygon));
    assemble_members(members)
}

/// Rectangle minus a band covering its full height or width.
///
/// The outer `Option` is `None` when `s` is no such band; the inner one is
/// the remainder, which may be empty or split in two.
#[allow(clippy::option_option)]
fn trim_rectangle(r: &Rectangle, s: &Rectangle, accuracy: f64) -> Option<Option<Geometry>> {
    let full_height = s.min_y() <= r.min_y() + accuracy && s.max_y() >= r.max_y() - accuracy;
    let full_width = s.min_x() <= r.min_x() + accuracy && s.max_x() >= r.max_x() - accuracy;

    let mut parts = Vec::new();
    if full_height {
        if s.min_x() > r.min_x() + accuracy {
            parts.push(Rectangle::new(r.min_x(), r.min_y(), s.min_x(), r.max_y()));
        }
        if s.max_x() < r.max_x() - accuracy {
            parts.push(Rectangle::new(s.max_x(), r.min_y(), r.max_x(), r.max_y()));
        }
    } else if full_width {
        if s.min_y() > r.min_y() + accuracy {
            parts.push(Rectangle::new(r.min_x(), r.min_y(), r.max_x(), s.min_y()));
        }
        if s.max_y() < r.max_y() - accuracy {
            parts.push(Rectangle::new(r.min_x(), s.max_y(), r.max_x(), r.max_y()));
        }
    } else {
        return None;
    }
    let members = parts
        .into_iter()
        .filter_map(Result::ok)
        .map(Geometry::Rectangle)
        .collect();
    Some(assemble_members(members))
}
