use crate::geometry::{Geometry, Rectangle};
use crate::math::intersect_2d::clip_segment_to_rect;
use crate::math::polygon_2d::{is_convex, signed_area_2d};
use crate::math::{Point2, EPSILON};
use crate::relation::shape::{param_point, split_chain, Shape};

use super::select::{should_keep_piece, BooleanOp};

/// Clips a closed subject ring against a convex counter-clockwise clip ring
/// (Sutherland–Hodgman).
///
/// Returns the clipped ring closed, or an empty vector when nothing is
/// left.
pub(crate) fn clip_ring_convex(subject: &[Point2], clip: &[Point2]) -> Vec<Point2> {
    let mut output: Vec<Point2> = open_ring(subject).to_vec();
    let clip = open_ring(clip);
    let n = clip.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let c0 = clip[i];
        let c1 = clip[(i + 1) % n];
        let side = |p: &Point2| (c1 - c0).perp(&(p - c0));

        let input = std::mem::take(&mut output);
        let m = input.len();
        for j in 0..m {
            let cur = input[j];
            let prev = input[(j + m - 1) % m];
            let (s_cur, s_prev) = (side(&cur), side(&prev));
            let cur_in = s_cur >= 0.0;
            let prev_in = s_prev >= 0.0;
            if cur_in != prev_in {
                let denom = s_prev - s_cur;
                if denom.abs() > EPSILON {
                    output.push(prev + (cur - prev) * (s_prev / denom));
                }
            }
            if cur_in {
                output.push(cur);
            }
        }
    }
    output.dedup();
    while output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    if output.len() < 3 {
        return Vec::new();
    }
    if let Some(&first) = output.first() {
        output.push(first);
    }
    output
}

/// Ring of an areal geometry usable as a Sutherland–Hodgman clip region:
/// a rectangle, or a hole-free convex polygon. Returned counter-clockwise.
pub(crate) fn convex_clip_ring(g: &Geometry, accuracy: f64) -> Option<Vec<Point2>> {
    let mut ring = match g {
        Geometry::Rectangle(r) if r.is_valid(accuracy) => r.ring(),
        Geometry::Polygon(p) if p.holes().is_empty() => {
            let ring = p.outer().points().to_point2s();
            if !is_convex(&ring) {
                return None;
            }
            ring
        }
        _ => return None,
    };
    if signed_area_2d(&ring) < 0.0 {
        ring.reverse();
    }
    Some(ring)
}

/// Pieces of a vertex chain lying inside a rectangle (Liang–Barsky per
/// segment). Consecutive pieces that connect are joined.
pub(crate) fn clip_chain_to_rect(chain: &[Point2], r: &Rectangle) -> Vec<Vec<Point2>> {
    let (min, max) = (r.min(), r.max());
    let mut pieces: Vec<Vec<Point2>> = Vec::new();
    for w in chain.windows(2) {
        let Some((t0, t1)) = clip_segment_to_rect(&w[0], &w[1], &min, &max) else {
            continue;
        };
        let p0 = param_point(&w[0], &w[1], t0);
        let p1 = param_point(&w[0], &w[1], t1);
        if p0 == p1 {
            continue;
        }
        match pieces.last_mut() {
            Some(piece) if piece.last() == Some(&p0) => piece.push(p1),
            _ => pieces.push(vec![p0, p1]),
        }
    }
    pieces
}

/// Pieces of a vertex chain kept by `op` after splitting the chain against
/// `other`.
pub(crate) fn select_chain_pieces(
    chain: &[Point2],
    other: &Shape,
    accuracy: f64,
    op: BooleanOp,
) -> Vec<Vec<Point2>> {
    let mut kept: Vec<Vec<Point2>> = Vec::new();
    for (piece, location) in split_chain(chain, other, accuracy) {
        if !should_keep_piece(location, op) {
            continue;
        }
        // Inside and boundary pieces are both kept by an intersection and
        // join up again.
        match kept.last_mut() {
            Some(last) if last.last() == piece.first() => last.extend_from_slice(&piece[1..]),
            _ => kept.push(piece),
        }
    }
    kept
}

fn open_ring(ring: &[Point2]) -> &[Point2] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}
