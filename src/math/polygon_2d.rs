use super::ords::{compare_coords, compare_ords};
use super::{Point2, EPSILON};

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given closed (first == last) or open; the closing edge contributes either
/// way.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Index of the lexicographically smallest vertex (x, then y; exact).
#[must_use]
pub fn canonical_start_index(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if compare_coords(pt.x, pt.y, b.x, b.y).is_lt() {
            best = i;
        }
    }
    best
}

/// Rotates a closed ring (first == last) so it starts and ends at its
/// lexicographically smallest vertex.
#[must_use]
pub fn rotate_to_canonical_start(ring: &[Point2]) -> Vec<Point2> {
    if ring.len() < 2 {
        return ring.to_vec();
    }
    let open = &ring[..ring.len() - 1];
    let best = canonical_start_index(open);
    if best == 0 {
        return ring.to_vec();
    }
    let mut rotated = Vec::with_capacity(ring.len());
    rotated.extend_from_slice(&open[best..]);
    rotated.extend_from_slice(&open[..best]);
    rotated.push(open[best]);
    rotated
}

/// Even-odd crossing test of `p` against a single ring.
///
/// Points exactly on the boundary may land on either side; callers that
/// care test boundary distance first.
#[must_use]
pub fn ring_contains(p: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Even-odd test over a set of nested rings (outer ring, holes, islands).
#[must_use]
pub fn rings_contain(p: &Point2, rings: &[&[Point2]]) -> bool {
    rings.iter().filter(|ring| ring_contains(p, ring)).count() % 2 == 1
}

/// Finds a point strictly inside the area bounded by `rings` (even-odd rule).
///
/// A horizontal scanline is placed in the middle of the widest gap between
/// distinct vertex ordinates, so it never passes through a vertex; the
/// midpoint of the widest inside interval on that line is returned.
#[must_use]
pub fn interior_point(rings: &[&[Point2]]) -> Option<Point2> {
    let mut ys: Vec<f64> = rings.iter().flat_map(|r| r.iter().map(|p| p.y)).collect();
    ys.sort_by(|a, b| compare_ords(*a, *b));
    ys.dedup();
    let (lo, hi) = ys
        .windows(2)
        .map(|w| (w[0], w[1]))
        .max_by(|a, b| compare_ords(a.1 - a.0, b.1 - b.0))?;
    if hi - lo < EPSILON {
        return None;
    }
    let y = 0.5 * (lo + hi);

    let mut xs = Vec::new();
    for ring in rings {
        let n = ring.len();
        for i in 0..n {
            let a = &ring[i];
            let b = &ring[(i + 1) % n];
            if (a.y > y) != (b.y > y) {
                xs.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
    }
    xs.sort_by(|a, b| compare_ords(*a, *b));

    xs.chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(x0, x1)| x1 - x0 > EPSILON)
        .max_by(|a, b| compare_ords(a.1 - a.0, b.1 - b.0))
        .map(|(x0, x1)| Point2::new(0.5 * (x0 + x1), y))
}

/// Returns `true` if the closed ring turns consistently in one direction.
#[must_use]
pub fn is_convex(ring: &[Point2]) -> bool {
    let open = match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    let n = open.len();
    if n < 3 {
        return false;
    }
    let mut ccw: Option<bool> = None;
    for i in 0..n {
        let a = &open[i];
        let b = &open[(i + 1) % n];
        let c = &open[(i + 2) % n];
        let turn = (b - a).perp(&(c - b));
        if turn.abs() < EPSILON {
            continue;
        }
        match ccw {
            None => ccw = Some(turn > 0.0),
            Some(dir) if dir != (turn > 0.0) => return false,
            Some(_) => {}
        }
    }
    ccw.is_some()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn signed_area_ccw_square() {
        let pts = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        assert_relative_eq!(signed_area_2d(&pts), 16.0, epsilon = TOL);
    }

    #[test]
    fn signed_area_flips_under_reversal() {
        let mut pts = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        pts.reverse();
        assert_relative_eq!(signed_area_2d(&pts), -16.0, epsilon = TOL);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&ring(&[(0.0, 0.0)])).abs() < TOL);
        assert!(signed_area_2d(&[]).abs() < TOL);
    }

    #[test]
    fn canonical_start_rotation_keeps_closure() {
        let pts = ring(&[(4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0), (4.0, 0.0)]);
        let rotated = rotate_to_canonical_start(&pts);
        assert_eq!(rotated.len(), 5);
        assert_eq!(rotated[0], Point2::new(0.0, 0.0));
        assert_eq!(rotated[4], Point2::new(0.0, 0.0));
        assert_eq!(rotated[1], Point2::new(4.0, 0.0));
    }

    #[test]
    fn canonical_start_breaks_ties_by_y() {
        let pts = ring(&[(0.0, 3.0), (2.0, 0.0), (0.0, 1.0), (0.0, 3.0)]);
        assert_eq!(canonical_start_index(&pts[..3]), 2);
    }

    #[test]
    fn ring_contains_square() {
        let pts = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        assert!(ring_contains(&Point2::new(2.0, 2.0), &pts));
        assert!(!ring_contains(&Point2::new(5.0, 2.0), &pts));
    }

    #[test]
    fn interior_point_avoids_hole() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let hole = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]);
        let rings = [outer.as_slice(), hole.as_slice()];
        let p = interior_point(&rings).unwrap();
        assert!(rings_contain(&p, &rings));
        assert!(!ring_contains(&p, &hole));
    }

    #[test]
    fn convexity() {
        let square = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        assert!(is_convex(&square));
        let notch = ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 1.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        assert!(!is_convex(&notch));
    }
}
