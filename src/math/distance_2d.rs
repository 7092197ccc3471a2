use super::{Point2, EPSILON};

/// Returns the distance from `p` to the infinite line through `a` and `b`.
///
/// Computed as `|cross(b - a, p - a)| / |b - a|` (twice the triangle area over
/// the base length). The result is not clamped to the segment, which is the
/// error metric used by line simplification. When `a` and `b` coincide the
/// distance to `a` is returned.
#[must_use]
pub fn perpendicular_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let base = b - a;
    let len = base.norm();
    if len < EPSILON {
        return (p - a).norm();
    }
    base.perp(&(p - a)).abs() / len
}

/// Returns the parameter of the projection of `p` onto the line `a → b`.
///
/// `0` maps to `a` and `1` to `b`; the value is not clamped.
#[must_use]
pub fn project_param(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return 0.0;
    }
    (p - a).dot(&d) / len_sq
}

/// Returns the point of the segment `a → b` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let t = project_param(p, a, b).clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Squared distance from `p` to the segment `a → b` (clamped to the segment).
#[must_use]
pub fn point_to_segment_dist_sq(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm_squared()
}

/// Distance from `p` to the segment `a → b` (clamped to the segment).
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    point_to_segment_dist_sq(p, a, b).sqrt()
}

/// Smallest distance from `p` to any segment of a vertex chain.
///
/// Returns `f64::INFINITY` for an empty chain; a single vertex is treated as
/// a point.
#[must_use]
pub fn point_to_chain_dist(p: &Point2, chain: &[Point2]) -> f64 {
    match chain {
        [] => f64::INFINITY,
        [only] => (p - only).norm(),
        _ => chain
            .windows(2)
            .map(|w| point_to_segment_dist_sq(p, &w[0], &w[1]))
            .fold(f64::INFINITY, f64::min)
            .sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    #[test]
    fn perpendicular_is_unclamped() {
        // (10, 1) lies far beyond b, but only 1 away from the infinite x axis.
        let d = perpendicular_distance(
            &Point2::new(10.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_relative_eq!(d, 1.0, epsilon = TOL);
    }

    #[test]
    fn perpendicular_degenerate_base() {
        let d = perpendicular_distance(
            &Point2::new(3.0, 4.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(0.0, 0.0),
        );
        assert_relative_eq!(d, 5.0, epsilon = TOL);
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        let d = point_to_segment_dist(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_relative_eq!(d, 1.0, epsilon = TOL);
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        // Clamped: (10, 1) is closest to b = (2, 0).
        let d = point_to_segment_dist(
            &Point2::new(10.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_relative_eq!(d, 65.0_f64.sqrt(), epsilon = TOL);
    }

    #[test]
    fn project_param_beyond_end() {
        let t = project_param(
            &Point2::new(4.0, 3.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert_relative_eq!(t, 2.0, epsilon = TOL);
    }

    #[test]
    fn chain_distance_takes_minimum() {
        let chain = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let d = point_to_chain_dist(&Point2::new(12.0, 5.0), &chain);
        assert_relative_eq!(d, 2.0, epsilon = TOL);
        assert!(point_to_chain_dist(&Point2::new(0.0, 0.0), &[]).is_infinite());
    }
}
