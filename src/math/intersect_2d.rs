use super::distance_2d::{perpendicular_distance, point_to_segment_dist, project_param};
use super::{Point2, EPSILON};

/// Outcome of a tolerant segment-segment intersection test.
///
/// Parameters are expressed along the first segment (`t`) and the second
/// segment (`u`), both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet within the accuracy.
    None,
    /// The segments meet at a single point.
    Point { t: f64, u: f64 },
    /// The segments are collinear and share the sub-range `[t0, t1]` of the first segment.
    Overlap { t0: f64, t1: f64 },
}

/// Parametric segment-segment intersection in 2D.
///
/// With `d1 = a1 - a0`, `d2 = b1 - b0` and `denom = cross(d1, d2)`, crossing
/// segments are solved for `t` and `u` and accepted when both lie in `[0, 1]`,
/// widened at each end by `accuracy` expressed in parameter units. Parallel
/// segments never take the cross-product path: when collinear within
/// `accuracy`, the second segment is projected onto the first and the
/// parameter intervals are overlapped.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    accuracy: f64,
) -> SegmentIntersection {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let len1 = d1.norm();
    let len2 = d2.norm();

    if len1 < EPSILON {
        return if point_to_segment_dist(a0, b0, b1) <= accuracy {
            SegmentIntersection::Point {
                t: 0.0,
                u: project_param(a0, b0, b1).clamp(0.0, 1.0),
            }
        } else {
            SegmentIntersection::None
        };
    }
    if len2 < EPSILON {
        return if point_to_segment_dist(b0, a0, a1) <= accuracy {
            SegmentIntersection::Point {
                t: project_param(b0, a0, a1).clamp(0.0, 1.0),
                u: 0.0,
            }
        } else {
            SegmentIntersection::None
        };
    }

    let denom = d1.perp(&d2);
    if denom.abs() <= EPSILON * len1 * len2 {
        return collinear_overlap(a0, a1, b0, b1, len1, accuracy);
    }

    let w = b0 - a0;
    let t = w.perp(&d2) / denom;
    let u = w.perp(&d1) / denom;
    let eps_t = accuracy / len1;
    let eps_u = accuracy / len2;
    if t >= -eps_t && t <= 1.0 + eps_t && u >= -eps_u && u <= 1.0 + eps_u {
        SegmentIntersection::Point {
            t: t.clamp(0.0, 1.0),
            u: u.clamp(0.0, 1.0),
        }
    } else {
        SegmentIntersection::None
    }
}

fn collinear_overlap(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    len1: f64,
    accuracy: f64,
) -> SegmentIntersection {
    if perpendicular_distance(b0, a0, a1) > accuracy || perpendicular_distance(b1, a0, a1) > accuracy
    {
        return SegmentIntersection::None;
    }
    let tb0 = project_param(b0, a0, a1);
    let tb1 = project_param(b1, a0, a1);
    let (lo, hi) = if tb0 <= tb1 { (tb0, tb1) } else { (tb1, tb0) };
    let eps_t = accuracy / len1;
    if hi < -eps_t || lo > 1.0 + eps_t {
        return SegmentIntersection::None;
    }
    let t0 = lo.clamp(0.0, 1.0);
    let t1 = hi.clamp(0.0, 1.0);
    if (t1 - t0) * len1 <= accuracy {
        let t = 0.5 * (t0 + t1);
        let pt = point_at(a0, a1, t);
        return SegmentIntersection::Point {
            t,
            u: project_param(&pt, b0, b1).clamp(0.0, 1.0),
        };
    }
    SegmentIntersection::Overlap { t0, t1 }
}

/// Clips the segment `a → b` against the axis-aligned box `[min, max]`.
///
/// Returns the parameter range `(t0, t1)` of the part inside the box
/// (Liang–Barsky), or `None` if the segment misses the box.
#[must_use]
pub fn clip_segment_to_rect(
    a: &Point2,
    b: &Point2,
    min: &Point2,
    max: &Point2,
) -> Option<(f64, f64)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in edges {
        if p.abs() < EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

/// Linear interpolation along `a → b`.
#[must_use]
pub fn point_at(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_segment_crossing() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(4.0, 4.0),
            &p(0.0, 4.0),
            &p(4.0, 0.0),
            0.0,
        );
        let SegmentIntersection::Point { t, u } = hit else {
            panic!("expected a point, got {hit:?}");
        };
        assert_relative_eq!(t, 0.5, epsilon = TOL);
        assert_relative_eq!(u, 0.5, epsilon = TOL);
        let pt = point_at(&p(0.0, 0.0), &p(4.0, 4.0), t);
        assert_relative_eq!(pt.x, 2.0, epsilon = TOL);
        assert_relative_eq!(pt.y, 2.0, epsilon = TOL);
    }

    #[test]
    fn segment_segment_no_crossing() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(2.0, -1.0),
            &p(2.0, 1.0),
            0.0,
        );
        assert_eq!(hit, SegmentIntersection::None);
    }

    #[test]
    fn near_miss_accepted_within_accuracy() {
        // T-junction with a 0.05 gap.
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(5.0, 0.05),
            &p(5.0, 5.0),
            0.1,
        );
        let SegmentIntersection::Point { t, u } = hit else {
            panic!("expected a point, got {hit:?}");
        };
        assert_relative_eq!(t, 0.5, epsilon = TOL);
        assert_relative_eq!(u, 0.0, epsilon = TOL);
    }

    #[test]
    fn collinear_overlap_projects_interval() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(12.0, 0.0),
            &p(5.0, 0.0),
            0.0,
        );
        assert_eq!(hit, SegmentIntersection::Overlap { t0: 0.5, t1: 1.0 });
    }

    #[test]
    fn collinear_end_to_end_is_a_point() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 0.0),
            &p(3.0, 0.0),
            0.0,
        );
        assert_eq!(hit, SegmentIntersection::Point { t: 1.0, u: 0.0 });
    }

    #[test]
    fn parallel_apart_is_none() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0),
            0.5,
        );
        assert_eq!(hit, SegmentIntersection::None);
    }

    #[test]
    fn clip_passes_through_box() {
        let (t0, t1) =
            clip_segment_to_rect(&p(-1.0, 1.0), &p(3.0, 1.0), &p(0.0, 0.0), &p(2.0, 2.0)).unwrap();
        assert_relative_eq!(t0, 0.25, epsilon = TOL);
        assert_relative_eq!(t1, 0.75, epsilon = TOL);
    }

    #[test]
    fn clip_misses_box() {
        assert!(
            clip_segment_to_rect(&p(-1.0, 3.0), &p(3.0, 3.0), &p(0.0, 0.0), &p(2.0, 2.0))
                .is_none()
        );
    }
}
