use tracing::trace;

use crate::math::distance_2d::perpendicular_distance;
use crate::math::ords::sanitize_accuracy;
use crate::math::Point2;

/// Douglas-Peucker simplification of an ordered vertex sequence.
///
/// # Algorithm
///
/// 1. The first and last vertex of a range are its anchors.
/// 2. The interior vertex farthest from the infinite anchor line is found.
/// 3. If that distance is within `accuracy` the whole range collapses onto
///    its start anchor.
/// 4. Otherwise both halves `[start, max]` and `[max, end]` are processed
///    and the shared vertex is kept once.
///
/// The last vertex of the input is always kept. Ranges are processed from an
/// explicit stack so deep inputs do not grow the call stack.
#[derive(Debug)]
pub struct DouglasPeucker<'a> {
    points: &'a [Point2],
    accuracy: f64,
}

impl<'a> DouglasPeucker<'a> {
    /// Creates a new simplification over `points`.
    #[must_use]
    pub fn new(points: &'a [Point2], accuracy: f64) -> Self {
        Self {
            points,
            accuracy: sanitize_accuracy(accuracy),
        }
    }

    /// Executes the simplification, returning the kept vertices in order.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let n = self.points.len();
        if n <= 2 {
            return self.points.to_vec();
        }

        let mut keep = vec![false; n];
        keep[0] = true;
        keep[n - 1] = true;

        let mut ranges = vec![(0, n - 1)];
        while let Some((start, end)) = ranges.pop() {
            if end <= start + 1 {
                continue;
            }
            let anchor_a = &self.points[start];
            let anchor_b = &self.points[end];

            let mut max_dist = 0.0;
            let mut max_index = start;
            for (i, p) in self.points.iter().enumerate().take(end).skip(start + 1) {
                let d = perpendicular_distance(p, anchor_a, anchor_b);
                if d > max_dist {
                    max_dist = d;
                    max_index = i;
                }
            }

            if max_dist > self.accuracy {
                keep[max_index] = true;
                ranges.push((max_index, end));
                ranges.push((start, max_index));
            }
        }

        let simplified: Vec<Point2> = self
            .points
            .iter()
            .zip(keep)
            .filter_map(|(p, kept)| kept.then_some(*p))
            .collect();
        trace!(
            before = n,
            after = simplified.len(),
            accuracy = self.accuracy,
            "douglas-peucker"
        );
        simplified
    }
}
