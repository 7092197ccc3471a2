use std::cmp::Ordering;

/// Normalizes a caller-supplied accuracy.
///
/// NaN and negative values behave like an exact comparison (`0.0`).
#[must_use]
pub fn sanitize_accuracy(accuracy: f64) -> f64 {
    if accuracy > 0.0 {
        accuracy
    } else {
        0.0
    }
}

/// Returns `true` if two ordinates are within `accuracy` of each other.
#[must_use]
pub fn match_ords(a: f64, b: f64, accuracy: f64) -> bool {
    (a - b).abs() <= accuracy
}

/// Returns `true` if two coordinates are within `accuracy` (euclidean) of each other.
#[must_use]
pub fn match_coords(ax: f64, ay: f64, bx: f64, by: f64, accuracy: f64) -> bool {
    dist_sq(ax, ay, bx, by) <= accuracy * accuracy
}

/// Squared euclidean distance between two coordinates.
#[must_use]
pub fn dist_sq(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

/// Orders two ordinates. Finite values only; NaN compares equal.
#[must_use]
pub fn compare_ords(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Canonical coordinate order: by x, then by y.
#[must_use]
pub fn compare_coords(ax: f64, ay: f64, bx: f64, by: f64) -> Ordering {
    compare_ords(ax, bx).then_with(|| compare_ords(ay, by))
}

/// Returns `true` if both ordinates are finite.
#[must_use]
pub fn is_finite_coord(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite()
}
