//! Even-odd point-in-ring testing.
//!
//! Casts a horizontal ray from the query point and toggles membership on every
//! edge it crosses. Points lying exactly on an edge have unspecified
//! membership: the result depends on which side of the float comparison the
//! edge lands and is not special-cased.

use crate::model::Point;

/// Even-odd containment of `point` in the closed ring `ring`.
///
/// Each edge is `(ring[i], ring[j])` with `j` the previous index, so the
/// closing edge is `(ring[0], ring[n - 1])`. Rings with fewer than three
/// vertices contain nothing.
pub fn contains_point(point: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let (px, py) = (point.x, point.y);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        // Straddle test first, so (yj - yi) is never zero in the division
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
