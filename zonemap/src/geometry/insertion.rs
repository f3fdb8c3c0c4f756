use crate::geometry::math::seg_distance_sq;
use crate::model::Point;

/// Index at which `point` should be spliced into `ring`: one past the start
/// vertex of the nearest edge (closing edge included). Ties keep the lowest
/// start index. `None` only for an empty ring.
///
/// Distance is measured to the clamped segment, so a click beyond an edge's
/// span can still pick that edge through its endpoint.
pub fn nearest_edge_insertion_index(point: Point, ring: &[Point]) -> Option<usize> {
    let n = ring.len();
    let mut best: Option<(usize, f64)> = None;
    for i in 0..n {
        let (d2, _) = seg_distance_sq(point, ring[i], ring[(i + 1) % n]);
        if best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }
    best.map(|(i, _)| i + 1)
}
