use crate::model::Point;

/// Squared distance from `p` to segment `a`-`b`, plus the clamped projection
/// parameter along the segment. A zero-length segment projects to `a` (t = 0).
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let vx = b.x - a.x; let vy = b.y - a.y;
    let wx = p.x - a.x; let wy = p.y - a.y;
    let vv = vx*vx + vy*vy;
    let mut t = if vv > 0.0 { (wx*vx + wy*vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let projx = a.x + t * vx; let projy = a.y + t * vy;
    let dx = p.x - projx; let dy = p.y - projy;
    (dx*dx + dy*dy, t)
}

/// Euclidean distance from `point` to the closed segment `start`-`end`.
pub fn distance_point_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let (d2, _) = seg_distance_sq(point, start, end);
    d2.sqrt()
}

/// Axis-aligned bounds as (minx, miny, maxx, maxy); `None` for no points.
pub fn ring_bbox(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let init = (first.x, first.y, first.x, first.y);
    Some(points.iter().skip(1).fold(init, |(x0, y0, x1, y1), p| {
        (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
    }))
}

#[inline]
pub fn bbox_contains(b: (f64, f64, f64, f64), p: Point) -> bool {
    p.x >= b.0 && p.x <= b.2 && p.y >= b.1 && p.y <= b.3
}
