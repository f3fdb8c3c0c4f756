use crate::geometry::math::{bbox_contains, ring_bbox};
use crate::geometry::winding::contains_point;
use crate::model::{Point, Zone};

/// First zone, in store order, whose ring contains `point`. Zones may
/// overlap; earlier zones win.
pub fn find_containing_zone(point: Point, zones: &[Zone]) -> Option<&Zone> {
    zones.iter().find(|z| {
        z.ring.is_complete()
            && ring_bbox(&z.ring).map_or(false, |b| bbox_contains(b, point))
            && contains_point(point, &z.ring)
    })
}
