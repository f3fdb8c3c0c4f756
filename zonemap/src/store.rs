use crate::error::ZoneError;
use crate::model::{Color, Point, Ring, Zone, ZoneId};

/// Zones in insertion order, plus the current selection key.
///
/// The selection is a plain id, never a reference into `zones`; every read
/// revalidates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    selected: Option<ZoneId>,
}

impl ZoneStore {
    pub fn new() -> Self {
        ZoneStore::default()
    }

    pub fn create_zone(
        &mut self,
        id: ZoneId,
        ring: Ring,
        name: impl Into<String>,
        color: Color,
    ) -> Result<ZoneId, ZoneError> {
        if ring.is_empty() {
            return Err(ZoneError::EmptyRing);
        }
        if self.position(&id).is_some() {
            return Err(ZoneError::DuplicateZone(id));
        }
        self.zones.push(Zone {
            id: id.clone(),
            name: name.into(),
            color,
            ring,
        });
        Ok(id)
    }

    pub fn update_ring(&mut self, id: &ZoneId, ring: Ring) -> Result<(), ZoneError> {
        if ring.is_empty() {
            return Err(ZoneError::EmptyRing);
        }
        self.zone_mut(id)?.ring = ring;
        Ok(())
    }

    pub fn replace_vertex(&mut self, id: &ZoneId, index: usize, p: Point) -> Result<(), ZoneError> {
        let points = self.zone_mut(id)?.ring.points_mut();
        let len = points.len();
        match points.get_mut(index) {
            Some(slot) => {
                *slot = p;
                Ok(())
            }
            None => Err(ZoneError::IndexOutOfRange { index, len }),
        }
    }

    /// `index == len` appends.
    pub fn insert_vertex(&mut self, id: &ZoneId, index: usize, p: Point) -> Result<(), ZoneError> {
        let points = self.zone_mut(id)?.ring.points_mut();
        if index > points.len() {
            return Err(ZoneError::IndexOutOfRange {
                index,
                len: points.len(),
            });
        }
        points.insert(index, p);
        Ok(())
    }

    pub fn set_style(&mut self, id: &ZoneId, name: impl Into<String>, color: Color) -> Result<(), ZoneError> {
        let z = self.zone_mut(id)?;
        z.name = name.into();
        z.color = color;
        Ok(())
    }

    pub fn remove_zone(&mut self, id: &ZoneId) -> Result<Zone, ZoneError> {
        let pos = self
            .position(id)
            .ok_or_else(|| ZoneError::UnknownZone(id.clone()))?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(self.zones.remove(pos))
    }

    /// Unknown ids clear the selection instead of failing.
    pub fn select(&mut self, id: &ZoneId) {
        self.selected = self.position(id).map(|_| id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ZoneId> {
        self.selected.as_ref().filter(|id| self.position(id).is_some())
    }

    pub fn get(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    pub fn list(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    fn position(&self, id: &ZoneId) -> Option<usize> {
        self.zones.iter().position(|z| &z.id == id)
    }

    fn zone_mut(&mut self, id: &ZoneId) -> Result<&mut Zone, ZoneError> {
        self.zones
            .iter_mut()
            .find(|z| &z.id == id)
            .ok_or_else(|| ZoneError::UnknownZone(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_ZONE_COLOR;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn tri() -> Ring {
        vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 4.0)].into()
    }

    fn store_with(ids: &[&str]) -> ZoneStore {
        let mut s = ZoneStore::new();
        for id in ids {
            s.create_zone(ZoneId::new(*id), tri(), *id, DEFAULT_ZONE_COLOR).unwrap();
        }
        s
    }

    #[test]
    fn create_rejects_empty_ring() {
        let mut s = ZoneStore::new();
        let r = s.create_zone(ZoneId::new("a"), Ring::new(), "a", DEFAULT_ZONE_COLOR);
        assert_eq!(r, Err(ZoneError::EmptyRing));
        assert!(s.is_empty());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let s = store_with(&["c", "a", "b"]);
        let ids: Vec<&str> = s.list().iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn vertex_index_bounds() {
        let mut s = store_with(&["a"]);
        let a = ZoneId::new("a");
        assert_eq!(
            s.replace_vertex(&a, 3, pt(1.0, 1.0)),
            Err(ZoneError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(s.replace_vertex(&a, 2, pt(1.0, 5.0)).is_ok());
        assert!(s.insert_vertex(&a, 3, pt(-1.0, 2.0)).is_ok());
        assert_eq!(
            s.insert_vertex(&a, 5, pt(0.0, 0.0)),
            Err(ZoneError::IndexOutOfRange { index: 5, len: 4 })
        );
        let ring = &s.get(&a).unwrap().ring;
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[2], pt(1.0, 5.0));
        assert_eq!(ring[3], pt(-1.0, 2.0));
    }

    #[test]
    fn unknown_zone_errors() {
        let mut s = store_with(&["a"]);
        let ghost = ZoneId::new("ghost");
        let before = s.clone();
        assert_eq!(s.update_ring(&ghost, tri()), Err(ZoneError::UnknownZone(ghost.clone())));
        assert!(s.insert_vertex(&ghost, 0, pt(0.0, 0.0)).is_err());
        assert!(s.replace_vertex(&ghost, 0, pt(0.0, 0.0)).is_err());
        assert!(s.set_style(&ghost, "x", DEFAULT_ZONE_COLOR).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn update_ring_rejects_empty() {
        let mut s = store_with(&["a"]);
        assert_eq!(s.update_ring(&ZoneId::new("a"), Ring::new()), Err(ZoneError::EmptyRing));
        assert_eq!(s.get(&ZoneId::new("a")).unwrap().ring.len(), 3);
    }

    #[test]
    fn selection_revalidates() {
        let mut s = store_with(&["a", "b"]);
        s.select(&ZoneId::new("b"));
        assert_eq!(s.selected().map(ZoneId::as_str), Some("b"));
        s.select(&ZoneId::new("nope"));
        assert_eq!(s.selected(), None);
        s.select(&ZoneId::new("a"));
        s.remove_zone(&ZoneId::new("a")).unwrap();
        assert_eq!(s.selected(), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut s = store_with(&["a"]);
        assert!(s.create_zone(ZoneId::new("a"), tri(), "again", DEFAULT_ZONE_COLOR).is_err());
        assert_eq!(s.len(), 1);
    }
}
