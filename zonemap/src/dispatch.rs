use serde::{Deserialize, Serialize};

use crate::algorithms::containment::find_containing_zone;
use crate::error::ZoneError;
use crate::geocode::{AddressState, LookupTicket};
use crate::geometry::insertion::nearest_edge_insertion_index;
use crate::mode::EditMode;
use crate::model::{Point, ZoneId};
use crate::{check_point, Engine};

/// A marker drop made while idle: where it landed, which zone (if any)
/// contains it, and the state of its address lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub point: Point,
    pub zone: Option<ZoneId>,
    pub zone_name: Option<String>,
    pub ticket: LookupTicket,
    pub address: AddressState,
}

impl Placement {
    pub fn is_contained(&self) -> bool {
        self.zone.is_some()
    }

    pub fn delivery_status(&self) -> String {
        match &self.zone_name {
            Some(name) => format!("Inside delivery zone: {name}"),
            None => "Outside delivery zone".to_string(),
        }
    }

    /// `x, y` with six decimals, the precision shown next to the marker.
    pub fn formatted_coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.point.x, self.point.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Drawing: the point joined the draft, which now has `len` points.
    DraftPoint { len: usize },
    /// Editing: the point was spliced into the edited zone at `index`.
    VertexInserted { zone: ZoneId, index: usize },
    /// Idle: a marker placement; the caller should resolve `ticket`.
    Placed(Placement),
}

impl Engine {
    /// Route one map click according to the current mode.
    pub fn on_map_click(&mut self, p: Point) -> Result<ClickOutcome, ZoneError> {
        check_point(p)?;
        let outcome = match &self.mode {
            EditMode::Drawing(d) if d.ring.len() >= self.config.max_ring_points => {
                return Err(ZoneError::LimitExceeded {
                    what: "ring points",
                    max: self.config.max_ring_points,
                });
            }
            EditMode::Drawing(_) => ClickOutcome::DraftPoint {
                len: self.mode.add_point(p)?,
            },
            EditMode::Editing(target) => {
                let target = target.clone();
                self.insert_on_nearest_edge(&target, p)?
            }
            EditMode::Idle => ClickOutcome::Placed(self.place_marker(p)),
        };
        self.bump();
        Ok(outcome)
    }

    fn insert_on_nearest_edge(&mut self, target: &ZoneId, p: Point) -> Result<ClickOutcome, ZoneError> {
        if self.store.selected() != Some(target) {
            return Err(self.invariant_broken(ZoneError::NoSelection));
        }
        let Some(zone) = self.store.get(target) else {
            return Err(self.invariant_broken(ZoneError::UnknownZone(target.clone())));
        };
        if zone.ring.len() >= self.config.max_ring_points {
            return Err(ZoneError::LimitExceeded {
                what: "ring points",
                max: self.config.max_ring_points,
            });
        }
        // Zone rings are never empty, so there is always an edge to split.
        let Some(index) = nearest_edge_insertion_index(p, &zone.ring) else {
            return Err(self.invariant_broken(ZoneError::EmptyRing));
        };
        if let Err(e) = self.store.insert_vertex(target, index, p) {
            return Err(self.invariant_broken(e));
        }
        log::debug!("vertex inserted into {} at {}", target, index);
        Ok(ClickOutcome::VertexInserted {
            zone: target.clone(),
            index,
        })
    }

    fn place_marker(&mut self, p: Point) -> Placement {
        let hit = find_containing_zone(p, self.store.list());
        let (zone, zone_name) = match hit {
            Some(z) => (Some(z.id.clone()), Some(z.name.clone())),
            None => (None, None),
        };
        let ticket = self.lookups.issue(p);
        let placement = Placement {
            point: p,
            zone,
            zone_name,
            ticket,
            address: AddressState::Pending,
        };
        log::debug!("{} at {}", placement.delivery_status(), placement.formatted_coordinates());
        self.placement = Some(placement.clone());
        placement
    }

    /// Move vertex `index` of `zone`. Only the zone under edit accepts drags;
    /// anything else is ignored and returns `false`.
    pub fn on_vertex_drag(&mut self, zone: &ZoneId, index: usize, p: Point) -> bool {
        if check_point(p).is_err() {
            log::debug!("ignoring drag to non-finite or out-of-bounds point");
            return false;
        }
        let editable = self.mode.editing() == Some(zone) && self.store.selected() == Some(zone);
        if !editable {
            log::debug!("ignoring drag of {}[{}] in {} mode", zone, index, self.mode.kind());
            return false;
        }
        match self.store.replace_vertex(zone, index, p) {
            Ok(()) => {
                self.bump();
                true
            }
            Err(e) => {
                // Stale handle from the renderer; nothing to move.
                log::debug!("ignoring drag of {}[{}]: {}", zone, index, e);
                false
            }
        }
    }

    // The mode machine keeps these unreachable; reaching one is a bug.
    fn invariant_broken(&self, e: ZoneError) -> ZoneError {
        log::error!("edit invariant broken in {} mode: {}", self.mode.kind(), e);
        debug_assert!(false, "edit invariant broken: {e}");
        e
    }
}
