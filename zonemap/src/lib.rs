pub mod config;
pub mod error;
pub mod geocode;
pub mod ids;
pub mod model;
pub mod mode;
pub mod store;
pub mod geometry {
    pub mod insertion;
    pub mod limits;
    pub mod math;
    pub mod winding;

    pub use insertion::nearest_edge_insertion_index;
    pub use math::distance_point_to_segment;
    pub use winding::contains_point;
}
pub mod algorithms {
    pub mod containment;
}
mod dispatch;
mod json;
mod snapshot;

pub use config::EngineConfig;
pub use dispatch::{ClickOutcome, Placement};
pub use error::{GeocodeError, ZoneError};
pub use geocode::{Address, AddressState, LookupTicket};
pub use ids::{IdSource, SequentialIds};
pub use mode::{Draft, EditMode, Finished, ModeKind};
pub use model::{Color, Point, Ring, Zone, ZoneId};
pub use snapshot::Snapshot;
pub use store::ZoneStore;

use geocode::AddressTracker;

/// The editing engine: one logical actor owning the zones, the edit mode,
/// the marker placement and the outstanding address lookup.
///
/// Every mutation goes through a method here, which consults `EditMode`
/// before touching the store.
pub struct Engine {
    pub(crate) store: ZoneStore,
    pub(crate) mode: EditMode,
    pub(crate) placement: Option<Placement>,
    pub(crate) lookups: AddressTracker,
    pub(crate) ids: Box<dyn IdSource>,
    pub(crate) config: EngineConfig,
    pub(crate) ver: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let ids = SequentialIds::new(config.id_prefix.clone());
        Engine::from_parts(config, Box::new(ids))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ZoneError> {
        let config = config.validated()?;
        let ids = SequentialIds::new(config.id_prefix.clone());
        Ok(Engine::from_parts(config, Box::new(ids)))
    }

    /// Use an injected id source instead of the sequential default.
    pub fn with_id_source(config: EngineConfig, ids: Box<dyn IdSource>) -> Result<Self, ZoneError> {
        Ok(Engine::from_parts(config.validated()?, ids))
    }

    fn from_parts(config: EngineConfig, ids: Box<dyn IdSource>) -> Self {
        Engine {
            store: ZoneStore::new(),
            mode: EditMode::Idle,
            placement: None,
            lookups: AddressTracker::new(),
            ids,
            config,
            ver: 1,
        }
    }

    /// Monotonic; bumps on every state change a renderer would care about.
    pub fn version(&self) -> u64 {
        self.ver
    }

    pub(crate) fn bump(&mut self) {
        self.ver += 1;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Read side

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }
    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }
    pub fn store(&self) -> &ZoneStore {
        &self.store
    }
    pub fn zones(&self) -> &[Zone] {
        self.store.list()
    }
    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.store.get(id)
    }
    pub fn selected(&self) -> Option<&ZoneId> {
        self.store.selected()
    }
    pub fn draft(&self) -> Option<&Draft> {
        self.mode.draft()
    }
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Whether the "start editing" control should be enabled.
    pub fn can_start_editing(&self) -> bool {
        matches!(self.mode, EditMode::Idle) && self.store.selected().is_some()
    }

    pub fn find_containing_zone(&self, p: Point) -> Option<&Zone> {
        algorithms::containment::find_containing_zone(p, self.store.list())
    }

    // Mode transitions

    pub fn start_drawing(&mut self) -> Result<(), ZoneError> {
        self.mode.start_drawing(self.config.default_color)?;
        log::debug!("drawing started");
        self.bump();
        Ok(())
    }

    pub fn set_draft_style(&mut self, name: &str, color: Color) -> Result<(), ZoneError> {
        check_name(name)?;
        self.mode.set_draft_style(name, color)?;
        self.bump();
        Ok(())
    }

    /// End drawing (committing a non-empty draft) or end editing.
    pub fn finish(&mut self) -> Result<Finished, ZoneError> {
        if self.mode.draft().map_or(false, |d| !d.ring.is_empty())
            && self.store.len() >= self.config.max_zones
        {
            return Err(ZoneError::LimitExceeded {
                what: "zones",
                max: self.config.max_zones,
            });
        }
        let done = self.mode.finish(&mut self.store, self.ids.as_mut())?;
        match &done {
            Finished::Committed(id) => log::info!("zone {} committed", id),
            Finished::Discarded => log::debug!("empty draft discarded"),
            Finished::EditClosed(id) => log::debug!("editing of {} finished", id),
        }
        self.bump();
        Ok(done)
    }

    pub fn cancel_drawing(&mut self) -> Result<(), ZoneError> {
        let dropped = self.mode.cancel()?;
        log::debug!("draft of {} points cancelled", dropped.ring.len());
        self.bump();
        Ok(())
    }

    pub fn start_editing(&mut self) -> Result<ZoneId, ZoneError> {
        let id = self.mode.start_editing(&self.store)?;
        log::debug!("editing {}", id);
        self.bump();
        Ok(id)
    }

    // Selection and zone maintenance

    /// Select `id`; unknown ids clear the selection. While editing, the edit
    /// follows the selection.
    pub fn select(&mut self, id: &ZoneId) {
        self.store.select(id);
        self.mode.retarget(self.store.selected());
        self.bump();
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
        self.mode.retarget(None);
        self.bump();
    }

    pub fn set_zone_style(&mut self, id: &ZoneId, name: &str, color: Color) -> Result<(), ZoneError> {
        check_name(name)?;
        self.store.set_style(id, name, color)?;
        self.bump();
        Ok(())
    }

    /// Replace the ring of the zone under edit.
    pub fn update_zone_ring(&mut self, id: &ZoneId, ring: Ring) -> Result<(), ZoneError> {
        if self.mode.editing() != Some(id) {
            return Err(ZoneError::InvalidTransition {
                mode: self.mode.kind(),
                action: "replace a ring",
            });
        }
        check_ring(&ring, self.config.max_ring_points)?;
        self.store.update_ring(id, ring)?;
        self.bump();
        Ok(())
    }

    pub fn remove_zone(&mut self, id: &ZoneId) -> Result<Zone, ZoneError> {
        if matches!(self.mode, EditMode::Drawing(_)) {
            return Err(ZoneError::InvalidTransition {
                mode: ModeKind::Drawing,
                action: "remove a zone",
            });
        }
        let removed = self.store.remove_zone(id)?;
        if self.mode.editing() == Some(id) {
            self.mode = EditMode::Idle;
        }
        if let Some(p) = self.placement.as_mut() {
            if p.zone.as_ref() == Some(id) {
                p.zone = None;
                p.zone_name = None;
            }
        }
        log::info!("zone {} removed", id);
        self.bump();
        Ok(removed)
    }

    // Address lookups

    /// Hand back the answer for `ticket`. Returns whether it was applied;
    /// answers for superseded placements are dropped.
    pub fn apply_address(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Address, GeocodeError>,
    ) -> bool {
        let Some(state) = self.lookups.settle(ticket, result) else {
            return false;
        };
        match self.placement.as_mut() {
            Some(p) if p.ticket == *ticket => {
                p.address = state;
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Drop the marker and forget any outstanding lookup.
    pub fn clear_placement(&mut self) {
        self.placement = None;
        self.lookups.cancel();
        self.bump();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        snapshot::snapshot_impl(self)
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<usize, ZoneError> {
        json::from_json_impl(self, v)
    }
}

pub(crate) fn check_point(p: Point) -> Result<(), ZoneError> {
    if !p.is_finite() {
        return Err(ZoneError::NonFinite);
    }
    if !geometry::limits::in_coord_bounds(p.x) || !geometry::limits::in_coord_bounds(p.y) {
        return Err(ZoneError::OutOfBounds);
    }
    Ok(())
}

pub(crate) fn check_ring(ring: &[Point], max_points: usize) -> Result<(), ZoneError> {
    if ring.len() > max_points {
        return Err(ZoneError::LimitExceeded {
            what: "ring points",
            max: max_points,
        });
    }
    ring.iter().try_for_each(|p| check_point(*p))
}

pub(crate) fn check_name(name: &str) -> Result<(), ZoneError> {
    if name.len() > geometry::limits::MAX_NAME_LEN {
        return Err(ZoneError::LimitExceeded {
            what: "name bytes",
            max: geometry::limits::MAX_NAME_LEN,
        });
    }
    Ok(())
}
