use serde::Serialize;

use crate::dispatch::Placement;
use crate::mode::{Draft, ModeKind};
use crate::model::{Zone, ZoneId};
use crate::Engine;

/// Read-only view for a presentation layer. Borrowed, so taking one per
/// frame costs nothing until it is serialized.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot<'a> {
    pub version: u64,
    pub mode: ModeKind,
    pub zones: &'a [Zone],
    pub draft: Option<&'a Draft>,
    pub selected: Option<&'a ZoneId>,
    pub editing: Option<&'a ZoneId>,
    pub can_start_editing: bool,
    pub placement: Option<&'a Placement>,
    pub delivery_status: Option<String>,
}

pub(crate) fn snapshot_impl(e: &Engine) -> Snapshot<'_> {
    Snapshot {
        version: e.ver,
        mode: e.mode.kind(),
        zones: e.store.list(),
        draft: e.mode.draft(),
        selected: e.store.selected(),
        editing: e.mode.editing(),
        can_start_editing: e.can_start_editing(),
        placement: e.placement.as_ref(),
        delivery_status: e.placement.as_ref().map(Placement::delivery_status),
    }
}
