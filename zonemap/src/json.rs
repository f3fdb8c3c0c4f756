use crate::error::ZoneError;
use crate::geometry::limits;
use crate::mode::EditMode;
use crate::model::{Color, Point, ZoneId};
use crate::store::ZoneStore;
use crate::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Serialize, Deserialize)]
struct ZoneSer {
    id: ZoneId,
    name: String,
    color: Color,
    ring: Vec<Point>,
}

#[derive(Serialize, Deserialize)]
struct Doc {
    version: u32,
    zones: Vec<ZoneSer>,
}

pub fn to_json_impl(e: &Engine) -> Value {
    let zones = e
        .store
        .list()
        .iter()
        .map(|z| ZoneSer {
            id: z.id.clone(),
            name: z.name.clone(),
            color: z.color,
            ring: z.ring.to_vec(),
        })
        .collect();
    let doc = Doc {
        version: limits::DOC_VERSION,
        zones,
    };
    match serde_json::to_value(doc) {
        Ok(v) => v,
        Err(err) => {
            log::error!("zone document did not serialize: {}", err);
            Value::Null
        }
    }
}

/// Replace every zone with the ones in `v`. All-or-nothing: on any error the
/// engine is untouched. Returns the number of zones loaded.
pub fn from_json_impl(e: &mut Engine, v: Value) -> Result<usize, ZoneError> {
    if !matches!(e.mode, EditMode::Idle) {
        return Err(ZoneError::InvalidTransition {
            mode: e.mode.kind(),
            action: "load zones",
        });
    }
    let doc: Doc = serde_json::from_value(v).map_err(|err| ZoneError::InvalidDocument(err.to_string()))?;
    if doc.version != limits::DOC_VERSION {
        return Err(ZoneError::InvalidDocument(format!("unsupported version {}", doc.version)));
    }
    if doc.zones.len() > e.config.max_zones {
        return Err(ZoneError::LimitExceeded {
            what: "zones",
            max: e.config.max_zones,
        });
    }

    let mut seen: HashSet<&ZoneId> = HashSet::new();
    for z in &doc.zones {
        if !seen.insert(&z.id) {
            return Err(ZoneError::DuplicateZone(z.id.clone()));
        }
        crate::check_name(&z.name)?;
        crate::check_ring(&z.ring, e.config.max_ring_points)?;
    }

    let mut store = ZoneStore::new();
    let mut ids = Vec::with_capacity(doc.zones.len());
    for z in doc.zones {
        ids.push(store.create_zone(z.id, z.ring.into(), z.name, z.color)?);
    }

    let n = store.len();
    e.store = store;
    e.placement = None;
    e.lookups.cancel();
    e.ids.reserve(&ids);
    e.bump();
    log::info!("loaded {} zones", n);
    Ok(n)
}
