use crate::ZoneMap;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use zonemap::{
    geometry, Address, ClickOutcome, Color, Engine, EngineConfig, Finished, GeocodeError,
    LookupTicket, Point, ZoneError, ZoneId,
};
use crate::error;
use crate::interop::{arr_f64, flatten_points, unflatten_points};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Even-odd containment of (x, y) in a flat `[x0, y0, x1, y1, ...]` ring.
#[wasm_bindgen]
pub fn ring_contains(ring: &[f64], x: f64, y: f64) -> bool {
    match unflatten_points(ring) {
        Some(points) => geometry::contains_point(Point::new(x, y), &points),
        None => false,
    }
}

/// Distance from (px, py) to the segment (ax, ay)-(bx, by).
#[wasm_bindgen]
pub fn segment_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    geometry::distance_point_to_segment(Point::new(px, py), Point::new(ax, ay), Point::new(bx, by))
}

fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

fn parse_color(s: &str) -> Result<Color, ZoneError> {
    s.parse()
}

fn finite(x: f64, y: f64) -> Result<(), JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(())
}

fn finished_value(done: &Finished) -> JsValue {
    match done {
        Finished::Committed(id) => JsValue::from_str(id.as_str()),
        Finished::Discarded | Finished::EditClosed(_) => JsValue::NULL,
    }
}

#[wasm_bindgen]
impl ZoneMap {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ZoneMap {
        ZoneMap::rs_new(Engine::new())
    }

    /// Build from a (possibly partial) config object and an optional id
    /// function such as `() => crypto.randomUUID()`.
    pub fn with_config(config: JsValue, id_source: Option<Function>) -> Result<ZoneMap, JsValue> {
        let cfg: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            let v = serde_wasm_bindgen::from_value::<serde_json::Value>(config)
                .map_err(|e| error::err("json_parse", e.to_string(), None))?;
            EngineConfig::from_json_value(v).map_err(|e| error::zone(&e))?
        };
        let engine = match id_source {
            Some(f) => {
                let ids = crate::ids::JsIdSource::new(f, &cfg.id_prefix);
                Engine::with_id_source(cfg, Box::new(ids))
            }
            None => Engine::with_config(cfg),
        }
        .map_err(|e| error::zone(&e))?;
        Ok(ZoneMap::rs_new(engine))
    }

    pub fn version(&self) -> u64 {
        self.rs_version()
    }

    /// `(x, y) => Promise<{ location, route }>`; pass `undefined` to disable
    /// lookups.
    pub fn set_geocoder(&mut self, geocoder: Option<Function>) {
        self.geocoder = geocoder;
    }

    // Modes
    pub fn mode(&self) -> String {
        self.inner.borrow().mode_kind().to_string()
    }
    pub fn start_drawing(&mut self) -> bool {
        self.inner.borrow_mut().start_drawing().is_ok()
    }
    pub fn start_drawing_res(&mut self) -> JsValue {
        error::result(self.inner.borrow_mut().start_drawing().map(|_| JsValue::TRUE))
    }
    pub fn set_draft_style_res(&mut self, name: &str, color: &str) -> JsValue {
        let r = parse_color(color).and_then(|c| self.inner.borrow_mut().set_draft_style(name, c));
        error::result(r.map(|_| JsValue::TRUE))
    }
    /// Returns the committed zone id, or null when nothing was committed.
    pub fn finish(&mut self) -> Option<String> {
        match self.inner.borrow_mut().finish() {
            Ok(Finished::Committed(id)) => Some(id.as_str().to_string()),
            _ => None,
        }
    }
    pub fn finish_res(&mut self) -> JsValue {
        error::result(self.inner.borrow_mut().finish().map(|d| finished_value(&d)))
    }
    pub fn cancel_drawing(&mut self) -> bool {
        self.inner.borrow_mut().cancel_drawing().is_ok()
    }
    pub fn start_editing(&mut self) -> bool {
        self.inner.borrow_mut().start_editing().is_ok()
    }
    pub fn start_editing_res(&mut self) -> JsValue {
        let r = self.inner.borrow_mut().start_editing();
        error::result(r.map(|id| JsValue::from_str(id.as_str())))
    }
    pub fn can_start_editing(&self) -> bool {
        self.inner.borrow().can_start_editing()
    }

    // Selection + zones
    pub fn select(&mut self, id: &str) {
        self.inner.borrow_mut().select(&ZoneId::new(id));
    }
    pub fn clear_selection(&mut self) {
        self.inner.borrow_mut().clear_selection();
    }
    pub fn selected(&self) -> Option<String> {
        self.inner.borrow().selected().map(|id| id.as_str().to_string())
    }
    pub fn zone_count(&self) -> u32 {
        self.inner.borrow().zones().len() as u32
    }
    pub fn zone_ids(&self) -> JsValue {
        let e = self.inner.borrow();
        let ids: Vec<&str> = e.zones().iter().map(|z| z.id.as_str()).collect();
        to_js(&ids)
    }
    /// Flat `[x0, y0, x1, y1, ...]` ring of a zone, or null for an unknown id.
    pub fn get_zone_ring(&self, id: &str) -> JsValue {
        let e = self.inner.borrow();
        match e.zone(&ZoneId::new(id)) {
            Some(z) => arr_f64(&flatten_points(&z.ring)).into(),
            None => JsValue::NULL,
        }
    }
    pub fn get_zone_res(&self, id: &str) -> JsValue {
        let e = self.inner.borrow();
        let id = ZoneId::new(id);
        match e.zone(&id) {
            Some(z) => error::ok(to_js(z)),
            None => error::zone(&ZoneError::UnknownZone(id)),
        }
    }
    pub fn set_zone_style_res(&mut self, id: &str, name: &str, color: &str) -> JsValue {
        let r = parse_color(color)
            .and_then(|c| self.inner.borrow_mut().set_zone_style(&ZoneId::new(id), name, c));
        error::result(r.map(|_| JsValue::TRUE))
    }
    pub fn update_zone_ring_res(&mut self, id: &str, ring: &[f64]) -> JsValue {
        let Some(points) = unflatten_points(ring) else {
            return error::invalid_arg("ring", "ring must hold x,y pairs");
        };
        let r = self.inner.borrow_mut().update_zone_ring(&ZoneId::new(id), points.into());
        error::result(r.map(|_| JsValue::TRUE))
    }
    pub fn remove_zone(&mut self, id: &str) -> bool {
        self.inner.borrow_mut().remove_zone(&ZoneId::new(id)).is_ok()
    }
    pub fn remove_zone_res(&mut self, id: &str) -> JsValue {
        let r = self.inner.borrow_mut().remove_zone(&ZoneId::new(id));
        error::result(r.map(|_| JsValue::TRUE))
    }

    // Input events
    pub fn on_map_click(&mut self, x: f64, y: f64) -> JsValue {
        let v = self.on_map_click_res(x, y);
        js_sys::Reflect::get(&v, &JsValue::from_str("value")).unwrap_or(JsValue::NULL)
    }
    /// Route a click by mode. In idle mode the result describes the marker
    /// placement, and the address lookup (if a geocoder is set) is started.
    pub fn on_map_click_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Err(e) = finite(x, y) {
            return e;
        }
        let outcome = self.inner.borrow_mut().on_map_click(Point::new(x, y));
        match outcome {
            Ok(out) => {
                if let ClickOutcome::Placed(p) = &out {
                    if let Some(g) = &self.geocoder {
                        crate::geocode::spawn_lookup(self.inner.clone(), g.clone(), p.ticket);
                    }
                }
                error::ok(to_js(&out))
            }
            Err(e) => error::zone(&e),
        }
    }
    pub fn on_vertex_drag(&mut self, id: &str, index: u32, x: f64, y: f64) -> bool {
        self.inner
            .borrow_mut()
            .on_vertex_drag(&ZoneId::new(id), index as usize, Point::new(x, y))
    }

    // Queries
    pub fn find_containing_zone(&self, x: f64, y: f64) -> Option<String> {
        self.inner
            .borrow()
            .find_containing_zone(Point::new(x, y))
            .map(|z| z.id.as_str().to_string())
    }
    pub fn delivery_status(&self) -> Option<String> {
        self.inner.borrow().placement().map(|p| p.delivery_status())
    }
    pub fn snapshot(&self) -> JsValue {
        let e = self.inner.borrow();
        to_js(&e.snapshot())
    }

    // Hosts that run their own lookups settle tickets here.
    pub fn resolve_address_res(&mut self, ticket: JsValue, location: String, route: String) -> JsValue {
        let ticket: LookupTicket = match serde_wasm_bindgen::from_value(ticket) {
            Ok(t) => t,
            Err(e) => return error::invalid_arg("ticket", e.to_string()),
        };
        let applied = self
            .inner
            .borrow_mut()
            .apply_address(&ticket, Ok(Address { location, route }));
        error::ok(JsValue::from_bool(applied))
    }
    pub fn fail_address_res(&mut self, ticket: JsValue, reason: String) -> JsValue {
        let ticket: LookupTicket = match serde_wasm_bindgen::from_value(ticket) {
            Ok(t) => t,
            Err(e) => return error::invalid_arg("ticket", e.to_string()),
        };
        let applied = self
            .inner
            .borrow_mut()
            .apply_address(&ticket, Err(GeocodeError::Rejected(reason)));
        error::ok(JsValue::from_bool(applied))
    }
    pub fn clear_placement(&mut self) {
        self.inner.borrow_mut().clear_placement();
    }

    // JSON
    pub fn to_json(&self) -> JsValue {
        let v = self.inner.borrow().to_json_value();
        // Plain objects rather than Maps for JSON.stringify friendliness.
        let ser = serde_wasm_bindgen::Serializer::json_compatible();
        serde::Serialize::serialize(&v, &ser).unwrap_or(JsValue::NULL)
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => {
                let r = self.inner.borrow_mut().from_json_value(val);
                error::result(r.map(|n| JsValue::from_f64(n as f64)))
            }
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
}

impl Default for ZoneMap {
    fn default() -> Self {
        ZoneMap::new()
    }
}
