use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use zonemap::{Address, Engine, GeocodeError, LookupTicket, Point};

/// Resolve `ticket` through the host geocoder without blocking the caller.
/// The answer is handed back to the engine, which drops it if a newer
/// placement has superseded this one.
pub fn spawn_lookup(engine: Rc<RefCell<Engine>>, geocoder: Function, ticket: LookupTicket) {
    spawn_local(async move {
        let result = lookup(&geocoder, ticket.point).await;
        // Never held across the await above.
        match engine.try_borrow_mut() {
            Ok(mut e) => {
                if !e.apply_address(&ticket, result) {
                    log::debug!("geocode answer #{} superseded", ticket.seq);
                }
            }
            Err(_) => log::warn!("engine busy, dropping geocode answer #{}", ticket.seq),
        }
    });
}

async fn lookup(geocoder: &Function, p: Point) -> Result<Address, GeocodeError> {
    let ret = geocoder
        .call2(&JsValue::NULL, &JsValue::from_f64(p.x), &JsValue::from_f64(p.y))
        .map_err(|e| GeocodeError::Rejected(describe(&e)))?;
    // Accept both a promise and a plain value.
    let value = JsFuture::from(Promise::resolve(&ret))
        .await
        .map_err(|e| GeocodeError::Rejected(describe(&e)))?;
    if value.is_null() || value.is_undefined() {
        return Err(GeocodeError::Malformed("no result".into()));
    }
    serde_wasm_bindgen::from_value::<Address>(value).map_err(|e| GeocodeError::Malformed(e.to_string()))
}

pub fn describe(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{:?}", v))
}
