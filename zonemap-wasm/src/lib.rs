use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod geocode;
mod ids;
mod interop;
mod logging;

pub use api::{ring_contains, segment_distance, set_panic_hook};
pub use logging::init_logging;

/// JS handle to one editing engine. The engine is shared with in-flight
/// address lookups, which settle after the originating call has returned.
#[wasm_bindgen]
pub struct ZoneMap {
    pub(crate) inner: Rc<RefCell<zonemap::Engine>>,
    pub(crate) geocoder: Option<js_sys::Function>,
}

impl ZoneMap {
    pub fn rs_new(engine: zonemap::Engine) -> ZoneMap {
        ZoneMap { inner: Rc::new(RefCell::new(engine)), geocoder: None }
    }
    pub fn rs_version(&self) -> u64 { self.inner.borrow().version() }
}
