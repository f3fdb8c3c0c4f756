use js_sys::Function;
use wasm_bindgen::JsValue;
use zonemap::{IdSource, SequentialIds, ZoneId};

/// Ids from a host function such as `() => crypto.randomUUID()`. Falls back
/// to sequential ids when the function throws or returns a non-string.
pub struct JsIdSource {
    f: Function,
    fallback: SequentialIds,
}

impl JsIdSource {
    pub fn new(f: Function, prefix: &str) -> Self {
        JsIdSource { f, fallback: SequentialIds::new(prefix) }
    }
}

impl IdSource for JsIdSource {
    fn next_id(&mut self) -> ZoneId {
        match self.f.call0(&JsValue::NULL).ok().and_then(|v| v.as_string()) {
            Some(s) if !s.is_empty() => ZoneId::new(s),
            _ => {
                log::warn!("id source returned no usable id, using sequential fallback");
                self.fallback.next_id()
            }
        }
    }

    fn reserve(&mut self, used: &[ZoneId]) {
        self.fallback.reserve(used);
    }
}
