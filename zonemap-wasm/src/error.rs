use crate::interop::{new_obj, set_kv};
use wasm_bindgen::prelude::*;
use zonemap::ZoneError;

/// `{ ok: true, value }`
pub fn ok(value: JsValue) -> JsValue {
    let out = new_obj();
    set_kv(&out, "ok", &JsValue::TRUE);
    set_kv(&out, "value", &value);
    out.into()
}

/// `{ ok: false, error: { code, message, data? } }`
pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let detail = new_obj();
    set_kv(&detail, "code", &JsValue::from_str(code));
    set_kv(&detail, "message", &JsValue::from_str(&message.into()));
    if let Some(data) = data {
        set_kv(&detail, "data", &data);
    }
    let out = new_obj();
    set_kv(&out, "ok", &JsValue::FALSE);
    set_kv(&out, "error", &detail.into());
    out.into()
}

fn param(name: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(name));
    d.into()
}

pub fn non_finite(name: &str) -> JsValue {
    err("non_finite", format!("{} must be a finite number", name), Some(param(name)))
}

pub fn invalid_arg(name: &str, message: impl Into<String>) -> JsValue {
    err("invalid_argument", message, Some(param(name)))
}

/// Map an engine error to a typed result, carrying the fields a UI needs
/// (offending id, index bounds, cap) under `data`.
pub fn zone(e: &ZoneError) -> JsValue {
    let data = match e {
        ZoneError::UnknownZone(id) | ZoneError::DuplicateZone(id) => {
            let d = new_obj(); set_kv(&d, "id", &JsValue::from_str(id.as_str()));
            Some(d.into())
        }
        ZoneError::IndexOutOfRange { index, len } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "len", &JsValue::from_f64(*len as f64));
            Some(d.into())
        }
        ZoneError::InvalidTransition { mode, action } => {
            let d = new_obj();
            set_kv(&d, "mode", &JsValue::from_str(&mode.to_string()));
            set_kv(&d, "action", &JsValue::from_str(action));
            Some(d.into())
        }
        ZoneError::LimitExceeded { what, max } => {
            let d = new_obj();
            set_kv(&d, "what", &JsValue::from_str(what));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

pub fn result(r: Result<JsValue, ZoneError>) -> JsValue {
    match r {
        Ok(v) => ok(v),
        Err(e) => zone(&e),
    }
}
