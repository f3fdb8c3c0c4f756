#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Promise, Reflect};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use zonemap_wasm::{ring_contains, ZoneMap};

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn value(v: &JsValue) -> JsValue {
    Reflect::get(v, &JsValue::from_str("value")).unwrap()
}

fn draw_square(m: &mut ZoneMap) -> String {
    assert!(m.start_drawing());
    m.set_draft_style_res("Downtown", "#32CD32");
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
        m.on_map_click(x, y);
    }
    m.finish().expect("committed")
}

async fn settle() {
    for _ in 0..4 {
        JsFuture::from(Promise::resolve(&JsValue::NULL)).await.unwrap();
    }
}

#[derive(Deserialize)]
struct Click {
    kind: String,
    #[serde(default)]
    len: Option<u32>,
    #[serde(default)]
    index: Option<u32>,
}

#[wasm_bindgen_test]
fn draw_commit_and_query() {
    let mut m = ZoneMap::new();
    let id = draw_square(&mut m);
    assert_eq!(m.mode(), "idle");
    assert_eq!(m.zone_count(), 1);
    assert_eq!(m.find_containing_zone(5.0, 5.0), Some(id.clone()));
    assert_eq!(m.find_containing_zone(15.0, 5.0), None);

    let ring: Vec<f64> = js_sys::Float64Array::from(m.get_zone_ring(&id)).to_vec();
    assert_eq!(ring, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
    assert!(m.get_zone_ring("nope").is_null());
}

#[wasm_bindgen_test]
fn clicks_report_by_mode() {
    let mut m = ZoneMap::new();
    m.start_drawing();
    let c: Click = serde_wasm_bindgen::from_value(m.on_map_click(1.0, 1.0)).unwrap();
    assert_eq!(c.kind, "draft_point");
    assert_eq!(c.len, Some(1));
    m.cancel_drawing();
    assert_eq!(m.zone_count(), 0);

    let id = draw_square(&mut m);
    m.select(&id);
    assert!(m.start_editing());
    let c: Click = serde_wasm_bindgen::from_value(m.on_map_click(5.0, 0.1)).unwrap();
    assert_eq!(c.kind, "vertex_inserted");
    assert_eq!(c.index, Some(1));
    assert!(m.on_vertex_drag(&id, 1, 5.0, -3.0));
    assert!(!m.on_vertex_drag(&id, 99, 5.0, -3.0));
    assert_eq!(m.finish(), None);
    assert_eq!(m.mode(), "idle");

    let c: Click = serde_wasm_bindgen::from_value(m.on_map_click(2.0, 2.0)).unwrap();
    assert_eq!(c.kind, "placed");
    assert_eq!(m.delivery_status().as_deref(), Some("Inside delivery zone: Downtown"));
}

#[wasm_bindgen_test]
fn typed_errors_leave_state_alone() {
    let mut m = ZoneMap::new();
    let ver = m.version();
    assert!(is_err(&m.start_editing_res(), "no_selection"));
    assert!(is_err(&m.finish_res(), "invalid_transition"));
    assert!(is_err(&m.remove_zone_res("ghost"), "unknown_zone"));
    assert!(is_err(&m.on_map_click_res(f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&m.set_zone_style_res("ghost", "A", "#zzzzzz"), "invalid_color"));
    assert!(is_err(&m.update_zone_ring_res("ghost", &[1.0, 2.0, 3.0]), "invalid_argument"));
    assert_eq!(m.version(), ver, "state mutated on error");

    m.start_drawing();
    assert!(is_err(&m.start_drawing_res(), "invalid_transition"));
    let empty = m.finish_res();
    assert!(value(&empty).is_null());
    assert_eq!(m.zone_count(), 0);
}

#[wasm_bindgen_test]
fn styles_and_removal() {
    let mut m = ZoneMap::new();
    m.start_drawing();
    let r = m.set_draft_style_res("North", "#ff0000");
    assert_eq!(value(&r).as_bool(), Some(true));
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)] {
        m.on_map_click(x, y);
    }
    let id = m.finish().unwrap();

    #[derive(Deserialize)]
    struct ZoneSer {
        name: String,
        color: String,
    }
    let z: ZoneSer = serde_wasm_bindgen::from_value(value(&m.get_zone_res(&id))).unwrap();
    assert_eq!(z.name, "North");
    assert_eq!(z.color, "#FF0000");

    m.set_zone_style_res(&id, "South", "#00f");
    let z: ZoneSer = serde_wasm_bindgen::from_value(value(&m.get_zone_res(&id))).unwrap();
    assert_eq!(z.name, "South");
    assert_eq!(z.color, "#0000FF");

    m.select(&id);
    assert!(m.remove_zone(&id));
    assert_eq!(m.selected(), None);
    assert!(!m.can_start_editing());
}

#[wasm_bindgen_test]
fn json_roundtrip() {
    let mut m = ZoneMap::new();
    draw_square(&mut m);
    draw_square(&mut m);
    let doc = m.to_json();

    let mut m2 = ZoneMap::new();
    let r = m2.from_json_res(doc);
    assert_eq!(value(&r).as_f64(), Some(2.0));
    assert_eq!(m2.zone_count(), 2);
    // Fresh ids do not collide with loaded ones.
    let id = draw_square(&mut m2);
    assert_eq!(id, "zone-3");

    assert!(is_err(&m2.from_json_res(JsValue::from_str("nope")), "invalid_structure"));
    assert_eq!(m2.zone_count(), 3);
}

#[wasm_bindgen_test]
fn host_id_source_and_config() {
    let f = Function::new_no_args("return 'uuid-' + (globalThis.__zm_n = (globalThis.__zm_n || 0) + 1);");
    let cfg = serde_wasm_bindgen::to_value(&serde_json::json!({ "default_color": "#123456" })).unwrap();
    let mut m = ZoneMap::with_config(cfg, Some(f)).unwrap();
    let id = draw_square(&mut m);
    assert!(id.starts_with("uuid-"));

    let bad = serde_wasm_bindgen::to_value(&serde_json::json!({ "max_zones": 0 })).unwrap();
    assert!(ZoneMap::with_config(bad, None).is_err());
}

#[wasm_bindgen_test]
fn free_functions() {
    let square = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
    assert!(ring_contains(&square, 5.0, 5.0));
    assert!(!ring_contains(&square, 11.0, 5.0));
    assert!(!ring_contains(&square[..3], 0.1, 0.1));
}

#[wasm_bindgen_test]
async fn geocoder_answer_lands_on_placement() {
    let mut m = ZoneMap::new();
    draw_square(&mut m);
    let g = Function::new_with_args(
        "x, y",
        "return Promise.resolve({ location: 'Main St ' + x, route: 'Main St' });",
    );
    m.set_geocoder(Some(g));
    m.on_map_click(3.0, 4.0);
    settle().await;

    #[derive(Deserialize)]
    struct Addr {
        state: String,
        #[serde(default)]
        location: Option<String>,
    }
    #[derive(Deserialize)]
    struct Place {
        address: Addr,
    }
    #[derive(Deserialize)]
    struct Snap {
        placement: Option<Place>,
        delivery_status: Option<String>,
    }
    let s: Snap = serde_wasm_bindgen::from_value(m.snapshot()).unwrap();
    let p = s.placement.unwrap();
    assert_eq!(p.address.state, "resolved");
    assert_eq!(p.address.location.as_deref(), Some("Main St 3"));
    assert_eq!(s.delivery_status.as_deref(), Some("Inside delivery zone: Downtown"));
}

#[wasm_bindgen_test]
fn stale_manual_answers_are_dropped() {
    let mut m = ZoneMap::new();
    let first = Reflect::get(&m.on_map_click(1.0, 1.0), &JsValue::from_str("ticket")).unwrap();
    let second = Reflect::get(&m.on_map_click(2.0, 2.0), &JsValue::from_str("ticket")).unwrap();
    let r = m.resolve_address_res(first, "Old".into(), "Old".into());
    assert_eq!(value(&r).as_bool(), Some(false));
    let r = m.fail_address_res(second, "quota".into());
    assert_eq!(value(&r).as_bool(), Some(true));
    assert_eq!(m.delivery_status().as_deref(), Some("Outside delivery zone"));
}

#[wasm_bindgen_test]
fn error_objects_carry_data() {
    let mut m = ZoneMap::new();
    let get = |v: &JsValue, path: &[&str]| {
        path.iter()
            .fold(v.clone(), |acc, k| Reflect::get(&acc, &JsValue::from_str(k)).unwrap())
    };

    let r = m.on_map_click_res(0.0, f64::INFINITY);
    assert_eq!(get(&r, &["ok"]).as_bool(), Some(false));
    assert_eq!(get(&r, &["error", "data", "param"]).as_string().as_deref(), Some("y"));
    assert!(get(&r, &["error", "message"]).as_string().is_some());

    let r = m.remove_zone_res("ghost");
    assert_eq!(get(&r, &["error", "data", "id"]).as_string().as_deref(), Some("ghost"));

    let r = m.on_map_click_res(0.0, 2.0e9);
    assert!(is_err(&r, "out_of_bounds"));

    let ok = m.start_drawing_res();
    assert_eq!(get(&ok, &["ok"]).as_bool(), Some(true));
    assert_eq!(get(&ok, &["value"]).as_bool(), Some(true));
}
