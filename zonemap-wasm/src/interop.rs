use js_sys::{Float64Array, Object, Reflect};
use wasm_bindgen::JsValue;
use zonemap::Point;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
/// [x0, y0, x1, y1, ...]
pub fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
/// Inverse of `flatten_points`; `None` for an odd-length buffer.
pub fn unflatten_points(flat: &[f64]) -> Option<Vec<Point>> {
    if flat.len() % 2 != 0 { return None; }
    Some(flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
}
