// Centralized caps to harden against untrusted input (JSON documents, JS calls)

// Store size caps
pub const MAX_ZONES: usize = 10_000;
pub const MAX_RING_POINTS: usize = 50_000;

// Name length cap (bytes)
pub const MAX_NAME_LEN: usize = 1_024;

// Numeric bounds; generous enough for lat/lng and projected meters alike
pub const COORD_MIN: f64 = -1.0e9;
pub const COORD_MAX: f64 =  1.0e9;

// Document format version written by `to_json_value`
pub const DOC_VERSION: u32 = 1;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
