use serde::{Deserialize, Serialize};

use crate::error::ZoneError;
use crate::geometry::limits;
use crate::model::{Color, DEFAULT_ZONE_COLOR};

/// Engine settings. Every field has a default, so hosts can pass a partial
/// object (`{ "default_color": "#FF8800" }`) or nothing at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fill for new drafts until the user picks one.
    pub default_color: Color,
    /// Prefix for the built-in sequential id source.
    pub id_prefix: String,
    pub max_zones: usize,
    pub max_ring_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_color: DEFAULT_ZONE_COLOR,
            id_prefix: "zone".to_string(),
            max_zones: limits::MAX_ZONES,
            max_ring_points: limits::MAX_RING_POINTS,
        }
    }
}

impl EngineConfig {
    /// Clamp caps to the hard limits and reject unusable values.
    pub fn validated(mut self) -> Result<Self, ZoneError> {
        if self.id_prefix.trim().is_empty() {
            return Err(ZoneError::InvalidDocument("id_prefix must not be empty".into()));
        }
        if self.max_zones == 0 || self.max_ring_points == 0 {
            return Err(ZoneError::InvalidDocument("caps must be positive".into()));
        }
        self.max_zones = self.max_zones.min(limits::MAX_ZONES);
        self.max_ring_points = self.max_ring_points.min(limits::MAX_RING_POINTS);
        Ok(self)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self, ZoneError> {
        let cfg: EngineConfig =
            serde_json::from_value(v).map_err(|e| ZoneError::InvalidDocument(e.to_string()))?;
        cfg.validated()
    }
}
