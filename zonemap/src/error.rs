use thiserror::Error;

use crate::model::ZoneId;
use crate::mode::ModeKind;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ZoneError {
    #[error("ring has no points")]
    EmptyRing,
    #[error("unknown zone {0}")]
    UnknownZone(ZoneId),
    #[error("zone id {0} already exists")]
    DuplicateZone(ZoneId),
    #[error("vertex index {index} out of range for ring of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("editing requires a selected zone")]
    NoSelection,
    #[error("cannot {action} while {mode}")]
    InvalidTransition { mode: ModeKind, action: &'static str },
    #[error("coordinates must be finite")]
    NonFinite,
    #[error("coordinate out of bounds")]
    OutOfBounds,
    #[error("{what} limit of {max} exceeded")]
    LimitExceeded { what: &'static str, max: usize },
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid zone document: {0}")]
    InvalidDocument(String),
}

impl ZoneError {
    /// Stable machine-readable code, used by the JS result objects.
    pub fn code(&self) -> &'static str {
        match self {
            ZoneError::EmptyRing => "empty_ring",
            ZoneError::UnknownZone(_) => "unknown_zone",
            ZoneError::DuplicateZone(_) => "duplicate_id",
            ZoneError::IndexOutOfRange { .. } => "index_out_of_range",
            ZoneError::NoSelection => "no_selection",
            ZoneError::InvalidTransition { .. } => "invalid_transition",
            ZoneError::NonFinite => "non_finite",
            ZoneError::OutOfBounds => "out_of_bounds",
            ZoneError::LimitExceeded { .. } => "caps_exceeded",
            ZoneError::InvalidColor(_) => "invalid_color",
            ZoneError::InvalidDocument(_) => "invalid_structure",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeocodeError {
    #[error("geocoder rejected the request: {0}")]
    Rejected(String),
    #[error("geocoder returned an unusable result: {0}")]
    Malformed(String),
}
