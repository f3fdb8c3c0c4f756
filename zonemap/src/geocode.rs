//! Reverse-geocoding bookkeeping.
//!
//! The lookup itself is an external asynchronous service. The engine only
//! hands out tickets and accepts answers: an answer is applied when its
//! ticket is the latest one issued, and dropped otherwise.

use serde::{Deserialize, Serialize};

use crate::error::GeocodeError;
use crate::model::Point;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub location: String,
    pub route: String,
}

/// Tags one outstanding lookup with the placement it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookupTicket {
    pub seq: u64,
    pub point: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AddressState {
    Pending,
    Resolved(Address),
    Unavailable,
}

#[derive(Clone, Debug, Default)]
pub struct AddressTracker {
    issued: u64,
    latest: Option<LookupTicket>,
}

impl AddressTracker {
    pub fn new() -> Self {
        AddressTracker::default()
    }

    /// Issue a ticket for `point`, superseding any outstanding one.
    pub fn issue(&mut self, point: Point) -> LookupTicket {
        self.issued += 1;
        let t = LookupTicket {
            seq: self.issued,
            point,
        };
        self.latest = Some(t);
        t
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.latest.as_ref() == Some(ticket)
    }

    /// Settle `ticket`. Returns the state to display, or `None` when the
    /// answer is stale and must be discarded. Failures are downgraded to
    /// `Unavailable` and only logged.
    pub fn settle(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Address, GeocodeError>,
    ) -> Option<AddressState> {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale geocode answer #{} (latest #{})",
                ticket.seq,
                self.latest.map_or(0, |t| t.seq)
            );
            return None;
        }
        Some(match result {
            Ok(addr) => AddressState::Resolved(addr),
            Err(e) => {
                log::warn!("address lookup #{} failed: {}", ticket.seq, e);
                AddressState::Unavailable
            }
        })
    }

    /// Forget the outstanding ticket so any late answer is dropped.
    pub fn cancel(&mut self) {
        self.latest = None;
    }
}
