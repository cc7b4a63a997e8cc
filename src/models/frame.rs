//! Frame (snapshot) model.
//!
//! A frame is a self-contained snapshot of the whole system at one tick.
//! Frames own deep copies of seat and queue state, so later mutation of
//! the pool never changes a recorded frame.

use serde::{Deserialize, Serialize};

use super::{Event, EventKind, Family, FamilyId, Seat, Tick};

/// Immutable snapshot of system state at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Tick of the snapshot.
    pub timestamp: Tick,
    /// Every seat with its occupant at the end of the tick.
    pub seats: Vec<Seat>,
    /// Families arrived but not seated, in queue order.
    pub waiting_queue: Vec<Family>,
    /// Events generated exactly at this tick.
    pub events: Vec<Event>,
    /// Shared ancillary counters at the end of the tick.
    pub ancillary: AncillarySnapshot,
}

/// Remaining shared ancillary units. `None` means the counter is uncapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncillarySnapshot {
    pub baby_chairs_available: Option<u32>,
    pub wheelchairs_available: Option<u32>,
}

impl Frame {
    /// Looks up a seat by id.
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    /// Family holding a seat.
    pub fn occupant_of(&self, seat_id: &str) -> Option<FamilyId> {
        self.seat(seat_id).and_then(|s| s.occupant)
    }

    /// Seat held by a family.
    pub fn seat_of(&self, family_id: FamilyId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.occupant == Some(family_id))
    }

    /// Whether the family is in the waiting queue.
    pub fn is_waiting(&self, family_id: FamilyId) -> bool {
        self.waiting_queue.iter().any(|f| f.family_id == family_id)
    }

    /// Number of occupied seats.
    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_free()).count()
    }

    /// Events of a given kind.
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Event log lines of this frame.
    pub fn log_lines(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.message.as_str()).collect()
    }
}
