//! Simulation events.
//!
//! Events are emitted only by state transitions in the driver loop and are
//! never modified afterwards.

use serde::{Deserialize, Serialize};

use super::{Family, FamilyId, Tick};

/// An allocation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Tick at which the event happened.
    pub timestamp: Tick,
    /// Event type.
    pub kind: EventKind,
    /// Family concerned.
    pub family_id: FamilyId,
    /// Source customer id of the family.
    pub customer_id: u32,
    /// Seat taken or vacated (`Seated` / `Left` only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seat_id: Option<String>,
    /// Why the family could not be seated (`Waiting` only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<WaitReason>,
    /// Human-readable log line.
    pub message: String,
}

/// Event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Family joined the waiting queue.
    Arrival,
    /// Family took a seat.
    Seated,
    /// Family vacated its seat.
    Left,
    /// Family could not be seated (resource contention).
    Waiting,
}

/// Cause of a failed seating attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitReason {
    /// Every suitable seat is occupied.
    NoSeatFree,
    /// Suitable seat free, but the shared baby chairs are used up.
    BabyChairsExhausted,
    /// Suitable seat free, but the shared wheelchair spots are used up.
    WheelchairsExhausted,
    /// No seat in the pool can ever take this family.
    Unsatisfiable,
}

impl std::fmt::Display for WaitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WaitReason::NoSeatFree => "no suitable seat free",
            WaitReason::BabyChairsExhausted => "baby chairs exhausted",
            WaitReason::WheelchairsExhausted => "wheelchair spots exhausted",
            WaitReason::Unsatisfiable => "no seat can ever fit this party",
        };
        f.write_str(s)
    }
}

impl Event {
    fn base(timestamp: Tick, kind: EventKind, family: &Family, message: String) -> Self {
        Self {
            timestamp,
            kind,
            family_id: family.family_id,
            customer_id: family.customer_id,
            seat_id: None,
            reason: None,
            message,
        }
    }

    /// Family joined the queue.
    pub fn arrival(timestamp: Tick, family: &Family) -> Self {
        let message = format!(
            "[{}] Family {} arrived (party: {}, baby: {}, wheel: {})",
            timestamp,
            family.family_id,
            family.party_size,
            family.baby_chairs_needed,
            family.wheelchairs_needed
        );
        Self::base(timestamp, EventKind::Arrival, family, message)
    }

    /// Family took `seat_id`.
    pub fn seated(timestamp: Tick, family: &Family, seat_id: &str) -> Self {
        let message = format!("[{}] Family {} sat at {}", timestamp, family.family_id, seat_id);
        let mut event = Self::base(timestamp, EventKind::Seated, family, message);
        event.seat_id = Some(seat_id.to_string());
        event
    }

    /// Family vacated `seat_id`.
    pub fn left(timestamp: Tick, family: &Family, seat_id: &str) -> Self {
        let message = format!("[{}] Family {} left {}", timestamp, family.family_id, seat_id);
        let mut event = Self::base(timestamp, EventKind::Left, family, message);
        event.seat_id = Some(seat_id.to_string());
        event
    }

    /// Family could not be seated.
    pub fn waiting(timestamp: Tick, family: &Family, reason: WaitReason) -> Self {
        let message = format!(
            "[{}] Family {} waiting: {}",
            timestamp, family.family_id, reason
        );
        let mut event = Self::base(timestamp, EventKind::Waiting, family, message);
        event.reason = Some(reason);
        event
    }
}
