//! Family (demand record) model.
//!
//! A family is one arrival unit: one or more diners who share a single
//! seat assignment and timeline. Numeric need fields are the only input
//! to allocation; the categorical [`FamilyLabel`] is derived for display.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation start (t=0).

use serde::{Deserialize, Serialize};

/// Discrete simulation time.
pub type Tick = u64;

/// Family identifier.
pub type FamilyId = u32;

/// A family arriving at the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    /// Unique family identifier.
    pub family_id: FamilyId,
    /// Source record identifier (customer id in the input file).
    pub customer_id: u32,
    /// Tick at which the family joins the queue.
    pub arrival_time: Tick,
    /// Diners needing a place at the seat. Babies are not counted.
    pub party_size: u32,
    /// Baby chairs taken from the shared pool while seated.
    pub baby_chairs_needed: u32,
    /// Wheelchair spots taken from the shared pool while seated.
    pub wheelchairs_needed: u32,
    /// Ticks spent seated before leaving.
    pub dining_duration: Tick,
}

/// Lifecycle status of a family.
///
/// Variants are declared in transition order; a family's status never
/// compares lower than a previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FamilyStatus {
    /// Not yet arrived.
    Pending,
    /// Arrived, no seat yet.
    Waiting,
    /// Holding a seat.
    Seated,
    /// Finished and gone. Terminal.
    Left,
}

/// Display category derived from the need fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FamilyLabel {
    Individual,
    Family,
    WithBaby,
    Wheelchair,
}

impl Family {
    /// Creates a family with no special needs and a dining duration of 1.
    pub fn new(family_id: FamilyId, arrival_time: Tick, party_size: u32) -> Self {
        Self {
            family_id,
            customer_id: family_id,
            arrival_time,
            party_size,
            baby_chairs_needed: 0,
            wheelchairs_needed: 0,
            dining_duration: 1,
        }
    }

    /// Sets the source customer id.
    pub fn with_customer_id(mut self, customer_id: u32) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets the number of baby chairs needed.
    pub fn with_baby_chairs(mut self, count: u32) -> Self {
        self.baby_chairs_needed = count;
        self
    }

    /// Sets the number of wheelchair spots needed.
    pub fn with_wheelchairs(mut self, count: u32) -> Self {
        self.wheelchairs_needed = count;
        self
    }

    /// Sets the dining duration.
    pub fn with_duration(mut self, ticks: Tick) -> Self {
        self.dining_duration = ticks;
        self
    }

    /// Display label. Wheelchair wins over baby, baby over group size.
    pub fn label(&self) -> FamilyLabel {
        if self.wheelchairs_needed > 0 {
            FamilyLabel::Wheelchair
        } else if self.baby_chairs_needed > 0 {
            FamilyLabel::WithBaby
        } else if self.party_size > 1 {
            FamilyLabel::Family
        } else {
            FamilyLabel::Individual
        }
    }

    /// Whether the family needs any shared ancillary resource.
    pub fn needs_ancillary(&self) -> bool {
        self.baby_chairs_needed > 0 || self.wheelchairs_needed > 0
    }
}

/// Runtime state of a family during a run.
#[derive(Debug, Clone)]
pub struct FamilyState {
    /// The demand record.
    pub family: Family,
    /// Current lifecycle status.
    pub status: FamilyStatus,
    /// Tick at which the family was seated.
    pub seated_at: Option<Tick>,
    /// Seat held (or last held) by the family.
    pub assigned_seat: Option<String>,
    /// Whether a `Waiting` event has been emitted for this family.
    pub conflict_reported: bool,
}

impl FamilyState {
    /// Wraps a demand record in the `Pending` state.
    pub fn pending(family: Family) -> Self {
        Self {
            family,
            status: FamilyStatus::Pending,
            seated_at: None,
            assigned_seat: None,
            conflict_reported: false,
        }
    }

    /// Scheduled departure tick, if seated.
    pub fn departure_time(&self) -> Option<Tick> {
        self.seated_at
            .map(|t| t.saturating_add(self.family.dining_duration))
    }

    /// Ticks spent waiting before being seated.
    pub fn wait_time(&self) -> Option<Tick> {
        self.seated_at
            .map(|t| t.saturating_sub(self.family.arrival_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_builder() {
        let f = Family::new(7, 12, 3)
            .with_customer_id(70)
            .with_baby_chairs(1)
            .with_wheelchairs(0)
            .with_duration(25);

        assert_eq!(f.family_id, 7);
        assert_eq!(f.customer_id, 70);
        assert_eq!(f.arrival_time, 12);
        assert_eq!(f.party_size, 3);
        assert_eq!(f.baby_chairs_needed, 1);
        assert_eq!(f.dining_duration, 25);
        assert!(f.needs_ancillary());
    }

    #[test]
    fn test_label_is_derived_from_needs() {
        assert_eq!(Family::new(1, 0, 1).label(), FamilyLabel::Individual);
        assert_eq!(Family::new(2, 0, 3).label(), FamilyLabel::Family);
        assert_eq!(
            Family::new(3, 0, 2).with_baby_chairs(1).label(),
            FamilyLabel::WithBaby
        );
        assert_eq!(
            Family::new(4, 0, 2)
                .with_baby_chairs(1)
                .with_wheelchairs(1)
                .label(),
            FamilyLabel::Wheelchair
        );
    }

    #[test]
    fn test_status_order_is_lifecycle_order() {
        assert!(FamilyStatus::Pending < FamilyStatus::Waiting);
        assert!(FamilyStatus::Waiting < FamilyStatus::Seated);
        assert!(FamilyStatus::Seated < FamilyStatus::Left);
    }

    #[test]
    fn test_state_times() {
        let mut st = FamilyState::pending(Family::new(1, 5, 2).with_duration(10));
        assert_eq!(st.departure_time(), None);
        assert_eq!(st.wait_time(), None);

        st.seated_at = Some(8);
        assert_eq!(st.departure_time(), Some(18));
        assert_eq!(st.wait_time(), Some(3));
    }

    #[test]
    fn test_family_serializes_camel_case() {
        let json = serde_json::to_value(Family::new(1, 0, 2)).unwrap();
        assert_eq!(json["familyId"], 1);
        assert_eq!(json["partySize"], 2);
        assert_eq!(json["babyChairsNeeded"], 0);
        assert_eq!(json["diningDuration"], 1);
    }
}
