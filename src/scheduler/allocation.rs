//! Allocation engine.
//!
//! # Algorithm
//!
//! 1. Walk the waiting queue in arrival order (earliest first, ties by
//!    family id).
//! 2. For each family, walk the seats whose capacity covers the party:
//!    the smallest sufficient class first, then each larger class; within
//!    a class, ascending numeric suffix.
//! 3. Take the first seat on which [`ResourcePool::try_reserve`] succeeds.
//! 4. A family that finds nothing stays queued; later families are still
//!    tried, so a large party never blocks a small one behind it.
//!
//! # Complexity
//! O(w * s) per tick where w = waiting families, s = seats.

use tracing::{debug, warn};

use super::{DemandQueue, ResourcePool};
use crate::models::{ConflictReporting, Event, Family, Tick, WaitReason};

/// Matches waiting families against free seats, one tick at a time.
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    reporting: ConflictReporting,
}

impl AllocationEngine {
    /// Creates an engine with the given conflict reporting policy.
    pub fn new(reporting: ConflictReporting) -> Self {
        Self { reporting }
    }

    /// Attempts to seat every waiting family at `time`.
    ///
    /// Emits a `Seated` event for each success, and a `Waiting` event for
    /// failures according to the conflict reporting policy.
    pub fn tick(&self, time: Tick, pool: &mut ResourcePool, queue: &mut DemandQueue) -> Vec<Event> {
        let mut events = Vec::new();
        let waiting = queue.waiting_indices().to_vec();

        for idx in waiting {
            let family = queue.state(idx).family.clone();

            if let Some(seat_idx) = Self::seat_family(pool, &family) {
                let seat_id = pool.seats()[seat_idx].id.clone();
                debug!(time, family = family.family_id, seat = %seat_id, "seated");
                queue.mark_seated(idx, time, &seat_id);
                events.push(Event::seated(time, &family, &seat_id));
                continue;
            }

            let first_failure = !queue.state(idx).conflict_reported;
            if first_failure || self.reporting == ConflictReporting::EveryTick {
                let reason = pool.diagnose(&family);
                if first_failure && reason == WaitReason::Unsatisfiable {
                    warn!(
                        family = family.family_id,
                        party = family.party_size,
                        "family can never be seated with this configuration"
                    );
                }
                queue.mark_conflict_reported(idx);
                events.push(Event::waiting(time, &family, reason));
            }
        }

        events
    }

    /// Reserves the best-fitting free seat for the family.
    fn seat_family(pool: &mut ResourcePool, family: &Family) -> Option<usize> {
        let candidates: Vec<usize> = pool.candidates(family).collect();
        candidates
            .into_iter()
            .find(|&seat_idx| pool.try_reserve(seat_idx, family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, FamilyStatus, Seat, SeatingConfig};

    fn pool(seats: Vec<Seat>) -> ResourcePool {
        ResourcePool::new(&SeatingConfig::new(seats)).unwrap()
    }

    #[test]
    fn test_exact_fit_class_first() {
        let mut pool = pool(vec![Seat::six("L1"), Seat::four("T1"), Seat::single("S1")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 1), Family::new(2, 0, 3)]);
        queue.admit(0);

        let events = AllocationEngine::default().tick(0, &mut pool, &mut queue);
        assert_eq!(events.len(), 2);
        assert_eq!(pool.seat("S1").unwrap().occupant, Some(1));
        assert_eq!(pool.seat("T1").unwrap().occupant, Some(2));
        assert!(pool.seat("L1").unwrap().is_free());
    }

    #[test]
    fn test_overflows_into_larger_class() {
        let mut pool = pool(vec![Seat::single("S1"), Seat::four("T1")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 1), Family::new(2, 0, 1)]);
        queue.admit(0);

        AllocationEngine::default().tick(0, &mut pool, &mut queue);
        assert_eq!(pool.seat("S1").unwrap().occupant, Some(1));
        assert_eq!(pool.seat("T1").unwrap().occupant, Some(2));
    }

    #[test]
    fn test_numeric_order_within_class() {
        let mut pool = pool(vec![Seat::four("T10"), Seat::four("T9")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 2)]);
        queue.admit(0);

        AllocationEngine::default().tick(0, &mut pool, &mut queue);
        assert_eq!(pool.seat("T9").unwrap().occupant, Some(1));
    }

    #[test]
    fn test_large_party_does_not_block_small_one() {
        let mut pool = pool(vec![Seat::four("T1")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 6), Family::new(2, 1, 2)]);
        queue.admit(1);

        let events = AllocationEngine::default().tick(1, &mut pool, &mut queue);
        assert_eq!(queue.state(1).status, FamilyStatus::Seated);
        assert_eq!(queue.state(0).status, FamilyStatus::Waiting);
        let waiting: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::Waiting)
            .collect();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].reason, Some(WaitReason::Unsatisfiable));
    }

    #[test]
    fn test_conflict_reported_once_by_default() {
        let mut pool = pool(vec![Seat::single("S1")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 1), Family::new(2, 0, 1)]);
        queue.admit(0);
        let engine = AllocationEngine::default();

        let first = engine.tick(0, &mut pool, &mut queue);
        assert_eq!(first.iter().filter(|e| e.kind == EventKind::Waiting).count(), 1);

        let second = engine.tick(1, &mut pool, &mut queue);
        assert!(second.is_empty());
        assert_eq!(queue.state(1).status, FamilyStatus::Waiting);
    }

    #[test]
    fn test_conflict_every_tick() {
        let mut pool = pool(vec![Seat::single("S1")]);
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 1), Family::new(2, 0, 1)]);
        queue.admit(0);
        let engine = AllocationEngine::new(ConflictReporting::EveryTick);

        engine.tick(0, &mut pool, &mut queue);
        let second = engine.tick(1, &mut pool, &mut queue);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].kind, EventKind::Waiting);
        assert_eq!(second[0].reason, Some(WaitReason::NoSeatFree));
        assert_eq!(second[0].family_id, 2);
    }
}
