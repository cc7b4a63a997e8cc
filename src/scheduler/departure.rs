//! Departure tracker.
//!
//! Releases the seat and ancillary units of every family whose dining
//! duration has elapsed. The driver runs it before the allocation engine
//! within a tick, so a seat freed at `t` can be taken again at `t`.

use tracing::debug;

use super::{DemandQueue, ResourcePool};
use crate::models::{Event, Tick};

/// Releases finished families.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartureTracker;

impl DepartureTracker {
    /// Creates a tracker.
    pub fn new() -> Self {
        Self
    }

    /// Releases every seated family with `seated_at + dining_duration <= time`.
    ///
    /// Departures are processed in seating order.
    pub fn tick(&self, time: Tick, pool: &mut ResourcePool, queue: &mut DemandQueue) -> Vec<Event> {
        let due: Vec<usize> = queue
            .seated_indices()
            .iter()
            .copied()
            .filter(|&idx| {
                queue
                    .state(idx)
                    .departure_time()
                    .is_some_and(|t| t <= time)
            })
            .collect();

        let mut events = Vec::with_capacity(due.len());
        for idx in due {
            let state = queue.state(idx);
            let family = state.family.clone();
            let Some(seat_id) = state.assigned_seat.clone() else {
                continue;
            };

            let released = pool
                .seat_index(&seat_id)
                .is_some_and(|seat_idx| pool.release(seat_idx, &family));
            debug_assert!(
                released,
                "family {} does not hold seat {}",
                family.family_id, seat_id
            );
            debug!(time, family = family.family_id, seat = %seat_id, "left");
            queue.mark_left(idx);
            events.push(Event::left(time, &family, &seat_id));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, Family, FamilyStatus, Seat, SeatingConfig};

    fn seated_setup(duration: Tick) -> (ResourcePool, DemandQueue) {
        let cfg = SeatingConfig::new(vec![Seat::four("T1")]).with_baby_chairs(1);
        let mut pool = ResourcePool::new(&cfg).unwrap();
        let family = Family::new(1, 0, 2)
            .with_baby_chairs(1)
            .with_duration(duration);
        let mut queue = DemandQueue::new(vec![family.clone()]);
        queue.admit(0);
        assert!(pool.try_reserve(0, &family));
        queue.mark_seated(0, 0, "T1");
        (pool, queue)
    }

    #[test]
    fn test_departure_at_due_time() {
        let (mut pool, mut queue) = seated_setup(10);
        let tracker = DepartureTracker::new();

        assert!(tracker.tick(9, &mut pool, &mut queue).is_empty());
        assert_eq!(queue.state(0).status, FamilyStatus::Seated);

        let events = tracker.tick(10, &mut pool, &mut queue);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Left);
        assert_eq!(events[0].seat_id.as_deref(), Some("T1"));
        assert_eq!(queue.state(0).status, FamilyStatus::Left);
        assert!(pool.seat("T1").unwrap().is_free());
        assert_eq!(pool.baby_chairs().available(), Some(1));
    }

    #[test]
    fn test_overdue_departure_is_tolerated() {
        let (mut pool, mut queue) = seated_setup(3);
        let events = DepartureTracker::new().tick(7, &mut pool, &mut queue);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, 7);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not hold seat")]
    fn test_seat_and_family_must_agree_on_release() {
        let cfg = SeatingConfig::new(vec![Seat::four("T1")]);
        let mut pool = ResourcePool::new(&cfg).unwrap();
        let mut queue = DemandQueue::new(vec![Family::new(1, 0, 2).with_duration(1)]);
        queue.admit(0);
        // The pool hands T1 to a different family than the queue records.
        assert!(pool.try_reserve(0, &Family::new(9, 0, 2)));
        queue.mark_seated(0, 0, "T1");

        DepartureTracker::new().tick(1, &mut pool, &mut queue);
    }

    #[test]
    fn test_left_is_terminal() {
        let (mut pool, mut queue) = seated_setup(1);
        let tracker = DepartureTracker::new();
        tracker.tick(1, &mut pool, &mut queue);
        assert!(tracker.tick(2, &mut pool, &mut queue).is_empty());
        assert_eq!(queue.state(0).status, FamilyStatus::Left);
    }
}
