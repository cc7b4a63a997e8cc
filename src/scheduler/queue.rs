//! Demand queue.
//!
//! Holds every family's runtime state, ordered by arrival time (ties by
//! family id, then input order). Families move through three cursors:
//! not-yet-arrived, waiting (queue order = arrival order) and seated.

use crate::models::{Family, FamilyState, FamilyStatus, Tick};

/// Ordered demand with per-family runtime state.
#[derive(Debug, Clone, Default)]
pub struct DemandQueue {
    states: Vec<FamilyState>,
    next_pending: usize,
    waiting: Vec<usize>,
    seated: Vec<usize>,
}

impl DemandQueue {
    /// Creates a queue with every family `Pending`.
    pub fn new(mut families: Vec<Family>) -> Self {
        families.sort_by_key(|f| (f.arrival_time, f.family_id));
        Self {
            states: families.into_iter().map(FamilyState::pending).collect(),
            next_pending: 0,
            waiting: Vec::new(),
            seated: Vec::new(),
        }
    }

    /// Number of families.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the queue holds no families.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Runtime state of every family, in arrival order.
    pub fn states(&self) -> &[FamilyState] {
        &self.states
    }

    /// Runtime state at a queue position.
    pub fn state(&self, idx: usize) -> &FamilyState {
        &self.states[idx]
    }

    /// Queue positions of waiting families, earliest arrival first.
    pub fn waiting_indices(&self) -> &[usize] {
        &self.waiting
    }

    /// Queue positions of seated families, in seating order.
    pub fn seated_indices(&self) -> &[usize] {
        &self.seated
    }

    /// Waiting families, earliest arrival first.
    pub fn waiting(&self) -> impl Iterator<Item = &Family> {
        self.waiting.iter().map(move |&i| &self.states[i].family)
    }

    /// Families arrived by `time` and not yet seated.
    pub fn arrived_unseated(&self, time: Tick) -> impl Iterator<Item = &Family> {
        self.waiting().filter(move |f| f.arrival_time <= time)
    }

    /// Arrival tick of the next family still pending.
    pub fn next_arrival(&self) -> Option<Tick> {
        self.states
            .get(self.next_pending)
            .map(|s| s.family.arrival_time)
    }

    /// Number of families not yet arrived.
    pub fn pending_count(&self) -> usize {
        self.states.len() - self.next_pending
    }

    /// Number of waiting families.
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Number of seated families.
    pub fn seated_count(&self) -> usize {
        self.seated.len()
    }

    /// Whether no further state change is possible without new input:
    /// nobody is pending and nobody is seated.
    pub fn is_settled(&self) -> bool {
        self.pending_count() == 0 && self.seated.is_empty()
    }

    /// Latest `arrival_time + dining_duration` over all families, or 0 for
    /// an empty queue. Runs always cover at least this horizon.
    pub fn nominal_horizon(&self) -> Tick {
        self.states
            .iter()
            .map(|s| s.family.arrival_time.saturating_add(s.family.dining_duration))
            .max()
            .unwrap_or(0)
    }

    /// Moves every family with `arrival_time <= time` from `Pending` to
    /// `Waiting`. Returns their queue positions.
    pub fn admit(&mut self, time: Tick) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(state) = self.states.get_mut(self.next_pending) {
            if state.family.arrival_time > time {
                break;
            }
            state.status = FamilyStatus::Waiting;
            admitted.push(self.next_pending);
            self.waiting.push(self.next_pending);
            self.next_pending += 1;
        }
        admitted
    }

    /// Records that a waiting family took a seat.
    pub(crate) fn mark_seated(&mut self, idx: usize, time: Tick, seat_id: &str) {
        let state = &mut self.states[idx];
        debug_assert_eq!(state.status, FamilyStatus::Waiting);
        state.status = FamilyStatus::Seated;
        state.seated_at = Some(time);
        state.assigned_seat = Some(seat_id.to_string());
        self.waiting.retain(|&i| i != idx);
        self.seated.push(idx);
    }

    /// Records that a seated family left.
    pub(crate) fn mark_left(&mut self, idx: usize) {
        let state = &mut self.states[idx];
        debug_assert_eq!(state.status, FamilyStatus::Seated);
        state.status = FamilyStatus::Left;
        self.seated.retain(|&i| i != idx);
    }

    /// Flags that a `Waiting` event was emitted for the family.
    pub(crate) fn mark_conflict_reported(&mut self, idx: usize) {
        self.states[idx].conflict_reported = true;
    }
}
