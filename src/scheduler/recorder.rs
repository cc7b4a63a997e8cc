//! Frame recorder.
//!
//! Pure capture: deep-copies the pool and the waiting queue into a new
//! [`Frame`] at the end of each tick. No decision logic lives here.

use super::{DemandQueue, ResourcePool};
use crate::models::{Event, Frame, Tick};

/// Collects one frame per tick.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
}

impl FrameRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from the current state without storing it.
    pub fn capture(time: Tick, pool: &ResourcePool, queue: &DemandQueue, events: Vec<Event>) -> Frame {
        Frame {
            timestamp: time,
            seats: pool.seats().to_vec(),
            waiting_queue: queue.waiting().cloned().collect(),
            events,
            ancillary: pool.ancillary_snapshot(),
        }
    }

    /// Captures and appends a frame.
    ///
    /// # Panics
    /// In debug builds, if `time` does not exceed the previous frame's
    /// timestamp.
    pub fn record(&mut self, time: Tick, pool: &ResourcePool, queue: &DemandQueue, events: Vec<Event>) -> &Frame {
        debug_assert!(
            self.frames.last().map_or(true, |f| f.timestamp < time),
            "frame timestamps must strictly increase"
        );
        let frame = Self::capture(time, pool, queue, events);
        self.frames.push(frame);
        &self.frames[self.frames.len() - 1]
    }

    /// Recorded frames so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Consumes the recorder, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Family, Seat, SeatingConfig};

    #[test]
    fn test_frames_do_not_alias_pool_state() {
        let cfg = SeatingConfig::new(vec![Seat::single("S1")]).with_wheelchairs(2);
        let mut pool = ResourcePool::new(&cfg).unwrap();
        let family = Family::new(1, 0, 1);
        let mut queue = DemandQueue::new(vec![family.clone()]);
        let mut recorder = FrameRecorder::new();

        queue.admit(0);
        recorder.record(0, &pool, &queue, Vec::new());

        assert!(pool.try_reserve(0, &family));
        queue.mark_seated(0, 1, "S1");
        recorder.record(1, &pool, &queue, Vec::new());

        let frames = recorder.into_frames();
        assert_eq!(frames.len(), 2);
        // Earlier frame is unchanged by later mutation.
        assert!(frames[0].seats[0].is_free());
        assert_eq!(frames[0].waiting_queue.len(), 1);
        assert_eq!(frames[1].seats[0].occupant, Some(1));
        assert!(frames[1].waiting_queue.is_empty());
        assert_eq!(frames[1].ancillary.wheelchairs_available, Some(2));
        assert_eq!(frames[1].ancillary.baby_chairs_available, None);
    }
}
