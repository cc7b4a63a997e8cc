//! Replay access over recorded frames.
//!
//! Frames are self-contained snapshots, so any past state can be read
//! back without re-running the scheduler. Family status is not stored in
//! frames; it is reconstructed from the event stream.

use crate::models::{Event, EventKind, FamilyId, FamilyStatus, Frame, Tick};
use crate::validation::{ValidationError, ValidationErrorKind};

/// An ordered, replayable frame sequence.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    frames: Vec<Frame>,
}

impl Timeline {
    /// Wraps a frame sequence.
    ///
    /// # Errors
    /// If timestamps are not strictly increasing.
    pub fn new(frames: Vec<Frame>) -> Result<Self, ValidationError> {
        if let Some(pair) = frames
            .windows(2)
            .find(|w| w[0].timestamp >= w[1].timestamp)
        {
            return Err(ValidationError {
                kind: ValidationErrorKind::UnorderedFrames,
                message: format!(
                    "Frame at t={} is followed by frame at t={}",
                    pair[0].timestamp, pair[1].timestamp
                ),
            });
        }
        Ok(Self { frames })
    }

    /// All frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the timeline has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Last frame of the run.
    pub fn final_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// State in effect at `time`: the latest frame with
    /// `timestamp <= time`.
    pub fn frame_at(&self, time: Tick) -> Option<&Frame> {
        let n = self.frames.partition_point(|f| f.timestamp <= time);
        n.checked_sub(1).map(|i| &self.frames[i])
    }

    /// Every event up to and including `time`, in emission order.
    pub fn events_until(&self, time: Tick) -> impl Iterator<Item = &Event> {
        self.frames
            .iter()
            .take_while(move |f| f.timestamp <= time)
            .flat_map(|f| f.events.iter())
    }

    /// Every event of the run.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.frames.iter().flat_map(|f| f.events.iter())
    }

    /// Status of a family at `time`, derived from its events.
    pub fn status_of(&self, family_id: FamilyId, time: Tick) -> FamilyStatus {
        self.events_until(time)
            .filter(|e| e.family_id == family_id)
            .fold(FamilyStatus::Pending, |status, e| advance(status, e.kind))
    }

    /// Family holding a seat at `time`.
    pub fn seat_occupant(&self, seat_id: &str, time: Tick) -> Option<FamilyId> {
        self.frame_at(time).and_then(|f| f.occupant_of(seat_id))
    }

    /// Status of a family at every frame.
    pub fn status_history(&self, family_id: FamilyId) -> Vec<(Tick, FamilyStatus)> {
        let mut status = FamilyStatus::Pending;
        self.frames
            .iter()
            .map(|f| {
                for e in f.events.iter().filter(|e| e.family_id == family_id) {
                    status = advance(status, e.kind);
                }
                (f.timestamp, status)
            })
            .collect()
    }

    /// Consumes the timeline, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

fn advance(status: FamilyStatus, kind: EventKind) -> FamilyStatus {
    match kind {
        EventKind::Arrival => FamilyStatus::Waiting,
        EventKind::Seated => FamilyStatus::Seated,
        EventKind::Left => FamilyStatus::Left,
        EventKind::Waiting => status,
    }
}
