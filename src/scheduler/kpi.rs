//! Seating quality metrics (KPIs).
//!
//! Computes performance indicators purely from recorded frames, so any
//! consumer holding the output can evaluate a run without engine access.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | End time | Timestamp of the last frame |
//! | Avg / Max wait | Seating tick minus arrival tick, over seated families |
//! | Never seated | Arrived families without a `Seated` event |
//! | Seat utilization | Frames in which the seat is occupied / total frames |
//! | Peak queue | Longest waiting queue in any frame |

use std::collections::HashMap;

use crate::models::{EventKind, FamilyId, Frame, Tick};

/// Run performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone)]
pub struct SimulationKpi {
    /// Timestamp of the last frame.
    pub end_time: Tick,
    /// Families that arrived.
    pub arrivals: usize,
    /// Families that were seated.
    pub seated: usize,
    /// Families that left.
    pub departed: usize,
    /// Families that arrived but were never seated.
    pub never_seated: usize,
    /// `Waiting` events emitted.
    pub conflict_events: usize,
    /// Mean wait of seated families (ticks).
    pub avg_wait: f64,
    /// Longest wait of any seated family (ticks).
    pub max_wait: Tick,
    /// Longest waiting queue observed.
    pub peak_queue: usize,
    /// Per-seat utilization (0.0..1.0).
    pub utilization_by_seat: HashMap<String, f64>,
    /// Mean seat utilization (0.0..1.0).
    pub avg_utilization: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a recorded frame sequence.
    pub fn calculate(frames: &[Frame]) -> Self {
        let mut arrived_at: HashMap<FamilyId, Tick> = HashMap::new();
        let mut waits: Vec<Tick> = Vec::new();
        let mut departed = 0;
        let mut conflict_events = 0;
        let mut busy: HashMap<&str, usize> = HashMap::new();
        let mut peak_queue = 0;

        for frame in frames {
            for event in &frame.events {
                match event.kind {
                    EventKind::Arrival => {
                        arrived_at.insert(event.family_id, event.timestamp);
                    }
                    EventKind::Seated => {
                        let arrival = arrived_at
                            .get(&event.family_id)
                            .copied()
                            .unwrap_or(event.timestamp);
                        waits.push(event.timestamp.saturating_sub(arrival));
                    }
                    EventKind::Left => departed += 1,
                    EventKind::Waiting => conflict_events += 1,
                }
            }
            for seat in &frame.seats {
                let entry = busy.entry(seat.id.as_str()).or_insert(0);
                if !seat.is_free() {
                    *entry += 1;
                }
            }
            peak_queue = peak_queue.max(frame.waiting_queue.len());
        }

        let horizon = frames.len();
        let utilization_by_seat: HashMap<String, f64> = if horizon == 0 {
            HashMap::new()
        } else {
            busy.into_iter()
                .map(|(id, n)| (id.to_string(), n as f64 / horizon as f64))
                .collect()
        };
        let avg_utilization = if utilization_by_seat.is_empty() {
            0.0
        } else {
            utilization_by_seat.values().sum::<f64>() / utilization_by_seat.len() as f64
        };

        let avg_wait = if waits.is_empty() {
            0.0
        } else {
            waits.iter().sum::<Tick>() as f64 / waits.len() as f64
        };

        Self {
            end_time: frames.last().map(|f| f.timestamp).unwrap_or(0),
            arrivals: arrived_at.len(),
            seated: waits.len(),
            departed,
            never_seated: arrived_at.len().saturating_sub(waits.len()),
            conflict_events,
            avg_wait,
            max_wait: waits.iter().copied().max().unwrap_or(0),
            peak_queue,
            utilization_by_seat,
            avg_utilization,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_wait: Tick, min_utilization: f64) -> bool {
        self.max_wait <= max_wait && self.avg_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Family, Seat, SeatingConfig};
    use crate::scheduler::simulate;

    fn two_families_one_seat() -> Vec<Frame> {
        let config = SeatingConfig::new(vec![Seat::single("S1")]);
        simulate(
            &config,
            vec![
                Family::new(1, 0, 1).with_duration(10),
                Family::new(2, 0, 1).with_duration(10),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = SimulationKpi::calculate(&two_families_one_seat());
        assert_eq!(kpi.end_time, 20);
        assert_eq!(kpi.arrivals, 2);
        assert_eq!(kpi.seated, 2);
        assert_eq!(kpi.departed, 2);
        assert_eq!(kpi.never_seated, 0);
        assert_eq!(kpi.conflict_events, 1);
        assert_eq!(kpi.max_wait, 10);
        assert!((kpi.avg_wait - 5.0).abs() < 1e-10);
        assert_eq!(kpi.peak_queue, 1);
    }

    #[test]
    fn test_kpi_utilization() {
        let kpi = SimulationKpi::calculate(&two_families_one_seat());
        // Occupied in frames 0..=19 out of 21.
        let expected = 20.0 / 21.0;
        assert!((kpi.utilization_by_seat["S1"] - expected).abs() < 1e-10);
        assert!((kpi.avg_utilization - expected).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_never_seated() {
        let config = SeatingConfig::new(vec![Seat::single("S1")]);
        let frames = simulate(&config, vec![Family::new(1, 0, 3).with_duration(5)]).unwrap();
        let kpi = SimulationKpi::calculate(&frames);
        assert_eq!(kpi.arrivals, 1);
        assert_eq!(kpi.seated, 0);
        assert_eq!(kpi.never_seated, 1);
        assert!((kpi.avg_wait - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = SimulationKpi::calculate(&[]);
        assert_eq!(kpi.end_time, 0);
        assert_eq!(kpi.arrivals, 0);
        assert!(kpi.utilization_by_seat.is_empty());
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = SimulationKpi::calculate(&two_families_one_seat());
        assert!(kpi.meets_thresholds(10, 0.5));
        assert!(!kpi.meets_thresholds(9, 0.5));
        assert!(!kpi.meets_thresholds(10, 1.5));
    }
}
