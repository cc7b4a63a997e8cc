//! Tick-driven simulation driver.
//!
//! # Algorithm
//!
//! For `t = 0, 1, 2, ...`:
//! 1. Admit families with `arrival_time <= t` (`Arrival` events).
//! 2. Release families whose dining time is over (`Left` events).
//! 3. Seat waiting families, oldest first (`Seated` / `Waiting` events).
//! 4. Record a frame.
//!
//! The run covers at least the nominal horizon, the latest
//! `arrival_time + dining_duration` over all families, and continues past
//! it while anyone is still pending or seated. It ends at the first tick
//! that satisfies both. Once nobody is pending or seated, every seat is
//! free and every counter is full, so any family still waiting can never
//! be seated; it stays in the waiting queue until the end and is reported
//! in [`SimulationOutcome::unseated`].

use tracing::{info, warn};

use super::{AllocationEngine, DemandQueue, DepartureTracker, FrameRecorder, ResourcePool};
use crate::error::Result;
use crate::models::{Event, Family, Frame, SeatingConfig, SimulationOptions, Tick};
use crate::validation::{validate_family, ValidationError, ValidationErrorKind};

/// A demand record excluded from the run.
#[derive(Debug, Clone)]
pub struct RejectedFamily {
    /// The offending record.
    pub family: Family,
    /// Why it was excluded.
    pub error: ValidationError,
}

/// Result of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// One frame per tick, strictly increasing timestamps.
    pub frames: Vec<Frame>,
    /// Families still waiting when the run ended.
    pub unseated: Vec<Family>,
    /// Records excluded before the run.
    pub rejected: Vec<RejectedFamily>,
    /// Whether the run was cut short by `max_ticks`.
    pub truncated: bool,
}

impl SimulationOutcome {
    /// Timestamp of the last frame.
    pub fn end_time(&self) -> Tick {
        self.frames.last().map(|f| f.timestamp).unwrap_or(0)
    }

    /// Last frame of the run.
    pub fn final_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

/// A single simulation run over a fixed pool and demand list.
///
/// # Example
///
/// ```
/// use u_seating::models::{Family, Seat, SeatingConfig};
/// use u_seating::scheduler::Simulation;
///
/// let config = SeatingConfig::new(vec![Seat::single("S1")]);
/// let families = vec![Family::new(1, 0, 1).with_duration(10)];
///
/// let outcome = Simulation::new(&config, families).unwrap().run();
/// assert_eq!(outcome.frames[0].occupant_of("S1"), Some(1));
/// assert_eq!(outcome.end_time(), 10);
/// assert!(outcome.unseated.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    pool: ResourcePool,
    queue: DemandQueue,
    options: SimulationOptions,
    rejected: Vec<RejectedFamily>,
}

impl Simulation {
    /// Builds a simulation.
    ///
    /// Invalid demand records (zero party size, zero duration, repeated
    /// family id) are excluded and reported in
    /// [`SimulationOutcome::rejected`]; they never abort the run.
    ///
    /// # Errors
    /// [`SeatingError::InvalidConfig`](crate::SeatingError::InvalidConfig)
    /// if the seat configuration is malformed.
    pub fn new(config: &SeatingConfig, families: Vec<Family>) -> Result<Self> {
        let pool = ResourcePool::new(config)?;

        let mut accepted = Vec::with_capacity(families.len());
        let mut rejected = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for family in families {
            let check = validate_family(&family).and_then(|()| {
                if seen.contains(&family.family_id) {
                    Err(ValidationError {
                        kind: ValidationErrorKind::DuplicateId,
                        message: format!("Duplicate family ID: {}", family.family_id),
                    })
                } else {
                    Ok(())
                }
            });
            match check {
                Ok(()) => {
                    seen.insert(family.family_id);
                    accepted.push(family);
                }
                Err(error) => {
                    warn!(family = family.family_id, %error, "family excluded from run");
                    rejected.push(RejectedFamily { family, error });
                }
            }
        }

        Ok(Self {
            pool,
            queue: DemandQueue::new(accepted),
            options: SimulationOptions::default(),
            rejected,
        })
    }

    /// Sets run options.
    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    /// The resource pool in its initial state.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// The demand queue in its initial state.
    pub fn queue(&self) -> &DemandQueue {
        &self.queue
    }

    /// Records excluded at construction.
    pub fn rejected(&self) -> &[RejectedFamily] {
        &self.rejected
    }

    /// Runs the whole horizon and returns the recorded frames.
    pub fn run(self) -> SimulationOutcome {
        let Self {
            mut pool,
            mut queue,
            options,
            rejected,
        } = self;

        info!(
            families = queue.len(),
            seats = pool.seats().len(),
            rejected = rejected.len(),
            "simulation started"
        );

        let allocation = AllocationEngine::new(options.conflict_reporting);
        let departures = DepartureTracker::new();
        let mut recorder = FrameRecorder::new();
        let horizon = queue.nominal_horizon();
        let mut time: Tick = 0;
        let mut truncated = false;

        loop {
            let mut events: Vec<Event> = queue
                .admit(time)
                .into_iter()
                .map(|idx| Event::arrival(time, &queue.state(idx).family))
                .collect();
            events.extend(departures.tick(time, &mut pool, &mut queue));
            events.extend(allocation.tick(time, &mut pool, &mut queue));
            recorder.record(time, &pool, &queue, events);

            if queue.is_settled() && time >= horizon {
                break;
            }
            if options.max_ticks.is_some_and(|max| time >= max) {
                truncated = true;
                warn!(time, "simulation truncated by max_ticks");
                break;
            }
            time += 1;
        }

        let unseated: Vec<Family> = queue.waiting().cloned().collect();
        info!(
            frames = recorder.len(),
            end_time = time,
            unseated = unseated.len(),
            truncated,
            "simulation finished"
        );

        SimulationOutcome {
            frames: recorder.into_frames(),
            unseated,
            rejected,
            truncated,
        }
    }
}

/// Runs a simulation with default options and returns its frames.
///
/// Pure function of its inputs: the same configuration and demand always
/// yield the same frames.
pub fn simulate(config: &SeatingConfig, families: Vec<Family>) -> Result<Vec<Frame>> {
    Ok(Simulation::new(config, families)?.run().frames)
}
