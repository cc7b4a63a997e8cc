//! Seating configuration and run options.
//!
//! Ancillary caps are explicit: [`AncillaryCap::Unlimited`] means only the
//! seat-level flags constrain allocation, [`AncillaryCap::Limited`] adds a
//! shared counter on top.

use serde::{Deserialize, Serialize};

use super::{Seat, Tick};

/// Cap on a shared ancillary resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AncillaryCap {
    /// No global counter; seat flags only.
    #[default]
    Unlimited,
    /// At most this many units in use at once.
    Limited(u32),
}

impl AncillaryCap {
    /// The cap, if any.
    pub fn limit(self) -> Option<u32> {
        match self {
            AncillaryCap::Unlimited => None,
            AncillaryCap::Limited(n) => Some(n),
        }
    }

    /// Whether `need` units could ever be held at once.
    pub fn admits(self, need: u32) -> bool {
        self.limit().map_or(true, |cap| need <= cap)
    }
}

impl From<Option<u32>> for AncillaryCap {
    fn from(limit: Option<u32>) -> Self {
        limit.map_or(AncillaryCap::Unlimited, AncillaryCap::Limited)
    }
}

/// Static restaurant configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingConfig {
    /// Seat inventory.
    pub seats: Vec<Seat>,
    /// Shared baby-chair cap.
    #[serde(default)]
    pub baby_chairs: AncillaryCap,
    /// Shared wheelchair-spot cap.
    #[serde(default)]
    pub wheelchairs: AncillaryCap,
}

impl SeatingConfig {
    /// Creates a configuration with uncapped ancillary resources.
    pub fn new(seats: Vec<Seat>) -> Self {
        Self {
            seats,
            baby_chairs: AncillaryCap::Unlimited,
            wheelchairs: AncillaryCap::Unlimited,
        }
    }

    /// Adds a seat.
    pub fn with_seat(mut self, seat: Seat) -> Self {
        self.seats.push(seat);
        self
    }

    /// Caps the shared baby chairs.
    pub fn with_baby_chairs(mut self, max: u32) -> Self {
        self.baby_chairs = AncillaryCap::Limited(max);
        self
    }

    /// Caps the shared wheelchair spots.
    pub fn with_wheelchairs(mut self, max: u32) -> Self {
        self.wheelchairs = AncillaryCap::Limited(max);
        self
    }

    /// Largest seat capacity in the pool.
    pub fn max_capacity(&self) -> u32 {
        self.seats.iter().map(Seat::capacity).max().unwrap_or(0)
    }
}

/// How repeated seating failures are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictReporting {
    /// One `Waiting` event per family, on its arrival tick.
    #[default]
    FirstOnly,
    /// A `Waiting` event on every tick the family fails to be seated.
    EveryTick,
}

/// Options for a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOptions {
    /// Conflict event policy.
    #[serde(default)]
    pub conflict_reporting: ConflictReporting,
    /// Last tick to simulate. `None` runs until nothing can change.
    #[serde(default)]
    pub max_ticks: Option<Tick>,
}

impl SimulationOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the conflict event policy.
    pub fn with_conflict_reporting(mut self, reporting: ConflictReporting) -> Self {
        self.conflict_reporting = reporting;
        self
    }

    /// Sets the safety bound on the horizon.
    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let cfg = SeatingConfig::new(vec![Seat::single("S1")])
            .with_seat(Seat::six("T1"))
            .with_baby_chairs(2);

        assert_eq!(cfg.seats.len(), 2);
        assert_eq!(cfg.baby_chairs, AncillaryCap::Limited(2));
        assert_eq!(cfg.wheelchairs, AncillaryCap::Unlimited);
        assert_eq!(cfg.max_capacity(), 6);
    }

    #[test]
    fn test_cap_admits() {
        assert!(AncillaryCap::Unlimited.admits(100));
        assert!(AncillaryCap::Limited(2).admits(2));
        assert!(!AncillaryCap::Limited(2).admits(3));
        assert_eq!(AncillaryCap::from(Some(3)), AncillaryCap::Limited(3));
        assert_eq!(AncillaryCap::from(None), AncillaryCap::Unlimited);
    }

    #[test]
    fn test_cap_json() {
        let json = serde_json::to_string(&AncillaryCap::Limited(4)).unwrap();
        assert_eq!(json, "{\"limited\":4}");
        let cap: AncillaryCap = serde_json::from_str("\"unlimited\"").unwrap();
        assert_eq!(cap, AncillaryCap::Unlimited);
    }

    #[test]
    fn test_options_builder() {
        let opts = SimulationOptions::new()
            .with_conflict_reporting(ConflictReporting::EveryTick)
            .with_max_ticks(500);
        assert_eq!(opts.conflict_reporting, ConflictReporting::EveryTick);
        assert_eq!(opts.max_ticks, Some(500));
        assert_eq!(SimulationOptions::default().max_ticks, None);
    }
}
