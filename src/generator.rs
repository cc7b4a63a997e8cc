//! Demand generation.
//!
//! - [`generate_sample`]: fixed, evenly spaced demand for demos.
//! - [`DemandGenerator`]: random demand driven by a caller-supplied RNG,
//!   reproducible with a seeded generator.

use rand::Rng;

use crate::models::{Family, Tick};

/// Evenly spaced sample demand: family `i` arrives at `5 * i` with a party
/// of 2 and dines for 30 ticks.
pub fn generate_sample(count: u32) -> Vec<Family> {
    (1..=count)
        .map(|i| Family::new(i, u64::from(i) * 5, 2).with_duration(30))
        .collect()
}

/// Random demand parameters.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_seating::generator::DemandGenerator;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let families = DemandGenerator::new()
///     .with_party_range(1, 4)
///     .generate(20, &mut rng);
/// assert_eq!(families.len(), 20);
/// assert!(families.iter().all(|f| (1..=4).contains(&f.party_size)));
/// ```
#[derive(Debug, Clone)]
pub struct DemandGenerator {
    min_party: u32,
    max_party: u32,
    max_arrival_gap: Tick,
    min_duration: Tick,
    max_duration: Tick,
    baby_probability: f64,
    wheelchair_probability: f64,
}

impl DemandGenerator {
    /// Creates a generator with restaurant-like defaults: parties of 1–6,
    /// gaps of up to 5 ticks, dining for 20–60 ticks.
    pub fn new() -> Self {
        Self {
            min_party: 1,
            max_party: 6,
            max_arrival_gap: 5,
            min_duration: 20,
            max_duration: 60,
            baby_probability: 0.15,
            wheelchair_probability: 0.05,
        }
    }

    /// Sets the party size range (inclusive, at least 1).
    pub fn with_party_range(mut self, min: u32, max: u32) -> Self {
        self.min_party = min.max(1);
        self.max_party = max.max(self.min_party);
        self
    }

    /// Sets the largest gap between consecutive arrivals.
    pub fn with_arrival_gap(mut self, max_gap: Tick) -> Self {
        self.max_arrival_gap = max_gap;
        self
    }

    /// Sets the dining duration range (inclusive, at least 1).
    pub fn with_duration_range(mut self, min: Tick, max: Tick) -> Self {
        self.min_duration = min.max(1);
        self.max_duration = max.max(self.min_duration);
        self
    }

    /// Sets the chance that a family brings a baby.
    pub fn with_baby_probability(mut self, p: f64) -> Self {
        self.baby_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the chance that a family needs a wheelchair spot.
    pub fn with_wheelchair_probability(mut self, p: f64) -> Self {
        self.wheelchair_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Generates `count` families with ids `1..=count` in arrival order.
    pub fn generate<R: Rng>(&self, count: u32, rng: &mut R) -> Vec<Family> {
        let mut arrival: Tick = 0;
        (1..=count)
            .map(|i| {
                if i > 1 {
                    arrival += rng.random_range(0..=self.max_arrival_gap);
                }
                let party = rng.random_range(self.min_party..=self.max_party);
                let babies = u32::from(rng.random_bool(self.baby_probability));
                let wheelchairs = u32::from(rng.random_bool(self.wheelchair_probability));
                Family::new(i, arrival, party)
                    .with_baby_chairs(babies)
                    .with_wheelchairs(wheelchairs)
                    .with_duration(rng.random_range(self.min_duration..=self.max_duration))
            })
            .collect()
    }
}

impl Default for DemandGenerator {
    fn default() -> Self {
        Self::new()
    }
}
