//! Resource pool: seats plus shared ancillary counters.
//!
//! Every reservation is a single check-and-commit through `&mut self`:
//! either the seat and all ancillary units are taken together, or nothing
//! changes.
//!
//! Seats are stored in scan order (class, numeric suffix, id), so a plain
//! forward walk over the seats whose capacity covers a party visits the
//! exact-fit class first and then each larger class.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Result, SeatingError};
use crate::models::{AncillaryCap, AncillarySnapshot, Family, Seat, SeatingConfig, WaitReason};
use crate::validation::validate_config;

/// A shared counter for one ancillary resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncillaryCounter {
    cap: AncillaryCap,
    available: u32,
}

impl AncillaryCounter {
    /// Creates a full counter.
    pub fn new(cap: AncillaryCap) -> Self {
        Self {
            cap,
            available: cap.limit().unwrap_or(0),
        }
    }

    /// Configured cap.
    pub fn cap(&self) -> AncillaryCap {
        self.cap
    }

    /// Units left, or `None` when uncapped.
    pub fn available(&self) -> Option<u32> {
        self.cap.limit().map(|_| self.available)
    }

    /// Units currently handed out, or `None` when uncapped.
    pub fn in_use(&self) -> Option<u32> {
        self.cap.limit().map(|max| max - self.available)
    }

    /// Whether `need` units can be taken right now.
    pub fn can_take(&self, need: u32) -> bool {
        match self.cap {
            AncillaryCap::Unlimited => true,
            AncillaryCap::Limited(_) => self.available >= need,
        }
    }

    fn take(&mut self, need: u32) {
        if let AncillaryCap::Limited(_) = self.cap {
            self.available -= need;
        }
    }

    fn give_back(&mut self, count: u32) {
        if let AncillaryCap::Limited(max) = self.cap {
            self.available = (self.available + count).min(max);
        }
    }
}

/// The seat inventory and shared ancillary resources.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    seats: Vec<Seat>,
    index: HashMap<String, usize>,
    baby_chairs: AncillaryCounter,
    wheelchairs: AncillaryCounter,
}

impl ResourcePool {
    /// Builds a pool from configuration.
    ///
    /// Occupants present in the configuration are cleared.
    ///
    /// # Errors
    /// [`SeatingError::InvalidConfig`] if the configuration fails
    /// [`validate_config`].
    pub fn new(config: &SeatingConfig) -> Result<Self> {
        validate_config(config).map_err(SeatingError::InvalidConfig)?;

        let mut seats: Vec<Seat> = config
            .seats
            .iter()
            .cloned()
            .map(|mut s| {
                s.occupant = None;
                s
            })
            .collect();
        seats.sort_by(|a, b| a.scan_order(b));

        let index = seats
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        Ok(Self {
            seats,
            index,
            baby_chairs: AncillaryCounter::new(config.baby_chairs),
            wheelchairs: AncillaryCounter::new(config.wheelchairs),
        })
    }

    /// All seats in scan order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Position of a seat in scan order.
    pub fn seat_index(&self, seat_id: &str) -> Option<usize> {
        self.index.get(seat_id).copied()
    }

    /// Looks up a seat by id.
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seat_index(seat_id).map(|i| &self.seats[i])
    }

    /// Baby-chair counter.
    pub fn baby_chairs(&self) -> &AncillaryCounter {
        &self.baby_chairs
    }

    /// Wheelchair-spot counter.
    pub fn wheelchairs(&self) -> &AncillaryCounter {
        &self.wheelchairs
    }

    /// Current ancillary counters.
    pub fn ancillary_snapshot(&self) -> AncillarySnapshot {
        AncillarySnapshot {
            baby_chairs_available: self.baby_chairs.available(),
            wheelchairs_available: self.wheelchairs.available(),
        }
    }

    /// Seat indices whose capacity covers the party, best fit first.
    pub fn candidates<'a>(&'a self, family: &'a Family) -> impl Iterator<Item = usize> + 'a {
        self.seats
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.capacity() >= family.party_size)
            .map(|(i, _)| i)
    }

    /// Atomically reserves a seat and the family's ancillary units.
    ///
    /// Succeeds only if the seat is free, suits the family (capacity,
    /// accessibility, baby-chair capability) and both shared counters can
    /// cover the family's needs.
    pub fn try_reserve(&mut self, seat_idx: usize, family: &Family) -> bool {
        let Some(seat) = self.seats.get(seat_idx) else {
            return false;
        };
        if !seat.is_free()
            || !seat.suits(family)
            || !self.baby_chairs.can_take(family.baby_chairs_needed)
            || !self.wheelchairs.can_take(family.wheelchairs_needed)
        {
            return false;
        }

        self.baby_chairs.take(family.baby_chairs_needed);
        self.wheelchairs.take(family.wheelchairs_needed);
        self.seats[seat_idx].occupant = Some(family.family_id);
        true
    }

    /// Vacates a seat held by `family` and returns its ancillary units.
    ///
    /// Returns `false` and changes nothing if the family does not hold the
    /// seat.
    pub fn release(&mut self, seat_idx: usize, family: &Family) -> bool {
        match self.seats.get_mut(seat_idx) {
            Some(seat) if seat.occupant == Some(family.family_id) => {
                seat.occupant = None;
            }
            Some(seat) => {
                warn!(
                    seat = %seat.id,
                    family = family.family_id,
                    occupant = ?seat.occupant,
                    "release refused: seat held by another family"
                );
                return false;
            }
            None => return false,
        }
        self.baby_chairs.give_back(family.baby_chairs_needed);
        self.wheelchairs.give_back(family.wheelchairs_needed);
        true
    }

    /// Whether the family fits the pool at all, with every seat free and
    /// every counter full.
    pub fn could_ever_seat(&self, family: &Family) -> bool {
        self.baby_chairs.cap().admits(family.baby_chairs_needed)
            && self.wheelchairs.cap().admits(family.wheelchairs_needed)
            && self.seats.iter().any(|s| s.suits(family))
    }

    /// Explains why the family cannot be seated right now.
    pub fn diagnose(&self, family: &Family) -> WaitReason {
        if !self.could_ever_seat(family) {
            return WaitReason::Unsatisfiable;
        }
        let free_seat = self.seats.iter().any(|s| s.is_free() && s.suits(family));
        if !free_seat {
            WaitReason::NoSeatFree
        } else if !self.baby_chairs.can_take(family.baby_chairs_needed) {
            WaitReason::BabyChairsExhausted
        } else {
            WaitReason::WheelchairsExhausted
        }
    }
}
