//! Seat model.
//!
//! Seats are the allocatable units of capacity: bar-counter singles,
//! 4-person tables and 6-person tables. Each seat carries static
//! accessibility flags and a mutable occupant slot.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{Family, FamilyId};

/// Capacity class of a seat.
///
/// Classes are ordered by capacity, which is also the order in which the
/// allocation engine escalates from an exact fit to larger tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeatClass {
    /// One diner (bar counter).
    #[serde(rename = "SINGLE", alias = "Single", alias = "single", alias = "1P")]
    Single,
    /// Four-person table.
    #[serde(rename = "FOUR", alias = "Four", alias = "four", alias = "4P")]
    Four,
    /// Six-person table.
    #[serde(rename = "SIX", alias = "Six", alias = "six", alias = "6P")]
    Six,
}

impl SeatClass {
    /// All classes, smallest first.
    pub const ALL: [SeatClass; 3] = [SeatClass::Single, SeatClass::Four, SeatClass::Six];

    /// Number of diners the class seats.
    pub fn capacity(self) -> u32 {
        match self {
            SeatClass::Single => 1,
            SeatClass::Four => 4,
            SeatClass::Six => 6,
        }
    }

    /// Smallest class whose capacity covers `party_size`.
    pub fn smallest_fitting(party_size: u32) -> Option<SeatClass> {
        Self::ALL.into_iter().find(|c| c.capacity() >= party_size)
    }

    /// Whether tables of this class can take a baby chair by default.
    pub fn default_baby_capable(self) -> bool {
        !matches!(self, SeatClass::Single)
    }
}

impl std::fmt::Display for SeatClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SeatClass::Single => "SINGLE",
            SeatClass::Four => "FOUR",
            SeatClass::Six => "SIX",
        };
        f.write_str(s)
    }
}

/// A seat (or table) in the resource pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Unique seat identifier (e.g. `"S3"`, `"T4-2"`).
    pub id: String,
    /// Capacity class.
    pub class: SeatClass,
    /// Reachable by wheelchair.
    pub accessible: bool,
    /// Can take a baby chair.
    pub baby_capable: bool,
    /// Family currently holding the seat.
    pub occupant: Option<FamilyId>,
}

impl Seat {
    /// Creates an empty, non-accessible seat using the class default for
    /// baby chairs.
    pub fn new(id: impl Into<String>, class: SeatClass) -> Self {
        Self {
            id: id.into(),
            class,
            accessible: false,
            baby_capable: class.default_baby_capable(),
            occupant: None,
        }
    }

    /// Creates a single bar seat.
    pub fn single(id: impl Into<String>) -> Self {
        Self::new(id, SeatClass::Single)
    }

    /// Creates a 4-person table.
    pub fn four(id: impl Into<String>) -> Self {
        Self::new(id, SeatClass::Four)
    }

    /// Creates a 6-person table.
    pub fn six(id: impl Into<String>) -> Self {
        Self::new(id, SeatClass::Six)
    }

    /// Sets wheelchair accessibility.
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Sets baby-chair capability.
    pub fn with_baby_capable(mut self, baby_capable: bool) -> Self {
        self.baby_capable = baby_capable;
        self
    }

    /// Seat capacity.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.class.capacity()
    }

    /// Whether nobody holds the seat.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Static suitability: capacity and accessibility flags only.
    ///
    /// Ignores occupancy and the shared ancillary counters.
    pub fn suits(&self, family: &Family) -> bool {
        self.capacity() >= family.party_size
            && (family.wheelchairs_needed == 0 || self.accessible)
            && (family.baby_chairs_needed == 0 || self.baby_capable)
    }

    /// Trailing numeric part of the id (`"T4-12"` → 12).
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits: String = self
            .id
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        digits.parse().ok()
    }

    /// Deterministic scan order: class, then numeric suffix, then id.
    pub fn scan_order(&self, other: &Seat) -> Ordering {
        self.class
            .cmp(&other.class)
            .then_with(|| match (self.numeric_suffix(), other.numeric_suffix()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_capacity() {
        assert_eq!(SeatClass::Single.capacity(), 1);
        assert_eq!(SeatClass::Four.capacity(), 4);
        assert_eq!(SeatClass::Six.capacity(), 6);
    }

    #[test]
    fn test_smallest_fitting() {
        assert_eq!(SeatClass::smallest_fitting(1), Some(SeatClass::Single));
        assert_eq!(SeatClass::smallest_fitting(2), Some(SeatClass::Four));
        assert_eq!(SeatClass::smallest_fitting(4), Some(SeatClass::Four));
        assert_eq!(SeatClass::smallest_fitting(5), Some(SeatClass::Six));
        assert_eq!(SeatClass::smallest_fitting(7), None);
    }

    #[test]
    fn test_seat_builder() {
        let s = Seat::four("T1").with_accessible(true).with_baby_capable(false);
        assert_eq!(s.id, "T1");
        assert_eq!(s.class, SeatClass::Four);
        assert!(s.accessible);
        assert!(!s.baby_capable);
        assert!(s.is_free());

        assert!(!Seat::single("S1").baby_capable);
        assert!(Seat::six("T6").baby_capable);
    }

    #[test]
    fn test_suits_checks_flags() {
        let plain = Family::new(1, 0, 3);
        let wheel = Family::new(2, 0, 2).with_wheelchairs(1);
        let baby = Family::new(3, 0, 2).with_baby_chairs(1);

        let table = Seat::four("T1").with_baby_capable(false);
        assert!(table.suits(&plain));
        assert!(!table.suits(&wheel));
        assert!(!table.suits(&baby));
        assert!(!Seat::single("S1").suits(&plain));

        let accessible = Seat::four("T2").with_accessible(true);
        assert!(accessible.suits(&wheel));
        assert!(accessible.suits(&baby));
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(Seat::single("S12").numeric_suffix(), Some(12));
        assert_eq!(Seat::four("T4-3").numeric_suffix(), Some(3));
        assert_eq!(Seat::six("window").numeric_suffix(), None);
    }

    #[test]
    fn test_scan_order_is_numeric_within_class() {
        let mut seats = vec![
            Seat::four("T10"),
            Seat::single("S2"),
            Seat::four("T2"),
            Seat::six("L1"),
            Seat::single("S10"),
        ];
        seats.sort_by(|a, b| a.scan_order(b));
        let ids: Vec<&str> = seats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S10", "T2", "T10", "L1"]);
    }

    #[test]
    fn test_class_serde_aliases() {
        let c: SeatClass = serde_json::from_str("\"4P\"").unwrap();
        assert_eq!(c, SeatClass::Four);
        let c: SeatClass = serde_json::from_str("\"SINGLE\"").unwrap();
        assert_eq!(c, SeatClass::Single);
        assert_eq!(serde_json::to_string(&SeatClass::Six).unwrap(), "\"SIX\"");
    }
}
