//! Seating domain models.
//!
//! Provides the data types describing a restaurant seating problem and
//! the recorded output of a simulation run.
//!
//! # Domain Mappings
//!
//! | u-seating | Restaurant | Generic scheduling |
//! |-----------|------------|--------------------|
//! | Family | Party of diners | Job |
//! | Seat | Bar seat / table | Resource |
//! | Ancillary cap | Baby chairs, wheelchair spots | Consumable |
//! | Frame | Floor snapshot | Schedule state at t |

mod config;
mod event;
mod family;
mod frame;
mod seat;

pub use config::{AncillaryCap, ConflictReporting, SeatingConfig, SimulationOptions};
pub use event::{Event, EventKind, WaitReason};
pub use family::{Family, FamilyId, FamilyLabel, FamilyState, FamilyStatus, Tick};
pub use frame::{AncillarySnapshot, Frame};
pub use seat::{Seat, SeatClass};
