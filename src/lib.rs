//! Tick-driven seat allocation for restaurants.
//!
//! Families arrive over time, wait for a suitable seat, dine, and leave.
//! Seats come in three capacity classes and may carry accessibility flags;
//! baby chairs and wheelchair spots are optional shared resources with a
//! global cap. The engine is a pure function of configuration and demand:
//! it produces one self-contained [`models::Frame`] per tick.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Seat`, `Family`, `Event`, `Frame`,
//!   `SeatingConfig`, `SimulationOptions`
//! - **`scheduler`**: Resource pool, demand queue, allocation, departures,
//!   frame recording, driver loop and KPIs
//! - **`validation`**: Configuration and demand integrity checks
//! - **`loader`**: Customer CSV and seat JSON input
//! - **`generator`**: Sample and random demand
//! - **`timeline`**: Replay over recorded frames
//! - **`export`**: JSON, text log and CSV event output
//!
//! # Example
//!
//! ```
//! use u_seating::models::{Family, Seat, SeatingConfig};
//! use u_seating::scheduler::simulate;
//!
//! let config = SeatingConfig::new(vec![Seat::single("S1"), Seat::four("T1")]);
//! let frames = simulate(
//!     &config,
//!     vec![
//!         Family::new(1, 0, 1).with_duration(10),
//!         Family::new(2, 0, 3).with_duration(5),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(frames[0].seat_of(1).map(|s| s.id.as_str()), Some("S1"));
//! assert_eq!(frames[0].seat_of(2).map(|s| s.id.as_str()), Some("T1"));
//! assert_eq!(frames.last().unwrap().timestamp, 10);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", ch. 4
//!   (first-come-first-served dispatching)
//! - Law (2015), "Simulation Modeling and Analysis", ch. 1 (next-event and
//!   fixed-increment time advance)

pub mod error;
pub mod export;
pub mod generator;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod timeline;
pub mod validation;

pub use error::{Result, SeatingError};
