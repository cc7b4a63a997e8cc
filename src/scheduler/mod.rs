//! Tick-driven seat allocation scheduler.
//!
//! Components, leaf-first:
//!
//! - **`ResourcePool`**: seats plus shared ancillary counters, with
//!   all-or-nothing reservation.
//! - **`DemandQueue`**: families in arrival order with runtime state.
//! - **`AllocationEngine`**: FIFO, best-fit seating of waiting families.
//! - **`DepartureTracker`**: releases families whose dining time is over.
//! - **`FrameRecorder`**: deep-copies state into one frame per tick.
//! - **`Simulation`**: the sequential driver loop tying them together.
//!
//! # KPI
//!
//! `SimulationKpi` evaluates a run from its frames alone: waits, queue
//! length, seat utilization.

mod allocation;
mod departure;
mod kpi;
mod pool;
mod queue;
mod recorder;
mod simulation;

pub use allocation::AllocationEngine;
pub use departure::DepartureTracker;
pub use kpi::SimulationKpi;
pub use pool::{AncillaryCounter, ResourcePool};
pub use queue::DemandQueue;
pub use recorder::FrameRecorder;
pub use simulation::{simulate, RejectedFamily, Simulation, SimulationOutcome};
