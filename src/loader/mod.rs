//! Input loading.
//!
//! - [`customers`]: demand records from CSV, with a per-row rejection
//!   report, and the matching CSV writer.
//! - [`seats`]: seat configuration from JSON.
//!
//! Both formats accept the camelCase field names used in serialized
//! output plus snake_case and legacy aliases.

mod customers;
mod seats;

pub use customers::{
    load_customers_csv, load_customers_file, write_customers_csv, LoadReport, RejectedRecord,
};
pub use seats::{load_seating_file, load_seating_json};
