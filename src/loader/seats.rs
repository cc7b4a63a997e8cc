//! Seat configuration loading.
//!
//! Accepts either a bare array of seats (ancillary resources uncapped) or
//! an object:
//!
//! ```json
//! {
//!   "seats": [{ "id": "T1", "class": "4P", "isWheelchairAccessible": true }],
//!   "babyChairsMax": 2,
//!   "wheelchairsMax": 1
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SeatingError};
use crate::models::{Seat, SeatClass, SeatingConfig};
use crate::validation::validate_config;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatRecord {
    id: String,
    #[serde(alias = "type")]
    class: SeatClass,
    #[serde(default, alias = "isWheelchairAccessible")]
    accessible: bool,
    #[serde(default)]
    baby_capable: Option<bool>,
}

impl From<SeatRecord> for Seat {
    fn from(r: SeatRecord) -> Self {
        let baby_capable = r.baby_capable.unwrap_or(r.class.default_baby_capable());
        Seat::new(r.id, r.class)
            .with_accessible(r.accessible)
            .with_baby_capable(baby_capable)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatingDocument {
    seats: Vec<SeatRecord>,
    #[serde(default)]
    baby_chairs_max: Option<u32>,
    #[serde(default)]
    wheelchairs_max: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeatingFile {
    Bare(Vec<SeatRecord>),
    Document(SeatingDocument),
}

impl From<SeatingFile> for SeatingConfig {
    fn from(file: SeatingFile) -> Self {
        match file {
            SeatingFile::Bare(seats) => {
                SeatingConfig::new(seats.into_iter().map(Seat::from).collect())
            }
            SeatingFile::Document(doc) => SeatingConfig {
                seats: doc.seats.into_iter().map(Seat::from).collect(),
                baby_chairs: doc.baby_chairs_max.into(),
                wheelchairs: doc.wheelchairs_max.into(),
            },
        }
    }
}

/// Parses a seat configuration from JSON and validates it.
///
/// # Errors
/// - [`SeatingError::Json`] if the document is malformed.
/// - [`SeatingError::InvalidConfig`] if it has no seats or bad seat IDs.
pub fn load_seating_json(content: &str) -> Result<SeatingConfig> {
    let file: SeatingFile = serde_json::from_str(content)?;
    let config = SeatingConfig::from(file);
    validate_config(&config).map_err(SeatingError::InvalidConfig)?;
    Ok(config)
}

/// Reads and parses a seat configuration file.
pub fn load_seating_file(path: impl AsRef<Path>) -> Result<SeatingConfig> {
    let content = std::fs::read_to_string(path)?;
    load_seating_json(&content)
}
