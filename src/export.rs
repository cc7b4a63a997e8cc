//! Frame output formats.
//!
//! | Function | Output |
//! |----------|--------|
//! | [`to_json`] | Pretty-printed JSON array of frames |
//! | [`to_text_log`] | One event message per line |
//! | [`write_events_csv`] | Flat event table with a header row |

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Event, EventKind, FamilyId, Frame, Tick, WaitReason};

/// Serializes frames as pretty-printed JSON.
pub fn to_json(frames: &[Frame]) -> Result<String> {
    Ok(serde_json::to_string_pretty(frames)?)
}

/// Renders every event message, one per line, in emission order.
pub fn to_text_log(frames: &[Frame]) -> String {
    let mut out = String::new();
    for line in frames.iter().flat_map(Frame::log_lines) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRow<'a> {
    timestamp: Tick,
    kind: EventKind,
    family_id: FamilyId,
    customer_id: u32,
    seat_id: Option<&'a str>,
    reason: Option<WaitReason>,
    message: &'a str,
}

impl<'a> From<&'a Event> for EventRow<'a> {
    fn from(e: &'a Event) -> Self {
        Self {
            timestamp: e.timestamp,
            kind: e.kind,
            family_id: e.family_id,
            customer_id: e.customer_id,
            seat_id: e.seat_id.as_deref(),
            reason: e.reason,
            message: &e.message,
        }
    }
}

/// Writes every event as a CSV row.
pub fn write_events_csv<W: Write>(frames: &[Frame], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for event in frames.iter().flat_map(|f| f.events.iter()) {
        wtr.serialize(EventRow::from(event))?;
    }
    wtr.flush()?;
    Ok(())
}
