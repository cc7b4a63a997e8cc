//! Customer CSV loading and writing.
//!
//! # Format
//!
//! A header row is required. Columns are matched by name, in any order:
//!
//! | Column | Aliases | Required |
//! |--------|---------|----------|
//! | `familyId` | `family_id` | yes |
//! | `id` | `customerId`, `customer_id` | no (defaults to `familyId`) |
//! | `type` | | no (ignored) |
//! | `arrivalTime` | `arrival_time` | yes |
//! | `partySize` | `party_size` | yes |
//! | `babyChairsNeeded` | `baby_chairs_needed`, `babyChairCount` | no (0) |
//! | `wheelchairsNeeded` | `wheelchairs_needed`, `wheelchairCount` | no (0) |
//! | `diningDuration` | `dining_duration`, `estDiningTime` | yes |
//!
//! Rows that fail to parse, fail [`validate_family`] or repeat a family ID
//! are rejected with their line number; loading continues.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Family, FamilyId, FamilyLabel, Tick};
use crate::validation::validate_family;

/// A row that could not be turned into a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line number in the input (the header is line 1).
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// Result of loading a customer file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Accepted families, in file order.
    pub families: Vec<Family>,
    /// Rejected rows.
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    /// Number of rejected rows.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Whether every row was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn reject(&mut self, line: u64, reason: String) {
        warn!(line, %reason, "rejected customer record");
        self.rejected.push(RejectedRecord { line, reason });
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRecord {
    #[serde(alias = "family_id")]
    family_id: FamilyId,
    #[serde(default, alias = "customerId", alias = "customer_id")]
    id: Option<u32>,
    #[serde(alias = "arrival_time")]
    arrival_time: Tick,
    #[serde(alias = "party_size")]
    party_size: u32,
    #[serde(
        default,
        alias = "baby_chairs_needed",
        alias = "babyChairCount",
        alias = "baby_chair_count"
    )]
    baby_chairs_needed: u32,
    #[serde(
        default,
        alias = "wheelchairs_needed",
        alias = "wheelchairCount",
        alias = "wheelchair_count"
    )]
    wheelchairs_needed: u32,
    #[serde(
        alias = "dining_duration",
        alias = "estDiningTime",
        alias = "est_dining_time"
    )]
    dining_duration: Tick,
}

impl From<CustomerRecord> for Family {
    fn from(r: CustomerRecord) -> Self {
        Family::new(r.family_id, r.arrival_time, r.party_size)
            .with_customer_id(r.id.unwrap_or(r.family_id))
            .with_baby_chairs(r.baby_chairs_needed)
            .with_wheelchairs(r.wheelchairs_needed)
            .with_duration(r.dining_duration)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRow {
    family_id: FamilyId,
    id: u32,
    #[serde(rename = "type")]
    label: FamilyLabel,
    arrival_time: Tick,
    party_size: u32,
    baby_chairs_needed: u32,
    wheelchairs_needed: u32,
    dining_duration: Tick,
}

impl From<&Family> for CustomerRow {
    fn from(f: &Family) -> Self {
        Self {
            family_id: f.family_id,
            id: f.customer_id,
            label: f.label(),
            arrival_time: f.arrival_time,
            party_size: f.party_size,
            baby_chairs_needed: f.baby_chairs_needed,
            wheelchairs_needed: f.wheelchairs_needed,
            dining_duration: f.dining_duration,
        }
    }
}

/// Parses customer CSV content.
///
/// # Errors
/// Only if the header row cannot be read. Bad data rows are reported in
/// [`LoadReport::rejected`].
///
/// # Example
///
/// ```
/// use u_seating::loader::load_customers_csv;
///
/// let csv = "familyId,id,type,arrivalTime,partySize,babyChairsNeeded,wheelchairsNeeded,diningDuration\n\
///            1,101,FAMILY,0,3,0,0,45\n\
///            2,102,INDIVIDUAL,5,0,0,0,20\n";
/// let report = load_customers_csv(csv).unwrap();
/// assert_eq!(report.families.len(), 1);
/// assert_eq!(report.rejected_count(), 1);
/// assert_eq!(report.rejected[0].line, 3);
/// ```
pub fn load_customers_csv(content: &str) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut report = LoadReport::default();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.reject(line, e.to_string());
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let family: Family = match record.deserialize::<CustomerRecord>(Some(&headers)) {
            Ok(r) => r.into(),
            Err(e) => {
                report.reject(line, e.to_string());
                continue;
            }
        };
        if let Err(e) = validate_family(&family) {
            report.reject(line, e.message);
            continue;
        }
        if !seen.insert(family.family_id) {
            report.reject(line, format!("Duplicate family ID: {}", family.family_id));
            continue;
        }
        report.families.push(family);
    }

    debug!(
        accepted = report.families.len(),
        rejected = report.rejected.len(),
        "loaded customer records"
    );
    Ok(report)
}

/// Reads and parses a customer CSV file.
pub fn load_customers_file(path: impl AsRef<Path>) -> Result<LoadReport> {
    let content = std::fs::read_to_string(path)?;
    load_customers_csv(&content)
}

/// Writes families as customer CSV, header included.
///
/// The `type` column carries the derived [`FamilyLabel`].
pub fn write_customers_csv<W: Write>(families: &[Family], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for family in families {
        wtr.serialize(CustomerRow::from(family))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "familyId,id,type,arrivalTime,partySize,babyChairsNeeded,wheelchairsNeeded,diningDuration";

    #[test]
    fn test_load_basic() {
        let csv = format!("{HEADER}\n1,11,FAMILY,0,4,1,0,30\n2,12,WHEELCHAIR,3,2,0,1,25\n");
        let report = load_customers_csv(&csv).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.families.len(), 2);

        let f = &report.families[0];
        assert_eq!(f.family_id, 1);
        assert_eq!(f.customer_id, 11);
        assert_eq!(f.party_size, 4);
        assert_eq!(f.baby_chairs_needed, 1);
        assert_eq!(f.dining_duration, 30);
        assert_eq!(report.families[1].wheelchairs_needed, 1);
    }

    #[test]
    fn test_load_legacy_headers_any_order() {
        let csv = "estDiningTime, partySize, family_id, arrival_time, babyChairCount\n\
                   40, 2, 7, 10, 1\n";
        let report = load_customers_csv(csv).unwrap();
        assert!(report.is_clean());
        let f = &report.families[0];
        assert_eq!(f.family_id, 7);
        assert_eq!(f.customer_id, 7);
        assert_eq!(f.arrival_time, 10);
        assert_eq!(f.baby_chairs_needed, 1);
        assert_eq!(f.wheelchairs_needed, 0);
        assert_eq!(f.dining_duration, 40);
    }

    #[test]
    fn test_rejects_bad_rows_and_continues() {
        let csv = format!(
            "{HEADER}\n\
             1,1,INDIVIDUAL,0,1,0,0,10\n\
             2,2,INDIVIDUAL,abc,1,0,0,10\n\
             3,3,INDIVIDUAL,0,1,0,0,0\n\
             1,4,INDIVIDUAL,2,1,0,0,10\n\
             5,5,INDIVIDUAL,4,1,0,0,10\n"
        );
        let report = load_customers_csv(&csv).unwrap();
        assert_eq!(report.families.len(), 2);
        assert_eq!(report.rejected_count(), 3);
        let lines: Vec<u64> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(report.rejected[2].reason.contains("Duplicate"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = format!("{HEADER}\n\n1,1,FAMILY,0,2,0,0,10\n\n");
        let report = load_customers_csv(&csv).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.families.len(), 1);
    }

    #[test]
    fn test_write_then_load() {
        let families = vec![
            Family::new(1, 0, 1).with_duration(15),
            Family::new(2, 4, 3)
                .with_customer_id(200)
                .with_baby_chairs(1)
                .with_duration(30),
        ];
        let mut buf = Vec::new();
        write_customers_csv(&families, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(HEADER));
        assert!(text.contains("WITH_BABY"));

        let report = load_customers_csv(&text).unwrap();
        assert_eq!(report.families, families);
    }
}
