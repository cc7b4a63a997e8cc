//! Input validation for seating problems.
//!
//! Checks structural integrity of the seat configuration and the demand
//! records before a run. Detects:
//! - Empty seat pools
//! - Duplicate or blank seat IDs
//! - Duplicate family IDs
//! - Families with a zero party size or zero dining duration
//!
//! Configuration errors are fatal; family errors only exclude the
//! offending record from the run.

use crate::models::{Family, SeatingConfig};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A seat has an empty ID.
    EmptyId,
    /// The configuration has no seats at all.
    EmptySeatPool,
    /// A family has a party size of zero.
    InvalidPartySize,
    /// A family has a dining duration of zero.
    InvalidDuration,
    /// Recorded frames are not in strictly increasing time order.
    UnorderedFrames,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a seat configuration.
///
/// Checks:
/// 1. At least one seat exists
/// 2. No seat has a blank ID
/// 3. No duplicate seat IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SeatingConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.seats.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySeatPool,
            "Seat configuration contains no seats",
        ));
    }

    let mut seat_ids = HashSet::new();
    for seat in &config.seats {
        if seat.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Seat of class {} has an empty ID", seat.class),
            ));
            continue;
        }
        if !seat_ids.insert(seat.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate seat ID: {}", seat.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single demand record in isolation.
pub fn validate_family(family: &Family) -> Result<(), ValidationError> {
    if family.party_size == 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidPartySize,
            format!("Family {} has a party size of 0", family.family_id),
        ));
    }
    if family.dining_duration == 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidDuration,
            format!("Family {} has a dining duration of 0", family.family_id),
        ));
    }
    Ok(())
}

/// Validates a list of demand records.
///
/// Checks every record with [`validate_family`] and reports repeated
/// family IDs (every occurrence after the first).
pub fn validate_demand(families: &[Family]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut family_ids = HashSet::new();

    for family in families {
        if let Err(e) = validate_family(family) {
            errors.push(e);
        }
        if !family_ids.insert(family.family_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate family ID: {}", family.family_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;

    fn sample_config() -> SeatingConfig {
        SeatingConfig::new(vec![
            Seat::single("S1"),
            Seat::four("T1"),
            Seat::six("L1").with_accessible(true),
        ])
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&sample_config()).is_ok());
    }

    #[test]
    fn test_empty_pool() {
        let errors = validate_config(&SeatingConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptySeatPool));
    }

    #[test]
    fn test_duplicate_seat_id() {
        let cfg = sample_config().with_seat(Seat::four("T1"));
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("T1")));
    }

    #[test]
    fn test_blank_seat_id() {
        let cfg = sample_config().with_seat(Seat::single("  "));
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
    }

    #[test]
    fn test_family_party_size_zero() {
        let err = validate_family(&Family::new(1, 0, 0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidPartySize);
    }

    #[test]
    fn test_family_duration_zero() {
        let err = validate_family(&Family::new(1, 0, 2).with_duration(0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidDuration);
    }

    #[test]
    fn test_demand_duplicates_and_multiple_errors() {
        let families = vec![
            Family::new(1, 0, 2),
            Family::new(1, 3, 2),
            Family::new(2, 0, 0),
        ];
        let errors = validate_demand(&families).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPartySize));
    }

    #[test]
    fn test_valid_demand() {
        let families = vec![Family::new(1, 0, 1), Family::new(2, 5, 6).with_wheelchairs(1)];
        assert!(validate_demand(&families).is_ok());
    }
}
