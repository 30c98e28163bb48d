//! # Validation Module
//!
//! Input parsing and optional field checks for the booking form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form inputs (storefront)                                     │
//! │  ├── Date picker limited to today or later                             │
//! │  └── Guest selector 1..12                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Parsing raw date/time strings                                     │
//! │  └── Opt-in shape checks (email, party size)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: can_submit (submission.rs)                                   │
//! │  └── Presence of date, time, name, email                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is consulted by [`crate::can_submit`]; presence is the only
//! contractual check. The format checks are for callers that want them.
//!
//! ## Usage
//! ```rust
//! use tavern_core::validation::{parse_booking_date, parse_booking_time};
//!
//! let date = parse_booking_date("2025-07-18").unwrap();
//! let time = parse_booking_time("17:30").unwrap();
//! assert_eq!(date.and_time(time).to_string(), "2025-07-18 17:30:00");
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::types::truncate_to_minute;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest party the guest selector allows.
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest party the guest selector allows.
pub const MAX_PARTY_SIZE: u32 = 12;

// =============================================================================
// Date/Time Parsing
// =============================================================================

/// Parses a form date (`YYYY-MM-DD`).
pub fn parse_booking_date(input: &str) -> ValidationResult<NaiveDate> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "date".to_string(),
        });
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Parses a form time (`HH:MM`, or `HH:MM:SS` with seconds dropped).
pub fn parse_booking_time(input: &str) -> ValidationResult<NaiveTime> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "time".to_string(),
        });
    }

    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: "expected HH:MM in 24-hour format".to_string(),
        })
}

// =============================================================================
// Optional Field Checks
// =============================================================================

/// Checks the rough shape of an email address.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain contains a dot, not at either end
/// - No whitespace
pub fn validate_contact_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "contactEmail".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "contactEmail".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

/// Checks a party size against the guest selector range (1..=12).
pub fn validate_party_size(party_size: u32) -> ValidationResult<()> {
    if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&party_size) {
        return Err(ValidationError::OutOfRange {
            field: "partySize".to_string(),
            min: MIN_PARTY_SIZE as i64,
            max: MAX_PARTY_SIZE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_booking_date() {
        assert_eq!(
            parse_booking_date("2025-07-18").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()
        );
        assert_eq!(
            parse_booking_date(""),
            Err(ValidationError::Required {
                field: "date".to_string()
            })
        );
        assert!(parse_booking_date("18/07/2025").is_err());
        assert!(parse_booking_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_booking_time() {
        assert_eq!(
            parse_booking_time("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_booking_time("17:30:45").unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert!(parse_booking_time("").is_err());
        assert!(parse_booking_time("25:00").is_err());
        assert!(parse_booking_time("7pm").is_err());
    }

    #[test]
    fn test_validate_contact_email() {
        assert!(validate_contact_email("ana@example.com").is_ok());
        assert!(validate_contact_email("  ana@example.com ").is_ok());

        assert!(validate_contact_email("").is_err());
        assert!(validate_contact_email("ana").is_err());
        assert!(validate_contact_email("@example.com").is_err());
        assert!(validate_contact_email("ana@localhost").is_err());
        assert!(validate_contact_email("ana@@example.com").is_err());
        assert!(validate_contact_email("a na@example.com").is_err());
    }

    #[test]
    fn test_validate_party_size() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(12).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(13).is_err());
    }
}
