//! # Error Types
//!
//! Domain-specific error types for tavern-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tavern-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input parsing/validation failures              │
//! │                                                                         │
//! │  tavern-booking errors (separate crate)                                │
//! │  └── BookingError     - Config, transport, serialization failures      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BookingError → Notification       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that the two "soft" outcomes of a submission attempt (login
//! required, missing fields) are NOT errors. They are values of
//! [`crate::SubmitDecision`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core booking errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payload was requested for a booking that is not complete yet.
    ///
    /// ## When This Occurs
    /// - Building the backend payload before date or time is chosen
    /// - Callers skipping [`crate::can_submit`] before submitting
    #[error("Booking is incomplete, missing: {}", fields.join(", "))]
    IncompleteBooking { fields: Vec<String> },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable date or time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_booking_message() {
        let err = CoreError::IncompleteBooking {
            fields: vec!["date".to_string(), "time".to_string()],
        };
        assert_eq!(err.to_string(), "Booking is incomplete, missing: date, time");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "contactEmail".to_string(),
        };
        assert_eq!(err.to_string(), "contactEmail is required");

        let err = ValidationError::OutOfRange {
            field: "partySize".to_string(),
            min: 1,
            max: 12,
        };
        assert_eq!(err.to_string(), "partySize must be between 1 and 12");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "date".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
